//! Seeding of the process-wide random source.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::EntropyError;

/// Where the generator's one-time seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Wall-clock time in whole seconds.
    ///
    /// Two processes started in the same second produce identical password
    /// sequences, and the seed can be guessed from the start time. Not
    /// suitable for real credentials.
    #[default]
    Clock,

    /// OS entropy via getrandom.
    Os,
}

/// Build the random source for one process lifetime.
///
/// Call once at startup and hand the result to the generator.
///
/// # Errors
///
/// - `EntropyError::ClockBeforeEpoch` if the system clock is unusable
/// - `EntropyError::Os` if the OS entropy source fails
pub fn seed_rng(source: SeedSource) -> Result<ChaCha8Rng, EntropyError> {
    match source {
        SeedSource::Clock => {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|_| EntropyError::ClockBeforeEpoch)?
                .as_secs();
            tracing::debug!(seed = secs, "seeding generator from clock");
            Ok(ChaCha8Rng::seed_from_u64(secs))
        },
        SeedSource::Os => {
            let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
            getrandom::fill(&mut seed).map_err(|e| EntropyError::Os(e.to_string()))?;
            tracing::debug!("seeding generator from OS entropy");
            Ok(ChaCha8Rng::from_seed(seed))
        },
    }
}
