//! Property-based tests for password generation.
//!
//! For every kind and every client-valid length, the generator must return
//! exactly `length` symbols, each taken from that kind's alphabet.

use passgen_core::{CharsetRegistry, GenerationError, PasswordGenerator};
use passgen_proto::{PasswordKind, PasswordRequest};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arbitrary_kind() -> impl Strategy<Value = PasswordKind> {
    proptest::sample::select(PasswordKind::ALL.to_vec())
}

#[test]
fn prop_output_length_and_membership() {
    proptest!(|(
        kind in arbitrary_kind(),
        length in PasswordRequest::MIN_LENGTH..=PasswordRequest::MAX_LENGTH,
        seed in any::<u64>(),
    )| {
        let registry = CharsetRegistry::new();
        let mut generator = PasswordGenerator::new(registry, ChaCha8Rng::seed_from_u64(seed));

        let password = generator.generate(kind.tag(), length).expect("valid request");

        // PROPERTY: Exactly `length` symbols
        prop_assert_eq!(password.len(), length as usize);

        // PROPERTY: Every symbol belongs to the kind's alphabet
        let set = registry.get(kind);
        for symbol in password.as_bytes() {
            prop_assert!(set.contains(*symbol), "{} not in {} set", *symbol as char, kind);
        }
    });
}

#[test]
fn prop_unknown_tags_rejected() {
    proptest!(|(tag in any::<u8>(), length in 1u32..=32)| {
        prop_assume!(PasswordKind::from_tag(tag).is_none());

        let mut generator =
            PasswordGenerator::new(CharsetRegistry::new(), ChaCha8Rng::seed_from_u64(0));

        // PROPERTY: No output for tags outside the closed set
        prop_assert_eq!(generator.generate(tag, length), Err(GenerationError::UnknownType(tag)));
    });
}

#[test]
fn prop_oversized_lengths_rejected() {
    proptest!(|(kind in arbitrary_kind(), length in 33u32..)| {
        let mut generator =
            PasswordGenerator::new(CharsetRegistry::new(), ChaCha8Rng::seed_from_u64(0));

        // PROPERTY: Output is bounded even if validation upstream was skipped
        prop_assert_eq!(
            generator.generate(kind.tag(), length),
            Err(GenerationError::InvalidLength { length, max: 32 })
        );
    });
}

#[test]
fn symbols_are_roughly_uniform() {
    let mut generator =
        PasswordGenerator::new(CharsetRegistry::new(), ChaCha8Rng::seed_from_u64(2024));

    let mut counts = [0u32; 10];
    for _ in 0..1000 {
        let password = generator.generate(b'n', 32).expect("valid request");
        for b in password.as_bytes() {
            counts[usize::from(b - b'0')] += 1;
        }
    }

    // 32_000 draws over 10 digits: expect 3_200 each. Allow a wide margin.
    for (digit, count) in counts.iter().enumerate() {
        assert!((2_800..=3_600).contains(count), "digit {digit} drawn {count} times");
    }
}
