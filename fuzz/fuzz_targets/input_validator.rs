//! Fuzz target for the client input validator
//!
//! Drives one validator through arbitrary lines, as typed or piped in.
//!
//! # Invariants
//!
//! - The validator never panics
//! - Every submitted request has a length in [6, 32]
//! - Every line ends in exactly one of: prompt again, submit, quit

#![no_main]

use libfuzzer_sys::fuzz_target;
use passgen_client::{RawLine, Validator, ValidatorAction, ValidatorEvent};

fuzz_target!(|lines: Vec<String>| {
    let mut validator = Validator::new();
    validator.start();

    for line in lines {
        let actions = validator.handle(ValidatorEvent::Line(RawLine::new(&line)));

        let mut outcomes = 0;
        for action in &actions {
            match action {
                ValidatorAction::Submit(request) => {
                    assert!(request.has_valid_length());
                    outcomes += 1;
                },
                ValidatorAction::ShowPrompt | ValidatorAction::Quit => outcomes += 1,
                ValidatorAction::ShowHelp | ValidatorAction::ShowError(_) => {},
            }
        }
        assert_eq!(outcomes, 1);

        if validator.state().is_terminal() {
            validator.start();
        }
    }
});
