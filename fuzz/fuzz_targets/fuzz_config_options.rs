//! Fuzz target for provider option decoding and defaulting.
//!
//! Goal: decoding an arbitrary host option map and completing it should **never panic**.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_options
//! ```

#![no_main]

use arbitrary::Arbitrary;
use conforma_settings::ConformaConfig;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

/// Structured input mixing known keys with arbitrary ones.
#[derive(Arbitrary, Debug)]
struct OptionsInput {
    known: Vec<(u8, String)>,
    other: BTreeMap<String, String>,
}

fuzz_target!(|input: OptionsInput| {
    if input.known.len() > 16 || input.other.len() > 16 {
        return;
    }

    let mut options = input.other;
    for (idx, value) in input.known {
        let keys = ConformaConfig::KEYS;
        options.insert(keys[idx as usize % keys.len()].to_string(), value);
    }

    let Ok(mut cfg) = ConformaConfig::from_options(&options) else {
        return;
    };
    cfg.complete();

    // A completed config with any bundle source always has a location.
    if cfg.bundle().is_some() || cfg.policy_output().is_some() {
        assert!(cfg.bundle_location().is_some());
    }
});
