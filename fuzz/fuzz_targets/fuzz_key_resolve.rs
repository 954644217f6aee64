//! Fuzz target: resolving path segments into lookup keys.
//!
//! Whatever the segment, resolution must not panic and must keep the
//! original text recoverable as the natural-key form.

#![no_main]

use homebase_core::Key;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|raw: &str| {
    let key = Key::resolve(raw);
    assert_eq!(key.as_natural(), raw);
});
