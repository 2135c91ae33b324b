//! Monotonic ULID generation.
//!
//! Record ids must be unique and sort in creation order, even when several
//! records are created within the same millisecond.

use std::sync::{Mutex, OnceLock};
use ulid::{Generator, Ulid};

fn generator() -> &'static Mutex<Generator> {
    static GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();
    GENERATOR.get_or_init(|| Mutex::new(Generator::new()))
}

/// Generate a ULID that is strictly greater than any previously generated one
/// in this process.
pub fn generate_monotonic_ulid() -> Ulid {
    let mut generator = match generator().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match generator.generate() {
        Ok(ulid) => ulid,
        Err(e) => {
            // Random component overflowed within one millisecond
            tracing::warn!("Monotonic ULID generation overflowed, using fresh ULID: {}", e);
            Ulid::new()
        }
    }
}

/// Generate a monotonic ULID as its canonical 26 character string.
pub fn generate_monotonic_ulid_string() -> String {
    generate_monotonic_ulid().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulids_are_strictly_increasing() {
        let ids: Vec<Ulid> = (0..100).map(|_| generate_monotonic_ulid()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_ulid_string_is_canonical_length() {
        assert_eq!(generate_monotonic_ulid_string().len(), 26);
    }
}
