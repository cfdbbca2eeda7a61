//! # Identifier Generation
//!
//! Todo ids are persisted, so they must stay unique across sessions, not only within one.
//! They are UUID-v4 shaped strings: 16 random bytes with the version and variant bits
//! fixed, rendered as hyphenated lowercase hex (`8-4-4-4-12`).
//!
//! The random bytes come from the operating system's secure source when it is available.
//! If that source fails (sandboxed or early-boot environments), generation falls back to a
//! seeded pseudo-random generator. Callers never see an error either way.
//!
//! Ids read back from storage are treated as opaque strings: legacy records may carry ids
//! that are not UUIDs at all, and those are kept as they are.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Builder;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh id for a new todo.
pub fn new_id() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => format_v4(bytes),
        Err(e) => {
            tracing::debug!(error = %e, "secure random source unavailable, using fallback");
            pseudo_random_id()
        }
    }
}

/// Generates an id from the pseudo-random fallback generator.
///
/// Each call reseeds from the wall clock, the process id and a process-wide counter, so two
/// calls within the same clock tick still diverge.
pub fn pseudo_random_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let seed = nanos ^ count.rotate_left(32) ^ u64::from(std::process::id()).rotate_left(16);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    format_v4(bytes)
}

fn format_v4(bytes: [u8; 16]) -> String {
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::{Uuid, Variant};

    fn assert_v4_shape(id: &str) {
        let groups: Vec<&str> = id.split('-').collect();
        let lens: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lens, vec![8, 4, 4, 4, 12], "unexpected layout: {}", id);
        assert!(id
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)));

        let parsed = Uuid::parse_str(id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.get_variant(), Variant::RFC4122);
    }

    #[test]
    fn test_new_id_is_v4_shaped() {
        assert_v4_shape(&new_id());
    }

    #[test]
    fn test_fallback_id_is_v4_shaped() {
        assert_v4_shape(&pseudo_random_id());
    }

    #[test]
    fn test_ids_do_not_collide() {
        let ids: HashSet<String> = (0..2000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn test_fallback_ids_do_not_collide_in_a_tight_loop() {
        let ids: HashSet<String> = (0..2000).map(|_| pseudo_random_id()).collect();
        assert_eq!(ids.len(), 2000);
    }
}
