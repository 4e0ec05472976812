//! Update counter arithmetic for staleness detection
//!
//! Every completed write advances a mailbox's counter by exactly one,
//! wrapping at `u32::MAX`. A reader records the last value it observed and
//! classifies any different value as fresh, which stays correct across
//! wraparound: the only blind spot is a reader that misses exactly
//! `2^32` consecutive writes, far beyond any realistic poll gap.

/// Advance an update counter by one completed write.
#[inline]
pub const fn advance(version: u32) -> u32 {
    version.wrapping_add(1)
}

/// True when `current` denotes data the reader has not seen yet.
#[inline]
pub const fn is_fresh(current: u32, last_seen: u32) -> bool {
    current != last_seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_strictly_increasing_until_wrap() {
        let mut version = 0u32;
        for expected in 1..=1000u32 {
            version = advance(version);
            assert_eq!(version, expected);
        }
    }

    #[test]
    fn advance_wraps_to_zero() {
        assert_eq!(advance(u32::MAX), 0);
    }

    #[test]
    fn wrapped_counter_still_reads_as_fresh() {
        // Reader saw the pre-wrap value; the wrapped value must classify
        // as newer.
        let last_seen = u32::MAX;
        let current = advance(last_seen);
        assert!(is_fresh(current, last_seen));
    }

    #[test]
    fn equal_versions_are_stale() {
        assert!(!is_fresh(0, 0));
        assert!(!is_fresh(42, 42));
        assert!(!is_fresh(u32::MAX, u32::MAX));
    }

    #[test]
    fn any_unequal_version_is_fresh() {
        assert!(is_fresh(1, 0));
        assert!(is_fresh(0, 1));
        assert!(is_fresh(7, 3));
    }
}
