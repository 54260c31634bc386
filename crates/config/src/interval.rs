//! Humane duration parsing for the sync interval.

use std::time::Duration;

/// Parse an interval string like `"90s"`, `"15m"`, or `"1h"`.
///
/// A bare number is taken as seconds. Zero and unparseable inputs yield
/// `None` (a zero interval would spin the scheduler hot).
#[must_use]
pub fn parse_interval(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3_600u64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60u64)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1u64)
    } else {
        // Assume seconds if no suffix.
        (s, 1u64)
    };

    let n = num_str.trim().parse::<u64>().ok()?;
    let secs = n.checked_mul(multiplier)?;
    if secs == 0 {
        return None;
    }
    Some(Duration::from_secs(secs))
}
