//! Generates the rolling look-back windows of capture instants to fetch.

use std::fmt;

use crate::region::AreaVariant;

pub const MINUTE_MS: i64 = 60 * 1000;

/// An absolute point in time, in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptureInstant(i64);

impl CaptureInstant {
    pub fn from_millis(millis: i64) -> Self {
        CaptureInstant(millis)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Floors the instant to the most recent `minutes` boundary.
    pub fn floor_to(&self, minutes: u32) -> Self {
        let step = minutes as i64 * MINUTE_MS;
        CaptureInstant(self.0 - self.0.rem_euclid(step))
    }

    fn minus_minutes(&self, minutes: i64) -> Self {
        CaptureInstant(self.0 - minutes * MINUTE_MS)
    }
}

impl fmt::Display for CaptureInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the capture instants for each variant, most recent first, in the order the
/// variants are given.
pub fn windows(
    reference: CaptureInstant,
    variants: &[AreaVariant],
    safety_offset_minutes: i64,
) -> Vec<(AreaVariant, Vec<CaptureInstant>)> {
    let start = reference.minus_minutes(safety_offset_minutes);

    variants
        .iter()
        .map(|variant| {
            let cadence = variant.cadence_minutes() as i64;
            let instants = (0..variant.count() as i64)
                .map(|step| start.minus_minutes(cadence * step))
                .collect();
            (*variant, instants)
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------
