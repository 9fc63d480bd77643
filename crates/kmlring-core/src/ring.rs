//! Ring validation and closure

use crate::error::ExtractionError;
use crate::geodesy::is_close_enough;
use crate::model::{ClosedRing, Coordinate};
use log::debug;

/// Minimum coordinates in a ring, counting the repeated closing coordinate
pub const MIN_RING_LEN: usize = 4;

/// Turn a candidate coordinate list into a closed ring
///
/// The candidate must have at least [`MIN_RING_LEN`] coordinates. If its
/// first and last coordinates differ but lie within the snapping threshold,
/// the first coordinate is overwritten with the last one (the last
/// coordinate's value wins). Rejections are appended to `errors`.
#[must_use = "a rejected ring is only reported through `errors`"]
pub fn validate(
    mut raw: Vec<Coordinate>,
    errors: &mut Vec<ExtractionError>,
) -> Option<ClosedRing> {
    let (first, last) = match raw.as_slice() {
        [first, .., last] if raw.len() >= MIN_RING_LEN => (*first, *last),
        _ => {
            errors.push(ExtractionError::RingTooShort);
            return None;
        }
    };

    if first != last {
        if !is_close_enough(first, last) {
            errors.push(ExtractionError::RingNotClosed);
            return None;
        }
        debug!("Snapping ring start {first:?} onto ring end {last:?}");
        raw[0] = last;
    }

    Some(ClosedRing::from_validated(raw))
}
