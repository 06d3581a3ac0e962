//! Rest detection.

use crate::body::Body;

/// How a body's rest state changed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleChange {
    /// No transition.
    None,
    /// Speed dropped under the threshold; `settled_since` was just set.
    Settled,
    /// Speed rose to the threshold again; `settled_since` was cleared.
    Unsettled,
}

/// Update `settled_since` from the body's current speed.
///
/// The first still frame records `now_ms`; later still frames keep the
/// original timestamp. Any frame at or above `settle_speed` clears it.
pub fn update_settle(body: &mut Body, now_ms: f64, settle_speed: f32) -> SettleChange {
    if body.speed() < settle_speed {
        if body.settled_since.is_none() {
            body.settled_since = Some(now_ms);
            return SettleChange::Settled;
        }
        SettleChange::None
    } else if body.settled_since.take().is_some() {
        SettleChange::Unsettled
    } else {
        SettleChange::None
    }
}

/// Returns true once the body has been still for at least `hold_ms`.
pub fn is_at_rest(body: &Body, now_ms: f64, hold_ms: f64) -> bool {
    body.settled_since
        .is_some_and(|since| now_ms - since >= hold_ms)
}
