//! Enabled-check performed ahead of message realization.

use crate::domain::Marker;
use crate::port::SinkHandle;

/// True when the sink's threshold admits this rank/marker combination.
///
/// This is the laziness contract: deferred message sources may only be
/// realized after this returns true. The check is re-evaluated independently
/// on every call; there is no state across calls.
#[inline]
pub fn enabled(handle: &dyn SinkHandle, rank: u32, marker: Option<&Marker>) -> bool {
    handle.enabled(rank, marker)
}
