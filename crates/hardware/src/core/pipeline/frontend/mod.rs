//! In-order front end.
//!
//! Fetch, Decode/Rename and Dispatch each move at most one instruction per
//! cycle. Backpressure flows from dispatch to fetch through the occupied
//! latches.

/// Dispatch: ROB/IQ/LSQ admission.
pub mod dispatch;

/// Fetch: instruction lookup and BTB prediction.
pub mod fetch;

/// Decode/Rename: operand resolution and destination allocation.
pub mod rename;
