//! Backend pipeline stages.
//!
//! The backend covers: Issue -> Int/Logical/Mul1..Mul4 -> LSQ -> DCache -> Commit.
//! Every stage is a free function over the [`Cpu`](crate::core::Cpu); the
//! engine calls them back-to-front so a value published this cycle is visible
//! to stages that run later in the same cycle.

/// Retirement from the ROB head.
pub mod commit;

/// Functional unit execution.
pub mod execute;

/// Issue queue selection.
pub mod issue;

/// Load-store queue head and data cache access.
pub mod memory;

/// Squash of wrong-path state after a redirect.
pub mod recovery;
