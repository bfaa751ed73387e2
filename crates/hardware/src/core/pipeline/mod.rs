//! Out-of-order instruction pipeline.
//!
//! This module contains the structures and stages of the out-of-order core.
//! It includes the following components:
//! 1. **Renaming:** Free list, rename map and physical register scoreboard.
//! 2. **Buffers:** Reorder buffer, issue queue and load-store queue.
//! 3. **Latches:** Single-slot registers between stages and inside the units.
//! 4. **Signals:** Per-opcode control signals generated at decode.
//! 5. **Stages:** Front end (fetch, rename, dispatch) and backend (issue, execute, memory, commit).
//! 6. **Engine:** The fixed intra-cycle stage order.

/// Backend stages: issue, execute, memory, commit, recovery.
pub mod backend;

/// Cycle engine.
pub mod engine;

/// Physical register free list.
pub mod free_list;

/// Front end stages: fetch, decode/rename, dispatch.
pub mod frontend;

/// Issue queue (reservation station).
pub mod issue_queue;

/// Inter-stage latches and renamed instruction records.
pub mod latches;

/// Load-store queue.
pub mod lsq;

/// Architectural target to physical register bindings.
pub mod rename_map;

/// Reorder buffer.
pub mod rob;

/// Physical register readiness and values.
pub mod scoreboard;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline observation hooks.
pub mod traits;
