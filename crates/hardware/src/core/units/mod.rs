//! Execution units and functional components.
//!
//! This module contains the combinational logic behind the functional units:
//! the integer/logical ALU and the branch resolution unit with its BTB. The
//! pipeline registers that hold instructions between cycles live in
//! [`crate::core::pipeline`].

/// Arithmetic Logic Unit for integer and bitwise operations.
pub mod alu;

/// Branch Resolution Unit and Branch Target Buffer.
pub mod bru;
