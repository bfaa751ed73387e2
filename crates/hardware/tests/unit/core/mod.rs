//! Core component tests.
//!
//! This module contains tests for the out-of-order pipeline and the execution
//! units it drives.
