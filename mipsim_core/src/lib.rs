//! Cycle-accurate functional simulator of a single-cycle MIPS datapath.
//!
//! The [`emulator`] module holds the architectural state and the per-cycle
//! evaluation logic; [`isa`] holds the instruction encoding for the supported
//! R-type and I-type subset.

pub mod emulator;
pub mod isa;
mod utils;
