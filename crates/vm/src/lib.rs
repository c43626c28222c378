//! Tally VM: interpreter for the chained-digit stack machine
//!
//! Values are arbitrary-precision signed decimal integers stored as linked
//! digit chains (see `tally-core`); every instruction is one byte of
//! program text. The [`Machine`] owns the fetch/dispatch loop and is
//! generic over its I/O streams, so the same engine runs under the CLI and
//! inside in-memory tests.
//!
//! # Modules
//!
//! - `opcode`: byte-to-instruction decoding
//! - `machine`: the fetch/dispatch loop, stack dump, I/O instructions
//! - `program`: loading one line of program text from a file or stdin

pub mod machine;
pub mod opcode;
pub mod program;

pub use machine::{EOF_SENTINEL, Machine};
pub use opcode::Opcode;
pub use program::load_program;
