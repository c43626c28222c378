//! Tally Core: value representation for the Tally stack machine
//!
//! This crate holds the machine-agnostic data model: any front end that
//! wants to execute or analyze Tally programs builds on these three layers.
//!
//! Key design principles:
//! - Chain: doubly-linked owned sequence with O(1) splice and cursor handles
//! - Number: signed decimal integer stored as a least-significant-first
//!   digit chain with an explicit sign tag
//! - OperandStack: tail-accessed stack of numbers with indexed peeks
//!
//! # Modules
//!
//! - `chain`: the linked sequence container (insertion, removal, splice)
//! - `number`: construction, formatting, comparison and addition over chains
//! - `stack`: push/pop/peek-by-depth over numbers

pub mod chain;
pub mod number;
pub mod stack;

// Re-export key types
pub use chain::{Chain, CursorMut};
pub use number::{Number, Sign};
pub use stack::OperandStack;
