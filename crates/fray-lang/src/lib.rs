//! The agent stack language: program parsing, the bot state machine,
//! and the opcode interpreter with its per-tick driver.
//!
//! A [`Program`] is an immutable token stream with a label index. A
//! [`Bot`] owns one program plus all mutable execution state (stack,
//! variables, program counter) and its physical state (position,
//! headings, speed, health, energy). Each arena tick the bot driver
//! regenerates energy, moves, and runs a bounded opcode loop against a
//! [`TickContext`] view of the world.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bot;
pub mod context;
mod exec;
pub mod program;

// Re-export the public surface at crate root for convenience.
pub use bot::{Bot, BOT_RADIUS, ENERGY_REGEN, MAX_ENERGY, MAX_HEALTH, OPS_PER_TICK, STACK_LIMIT};
pub use context::{Contact, Shot, ShotQueue, TickContext};
pub use program::Program;
