//! Core types and traits for the Fray battle simulation.
//!
//! This is the leaf crate with zero internal Fray dependencies. It defines
//! the fundamental abstractions used throughout the workspace: the tagged
//! stack value, the fault taxonomy, tick and bot identifiers, planar
//! geometry under the battle angle convention, and the observer trait
//! through which the engine reports diagnostics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geom;
pub mod id;
pub mod observer;
pub mod value;

// Re-export core types at crate root for convenience.
pub use error::Fault;
pub use geom::{raycast, Heading, Vec2};
pub use id::{BotId, TickId};
pub use observer::{BattleObserver, FaultNotice, NullObserver, SourceLine};
pub use value::Value;
