//! The battle arena: world container and tick driver.
//!
//! The arena owns every bot and bullet. Each [`Arena::tick`] advances
//! the world one step: bots run in insertion order against a view of
//! the other live bots, existing bullets fly and resolve hits, shots
//! fired this tick become bullets, and dead bots are pruned. External
//! collaborators observe the world through the read interface and the
//! [`BattleObserver`](fray_core::BattleObserver) callbacks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod bullet;
pub mod config;

pub use arena::Arena;
pub use bullet::{Bullet, MAX_RANGE};
pub use config::{ArenaConfig, ConfigError};
