//! Fray: a deterministic robot-battle simulation core.
//!
//! Bots are driven by small programs in a concatenative stack language
//! and fight in a tick-stepped 2D arena: each tick every bot
//! regenerates energy, moves, and executes up to 50 opcodes; then
//! bullets fly, hits resolve, and the dead are pruned. This facade
//! crate re-exports the public API of the Fray sub-crates; for most
//! users, depending on `fray` alone is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fray::prelude::*;
//!
//! let mut arena = Arena::new(ArenaConfig::default().with_seed(42)).unwrap();
//! arena.add_bot(
//!     "180 SETAIM\n\
//!      main: SCAN 0 > \"shoot\" JUMPIF \"main\" JUMP\n\
//!      shoot: 5 FIRE \"main\" JUMP",
//!     "gunner",
//! );
//! arena.add_bot("90 SETTRACKS 5 SETSPEED\nloop: \"loop\" JUMP", "runner");
//!
//! while !arena.is_battle_over() && arena.tick_count() < TickId(2000) {
//!     arena.tick();
//! }
//!
//! for bot in arena.bots() {
//!     println!("{}: {:.1} health", bot.name(), bot.health());
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fray-core` | Values, faults, IDs, geometry, observer trait |
//! | [`lang`] | `fray-lang` | Program parsing, bot state, interpreter |
//! | [`arena`] | `fray-arena` | World container, tick loop, ballistics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, faults, and the observer trait (`fray-core`).
pub use fray_core as types;

/// The agent language: programs, bots, the interpreter (`fray-lang`).
pub use fray_lang as lang;

/// The battle arena and tick driver (`fray-arena`).
pub use fray_arena as arena;

/// Common imports for typical Fray usage.
///
/// ```rust
/// use fray::prelude::*;
/// ```
pub mod prelude {
    // World container and configuration
    pub use fray_arena::{Arena, ArenaConfig, Bullet, ConfigError, MAX_RANGE};

    // Bots and programs
    pub use fray_lang::{
        Bot, Program, BOT_RADIUS, MAX_ENERGY, MAX_HEALTH, OPS_PER_TICK, STACK_LIMIT,
    };

    // Core values, identifiers, geometry
    pub use fray_core::{BotId, Fault, Heading, TickId, Value, Vec2};

    // Diagnostics
    pub use fray_core::{BattleObserver, FaultNotice, NullObserver, SourceLine};
}
