//! Observer surface through which the engine reports battle diagnostics.
//!
//! The simulation core never prints; collaborators (CLIs, visualisers,
//! test harnesses) receive fault reports and lifecycle events through
//! this trait, mirroring how the rest of the read interface exposes
//! state instead of rendering it.

use crate::error::Fault;
use crate::id::TickId;

/// A source line recovered from a bot's program for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    /// Zero-based line number within the program source.
    pub number: usize,
    /// The line's text as written, comments included.
    pub text: String,
}

/// A fault diagnostic delivered when an agent program dies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultNotice {
    /// Name of the bot that faulted.
    pub bot: String,
    /// The tick during which the fault occurred.
    pub tick: TickId,
    /// The fault itself.
    pub fault: Fault,
    /// The source line holding the offending token, when the token
    /// bookkeeping can recover it.
    pub line: Option<SourceLine>,
}

/// Callbacks for battle diagnostics and lifecycle events.
///
/// All methods have no-op defaults so implementors opt into the events
/// they care about. Callbacks are invoked synchronously from within
/// `Arena::tick`; implementations should return promptly.
pub trait BattleObserver {
    /// An agent program faulted; its bot is dead and will be pruned at
    /// the end of the current tick.
    fn bot_fault(&mut self, notice: &FaultNotice) {
        let _ = notice;
    }

    /// A bot's health reached zero and it is being removed.
    ///
    /// Fired once per bot, at the tick in which it is pruned, for both
    /// damage deaths and fault deaths.
    fn bot_destroyed(&mut self, name: &str, tick: TickId) {
        let _ = (name, tick);
    }
}

/// The default observer: ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {}
