//! The per-tick execution context handed to each bot.
//!
//! While one bot runs its opcode loop it holds `&mut` access to itself
//! only; everything it may observe or affect in the wider world flows
//! through this context — an immutable snapshot of the other live bots
//! and an append-only queue for the shots it fires.

use fray_core::{geom, Heading, Vec2};
use smallvec::SmallVec;

/// A read-only sighting of another live bot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Centre of the bot's body.
    pub position: Vec2,
    /// Body radius.
    pub radius: f64,
}

/// A fire request queued during a bot's opcode loop.
///
/// The arena converts queued shots into bullets only after bullet
/// motion and hit resolution, so a new bullet first moves on the
/// following tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    /// Muzzle position: the firing bot's centre.
    pub position: Vec2,
    /// The firing bot's aim heading at the moment of firing.
    pub direction: Heading,
    /// Shot power, clamped to `[1, 10]` before queueing.
    pub power: i64,
}

/// Inline capacity for a bot's per-tick shot queue. A bot can afford at
/// most a handful of shots per tick before its energy goes negative.
pub type ShotQueue = SmallVec<[Shot; 4]>;

/// The view of the world a bot gets for one tick.
#[derive(Debug)]
pub struct TickContext<'a> {
    /// Arena size; positions clamp to `[0, bounds.x] × [0, bounds.y]`.
    pub bounds: Vec2,
    /// Every other live bot, in arena insertion order.
    pub contacts: &'a [Contact],
    /// Shots fired by the executing bot this tick.
    pub shots: &'a mut ShotQueue,
}

impl TickContext<'_> {
    /// Raycast from `origin` along `aim` against the contact list.
    ///
    /// Returns the entry distance to the nearest contact the ray
    /// pierces, or `0` when the ray hits nothing — programs branch with
    /// `SCAN 0 >`, so "no target" and "target at zero distance" are
    /// deliberately indistinguishable.
    pub fn scan(&self, origin: Vec2, aim: Heading) -> f64 {
        geom::raycast(
            origin,
            aim.unit(),
            self.contacts.iter().map(|c| (c.position, c.radius)),
        )
        .unwrap_or(0.0)
    }
}
