//! Straight-line projectile with distance-decayed damage.

use fray_core::{BotId, Heading, Vec2};
use fray_lang::Shot;

/// Maximum distance a bullet travels before it expires.
pub const MAX_RANGE: f64 = 1000.0;

/// A bullet in flight.
///
/// Moves `10 + power` units per tick along a fixed heading. Damage on
/// impact is `power · (1 − distance_traveled / MAX_RANGE)`, so a shot
/// loses its punch over distance. The owner reference excludes the
/// firing bot from hit tests for the bullet's whole lifetime.
#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    position: Vec2,
    direction: Heading,
    power: i64,
    speed: f64,
    owner: BotId,
    distance_traveled: f64,
}

impl Bullet {
    /// Materialise a queued shot into a bullet owned by `owner`.
    pub(crate) fn from_shot(shot: Shot, owner: BotId) -> Self {
        Self {
            position: shot.position,
            direction: shot.direction,
            power: shot.power,
            speed: (10 + shot.power) as f64,
            owner,
            distance_traveled: 0.0,
        }
    }

    /// Current position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Shot power, `1..=10`.
    pub fn power(&self) -> i64 {
        self.power
    }

    /// The bot that fired this bullet.
    pub fn owner(&self) -> BotId {
        self.owner
    }

    /// Distance covered so far.
    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    /// Fly one tick along the fixed heading.
    pub(crate) fn advance(&mut self) {
        let step = self.direction.unit().scaled(self.speed);
        self.position = self.position + step;
        self.distance_traveled += self.speed;
    }

    /// True once the bullet has covered its maximum range.
    pub(crate) fn is_expired(&self) -> bool {
        self.distance_traveled >= MAX_RANGE
    }

    /// Damage at the current range.
    pub(crate) fn damage(&self) -> f64 {
        self.power as f64 * (1.0 - self.distance_traveled / MAX_RANGE)
    }
}
