//! Planar geometry under the battle angle convention.
//!
//! Headings are integer degrees in `[0, 360)`. `0°` points up, angles
//! grow clockwise, and the screen Y axis grows downward, so the world
//! offset for heading θ and magnitude m is
//! `(m·cos(θ−90°), m·sin(θ−90°))` with the angle taken in radians.

use std::fmt;
use std::ops::{Add, Sub};

/// A point or offset in the arena plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component; grows rightward.
    pub x: f64,
    /// Vertical component; grows downward.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct from components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// This vector scaled by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An integer heading in degrees, always in `[0, 360)`.
///
/// Construction normalises any signed degree count onto the circle, so
/// the in-range invariant holds by type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Heading(u16);

impl Heading {
    /// The `0°` heading (straight up).
    pub const UP: Self = Self(0);

    /// Normalise a signed degree count onto `[0, 360)`.
    pub fn from_degrees(degrees: i64) -> Self {
        Self(degrees.rem_euclid(360) as u16)
    }

    /// The heading in degrees, `0..360`.
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Unit vector for this heading under the up-is-zero clockwise
    /// convention.
    pub fn unit(self) -> Vec2 {
        let rad = (f64::from(self.0) - 90.0).to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    /// Angular distance to `other`, taking the shorter way around.
    ///
    /// Symmetric, and bounded by 180. This is the energy cost of a
    /// tracks-direction change.
    pub fn turn_cost(self, other: Self) -> i64 {
        let diff = (i64::from(self.0) - i64::from(other.0)).abs();
        diff.min(360 - diff)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Cast a sensing ray from `origin` along the unit vector `dir` against
/// circular targets.
///
/// For each `(centre, radius)` pair, the target is considered when it
/// lies ahead of the origin (non-negative projection onto the ray) and
/// the ray passes within `radius` of its centre. The reported distance
/// is to the circle's entry point, not its centre; targets whose entry
/// point is at or behind the origin are ignored.
///
/// Returns the smallest such distance, or `None` when the ray hits
/// nothing.
pub fn raycast<I>(origin: Vec2, dir: Vec2, targets: I) -> Option<f64>
where
    I: IntoIterator<Item = (Vec2, f64)>,
{
    let mut nearest: Option<f64> = None;
    for (centre, radius) in targets {
        let offset = centre - origin;
        let along = offset.dot(dir);
        if along < 0.0 {
            continue;
        }
        let closest = origin + dir.scaled(along);
        let perp = (closest - centre).length();
        if perp > radius {
            continue;
        }
        let entry = along - (radius * radius - perp * perp).sqrt();
        if entry > 0.0 && nearest.is_none_or(|d| entry < d) {
            nearest = Some(entry);
        }
    }
    nearest
}
