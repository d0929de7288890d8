//! Bot state and the per-tick driver.

use fray_core::{BotId, Fault, Heading, Value, Vec2};
use indexmap::IndexMap;

use crate::context::TickContext;
use crate::program::Program;

/// Maximum (and starting) health.
pub const MAX_HEALTH: f64 = 100.0;
/// Maximum (and starting) energy. Energy may go negative; regeneration
/// never lifts it past this cap.
pub const MAX_ENERGY: i64 = 100;
/// Energy regenerated at the start of every tick.
pub const ENERGY_REGEN: i64 = 5;
/// Body radius of every bot, in world units.
pub const BOT_RADIUS: f64 = 10.0;
/// Opcode budget per tick: no program can monopolise a tick.
pub const OPS_PER_TICK: u32 = 50;
/// Operand-stack depth cap, enforced before each dispatch.
pub const STACK_LIMIT: usize = 100;

/// One battle robot: a program plus all of its execution and physical
/// state.
///
/// The arena owns every bot and steps it once per tick through
/// [`Bot::tick`]. All state mutation happens either there or through
/// damage applied during hit resolution.
#[derive(Clone, Debug)]
pub struct Bot {
    pub(crate) id: BotId,
    pub(crate) name: String,
    pub(crate) program: Program,
    pub(crate) position: Vec2,
    pub(crate) health: f64,
    pub(crate) energy: i64,
    pub(crate) tracks: Heading,
    pub(crate) aim: Heading,
    pub(crate) speed: i64,
    pub(crate) pc: usize,
    pub(crate) stack: Vec<Value>,
    pub(crate) variables: IndexMap<String, Value>,
    pub(crate) ops_executed: u32,
}

impl Bot {
    /// Create a bot at the origin with full health and energy.
    ///
    /// The arena assigns the [`BotId`] and places the bot afterwards.
    pub fn new(id: BotId, program: Program, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            program,
            position: Vec2::ZERO,
            health: MAX_HEALTH,
            energy: MAX_ENERGY,
            tracks: Heading::UP,
            aim: Heading::UP,
            speed: 0,
            pc: 0,
            stack: Vec::new(),
            variables: IndexMap::new(),
            ops_executed: 0,
        }
    }

    // ── Read interface ──────────────────────────────────────────

    /// Stable identity within the owning arena.
    pub fn id(&self) -> BotId {
        self.id
    }

    /// The bot's name, as given to `add_bot`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed program this bot runs.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Centre of the bot's body.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Remaining health. Fractional: bullet damage decays with distance.
    pub fn health(&self) -> f64 {
        self.health
    }

    /// Remaining energy. May be negative after an expensive opcode run.
    pub fn energy(&self) -> i64 {
        self.energy
    }

    /// Drive (movement) heading.
    pub fn tracks(&self) -> Heading {
        self.tracks
    }

    /// Weapon and scanner heading.
    pub fn aim(&self) -> Heading {
        self.aim
    }

    /// Current speed in units per tick, `0..=10`.
    pub fn speed(&self) -> i64 {
        self.speed
    }

    /// Body radius.
    pub fn radius(&self) -> f64 {
        BOT_RADIUS
    }

    /// Current program counter (token index).
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// The operand stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// A named variable's current value, if stored.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Opcodes executed during the current (or most recent) tick.
    pub fn ops_executed(&self) -> u32 {
        self.ops_executed
    }

    /// True while health is above zero.
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    // ── Mutation by the arena ───────────────────────────────────

    /// Place the bot. Used at spawn time; callers keep the position
    /// inside the arena bounds.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Apply bullet damage.
    pub fn apply_damage(&mut self, damage: f64) {
        self.health -= damage;
    }

    // ── Tick driver ─────────────────────────────────────────────

    /// Run this bot's slice of the tick: regenerate energy, move, then
    /// execute opcodes until the budget or the energy runs out.
    ///
    /// A fault destroys the bot (health drops to zero) and is returned
    /// so the arena can emit a diagnostic; it never propagates further.
    /// Energy checks gate progress twice: a bot that starts the tick
    /// negative does nothing at all, and a bot that spends itself
    /// negative mid-loop stops executing until regeneration catches up.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<(), Fault> {
        if self.health <= 0.0 {
            return Ok(());
        }
        self.energy = (self.energy + ENERGY_REGEN).min(MAX_ENERGY);
        if self.energy < 0 {
            return Ok(());
        }
        self.advance(ctx.bounds);

        self.ops_executed = 0;
        while self.ops_executed < OPS_PER_TICK {
            if self.energy < 0 {
                break;
            }
            if let Err(fault) = self.step(ctx) {
                self.health = 0.0;
                return Err(fault);
            }
        }
        Ok(())
    }

    /// Euler motion step along the tracks heading, clamped to the
    /// arena bounds.
    fn advance(&mut self, bounds: Vec2) {
        if self.speed <= 0 {
            return;
        }
        let step = self.tracks.unit().scaled(self.speed as f64);
        self.position = Vec2::new(
            (self.position.x + step.x).clamp(0.0, bounds.x),
            (self.position.y + step.y).clamp(0.0, bounds.y),
        );
    }
}
