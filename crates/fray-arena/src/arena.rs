//! The world container and tick driver.

use fray_core::{BattleObserver, BotId, FaultNotice, NullObserver, SourceLine, TickId, Vec2};
use fray_lang::{Bot, Contact, Program, Shot, ShotQueue, TickContext};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::bullet::Bullet;
use crate::config::{ArenaConfig, ConfigError};

/// A battle arena owning all bots and bullets.
///
/// Bots are stored in insertion order; that order fixes per-tick
/// execution order and hit-test precedence. The only nondeterminism is
/// spawn placement, drawn from a ChaCha8 RNG seeded through
/// [`ArenaConfig`], so a pinned seed pins the whole battle.
pub struct Arena {
    config: ArenaConfig,
    bots: Vec<Bot>,
    bullets: Vec<Bullet>,
    tick_count: TickId,
    next_bot_id: u64,
    rng: ChaCha8Rng,
    observer: Box<dyn BattleObserver>,
}

impl Arena {
    /// Create an empty arena with the default (no-op) observer.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        Self::with_observer(config, Box::new(NullObserver))
    }

    /// Create an empty arena that reports diagnostics to `observer`.
    pub fn with_observer(
        config: ArenaConfig,
        observer: Box<dyn BattleObserver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            bots: Vec::new(),
            bullets: Vec::new(),
            tick_count: TickId(0),
            next_bot_id: 0,
            rng,
            observer,
        })
    }

    // ── Roster ──────────────────────────────────────────────────

    /// Parse `source` and spawn the bot at a uniformly random integer
    /// position within the arena.
    pub fn add_bot(&mut self, source: &str, name: &str) -> BotId {
        let x = self.rng.random_range(0..=self.config.width as i64) as f64;
        let y = self.rng.random_range(0..=self.config.height as i64) as f64;
        self.add_bot_at(source, name, Vec2::new(x, y))
    }

    /// Parse `source` and spawn the bot at `position`.
    ///
    /// Collaborators that arrange set-piece battles (and tests) use
    /// this to bypass random placement. The position is taken as
    /// given; motion clamps to the arena from the first move onward.
    pub fn add_bot_at(&mut self, source: &str, name: &str, position: Vec2) -> BotId {
        let id = BotId(self.next_bot_id);
        self.next_bot_id += 1;
        let mut bot = Bot::new(id, Program::parse(source), name);
        bot.set_position(position);
        self.bots.push(bot);
        id
    }

    // ── Read interface ──────────────────────────────────────────

    /// All live bots, in insertion order.
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    /// All bullets currently in flight.
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Ticks advanced so far.
    pub fn tick_count(&self) -> TickId {
        self.tick_count
    }

    /// The arena configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// True once at most one bot remains.
    pub fn is_battle_over(&self) -> bool {
        self.bots.len() <= 1
    }

    /// The sole remaining bot, if the battle produced one.
    pub fn winner(&self) -> Option<&Bot> {
        if self.bots.len() == 1 {
            self.bots.first()
        } else {
            None
        }
    }

    // ── Tick driver ─────────────────────────────────────────────

    /// Advance the world one tick.
    ///
    /// Phases, in order: every bot runs its driver against a view of
    /// the other live bots; existing bullets fly and resolve hits;
    /// shots fired this tick become bullets (they first move next
    /// tick); bots at zero health are pruned. Faults surface through
    /// the observer and never escape the tick.
    pub fn tick(&mut self) {
        self.tick_count = TickId(self.tick_count.0 + 1);
        let bounds = Vec2::new(self.config.width, self.config.height);

        // 1. Bot phase. Each bot sees the other live bots as they are
        // at its own turn, so earlier movers are observed at their new
        // positions; queued shots stay invisible until phase 3.
        let mut pending: Vec<(BotId, Shot)> = Vec::new();
        for index in 0..self.bots.len() {
            let contacts: Vec<Contact> = self
                .bots
                .iter()
                .enumerate()
                .filter(|(other, bot)| *other != index && bot.is_alive())
                .map(|(_, bot)| Contact {
                    position: bot.position(),
                    radius: bot.radius(),
                })
                .collect();

            let mut shots = ShotQueue::new();
            let result = {
                let bot = &mut self.bots[index];
                let mut ctx = TickContext {
                    bounds,
                    contacts: &contacts,
                    shots: &mut shots,
                };
                bot.tick(&mut ctx)
            };

            if let Err(fault) = result {
                let bot = &self.bots[index];
                let line = bot
                    .program()
                    .line_of_token(bot.pc().saturating_sub(1))
                    .map(|(number, text)| SourceLine {
                        number,
                        text: text.to_string(),
                    });
                let notice = FaultNotice {
                    bot: bot.name().to_string(),
                    tick: self.tick_count,
                    fault,
                    line,
                };
                self.observer.bot_fault(&notice);
            }

            let owner = self.bots[index].id();
            pending.extend(shots.into_iter().map(|shot| (owner, shot)));
        }

        // 2. Bullet motion and hit resolution.
        self.update_bullets();

        // 3. Shots fired this tick enter the world.
        self.bullets
            .extend(pending.into_iter().map(|(owner, shot)| {
                Bullet::from_shot(shot, owner)
            }));

        // 4. Prune the dead.
        for bot in self.bots.iter().filter(|bot| !bot.is_alive()) {
            self.observer.bot_destroyed(bot.name(), self.tick_count);
        }
        self.bots.retain(Bot::is_alive);
    }

    /// Fly every bullet one step, then resolve hits in bullet order.
    ///
    /// A bullet that reaches its maximum range is discarded before any
    /// hit test. Otherwise the first live non-owner bot (in insertion
    /// order) within its body radius takes the decayed damage and the
    /// bullet is consumed.
    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }

        let bots = &mut self.bots;
        self.bullets.retain(|bullet| {
            if bullet.is_expired() {
                return false;
            }
            for bot in bots.iter_mut() {
                if bot.id() == bullet.owner() || !bot.is_alive() {
                    continue;
                }
                let offset = bot.position() - bullet.position();
                if offset.length() < bot.radius() {
                    bot.apply_damage(bullet.damage());
                    return false;
                }
            }
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fray_core::Heading;

    const IDLE: &str = "loop: \"loop\" JUMP";

    #[test]
    fn spawns_land_inside_the_arena() {
        let mut arena = Arena::new(ArenaConfig::default().with_seed(7)).unwrap();
        for i in 0..20 {
            arena.add_bot(IDLE, &format!("bot-{i}"));
        }
        for bot in arena.bots() {
            let p = bot.position();
            assert!(p.x >= 0.0 && p.x <= 400.0);
            assert!(p.y >= 0.0 && p.y <= 400.0);
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
        }
    }

    #[test]
    fn equal_seeds_spawn_identically() {
        let mut a = Arena::new(ArenaConfig::default().with_seed(42)).unwrap();
        let mut b = Arena::new(ArenaConfig::default().with_seed(42)).unwrap();
        for i in 0..5 {
            a.add_bot(IDLE, &format!("bot-{i}"));
            b.add_bot(IDLE, &format!("bot-{i}"));
        }
        for (x, y) in a.bots().iter().zip(b.bots()) {
            assert_eq!(x.position(), y.position());
        }
    }

    #[test]
    fn tick_count_is_monotonic() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        assert_eq!(arena.tick_count(), TickId(0));
        arena.tick();
        arena.tick();
        assert_eq!(arena.tick_count(), TickId(2));
    }

    #[test]
    fn bot_ids_are_stable_across_pruning() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        let doomed = arena.add_bot_at("0 0 /", "doomed", Vec2::new(50.0, 50.0));
        let survivor = arena.add_bot_at(IDLE, "survivor", Vec2::new(300.0, 300.0));
        assert_ne!(doomed, survivor);

        arena.tick();
        assert_eq!(arena.bots().len(), 1);
        assert_eq!(arena.bots()[0].id(), survivor);
    }

    #[test]
    fn bullets_never_hit_their_owner() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        let owner = arena.add_bot_at(IDLE, "owner", Vec2::new(100.0, 100.0));

        // A bullet about to pass through its owner's body.
        let shot = Shot {
            position: Vec2::new(100.0, 95.0),
            direction: Heading::from_degrees(180),
            power: 1,
        };
        arena.bullets.push(Bullet::from_shot(shot, owner));
        arena.tick();

        // The bullet moved to (100, 106): 6 units from the owner's
        // centre, but exempt. It survives and the owner is unharmed.
        assert_eq!(arena.bullets().len(), 1);
        assert_eq!(arena.bots()[0].health(), 100.0);

        // The same bullet owned by someone else connects.
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        arena.add_bot_at(IDLE, "victim", Vec2::new(100.0, 100.0));
        let shot = Shot {
            position: Vec2::new(100.0, 95.0),
            direction: Heading::from_degrees(180),
            power: 1,
        };
        arena.bullets.push(Bullet::from_shot(shot, BotId(999)));
        arena.tick();

        assert!(arena.bullets().is_empty());
        assert!(arena.bots()[0].health() < 100.0);
    }
}
