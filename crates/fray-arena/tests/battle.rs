//! Integration scenarios: whole battles driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use fray_arena::{Arena, ArenaConfig};
use fray_core::{BattleObserver, Fault, FaultNotice, TickId, Value, Vec2};

/// A bot that spins on the spot doing nothing.
const IDLE: &str = "loop: \"loop\" JUMP";

fn arena() -> Arena {
    Arena::new(ArenaConfig::default()).unwrap()
}

// ── Observer capturing diagnostics ───────────────────────────────────

#[derive(Default)]
struct Events {
    faults: Vec<FaultNotice>,
    destroyed: Vec<String>,
}

/// Shared-handle observer so the test keeps access after the arena
/// takes ownership of its copy.
#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Events>>);

impl BattleObserver for Recorder {
    fn bot_fault(&mut self, notice: &FaultNotice) {
        self.0.borrow_mut().faults.push(notice.clone());
    }

    fn bot_destroyed(&mut self, name: &str, _tick: TickId) {
        self.0.borrow_mut().destroyed.push(name.to_string());
    }
}

// ── Ballistics ───────────────────────────────────────────────────────

#[test]
fn fired_bullet_crosses_the_gap_and_lands_decayed_damage() {
    let mut arena = arena();
    arena.add_bot_at(
        "180 SETAIM 5 FIRE\nloop: \"loop\" JUMP",
        "shooter",
        Vec2::new(100.0, 100.0),
    );
    arena.add_bot_at(IDLE, "target", Vec2::new(100.0, 300.0));

    // The firing tick creates the bullet but does not move it.
    arena.tick();
    assert_eq!(arena.bullets().len(), 1);
    assert_eq!(arena.bullets()[0].position(), Vec2::new(100.0, 100.0));
    assert_eq!(arena.bullets()[0].power(), 5);

    // Twelve moves at speed 15 reach (100, 280): still 20 units from
    // the target centre, no hit yet.
    for _ in 0..12 {
        arena.tick();
    }
    assert_eq!(arena.bullets().len(), 1);
    assert_eq!(arena.bots()[1].health(), 100.0);

    // The thirteenth move reaches (100, 295), inside the target's
    // radius: 195 units travelled, damage 5·(1 − 195/1000).
    arena.tick();
    assert!(arena.bullets().is_empty());
    assert!((arena.bots()[1].health() - 95.975).abs() < 1e-9);
}

#[test]
fn bullet_expires_in_empty_space() {
    let mut arena = arena();
    arena.add_bot_at(
        "10 FIRE\nloop: \"loop\" JUMP",
        "lonely",
        Vec2::new(200.0, 200.0),
    );

    arena.tick();
    assert_eq!(arena.bullets().len(), 1);

    // Speed 20: the fiftieth move exhausts the 1000-unit range and the
    // bullet vanishes without ever hitting anything.
    for _ in 0..50 {
        arena.tick();
    }
    assert!(arena.bullets().is_empty());
    assert_eq!(arena.bots()[0].health(), 100.0);
}

#[test]
fn hit_resolution_prefers_the_earlier_inserted_bot() {
    let mut arena = arena();
    arena.add_bot_at(
        "180 SETAIM 10 FIRE\nloop: \"loop\" JUMP",
        "shooter",
        Vec2::new(100.0, 100.0),
    );
    arena.add_bot_at(IDLE, "first", Vec2::new(100.0, 200.0));
    arena.add_bot_at(IDLE, "second", Vec2::new(100.0, 205.0));

    // Power 10 flies at 20/tick: the fifth move lands on (100, 200),
    // inside both targets' radii. Insertion order decides.
    for _ in 0..6 {
        arena.tick();
    }
    assert!(arena.bullets().is_empty());
    assert!((arena.bots()[1].health() - 91.0).abs() < 1e-9);
    assert_eq!(arena.bots()[2].health(), 100.0);
}

// ── Fault containment and lifecycle ──────────────────────────────────

#[test]
fn a_faulting_bot_dies_alone_and_the_battle_goes_on() {
    let recorder = Recorder::default();
    let mut arena =
        Arena::with_observer(ArenaConfig::default(), Box::new(recorder.clone())).unwrap();
    arena.add_bot_at("0 0 /", "crasher", Vec2::new(50.0, 50.0));
    arena.add_bot_at(IDLE, "steady", Vec2::new(300.0, 300.0));

    arena.tick();

    assert_eq!(arena.bots().len(), 1);
    assert_eq!(arena.bots()[0].name(), "steady");

    {
        let events = recorder.0.borrow();
        assert_eq!(events.faults.len(), 1);
        let notice = &events.faults[0];
        assert_eq!(notice.bot, "crasher");
        assert_eq!(notice.fault, Fault::DivisionByZero);
        assert_eq!(notice.tick, TickId(1));
        let line = notice.line.as_ref().expect("line should be recovered");
        assert_eq!(line.number, 0);
        assert_eq!(line.text, "0 0 /");
        assert_eq!(events.destroyed, vec!["crasher".to_string()]);
    }

    assert!(arena.is_battle_over());
    assert_eq!(arena.winner().unwrap().name(), "steady");

    // The arena stays well-formed after the death.
    arena.tick();
    assert_eq!(arena.bots().len(), 1);
}

#[test]
fn a_dead_bot_never_reappears() {
    let mut arena = arena();
    arena.add_bot_at("0 0 /", "crasher", Vec2::new(50.0, 50.0));
    arena.add_bot_at(IDLE, "steady", Vec2::new(300.0, 300.0));

    for _ in 0..10 {
        arena.tick();
        assert!(arena.bots().iter().all(|bot| bot.name() != "crasher"));
        assert!(arena.bots().iter().all(|bot| bot.is_alive()));
    }
}

#[test]
fn sustained_fire_wins_the_battle() {
    let mut arena = arena();
    arena.add_bot_at(
        "180 SETAIM\nmain: 5 FIRE \"main\" JUMP",
        "shooter",
        Vec2::new(100.0, 100.0),
    );
    arena.add_bot_at(IDLE, "target", Vec2::new(100.0, 300.0));

    let mut ticks = 0;
    while !arena.is_battle_over() && ticks < 500 {
        arena.tick();
        ticks += 1;
    }

    assert!(arena.is_battle_over(), "battle should finish within bounds");
    assert_eq!(arena.winner().unwrap().name(), "shooter");
}

// ── Sensing through the arena ────────────────────────────────────────

#[test]
fn scan_alone_in_the_arena_reads_zero() {
    let mut arena = arena();
    arena.add_bot_at(
        "SCAN \"seen\" STORE\nloop: \"loop\" JUMP",
        "alone",
        Vec2::new(200.0, 200.0),
    );
    arena.tick();
    assert_eq!(
        arena.bots()[0].variable("seen"),
        Some(&Value::Int(0))
    );
}

#[test]
fn scan_guided_fire_finds_a_target_downrange() {
    let mut arena = arena();
    arena.add_bot_at(
        "main: 180 SETAIM SCAN 0 > \"shoot\" JUMPIF \"main\" JUMP\n\
         shoot: 5 FIRE \"main\" JUMP",
        "hunter",
        Vec2::new(100.0, 100.0),
    );
    arena.add_bot_at(IDLE, "prey", Vec2::new(100.0, 300.0));

    for _ in 0..30 {
        arena.tick();
    }
    assert!(arena.bots().len() < 2 || arena.bots()[1].health() < 100.0);
}

// ── Determinism ──────────────────────────────────────────────────────

#[test]
fn equal_seeds_replay_identical_battles() {
    let build = || {
        let mut arena = Arena::new(ArenaConfig::default().with_seed(1234)).unwrap();
        arena.add_bot("main: 90 SETAIM 3 FIRE \"main\" JUMP", "gunner");
        arena.add_bot("90 SETTRACKS 5 SETSPEED\nloop: \"loop\" JUMP", "runner");
        arena.add_bot(IDLE, "bystander");
        arena
    };

    let mut a = build();
    let mut b = build();
    for _ in 0..50 {
        a.tick();
        b.tick();
    }

    assert_eq!(a.tick_count(), b.tick_count());
    assert_eq!(a.bots().len(), b.bots().len());
    for (x, y) in a.bots().iter().zip(b.bots()) {
        assert_eq!(x.name(), y.name());
        assert_eq!(x.position(), y.position());
        assert_eq!(x.health(), y.health());
        assert_eq!(x.energy(), y.energy());
    }
    assert_eq!(a.bullets().len(), b.bullets().len());
}
