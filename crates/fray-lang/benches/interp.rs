//! Criterion micro-benchmarks for program parsing and the opcode loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fray_core::{BotId, Vec2};
use fray_lang::{Bot, Program, ShotQueue, TickContext};

/// A cheap infinite loop: four opcodes per cycle, no energy cost, no
/// stack growth, so every tick runs the full 50-opcode budget.
const SPIN: &str = "loop: ENERGY DROP \"loop\" JUMP";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("program_parse", |b| {
        b.iter(|| Program::parse(black_box(SPIN)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut bot = Bot::new(BotId(0), Program::parse(SPIN), "bench");
    c.bench_function("bot_tick_full_budget", |b| {
        b.iter(|| {
            let mut shots = ShotQueue::new();
            let mut ctx = TickContext {
                bounds: Vec2::new(400.0, 400.0),
                contacts: &[],
                shots: &mut shots,
            };
            bot.tick(&mut ctx).unwrap();
            black_box(bot.ops_executed())
        })
    });
}

criterion_group!(benches, bench_parse, bench_tick);
criterion_main!(benches);
