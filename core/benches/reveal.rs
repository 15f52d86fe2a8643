use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sweeper_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, mines) in [("sparse", 90), ("dense", 450), ("full", 899)] {
        let config = GameConfig::new(MAX_SIDE, MAX_SIDE, mines).unwrap();
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomMineGenerator::new(seed).generate(config))
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let config = GameConfig::new(MAX_SIDE, MAX_SIDE, 0).unwrap();
    let board = Board::create(GameId::random(), config, RandomMineGenerator::new(0)).unwrap();

    c.bench_function("flood_fill_empty_30x30", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(board.reveal((15, 15))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_registry_move(c: &mut Criterion) {
    let registry = Registry::new(RegistryConfig { seed: Some(1) });

    c.bench_function("registry_new_game_and_move", |b| {
        b.iter(|| {
            let game = registry.new_game(16, 16, 40).unwrap();
            black_box(registry.make_move(game.id, (8, 8)))
        })
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill, bench_registry_move);
criterion_main!(benches);
