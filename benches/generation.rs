use criterion::{black_box, criterion_group, criterion_main, Criterion};
use delve::{create_rng, GameConfig, GameState, GenerationConfig, Generator, RoomCorridorGenerator};

fn bench_floor_layout(c: &mut Criterion) {
    let generator = RoomCorridorGenerator::new();
    let config = GenerationConfig::default();
    let mut seed = 0u64;

    c.bench_function("room_corridor_layout", |b| {
        b.iter(|| {
            seed += 1;
            let floor = generator.generate(&config, &mut create_rng(seed));
            black_box(floor)
        })
    });
}

fn bench_new_game(c: &mut Criterion) {
    let mut seed = 0u64;

    c.bench_function("new_game_with_population", |b| {
        b.iter(|| {
            seed += 1;
            black_box(GameState::new_game(GameConfig::default(), create_rng(seed)))
        })
    });
}

criterion_group!(benches, bench_floor_layout, bench_new_game);
criterion_main!(benches);
