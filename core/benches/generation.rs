use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tripwire_core::{GameConfig, Grid, generate};

const TIERS: [(&str, GameConfig); 3] = [
    ("classic", GameConfig::CLASSIC),
    ("expert", GameConfig::new_unchecked((30, 16), 99)),
    ("huge", GameConfig::new_unchecked((255, 255), 8000)),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                generate(black_box(config), seed)
            });
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // a single hazard in the corner turns the rest into one zero region
    let grid = Grid::from_hazard_coords((255, 255), &[(254, 254)]).expect("valid layout");

    c.bench_function("reveal/open_board", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            grid.reveal(black_box((0, 0)))
        });
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
