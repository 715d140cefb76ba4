use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::*;

const TIERS: [(Coord, Coord, CellCount); 4] = [
    (9, 9, 10),
    (16, 16, 40),
    (30, 16, 99),
    (256, 256, 2_000),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (width, height, mines) in TIERS {
        let config = GameConfig::new(width, height, mines).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}/{mines}")),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    black_box(RandomLayoutGenerator::new(seed).generate(config))
                })
            },
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for side in [64, 256, 1024] {
        // one mine in the far corner, so a corner reveal floods the board
        let layout = MineLayout::from_mine_coords((side, side), &[(side - 1, side - 1)]).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side), &layout, |b, layout| {
            b.iter(|| {
                let mut view: Grid<PlayerCell> = Grid::new(layout.size());
                black_box(reveal(layout, &mut view, (0, 0)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
