use std::time::Duration;

use criterion::{criterion_group, Criterion};
use grainfall::cells::cell::CellType;
use grainfall::util::vectors::IjVector;
use grainfall::world::World;

const FRAME: Duration = Duration::from_millis(16);

/// A walled box with a mixed fill of water and sand
fn build_soup(width: usize, height: usize) -> World {
    let mut world = World::new(width, height);
    for j in 0..width as i64 {
        world.place(IjVector::new(0, j), CellType::Wall);
    }
    for i in 0..height as i64 {
        world.place(IjVector::new(i, 0), CellType::Wall);
        world.place(IjVector::new(i, width as i64 - 1), CellType::Wall);
    }
    for i in 1..height as i64 - 1 {
        for j in 1..width as i64 - 1 {
            match (i + j) % 3 {
                0 => world.place(IjVector::new(i, j), CellType::Water),
                1 => world.place(IjVector::new(i, j), CellType::Sand),
                _ => {}
            }
        }
    }
    world
}

fn bench_mixed_soup(c: &mut Criterion) {
    let mut world = build_soup(64, 64);
    c.bench_function("advance_frame_64x64_mixed", |b| {
        b.iter(|| world.advance_frame(FRAME))
    });
}

fn bench_liquid_relaxation(c: &mut Criterion) {
    c.bench_function("advance_frame_64x64_pouring_water", |b| {
        let mut world = World::new(64, 64);
        for j in 0..64 {
            world.place(IjVector::new(0, j), CellType::Wall);
        }
        for j in 16..48 {
            for i in 32..64 {
                world.place(IjVector::new(i, j), CellType::Water);
            }
        }
        b.iter(|| world.advance_frame(FRAME))
    });
}

criterion_group!(benches, bench_mixed_soup, bench_liquid_relaxation);
