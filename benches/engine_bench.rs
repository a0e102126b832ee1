use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use islander::board::{Board, Location, Terrain};
use islander::config::Rules;
use islander::movegen::{legal_placements, random_placement, random_tile};
use islander::placement::{can_place, place, resolve_orientation};
use islander::player::{Inventory, Player};
use islander::settlement::{expand, found};

/// A board grown by `tiles` seeded random placements.
fn grown_board(tiles: usize, seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::with_first_tile();
    for _ in 0..tiles {
        let Some(p) = random_placement(&board, &mut rng) else {
            break;
        };
        place(&mut board, random_tile(&mut rng), p.volcano, p.orientation).unwrap();
    }
    board
}

fn bench_can_place(c: &mut Criterion) {
    let board = grown_board(24, 1);
    let legal = legal_placements(&board);
    let tile = random_tile(&mut StdRng::seed_from_u64(2));
    c.bench_function("can_place_all_legal", |b| {
        b.iter(|| {
            for p in &legal {
                black_box(can_place(&board, tile, p.volcano, p.orientation)).ok();
            }
        })
    });
}

fn bench_legal_placements(c: &mut Criterion) {
    let small = grown_board(8, 3);
    let large = grown_board(48, 3);
    c.bench_function("legal_placements_8_tiles", |b| {
        b.iter(|| legal_placements(black_box(&small)))
    });
    c.bench_function("legal_placements_48_tiles", |b| {
        b.iter(|| legal_placements(black_box(&large)))
    });
}

fn bench_resolve_orientation(c: &mut Criterion) {
    let board = grown_board(24, 4);
    c.bench_function("resolve_orientation_origin", |b| {
        b.iter(|| {
            resolve_orientation(
                black_box(&board),
                Location::new(0, 0, 0),
                Location::new(0, 1, 0),
            )
        })
    });
}

fn bench_found_and_expand(c: &mut Criterion) {
    let board = grown_board(48, 5);
    let rules = Rules::default();
    let start = board
        .columns()
        .filter_map(|col| board.topmost(col))
        .find(|cell| cell.terrain.is_habitable())
        .map(|cell| cell.location);
    let Some(start) = start else {
        return;
    };
    let rich = Inventory {
        settlers: 1000,
        ..Inventory::default()
    };

    c.bench_function("found_then_expand_every_terrain", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let mut player = Player::new(rich);
            let Ok(id) = found(&mut board, &mut player, start) else {
                return;
            };
            for terrain in [
                Terrain::Jungle,
                Terrain::Grassland,
                Terrain::Lake,
                Terrain::Rocky,
                Terrain::Paddy,
            ] {
                black_box(expand(&mut board, &mut player, &rules, id, terrain)).ok();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_can_place,
    bench_legal_placements,
    bench_resolve_orientation,
    bench_found_and_expand
);
criterion_main!(benches);
