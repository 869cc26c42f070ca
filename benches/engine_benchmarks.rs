//! Benchmarks for move generation, search and evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_core::{
    AttackTables, Evaluator, MaterialEvaluator, Position, SearchEngine, SearchLimits,
    SearchParams, Square,
};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Position::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let mut kiwipete = Position::from_fen(KIWIPETE).expect("valid fen");
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let mut startpos = Position::new();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.generate_legal()))
    });

    let mut kiwipete = Position::from_fen(KIWIPETE).expect("valid fen");
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(kiwipete.generate_legal()))
    });
    group.bench_function("kiwipete_captures", |b| {
        b.iter(|| black_box(kiwipete.generate_captures()))
    });

    group.finish();
}

fn bench_attacks(c: &mut Criterion) {
    let tables = AttackTables::global();
    let occupied = Position::from_fen(KIWIPETE).expect("valid fen").occupied();
    c.bench_function("attacks/queen_all_squares", |b| {
        b.iter(|| {
            Square::all()
                .map(|sq| tables.queen_attacks(sq, black_box(occupied)).popcount())
                .sum::<u32>()
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let engine = SearchEngine::new(MaterialEvaluator, SearchParams::default());
                let mut pos = Position::new();
                engine.find_best_move(&mut pos, SearchLimits::depth(depth))
            })
        });
    }

    for threads in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::new("kiwipete_threads", threads), &threads, |b, &threads| {
            b.iter(|| {
                let params = SearchParams {
                    threads,
                    ..SearchParams::default()
                };
                let engine = SearchEngine::new(MaterialEvaluator, params);
                let mut pos = Position::from_fen(KIWIPETE).expect("valid fen");
                engine.find_best_move(&mut pos, SearchLimits::depth(3))
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        ("middlegame", "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4"),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let pos = Position::from_fen(fen).expect("valid fen");
        group.bench_with_input(BenchmarkId::new("position", name), &pos, |b, pos| {
            b.iter(|| black_box(MaterialEvaluator.evaluate(pos)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_attacks,
    bench_search,
    bench_eval
);
criterion_main!(benches);
