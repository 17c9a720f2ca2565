use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::equity::estimate_equity;
use holdem_engine::evaluator::{best_hand_value, evaluate_five};
use holdem_engine::hand::HoleCards;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn five(s: &str) -> [Card; 5] {
    parse_cards(s).unwrap().try_into().unwrap()
}

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = five("Ah Kd 7s 5c 2d");
    let sf = five("As Ks Qs Js 10s");

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_best_of_seven(c: &mut Criterion) {
    let hole: HoleCards = "As Ah".parse().unwrap();
    let board = parse_cards("Ks Qs Js 10s 9s").unwrap();
    c.bench_function("best_hand_value/seven", |b| {
        b.iter(|| best_hand_value(black_box(&hole), black_box(&board)))
    });
}

fn bench_equity(c: &mut Criterion) {
    let hole: HoleCards = "Ah Ad".parse().unwrap();
    let board = parse_cards("Kc 7d 2s").unwrap();
    c.bench_function("estimate_equity/3opp_500sims", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        b.iter(|| estimate_equity(black_box(&hole), black_box(&board), 3, 500, &mut rng))
    });
}

criterion_group!(benches, bench_evaluate_five, bench_best_of_seven, bench_equity);
criterion_main!(benches);
