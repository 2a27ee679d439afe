use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use poker_equity::cards::{parse_cards, Card};
use poker_equity::evaluator::{self, evaluate_cards, Hand};
use poker_equity::{compute_equity, EquityConfig, EquityRequest};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn bench_evaluate_five(c: &mut Criterion) {
    evaluator::init();
    let hi = cards("Ah Kd 7s 5c 2d");
    let sf = cards("As Ks Qs Js Ts");

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_cards(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_cards(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    evaluator::init();
    let seven = cards("As Ah Ks Qs Js Ts 9s");
    c.bench_function("evaluate_seven", |b| b.iter(|| evaluate_cards(black_box(&seven))));

    // Hole cards added to a prebuilt board, the way the equity loop does it.
    let board = Hand::from_cards(&seven[2..]).unwrap();
    let (a, b2) = (seven[0], seven[1]);
    c.bench_function("evaluate_seven_incremental", |b| {
        b.iter(|| black_box(board).add(a).add(b2).evaluate())
    });
}

fn bench_equity(c: &mut Criterion) {
    let request = EquityRequest::new(["AA", "KK", "QQ"])
        .with_board("2c3c4c")
        .with_enumerate_all(true)
        .with_config(EquityConfig::default().with_threads(1));
    let mut g = c.benchmark_group("equity");
    g.sample_size(10);
    g.bench_function("three_way_flop_exact", |b| b.iter(|| compute_equity(black_box(&request))));
    g.finish();
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_equity);
criterion_main!(benches);
