use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pairs_core::*;
use std::hint::black_box;

fn deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for side in [2, 4, 7, 10] {
        let config = GameConfig::new(side, 0);
        group.bench_with_input(BenchmarkId::from_parameter(side), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(ShuffledDeckGenerator::new(seed).generate(config))
            })
        });
    }
    group.finish();
}

/// Plays a full board, matching every pair on the first try.
fn play_through(c: &mut Criterion) {
    let config = GameConfig::new(GameConfig::MAX_SIDE, 0);
    let deck = ShuffledDeckGenerator::new(42).generate(config);
    let mut order: Vec<CardId> = Vec::with_capacity(deck.len());
    let mut cards = deck.cards().to_vec();
    cards.sort_by_key(|card| card.value);
    order.extend(cards.iter().map(|card| card.id));

    c.bench_function("play_through", |b| {
        b.iter(|| {
            let mut engine = PlayEngine::new(deck.clone(), 0);
            for &id in &order {
                let _ = engine.flip(id);
            }
            black_box(engine.is_won())
        })
    });
}

criterion_group!(benches, deal, play_through);
criterion_main!(benches);
