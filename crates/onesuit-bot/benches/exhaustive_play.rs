use criterion::{Criterion, black_box, criterion_group, criterion_main};
use onesuit_bot::{Game, StrategyKind};
use onesuit_core::enumerate::DealEnumerator;

fn play_all(hand_size: usize, players: usize) -> usize {
    let kinds = vec![StrategyKind::Default; players];
    let mut game = Game::with_strategies(&kinds, hand_size, 0).unwrap();
    let mut lost_by_first = 0;
    for deal in DealEnumerator::new(hand_size, players).iter() {
        let result = game.play_deal(&deal).unwrap();
        lost_by_first += result.tricks_lost()[0];
    }
    lost_by_first
}

fn exhaustive_play_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_play");
    for (hand_size, players) in [(5, 2), (7, 2), (2, 4)] {
        group.bench_function(format!("h{hand_size}_p{players}"), |b| {
            b.iter(|| black_box(play_all(hand_size, players)))
        });
    }
    group.bench_function("enumerate_only_h3_p3", |b| {
        b.iter(|| black_box(DealEnumerator::new(3, 3).iter().count()))
    });
    group.finish();
}

criterion_group!(benches, exhaustive_play_bench);
criterion_main!(benches);
