//! Queue throughput: enqueue a batch of cards and drain it.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use runner_ccg::cards::{Card, CardId, CardRegistry, CardType, EnhancedCard};
use runner_ccg::components::{Component, DamageLabel, TargetPool};
use runner_ccg::core::{EngineConfig, GameLog, GameState, Location, Threat};
use runner_ccg::execution::ExecutionQueue;

fn income() -> EnhancedCard {
    EnhancedCard::new(
        Card::new(CardId::new(100), "Income", CardType::Event),
        [Component::credit_cost(1), Component::self_target(), Component::gain_credits(2)],
    )
}

fn volley() -> EnhancedCard {
    EnhancedCard::new(
        Card::new(CardId::new(101), "Volley", CardType::Event),
        [Component::auto_many(TargetPool::Threats, 3), Component::deal_damage(1, DamageLabel::Meat)],
    )
}

fn table() -> GameState {
    let mut game = GameState::new(&EngineConfig::default());
    let mut location = Location::new("Arena");
    for id in 0..4 {
        location = location.with_threat(Threat::new(id, "Drone", 1_000_000, 1));
    }
    game.location = Some(location);
    game
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    for (name, card) in [("income", income()), ("volley", volley())] {
        group.bench_function(format!("drain_64_{}", name), |b| {
            b.iter_batched(
                || {
                    let mut queue = ExecutionQueue::with_seed(7);
                    for _ in 0..64 {
                        queue.enqueue(&card);
                    }
                    (queue, table(), GameLog::new(16))
                },
                |(mut queue, mut game, mut log)| black_box(queue.execute_all(&mut game, &mut log)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_sample_cards(c: &mut Criterion) {
    let registry = CardRegistry::sample();
    let cards: Vec<EnhancedCard> = registry.iter().cloned().collect();

    c.bench_function("queue/sample_cards", |b| {
        b.iter_batched(
            || {
                let mut queue = ExecutionQueue::with_seed(7);
                for card in &cards {
                    queue.enqueue(card);
                }
                (queue, table(), GameLog::new(16))
            },
            |(mut queue, mut game, mut log)| {
                // Suspensions are answered with nothing so the batch always drains
                let mut step = queue.execute_all(&mut game, &mut log);
                while queue.is_awaiting_target_selection() {
                    step = queue.provide_targets(Vec::new(), &mut game, &mut log);
                }
                black_box(step)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_drain, bench_sample_cards);
criterion_main!(benches);
