use common::AggregateId;
use criterion::{Criterion, criterion_group, criterion_main};
use event_store::{EventEnvelope, EventStore, EventStoreExt, InMemoryEventStore, Version};

fn make_event(aggregate_id: &AggregateId, version: i64) -> EventEnvelope {
    EventEnvelope::builder()
        .aggregate_id(aggregate_id.clone())
        .aggregate_type("Order")
        .event_type("OrderPlaced")
        .version(Version::new(version))
        .payload_raw(serde_json::json!({
            "type": "Placed",
            "data": {
                "order_id": aggregate_id.as_str(),
                "lines": [{"product_id": "SKU-001", "quantity": 1}]
            }
        }))
        .build()
        .unwrap()
}

fn bench_append_single_event(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_single_event", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let agg_id = AggregateId::new("BENCH-1");
                let event = make_event(&agg_id, 1);
                store.append(&agg_id, vec![event]).await.unwrap();
            });
        });
    });
}

fn bench_append_batch_10(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_batch_10", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let agg_id = AggregateId::new("BENCH-10");
                let events: Vec<EventEnvelope> =
                    (1..=10).map(|v| make_event(&agg_id, v)).collect();
                store.append(&agg_id, events).await.unwrap();
            });
        });
    });
}

fn bench_load_100_among_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryEventStore::new();

    // 1000 events across 10 aggregates
    rt.block_on(async {
        for n in 0..10 {
            let agg_id = AggregateId::new(format!("BENCH-{n}"));
            let events: Vec<EventEnvelope> = (1..=100).map(|v| make_event(&agg_id, v)).collect();
            store.append(&agg_id, events).await.unwrap();
        }
    });

    let target = AggregateId::new("BENCH-5");
    c.bench_function("event_store/load_100_of_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                let events = store.load(&target).await.unwrap();
                assert_eq!(events.len(), 100);
            });
        });
    });
}

fn bench_append_event_ext(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_single_via_ext", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let event = make_event(&AggregateId::new("BENCH-EXT"), 1);
                store.append_event(event).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_append_single_event,
    bench_append_batch_10,
    bench_load_100_among_1000,
    bench_append_event_ext,
);
criterion_main!(benches);
