use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use clickmeter::analytics::ClickCounter;
use clickmeter::events::{Event, EventBus, EventSource, Listener};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_THREADS: usize = 8;
const CLICKS_PER_THREAD: usize = 100_000;

fn run_clicks(bus: &Arc<EventBus>) {
    let mut handles = vec![];
    for _ in 0..NUM_THREADS {
        let bus = Arc::clone(bus);
        handles.push(thread::spawn(move || {
            let event = Event::click();
            for _ in 0..CLICKS_PER_THREAD {
                bus.dispatch(&event);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn bench_click_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("click_dispatch");
    let label = format!("{}threads x {}clicks", NUM_THREADS, CLICKS_PER_THREAD);

    group.bench_function(BenchmarkId::new("ClickCounter (sharded)", &label), |b| {
        b.iter(|| {
            let bus = Arc::new(EventBus::new());
            let counter = ClickCounter::new(bus.clone()).unwrap();
            run_clicks(&bus);
            black_box(counter.count())
        })
    });

    group.bench_function(BenchmarkId::new("AtomicUsize listener", &label), |b| {
        b.iter(|| {
            let bus = Arc::new(EventBus::new());
            let hits = Arc::new(AtomicUsize::new(0));
            let hits_clone = Arc::clone(&hits);
            bus.subscribe(
                "click",
                Listener::new(move |_| {
                    hits_clone.fetch_add(1, Ordering::Relaxed);
                }),
            )
            .unwrap();
            run_clicks(&bus);
            black_box(hits.load(Ordering::Relaxed))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_click_dispatch);
criterion_main!(benches);
