use chained_containers::LinkedList;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn bench_push_pop_ends(c: &mut Criterion) {
    c.bench_function("list::push_back_pop_front_10k", |b| {
        b.iter_batched(
            LinkedList::<u64>::new,
            |mut l| {
                for i in 0..10_000u64 {
                    l.push_back(i);
                }
                while let Some(v) = l.pop_front() {
                    black_box(v);
                }
                l
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_positional_access(c: &mut Criterion) {
    let l: LinkedList<u64> = (0..1_000).collect();
    c.bench_function("list::get_every_index_1k", |b| {
        b.iter(|| {
            for i in 0..l.len() {
                black_box(l.get(i).ok());
            }
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_millis(500))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_push_pop_ends, bench_positional_access
}
criterion_main!(benches);
