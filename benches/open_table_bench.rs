use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_table::OpenAddressingTable;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("table::insert_fresh_100k", |b| {
        b.iter_batched(
            OpenAddressingTable::<String, u64>::with_std,
            |mut t| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    t.add(key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("table::get_hit", |b| {
        let mut t = OpenAddressingTable::<String, u64>::with_std();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            t.add(k, i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.try_get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("table::get_miss", |b| {
        let mut t = OpenAddressingTable::<String, u64>::with_std();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.add(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(t.try_get(&k));
        })
    });
}

// Remove-then-insert keeps the live count flat, so the table lives off
// tombstone reuse and periodic compaction rather than growth.
fn bench_churn_10k(c: &mut Criterion) {
    c.bench_function("table::churn_10k", |b| {
        b.iter_batched(
            || {
                let mut t = OpenAddressingTable::<u64, u64>::with_std();
                for x in lcg(5).take(10_000) {
                    t.set(x, x);
                }
                t
            },
            |mut t| {
                let old: Vec<u64> = lcg(5).take(10_000).collect();
                for (o, n) in old.into_iter().zip(lcg(9).take(10_000)) {
                    t.remove(&o);
                    t.set(n, n);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_get_hit, bench_get_miss, bench_churn_10k
}
criterion_main!(benches);
