use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portdock::auth::{candidate_at, cardinality, guessing_ranges};

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("auth_enumerator");

    for length in [1usize, 2, 4, 6, 8] {
        group.bench_function(format!("candidate_at/len={length}"), |b| {
            let total = cardinality(length);
            b.iter(|| {
                for index in 0..total.min(2000) {
                    black_box(candidate_at(length, index));
                }
            });
        });
    }

    group.bench_function("guessing_ranges/len=6,solvers=8", |b| {
        b.iter(|| black_box(guessing_ranges(6, 8)));
    });

    group.finish();
}

criterion_group!(benches, bench_enumeration);
criterion_main!(benches);
