//! Criterion view of the same validator cases
//! Cross-checks the built-in runner's ranking with criterion's estimates

use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use validator_bench::cases;

fn bench_validators(c: &mut Criterion) {
    let sample = Arc::new(cases::sample_user());
    let mut all = cases::registered_cases(sample).expect("cases build");

    let mut group = c.benchmark_group("validate_sample_user");
    for case in all.iter_mut() {
        let name = case.name().to_string();
        group.bench_function(name.as_str(), |b| {
            b.iter(|| case.call().expect("sample accepted"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validators);
criterion_main!(benches);
