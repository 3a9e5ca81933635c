use bliffoscope::tools::samples;
use bliffoscope::utils::color::RandomColors;
use bliffoscope::{SearchConfig, SearchEngine, match_ratio};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_demo_sequential(c: &mut Criterion) {
    let scan = samples::scan();
    let catalog = samples::catalog().unwrap();
    let mut engine = SearchEngine::with_colors(SearchConfig::default(), RandomColors::seeded(1)).unwrap();
    c.bench_function("demo_100x100_sequential", |b| {
        b.iter(|| engine.find_targets(black_box(&scan), black_box(&catalog)).len())
    });
}

fn bench_demo_parallel(c: &mut Criterion) {
    let scan = samples::scan();
    let catalog = samples::catalog().unwrap();
    let config = SearchConfig::default().with_parallel(true);
    let mut engine = SearchEngine::with_colors(config, RandomColors::seeded(1)).unwrap();
    c.bench_function("demo_100x100_parallel", |b| {
        b.iter(|| engine.find_targets(black_box(&scan), black_box(&catalog)).len())
    });
}

fn bench_demo_in_place(c: &mut Criterion) {
    let scan = samples::scan();
    let mut catalog = samples::catalog().unwrap();
    let mut engine = SearchEngine::with_colors(SearchConfig::default(), RandomColors::seeded(1)).unwrap();
    c.bench_function("demo_100x100_in_place", |b| {
        b.iter(|| {
            engine
                .find_targets_in_place(black_box(&scan), black_box(&mut catalog))
                .map(|outcome| outcome.len())
                .unwrap_or(0)
        })
    });
}

fn bench_single_ratio(c: &mut Criterion) {
    let scan = samples::scan();
    let catalog = samples::catalog().unwrap();
    let pattern = catalog.all()[1].pattern();
    c.bench_function("match_ratio_star_ship", |b| {
        b.iter(|| match_ratio(black_box(&scan), &pattern.positioned(black_box(55), black_box(25))))
    });
}

criterion_group!(
    benches,
    bench_demo_sequential,
    bench_demo_parallel,
    bench_demo_in_place,
    bench_single_ratio
);
criterion_main!(benches);
