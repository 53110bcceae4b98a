use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dpend::prelude::*;

/// Both rods horizontal, at rest.
fn horizontal() -> State {
    let half_pi = std::f64::consts::FRAC_PI_2 as Float;
    State::new(half_pi, half_pi, 0.0, 0.0)
}

fn bench_rk4_step(c: &mut Criterion) {
    let f = DoublePendulum::default();
    let y = horizontal().to_array();
    let mut yt = [0.0; 4];

    c.bench_function("rk4_step", |b| {
        b.iter(|| {
            rk4_step(&f, 0.0, black_box(&y), 0.01, &mut yt);
            yt
        })
    });
}

fn bench_rk5_step(c: &mut Criterion) {
    let f = DoublePendulum::default();
    let y = horizontal().to_array();
    let mut yt = [0.0; 4];

    c.bench_function("rk5_step", |b| {
        b.iter(|| {
            rk5_step(&f, 0.0, black_box(&y), 0.01, &mut yt);
            yt
        })
    });
}

fn bench_divergence_one_second(c: &mut Criterion) {
    let f = DoublePendulum::default();
    let s = horizontal();

    c.bench_function("divergence_one_second", |b| {
        b.iter(|| {
            let args = DivergenceArgs::builder().dt(0.01).horizon(1.0).build();
            run_divergence(&f, black_box(s), s, args).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_rk4_step,
    bench_rk5_step,
    bench_divergence_one_second
);
criterion_main!(benches);
