use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use harmonicviz_core::{HarmonicState, StopInput, artificial_harmonics, position_to_fret};
use harmonicviz_core::session::Action;

fn bench_artificial_harmonics(c: &mut Criterion) {
    c.bench_function("artificial_harmonics_cents_stop", |b| {
        b.iter(|| artificial_harmonics(black_box(196.0), black_box(StopInput::Cents(437))))
    });
}

fn bench_position_to_fret(c: &mut Criterion) {
    c.bench_function("position_to_fret_near_bridge", |b| {
        b.iter(|| position_to_fret(black_box(0.93)))
    });
}

fn bench_ui_tick(c: &mut Criterion) {
    let state = HarmonicState::default()
        .apply(Action::SetStopFret(7))
        .apply(Action::TogglePlay);
    c.bench_function("ui_tick_recompute", |b| {
        b.iter(|| {
            let state = black_box(&state);
            (state.artificial(), state.natural(), state.sounding_frequency())
        })
    });
}

criterion_group!(
    benches,
    bench_artificial_harmonics,
    bench_position_to_fret,
    bench_ui_tick
);
criterion_main!(benches);
