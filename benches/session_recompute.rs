use criterion::{black_box, criterion_group, criterion_main, Criterion};
use labverse_engine::{SimulatorKind, SimulatorSession};

fn bench_set(c: &mut Criterion) {
    let mut session = SimulatorSession::new(SimulatorKind::ElectrolyteDynamics);
    let mut sodium = 110.0;
    c.bench_function("electrolyte_set_sodium", |b| {
        b.iter(|| {
            sodium = if sodium >= 170.0 { 110.0 } else { sodium + 1.0 };
            black_box(session.set("sodium", black_box(sodium)))
        })
    });
}

fn bench_presets(c: &mut Criterion) {
    c.bench_function("apply_every_preset", |b| {
        b.iter(|| {
            for kind in SimulatorKind::all() {
                let mut session = SimulatorSession::new(*kind);
                for preset in kind.presets() {
                    let _ = black_box(session.apply_preset(preset.id));
                }
            }
        })
    });
}

criterion_group!(benches, bench_set, bench_presets);
criterion_main!(benches);
