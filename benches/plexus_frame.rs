use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use plexus::{ConnectionRenderer, ParticleField, PlexusConfig, Recorder, Vec2};
use std::hint::black_box;

const SIZES: [(f32, f32); 3] = [(800.0, 600.0), (1920.0, 1080.0), (3840.0, 2160.0)];

fn seeded_config() -> PlexusConfig {
    let mut config = PlexusConfig::default();
    config.particles.seed = Some(42);
    config
}

fn advance_benchmark(c: &mut Criterion) {
    let config = seeded_config();
    let mut group = c.benchmark_group("field_advance");

    for (w, h) in SIZES {
        let mut field = ParticleField::new(w, h, &config);
        field.set_pointer(Some(Vec2::new(w / 2.0, h / 2.0)));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{w}x{h}/{}", field.len())),
            &(),
            |b, _| b.iter(|| black_box(&mut field).advance()),
        );
    }
    group.finish();
}

fn connections_benchmark(c: &mut Criterion) {
    let config = seeded_config();
    let mut group = c.benchmark_group("connections_render");

    for (w, h) in SIZES {
        let field = ParticleField::new(w, h, &config);
        let renderer = ConnectionRenderer::new(w, h, &config.connections);
        let mut recorder = Recorder::new();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{w}x{h}/{}", field.len())),
            &(),
            |b, _| {
                b.iter(|| {
                    recorder.commands.clear();
                    renderer.render(black_box(field.particles()), &mut recorder);
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, advance_benchmark, connections_benchmark);
criterion_main!(benches);
