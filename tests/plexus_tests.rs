//! Integration tests over the public API.
//!
//! These drive whole frames through [`Scene`] and the headless [`Canvas`],
//! and load configuration from disk, the way the binary does.

use std::time::{Duration, Instant};

use plexus::{
    render_snapshot, Canvas, DrawCommand, DrawSurface, PlexusConfig, Recorder, Scene, Vec2,
};

fn seeded(seed: u64) -> PlexusConfig {
    let mut config = PlexusConfig::default();
    config.particles.seed = Some(seed);
    config
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_particles_stay_inside_over_many_frames() {
    let start = Instant::now();
    let mut scene = Scene::new(640.0, 480.0, &seeded(1), start);
    let mut rec = Recorder::new();

    for frame in 0..600u64 {
        if frame % 50 == 0 {
            scene.set_pointer(Some(Vec2::new((frame % 640) as f32, 240.0)));
        }
        scene.animate(&mut rec, start + Duration::from_millis(frame * 16));
        rec.commands.clear();
    }

    for p in scene.field().particles() {
        assert!(p.position.x >= p.radius && p.position.x <= 640.0 - p.radius);
        assert!(p.position.y >= p.radius && p.position.y <= 480.0 - p.radius);
    }
}

#[test]
fn test_pointer_clears_a_hole() {
    let start = Instant::now();
    let mut config = seeded(2);
    config.particles.drift_speed = 0.0;
    let mut scene = Scene::new(800.0, 600.0, &config, start);
    let center = Vec2::new(400.0, 300.0);
    scene.set_pointer(Some(center));

    let radius = scene.field().context().pointer_radius;
    let inside = |scene: &Scene| {
        scene
            .field()
            .particles()
            .iter()
            .filter(|p| p.position.distance(center) < radius * 0.5)
            .count()
    };
    let before = inside(&scene);

    let mut rec = Recorder::new();
    for frame in 0..120u64 {
        scene.animate(&mut rec, start + Duration::from_millis(frame * 16));
        rec.commands.clear();
    }
    assert!(inside(&scene) <= before);
    assert_eq!(inside(&scene), 0);
}

#[test]
fn test_same_seed_same_frame() {
    let start = Instant::now();
    let config = seeded(99);
    let mut a = Scene::new(500.0, 400.0, &config, start);
    let mut b = Scene::new(500.0, 400.0, &config, start);
    let mut rec_a = Recorder::new();
    let mut rec_b = Recorder::new();

    for frame in 0..10u64 {
        let now = start + Duration::from_millis(frame * 16);
        a.animate(&mut rec_a, now);
        b.animate(&mut rec_b, now);
    }
    assert_eq!(rec_a.commands, rec_b.commands);
}

#[test]
fn test_every_line_respects_threshold() {
    let start = Instant::now();
    let mut scene = Scene::new(1024.0, 768.0, &seeded(5), start);
    let mut rec = Recorder::new();
    scene.animate(&mut rec, start);

    let threshold = scene.connections().threshold_sq();
    assert!(rec.lines().count() > 0);
    for cmd in rec.lines() {
        if let DrawCommand::Line { from, to, color, .. } = cmd {
            let d2 = from.distance_squared(*to);
            assert!(d2 < threshold);
            assert!(color.a >= 0.0 && color.a <= 1.0);
        }
    }
}

#[test]
fn test_settled_resize_reseeds_for_new_area() {
    let start = Instant::now();
    let mut scene = Scene::new(800.0, 600.0, &seeded(3), start);
    assert_eq!(scene.field().len(), 53);

    scene.request_resize(start, 1800.0, 1000.0);
    let mut rec = Recorder::new();
    scene.animate(&mut rec, start + Duration::from_millis(300));

    assert_eq!(scene.field().len(), 200);
    for p in scene.field().particles() {
        assert!(p.position.x <= 1800.0 && p.position.y <= 1000.0);
    }
}

// ============================================================================
// Canvas
// ============================================================================

#[test]
fn test_snapshot_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap.png");

    let canvas = render_snapshot(&seeded(4), 400, 300, 10, None);
    canvas.save_png(&path).unwrap();

    let loaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(loaded.dimensions(), (400, 300));
    assert_eq!(&loaded, canvas.image());
}

#[test]
fn test_canvas_is_a_draw_surface() {
    fn draw_one(surface: &mut dyn DrawSurface) {
        surface.clear();
        surface.fill_circle(
            Vec2::new(5.0, 5.0),
            2.0,
            plexus::Color::new(1.0, 1.0, 1.0, 1.0),
        );
    }

    let mut canvas = Canvas::new(10, 10, plexus::Color::from_rgb8([0, 0, 0]));
    draw_one(&mut canvas);
    assert_eq!(canvas.pixel(5, 5), [255, 255, 255, 255]);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_load_partial_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plexus.toml");
    std::fs::write(
        &path,
        "[particles]\nmin_count = 10\nseed = 7\n\n[pointer]\nfriction = 0.9\n",
    )
    .unwrap();

    let config = PlexusConfig::load(&path).unwrap();
    assert_eq!(config.particles.min_count, 10);
    assert_eq!(config.particles.seed, Some(7));
    assert_eq!(config.pointer.friction, 0.9);
    assert_eq!(config.connections.min_distance_sq, 10000.0);
}

#[test]
fn test_load_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[pointer]\nfriction = 1.5\n").unwrap();

    let err = PlexusConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("pointer.friction"));
}

#[test]
fn test_missing_config_file() {
    let err = PlexusConfig::load(std::path::Path::new("/nonexistent/plexus.toml")).unwrap_err();
    assert!(matches!(err, plexus::ConfigError::Io { .. }));
}
