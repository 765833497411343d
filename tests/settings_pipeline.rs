use tilenoise_core::settings_from_str;
use tilenoise_field::{edge_mismatch, generate, generate_tile, Adjacency, NormalizeMode, TileCoord};

const SETTINGS: &str = r#"
scale = 0.0
octaves = 0
persistence = -1.0
lacunarity = 0.0
seed = 17
offset = [3.0, 4.0]
normalize_mode = "global"
"#;

#[test]
fn settings_file_to_field_pipeline() {
    let raw = settings_from_str(SETTINGS).expect("valid settings");
    assert!(!raw.is_valid());

    let settings = raw.validated();
    assert!(settings.scale() >= 0.01);
    assert_eq!(settings.octaves(), 1);
    assert_eq!(settings.lacunarity(), 1.0);
    assert_eq!(settings.persistence(), 0.0);
    assert_eq!(settings.normalize_mode(), NormalizeMode::Global);

    let field = generate(5, 3, &settings, [0.0, 0.0]);
    assert_eq!((field.width(), field.height()), (5, 3));
    assert!(field.as_slice().iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
fn loaded_global_settings_tile_seamlessly() {
    let mut raw = settings_from_str(SETTINGS).expect("valid settings");
    raw.scale = 40.0;
    raw.octaves = 5;
    raw.persistence = 0.55;
    raw.lacunarity = 2.1;
    let settings = raw.validated();

    let origin = TileCoord::new(0, 0);
    let a = generate_tile(origin, 24.0, 25, 25, &settings);
    for adjacency in [Adjacency::PositiveX, Adjacency::PositiveY] {
        let b = generate_tile(origin.neighbour(adjacency), 24.0, 25, 25, &settings);
        let diff = edge_mismatch(&a, &b, adjacency).expect("same size");
        assert!(diff < 1e-4, "seam {diff} along {adjacency:?}");
    }
}

#[test]
fn non_finite_values_in_files_are_clamped_before_generation() {
    let raw = settings_from_str("lacunarity = inf\noctaves = 3\nscale = 10.0").expect("toml inf");
    assert!(!raw.is_valid());
    let settings = raw.validated();
    assert!(settings.lacunarity().is_finite());
    let field = generate(8, 8, &settings, [0.0, 0.0]);
    assert!(field.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));

    let raw = settings_from_str("offset = [nan, 0.0]\nscale = inf").expect("toml nan");
    let settings = raw.validated();
    assert_eq!(settings.offset(), [0.0, 0.0]);
    assert!(settings.scale().is_finite());
    let field = generate(8, 8, &settings, [0.0, 0.0]);
    assert!(field.as_slice().iter().all(|v| v.is_finite()));
}
