use linecanvas::export::{save_json, save_png};
use linecanvas::{Canvas, CanvasConfig, CanvasError, CanvasSnapshot, StrokeStyle};

#[test]
fn png_export_matches_canvas_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.png");

    let mut canvas = Canvas::default();
    canvas.on_canvas_click(10.0, 10.0);
    canvas.on_resize_request(300.0, 200.0).unwrap();
    save_png(&path, &canvas.snapshot(), &StrokeStyle::default()).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (300, 200));
    // (10,10)-(110,10) at 1200x800 becomes (2.5,2.5)-(27.5,2.5); rounds to row 3.
    assert_eq!(img.get_pixel(10, 3).0, [0, 0, 0, 255]);
}

#[test]
fn json_export_is_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.json");

    let mut canvas = Canvas::default();
    canvas.on_canvas_click(50.0, 75.0);
    save_json(&path, &canvas.snapshot()).unwrap();

    let txt = std::fs::read_to_string(&path).unwrap();
    let back: CanvasSnapshot = serde_json::from_str(&txt).unwrap();
    assert_eq!(back, canvas.snapshot());
}

#[test]
fn export_to_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("drawing.json");
    let err = save_json(&path, &Canvas::default().snapshot()).unwrap_err();
    assert!(matches!(err, CanvasError::Io(_)));
}

#[test]
fn config_loads_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.yaml");
    std::fs::write(
        &path,
        "title: Sketch\ninitial_size: { width: 600, height: 400 }\nfeatures: { listing: false }\n",
    )
    .unwrap();

    let cfg = CanvasConfig::load_from_path(&path).unwrap();
    assert_eq!(cfg.title, "Sketch");
    assert_eq!(cfg.initial_size.width, 600.0);
    assert!(!cfg.features.listing);
    assert!(cfg.features.export);
    assert_eq!(cfg.presets.len(), 3);
}
