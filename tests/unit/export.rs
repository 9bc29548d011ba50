use super::*;
use crate::{
    assets::decode::PreparedImage,
    decoration::update::Update,
    foundation::core::CanvasSize,
};

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("shotframe-export-{tag}-{}", std::process::id()))
}

fn loaded_state() -> DecorationState {
    DecorationState {
        canvas: CanvasSize::new(40, 30),
        auto_canvas: false,
        ..DecorationState::default()
    }
    .apply(Update::LoadForeground(PreparedImage::solid(10, 10, [255, 0, 0, 255])))
}

#[test]
fn export_without_foreground_writes_nothing() {
    let dir = temp_dir("none");
    let out = export_png(&DecorationState::default(), &dir, &ExportOptions::default()).unwrap();
    assert_eq!(out, None);
    assert!(!dir.join(DEFAULT_FILE_NAME).exists());
}

#[test]
fn export_writes_image_png_at_scaled_size() {
    let dir = temp_dir("scaled");
    let state = loaded_state().apply(Update::SetExportScale(2.0));
    let opts = ExportOptions {
        pixel_ratio: 1.5,
        ..ExportOptions::default()
    };
    let path = export_png(&state, &dir, &opts).unwrap().unwrap();
    assert_eq!(path, dir.join("image.png"));

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (120, 90));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tiny_export_scale_still_writes_a_png() {
    let dir = temp_dir("tiny");
    let state = loaded_state().apply(Update::SetExportScale(0.001));
    let path = export_png(&state, &dir, &ExportOptions::default())
        .unwrap()
        .unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1, 1));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn scale_combines_export_scale_and_pixel_ratio() {
    let state = loaded_state().apply(Update::SetExportScale(3.0));
    let opts = ExportOptions {
        pixel_ratio: 0.5,
        ..ExportOptions::default()
    };
    assert_eq!(opts.scale_for(&state), 1.5);
    let raster = export_raster(&state, &opts).unwrap().unwrap();
    assert_eq!((raster.width, raster.height), (60, 45));
}

#[test]
fn default_options_name_the_file_image_png() {
    let opts = ExportOptions::default();
    assert_eq!(opts.file_name, "image.png");
    assert_eq!(opts.pixel_ratio, 1.0);
}
