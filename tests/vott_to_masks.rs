use std::{fs, path::Path};

use tempfile::TempDir;
use vott2mask::{read_mask, vott_to_masks, ConvertOptions, MaskError, Naming, UnsupportedRegions};

const EXPORT: &str = r##"{
    "name": "test",
    "tags": [
        {"name": "mailbox", "color": "#ff0000"},
        {"name": "pencil", "color": "blue"}
    ],
    "assets": {
        "1b0a": {
            "asset": {"id": "1b0a", "name": "mailbox1.jpg", "format": "jpg",
                      "size": {"width": 10, "height": 10}},
            "regions": [{
                "id": "r1", "type": "POLYGON", "tags": ["mailbox"],
                "points": [{"x": 1, "y": 1}, {"x": 8, "y": 1}, {"x": 1, "y": 8}]
            }]
        },
        "2c1d": {
            "asset": {"id": "2c1d", "name": "pencil1.jpg", "format": "jpg",
                      "size": {"width": 12, "height": 8}},
            "regions": [
                {"id": "r2", "type": "POLYGON", "tags": ["pencil", "mailbox"],
                 "points": [{"x": 2.2, "y": 1.8}, {"x": 9.6, "y": 1.8},
                            {"x": 9.6, "y": 5.1}, {"x": 2.2, "y": 5.1}]},
                {"id": "r3", "type": "POLYGON", "tags": ["mailbox"],
                 "points": [{"x": 4, "y": 3}, {"x": 6, "y": 3}, {"x": 5, "y": 4}]}
            ]
        },
        "3e2f": {
            "asset": {"id": "3e2f", "name": "pencil2.jpg", "format": "jpg",
                      "size": {"width": 6, "height": 4}},
            "regions": []
        }
    }
}"##;

fn write_export(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("export.json");
    fs::write(&path, json).unwrap();
    path
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_one_mask_per_asset() {
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, EXPORT);
    let masks = dir.path().join("masks");

    let summary = vott_to_masks(&export, &masks, ConvertOptions::default()).unwrap();

    assert_eq!(summary.masks_written, 3);
    assert_eq!(summary.regions_skipped, 0);
    assert_eq!(
        file_names(&masks),
        ["mailbox1.png", "pencil1.png", "pencil2.png"]
    );
}

#[test]
fn test_triangle_mask() {
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, EXPORT);
    let masks = dir.path().join("masks");
    vott_to_masks(&export, &masks, ConvertOptions::default()).unwrap();

    let mask = read_mask(&masks.join("mailbox1.png")).unwrap();
    assert_eq!((mask.width(), mask.height()), (10, 10));
    assert_eq!(mask.palette()[0], [0, 0, 0]);
    assert_eq!(mask.palette()[1], [255, 0, 0]);
    assert_eq!(mask.palette()[2], [0, 0, 255]);

    for y in 0..10 {
        for x in 0..10 {
            let expected = if x >= 1 && y >= 1 && x + y <= 9 { 1 } else { 0 };
            assert_eq!(mask.get(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_declared_size_and_overlap() {
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, EXPORT);
    let masks = dir.path().join("masks");
    vott_to_masks(&export, &masks, ConvertOptions::default()).unwrap();

    let pencil = read_mask(&masks.join("pencil1.png")).unwrap();
    assert_eq!((pencil.width(), pencil.height()), (12, 8));
    // Only the first tag of a region counts.
    assert_eq!(pencil.get(2, 2), Some(2));
    assert_eq!(pencil.get(10, 5), Some(2));
    assert_eq!(pencil.get(5, 3), Some(1));
    assert_eq!(pencil.get(1, 1), Some(0));
    assert_eq!(pencil.get(11, 7), Some(0));

    let empty = read_mask(&masks.join("pencil2.png")).unwrap();
    assert_eq!((empty.width(), empty.height()), (6, 4));
    assert!(empty.pixels().iter().all(|&v| v == 0));
}

#[test]
fn test_existing_mask_dir_is_reused() {
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, EXPORT);
    let masks = dir.path().join("masks");
    fs::create_dir(&masks).unwrap();
    fs::write(masks.join("mailbox1.png"), b"stale").unwrap();

    vott_to_masks(&export, &masks, ConvertOptions::default()).unwrap();
    assert!(read_mask(&masks.join("mailbox1.png")).is_ok());
}

#[test]
fn test_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, EXPORT);
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    vott_to_masks(&export, &first, ConvertOptions::default()).unwrap();
    vott_to_masks(&export, &second, ConvertOptions::default()).unwrap();

    for name in file_names(&first) {
        assert_eq!(
            fs::read(first.join(&name)).unwrap(),
            fs::read(second.join(&name)).unwrap(),
            "{} differs between runs",
            name
        );
    }
}

#[test]
fn test_naming_modes() {
    let json = r##"{
        "tags": [{"name": "a", "color": "red"}],
        "assets": {"x": {"asset": {"name": "jpg_photo.jpg.jpg", "size": {"width": 2, "height": 2}},
                         "regions": []}}
    }"##;
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, json);

    let substring = dir.path().join("substring");
    vott_to_masks(&export, &substring, ConvertOptions::default()).unwrap();
    assert_eq!(file_names(&substring), ["png_photo.png.png"]);

    let extension = dir.path().join("extension");
    let options = ConvertOptions {
        naming: Naming::Extension,
        ..ConvertOptions::default()
    };
    vott_to_masks(&export, &extension, options).unwrap();
    assert_eq!(file_names(&extension), ["jpg_photo.jpg.png"]);
}

#[test]
fn test_unknown_label_aborts_run() {
    let json = r##"{
        "tags": [{"name": "mailbox", "color": "red"}],
        "assets": {
            "a": {"asset": {"name": "first.jpg", "size": {"width": 4, "height": 4}},
                  "regions": []},
            "b": {"asset": {"name": "second.jpg", "size": {"width": 4, "height": 4}},
                  "regions": [{"type": "POLYGON", "tags": ["cat"],
                               "points": [{"x": 0, "y": 0}, {"x": 3, "y": 0}, {"x": 0, "y": 3}]}]},
            "c": {"asset": {"name": "third.jpg", "size": {"width": 4, "height": 4}},
                  "regions": []}
        }
    }"##;
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, json);
    let masks = dir.path().join("masks");

    let err = vott_to_masks(&export, &masks, ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, MaskError::UnknownLabel { ref label, .. } if label == "cat"));
    assert_eq!(file_names(&masks), ["first.png"]);
}

#[test]
fn test_unsupported_region_policies() {
    let json = r##"{
        "tags": [{"name": "mailbox", "color": "red"}],
        "assets": {"a": {"asset": {"name": "a.jpg", "size": {"width": 5, "height": 5}},
                         "regions": [{"type": "RECTANGLE", "tags": ["mailbox"],
                                      "points": [{"x": 0, "y": 0}, {"x": 4, "y": 0},
                                                 {"x": 4, "y": 4}, {"x": 0, "y": 4}]}]}}
    }"##;
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, json);

    let failing = dir.path().join("fail");
    let err = vott_to_masks(&export, &failing, ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, MaskError::UnsupportedRegion { .. }));
    assert!(file_names(&failing).is_empty());

    let warning = dir.path().join("warn");
    let options = ConvertOptions {
        on_unsupported: UnsupportedRegions::Warn,
        ..ConvertOptions::default()
    };
    let summary = vott_to_masks(&export, &warning, options).unwrap();
    assert_eq!(summary.regions_skipped, 1);
    let mask = read_mask(&warning.join("a.png")).unwrap();
    assert!(mask.pixels().iter().all(|&v| v == 0));
}

#[test]
fn test_invalid_documents() {
    let dir = TempDir::new().unwrap();
    let masks = dir.path().join("masks");

    let export = write_export(&dir, "{\"tags\": [");
    assert!(matches!(
        vott_to_masks(&export, &masks, ConvertOptions::default()),
        Err(MaskError::Json { .. })
    ));

    let export = write_export(&dir, r#"{"tags": []}"#);
    assert!(matches!(
        vott_to_masks(&export, &masks, ConvertOptions::default()),
        Err(MaskError::Json { .. })
    ));

    let export = write_export(
        &dir,
        r#"{"tags": [{"name": "a", "color": "bluish"}], "assets": {}}"#,
    );
    assert!(matches!(
        vott_to_masks(&export, &masks, ConvertOptions::default()),
        Err(MaskError::InvalidColor { .. })
    ));

    assert!(matches!(
        vott_to_masks(&dir.path().join("missing.json"), &masks, ConvertOptions::default()),
        Err(MaskError::Io { .. })
    ));
}
