use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use texkit::prelude::*;
use texkit::texture::rgba_to_dds_bytes;

/// Write a small solid-color DDS texture to disk
fn write_dds(path: &Path, color: [u8; 4]) {
    let pixels: Vec<u8> = color.iter().copied().cycle().take(8 * 8 * 4).collect();
    let data = rgba_to_dds_bytes(&pixels, 8, 8, DdsFormat::Rgba).unwrap();
    fs::write(path, data).unwrap();
}

/// Write a small solid-color PNG image to disk
fn write_png(path: &Path, color: [u8; 4]) {
    image::RgbaImage::from_pixel(8, 8, image::Rgba(color))
        .save(path)
        .unwrap();
}

// ==================== Texture Locator ====================

#[test]
fn locate_by_name_ignores_extension_and_case() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("armor")).unwrap();
    fs::create_dir_all(root.path().join("armor/lod")).unwrap();
    fs::create_dir_all(root.path().join("weapons")).unwrap();
    fs::write(root.path().join("armor/Rock_Diffuse.DDS"), b"x").unwrap();
    fs::write(root.path().join("armor/lod/rock_diffuse.png"), b"x").unwrap();
    fs::write(root.path().join("weapons/sword.dds"), b"x").unwrap();

    let matches = locate_by_name(root.path(), "ROCK_DIFFUSE.tga", |_| {}).unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].display, "Rock_Diffuse.DDS");
    assert_eq!(matches[0].directory, root.path().join("armor"));
    assert_eq!(matches[1].display, "rock_diffuse.png");
    assert_eq!(matches[1].directory, root.path().join("armor/lod"));
}

#[test]
fn locate_by_name_rejects_missing_root() {
    let err = locate_by_name("/no/such/dir", "tex.dds", |_| {}).unwrap_err();
    assert!(matches!(err, Error::RootNotFound { .. }));
}

#[test]
fn locate_by_folder_match_pairs_reference_and_original() {
    // /A/tex1.dds with reference /B/tex1.png yields one match in /A
    let tree = tempdir().unwrap();
    let a = tree.path().join("A");
    let b = tree.path().join("B");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("tex1.dds"), b"x").unwrap();
    fs::write(b.join("tex1.png"), b"x").unwrap();

    let matches = locate_by_folder_match(&a, &b, |_| {}).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].display, "tex1.png -> tex1.dds");
    assert_eq!(matches[0].directory, a);
}

#[test]
fn locate_by_folder_match_is_case_insensitive() {
    let tree = tempdir().unwrap();
    let a = tree.path().join("orig");
    let b = tree.path().join("proc");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("TEX2.DDS"), b"x").unwrap();
    fs::write(b.join("tex2.PNG"), b"x").unwrap();
    // Wrong extensions never match
    fs::write(a.join("tex3.tga"), b"x").unwrap();
    fs::write(b.join("tex3.jpg"), b"x").unwrap();

    let matches = locate_by_folder_match(&a, &b, |_| {}).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].display, "tex2.PNG -> TEX2.DDS");
}

#[test]
fn locate_progress_covers_every_file() {
    let root = tempdir().unwrap();
    for i in 0..5 {
        fs::write(root.path().join(format!("f{i}.dds")), b"x").unwrap();
    }

    let mut updates = Vec::new();
    locate_by_name(root.path(), "f0.dds", |p| updates.push((p.current, p.total))).unwrap();

    assert_eq!(updates.len(), 5);
    assert_eq!(updates.last(), Some(&(5, 5)));
}

// ==================== Format Converter ====================

#[test]
fn convert_tree_writes_png_next_to_every_dds() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("sub")).unwrap();
    write_dds(&root.path().join("a.dds"), [255, 0, 0, 255]);
    write_dds(&root.path().join("sub/b.dds"), [0, 255, 0, 255]);

    let result = convert_tree(root.path(), Direction::DdsToPng, |_| {}).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.fail_count, 0);
    // Originals untouched, new files readable
    assert!(root.path().join("a.dds").exists());
    assert!(root.path().join("sub/b.dds").exists());
    let img = image::open(root.path().join("a.png")).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert!(root.path().join("sub/b.png").exists());
}

#[test]
fn convert_tree_round_trips_png_to_dds() {
    let root = tempdir().unwrap();
    write_png(&root.path().join("tile.png"), [0, 0, 255, 255]);

    let result = convert_tree(root.path(), Direction::PngToDds, |_| {}).unwrap();

    assert_eq!(result.success_count, 1);
    let dds = fs::read(root.path().join("tile.dds")).unwrap();
    // The produced DDS must itself be decodable
    let png = texkit::texture::dds_bytes_to_png_bytes(&dds).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 8));
}

#[test]
fn convert_tree_skips_corrupt_files_and_continues() {
    let root = tempdir().unwrap();
    write_dds(&root.path().join("good.dds"), [1, 2, 3, 255]);
    fs::write(root.path().join("bad.dds"), b"definitely not a texture").unwrap();

    let result = convert_tree(root.path(), Direction::DdsToPng, |_| {}).unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.fail_count, 1);
    assert!(root.path().join("good.png").exists());
    assert!(!root.path().join("bad.png").exists());
    assert!(result.results.iter().any(|m| m.starts_with("Failed")));
}

#[test]
fn convert_tree_with_no_matching_files_writes_nothing() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("readme.txt"), b"hi").unwrap();

    let result = convert_tree(root.path(), Direction::DdsToPng, |_| {}).unwrap();

    assert_eq!(result.success_count, 0);
    let files: Vec<_> = fs::read_dir(root.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

// ==================== Descriptor Matcher ====================

#[test]
fn relocate_moves_assets_to_descriptor_directory() {
    let root = tempdir().unwrap();
    let d1 = root.path().join("d1");
    let d2 = root.path().join("d2");
    fs::create_dir_all(&d1).unwrap();
    fs::create_dir_all(&d2).unwrap();
    fs::write(d1.join("foo.xml"), b"<asset/>").unwrap();
    fs::write(d2.join("foo.fbx"), b"mesh").unwrap();

    let result = relocate_assets(root.path(), |_| {}).unwrap();

    assert_eq!(result.moved_count, 1);
    assert!(d1.join("foo.fbx").exists());
    assert!(!d2.join("foo.fbx").exists());
}

#[test]
fn relocate_is_idempotent() {
    let root = tempdir().unwrap();
    let d1 = root.path().join("d1");
    let d2 = root.path().join("d2");
    fs::create_dir_all(&d1).unwrap();
    fs::create_dir_all(&d2).unwrap();
    fs::write(d1.join("foo.xml"), b"<asset/>").unwrap();
    fs::write(d2.join("foo.fbx"), b"mesh").unwrap();

    let first = relocate_assets(root.path(), |_| {}).unwrap();
    let second = relocate_assets(root.path(), |_| {}).unwrap();

    assert_eq!(first.moved_count, 1);
    assert_eq!(second.moved_count, 0);
    assert_eq!(second.skipped_conflicts, 0);
}

#[test]
fn relocate_never_overwrites_an_occupied_destination() {
    let root = tempdir().unwrap();
    let d1 = root.path().join("d1");
    let d2 = root.path().join("d2");
    fs::create_dir_all(&d1).unwrap();
    fs::create_dir_all(&d2).unwrap();
    fs::write(d1.join("foo.xml"), b"<asset/>").unwrap();
    fs::write(d1.join("foo.fbx"), b"original mesh").unwrap();
    fs::write(d2.join("foo.fbx"), b"other mesh").unwrap();

    let result = relocate_assets(root.path(), |_| {}).unwrap();

    assert_eq!(result.moved_count, 0);
    assert_eq!(result.skipped_conflicts, 1);
    // Both files still exist, nothing clobbered
    assert_eq!(fs::read(d1.join("foo.fbx")).unwrap(), b"original mesh");
    assert_eq!(fs::read(d2.join("foo.fbx")).unwrap(), b"other mesh");
}

#[test]
fn relocate_rejects_missing_root() {
    let err = relocate_assets("/no/such/dir", |_| {}).unwrap_err();
    assert!(matches!(err, Error::RootNotFound { .. }));
}
