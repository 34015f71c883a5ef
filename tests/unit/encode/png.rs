use std::io::Cursor;

use super::*;

#[test]
fn unpremultiply_restores_straight_alpha() {
    let premul = [
        0u8, 0, 0, 0, // transparent
        10, 20, 30, 255, // opaque
        64, 32, 0, 128, // half
    ];
    let straight = unpremultiply_rgba8(&premul);
    assert_eq!(&straight[0..4], &[0, 0, 0, 0]);
    assert_eq!(&straight[4..8], &[10, 20, 30, 255]);
    assert_eq!(straight[8], ((64u16 * 255 + 64) / 128) as u8);
    assert_eq!(straight[9], ((32u16 * 255 + 64) / 128) as u8);
    assert_eq!(straight[10], 0);
    assert_eq!(straight[11], 128);
}

#[test]
fn encode_png_decodes_back_to_same_pixels() {
    let rgba = vec![
        255u8, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 10, 20, 30, 40,
    ];
    let png = encode_png_rgba8(2, 2, &rgba).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load(Cursor::new(&png), image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.into_raw(), rgba);
}

#[test]
fn encode_png_rejects_mismatched_buffer() {
    let err = encode_png_rgba8(2, 2, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, SchotterError::ImageWrite(_)));
}

#[test]
fn write_atomic_leaves_no_temp_file() {
    let dir = PathBuf::from("target").join("unit_write_atomic");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("out.png");

    write_atomic(&path, b"hello").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    assert!(!temp_path_for(&path).exists());

    write_atomic(&path, b"again").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"again");
}

#[test]
fn temp_path_is_a_sibling() {
    let p = Path::new("img/mono_64x64_020.png");
    assert_eq!(temp_path_for(p), Path::new("img/mono_64x64_020.png.tmp"));
}

#[test]
fn uncreatable_output_directory_is_an_image_write_error() {
    let dir = PathBuf::from("target").join("unit_blocked_dir");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();

    let err = write_atomic(&blocker.join("out.png"), b"x").unwrap_err();
    assert!(matches!(err, SchotterError::ImageWrite(_)), "{err}");
    assert!(err.to_string().contains("not_a_dir"));
}
