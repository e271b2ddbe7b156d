//! End-to-end comparisons of files written to a temporary directory.

use image::{GrayImage, Luma, Rgb, RgbImage};
use image_mse::{compare_files, ChannelLayout, LoadErrorKind, MseError, Shape};

#[test]
fn test_identical_gray_files() {
    let dir = tempfile::tempdir().unwrap();
    let img = GrayImage::from_raw(2, 2, vec![10, 20, 30, 40]).unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    img.save(&a).unwrap();
    img.save(&b).unwrap();

    let cmp = compare_files(&a, &b, ChannelLayout::Rgb).unwrap();
    assert_eq!(cmp.error, 0.0);
    assert_eq!(cmp.shape, Shape::new(2, 2, 3));
}

#[test]
fn test_offset_gray_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("zeros.png");
    let b = dir.path().join("twos.png");
    GrayImage::from_pixel(2, 2, Luma([0])).save(&a).unwrap();
    GrayImage::from_pixel(2, 2, Luma([2])).save(&b).unwrap();

    for layout in ChannelLayout::ALL {
        let cmp = compare_files(&a, &b, layout).unwrap();
        // Replicated or alpha-padded channels all differ by 2 or 0
        let expected = match layout {
            ChannelLayout::Rgba => 3.0,
            _ => 4.0,
        };
        assert_eq!(cmp.error, expected, "layout {layout}");
    }
}

#[test]
fn test_gray_and_rgb_twin_are_equal_under_rgb() {
    let dir = tempfile::tempdir().unwrap();
    let gray = dir.path().join("gray.png");
    let rgb = dir.path().join("rgb.bmp");
    GrayImage::from_fn(5, 4, |x, y| Luma([(x * 50 + y) as u8])).save(&gray).unwrap();
    RgbImage::from_fn(5, 4, |x, y| {
        let v = (x * 50 + y) as u8;
        Rgb([v, v, v])
    })
    .save(&rgb)
    .unwrap();

    assert_eq!(compare_files(&gray, &rgb, ChannelLayout::Rgb).unwrap().error, 0.0);

    // Native keeps 1 vs 3 channels apart
    let err = compare_files(&gray, &rgb, ChannelLayout::Native).unwrap_err();
    assert!(matches!(err, MseError::DimensionMismatch { .. }));
}

#[test]
fn test_jpeg_decodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 128]))
        .save(&path)
        .unwrap();

    let cmp = compare_files(&path, &path, ChannelLayout::Rgb).unwrap();
    assert_eq!(cmp.error, 0.0);
    assert_eq!(cmp.shape, Shape::new(16, 16, 3));
}

#[test]
fn test_size_mismatch_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("small.png");
    let b = dir.path().join("large.png");
    GrayImage::new(2, 2).save(&a).unwrap();
    GrayImage::new(3, 2).save(&b).unwrap();

    let err = compare_files(&a, &b, ChannelLayout::Rgb).unwrap_err();
    assert_eq!(err.to_string(), "dimension mismatch: 2x2x3 vs 3x2x3");
}

#[test]
fn test_second_path_missing_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("missing.png");
    GrayImage::new(2, 2).save(&a).unwrap();

    match compare_files(&a, &b, ChannelLayout::Rgb).unwrap_err() {
        MseError::Load { path, source } => {
            assert_eq!(path, b);
            assert!(matches!(source, LoadErrorKind::Io(_)));
        }
        other => panic!("expected load error, got {other:?}"),
    }
}
