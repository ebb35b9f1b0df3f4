use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use image_palette_wasm::{
    ColorQuantizer, MAX_CLUSTERS, PaletteError, extract_palette_bytes, extract_palette_rgba_bytes,
    quantize_bytes,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 8x4 PNG: left half red, right half blue, with one transparent pixel.
fn two_tone_png() -> Vec<u8> {
    let mut img = RgbaImage::new(8, 4);
    for (x, _y, px) in img.enumerate_pixels_mut() {
        *px = if x < 4 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        };
    }
    img.put_pixel(0, 0, Rgba([0, 255, 0, 0]));

    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn sorted(mut palette: Vec<String>) -> Vec<String> {
    palette.sort();
    palette
}

#[test]
fn palette_from_encoded_image() {
    let mut rng = StdRng::seed_from_u64(11);
    let palette =
        extract_palette_bytes(&two_tone_png(), 2, None, &ColorQuantizer::default(), &mut rng)
            .unwrap();
    assert_eq!(sorted(palette), vec!["#0000ff", "#ff0000"]);
}

#[test]
fn palette_survives_downscaling() {
    let mut rng = StdRng::seed_from_u64(5);
    let palette =
        extract_palette_bytes(&two_tone_png(), 2, Some(4), &ColorQuantizer::default(), &mut rng)
            .unwrap();
    assert_eq!(palette.len(), 2);
}

#[test]
fn palette_from_rgba_buffer() {
    let raw = [
        0, 0, 0, 255, //
        255, 255, 255, 255, //
        9, 9, 9, 0,
    ];
    let mut rng = StdRng::seed_from_u64(3);
    let palette =
        extract_palette_rgba_bytes(&raw, 1, &ColorQuantizer::default(), &mut rng).unwrap();
    assert_eq!(palette, vec!["#808080"]);
}

#[test]
fn fully_transparent_image_is_rejected() {
    let raw = [1, 2, 3, 0, 4, 5, 6, 0];
    let mut rng = StdRng::seed_from_u64(3);
    let err = extract_palette_rgba_bytes(&raw, 2, &ColorQuantizer::default(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PaletteError::EmptySamples));
    assert!(err.is_invalid_input());
}

#[test]
fn oversized_palette_is_rejected() {
    let raw = [1, 2, 3, 255];
    let mut rng = StdRng::seed_from_u64(3);
    let err = extract_palette_rgba_bytes(&raw, usize::MAX, &ColorQuantizer::default(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PaletteError::TooManyClusters { k: usize::MAX, .. }));

    let err = quantize_bytes(&two_tone_png(), MAX_CLUSTERS + 1, &ColorQuantizer::default(), &mut rng)
        .unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn quantized_image_uses_only_palette_colors() {
    let mut rng = StdRng::seed_from_u64(21);
    let (png, palette) =
        quantize_bytes(&two_tone_png(), 2, &ColorQuantizer::default(), &mut rng).unwrap();
    assert_eq!(sorted(palette), vec!["#0000ff", "#ff0000"]);

    let out = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (8, 4));
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(*out.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
    assert_eq!(*out.get_pixel(7, 3), Rgba([0, 0, 255, 255]));
}

#[test]
fn same_seed_same_palette() {
    let png = two_tone_png();
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        extract_palette_bytes(&png, 3, None, &ColorQuantizer::default(), &mut rng).unwrap()
    };
    assert_eq!(run(99), run(99));
}
