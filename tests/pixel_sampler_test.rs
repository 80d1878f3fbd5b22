// Pixel sampler: coordinate mapping, sampling and magnifier on a decoded image
use std::io::Cursor;

use color_loupe::color::Color;
use color_loupe::image_loader::{ImageLoader, ImageSource};
use color_loupe::sampler::{
    compute_magnifier_viewport, map_display_to_image_coord, read_pixel, render_magnifier,
    sample_pixel, window_span, DisplayRect, ImageRaster, ImageSize, MagnifierConfig,
    PointerSample,
};
use image::{ImageFormat, Rgba, RgbaImage};

/// 200x100 的 PNG：左半红、右半蓝，(100, 50) 处为一个绿色像素。
fn sample_png() -> Vec<u8> {
    let image = RgbaImage::from_fn(200, 100, |x, y| {
        if x == 100 && y == 50 {
            Rgba([0, 255, 0, 255])
        } else if x < 100 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 128])
        }
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

fn load_sample() -> ImageRaster {
    ImageLoader::default()
        .load(ImageSource::Bytes(sample_png()))
        .expect("decode sample png")
}

#[test]
fn half_size_display_maps_to_full_resolution() {
    let raster = load_sample();
    assert_eq!(raster.size(), ImageSize::new(200, 100));

    let rect = DisplayRect::new(10.0, 20.0, 100.0, 50.0);
    let coord = map_display_to_image_coord(60.0, 45.0, &rect, raster.size());
    assert_eq!(coord, PointerSample::new(100, 50));

    let reading = read_pixel(coord, &raster);
    assert!(reading.in_bounds);
    assert_eq!(reading.color, Color::new(0, 255, 0));
    assert_eq!(reading.hex, "#00FF00");
    assert_eq!(reading.rgb_text, "0, 255, 0");
}

#[test]
fn alpha_is_ignored_when_sampling() {
    let raster = load_sample();
    assert_eq!(
        sample_pixel(PointerSample::new(150, 10), &raster),
        Color::new(0, 0, 255)
    );
}

#[test]
fn out_of_bounds_samples_are_black() {
    let raster = load_sample();
    for coord in [
        PointerSample::new(-1, 0),
        PointerSample::new(0, -1),
        PointerSample::new(200, 0),
        PointerSample::new(0, 100),
        PointerSample::OFF_IMAGE,
    ] {
        let reading = read_pixel(coord, &raster);
        assert!(!reading.in_bounds);
        assert_eq!(reading.color, Color::BLACK);
        assert_eq!(reading.hex, "#000000");
    }
}

#[test]
fn pointer_past_right_edge_maps_outside() {
    let size = ImageSize::new(200, 100);
    let rect = DisplayRect::sized(100.0, 50.0);
    let coord = map_display_to_image_coord(100.0, 10.0, &rect, size);
    assert_eq!(coord.x, 200);
    assert!(!coord.is_within(size));
}

#[test]
fn viewport_scales_background_by_zoom() {
    let viewport = compute_magnifier_viewport(
        PointerSample::new(100, 50),
        ImageSize::new(200, 100),
        120.0,
        12.0,
    );
    assert_eq!(viewport.pixel_size, 10.0);
    assert_eq!(viewport.background_width, 2000.0);
    assert_eq!(viewport.background_height, 1000.0);
    assert_eq!(viewport.css_background_position(), "-945px -445px");
}

#[test]
fn rendered_magnifier_centres_the_sampled_pixel() {
    let raster = load_sample();
    let config = MagnifierConfig {
        circular: false,
        ..MagnifierConfig::default()
    };

    let image = render_magnifier(&raster, PointerSample::new(100, 50), &config).expect("render");
    assert_eq!(image.width(), config.diameter as u32);
    assert_eq!(image.height(), config.diameter as u32);

    let center = image.get_pixel(image.width() / 2, image.height() / 2);
    assert_eq!(center.0[..3], [0, 255, 0]);
    assert_eq!(window_span(config.zoom_level) % 2, 1);
}

#[test]
fn unsupported_bytes_are_rejected() {
    let result = ImageLoader::default().load(ImageSource::Bytes(b"definitely not an image".to_vec()));
    assert!(result.is_err());
}
