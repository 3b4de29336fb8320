use dft_image_filter::filters::filter::FilterRegistry;
use dft_image_filter::io::{load_image, save_image};
use dft_image_filter::{apply_ideal_filter, Direction, FilterSettings, PassMode};
use ndarray::{Array2, Array3, Axis};
use std::f64::consts::FRAC_PI_2;

fn checkerboard_rgb(size: usize) -> Array3<u8> {
    Array3::from_shape_fn((size, size, 3), |(i, j, c)| {
        if (i + j) % 2 == 1 {
            255 - c as u8
        } else {
            0
        }
    })
}

#[test]
fn test_registry_filter_from_settings_on_file() {
    let image = checkerboard_rgb(8);
    let dir = std::env::temp_dir();
    let input = dir.join(format!("dft_pipeline_in_{}.png", std::process::id()));
    let output = dir.join(format!("dft_pipeline_out_{}.png", std::process::id()));
    save_image(&image, &input).unwrap();

    let mut settings = FilterSettings::default();
    settings.set("filter", "Ideal DFT Filter").unwrap();
    settings.set("wc", &FRAC_PI_2.to_string()).unwrap();
    settings.set("filter_type", "low_pass").unwrap();

    let mut filter = FilterRegistry::lock()
        .get_filter(&settings.filter)
        .cloned()
        .unwrap();
    filter.configure(&settings).unwrap();

    let loaded = load_image(&input).unwrap();
    let filtered = filter.filter(loaded.view()).unwrap();
    save_image(&filtered, &output).unwrap();
    let reloaded = load_image(&output).unwrap();
    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();

    assert_eq!(reloaded.dim(), (8, 8, 3));
    for c in 0..3 {
        // the mean of the channel survives, the checkerboard does not
        let mean = (255 - c as i32) / 2;
        for &v in reloaded.index_axis(Axis(2), c).iter() {
            assert!((v as i32 - mean).abs() <= 1, "channel {c}: {v}");
        }
    }
}

#[test]
fn test_box_filter_from_registry() {
    let mut settings = FilterSettings::default();
    settings.set("filter", "Box Filter").unwrap();
    settings.set("size", "3").unwrap();
    let mut filter = FilterRegistry::lock()
        .get_filter(&settings.filter)
        .cloned()
        .unwrap();
    filter.configure(&settings).unwrap();

    let image = Array3::from_elem((5, 4, 1), 42u8);
    assert_eq!(filter.filter(image.view()).unwrap(), image);
}

#[test]
fn test_float_images_keep_their_element_type() {
    let image = Array2::from_shape_fn((6, 6), |(i, j)| ((i + j) % 2) as f32 * 200.0);
    let filtered: Array2<f32> =
        apply_ideal_filter(&image, FRAC_PI_2, Direction::Both, PassMode::HighPass).unwrap();
    for (out, orig) in filtered.iter().zip(image.iter()) {
        let expected = if *orig > 0.0 { 228.0 } else { 28.0 };
        assert!((out - expected).abs() < 1e-3, "{out} vs {expected}");
    }
}
