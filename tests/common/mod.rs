// Shared helpers for the integration tests

use quaternion_color_matching::{ColorImage, TestShape};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Controls whether debug output is saved during test execution
/// Set to true to write annotated scenes and surfaces into `target/`
pub const DEBUG_OUTPUT: bool = false;

pub const RED: [f64; 3] = [255.0, 0.0, 0.0];
pub const GREEN: [f64; 3] = [0.0, 255.0, 0.0];
pub const BLUE: [f64; 3] = [0.0, 0.0, 255.0];
pub const WHITE: [f64; 3] = [255.0, 255.0, 255.0];

/// 5x5 template cycling through a four colour palette.
pub fn palette_template() -> ColorImage {
    let palette = [RED, GREEN, BLUE, WHITE];
    let mut template = ColorImage::filled(5, 5, [0.0; 3]);
    for y in 0..5 {
        for x in 0..5 {
            template.set_pixel(x, y, palette[((y * 3 + x) % 4) as usize]);
        }
    }
    template
}

/// Red square on a blue background.
pub fn square_template(size: u32) -> ColorImage {
    ColorImage::create_test_template(size, TestShape::Square, [220.0, 30.0, 30.0], [30.0, 30.0, 200.0])
}

/// Seeded noise scene with each template pasted at its `(x, y)`.
pub fn noise_scene(width: u32, height: u32, seed: u64, placements: &[(&ColorImage, u32, u32)]) -> ColorImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = ColorImage::random_noise(width, height, &mut rng);
    for &(template, x, y) in placements {
        scene.paste(template, x, y);
    }
    scene
}
