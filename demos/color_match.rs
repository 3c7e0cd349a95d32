//! Colour template matching on a synthetic scene
//!
//! A red-on-blue circle is pasted into seeded noise next to copies with the
//! foreground recoloured. Only the original colouring should score as the
//! strongest match. Pass `<scene> <template>` paths to match real images.

use quaternion_color_matching::{
    annotate_image_with_matches, save_debug_output, ColorCorrelationEngine, ColorImage, PeakConfig, TestShape,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

const FOREGROUND: [f64; 3] = [230.0, 40.0, 40.0];
const BACKGROUND: [f64; 3] = [20.0, 20.0, 160.0];

fn synthetic_inputs() -> (ColorImage, ColorImage) {
    let template = ColorImage::create_test_template(32, TestShape::Circle, FOREGROUND, BACKGROUND);

    let mut rng = StdRng::seed_from_u64(7);
    let mut scene = ColorImage::random_noise(256, 192, &mut rng);
    scene.paste(&template, 40, 30);
    scene.paste(&template.recolored(FOREGROUND, [40.0, 230.0, 40.0]), 150, 40);
    scene.paste(&template.recolored(FOREGROUND, [230.0, 230.0, 40.0]), 90, 120);

    (scene, template)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (scene, template) = match args.as_slice() {
        [scene, template] => (ColorImage::from_file(scene)?, ColorImage::from_file(template)?),
        _ => synthetic_inputs(),
    };

    let engine = ColorCorrelationEngine::default();
    let start_time = Instant::now();
    let surface = engine.correlate(&scene, &template)?;
    let matches = quaternion_color_matching::find_matches(&surface, &PeakConfig::default())?;
    let elapsed_time = start_time.elapsed();

    for m in &matches {
        println!(
            "match at ({}, {}) correlation {:.3} confidence {:.3} area {}",
            m.x, m.y, m.correlation, m.confidence, m.area
        );
    }

    surface.save_to_file("color_match_surface.png")?;

    let mut annotated_image = scene.to_rgb_image();
    annotate_image_with_matches(&mut annotated_image, &matches, template.width, template.height);
    save_debug_output(
        &annotated_image,
        "color_match_annotated.png",
        matches.len(),
        elapsed_time,
        "Quaternion Colour Phase Correlation",
        None,
    )?;

    Ok(())
}
