use crate::error::{QuaternionMatchingError, Result};
use image::{DynamicImage, GenericImageView, RgbImage};
use rand::Rng;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum TestShape {
    Square,
    Circle,
    Cross,
}

/// Interleaved RGB samples, row-major, kept in the 0-255 range of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorImage {
    pub data: Vec<f64>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl ColorImage {
    /// Wrap interleaved RGB samples, checking the sample count.
    pub fn new(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(QuaternionMatchingError::Shape(format!(
                "{}x{} RGB image needs {} samples, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels: 3,
        })
    }

    /// Image of a single colour.
    pub fn filled(width: u32, height: u32, rgb: [f64; 3]) -> Self {
        let n = width as usize * height as usize;
        let data = std::iter::repeat(rgb).take(n).flatten().collect();
        Self {
            data,
            width,
            height,
            channels: 3,
        }
    }

    /// Load an image from disk as RGB.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let img = image::open(path)?;
        Self::from_dynamic_image(img)
    }

    /// Convert a `DynamicImage` to RGB samples.
    pub fn from_dynamic_image(img: DynamicImage) -> Result<Self> {
        let (width, height) = img.dimensions();

        match img {
            DynamicImage::ImageRgb8(img) => Ok(Self::from_rgb_image(&img)),
            DynamicImage::ImageRgba8(img) => {
                // Alpha is dropped
                let data = img
                    .pixels()
                    .flat_map(|pixel| [pixel[0] as f64, pixel[1] as f64, pixel[2] as f64])
                    .collect();
                Self::new(width, height, data)
            }
            DynamicImage::ImageLuma8(img) => {
                let data = img
                    .pixels()
                    .flat_map(|pixel| {
                        let v = pixel[0] as f64;
                        [v, v, v]
                    })
                    .collect();
                Self::new(width, height, data)
            }
            _ => {
                // Anything else goes through RGB8 first
                let rgb_img = img.to_rgb8();
                Self::from_dynamic_image(DynamicImage::ImageRgb8(rgb_img))
            }
        }
    }

    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let data = img
            .pixels()
            .flat_map(|pixel| [pixel[0] as f64, pixel[1] as f64, pixel[2] as f64])
            .collect();
        Self {
            data,
            width: img.width(),
            height: img.height(),
            channels: 3,
        }
    }

    /// Uniformly random colours in `[0, 255]`.
    pub fn random_noise<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let n = width as usize * height as usize * 3;
        let data = (0..n).map(|_| rng.gen_range(0..=255u8) as f64).collect();
        Self {
            data,
            width,
            height,
            channels: 3,
        }
    }

    /// Synthetic template: `foreground` shape on a `background` square.
    pub fn create_test_template(size: u32, shape: TestShape, foreground: [f64; 3], background: [f64; 3]) -> Self {
        let mut template = Self::filled(size, size, background);
        let centre = size as f32 / 2.0;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - centre;
                let dy = y as f32 - centre;
                let inside = match shape {
                    TestShape::Square => {
                        let half_size = size as f32 * 0.3;
                        dx.abs() <= half_size && dy.abs() <= half_size
                    }
                    TestShape::Circle => (dx * dx + dy * dy).sqrt() <= size as f32 * 0.3,
                    TestShape::Cross => {
                        let thickness = (size / 10) as f32;
                        let arm_length = (size / 3) as f32;
                        (dx.abs() <= arm_length && dy.abs() <= thickness)
                            || (dy.abs() <= arm_length && dx.abs() <= thickness)
                    }
                };
                if inside {
                    template.set_pixel(x, y, foreground);
                }
            }
        }

        template
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[f64; 3]> {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            Some([self.data[i], self.data[i + 1], self.data[i + 2]])
        } else {
            None
        }
    }

    /// Overwrite one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [f64; 3]) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }

    /// Copy `other` with its top-left corner at `(x, y)`, clipped to this image.
    pub fn paste(&mut self, other: &ColorImage, x: u32, y: u32) {
        let w = other.width.min(self.width.saturating_sub(x));
        let h = other.height.min(self.height.saturating_sub(y));
        for ty in 0..h {
            let src = other.offset(0, ty);
            let dst = self.offset(x, y + ty);
            let len = w as usize * 3;
            self.data[dst..dst + len].copy_from_slice(&other.data[src..src + len]);
        }
    }

    /// Copy with every pixel equal to `from` replaced by `to`.
    pub fn recolored(&self, from: [f64; 3], to: [f64; 3]) -> Self {
        let mut out = self.clone();
        out.data.chunks_exact_mut(3).filter(|px| **px == from).for_each(|px| px.copy_from_slice(&to));
        out
    }

    /// 8-bit RGB copy for visualisation; samples are clamped to `[0, 255]`.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut rgb_image = RgbImage::new(self.width, self.height);
        for (i, pixel) in rgb_image.pixels_mut().enumerate() {
            let s = &self.data[i * 3..i * 3 + 3];
            *pixel = image::Rgb([
                s[0].round().clamp(0.0, 255.0) as u8,
                s[1].round().clamp(0.0, 255.0) as u8,
                s[2].round().clamp(0.0, 255.0) as u8,
            ]);
        }
        rgb_image
    }
}
