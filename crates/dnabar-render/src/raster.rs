use std::path::Path;

use dnabar_core::BarcodeImage;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::{RenderError, RenderSink};

/// Pixel geometry for rasterised barcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Pixels per base before the minimum width is applied
    pub unit_width: u32,
    /// Narrowest image produced, so one or two bases stay visible
    pub min_width: u32,
    /// Widest image produced; longer barcodes are squeezed to fit
    pub max_width: u32,
    pub height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            unit_width: 20,
            min_width: 100,
            max_width: 65_535,
            height: 200,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.height == 0 {
            return Err(RenderError::InvalidSettings("height must be > 0".into()));
        }
        if self.unit_width == 0 && self.min_width == 0 {
            return Err(RenderError::InvalidSettings(
                "unit_width or min_width must be > 0".into(),
            ));
        }
        if self.max_width == 0 {
            return Err(RenderError::InvalidSettings("max_width must be > 0".into()));
        }
        Ok(())
    }

    /// Physical (width, height) for a barcode, capped at `max_width`.
    ///
    /// Every base keeps at least one pixel column, so a barcode with more
    /// units than `max_width` cannot be drawn.
    pub fn dimensions(&self, image: &BarcodeImage) -> Result<(u32, u32), RenderError> {
        if image.width > self.max_width as usize {
            return Err(RenderError::InvalidSettings(format!(
                "{} bases exceed max_width {}",
                image.width, self.max_width
            )));
        }
        let width = image
            .render_width(self.unit_width, self.min_width)
            .min(self.max_width);
        Ok((width, self.height))
    }
}

/// Paint every block into an RGBA buffer.
///
/// Logical unit `i` covers columns `[i*W/n, (i+1)*W/n)`, so when the minimum
/// width kicks in the blocks are stretched evenly across the canvas.
pub fn rasterize(image: &BarcodeImage, settings: &RenderSettings) -> Result<RgbaImage, RenderError> {
    settings.validate()?;
    if image.is_empty() {
        return Err(RenderError::EmptyImage);
    }

    let (width, height) = settings.dimensions(image)?;
    let units = image.width.max(1) as u64;
    let mut buffer = RgbaImage::from_pixel(width, height, Rgba([0xff, 0xff, 0xff, 0xff]));

    for rect in &image.rects {
        let x0 = (rect.x as u64 * width as u64 / units) as u32;
        let x1 = ((rect.x + rect.width) as u64 * width as u64 / units).min(width as u64) as u32;
        let pixel = Rgba(rect.color.to_rgba());
        for x in x0..x1 {
            for y in 0..height {
                buffer.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(buffer)
}

/// Writes barcodes as PNG files
#[derive(Debug, Clone, Default)]
pub struct PngSink {
    pub settings: RenderSettings,
}

impl PngSink {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }
}

impl RenderSink for PngSink {
    fn write(&self, image: &BarcodeImage, path: &Path) -> Result<(), RenderError> {
        let unrecognized = image.unrecognized_positions();
        if !unrecognized.is_empty() {
            tracing::warn!(
                "Rendering {} block(s) with the fallback colour at positions {:?}",
                unrecognized.len(),
                unrecognized
            );
        }

        let buffer = rasterize(image, &self.settings)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        buffer.save_with_format(path, ImageFormat::Png)?;
        tracing::debug!(
            "Wrote {}x{} barcode to {}",
            buffer.width(),
            buffer.height(),
            path.display()
        );
        Ok(())
    }
}
