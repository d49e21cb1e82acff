// Text measurement.
//
// Widths come from real glyph advances, never from character counts:
// proportional fonts make count-based estimates either overlap or waste space.

use fontdue::{Font, FontSettings};

use crate::error::{Error, Result};
use crate::task::Priority;

/// A surface that knows how wide a string renders in bold at a pixel size.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_px: f64) -> Result<f64>;
}

/// Priority-aware measurement: maps a priority to its font size first.
pub struct TextMetrics<'a> {
    measurer: &'a dyn TextMeasurer,
    font_px: [f64; 4],
}

impl<'a> TextMetrics<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, font_px: [f64; 4]) -> Self {
        Self { measurer, font_px }
    }

    pub fn font_px(&self, priority: Priority) -> f64 {
        self.font_px[priority.index()]
    }

    pub fn measure(&self, text: &str, priority: Priority) -> Result<f64> {
        let width = self.measurer.measure(text, self.font_px(priority))?;
        if !width.is_finite() || width < 0.0 {
            return Err(Error::MeasurementUnavailable(format!(
                "measured width {width} for {text:?}"
            )));
        }
        Ok(width)
    }
}

/// Measures with a parsed font file: sum of advance widths plus pair kerning.
pub struct FontMeasurer {
    font: Font,
}

impl FontMeasurer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::MeasurementUnavailable(format!("font parse failed: {e}")))?;
        Ok(Self { font })
    }

    /// Best bold sans-serif the system has.
    #[cfg(feature = "system-fonts")]
    pub fn system_bold_sans() -> Result<Self> {
        use font_kit::family_name::FamilyName;
        use font_kit::properties::{Properties, Weight};
        use font_kit::source::SystemSource;

        let mut props = Properties::new();
        props.weight(Weight::BOLD);
        let handle = SystemSource::new()
            .select_best_match(&[FamilyName::SansSerif], &props)
            .map_err(|e| Error::MeasurementUnavailable(format!("no system font: {e:?}")))?;
        let font = handle
            .load()
            .map_err(|e| Error::MeasurementUnavailable(format!("font load failed: {e:?}")))?;
        let bytes = font
            .copy_font_data()
            .ok_or_else(|| Error::MeasurementUnavailable("font has no data".to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&self, text: &str, font_px: f64) -> Result<f64> {
        let px = font_px as f32;
        let mut width = 0.0f32;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            if let Some(p) = prev {
                width += self.font.horizontal_kern(p, ch, px).unwrap_or(0.0);
            }
            width += self.font.metrics(ch, px).advance_width;
            prev = Some(ch);
        }
        Ok(width.max(0.0) as f64)
    }
}
