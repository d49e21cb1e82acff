// Text width -> placement box.
//
// The box must be large enough that two non-overlapping boxes can never hold
// visually overlapping labels, so it covers the label's own padding plus a
// safety margin on top of the measured glyph run.

use super::{LayoutConfig, LayoutItem, SizeF, TextMetrics};
use crate::error::Result;
use crate::task::Priority;

/// A measured task, ready for a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBox {
    pub id: String,
    pub priority: Priority,
    pub size: SizeF,
}

pub fn box_for<T: LayoutItem + ?Sized>(item: &T, metrics: &TextMetrics<'_>, cfg: &LayoutConfig) -> Result<ItemBox> {
    let text_w = metrics.measure(item.title(), item.priority())?;
    Ok(ItemBox {
        id: item.id().to_string(),
        priority: item.priority(),
        size: SizeF {
            w: text_w + cfg.text_padding + cfg.box_margin,
            h: cfg.box_height,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{StubMeasurer, task};
    use crate::layout::TextMeasurer;

    #[test]
    fn test_width_adds_padding_and_margin() {
        let cfg = LayoutConfig::default();
        let metrics = TextMetrics::new(&StubMeasurer, cfg.font_px);
        let t = task("a", "Pay rent", 3);
        let text_w = StubMeasurer.measure("Pay rent", 38.4).unwrap();

        let b = box_for(&t, &metrics, &cfg).unwrap();
        assert_eq!(b.id, "a");
        assert_eq!(b.size.w, text_w + 16.0 + 50.0);
        assert_eq!(b.size.h, 90.0);
    }

    #[test]
    fn test_empty_title_still_has_positive_box() {
        let cfg = LayoutConfig::default();
        let metrics = TextMetrics::new(&StubMeasurer, cfg.font_px);
        let b = box_for(&task("e", "", 1), &metrics, &cfg).unwrap();
        assert!(b.size.w > 0.0 && b.size.h > 0.0);
    }
}
