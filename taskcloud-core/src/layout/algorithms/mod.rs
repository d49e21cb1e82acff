//! Layout algorithms for the task cloud.
//!
//! - `ring`: default; one concentric ring per priority, sized from the arc
//!   length its labels need
//! - `spiral`: greedy golden-angle spiral with bounded collision retries

mod ring;
mod spiral;

pub use ring::{RingLayout, ring_radius};
pub use spiral::SpiralLayout;

use super::{ItemBox, LayoutStrategy};
use crate::error::{Error, Result};
use crate::task::Priority;

/// Look a strategy up by its config name.
pub fn strategy_for(name: &str) -> Result<Box<dyn LayoutStrategy>> {
    match name {
        "ring" => Ok(Box::new(RingLayout)),
        "spiral" => Ok(Box::new(SpiralLayout)),
        other => Err(Error::UnknownStrategy(other.to_string())),
    }
}

/// Indices of `boxes` per priority, most urgent first. Empty groups are
/// dropped; within a group the input order is kept.
pub fn group_by_priority(boxes: &[ItemBox]) -> Vec<(Priority, Vec<usize>)> {
    Priority::descending()
        .into_iter()
        .map(|p| {
            let members = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.priority == p)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();
            (p, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
