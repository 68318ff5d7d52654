//! Layout result types.
//!
//! Everything the SVG renderer paints is precomputed here as plain geometry. The structs
//! serialize so tests and the CLI `layout` command can snapshot them.

use muster_core::Member;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Left edge of the chart column (shifted right when the honorary panel is present).
    pub column_x: f64,
    pub column_width: f64,
    pub rows: Vec<RowLayout>,
    pub honorary: Option<HonoraryPanelLayout>,
    /// Roster keys not present in the taxonomy, sorted. Excluded from layout by policy.
    pub skipped_ranks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub rank: String,
    pub level: i64,
    pub banner: Option<BannerLayout>,
    pub boxes: Vec<BoxLayout>,
    pub connector: Option<ConnectorLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub member: Member,
}

/// A sub-group banner row. `x`/`width` span the chart column; the pill wraps the measured
/// label and is centered within that span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub pill: PillRect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Line geometry joining a row to its nearest non-empty predecessor: a stem from the source
/// row's box-bottom center, an optional bus (only when the destination row has more than one
/// box), and one drop per destination box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLayout {
    pub stem_x: f64,
    pub stem_top: f64,
    pub stem_bottom: f64,
    pub bus: Option<BusSegment>,
    pub drops: Vec<DropSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusSegment {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropSegment {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HonoraryPanelLayout {
    pub x: f64,
    pub width: f64,
    pub title: String,
    pub title_x: f64,
    pub title_y: f64,
    pub cards: Vec<HonoraryCardLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HonoraryCardLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub member: Member,
}

impl ChartLayout {
    /// Bottom edge of the honorary panel's last card, if any. The canvas height sum does not
    /// include it (see the layout module), so this can exceed `canvas_height`.
    pub fn honorary_bottom(&self) -> Option<f64> {
        self.honorary
            .as_ref()
            .and_then(|panel| panel.cards.last())
            .map(|card| card.y + card.height)
    }
}
