#![forbid(unsafe_code)]

//! Headless layout + SVG renderer for muster org-chart rosters.
//!
//! Data flows one way: `Roster` → [`layout_roster`] → [`model::ChartLayout`] →
//! [`svg::render_chart_svg`] → SVG text (rasterized by the `muster` facade's `raster`
//! feature). Layout never paints; the renderer never recomputes positions. Layout accepts
//! any well-typed roster: empty input and unknown ranks are defined behaviors, not errors.

pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

use std::sync::Arc;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};

pub use layout::layout_roster;
pub use model::ChartLayout;
pub use svg::{SvgRenderOptions, render_chart_svg};

#[derive(Clone)]
pub struct LayoutOptions {
    /// Measures the sub-group banner label so its pill wraps the text exactly. Every other
    /// text role fits by character budget instead.
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}
