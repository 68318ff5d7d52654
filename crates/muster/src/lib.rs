#![forbid(unsafe_code)]

//! `muster` renders a ranked membership roster into an org-chart image, headlessly.
//!
//! # Features
//!
//! - `render`: layout + SVG output (`muster::render`)
//! - `raster`: PNG/JPEG output via pure-Rust SVG rasterization

pub use muster_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use muster_render::model::ChartLayout;
    pub use muster_render::svg::{SvgRenderOptions, render_chart_svg};
    pub use muster_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use muster_render::{LayoutOptions, layout_roster};

    use muster_core::{ChartStyle, RankTaxonomy, RenderMeta, Roster};
    use std::path::Path;

    #[cfg(feature = "raster")]
    pub mod raster;

    /// Loads the optional logo asset. A missing or unreadable file is never fatal: the
    /// chart renders without it and the omission is logged here, at the only I/O boundary
    /// the renderer has.
    pub fn read_logo_asset(path: &Path) -> Option<Vec<u8>> {
        match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "logo asset unavailable, rendering without it");
                None
            }
        }
    }

    /// Bundles a taxonomy and style with layout/SVG options so callers don't thread four
    /// parameters through every call. Stateless between calls: each render owns its buffer.
    #[derive(Clone)]
    pub struct RosterRenderer {
        pub taxonomy: RankTaxonomy,
        pub style: ChartStyle,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
        pub logo: Option<Vec<u8>>,
    }

    impl Default for RosterRenderer {
        fn default() -> Self {
            Self {
                taxonomy: RankTaxonomy::default_rav(),
                style: ChartStyle::default(),
                layout: LayoutOptions::default(),
                svg: SvgRenderOptions::default(),
                logo: None,
            }
        }
    }

    impl RosterRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_taxonomy(mut self, taxonomy: RankTaxonomy) -> Self {
            self.taxonomy = taxonomy;
            self
        }

        pub fn with_style(mut self, style: ChartStyle) -> Self {
            self.style = style;
            self
        }

        pub fn with_logo(mut self, logo: Option<Vec<u8>>) -> Self {
            self.logo = logo;
            self
        }

        pub fn layout_sync(&self, roster: &Roster) -> ChartLayout {
            layout_roster(roster, &self.taxonomy, &self.style, &self.layout)
        }

        pub fn render_svg_sync(&self, roster: &Roster, meta: &RenderMeta) -> String {
            let layout = self.layout_sync(roster);
            render_chart_svg(&layout, &self.style, meta, self.logo.as_deref(), &self.svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            roster: &Roster,
            meta: &RenderMeta,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg_sync(roster, meta), options)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            roster: &Roster,
            meta: &RenderMeta,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg_sync(roster, meta), options)
        }
    }
}
