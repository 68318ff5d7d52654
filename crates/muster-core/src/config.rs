//! Chart style configuration.
//!
//! Every color, font, dimension and truncation budget the renderer uses lives here and is
//! passed explicitly into layout and paint calls. Defaults reproduce the original RAV
//! deployment's canvas: 10000px wide, 400px rank rows, cyan-on-dark palette, Times New
//! Roman stack.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Fixed canvas width; canvas height is computed from content.
    pub canvas_width: f64,
    pub header_height: f64,
    pub footer_height: f64,
    /// Vertical gap between the header block and the first row's boxes.
    pub chart_top_padding: f64,
    /// Vertical space one rank row occupies, box height included.
    pub row_height: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub box_gap: f64,
    /// Height of the rank-badge strip at the top of each box.
    pub badge_height: f64,
    pub shadow_offset: f64,
    pub border_inset: f64,
    pub border_width: f64,
    /// Gap between a row's first box and its right-anchored level label.
    pub level_label_gap: f64,
    pub font_family: String,
    pub title: String,
    pub footer_caption: String,
    pub banner: BannerStyle,
    pub connector: ConnectorStyle,
    pub honorary: HonoraryStyle,
    pub logo: LogoStyle,
    pub palette: Palette,
    pub font_sizes: FontSizes,
    pub budgets: FitBudgets,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            canvas_width: 10000.0,
            header_height: 350.0,
            footer_height: 150.0,
            chart_top_padding: 50.0,
            row_height: 400.0,
            box_width: 500.0,
            box_height: 220.0,
            box_gap: 40.0,
            badge_height: 70.0,
            shadow_offset: 6.0,
            border_inset: 30.0,
            border_width: 5.0,
            level_label_gap: 30.0,
            font_family: "'Times New Roman', serif".to_string(),
            title: "RAV ROSTER".to_string(),
            footer_caption: "Generated by RAV Roster Bot".to_string(),
            banner: BannerStyle::default(),
            connector: ConnectorStyle::default(),
            honorary: HonoraryStyle::default(),
            logo: LogoStyle::default(),
            palette: Palette::default(),
            font_sizes: FontSizes::default(),
            budgets: FitBudgets::default(),
        }
    }
}

/// Sub-group banner row. The pill is sized around the measured label, so only paddings and
/// the row height are fixed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerStyle {
    pub height: f64,
    pub pill_height: f64,
    pub pill_padding_x: f64,
    pub corner_radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub label_color: String,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            height: 110.0,
            pill_height: 80.0,
            pill_padding_x: 60.0,
            corner_radius: 40.0,
            fill: "#262932".to_string(),
            stroke: "#a2c6ca".to_string(),
            stroke_width: 3.0,
            label_color: "#a2c6ca".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStyle {
    pub stroke: String,
    pub stroke_width: f64,
    /// The stem from the source row stops this far above the destination row.
    pub stem_gap: f64,
    /// Bus and per-box drops sit this far above the destination row.
    pub drop_offset: f64,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            stroke: "#a2c6ca".to_string(),
            stroke_width: 8.0,
            stem_gap: 15.0,
            drop_offset: 20.0,
        }
    }
}

/// The honorary side panel: a fixed-width column on the left, outside the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HonoraryStyle {
    pub panel_width: f64,
    pub title: String,
    /// Vertical space reserved for the panel title above the first card.
    pub title_height: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub card_gap: f64,
}

impl Default for HonoraryStyle {
    fn default() -> Self {
        Self {
            panel_width: 1200.0,
            title: "HONORARY".to_string(),
            title_height: 150.0,
            card_width: 1000.0,
            card_height: 220.0,
            card_gap: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoStyle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self {
            x: 60.0,
            y: 60.0,
            width: 180.0,
            height: 180.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background_top: String,
    pub background_bottom: String,
    pub border: String,
    pub accent: String,
    pub box_fill: String,
    pub box_border: String,
    pub badge_fill: String,
    pub text_primary: String,
    pub text_username: String,
    pub subtitle: String,
    pub footer: String,
    pub divider: String,
    pub divider_opacity: f64,
    pub shadow: String,
    pub shadow_opacity: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_top: "#1e1f24".to_string(),
            background_bottom: "#14151a".to_string(),
            border: "#444444".to_string(),
            accent: "#a2c6ca".to_string(),
            box_fill: "#a2c6ca".to_string(),
            box_border: "#ffffff".to_string(),
            badge_fill: "#7da5a8".to_string(),
            text_primary: "#000000".to_string(),
            text_username: "#1e1f24".to_string(),
            subtitle: "#cccccc".to_string(),
            footer: "#888888".to_string(),
            divider: "#ffffff".to_string(),
            divider_opacity: 0.2,
            shadow: "#000000".to_string(),
            shadow_opacity: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f64,
    pub subtitle: f64,
    pub rank_label: f64,
    pub member_name: f64,
    pub username: f64,
    pub level_label: f64,
    pub banner_label: f64,
    pub honorary_title: f64,
    pub footer: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 120.0,
            subtitle: 52.0,
            rank_label: 42.0,
            member_name: 58.0,
            username: 42.0,
            level_label: 50.0,
            banner_label: 48.0,
            honorary_title: 64.0,
            footer: 38.0,
        }
    }
}

/// Character budgets per text role, consumed by [`crate::fit::fit`]. The username budget
/// covers the rendered `@name` form, `@` included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitBudgets {
    pub rank_label: usize,
    pub member_name: usize,
    pub username: usize,
    pub honorary_strip: usize,
}

impl Default for FitBudgets {
    fn default() -> Self {
        Self {
            rank_label: 24,
            member_name: 20,
            username: 24,
            honorary_strip: 24,
        }
    }
}
