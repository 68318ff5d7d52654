//! SVG renderer.
//!
//! Consumes a [`ChartLayout`] and paints it in a fixed order: background, border, header,
//! logo, divider, honorary panel, banners and boxes, connectors, footer. Every emitted
//! element carries its complete presentation attributes, so no draw depends on state left
//! behind by an earlier one, and reordering paints never changes their styling.

use std::fmt::Write as _;

use base64::Engine as _;
use muster_core::{ChartStyle, Member, RenderMeta, fit::fit};

use crate::model::{BannerLayout, ChartLayout, ConnectorLayout};

// Baseline offsets tuned to the 220px card and the header block of the original canvas.
const TITLE_BASELINE_Y: f64 = 160.0;
const SUBTITLE_BASELINE_Y: f64 = 230.0;
const DIVIDER_Y: f64 = 290.0;
const DIVIDER_INSET_X: f64 = 100.0;
const DIVIDER_WIDTH: f64 = 3.0;
const RANK_BASELINE: f64 = 48.0;
const NAME_BASELINE: f64 = 135.0;
const USERNAME_BASELINE: f64 = 190.0;
const LEVEL_BASELINE_NUDGE: f64 = 15.0;
const BOX_STROKE_WIDTH: f64 = 4.0;
const BADGE_UNDERLINE_WIDTH: f64 = 2.0;
const FOOTER_CAPTION_RISE: f64 = 80.0;
const FOOTER_DATE_RISE: f64 = 35.0;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id`; also prefixes internal ids (gradient defs) so several charts can share a
    /// document.
    pub diagram_id: Option<String>,
    /// Card drop shadows can be disabled for slimmer output.
    pub include_shadows: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            include_shadows: true,
        }
    }
}

pub fn render_chart_svg(
    layout: &ChartLayout,
    style: &ChartStyle,
    meta: &RenderMeta,
    logo: Option<&[u8]>,
    options: &SvgRenderOptions,
) -> String {
    let id = options.diagram_id.as_deref().unwrap_or("muster-chart");
    let w = layout.canvas_width;
    let h = layout.canvas_height;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        escape_xml(id),
        fmt(w),
        fmt(h),
        fmt(w),
        fmt(h)
    );

    // Background gradient.
    let _ = write!(
        out,
        r#"<defs><linearGradient id="{id}-bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{top}"/><stop offset="1" stop-color="{bottom}"/></linearGradient></defs>"#,
        id = escape_xml(id),
        top = escape_xml(&style.palette.background_top),
        bottom = escape_xml(&style.palette.background_bottom),
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="url(#{}-bg)"/>"#,
        fmt(w),
        fmt(h),
        escape_xml(id)
    );

    // Outer border.
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        fmt(style.border_inset),
        fmt(style.border_inset),
        fmt(w - 2.0 * style.border_inset),
        fmt(h - 2.0 * style.border_inset),
        escape_xml(&style.palette.border),
        fmt(style.border_width)
    );

    // Header.
    text(
        &mut out,
        w / 2.0,
        TITLE_BASELINE_Y,
        &style.title,
        style,
        style.font_sizes.title,
        true,
        &style.palette.accent,
        "middle",
    );
    text(
        &mut out,
        w / 2.0,
        SUBTITLE_BASELINE_Y,
        &format!(
            "Active members: {} | Updated: {}",
            meta.total_members, meta.updated_at
        ),
        style,
        style.font_sizes.subtitle,
        false,
        &style.palette.subtitle,
        "middle",
    );

    if let Some(bytes) = logo {
        let _ = write!(
            out,
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" href="data:{};base64,{}"/>"#,
            fmt(style.logo.x),
            fmt(style.logo.y),
            fmt(style.logo.width),
            fmt(style.logo.height),
            sniff_mime(bytes),
            base64::engine::general_purpose::STANDARD.encode(bytes)
        );
    }

    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
        fmt(DIVIDER_INSET_X),
        fmt(DIVIDER_Y),
        fmt(w - DIVIDER_INSET_X),
        fmt(DIVIDER_Y),
        escape_xml(&style.palette.divider),
        fmt(style.palette.divider_opacity),
        fmt(DIVIDER_WIDTH)
    );

    // Honorary panel, outside the hierarchy.
    if let Some(panel) = &layout.honorary {
        text(
            &mut out,
            panel.title_x,
            panel.title_y,
            &panel.title,
            style,
            style.font_sizes.honorary_title,
            true,
            &style.palette.accent,
            "middle",
        );
        for card in &panel.cards {
            let strip = fit(&panel.title, style.budgets.honorary_strip).to_uppercase();
            member_card(
                &mut out,
                card.x,
                card.y,
                card.width,
                card.height,
                &strip,
                &card.member,
                style,
                options,
            );
        }
    }

    // Rows: banner first, then connector lines underneath the boxes they join.
    for row in &layout.rows {
        if let Some(banner) = &row.banner {
            banner_pill(&mut out, banner, style);
        }
        if let Some(connector) = &row.connector {
            connector_lines(&mut out, connector, style);
        }
        for (i, bx) in row.boxes.iter().enumerate() {
            if i == 0 {
                text(
                    &mut out,
                    bx.x - style.level_label_gap,
                    bx.y + bx.height / 2.0 + LEVEL_BASELINE_NUDGE,
                    &format!("LVL {}", row.level),
                    style,
                    style.font_sizes.level_label,
                    true,
                    &style.palette.accent,
                    "end",
                );
            }
            let strip = fit(&row.rank, style.budgets.rank_label).to_uppercase();
            member_card(
                &mut out,
                bx.x,
                bx.y,
                bx.width,
                bx.height,
                &strip,
                &bx.member,
                style,
                options,
            );
        }
    }

    // Footer.
    text(
        &mut out,
        w / 2.0,
        h - FOOTER_CAPTION_RISE,
        &style.footer_caption,
        style,
        style.font_sizes.footer,
        false,
        &style.palette.footer,
        "middle",
    );
    text(
        &mut out,
        w / 2.0,
        h - FOOTER_DATE_RISE,
        &format!("Generated on {}", meta.generated_on),
        style,
        style.font_sizes.footer,
        false,
        &style.palette.footer,
        "middle",
    );

    out.push_str("</svg>");
    out
}

/// One member card: shadow, body, badge strip with underline, strip label, name, username.
/// Shared by hierarchy boxes and honorary cards.
#[allow(clippy::too_many_arguments)]
fn member_card(
    out: &mut String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    strip_label: &str,
    member: &Member,
    style: &ChartStyle,
    options: &SvgRenderOptions,
) {
    if options.include_shadows {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            fmt(x + style.shadow_offset),
            fmt(y + style.shadow_offset),
            fmt(width),
            fmt(height),
            escape_xml(&style.palette.shadow),
            fmt(style.palette.shadow_opacity)
        );
    }
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt(x),
        fmt(y),
        fmt(width),
        fmt(height),
        escape_xml(&style.palette.box_fill),
        escape_xml(&style.palette.box_border),
        fmt(BOX_STROKE_WIDTH)
    );
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        fmt(x),
        fmt(y),
        fmt(width),
        fmt(style.badge_height),
        escape_xml(&style.palette.badge_fill)
    );
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt(x),
        fmt(y + style.badge_height),
        fmt(x + width),
        fmt(y + style.badge_height),
        escape_xml(&style.palette.box_border),
        fmt(BADGE_UNDERLINE_WIDTH)
    );

    let cx = x + width / 2.0;
    text(
        out,
        cx,
        y + RANK_BASELINE,
        strip_label,
        style,
        style.font_sizes.rank_label,
        true,
        &style.palette.text_primary,
        "middle",
    );
    text(
        out,
        cx,
        y + NAME_BASELINE,
        &fit(&member.name, style.budgets.member_name),
        style,
        style.font_sizes.member_name,
        true,
        &style.palette.text_primary,
        "middle",
    );
    text(
        out,
        cx,
        y + USERNAME_BASELINE,
        &fit(&format!("@{}", member.username), style.budgets.username),
        style,
        style.font_sizes.username,
        false,
        &style.palette.text_username,
        "middle",
    );
}

fn banner_pill(out: &mut String, banner: &BannerLayout, style: &ChartStyle) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt(banner.pill.x),
        fmt(banner.pill.y),
        fmt(banner.pill.width),
        fmt(banner.pill.height),
        fmt(style.banner.corner_radius),
        escape_xml(&style.banner.fill),
        escape_xml(&style.banner.stroke),
        fmt(style.banner.stroke_width)
    );
    text(
        out,
        banner.pill.x + banner.pill.width / 2.0,
        banner.pill.y + banner.pill.height / 2.0 + style.font_sizes.banner_label * 0.35,
        &banner.label,
        style,
        style.font_sizes.banner_label,
        true,
        &style.banner.label_color,
        "middle",
    );
}

fn connector_lines(out: &mut String, connector: &ConnectorLayout, style: &ChartStyle) {
    let stroke = escape_xml(&style.connector.stroke);
    let width = fmt(style.connector.stroke_width);
    let _ = write!(
        out,
        r#"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{stroke}" stroke-width="{width}"/>"#,
        fmt(connector.stem_top),
        fmt(connector.stem_bottom),
        x = fmt(connector.stem_x),
    );
    if let Some(bus) = &connector.bus {
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{stroke}" stroke-width="{width}"/>"#,
            fmt(bus.x1),
            fmt(bus.x2),
            y = fmt(bus.y),
        );
    }
    for drop in &connector.drops {
        let _ = write!(
            out,
            r#"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{stroke}" stroke-width="{width}"/>"#,
            fmt(drop.y1),
            fmt(drop.y2),
            x = fmt(drop.x),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn text(
    out: &mut String,
    x: f64,
    y: f64,
    content: &str,
    style: &ChartStyle,
    font_size: f64,
    bold: bool,
    fill: &str,
    anchor: &str,
) {
    let weight = if bold { r#" font-weight="bold""# } else { "" };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="{}" font-family="{}" font-size="{}"{} fill="{}">{}</text>"#,
        fmt(x),
        fmt(y),
        anchor,
        escape_xml(&style.font_family),
        fmt(font_size),
        weight,
        escape_xml(fill),
        escape_xml(content)
    );
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xff, 0xd8]) {
        "image/jpeg"
    } else {
        "image/png"
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Stringifies a coordinate the way SVG attributes expect: round-trippable decimal form,
/// with `-0` and sub-nanometer float noise collapsed.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}
