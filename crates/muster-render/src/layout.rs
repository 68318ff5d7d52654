//! The layout engine: a pure pass from roster + taxonomy + style to concrete geometry.
//!
//! No I/O, no clock, no retained state. Identical inputs produce identical output; the
//! renderer consumes the result without recomputing any position.

use muster_core::{ChartStyle, RankTaxonomy, Roster};

use crate::LayoutOptions;
use crate::model::{
    BannerLayout, BoxLayout, BusSegment, ChartLayout, ConnectorLayout, DropSegment,
    HonoraryCardLayout, HonoraryPanelLayout, PillRect, RowLayout,
};
use crate::text::{TextMeasurer as _, TextStyle};

pub fn layout_roster(
    roster: &Roster,
    taxonomy: &RankTaxonomy,
    style: &ChartStyle,
    options: &LayoutOptions,
) -> ChartLayout {
    let honorary_members = roster.members_of(taxonomy.honorary_rank());

    // The honorary panel claims a fixed-width column on the left; the chart column takes the
    // rest. With no honorary members the chart column spans the whole canvas.
    let (column_x, column_width) = if honorary_members.is_empty() {
        (0.0, style.canvas_width)
    } else {
        (
            style.honorary.panel_width,
            style.canvas_width - style.honorary.panel_width,
        )
    };

    let skipped_ranks = roster.unknown_ranks(|rank| taxonomy.contains(rank));
    if !skipped_ranks.is_empty() {
        tracing::debug!(?skipped_ranks, "roster ranks not in taxonomy, excluded");
    }

    let banner_text = TextStyle {
        font_family: Some(style.font_family.clone()),
        font_size: style.font_sizes.banner_label,
        font_weight: Some("bold".to_string()),
    };

    let mut rows: Vec<RowLayout> = Vec::new();
    let mut cursor = style.header_height + style.chart_top_padding;
    let mut content_height = 0.0;

    let present = taxonomy
        .ranks()
        .iter()
        .filter(|rank| rank.name != taxonomy.honorary_rank())
        .filter(|rank| !roster.members_of(&rank.name).is_empty());

    for rank in present {
        let members = roster.members_of(&rank.name);

        let banner = taxonomy.group_label_of(&rank.name).map(|label| {
            let metrics = options.text_measurer.measure(label, &banner_text);
            let pill_width = metrics.width + 2.0 * style.banner.pill_padding_x;
            let banner_y = cursor;
            BannerLayout {
                x: column_x,
                y: banner_y,
                width: column_width,
                height: style.banner.height,
                label: label.to_string(),
                pill: PillRect {
                    x: column_x + (column_width - pill_width) / 2.0,
                    y: banner_y + (style.banner.height - style.banner.pill_height) / 2.0,
                    width: pill_width,
                    height: style.banner.pill_height,
                },
            }
        });
        if banner.is_some() {
            cursor += style.banner.height;
            content_height += style.banner.height;
        }

        let count = members.len() as f64;
        let row_width = count * style.box_width + (count - 1.0) * style.box_gap;
        let start_x = column_x + (column_width - row_width) / 2.0;
        let row_y = cursor;

        // No inbound connector for the first visible row or for a row that opens a
        // sub-group; otherwise the source is the nearest prior non-empty rank, which is
        // simply the previous laid-out row.
        let connector = match rows.last() {
            Some(prev) if banner.is_none() => Some(connector_from(prev, style, members.len(), start_x, row_width, row_y)),
            _ => None,
        };

        let boxes = members
            .iter()
            .enumerate()
            .map(|(i, member)| BoxLayout {
                x: start_x + i as f64 * (style.box_width + style.box_gap),
                y: row_y,
                width: style.box_width,
                height: style.box_height,
                member: member.clone(),
            })
            .collect();

        rows.push(RowLayout {
            rank: rank.name.clone(),
            level: rank.level,
            banner,
            boxes,
            connector,
        });
        cursor += style.row_height;
        content_height += style.row_height;
    }

    // The honorary column is independent of the row cursor and of the height sum below; a
    // long honorary list can run past the canvas bottom (see DESIGN.md before changing).
    let honorary = if honorary_members.is_empty() {
        None
    } else {
        let card_x = (style.honorary.panel_width - style.honorary.card_width) / 2.0;
        let cards_top = style.header_height + style.honorary.title_height;
        Some(HonoraryPanelLayout {
            x: 0.0,
            width: style.honorary.panel_width,
            title: style.honorary.title.clone(),
            title_x: style.honorary.panel_width / 2.0,
            title_y: style.header_height
                + style.chart_top_padding
                + style.font_sizes.honorary_title,
            cards: honorary_members
                .iter()
                .enumerate()
                .map(|(i, member)| HonoraryCardLayout {
                    x: card_x,
                    y: cards_top
                        + i as f64 * (style.honorary.card_height + style.honorary.card_gap),
                    width: style.honorary.card_width,
                    height: style.honorary.card_height,
                    member: member.clone(),
                })
                .collect(),
        })
    };

    ChartLayout {
        canvas_width: style.canvas_width,
        canvas_height: style.header_height + content_height + style.footer_height,
        column_x,
        column_width,
        rows,
        honorary,
        skipped_ranks,
    }
}

fn connector_from(
    prev: &RowLayout,
    style: &ChartStyle,
    count: usize,
    start_x: f64,
    row_width: f64,
    row_y: f64,
) -> ConnectorLayout {
    let first = &prev.boxes[0];
    let last = &prev.boxes[prev.boxes.len() - 1];
    let stem_x = (first.x + last.x + last.width) / 2.0;

    let bus_y = row_y - style.connector.drop_offset;
    let bus = (count > 1).then(|| BusSegment {
        x1: start_x + style.box_width / 2.0,
        x2: start_x + row_width - style.box_width / 2.0,
        y: bus_y,
    });

    let drops = (0..count)
        .map(|i| DropSegment {
            x: start_x + i as f64 * (style.box_width + style.box_gap) + style.box_width / 2.0,
            y1: bus_y,
            y2: row_y,
        })
        .collect();

    ConnectorLayout {
        stem_x,
        stem_top: first.y + first.height,
        stem_bottom: row_y - style.connector.stem_gap,
        bus,
        drops,
    }
}
