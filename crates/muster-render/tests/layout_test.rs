use muster_core::{ChartStyle, Member, RankTaxonomy, Roster};
use muster_render::model::ChartLayout;
use muster_render::{LayoutOptions, layout_roster};

fn members(count: usize) -> Vec<Member> {
    (0..count)
        .map(|i| Member::new(format!("Member {i}"), format!("member{i}")))
        .collect()
}

fn roster_of(entries: &[(&str, usize)]) -> Roster {
    let mut roster = Roster::new();
    for (rank, count) in entries {
        roster.insert(*rank, members(*count));
    }
    roster
}

fn layout(roster: &Roster) -> ChartLayout {
    layout_roster(
        roster,
        &RankTaxonomy::default_rav(),
        &ChartStyle::default(),
        &LayoutOptions::default(),
    )
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "expected {b}, got {a}");
}

#[test]
fn scenario_a_single_rank_no_banner_no_connector() {
    let out = layout(&roster_of(&[("Phantom Leader", 1)]));
    assert_eq!(out.rows.len(), 1);

    let row = &out.rows[0];
    assert!(row.banner.is_none(), "Phantom Leader is not a group head");
    assert!(row.connector.is_none(), "first present rank has no inbound connector");
    assert_eq!(row.boxes.len(), 1);

    // header + one row + footer
    assert_close(out.canvas_height, 350.0 + 400.0 + 150.0);
}

#[test]
fn scenario_b_group_head_banner_then_connected_follower() {
    let out = layout(&roster_of(&[("Night Council", 1), ("Black Sigil", 1)]));
    assert_eq!(out.rows.len(), 2);

    let council = &out.rows[0];
    assert_eq!(
        council.banner.as_ref().map(|b| b.label.as_str()),
        Some("Management Team")
    );
    assert!(council.connector.is_none());

    let sigil = &out.rows[1];
    assert!(sigil.banner.is_none());
    let connector = sigil.connector.as_ref().expect("same-group follower connects");
    // Stem hangs from the council row's box-bottom center.
    let council_box = &council.boxes[0];
    assert_close(connector.stem_x, council_box.x + council_box.width / 2.0);
    assert_close(connector.stem_top, council_box.y + council_box.height);

    assert_close(
        out.canvas_height,
        350.0 + (110.0 + 400.0) + 400.0 + 150.0,
    );
}

#[test]
fn scenario_c_group_boundary_blocks_connector() {
    let out = layout(&roster_of(&[("Black Sigil", 1), ("Spectre", 1)]));
    assert_eq!(out.rows.len(), 2);

    assert!(out.rows[0].banner.is_none());
    assert!(out.rows[0].connector.is_none());

    let spectre = &out.rows[1];
    assert_eq!(
        spectre.banner.as_ref().map(|b| b.label.as_str()),
        Some("RAV Members")
    );
    assert!(
        spectre.connector.is_none(),
        "a rank opening a sub-group never receives an inbound connector"
    );
}

#[test]
fn scenario_d_honorary_only_roster() {
    let out = layout(&roster_of(&[("Honorary", 3)]));
    assert!(out.rows.is_empty());
    assert_close(out.canvas_height, 350.0 + 150.0);

    let panel = out.honorary.as_ref().expect("honorary panel present");
    assert_eq!(panel.cards.len(), 3);
    assert!(out.rows.iter().all(|r| r.connector.is_none()));
}

#[test]
fn empty_roster_yields_minimal_valid_layout() {
    let out = layout(&Roster::new());
    assert!(out.rows.is_empty());
    assert!(out.honorary.is_none());
    assert!(out.skipped_ranks.is_empty());
    assert_close(out.canvas_height, 500.0);
    assert_close(out.canvas_width, 10000.0);
}

#[test]
fn empty_rank_equals_absent_rank() {
    let with_empty = layout(&roster_of(&[("Spectre", 2), ("Dagger", 0)]));
    let without = layout(&roster_of(&[("Spectre", 2)]));
    assert_eq!(with_empty, without);
}

#[test]
fn unknown_ranks_are_excluded_and_reported() {
    let known = roster_of(&[("Spectre", 2)]);
    let mut with_stranger = known.clone();
    with_stranger.insert("Warlord", members(3));

    let out = layout(&with_stranger);
    assert_eq!(out.skipped_ranks, vec!["Warlord".to_string()]);
    assert_eq!(out.rows.len(), 1);
    assert_close(out.canvas_height, layout(&known).canvas_height);
}

#[test]
fn connector_skips_empty_ranks_to_nearest_prior_row() {
    // Revenant and Vantage are absent; Dagger still connects to Spectre's row.
    let out = layout(&roster_of(&[("Spectre", 2), ("Dagger", 1)]));
    assert_eq!(out.rows.len(), 2);

    let spectre = &out.rows[0];
    let dagger = &out.rows[1];
    assert!(dagger.banner.is_none());
    let connector = dagger.connector.as_ref().expect("connects across the gap");

    let first = &spectre.boxes[0];
    let last = &spectre.boxes[spectre.boxes.len() - 1];
    assert_close(connector.stem_x, (first.x + last.x + last.width) / 2.0);
    assert_close(connector.stem_top, first.y + first.height);
}

#[test]
fn banner_is_anchored_to_the_configured_group_head_only() {
    // The head rank (Spectre) is absent: the group banner does not migrate to Revenant.
    let out = layout(&roster_of(&[("Black Sigil", 1), ("Revenant", 1)]));
    let revenant = &out.rows[1];
    assert_eq!(revenant.rank, "Revenant");
    assert!(revenant.banner.is_none());
    // Without a group boundary banner the row connects upward as usual.
    assert!(revenant.connector.is_some());
}

#[test]
fn rows_center_exactly_in_the_chart_column() {
    let style = ChartStyle::default();

    // No honorary panel: the column is the full canvas.
    let out = layout(&roster_of(&[("Spectre", 3)]));
    let row = &out.rows[0];
    let row_width = 3.0 * style.box_width + 2.0 * style.box_gap;
    assert_close(row.boxes[0].x, (style.canvas_width - row_width) / 2.0);
    assert_close(
        row.boxes[1].x,
        row.boxes[0].x + style.box_width + style.box_gap,
    );

    // Single box: same formula, no asymmetry.
    let out = layout(&roster_of(&[("Spectre", 1)]));
    assert_close(
        out.rows[0].boxes[0].x,
        (style.canvas_width - style.box_width) / 2.0,
    );

    // Honorary panel present: the column shifts right by the panel width.
    let out = layout(&roster_of(&[("Honorary", 1), ("Spectre", 1)]));
    let col_x = style.honorary.panel_width;
    let col_w = style.canvas_width - style.honorary.panel_width;
    assert_close(out.column_x, col_x);
    assert_close(
        out.rows[0].boxes[0].x,
        col_x + (col_w - style.box_width) / 2.0,
    );
}

#[test]
fn bus_exists_only_for_multi_box_destinations() {
    let single = layout(&roster_of(&[("Night Council", 2), ("Black Sigil", 1)]));
    let connector = single.rows[1].connector.as_ref().unwrap();
    assert!(connector.bus.is_none());
    assert_eq!(connector.drops.len(), 1);

    let multi = layout(&roster_of(&[("Night Council", 1), ("Black Sigil", 3)]));
    let connector = multi.rows[1].connector.as_ref().unwrap();
    let boxes = &multi.rows[1].boxes;
    let bus = connector.bus.as_ref().expect("bus for 3-box row");
    assert_close(bus.x1, boxes[0].x + boxes[0].width / 2.0);
    assert_close(bus.x2, boxes[2].x + boxes[2].width / 2.0);
    assert_eq!(connector.drops.len(), 3);
    for (drop, bx) in connector.drops.iter().zip(boxes) {
        assert_close(drop.x, bx.x + bx.width / 2.0);
        assert_close(drop.y2, bx.y);
    }
}

#[test]
fn levels_come_from_configuration_not_position() {
    // Every higher rank is absent; Spectre still reports its configured level 4.
    let out = layout(&roster_of(&[("Spectre", 1)]));
    assert_eq!(out.rows[0].level, 4);

    let out = layout(&roster_of(&[("Neophyte", 1)]));
    assert_eq!(out.rows[0].level, 0);

    // The ladder's gap at level 5 (honorary) stays a gap.
    let out = layout(&roster_of(&[("Black Sigil", 1), ("Spectre", 1)]));
    assert_eq!(out.rows[0].level, 6);
    assert_eq!(out.rows[1].level, 4);
}

#[test]
fn canvas_height_grows_monotonically_with_content() {
    let ladder = [
        "Vanguard Supreme",
        "Phantom Leader",
        "Phantom Regent",
        "Night Council",
        "Black Sigil",
        "Spectre",
        "Revenant",
        "Vantage",
        "Dagger",
        "Neophyte",
    ];
    let mut entries: Vec<(&str, usize)> = Vec::new();
    let mut last_height = layout(&Roster::new()).canvas_height;
    for rank in ladder {
        entries.push((rank, 2));
        let height = layout(&roster_of(&entries)).canvas_height;
        assert!(
            height > last_height,
            "adding non-empty rank {rank} must grow the canvas"
        );
        last_height = height;
    }
}

#[test]
fn banner_pill_wraps_the_measured_label() {
    let style = ChartStyle::default();
    let out = layout(&roster_of(&[("Night Council", 1)]));
    let banner = out.rows[0].banner.as_ref().unwrap();

    // DeterministicTextMeasurer: cells * font_size * 0.6.
    let label_width = "Management Team".chars().count() as f64
        * style.font_sizes.banner_label
        * 0.6;
    let pill_width = label_width + 2.0 * style.banner.pill_padding_x;
    assert_close(banner.pill.width, pill_width);
    assert_close(banner.pill.x, (style.canvas_width - pill_width) / 2.0);
    assert_close(banner.x, 0.0);
    assert_close(banner.width, style.canvas_width);
}

#[test]
fn honorary_column_height_is_independent_of_canvas_height() {
    // Pinned behavior: the honorary column does not contribute to canvas height, so a long
    // honorary list runs past the canvas bottom. Revisit DESIGN.md before "fixing" this.
    let short = layout(&roster_of(&[("Honorary", 1)]));
    let long = layout(&roster_of(&[("Honorary", 12)]));
    assert_close(short.canvas_height, long.canvas_height);

    let bottom = long.honorary_bottom().unwrap();
    assert!(
        bottom > long.canvas_height,
        "twelve honorary cards overflow the header+footer canvas"
    );
}

#[test]
fn honorary_members_never_join_the_hierarchy() {
    let out = layout(&roster_of(&[
        ("Night Council", 1),
        ("Honorary", 2),
        ("Black Sigil", 1),
    ]));
    assert_eq!(out.rows.len(), 2);
    assert!(out.rows.iter().all(|r| r.rank != "Honorary"));
    assert_eq!(out.honorary.as_ref().unwrap().cards.len(), 2);

    // Honorary cards sit in the left panel, clear of the chart column.
    for card in &out.honorary.as_ref().unwrap().cards {
        assert!(card.x + card.width <= out.column_x);
    }
}

#[test]
fn layout_is_deterministic() {
    let roster = roster_of(&[("Night Council", 2), ("Black Sigil", 3), ("Honorary", 1)]);
    assert_eq!(layout(&roster), layout(&roster));
}

#[test]
fn layout_serializes_for_snapshotting() {
    let out = layout(&roster_of(&[("Night Council", 1), ("Black Sigil", 2)]));
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["rows"][0]["rank"], "Night Council");
    assert_eq!(value["rows"][0]["banner"]["label"], "Management Team");
    assert_eq!(value["rows"][1]["connector"]["drops"].as_array().unwrap().len(), 2);
    assert!(value["honorary"].is_null());

    let back: ChartLayout = serde_json::from_value(value).unwrap();
    assert_eq!(back, out);
}
