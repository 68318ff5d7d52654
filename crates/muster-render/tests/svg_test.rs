use muster_core::{ChartStyle, Member, RankTaxonomy, RenderMeta, Roster};
use muster_render::svg::{SvgRenderOptions, render_chart_svg};
use muster_render::{LayoutOptions, layout_roster};

fn meta() -> RenderMeta {
    RenderMeta {
        total_members: 4,
        updated_at: "09/03/2025 21:05".to_string(),
        generated_on: "09/03/2025".to_string(),
    }
}

fn sample_roster() -> Roster {
    let mut roster = Roster::new();
    roster.insert(
        "Phantom Leader",
        vec![Member::new("Bob", "bob")],
    );
    roster.insert(
        "Night Council",
        vec![
            Member::new("Ada Lovelace", "ada"),
            Member::new("Grace Hopper", "grace"),
        ],
    );
    roster.insert("Honorary", vec![Member::new("Old Guard", "oldguard")]);
    roster
}

fn render(roster: &Roster, logo: Option<&[u8]>) -> String {
    let taxonomy = RankTaxonomy::default_rav();
    let style = ChartStyle::default();
    let layout = layout_roster(roster, &taxonomy, &style, &LayoutOptions::default());
    render_chart_svg(&layout, &style, &meta(), logo, &SvgRenderOptions::default())
}

#[test]
fn full_chart_contains_every_painted_section() {
    let svg = render(&sample_roster(), None);

    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("linearGradient"));
    assert!(svg.contains("RAV ROSTER"));
    assert!(svg.contains("Active members: 4 | Updated: 09/03/2025 21:05"));
    assert!(svg.contains("Management Team"));
    assert!(svg.contains("PHANTOM LEADER"));
    assert!(svg.contains("@bob"));
    assert!(svg.contains("LVL 9"));
    assert!(svg.contains("HONORARY"));
    assert!(svg.contains("@oldguard"));
    assert!(svg.contains("Generated by RAV Roster Bot"));
    assert!(svg.contains("Generated on 09/03/2025"));
}

#[test]
fn output_is_byte_identical_for_identical_inputs() {
    let roster = sample_roster();
    assert_eq!(render(&roster, None), render(&roster, None));
}

#[test]
fn every_text_element_carries_its_own_complete_style() {
    // Each paint op must be self-contained: nothing inherits font or fill from a previous
    // draw, so reordering elements can never change their appearance.
    let svg = render(&sample_roster(), None);
    for element in svg.split("<text ").skip(1) {
        let attrs = element.split('>').next().unwrap();
        assert!(attrs.contains("font-family="), "missing font-family: {attrs}");
        assert!(attrs.contains("font-size="), "missing font-size: {attrs}");
        assert!(attrs.contains("fill="), "missing fill: {attrs}");
        assert!(attrs.contains("text-anchor="), "missing anchor: {attrs}");
    }
}

#[test]
fn long_names_are_truncated_with_an_ellipsis() {
    let mut roster = Roster::new();
    roster.insert(
        "Spectre",
        vec![Member::new(
            "An Extremely Long Member Name",
            "a_very_long_username_indeed",
        )],
    );
    let svg = render(&roster, None);

    assert!(!svg.contains("An Extremely Long Member Name"));
    assert!(svg.contains('\u{2026}'));
    // 20-char budget: the first 18 chars kept (trailing space included) + ellipsis.
    assert!(svg.contains("An Extremely Long \u{2026}"));
}

#[test]
fn logo_is_embedded_only_when_supplied() {
    let roster = sample_roster();
    let without = render(&roster, None);
    assert!(!without.contains("<image "));

    let with = render(&roster, Some(&b"\x89PNG\r\n\x1a\nfake"[..]));
    assert!(with.contains("<image "));
    assert!(with.contains("data:image/png;base64,"));
}

#[test]
fn unknown_ranks_never_reach_the_canvas() {
    let mut roster = sample_roster();
    roster.insert("Warlord", vec![Member::new("Stranger", "stranger")]);
    let svg = render(&roster, None);
    assert!(!svg.contains("WARLORD"));
    assert!(!svg.contains("@stranger"));
}

#[test]
fn empty_roster_renders_header_and_footer_only() {
    let svg = render(&Roster::new(), None);
    assert!(svg.contains("RAV ROSTER"));
    assert!(svg.contains("Generated on 09/03/2025"));
    assert!(!svg.contains("LVL "));
    // No member cards: the badge strip color never appears.
    assert!(!svg.contains("#7da5a8"));
}

#[test]
fn member_names_are_escaped_for_xml() {
    let mut roster = Roster::new();
    roster.insert("Spectre", vec![Member::new("R&B <Crew>", "amp")]);
    let svg = render(&roster, None);
    assert!(svg.contains("R&amp;B &lt;Crew&gt;"));
    assert!(!svg.contains("R&B <Crew>"));
}

#[test]
fn connector_lines_use_the_connector_stroke() {
    let mut roster = Roster::new();
    roster.insert("Night Council", vec![Member::new("A", "a")]);
    roster.insert("Black Sigil", vec![Member::new("B", "b"), Member::new("C", "c")]);

    let taxonomy = RankTaxonomy::default_rav();
    let style = ChartStyle::default();
    let layout = layout_roster(&roster, &taxonomy, &style, &LayoutOptions::default());
    let connector = layout.rows[1].connector.as_ref().unwrap();
    assert!(connector.bus.is_some());

    let svg = render_chart_svg(&layout, &style, &meta(), None, &SvgRenderOptions::default());
    // stem + bus + two drops, all stroked at the connector width.
    assert_eq!(svg.matches(r#"stroke-width="8""#).count(), 4);
}

#[test]
fn shadows_can_be_disabled() {
    let taxonomy = RankTaxonomy::default_rav();
    let style = ChartStyle::default();
    let roster = sample_roster();
    let layout = layout_roster(&roster, &taxonomy, &style, &LayoutOptions::default());

    let options = SvgRenderOptions {
        include_shadows: false,
        ..SvgRenderOptions::default()
    };
    let svg = render_chart_svg(&layout, &style, &meta(), None, &options);
    assert!(!svg.contains(r#"fill-opacity="0.6""#));
}
