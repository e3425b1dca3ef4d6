//! Integration tests for declaration block serialization.

use petrel_css::DeclarationBlock;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

fn minified(css: &str) -> String {
    petrel_common::warning::set_quiet(true);
    DeclarationBlock::parse(css).minified_css_text()
}

fn formatted(css: &str) -> String {
    petrel_common::warning::set_quiet(true);
    DeclarationBlock::parse(css).css_text()
}

#[test]
fn test_hack_blocks_animation_shorthand() {
    let css = r"animation-duration: 3200ms; animation-delay:1s; animation-fill-mode:none; animation-name:foo\9;";
    assert_eq!(
        minified(css),
        r"animation-delay:1s;animation-duration:3200ms;animation-fill-mode:none;animation-name:foo\9;"
    );
}

#[test]
fn test_four_paddings_collapse() {
    let css = "padding-top: 1px; padding-right: 2px; padding-bottom: 3px; padding-left: 4px";
    assert_eq!(minified(css), "padding:1px 2px 3px 4px;");
    assert_eq!(minified("padding:1px 2px 3px 4px;"), "padding:1px 2px 3px 4px;");
}

#[test]
fn test_important_longhand_split_from_shorthand() {
    assert_eq!(
        minified("padding:0 2px 3px 4px;padding-top:5px!important;"),
        "padding:0 2px 3px 4px;padding-top:5px!important;"
    );
    assert_eq!(
        formatted("padding:0 2px 3px 4px;padding-top:5px!important;"),
        "padding: 0 2px 3px 4px;\npadding-top: 5px !important;"
    );
}

#[test]
fn test_background_excess_sizes_unused() {
    let css = "background: url('bkg.png') no-repeat; background-size: 150px, 150px; background-position: 0 0;";
    assert_eq!(minified(css), "background:url('bkg.png') 0 0/150px no-repeat;");
    assert_eq!(
        minified("background:url('bkg.png') 0 0/150px no-repeat;"),
        "background:url('bkg.png') 0 0/150px no-repeat;"
    );
}

#[test]
fn test_grid_area_auto() {
    let css = "grid-row-start: auto; grid-row-end: auto; grid-column-start: auto; grid-column-end: auto;";
    assert_eq!(minified(css), "grid-area:auto;");
    assert_eq!(minified("grid-area:auto;"), "grid-area:auto;");
}

#[test]
fn test_priority_tie_keeps_longhands() {
    let css = "margin-top:1px!important;margin-right:1px!important;margin-bottom:1px;margin-left:1px";
    assert_eq!(
        minified(css),
        "margin-top:1px!important;margin-right:1px!important;margin-bottom:1px;margin-left:1px;"
    );
}

#[test]
fn test_hack_value_follows_shorthand() {
    let css = r"margin: 1px; margin-left: 2px\9";
    assert_eq!(minified(css), r"margin:1px 1px 1px 0;margin-left:2px\9;");
    let reparsed = DeclarationBlock::parse(&minified(css));
    assert!(reparsed.equivalent(&DeclarationBlock::parse(css)));
}

#[test]
fn test_unaligned_layers_stay_longhands() {
    let css = "background: url(a.png), url(b.png); background-size: 1px, 2px, 3px";
    let text = minified(css);
    assert!(!text.contains("background:"), "{text}");
    assert!(text.contains("background-size:1px,2px,3px;"), "{text}");
    assert!(DeclarationBlock::parse(&text).equivalent(&DeclarationBlock::parse(css)));
}

fn reparses_equivalent(css: &str, text: &str) -> bool {
    DeclarationBlock::parse(text).equivalent(&DeclarationBlock::parse(css))
}

#[test]
fn test_font_longhands_without_resets_stay_longhands() {
    let css = "font-style: normal; font-variant-caps: normal; font-weight: bold; font-stretch: normal; \
               font-size: 12px; line-height: 1.5; font-family: Arial";
    let text = minified(css);
    assert!(!text.contains("font:"), "{text}");
    assert!(reparses_equivalent(css, &text), "{text}");
}

#[test]
fn test_border_sides_without_border_image_stay_narrow() {
    let css = "border-top: 1px solid red; border-right: 1px solid red; \
               border-bottom: 1px solid red; border-left: 1px solid red";
    let text = minified(css);
    assert_eq!(text, "border-width:1px;border-style:solid;border-color:red;");
    assert!(reparses_equivalent(css, &text));
}

#[test]
fn test_uncarried_values_follow_shorthand() {
    let css = "background: url(a.png); background-size: foo";
    let text = minified(css);
    assert_eq!(text, "background:url(a.png);background-size:foo;");
    assert!(reparses_equivalent(css, &text));

    let css = "font: 12px serif; font-kerning: none";
    let text = minified(css);
    assert_eq!(text, "font:12px serif;font-kerning:none;");
    assert!(reparses_equivalent(css, &text));
}

#[test]
fn test_font_keywords() {
    assert_eq!(minified("font: inherit"), "font:inherit;");

    let css = "font: 12px serif; font-size: inherit";
    let text = minified(css);
    assert!(!text.contains("font:"), "{text}");
    assert!(text.contains("font-size:inherit;"), "{text}");
    let names: Vec<&str> = text
        .split(';')
        .filter_map(|declaration| declaration.split(':').next())
        .filter(|name| !name.is_empty())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 16);
    assert!(reparses_equivalent(css, &text));
}

#[test]
fn test_slash_spacing_follows_mode() {
    let css = "font: bold 12px/1.5 Arial";
    assert_eq!(formatted(css), "font: bold 12px / 1.5 Arial;");
    assert_eq!(minified(css), "font:bold 12px/1.5 Arial;");
}

#[test]
fn test_background_svg_boxes() {
    let css = "background: url(a.png) fill-box border-box";
    let block = DeclarationBlock::parse(css);
    assert_eq!(block.get_property_value("background-origin"), "fill-box");
    assert_eq!(block.get_property_value("background-clip"), "border-box");
    assert_eq!(minified(css), "background:url(a.png) fill-box border-box;");
}

#[test]
fn test_round_trip_is_stable() {
    let inputs = [
        "color: red; width: 10px !important",
        "margin: 0 auto; padding: 0px 0",
        "border: 1px solid red",
        "border-top: 1px solid red; border-right: 2px solid red",
        "border-top-width: 2px; border-top: var(--b); border-top-color: red",
        "border: var(--a); border-top: var(--b)",
        "flex: var(--f); flex-grow: 2",
        "flex-grow: 0; flex-shrink: 0; flex-basis: auto",
        "--Brand: Blue; color: var(--Brand)",
        "margin-top: inherit; margin-right: inherit; margin-bottom: inherit; margin-left: inherit",
        "list-style-type: inherit; list-style-position: inside; list-style-image: none",
        r"color: red\9; width: 1px",
    ];
    for css in inputs {
        let block = DeclarationBlock::parse(css);
        for text in [block.css_text(), block.minified_css_text()] {
            let reparsed = DeclarationBlock::parse(&text);
            assert!(reparsed.equivalent(&block), "{css:?} -> {text:?}");
            assert_eq!(reparsed.css_text(), block.css_text(), "{css:?}");
        }
    }
}

#[test]
fn test_threads_serialize_independent_blocks() {
    let inputs = [
        ("padding: 1px 2px", "padding:1px 2px;"),
        ("margin: 0; margin-left: 1px !important", "margin:0;margin-left:1px!important;"),
        ("grid-area: auto", "grid-area:auto;"),
        ("color: RED", "color:red;"),
    ];
    petrel_common::warning::set_quiet(true);
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|&(css, expected)| {
                scope.spawn(move || {
                    let block = DeclarationBlock::parse(css);
                    for _ in 0..50 {
                        assert_eq!(block.minified_css_text(), expected);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
}

/// One value accepted by every `margin-*` longhand.
#[derive(Debug, Clone)]
struct Edge(&'static str);

impl Arbitrary for Edge {
    fn arbitrary(g: &mut Gen) -> Self {
        let choices = ["0", "0px", "1px", "2em", "5%", "auto", "1.50px", "-3px"];
        Self(g.choose(&choices).copied().unwrap_or("0"))
    }
}

fn edges_block(edges: &[Edge; 4]) -> String {
    let [top, right, bottom, left] = edges;
    format!(
        "margin-top: {}; margin-right: {}; margin-bottom: {}; margin-left: {}",
        top.0, right.0, bottom.0, left.0
    )
}

#[quickcheck]
fn prop_box_edges_keep_exact_tokens(top: Edge, right: Edge, bottom: Edge, left: Edge) -> bool {
    let edges = [top, right, bottom, left];
    let block = DeclarationBlock::parse(&edges_block(&edges));
    let text = block.minified_css_text();
    let reparsed = DeclarationBlock::parse(&text);
    let names = ["margin-top", "margin-right", "margin-bottom", "margin-left"];
    text.starts_with("margin:")
        && names
            .iter()
            .zip(&edges)
            .all(|(name, edge)| reparsed.get_property_value(name) == edge.0)
}

#[quickcheck]
fn prop_minified_text_is_a_fixed_point(top: Edge, right: Edge, bottom: Edge, left: Edge) -> bool {
    let block = DeclarationBlock::parse(&edges_block(&[top, right, bottom, left]));
    let once = block.minified_css_text();
    let twice = DeclarationBlock::parse(&once).minified_css_text();
    once == twice
}
