//! Value grammar predicates.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! These answer "could this component be a `<length>`?" style questions.
//! Shorthand expansion uses them to assign components to longhands, and the
//! shorthand builders use them as a late sanity check before merging a
//! stored longhand into a shorthand. They never compute anything.

use crate::parser::ComponentValue;
use crate::tokenizer::{CSSToken, NumericType};

use super::{GlobalKeyword, atoms};

/// [§ 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)
const MATH_FUNCTIONS: &[&str] = &[
    "calc", "min", "max", "clamp", "round", "mod", "rem", "abs", "sign", "sin", "cos", "tan", "asin", "acos",
    "atan", "atan2", "pow", "sqrt", "hypot", "log", "exp",
];

/// [§ 6.1 Relative Lengths](https://www.w3.org/TR/css-values-4/#relative-lengths) and
/// [§ 6.2 Absolute Lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "rex", "cap", "rcap", "ch", "rch", "ic", "ric", "lh", "rlh", "vw", "vh", "vi", "vb",
    "vmin", "vmax", "svw", "svh", "svi", "svb", "svmin", "svmax", "lvw", "lvh", "lvi", "lvb", "lvmin", "lvmax",
    "dvw", "dvh", "dvi", "dvb", "dvmin", "dvmax", "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax", "cm", "mm", "q",
    "in", "pt", "pc",
];

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// "CSS defines a large set of named colors, so that common colors can be
/// written and read more easily."
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black", "blanchedalmond",
    "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue",
    "cornsilk", "crimson", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey",
    "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia",
    "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow", "grey", "honeydew", "hotpink",
    "indianred", "indigo", "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon",
    "lightblue", "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey",
    "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue", "mediumspringgreen",
    "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod", "palegreen",
    "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple",
    "rebeccapurple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// [§ 6.2 System Colors](https://www.w3.org/TR/css-color-4/#css-system-colors) plus
/// `transparent` and `currentcolor`.
const SPECIAL_COLORS: &[&str] = &[
    "transparent", "currentcolor", "canvas", "canvastext", "linktext", "visitedtext", "activetext", "buttonface",
    "buttontext", "buttonborder", "field", "fieldtext", "highlight", "highlighttext", "selecteditem",
    "selecteditemtext", "mark", "marktext", "graytext", "accentcolor", "accentcolortext",
];

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color", "color-mix", "light-dark",
    "contrast-color",
];

const IMAGE_FUNCTIONS: &[&str] = &[
    "url", "src", "image", "image-set", "cross-fade", "element", "paint", "linear-gradient", "radial-gradient",
    "conic-gradient", "repeating-linear-gradient", "repeating-radial-gradient", "repeating-conic-gradient",
    "-webkit-image-set", "-webkit-gradient", "-webkit-linear-gradient", "-webkit-radial-gradient",
    "-webkit-repeating-linear-gradient", "-webkit-repeating-radial-gradient", "-moz-linear-gradient",
    "-moz-radial-gradient", "-moz-repeating-linear-gradient", "-moz-repeating-radial-gradient",
    "-o-linear-gradient",
];

/// [§ 3.2 Line styles](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-style)
const LINE_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// [§ 7.1 Easing functions](https://www.w3.org/TR/css-easing-1/#typedef-easing-function)
const EASING_KEYWORDS: &[&str] = &["linear", "ease", "ease-in", "ease-out", "ease-in-out", "step-start", "step-end"];

const EASING_FUNCTIONS: &[&str] = &["linear", "cubic-bezier", "steps", "frames"];

fn is_keyword_in(value: &ComponentValue, keywords: &[&str]) -> bool {
    value
        .as_ident()
        .is_some_and(|ident| keywords.iter().any(|k| ident.eq_ignore_ascii_case(k)))
}

fn is_function_in(value: &ComponentValue, names: &[&str]) -> bool {
    value
        .function_name()
        .is_some_and(|name| names.iter().any(|n| name.eq_ignore_ascii_case(n)))
}

/// True for a math function such as `calc()` or `clamp()`, whose type is
/// only known after evaluation.
#[must_use]
pub fn is_math_function(value: &ComponentValue) -> bool {
    is_function_in(value, MATH_FUNCTIONS)
}

/// [§ 5.3 Numbers](https://www.w3.org/TR/css-values-4/#numbers)
#[must_use]
pub fn is_number(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::Number(_))) || is_math_function(value)
}

/// A `<number>` that is not negative.
#[must_use]
pub fn is_non_negative_number(value: &ComponentValue) -> bool {
    match value {
        ComponentValue::Token(CSSToken::Number(n)) => n.value >= 0.0,
        other => is_math_function(other),
    }
}

/// [§ 5.2 Integers](https://www.w3.org/TR/css-values-4/#integers)
#[must_use]
pub fn is_integer(value: &ComponentValue) -> bool {
    match value {
        ComponentValue::Token(CSSToken::Number(n)) => n.numeric_type == NumericType::Integer,
        other => is_math_function(other),
    }
}

/// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// "For zero lengths the unit identifier is optional (i.e. can be
/// syntactically represented as the <number> 0)."
#[must_use]
pub fn is_length(value: &ComponentValue) -> bool {
    match value {
        ComponentValue::Token(CSSToken::Dimension { unit, .. }) => {
            LENGTH_UNITS.iter().any(|u| unit.eq_ignore_ascii_case(u))
        }
        ComponentValue::Token(CSSToken::Number(n)) => n.value == 0.0,
        other => is_math_function(other),
    }
}

/// [§ 5.5 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
#[must_use]
pub fn is_percentage(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::Percentage(_))) || is_math_function(value)
}

/// `<length-percentage>`
#[must_use]
pub fn is_length_percentage(value: &ComponentValue) -> bool {
    is_length(value) || is_percentage(value)
}

/// `<length-percentage> | auto`
#[must_use]
pub fn is_length_percentage_or_auto(value: &ComponentValue) -> bool {
    is_length_percentage(value) || value.is_ident("auto")
}

/// [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
#[must_use]
pub fn is_time(value: &ComponentValue) -> bool {
    match value {
        ComponentValue::Token(CSSToken::Dimension { unit, .. }) => {
            unit.eq_ignore_ascii_case("s") || unit.eq_ignore_ascii_case("ms")
        }
        other => is_math_function(other),
    }
}

/// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
#[must_use]
pub fn is_angle(value: &ComponentValue) -> bool {
    match value {
        ComponentValue::Token(CSSToken::Dimension { unit, .. }) => {
            ["deg", "grad", "rad", "turn"].iter().any(|u| unit.eq_ignore_ascii_case(u))
        }
        other => is_math_function(other),
    }
}

/// [§ 4 Representing Colors](https://www.w3.org/TR/css-color-4/#color-type)
#[must_use]
pub fn is_color(value: &ComponentValue) -> bool {
    match value {
        ComponentValue::Token(CSSToken::Hash { value, .. }) => {
            matches!(value.len(), 3 | 4 | 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit())
        }
        ComponentValue::Token(CSSToken::Ident(_)) => {
            is_keyword_in(value, NAMED_COLORS) || is_keyword_in(value, SPECIAL_COLORS)
        }
        other => is_function_in(other, COLOR_FUNCTIONS),
    }
}

/// [§ 2.4 Image Values](https://www.w3.org/TR/css-images-3/#image-values)
#[must_use]
pub fn is_image(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::Url(_))) || is_function_in(value, IMAGE_FUNCTIONS)
}

/// `none | <image>`
#[must_use]
pub fn is_image_or_none(value: &ComponentValue) -> bool {
    value.is_ident("none") || is_image(value)
}

/// `<line-style>`
#[must_use]
pub fn is_line_style(value: &ComponentValue) -> bool {
    is_keyword_in(value, LINE_STYLES)
}

/// [§ 3.3 Line widths](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-width)
///
/// `<line-width> = <length [0,∞]> | thin | medium | thick`
#[must_use]
pub fn is_line_width(value: &ComponentValue) -> bool {
    is_length(value) || is_keyword_in(value, &["thin", "medium", "thick"])
}

/// `<easing-function>`
#[must_use]
pub fn is_easing(value: &ComponentValue) -> bool {
    is_keyword_in(value, EASING_KEYWORDS) || is_function_in(value, EASING_FUNCTIONS)
}

/// `<visual-box>` for `background-origin` and `background-clip`.
#[must_use]
pub fn is_box(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["border-box", "padding-box", "content-box"])
}

/// `<coord-box>`: the origin and clip boxes of both `background` and `mask`
/// layers. The SVG boxes are accepted in the shorthands because the
/// longhands accept them too.
#[must_use]
pub fn is_coord_box(value: &ComponentValue) -> bool {
    is_box(value) || is_keyword_in(value, &["fill-box", "stroke-box", "view-box"])
}

/// Components valid only in a `*-clip` position: `text` for backgrounds,
/// `no-clip` for masks.
#[must_use]
pub fn is_clip_only_box(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["text", "no-clip"])
}

/// `<repeat-style>` single keyword.
#[must_use]
pub fn is_repeat_keyword(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["repeat", "space", "round", "no-repeat"])
}

/// `repeat-x | repeat-y`, which cannot pair with a second keyword.
#[must_use]
pub fn is_repeat_axis(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["repeat-x", "repeat-y"])
}

/// `<attachment>`
#[must_use]
pub fn is_attachment(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["scroll", "fixed", "local"])
}

/// `<compositing-operator>` for `mask-composite`.
#[must_use]
pub fn is_composite(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["add", "subtract", "intersect", "exclude"])
}

/// `<masking-mode>` for `mask-mode`.
#[must_use]
pub fn is_mask_mode(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["alpha", "luminance", "match-source"])
}

/// [§ 3.4 Positions](https://www.w3.org/TR/css-values-4/#position) component.
#[must_use]
pub fn is_position_component(value: &ComponentValue) -> bool {
    is_length_percentage(value) || is_keyword_in(value, &["left", "right", "center", "top", "bottom"])
}

/// A full `<bg-position>`: one to four position components.
#[must_use]
pub fn is_position(values: &[&ComponentValue]) -> bool {
    (1..=4).contains(&values.len()) && values.iter().all(|v| is_position_component(v))
}

/// `<bg-size> = [ <length-percentage [0,∞]> | auto ]{1,2} | cover | contain`
#[must_use]
pub fn is_bg_size(values: &[&ComponentValue]) -> bool {
    match values {
        [single] => single.is_ident("cover") || single.is_ident("contain") || is_length_percentage_or_auto(single),
        [a, b] => is_length_percentage_or_auto(a) && is_length_percentage_or_auto(b),
        _ => false,
    }
}

/// `<repeat-style>`
#[must_use]
pub fn is_repeat_style(values: &[&ComponentValue]) -> bool {
    match values {
        [single] => is_repeat_axis(single) || is_repeat_keyword(single),
        [a, b] => is_repeat_keyword(a) && is_repeat_keyword(b),
        _ => false,
    }
}

/// [§ 4.2 Custom identifiers](https://www.w3.org/TR/css-values-4/#custom-idents)
///
/// "The CSS-wide keywords are not valid <custom-ident>s. The default keyword
/// is reserved and is also not a valid <custom-ident>."
#[must_use]
pub fn is_custom_ident(value: &ComponentValue) -> bool {
    value
        .as_ident()
        .is_some_and(|ident| GlobalKeyword::from_ident(ident).is_none() && !ident.eq_ignore_ascii_case("default"))
}

/// True for a `<string-token>`.
#[must_use]
pub const fn is_string(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::String(_)))
}

/// [§ 8.3 grid-row-start](https://www.w3.org/TR/css-grid-2/#line-placement)
///
/// `<grid-line> = auto | <custom-ident> | [ <integer> && <custom-ident>? ] |
/// [ span && [ <integer [1,∞]> || <custom-ident> ] ]`
#[must_use]
pub fn is_grid_line(values: &[&ComponentValue]) -> bool {
    match values {
        [single] => single.is_ident("auto") || is_grid_line_ident(single) || is_integer(single),
        _ if values.len() > 3 => false,
        _ => {
            let spans = values.iter().filter(|v| v.is_ident("span")).count();
            let integers = values.iter().filter(|v| is_integer(v)).count();
            let idents = values.iter().filter(|v| is_grid_line_ident(v)).count();
            spans <= 1 && integers <= 1 && idents <= 1 && spans + integers + idents == values.len()
        }
    }
}

/// A `<custom-ident>` usable as a grid line name (`span` and `auto` excluded).
#[must_use]
pub fn is_grid_line_ident(value: &ComponentValue) -> bool {
    is_custom_ident(value) && !value.is_ident("span") && !value.is_ident("auto")
}

/// `<track-size>` or `<track-repeat>` or a `[line-names]` block.
#[must_use]
pub fn is_track_component(value: &ComponentValue) -> bool {
    is_track_size(value) || is_function_in(value, &["repeat"]) || is_line_names(value)
}

/// `<track-size>`: `<track-breadth> | minmax() | fit-content()`
#[must_use]
pub fn is_track_size(value: &ComponentValue) -> bool {
    is_length_percentage(value)
        || is_flex(value)
        || is_keyword_in(value, &["auto", "min-content", "max-content"])
        || is_function_in(value, &["minmax", "fit-content"])
}

/// `<flex>` track breadth (`1fr`).
#[must_use]
pub fn is_flex(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::Dimension { unit, .. }) if unit.eq_ignore_ascii_case("fr"))
}

/// `[ <custom-ident>* ]`
#[must_use]
pub fn is_line_names(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Block { token: '[', value } if atoms(value).iter().all(|v| is_custom_ident(v)))
}

/// `none | <track-list> | <auto-track-list> | subgrid <line-name-list>?`
#[must_use]
pub fn is_track_list(values: &[&ComponentValue]) -> bool {
    match values {
        [] => false,
        [single] if single.is_ident("none") => true,
        [first, rest @ ..] if first.is_ident("subgrid") => rest.iter().all(|v| is_line_names(v)),
        _ => values.iter().all(|v| is_track_component(v)),
    }
}

/// `<font-weight-absolute> | bolder | lighter`
#[must_use]
pub fn is_font_weight(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["normal", "bold", "bolder", "lighter"])
        || matches!(value, ComponentValue::Token(CSSToken::Number(n)) if (1.0..=1000.0).contains(&n.value))
        || is_math_function(value)
}

/// `<font-stretch-absolute>` keywords.
#[must_use]
pub fn is_font_stretch_keyword(value: &ComponentValue) -> bool {
    is_keyword_in(
        value,
        &[
            "normal",
            "ultra-condensed",
            "extra-condensed",
            "condensed",
            "semi-condensed",
            "semi-expanded",
            "expanded",
            "extra-expanded",
            "ultra-expanded",
        ],
    )
}

/// `font-size`: `<absolute-size> | <relative-size> | <length-percentage [0,∞]> | math`
#[must_use]
pub fn is_font_size(value: &ComponentValue) -> bool {
    is_length_percentage(value)
        || is_keyword_in(
            value,
            &[
                "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large", "larger",
                "smaller", "math",
            ],
        )
}

/// `line-height`: `normal | <number> | <length-percentage>`
#[must_use]
pub fn is_line_height(value: &ComponentValue) -> bool {
    value.is_ident("normal") || is_non_negative_number(value) || is_length_percentage(value)
}

/// `font-family`: a comma-separated list of strings or identifier sequences.
#[must_use]
pub fn is_font_family(values: &[ComponentValue]) -> bool {
    super::split_commas(values).into_iter().all(|family| {
        let parts = atoms(family);
        match parts.as_slice() {
            [] => false,
            [single] => is_string(single) || is_custom_ident(single),
            _ => parts.iter().all(|v| is_custom_ident(v)),
        }
    })
}

/// `font-style`: `normal | italic | oblique <angle>?`
#[must_use]
pub fn is_font_style(values: &[&ComponentValue]) -> bool {
    match values {
        [single] => is_keyword_in(single, &["normal", "italic", "oblique"]),
        [oblique, angle] => oblique.is_ident("oblique") && is_angle(angle),
        _ => false,
    }
}

/// Animation `<single-animation-iteration-count>`.
#[must_use]
pub fn is_iteration_count(value: &ComponentValue) -> bool {
    value.is_ident("infinite") || is_non_negative_number(value)
}

/// Animation `<single-animation-direction>`.
#[must_use]
pub fn is_animation_direction(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["normal", "reverse", "alternate", "alternate-reverse"])
}

/// Animation `<single-animation-fill-mode>`.
#[must_use]
pub fn is_fill_mode(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["none", "forwards", "backwards", "both"])
}

/// Animation `<single-animation-play-state>`.
#[must_use]
pub fn is_play_state(value: &ComponentValue) -> bool {
    is_keyword_in(value, &["running", "paused"])
}

/// `<keyframes-name>`: `<custom-ident> | <string>`
#[must_use]
pub fn is_keyframes_name(value: &ComponentValue) -> bool {
    is_string(value) || is_custom_ident(value)
}

/// `<single-transition-property>`: `all | <custom-ident>`
#[must_use]
pub fn is_transition_property(value: &ComponentValue) -> bool {
    is_custom_ident(value)
}

/// True if every component of `values` (whitespace skipped) satisfies
/// `pred` and there is exactly one such component.
pub fn is_single(values: &[ComponentValue], pred: impl Fn(&ComponentValue) -> bool) -> bool {
    matches!(atoms(values).as_slice(), [single] if pred(single))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{PropertyValue, normalize};
    use crate::parser::CSSParser;

    fn value(css: &str) -> Vec<ComponentValue> {
        normalize(&CSSParser::from_css(css).parse_component_values())
    }

    fn first(css: &str) -> ComponentValue {
        value(css).remove(0)
    }

    #[test]
    fn test_length_accepts_unitless_zero_only() {
        assert!(is_length(&first("0")));
        assert!(!is_length(&first("1")));
        assert!(is_length(&first("1.5EM")));
        assert!(!is_length(&first("1s")));
        assert!(is_length(&first("calc(1px + 2%)")));
    }

    #[test]
    fn test_colors() {
        assert!(is_color(&first("RebeccaPurple")));
        assert!(is_color(&first("#abc")));
        assert!(!is_color(&first("#abcde")));
        assert!(is_color(&first("rgb(0 0 0 / 50%)")));
        assert!(is_color(&first("currentColor")));
        assert!(!is_color(&first("solid")));
    }

    #[test]
    fn test_images() {
        assert!(is_image(&first("url(a.png)")));
        assert!(is_image(&first("url('a.png')")));
        assert!(is_image(&first("linear-gradient(red, blue)")));
        assert!(!is_image(&first("none")));
    }

    #[test]
    fn test_bg_size() {
        let v = value("auto 10px");
        assert!(is_bg_size(&atoms(&v)));
        let v = value("cover auto");
        assert!(!is_bg_size(&atoms(&v)));
        let v = value("foo");
        assert!(!is_bg_size(&atoms(&v)));
    }

    #[test]
    fn test_grid_line() {
        for ok in ["auto", "a", "2", "span 2", "2 a", "span a 2"] {
            let v = value(ok);
            assert!(is_grid_line(&atoms(&v)), "{ok}");
        }
        for bad in ["span", "auto a", "2 3", "inherit"] {
            let v = value(bad);
            assert!(!is_grid_line(&atoms(&v)), "{bad}");
        }
    }

    #[test]
    fn test_font_family() {
        assert!(is_font_family(&value("\"Helvetica Neue\", Arial Black, sans-serif")));
        assert!(!is_font_family(&value("Arial, 12px")));
    }

    #[test]
    fn test_custom_ident_excludes_keywords() {
        assert!(!is_custom_ident(&first("inherit")));
        assert!(!is_custom_ident(&first("default")));
        assert!(is_custom_ident(&first("slide-in")));
    }

    #[test]
    fn test_is_single() {
        let PropertyValue::Components(v) = PropertyValue::parse("10px").unwrap() else {
            panic!("expected components");
        };
        assert!(is_single(&v, is_length));
        assert!(!is_single(&value("1px 2px"), is_length));
    }
}
