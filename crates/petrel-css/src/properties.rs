//! Longhand property metadata.
//!
//! [CSS Cascading Level 4 § 1.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! Every longhand the object model understands is listed here with its
//! initial value. The table is static data; parsed initial values are
//! built once on first use and shared for the life of the process.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::shorthands::{self, ShorthandSpec};
use crate::values::PropertyValue;

/// How minified output may fold the case of identifiers in a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentCase {
    /// Every identifier is ASCII case-insensitive.
    Insensitive,
    /// Identifiers are author names; only the listed keywords may be folded.
    Sensitive(&'static [&'static str]),
    /// Nothing is known about the value (custom and vendor properties).
    Verbatim,
}

/// Static metadata for one longhand property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LonghandInfo {
    /// Canonical lowercase name.
    pub name: &'static str,
    /// [§ 7.1 Initial Values](https://www.w3.org/TR/css-cascade-4/#initial-values)
    /// as CSS text.
    pub initial: &'static str,
    /// Identifier case rules for the value.
    pub case: IdentCase,
    /// True for comma-separated list properties (`background-image`, ...).
    pub layered: bool,
}

const fn plain(name: &'static str, initial: &'static str) -> LonghandInfo {
    LonghandInfo {
        name,
        initial,
        case: IdentCase::Insensitive,
        layered: false,
    }
}

const fn layered(name: &'static str, initial: &'static str) -> LonghandInfo {
    LonghandInfo {
        name,
        initial,
        case: IdentCase::Insensitive,
        layered: true,
    }
}

const fn named(name: &'static str, initial: &'static str, keywords: &'static [&'static str]) -> LonghandInfo {
    LonghandInfo {
        name,
        initial,
        case: IdentCase::Sensitive(keywords),
        layered: false,
    }
}

const GRID_LINE_KEYWORDS: &[&str] = &["auto", "span"];
const TRACK_KEYWORDS: &[&str] = &[
    "none", "auto", "min-content", "max-content", "subgrid", "auto-fill", "auto-fit", "masonry",
];
const FAMILY_KEYWORDS: &[&str] = &[
    "serif", "sans-serif", "monospace", "cursive", "fantasy", "system-ui", "ui-serif", "ui-sans-serif",
    "ui-monospace", "ui-rounded", "math", "emoji", "fangsong",
];

/// Every known longhand, grouped roughly by specification.
pub static LONGHANDS: &[LonghandInfo] = &[
    // [CSS Box Model Level 3](https://www.w3.org/TR/css-box-3/)
    plain("margin-top", "0"),
    plain("margin-right", "0"),
    plain("margin-bottom", "0"),
    plain("margin-left", "0"),
    plain("padding-top", "0"),
    plain("padding-right", "0"),
    plain("padding-bottom", "0"),
    plain("padding-left", "0"),
    // [CSS Positioned Layout Level 3](https://www.w3.org/TR/css-position-3/)
    plain("top", "auto"),
    plain("right", "auto"),
    plain("bottom", "auto"),
    plain("left", "auto"),
    // [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
    plain("border-top-width", "medium"),
    plain("border-right-width", "medium"),
    plain("border-bottom-width", "medium"),
    plain("border-left-width", "medium"),
    plain("border-top-style", "none"),
    plain("border-right-style", "none"),
    plain("border-bottom-style", "none"),
    plain("border-left-style", "none"),
    plain("border-top-color", "currentcolor"),
    plain("border-right-color", "currentcolor"),
    plain("border-bottom-color", "currentcolor"),
    plain("border-left-color", "currentcolor"),
    plain("border-image-source", "none"),
    plain("border-image-slice", "100%"),
    plain("border-image-width", "1"),
    plain("border-image-outset", "0"),
    plain("border-image-repeat", "stretch"),
    plain("border-top-left-radius", "0"),
    plain("border-top-right-radius", "0"),
    plain("border-bottom-right-radius", "0"),
    plain("border-bottom-left-radius", "0"),
    layered("background-image", "none"),
    layered("background-position", "0% 0%"),
    layered("background-size", "auto"),
    layered("background-repeat", "repeat"),
    layered("background-attachment", "scroll"),
    layered("background-origin", "padding-box"),
    layered("background-clip", "border-box"),
    plain("background-color", "transparent"),
    plain("box-shadow", "none"),
    // [CSS Basic User Interface Level 4](https://www.w3.org/TR/css-ui-4/)
    plain("outline-color", "currentcolor"),
    plain("outline-style", "none"),
    plain("outline-width", "medium"),
    plain("outline-offset", "0"),
    plain("cursor", "auto"),
    plain("pointer-events", "auto"),
    plain("user-select", "auto"),
    plain("resize", "none"),
    plain("appearance", "none"),
    plain("accent-color", "auto"),
    plain("caret-color", "auto"),
    plain("box-sizing", "content-box"),
    // [CSS Multi-column Layout Level 1](https://www.w3.org/TR/css-multicol-1/)
    plain("column-rule-width", "medium"),
    plain("column-rule-style", "none"),
    plain("column-rule-color", "currentcolor"),
    plain("column-width", "auto"),
    plain("column-count", "auto"),
    plain("column-span", "none"),
    plain("column-fill", "balance"),
    // [CSS Text Decoration Level 4](https://www.w3.org/TR/css-text-decor-4/)
    plain("text-decoration-line", "none"),
    plain("text-decoration-style", "solid"),
    plain("text-decoration-color", "currentcolor"),
    plain("text-decoration-thickness", "auto"),
    plain("text-underline-offset", "auto"),
    plain("text-shadow", "none"),
    // [CSS Flexible Box Layout Level 1](https://www.w3.org/TR/css-flexbox-1/)
    plain("flex-direction", "row"),
    plain("flex-wrap", "nowrap"),
    plain("flex-grow", "0"),
    plain("flex-shrink", "1"),
    plain("flex-basis", "auto"),
    plain("order", "0"),
    // [CSS Box Alignment Level 3](https://www.w3.org/TR/css-align-3/)
    plain("row-gap", "normal"),
    plain("column-gap", "normal"),
    plain("align-items", "normal"),
    plain("align-content", "normal"),
    plain("align-self", "auto"),
    plain("justify-content", "normal"),
    plain("justify-items", "legacy"),
    plain("justify-self", "auto"),
    // [CSS Overflow Level 3](https://www.w3.org/TR/css-overflow-3/)
    plain("overflow-x", "visible"),
    plain("overflow-y", "visible"),
    plain("text-overflow", "clip"),
    // [CSS Lists Level 3](https://www.w3.org/TR/css-lists-3/)
    plain("list-style-position", "outside"),
    plain("list-style-image", "none"),
    named("list-style-type", "disc", &["none", "disc", "circle", "square", "decimal", "decimal-leading-zero",
        "lower-roman", "upper-roman", "lower-alpha", "upper-alpha", "lower-latin", "upper-latin", "lower-greek",
        "disclosure-open", "disclosure-closed"]),
    named("counter-reset", "none", &["none"]),
    named("counter-increment", "none", &["none"]),
    // [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/)
    plain("font-style", "normal"),
    plain("font-variant-caps", "normal"),
    plain("font-weight", "normal"),
    plain("font-stretch", "normal"),
    plain("font-size", "medium"),
    plain("line-height", "normal"),
    named("font-family", "serif", FAMILY_KEYWORDS),
    plain("font-size-adjust", "none"),
    plain("font-kerning", "auto"),
    plain("font-variant-ligatures", "normal"),
    plain("font-variant-numeric", "normal"),
    plain("font-variant-east-asian", "normal"),
    plain("font-variant-position", "normal"),
    plain("font-feature-settings", "normal"),
    plain("font-variation-settings", "normal"),
    plain("font-optical-sizing", "auto"),
    // [CSS Masking Level 1](https://www.w3.org/TR/css-masking-1/)
    layered("mask-image", "none"),
    layered("mask-position", "0% 0%"),
    layered("mask-size", "auto"),
    layered("mask-repeat", "repeat"),
    layered("mask-origin", "border-box"),
    layered("mask-clip", "border-box"),
    layered("mask-composite", "add"),
    layered("mask-mode", "match-source"),
    plain("clip-path", "none"),
    // [CSS Animations Level 1](https://www.w3.org/TR/css-animations-1/)
    LonghandInfo {
        name: "animation-name",
        initial: "none",
        case: IdentCase::Sensitive(&["none"]),
        layered: true,
    },
    layered("animation-duration", "0s"),
    layered("animation-timing-function", "ease"),
    layered("animation-delay", "0s"),
    layered("animation-iteration-count", "1"),
    layered("animation-direction", "normal"),
    layered("animation-fill-mode", "none"),
    layered("animation-play-state", "running"),
    // [CSS Transitions Level 1](https://www.w3.org/TR/css-transitions-1/)
    layered("transition-property", "all"),
    layered("transition-duration", "0s"),
    layered("transition-timing-function", "ease"),
    layered("transition-delay", "0s"),
    // [CSS Grid Layout Level 2](https://www.w3.org/TR/css-grid-2/)
    named("grid-row-start", "auto", GRID_LINE_KEYWORDS),
    named("grid-row-end", "auto", GRID_LINE_KEYWORDS),
    named("grid-column-start", "auto", GRID_LINE_KEYWORDS),
    named("grid-column-end", "auto", GRID_LINE_KEYWORDS),
    named("grid-template-rows", "none", TRACK_KEYWORDS),
    named("grid-template-columns", "none", TRACK_KEYWORDS),
    named("grid-template-areas", "none", &["none"]),
    named("grid-auto-rows", "auto", TRACK_KEYWORDS),
    named("grid-auto-columns", "auto", TRACK_KEYWORDS),
    plain("grid-auto-flow", "row"),
    // [CSS Display Level 3](https://www.w3.org/TR/css-display-3/) and friends
    plain("display", "inline"),
    plain("position", "static"),
    plain("float", "none"),
    plain("clear", "none"),
    plain("visibility", "visible"),
    plain("z-index", "auto"),
    plain("opacity", "1"),
    plain("color", "canvastext"),
    plain("width", "auto"),
    plain("height", "auto"),
    plain("min-width", "auto"),
    plain("min-height", "auto"),
    plain("max-width", "none"),
    plain("max-height", "none"),
    plain("aspect-ratio", "auto"),
    plain("vertical-align", "baseline"),
    plain("content", "normal"),
    plain("quotes", "auto"),
    plain("text-align", "start"),
    plain("text-transform", "none"),
    plain("text-indent", "0"),
    plain("letter-spacing", "normal"),
    plain("word-spacing", "normal"),
    plain("white-space", "normal"),
    plain("word-break", "normal"),
    plain("overflow-wrap", "normal"),
    plain("tab-size", "8"),
    plain("direction", "ltr"),
    plain("unicode-bidi", "normal"),
    plain("writing-mode", "horizontal-tb"),
    plain("transform", "none"),
    plain("transform-origin", "50% 50% 0"),
    plain("filter", "none"),
    plain("isolation", "auto"),
    plain("mix-blend-mode", "normal"),
    plain("object-fit", "fill"),
    plain("object-position", "50% 50%"),
    plain("border-collapse", "separate"),
    plain("border-spacing", "0"),
    plain("table-layout", "auto"),
    plain("will-change", "auto"),
    named("container-name", "none", &["none"]),
    plain("container-type", "normal"),
];

/// A property name resolved against the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyId<'a> {
    /// A known longhand.
    Longhand(&'static LonghandInfo),
    /// A known shorthand.
    Shorthand(&'static ShorthandSpec),
    /// A custom property (`--*`), name kept verbatim.
    Custom(&'a str),
    /// An unknown vendor-prefixed property, kept as an opaque longhand.
    Vendor(&'a str),
}

impl<'a> PropertyId<'a> {
    /// [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// "If property is not a custom property ... Let property be property
    /// converted to ASCII lowercase."
    ///
    /// Vendor names are returned as given; callers store them lowercased.
    #[must_use]
    pub fn parse(name: &'a str) -> Option<Self> {
        if name.starts_with("--") {
            return (name.len() > 2).then_some(Self::Custom(name));
        }
        let lower = name.to_ascii_lowercase();
        if let Some(info) = longhand(&lower) {
            return Some(Self::Longhand(info));
        }
        if let Some(spec) = shorthands::shorthand(&lower) {
            return Some(Self::Shorthand(spec));
        }
        (name.starts_with('-') && name.len() > 1).then_some(Self::Vendor(name))
    }

    /// The name under which entries for this property are stored.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Longhand(info) => info.name.to_string(),
            Self::Shorthand(spec) => spec.name.to_string(),
            Self::Custom(name) => (*name).to_string(),
            Self::Vendor(name) => name.to_ascii_lowercase(),
        }
    }
}

/// Look up a longhand by canonical (lowercase) name.
#[must_use]
pub fn longhand(name: &str) -> Option<&'static LonghandInfo> {
    static INDEX: OnceLock<HashMap<&'static str, &'static LonghandInfo>> = OnceLock::new();
    INDEX
        .get_or_init(|| LONGHANDS.iter().map(|info| (info.name, info)).collect())
        .get(name)
        .copied()
}

/// The parsed initial value of a longhand.
#[must_use]
pub fn initial_value(name: &str) -> Option<&'static PropertyValue> {
    static INITIAL: OnceLock<HashMap<&'static str, PropertyValue>> = OnceLock::new();
    INITIAL
        .get_or_init(|| {
            LONGHANDS
                .iter()
                .filter_map(|info| Some((info.name, PropertyValue::parse(info.initial)?)))
                .collect()
        })
        .get(name)
}

/// Identifier case rules for a stored property name.
#[must_use]
pub fn ident_case(name: &str) -> IdentCase {
    longhand(name).map_or(IdentCase::Verbatim, |info| info.case)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_initial_value_parses() {
        for info in LONGHANDS {
            assert!(initial_value(info.name).is_some(), "{}", info.name);
        }
    }

    #[test]
    fn test_longhand_names_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for info in LONGHANDS {
            assert!(seen.insert(info.name), "duplicate {}", info.name);
            assert_eq!(info.name, info.name.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_parse_property_names() {
        assert!(matches!(PropertyId::parse("COLOR"), Some(PropertyId::Longhand(info)) if info.name == "color"));
        assert!(matches!(PropertyId::parse("Margin"), Some(PropertyId::Shorthand(spec)) if spec.name == "margin"));
        assert_eq!(PropertyId::parse("--Accent"), Some(PropertyId::Custom("--Accent")));
        assert_eq!(PropertyId::parse("-webkit-box-reflect"), Some(PropertyId::Vendor("-webkit-box-reflect")));
        assert_eq!(PropertyId::parse("colour"), None);
        assert_eq!(PropertyId::parse("--"), None);
    }

    #[test]
    fn test_font_family_is_case_sensitive() {
        assert!(matches!(ident_case("font-family"), IdentCase::Sensitive(_)));
        assert_eq!(ident_case("margin-top"), IdentCase::Insensitive);
        assert_eq!(ident_case("--x"), IdentCase::Verbatim);
    }
}
