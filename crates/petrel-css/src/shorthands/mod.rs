//! Shorthand property tables and per-family grammars.
//!
//! [CSS Cascading Level 4 § 1.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow
//! authors to specify the values of several properties with a single
//! property."
//!
//! Each shorthand is described by a [`ShorthandSpec`]. Its
//! [`ShorthandKind`] selects the family module that knows how to split a
//! shorthand value into longhand values ([`expand`]) and how to put them
//! back together ([`ShorthandKind::render`]). Which entries of a declaration
//! block may be merged at all is decided in [`crate::builder`].

mod animation;
mod background;
mod border;
mod box_edge;
mod flex;
mod font;
mod generic;
mod grid;

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{CssError, Result};
use crate::parser::ComponentValue;
use crate::properties::initial_value;
use crate::values::{GlobalKeyword, PendingSubstitution, PropertyValue, atoms, contains_var, normalize};

/// The closed set of shorthand families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandKind {
    /// `margin`, `padding`, `inset`, `border-width`, ... (1 to 4 edges).
    BoxEdge,
    /// `gap`, `overflow` (1 or 2 values, second defaults to the first).
    Pair,
    /// `a || b || c` grammars with initial values omitted.
    Generic,
    /// `border`: all four sides must agree.
    Border,
    /// `border-image`
    BorderImage,
    /// `font`
    Font,
    /// `list-style`
    ListStyle,
    /// `background`
    Background,
    /// `mask`
    Mask,
    /// `grid-row`, `grid-column`
    GridLine,
    /// `grid-area`
    GridArea,
    /// `grid-template`
    GridTemplate,
    /// `grid`
    Grid,
    /// `flex`
    Flex,
    /// `animation`
    Animation,
    /// `transition`
    Transition,
}

/// Order in which the longhands of a group are emitted when the group
/// cannot be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOrder {
    /// Declaration order.
    Source,
    /// Alphabetical by property name.
    Alphabetical,
}

/// A keyword that stands for a fixed bundle of longhand values
/// (`flex: none` is `0 0 auto`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordReset {
    /// The keyword as written in the shorthand.
    pub keyword: &'static str,
    /// One value per longhand, in [`ShorthandSpec::longhands`] order.
    pub values: &'static [&'static str],
}

impl KeywordReset {
    /// The parsed value for the longhand at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&'static PropertyValue> {
        static PARSED: OnceLock<HashMap<&'static str, PropertyValue>> = OnceLock::new();
        let text = self.values.get(index)?;
        PARSED
            .get_or_init(|| {
                SHORTHANDS
                    .iter()
                    .flat_map(|spec| spec.keyword_resets)
                    .flat_map(|reset| reset.values.iter().copied())
                    .filter_map(|text| Some((text, PropertyValue::parse(text)?)))
                    .collect()
            })
            .get(text)
    }
}

/// Static description of one shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShorthandSpec {
    /// Canonical name.
    pub name: &'static str,
    /// The family that parses and renders this shorthand.
    pub kind: ShorthandKind,
    /// Longhands the shorthand can express, in canonical order.
    pub longhands: &'static [&'static str],
    /// Longhands the shorthand resets to their initial value without being
    /// able to express any other value for them.
    pub reset_only: &'static [&'static str],
    /// Longhands that may be absent from a block without blocking collapse.
    pub optional: &'static [&'static str],
    /// Keywords standing for whole bundles of longhand values.
    pub keyword_resets: &'static [KeywordReset],
}

impl ShorthandSpec {
    /// Every longhand the shorthand sets, expressible ones first.
    pub fn members(&self) -> impl Iterator<Item = &'static str> + use<> {
        let (longhands, reset_only) = (self.longhands, self.reset_only);
        longhands.iter().chain(reset_only).copied()
    }

    /// True if `name` is an expressible or reset-only member.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members().any(|member| member == name)
    }

    /// True if `name` may be absent without blocking collapse.
    #[must_use]
    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.contains(&name)
    }

    /// How to order longhands when this shorthand cannot be built.
    #[must_use]
    pub const fn fallback_order(&self) -> FallbackOrder {
        match self.kind {
            ShorthandKind::Font | ShorthandKind::ListStyle | ShorthandKind::Animation | ShorthandKind::Transition => {
                FallbackOrder::Alphabetical
            }
            _ => FallbackOrder::Source,
        }
    }

    /// The keyword whose reset bundle matches `slots` exactly.
    #[must_use]
    pub fn matching_reset(&self, slots: &[&[ComponentValue]]) -> Option<&'static str> {
        self.keyword_resets.iter().find_map(|reset| {
            let matches = slots.len() == reset.values.len()
                && slots.iter().enumerate().all(|(i, slot)| {
                    reset
                        .value(i)
                        .and_then(PropertyValue::components)
                        .is_some_and(|expected| crate::values::values_equivalent(slot, expected))
                });
            matches.then_some(reset.keyword)
        })
    }
}

const fn spec(
    name: &'static str,
    kind: ShorthandKind,
    longhands: &'static [&'static str],
) -> ShorthandSpec {
    ShorthandSpec {
        name,
        kind,
        longhands,
        reset_only: &[],
        optional: &[],
        keyword_resets: &[],
    }
}

const BORDER_SIDE_NONE: &[&str] = &["medium", "none", "currentcolor"];

const BORDER_LONGHANDS: &[&str] = &[
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-top-style",
    "border-right-style",
    "border-bottom-style",
    "border-left-style",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
];

const BORDER_IMAGE_LONGHANDS: &[&str] = &[
    "border-image-source",
    "border-image-slice",
    "border-image-width",
    "border-image-outset",
    "border-image-repeat",
];

const FONT_RESET_ONLY: &[&str] = &[
    "font-size-adjust",
    "font-kerning",
    "font-variant-ligatures",
    "font-variant-numeric",
    "font-variant-east-asian",
    "font-variant-position",
    "font-feature-settings",
    "font-variation-settings",
    "font-optical-sizing",
];

const BORDER_SIDE_RESETS: &[KeywordReset] = &[KeywordReset {
    keyword: "none",
    values: BORDER_SIDE_NONE,
}];

const fn border_side(name: &'static str, longhands: &'static [&'static str]) -> ShorthandSpec {
    ShorthandSpec {
        keyword_resets: BORDER_SIDE_RESETS,
        ..spec(name, ShorthandKind::Generic, longhands)
    }
}

/// Every supported shorthand.
pub static SHORTHANDS: &[ShorthandSpec] = &[
    spec("margin", ShorthandKind::BoxEdge, &["margin-top", "margin-right", "margin-bottom", "margin-left"]),
    spec(
        "padding",
        ShorthandKind::BoxEdge,
        &["padding-top", "padding-right", "padding-bottom", "padding-left"],
    ),
    spec("inset", ShorthandKind::BoxEdge, &["top", "right", "bottom", "left"]),
    spec(
        "border-width",
        ShorthandKind::BoxEdge,
        &["border-top-width", "border-right-width", "border-bottom-width", "border-left-width"],
    ),
    spec(
        "border-style",
        ShorthandKind::BoxEdge,
        &["border-top-style", "border-right-style", "border-bottom-style", "border-left-style"],
    ),
    spec(
        "border-color",
        ShorthandKind::BoxEdge,
        &["border-top-color", "border-right-color", "border-bottom-color", "border-left-color"],
    ),
    border_side("border-top", &["border-top-width", "border-top-style", "border-top-color"]),
    border_side("border-right", &["border-right-width", "border-right-style", "border-right-color"]),
    border_side("border-bottom", &["border-bottom-width", "border-bottom-style", "border-bottom-color"]),
    border_side("border-left", &["border-left-width", "border-left-style", "border-left-color"]),
    ShorthandSpec {
        reset_only: BORDER_IMAGE_LONGHANDS,
        ..spec("border", ShorthandKind::Border, BORDER_LONGHANDS)
    },
    spec("border-image", ShorthandKind::BorderImage, BORDER_IMAGE_LONGHANDS),
    ShorthandSpec {
        keyword_resets: &[KeywordReset {
            keyword: "none",
            values: &["currentcolor", "none", "medium"],
        }],
        ..spec("outline", ShorthandKind::Generic, &["outline-color", "outline-style", "outline-width"])
    },
    ShorthandSpec {
        keyword_resets: BORDER_SIDE_RESETS,
        ..spec(
            "column-rule",
            ShorthandKind::Generic,
            &["column-rule-width", "column-rule-style", "column-rule-color"],
        )
    },
    spec("columns", ShorthandKind::Generic, &["column-width", "column-count"]),
    ShorthandSpec {
        optional: &["text-decoration-thickness"],
        keyword_resets: &[KeywordReset {
            keyword: "none",
            values: &["none", "solid", "currentcolor", "auto"],
        }],
        ..spec(
            "text-decoration",
            ShorthandKind::Generic,
            &[
                "text-decoration-line",
                "text-decoration-style",
                "text-decoration-color",
                "text-decoration-thickness",
            ],
        )
    },
    spec("flex-flow", ShorthandKind::Generic, &["flex-direction", "flex-wrap"]),
    ShorthandSpec {
        keyword_resets: &[
            KeywordReset {
                keyword: "none",
                values: &["0", "0", "auto"],
            },
            KeywordReset {
                keyword: "auto",
                values: &["1", "1", "auto"],
            },
        ],
        ..spec("flex", ShorthandKind::Flex, &["flex-grow", "flex-shrink", "flex-basis"])
    },
    spec("gap", ShorthandKind::Pair, &["row-gap", "column-gap"]),
    spec("overflow", ShorthandKind::Pair, &["overflow-x", "overflow-y"]),
    spec(
        "list-style",
        ShorthandKind::ListStyle,
        &["list-style-position", "list-style-image", "list-style-type"],
    ),
    ShorthandSpec {
        reset_only: FONT_RESET_ONLY,
        ..spec(
            "font",
            ShorthandKind::Font,
            &[
                "font-style",
                "font-variant-caps",
                "font-weight",
                "font-stretch",
                "font-size",
                "line-height",
                "font-family",
            ],
        )
    },
    spec(
        "background",
        ShorthandKind::Background,
        &[
            "background-image",
            "background-position",
            "background-size",
            "background-repeat",
            "background-attachment",
            "background-origin",
            "background-clip",
            "background-color",
        ],
    ),
    spec(
        "mask",
        ShorthandKind::Mask,
        &[
            "mask-image",
            "mask-position",
            "mask-size",
            "mask-repeat",
            "mask-origin",
            "mask-clip",
            "mask-composite",
            "mask-mode",
        ],
    ),
    spec(
        "animation",
        ShorthandKind::Animation,
        &[
            "animation-name",
            "animation-duration",
            "animation-timing-function",
            "animation-delay",
            "animation-iteration-count",
            "animation-direction",
            "animation-fill-mode",
            "animation-play-state",
        ],
    ),
    spec(
        "transition",
        ShorthandKind::Transition,
        &["transition-property", "transition-duration", "transition-timing-function", "transition-delay"],
    ),
    spec("grid-row", ShorthandKind::GridLine, &["grid-row-start", "grid-row-end"]),
    spec("grid-column", ShorthandKind::GridLine, &["grid-column-start", "grid-column-end"]),
    spec(
        "grid-area",
        ShorthandKind::GridArea,
        &["grid-row-start", "grid-column-start", "grid-row-end", "grid-column-end"],
    ),
    ShorthandSpec {
        keyword_resets: &[KeywordReset {
            keyword: "none",
            values: &["none", "none", "none"],
        }],
        ..spec(
            "grid-template",
            ShorthandKind::GridTemplate,
            &["grid-template-rows", "grid-template-columns", "grid-template-areas"],
        )
    },
    spec(
        "grid",
        ShorthandKind::Grid,
        &[
            "grid-template-rows",
            "grid-template-columns",
            "grid-template-areas",
            "grid-auto-rows",
            "grid-auto-columns",
            "grid-auto-flow",
        ],
    ),
];

/// Look up a shorthand by canonical (lowercase) name.
#[must_use]
pub fn shorthand(name: &str) -> Option<&'static ShorthandSpec> {
    static INDEX: OnceLock<HashMap<&'static str, &'static ShorthandSpec>> = OnceLock::new();
    INDEX
        .get_or_init(|| SHORTHANDS.iter().map(|spec| (spec.name, spec)).collect())
        .get(name)
        .copied()
}

/// Shorthands that can express `longhand`, largest first.
///
/// `border-top-width` yields `border`, `border-width`, `border-top`.
#[must_use]
pub fn candidates(longhand: &str) -> &'static [&'static ShorthandSpec] {
    static INDEX: OnceLock<HashMap<&'static str, Vec<&'static ShorthandSpec>>> = OnceLock::new();
    INDEX
        .get_or_init(|| {
            let mut index: HashMap<&'static str, Vec<&'static ShorthandSpec>> = HashMap::new();
            for spec in SHORTHANDS {
                for &longhand in spec.longhands {
                    index.entry(longhand).or_default().push(spec);
                }
            }
            for specs in index.values_mut() {
                specs.sort_by_key(|spec| Reverse(spec.longhands.len()));
            }
            index
        })
        .get(longhand)
        .map_or(&[], Vec::as_slice)
}

/// Longhand values produced by expanding one shorthand, in member order.
pub type Expansion = Vec<(&'static str, PropertyValue)>;

/// Expand a shorthand value into values for every member longhand.
///
/// # Errors
///
/// Returns [`CssError::EmptyValue`] for an empty value and
/// [`CssError::InvalidValue`] when the value does not match the shorthand's
/// grammar.
pub fn expand(spec: &'static ShorthandSpec, values: &[ComponentValue]) -> Result<Expansion> {
    let values = normalize(values);
    let parts = atoms(&values);

    // STEP 1: "If the value is a CSS-wide keyword, set every longhand to it."
    if parts.is_empty() {
        return Err(CssError::EmptyValue(spec.name.to_string()));
    }
    if let [single] = parts.as_slice() {
        if let Some(keyword) = single.as_ident().and_then(GlobalKeyword::from_ident) {
            return Ok(spec.members().map(|name| (name, PropertyValue::Keyword(keyword))).collect());
        }
    }

    // STEP 2: var() cannot be checked until computed-value time; every
    // longhand holds the whole value pending substitution.
    if contains_var(&values) {
        let pending = PendingSubstitution {
            shorthand: Some(spec.name),
            value: values,
        };
        return Ok(spec
            .members()
            .map(|name| (name, PropertyValue::Pending(pending.clone())))
            .collect());
    }

    let invalid = || CssError::InvalidValue {
        property: spec.name.to_string(),
        value: crate::serialize::value_to_string(&values),
    };

    // STEP 3: Keyword bundles, then the family grammar.
    let expressed = match parts.as_slice() {
        [single] => spec
            .keyword_resets
            .iter()
            .find(|reset| single.is_ident(reset.keyword))
            .map(|reset| {
                (0..spec.longhands.len())
                    .map(|i| reset.value(i).and_then(PropertyValue::components).map(<[_]>::to_vec))
                    .collect::<Option<Vec<_>>>()
            }),
        _ => None,
    };
    let expressed = match expressed {
        Some(bundle) => bundle.ok_or_else(invalid)?,
        None => spec.kind.expand(spec, &values).ok_or_else(invalid)?,
    };
    if expressed.len() != spec.longhands.len() || expressed.iter().any(Vec::is_empty) {
        return Err(invalid());
    }

    // STEP 4: Reset-only members go back to their initial values.
    let mut expansion: Expansion = spec
        .longhands
        .iter()
        .zip(expressed)
        .map(|(name, value)| (*name, PropertyValue::Components(normalize(&value))))
        .collect();
    for &name in spec.reset_only {
        let initial = initial_value(name).cloned().ok_or_else(invalid)?;
        expansion.push((name, initial));
    }
    Ok(expansion)
}

impl ShorthandKind {
    /// Split a normalized, keyword-free, `var()`-free shorthand value into
    /// one value per expressible longhand.
    #[must_use]
    pub fn expand(self, spec: &ShorthandSpec, values: &[ComponentValue]) -> Option<Vec<Vec<ComponentValue>>> {
        match self {
            Self::BoxEdge => box_edge::expand(spec, values),
            Self::Pair => box_edge::expand_pair(values),
            Self::Generic => generic::expand(spec, values),
            Self::Border => border::expand(values),
            Self::BorderImage => border::expand_image(values),
            Self::Font => font::expand(values),
            Self::ListStyle => font::expand_list_style(values),
            Self::Background => background::expand(spec, values, background::BACKGROUND),
            Self::Mask => background::expand(spec, values, background::MASK),
            Self::GridLine => grid::expand_line(values),
            Self::GridArea => grid::expand_area(values),
            Self::GridTemplate => grid::expand_template(values),
            Self::Grid => grid::expand_grid(values),
            Self::Flex => flex::expand(values),
            Self::Animation => animation::expand(values, animation::ANIMATION),
            Self::Transition => animation::expand(values, animation::TRANSITION),
        }
    }

    /// Late check of one concrete longhand value against the grammar the
    /// shorthand uses for the longhand at `slot`. A member that fails is
    /// written after the shorthand instead of inside it.
    ///
    /// Kinds whose slots only make sense together (box edges, borders, grid
    /// lines) accept everything here and reject the combination in
    /// [`ShorthandKind::render`].
    #[must_use]
    pub fn accepts(self, slot: usize, value: &[ComponentValue]) -> bool {
        match self {
            Self::Font => font::accepts_slot(slot, value),
            Self::ListStyle => font::accepts_list_style_slot(slot, value),
            Self::Background => background::BACKGROUND.accepts_slot(slot, value),
            Self::Mask => background::MASK.accepts_slot(slot, value),
            _ => true,
        }
    }

    /// Render concrete longhand values (one per expressible longhand, in
    /// order) as a shorthand value. `None` when the values cannot be
    /// expressed by this shorthand.
    #[must_use]
    pub fn render(self, spec: &ShorthandSpec, slots: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
        match self {
            Self::BoxEdge => box_edge::render(spec, slots),
            Self::Pair => box_edge::render_pair(spec, slots),
            Self::Generic => generic::render(spec, slots),
            Self::Border => border::render(slots),
            Self::BorderImage => border::render_image(slots),
            Self::Font => font::render(slots),
            Self::ListStyle => font::render_list_style(slots),
            Self::Background => background::render(slots, background::BACKGROUND),
            Self::Mask => background::render(slots, background::MASK),
            Self::GridLine => grid::render_line(slots),
            Self::GridArea => grid::render_area(slots),
            Self::GridTemplate => grid::render_template(slots),
            Self::Grid => grid::render_grid(slots),
            Self::Flex => flex::render(slots),
            Self::Animation => animation::render(slots, animation::ANIMATION),
            Self::Transition => animation::render(slots, animation::TRANSITION),
        }
    }
}

/// The initial value of `longhand` as components.
///
/// Every longhand named by a shorthand has a parseable initial value, so
/// the empty fallback is never observed.
pub(crate) fn initial_components(longhand: &str) -> &'static [ComponentValue] {
    initial_value(longhand).and_then(PropertyValue::components).unwrap_or(&[])
}

/// True if `value` is token-equivalent to the initial value of `longhand`.
pub(crate) fn is_initial(longhand: &str, value: &[ComponentValue]) -> bool {
    crate::values::values_equivalent(value, initial_components(longhand))
}
