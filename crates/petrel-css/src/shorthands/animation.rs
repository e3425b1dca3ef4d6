//! `animation` and `transition`, the list-valued timing shorthands.
//!
//! [CSS Animations Level 1 § 3.10](https://www.w3.org/TR/css-animations-1/#animation)
//!
//! "<single-animation> = <time> || <easing-function> || <time> ||
//! <single-animation-iteration-count> || <single-animation-direction> ||
//! <single-animation-fill-mode> || <single-animation-play-state> ||
//! [ none | <keyframes-name> ]"
//!
//! "Note that order is also important within each animation definition: the
//! first value in each <single-animation> that can be parsed as a <time> is
//! assigned to the animation-duration, and the second value in each
//! <single-animation> that can be parsed as a <time> is assigned to
//! animation-delay."
//!
//! [CSS Transitions Level 1 § 2.5](https://www.w3.org/TR/css-transitions-1/#transition-shorthand-property)

use crate::builder::layers::split_layers;
use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, join_commas, join_spaced, split_commas};

use super::{initial_components, is_initial};

/// One component of a single animation or transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Name,
    Property,
    Duration,
    Timing,
    Delay,
    Iteration,
    Direction,
    Fill,
    Play,
}

/// The two list shorthands handled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TimingFamily {
    Animation,
    Transition,
}

pub(super) const ANIMATION: TimingFamily = TimingFamily::Animation;
pub(super) const TRANSITION: TimingFamily = TimingFamily::Transition;

const ANIMATION_PARTS: &[Part] = &[
    Part::Name,
    Part::Duration,
    Part::Timing,
    Part::Delay,
    Part::Iteration,
    Part::Direction,
    Part::Fill,
    Part::Play,
];

const ANIMATION_LONGHANDS: &[&str] = &[
    "animation-name",
    "animation-duration",
    "animation-timing-function",
    "animation-delay",
    "animation-iteration-count",
    "animation-direction",
    "animation-fill-mode",
    "animation-play-state",
];

/// Render order: the name goes last so that it is never mistaken for one of
/// the keywords before it.
const ANIMATION_ORDER: &[Part] = &[
    Part::Duration,
    Part::Timing,
    Part::Delay,
    Part::Iteration,
    Part::Direction,
    Part::Fill,
    Part::Play,
    Part::Name,
];

const TRANSITION_PARTS: &[Part] = &[Part::Property, Part::Duration, Part::Timing, Part::Delay];

const TRANSITION_LONGHANDS: &[&str] = &[
    "transition-property",
    "transition-duration",
    "transition-timing-function",
    "transition-delay",
];

impl TimingFamily {
    /// Parts in longhand order. The first part is the primary list that
    /// decides the number of layers.
    const fn parts(self) -> &'static [Part] {
        match self {
            Self::Animation => ANIMATION_PARTS,
            Self::Transition => TRANSITION_PARTS,
        }
    }

    const fn longhands(self) -> &'static [&'static str] {
        match self {
            Self::Animation => ANIMATION_LONGHANDS,
            Self::Transition => TRANSITION_LONGHANDS,
        }
    }

    const fn render_order(self) -> &'static [Part] {
        match self {
            Self::Animation => ANIMATION_ORDER,
            Self::Transition => TRANSITION_PARTS,
        }
    }

    fn index(self, part: Part) -> Option<usize> {
        self.parts().iter().position(|p| *p == part)
    }
}

/// Keywords an animation name must not spell. A transition property only
/// competes with the easing keywords.
fn is_reserved_keyword(part: Part, value: &ComponentValue) -> bool {
    match part {
        Part::Name => {
            grammar::is_easing(value)
                || value.is_ident("infinite")
                || grammar::is_animation_direction(value)
                || grammar::is_fill_mode(value)
                || grammar::is_play_state(value)
        }
        Part::Property => grammar::is_easing(value),
        _ => false,
    }
}

fn part_accepts(part: Part, value: &ComponentValue) -> bool {
    match part {
        Part::Name => value.is_ident("none") || grammar::is_keyframes_name(value),
        Part::Property => value.is_ident("none") || grammar::is_transition_property(value),
        Part::Duration | Part::Delay => grammar::is_time(value),
        Part::Timing => grammar::is_easing(value),
        Part::Iteration => grammar::is_iteration_count(value),
        Part::Direction => grammar::is_animation_direction(value),
        Part::Fill => grammar::is_fill_mode(value),
        Part::Play => grammar::is_play_state(value),
    }
}

/// Parse one comma-separated item into a value per part.
fn expand_layer(family: TimingFamily, values: &[ComponentValue]) -> Option<Vec<Option<ComponentValue>>> {
    let parts = family.parts();
    let mut layer: Vec<Option<ComponentValue>> = vec![None; parts.len()];
    let unset = |layer: &[Option<ComponentValue>], part: Part| family.index(part).is_some_and(|i| layer[i].is_none());

    for value in atoms(values) {
        // "the first value ... that can be parsed as a <time> is assigned to
        // the duration"; keywords go to the first unset part that accepts
        // them; the name or property takes whatever is left.
        let target = if grammar::is_time(value) {
            [Part::Duration, Part::Delay].into_iter().find(|p| unset(&layer, *p))
        } else {
            [Part::Timing, Part::Iteration, Part::Direction, Part::Fill, Part::Play, Part::Name, Part::Property]
                .into_iter()
                .find(|p| unset(&layer, *p) && part_accepts(*p, value))
        };
        let index = family.index(target?)?;
        layer[index] = Some(value.clone());
    }
    Some(layer)
}

/// Expand each comma-separated item and join every longhand's values with
/// commas.
pub(super) fn expand(values: &[ComponentValue], family: TimingFamily) -> Option<Vec<Vec<ComponentValue>>> {
    let items = split_commas(values);
    let layers = items
        .iter()
        .map(|item| expand_layer(family, item))
        .collect::<Option<Vec<_>>>()?;
    // "none" as a transition property is only valid on its own.
    if family == TimingFamily::Transition
        && layers.len() > 1
        && layers.iter().any(|layer| layer[0].as_ref().is_some_and(|v| v.is_ident("none")))
    {
        return None;
    }

    Some(
        family
            .longhands()
            .iter()
            .enumerate()
            .map(|(index, longhand)| {
                join_commas(layers.iter().map(|layer| {
                    layer[index]
                        .clone()
                        .map_or_else(|| initial_components(longhand).to_vec(), |value| vec![value])
                }))
            })
            .collect(),
    )
}

/// Render one layer in the family's render order, omitting initial parts.
///
/// The duration is always written when the delay is, since the first time
/// reads back as the duration.
fn render_layer(family: TimingFamily, layer: &[&[ComponentValue]]) -> Option<Vec<ComponentValue>> {
    let longhands = family.longhands();
    let mut parts: Vec<Vec<ComponentValue>> = Vec::new();
    let delay_written = family
        .index(Part::Delay)
        .is_some_and(|i| !is_initial(longhands[i], layer[i]));

    for &part in family.render_order() {
        let index = family.index(part)?;
        let value = layer[index];
        let components = atoms(value);
        let [single] = components.as_slice() else {
            return None;
        };
        if !part_accepts(part, single) {
            return None;
        }
        let needed = !is_initial(longhands[index], value) || (part == Part::Duration && delay_written);
        if !needed {
            continue;
        }
        // A name or property that spells a keyword would be read back as
        // that keyword.
        if is_reserved_keyword(part, single) {
            return None;
        }
        parts.push(value.to_vec());
    }
    // Every part is initial; the primary value (`none` or `all`) stands for
    // the layer.
    if parts.is_empty() {
        return Some(layer[0].to_vec());
    }
    Some(join_spaced(parts))
}

/// Render the shorthand, or `None` when the lists cannot be aligned to the
/// primary list or a layer cannot be expressed.
pub(super) fn render(slots: &[&[ComponentValue]], family: TimingFamily) -> Option<Vec<ComponentValue>> {
    if slots.len() != family.parts().len() {
        return None;
    }
    let layers = split_layers(slots, 0).ok()?;
    if family == TimingFamily::Transition
        && layers.len() > 1
        && layers.iter().any(|layer| layer[0].len() == 1 && layer[0][0].is_ident("none"))
    {
        return None;
    }
    let rendered = layers
        .iter()
        .map(|layer| render_layer(family, layer))
        .collect::<Option<Vec<_>>>()?;
    Some(join_commas(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_value;
    use crate::serialize::value_to_string;
    use crate::values::normalize;

    fn expand_css(css: &str, family: TimingFamily) -> Option<Vec<String>> {
        expand(&normalize(&parse_value(css).0), family).map(|v| v.iter().map(|e| value_to_string(e)).collect())
    }

    fn render_css(slots: &[&str], family: TimingFamily) -> Option<String> {
        let parsed: Vec<Vec<ComponentValue>> = slots.iter().map(|e| normalize(&parse_value(e).0)).collect();
        let slots: Vec<&[ComponentValue]> = parsed.iter().map(Vec::as_slice).collect();
        render(&slots, family).map(|v| value_to_string(&v))
    }

    #[test]
    fn test_first_time_is_duration() {
        assert_eq!(
            expand_css("slide 1s ease-in 200ms infinite", ANIMATION).unwrap(),
            ["slide", "1s", "ease-in", "200ms", "infinite", "normal", "none", "running"]
        );
    }

    #[test]
    fn test_keyword_before_name() {
        // The first `ease` is the timing function, the second is the name.
        let expanded = expand_css("ease ease", ANIMATION).unwrap();
        assert_eq!(expanded[0], "ease");
        assert_eq!(expanded[2], "ease");
    }

    #[test]
    fn test_multiple_layers() {
        let expanded = expand_css("opacity 1s, transform 2s ease-out", TRANSITION).unwrap();
        assert_eq!(expanded, ["opacity, transform", "1s, 2s", "ease, ease-out", "0s, 0s"]);
        assert_eq!(expand_css("none, opacity", TRANSITION), None);
    }

    #[test]
    fn test_render_animation() {
        assert_eq!(
            render_css(&["slide", "0s", "ease", "1s", "1", "normal", "none", "running"], ANIMATION).as_deref(),
            Some("0s 1s slide")
        );
        assert_eq!(
            render_css(&["none", "0s", "ease", "0s", "1", "normal", "none", "running"], ANIMATION).as_deref(),
            Some("none")
        );
    }

    #[test]
    fn test_render_rejects_keyword_names() {
        assert_eq!(
            render_css(&["ease", "1s", "ease", "0s", "1", "normal", "none", "running"], ANIMATION),
            None
        );
    }

    #[test]
    fn test_render_transition() {
        assert_eq!(
            render_css(&["opacity, transform", "1s", "ease", "0s"], TRANSITION).as_deref(),
            Some("opacity 1s, transform 1s")
        );
        assert_eq!(render_css(&["all", "0s", "ease", "0s"], TRANSITION).as_deref(), Some("all"));
        assert_eq!(render_css(&["a, b, c", "1s, 2s", "ease", "0s"], TRANSITION), None);
    }
}
