//! `background` and `mask`, the layered shorthands.
//!
//! [CSS Backgrounds and Borders Level 3 § 3.10](https://www.w3.org/TR/css-backgrounds-3/#background)
//!
//! "<bg-layer> = <bg-image> || <bg-position> [ / <bg-size> ]? || <repeat-style>
//! || <attachment> || <visual-box> || <visual-box>"
//!
//! "<final-bg-layer> = <bg-layer> || <'background-color'>"
//!
//! [CSS Masking Level 1 § 7.8](https://www.w3.org/TR/css-masking-1/#the-mask)
//!
//! "<mask-layer> = <mask-reference> || <position> [ / <bg-size> ]? ||
//! <repeat-style> || <geometry-box> || [ <geometry-box> | no-clip ] ||
//! <compositing-operator> || <masking-mode>"

use crate::builder::layers::split_layers;
use crate::parser::ComponentValue;
use crate::values::{atoms, grammar, join_commas, join_spaced, slash, split_commas, values_equivalent};

use super::{ShorthandSpec, initial_components, is_initial};

/// One component of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Image,
    Position,
    Size,
    Repeat,
    Attachment,
    Origin,
    Clip,
    Composite,
    Mode,
    Color,
}

/// Which of the two layered shorthands is being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LayerFamily {
    Background,
    Mask,
}

pub(super) const BACKGROUND: LayerFamily = LayerFamily::Background;
pub(super) const MASK: LayerFamily = LayerFamily::Mask;

impl LayerFamily {
    /// Fields in the order of the shorthand's longhands.
    const fn fields(self) -> [Field; 8] {
        match self {
            Self::Background => [
                Field::Image,
                Field::Position,
                Field::Size,
                Field::Repeat,
                Field::Attachment,
                Field::Origin,
                Field::Clip,
                Field::Color,
            ],
            Self::Mask => [
                Field::Image,
                Field::Position,
                Field::Size,
                Field::Repeat,
                Field::Origin,
                Field::Clip,
                Field::Composite,
                Field::Mode,
            ],
        }
    }

    fn slot(self, field: Field) -> Option<usize> {
        self.fields().iter().position(|f| *f == field)
    }

    /// Late check of a whole longhand value in `slot`: each of its layers
    /// must be something the shorthand can carry.
    pub(super) fn accepts_slot(self, slot: usize, value: &[ComponentValue]) -> bool {
        match self.fields().get(slot) {
            Some(&Field::Color) => accepts(Field::Color, value),
            Some(&field) => split_commas(value).into_iter().all(|layer| accepts(field, layer)),
            None => false,
        }
    }
}

/// Late check of one layer's value for `field`.
fn accepts(field: Field, value: &[ComponentValue]) -> bool {
    let parts = atoms(value);
    let single = |pred: &dyn Fn(&ComponentValue) -> bool| matches!(parts.as_slice(), [one] if pred(*one));
    match field {
        Field::Image => single(&grammar::is_image_or_none),
        Field::Position => grammar::is_position(&parts),
        Field::Size => grammar::is_bg_size(&parts),
        Field::Repeat => grammar::is_repeat_style(&parts),
        Field::Attachment => single(&grammar::is_attachment),
        Field::Origin => single(&grammar::is_coord_box),
        Field::Clip => single(&is_clip_box),
        Field::Composite => single(&grammar::is_composite),
        Field::Mode => single(&grammar::is_mask_mode),
        Field::Color => single(&grammar::is_color),
    }
}

fn is_clip_box(value: &ComponentValue) -> bool {
    grammar::is_coord_box(value) || grammar::is_clip_only_box(value)
}

type LayerValues = [Option<Vec<ComponentValue>>; 8];

/// Count leading components of `parts` matching `pred`, up to `max`.
fn run_length(parts: &[&ComponentValue], max: usize, pred: fn(&ComponentValue) -> bool) -> usize {
    parts.iter().take(max).take_while(|v| pred(v)).count()
}

fn spaced(parts: &[&ComponentValue]) -> Vec<ComponentValue> {
    join_spaced(parts.iter().map(|part| vec![(*part).clone()]))
}

/// Parse a single layer. Color is only accepted in the final layer.
fn expand_layer(family: LayerFamily, values: &[ComponentValue], is_final: bool) -> Option<LayerValues> {
    let parts = atoms(values);
    let mut layer: LayerValues = Default::default();
    let mut boxes: Vec<&ComponentValue> = Vec::new();
    let unset = |layer: &LayerValues, field: Field| family.slot(field).is_some_and(|i| layer[i].is_none());
    let mut i = 0;

    while i < parts.len() {
        let part = parts[i];
        let rest = &parts[i..];
        let (field, taken) = if unset(&layer, Field::Image) && grammar::is_image_or_none(part) {
            (Field::Image, 1)
        } else if unset(&layer, Field::Position) && grammar::is_position_component(part) {
            // STEP 1: Position, then the optional `/ size`.
            let n = run_length(rest, 4, grammar::is_position_component);
            layer[1] = Some(spaced(&rest[..n]));
            i += n;
            if parts.get(i).is_some_and(|v| v.is_slash()) {
                let size = &parts[i + 1..];
                let n = match size.first() {
                    Some(first) if first.is_ident("cover") || first.is_ident("contain") => 1,
                    _ => run_length(size, 2, grammar::is_length_percentage_or_auto),
                };
                if n == 0 {
                    return None;
                }
                layer[2] = Some(spaced(&size[..n]));
                i += 1 + n;
            }
            continue;
        } else if unset(&layer, Field::Repeat) && grammar::is_repeat_axis(part) {
            (Field::Repeat, 1)
        } else if unset(&layer, Field::Repeat) && grammar::is_repeat_keyword(part) {
            (Field::Repeat, run_length(rest, 2, grammar::is_repeat_keyword))
        } else if unset(&layer, Field::Attachment) && grammar::is_attachment(part) {
            (Field::Attachment, 1)
        } else if boxes.len() < 2 && is_clip_box(part) {
            boxes.push(part);
            i += 1;
            continue;
        } else if unset(&layer, Field::Composite) && grammar::is_composite(part) {
            (Field::Composite, 1)
        } else if unset(&layer, Field::Mode) && grammar::is_mask_mode(part) {
            (Field::Mode, 1)
        } else if is_final && unset(&layer, Field::Color) && grammar::is_color(part) {
            (Field::Color, 1)
        } else {
            return None;
        };
        let slot = family.slot(field)?;
        layer[slot] = Some(spaced(&rest[..taken]));
        i += taken;
    }

    // STEP 2: "If one <box> value is present then it sets both
    // background-origin and background-clip to that value. If two values
    // are present, then the first sets background-origin and the second
    // background-clip."
    let (origin, clip) = (family.slot(Field::Origin)?, family.slot(Field::Clip)?);
    match boxes.as_slice() {
        [] => {}
        [only] if grammar::is_clip_only_box(only) => layer[clip] = Some(vec![(*only).clone()]),
        [only] => {
            layer[origin] = Some(vec![(*only).clone()]);
            layer[clip] = Some(vec![(*only).clone()]);
        }
        [first, second] if grammar::is_coord_box(first) => {
            layer[origin] = Some(vec![(*first).clone()]);
            layer[clip] = Some(vec![(*second).clone()]);
        }
        _ => return None,
    }
    Some(layer)
}

/// Expand every layer and join each longhand's values with commas.
pub(super) fn expand(
    spec: &ShorthandSpec,
    values: &[ComponentValue],
    family: LayerFamily,
) -> Option<Vec<Vec<ComponentValue>>> {
    let items = split_commas(values);
    let count = items.len();
    let layers = items
        .iter()
        .enumerate()
        .map(|(index, item)| expand_layer(family, item, index + 1 == count))
        .collect::<Option<Vec<_>>>()?;

    let mut expanded = Vec::with_capacity(spec.longhands.len());
    for (slot, (&longhand, field)) in spec.longhands.iter().zip(family.fields()).enumerate() {
        let value_of = |layer: &LayerValues| {
            layer[slot]
                .clone()
                .unwrap_or_else(|| initial_components(longhand).to_vec())
        };
        let value = if field == Field::Color {
            layers.last().map(value_of)?
        } else {
            join_commas(layers.iter().map(value_of))
        };
        expanded.push(value);
    }
    Some(expanded)
}

/// Render one layer: the image always, everything else only when it
/// differs from the initial value. The color is rendered on the final layer
/// only.
fn render_layer(family: LayerFamily, layer: &[&[ComponentValue]], is_final: bool) -> Vec<ComponentValue> {
    let longhands = longhands_of(family);
    let get = |field: Field| family.slot(field).map(|i| (longhands[i], layer[i]));
    let non_initial = |field: Field| get(field).filter(|(longhand, value)| !is_initial(longhand, value));

    let mut parts: Vec<Vec<ComponentValue>> = Vec::new();
    parts.extend(get(Field::Image).map(|(_, image)| image.to_vec()));
    match (get(Field::Position), non_initial(Field::Size)) {
        (Some((_, position)), Some((_, size))) => {
            parts.push([position.to_vec(), vec![slash()], size.to_vec()].concat());
        }
        _ => parts.extend(non_initial(Field::Position).map(|(_, position)| position.to_vec())),
    }
    for field in [Field::Repeat, Field::Attachment] {
        parts.extend(non_initial(field).map(|(_, value)| value.to_vec()));
    }
    if let (Some((_, origin)), Some((_, clip))) = (get(Field::Origin), get(Field::Clip)) {
        if non_initial(Field::Origin).is_some() || non_initial(Field::Clip).is_some() {
            parts.push(origin.to_vec());
            if !values_equivalent(origin, clip) {
                parts.push(clip.to_vec());
            }
        }
    }
    for field in [Field::Composite, Field::Mode] {
        parts.extend(non_initial(field).map(|(_, value)| value.to_vec()));
    }
    if is_final {
        parts.extend(non_initial(Field::Color).map(|(_, color)| color.to_vec()));
    }
    join_spaced(parts)
}

/// Render a layered shorthand, or `None` when the lists cannot be aligned
/// or a layer holds a value the shorthand cannot carry.
///
/// `background-color` is not a list; as a one-item list it lines up with
/// every layer and only the final layer's copy is rendered.
pub(super) fn render(slots: &[&[ComponentValue]], family: LayerFamily) -> Option<Vec<ComponentValue>> {
    let fields = family.fields();
    if slots.len() != fields.len() {
        return None;
    }
    let layers = split_layers(slots, 0).ok()?;
    for layer in &layers {
        if !fields.iter().zip(layer).all(|(field, value)| accepts(*field, value)) {
            return None;
        }
    }
    let count = layers.len();
    Some(join_commas(
        layers
            .iter()
            .enumerate()
            .map(|(index, layer)| render_layer(family, layer, index + 1 == count)),
    ))
}

const fn longhands_of(family: LayerFamily) -> &'static [&'static str] {
    match family {
        LayerFamily::Background => &[
            "background-image",
            "background-position",
            "background-size",
            "background-repeat",
            "background-attachment",
            "background-origin",
            "background-clip",
            "background-color",
        ],
        LayerFamily::Mask => &[
            "mask-image",
            "mask-position",
            "mask-size",
            "mask-repeat",
            "mask-origin",
            "mask-clip",
            "mask-composite",
            "mask-mode",
        ],
    }
}
