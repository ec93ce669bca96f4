//! Appearance data model.
//!
//! The [`Appearance`] aggregate is the one live record an edit session owns;
//! every field serializes camelCase because the record is a wire contract
//! with the embedded UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blend::HeadBlend;
use crate::tattoo::TattooList;

/// Raw overlay value the engine reports when an overlay is not applied.
pub const OVERLAY_UNSET_RAW: u32 = 255;

/// Sentinel stored for a missing overlay value or an empty slot.
pub const UNSET: i32 = -1;

/// Normalize a raw engine overlay value; 255 encodes "not applied".
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn normalize_overlay_value(raw: u32) -> i32 {
    if raw == OVERLAY_UNSET_RAW { UNSET } else { raw as i32 }
}

/// Hair colour pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HairColor {
    pub color: i32,
    pub highlight: i32,
}

/// One head overlay as held in the appearance record.
///
/// Eye colour is the one overlay the engine reads through a dedicated
/// native; it carries only its value. Deserialization tries the full form
/// first, so a complete entry never collapses into the eye-colour shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverlayEntry {
    #[serde(rename_all = "camelCase")]
    Full {
        index: u32,
        overlay_value: i32,
        colour_type: i32,
        first_color: i32,
        second_color: i32,
        overlay_opacity: f32,
    },
    #[serde(rename_all = "camelCase")]
    EyeColor { index: u32, overlay_value: i32 },
}

impl OverlayEntry {
    /// Catalog position of this overlay.
    #[must_use]
    pub const fn index(&self) -> u32 {
        match self {
            Self::Full { index, .. } | Self::EyeColor { index, .. } => *index,
        }
    }

    /// Current overlay value, [`UNSET`] when not applied.
    #[must_use]
    pub const fn value(&self) -> i32 {
        match self {
            Self::Full { overlay_value, .. } | Self::EyeColor { overlay_value, .. } => {
                *overlay_value
            }
        }
    }
}

/// State of one drawable or prop slot; `value == -1` means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SlotState {
    pub index: u32,
    pub value: i32,
    pub texture: i32,
}

/// Live bounds for one slot. `textures` depends on the current variation
/// and is refreshed from mutation acknowledgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SlotTotal {
    pub index: u32,
    pub total: u32,
    pub textures: u32,
}

/// One face-feature morph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FaceFeature {
    pub index: u32,
    pub value: f32,
}

/// Full visual identity of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub model: u32,
    /// Position of `model` in the configured model list; -1 when the model
    /// is an unregistered custom one.
    pub model_index: i32,
    pub hair_color: HairColor,
    pub head_blend: HeadBlend,
    pub head_overlay: BTreeMap<String, OverlayEntry>,
    pub head_overlay_total: BTreeMap<String, u32>,
    /// Empty for models without head morphs.
    pub head_structure: BTreeMap<String, FaceFeature>,
    pub drawables: BTreeMap<String, SlotState>,
    pub draw_total: BTreeMap<String, SlotTotal>,
    pub props: BTreeMap<String, SlotState>,
    pub prop_total: BTreeMap<String, SlotTotal>,
    pub tattoos: TattooList,
}

/// Clothing-only view of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Clothes {
    pub head_overlay: BTreeMap<String, OverlayEntry>,
    pub drawables: BTreeMap<String, SlotState>,
    pub props: BTreeMap<String, SlotState>,
}

/// Genetics-only view of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    pub model: u32,
    pub head_blend: HeadBlend,
    pub head_structure: BTreeMap<String, FaceFeature>,
    pub hair_color: HairColor,
}
