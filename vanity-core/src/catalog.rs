//! Ordered slot catalogs.
//!
//! The engine addresses every per-slot query by numeric index; these tables
//! fix which names and indices the rest of the crate walks. They are
//! configuration, not logic: loaded once, never mutated.

use once_cell::sync::Lazy;

use crate::hash::hash_key;

/// Head overlay slots in engine order. Eye colour rides at the end; it is
/// read through its own native and carries no colour or opacity data.
pub const HEAD_OVERLAYS: [&str; 14] = [
    "Blemishes",
    "FacialHair",
    "Eyebrows",
    "Ageing",
    "Makeup",
    "Blush",
    "Complexion",
    "SunDamage",
    "Lipstick",
    "MolesFreckles",
    "ChestHair",
    "BodyBlemishes",
    "AddBodyBlemishes",
    "EyeColor",
];

/// Name of the eye-colour pseudo overlay.
pub const EYE_COLOR_OVERLAY: &str = "EyeColor";

/// Face feature morphs in engine order.
pub const FACE_FEATURES: [&str; 20] = [
    "Nose_Width",
    "Nose_Peak_Height",
    "Nose_Peak_Length",
    "Nose_Bone_Height",
    "Nose_Peak_Lowering",
    "Nose_Bone_Twist",
    "EyeBrow_Height",
    "EyeBrow_Forward",
    "Cheeks_Bone_High",
    "Cheeks_Bone_Width",
    "Cheeks_Width",
    "Eyes_Opening",
    "Lips_Thickness",
    "Jaw_Bone_Width",
    "Jaw_Bone_Back_Length",
    "Chin_Bone_Lowering",
    "Chin_Bone_Length",
    "Chin_Bone_Width",
    "Chin_Hole",
    "Neck_Thickness",
];

/// Drawable component slots; the engine index is the list position.
pub const DRAWABLE_SLOTS: [&str; 12] = [
    "face",
    "mask",
    "hair",
    "torso",
    "legs",
    "bags",
    "shoes",
    "accessories",
    "undershirt",
    "vest",
    "decals",
    "jackets",
];

/// Prop anchors with their engine indices. The anchor ids are not
/// contiguous.
pub const PROP_SLOTS: [(&str, u32); 5] = [
    ("hats", 0),
    ("glasses", 1),
    ("earrings", 2),
    ("watches", 6),
    ("bracelets", 7),
];

/// Items the UI can toggle on and off as a unit.
pub const TOGGLE_ITEMS: [&str; 8] = [
    "hats", "masks", "glasses", "shirts", "jackets", "vest", "legs", "shoes",
];

/// The two multiplayer base models; only these expose head-structure morphs.
pub const MALE_FREEMODE_MODEL: &str = "mp_m_freemode_01";
pub const FEMALE_FREEMODE_MODEL: &str = "mp_f_freemode_01";

static MALE_MODEL_HASH: Lazy<u32> = Lazy::new(|| hash_key(MALE_FREEMODE_MODEL));
static FEMALE_MODEL_HASH: Lazy<u32> = Lazy::new(|| hash_key(FEMALE_FREEMODE_MODEL));

#[must_use]
pub fn male_model_hash() -> u32 {
    *MALE_MODEL_HASH
}

#[must_use]
pub fn female_model_hash() -> u32 {
    *FEMALE_MODEL_HASH
}

#[must_use]
pub fn is_freemode_model(model: u32) -> bool {
    model == male_model_hash() || model == female_model_hash()
}

/// Drawable slot name for an engine component index.
#[must_use]
pub fn drawable_name(index: u32) -> Option<&'static str> {
    DRAWABLE_SLOTS.get(index as usize).copied()
}

/// Prop slot name for an engine anchor id.
#[must_use]
pub fn prop_name(anchor: u32) -> Option<&'static str> {
    PROP_SLOTS
        .iter()
        .find(|(_, id)| *id == anchor)
        .map(|(name, _)| *name)
}
