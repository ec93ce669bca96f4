//! Engine query seam.
//!
//! Everything the crate needs to read from (or, for armour, write back to)
//! the game engine about one character. Implementations bridge to the
//! native runtime; tests use an in-memory fake.

use crate::blend::HEAD_BLEND_BUFFER_LEN;

/// Handle to a spawned character.
pub type PedHandle = i32;

/// Raw head-overlay tuple as the engine reports it (value 255 = unset).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawOverlay {
    pub value: u32,
    pub colour_type: i32,
    pub first_color: i32,
    pub second_color: i32,
    pub opacity: f32,
}

/// Synchronous query/mutation surface of the game engine.
///
/// Queries are infallible by contract: the engine answers every per-slot
/// query with whatever default it holds, and an unanswerable query is an
/// integration error, not a runtime condition.
pub trait CharacterEngine {
    /// Current variation of a drawable component.
    fn drawable_variation(&self, ped: PedHandle, component: u32) -> i32;
    /// Current texture of a drawable component.
    fn drawable_texture(&self, ped: PedHandle, component: u32) -> i32;
    /// Number of variations a drawable component offers.
    fn drawable_variation_count(&self, ped: PedHandle, component: u32) -> u32;
    /// Number of textures the given variation of a component offers.
    fn drawable_texture_count(&self, ped: PedHandle, component: u32, drawable: i32) -> u32;

    /// Current prop at an anchor, -1 when empty.
    fn prop_index(&self, ped: PedHandle, anchor: u32) -> i32;
    /// Current texture of the prop at an anchor.
    fn prop_texture(&self, ped: PedHandle, anchor: u32) -> i32;
    /// Number of props an anchor offers.
    fn prop_count(&self, ped: PedHandle, anchor: u32) -> u32;
    /// Number of textures the given prop at an anchor offers.
    fn prop_texture_count(&self, ped: PedHandle, anchor: u32, prop: i32) -> u32;

    /// Number of values a head overlay offers.
    fn head_overlay_value_count(&self, overlay: u32) -> u32;
    /// Raw overlay data for a head overlay slot.
    fn head_overlay(&self, ped: PedHandle, overlay: u32) -> RawOverlay;
    fn eye_color(&self, ped: PedHandle) -> i32;
    fn hair_color(&self, ped: PedHandle) -> i32;
    fn hair_highlight_color(&self, ped: PedHandle) -> i32;
    /// Current morph value of a face feature.
    fn face_feature(&self, ped: PedHandle, feature: u32) -> f32;

    /// Fill of the fixed-layout head-blend buffer for `ped`.
    fn head_blend_buffer(&self, ped: PedHandle) -> [u8; HEAD_BLEND_BUFFER_LEN];

    /// Model hash of the entity.
    fn entity_model(&self, ped: PedHandle) -> u32;

    /// Decoration zone index for a `(dlc, overlay)` hash pair, -1 when the
    /// pair resolves to nothing.
    fn decoration_zone(&self, dlc_hash: u32, overlay_hash: u32) -> i32;

    /// Current armour level.
    fn armour(&self, ped: PedHandle) -> u32;
    /// Write the armour level back; used for the session save/restore pair.
    fn set_armour(&self, ped: PedHandle, value: u32);
}
