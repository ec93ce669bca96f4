//! Remote mutation/persistence seam.
//!
//! One async method per remote operation; every call is a full round trip
//! to the game process. The futures are deliberately `?Send`: the whole
//! engine runs on one logical thread and suspends only at these
//! boundaries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::appearance::{Appearance, HairColor, OverlayEntry};
use crate::blend::HeadBlend;
use crate::outfits::{
    ImportOutfitRequest, ImportedOutfit, Outfit, OutfitData, RenameOutfitRequest,
    SaveOutfitRequest, ShareOutfitRequest,
};
use crate::tattoo::{Tattoo, TattooZone};

/// Failure of a remote round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("request rejected by the remote end: {0}")]
    Rejected(String),
    #[error("request timed out")]
    TimedOut,
    #[error("channel closed")]
    Closed,
}

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Prop/drawable edit payload. `is_texture` selects which half of the slot
/// the edit targets; the remote end answers with the texture count for the
/// resulting variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEditRequest {
    pub value: i32,
    pub index: u32,
    pub texture: i32,
    pub is_texture: bool,
}

/// Face-feature mutation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureUpdate {
    pub id: String,
    pub index: u32,
    pub value: f32,
}

/// The three shapes a head-overlay mutation takes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeadOverlayUpdate {
    Entry(OverlayEntry),
    #[serde(rename_all = "camelCase")]
    HairColor {
        hair_color: i32,
        hair_highlight: i32,
        id: String,
    },
    EyeColor(i32),
}

impl HeadOverlayUpdate {
    /// Hair-colour form; tagged `id: "hairColor"` on the wire.
    #[must_use]
    pub fn hair(color: HairColor) -> Self {
        Self::HairColor {
            hair_color: color.color,
            hair_highlight: color.highlight,
            id: "hairColor".to_string(),
        }
    }
}

/// Item toggle payload. `data` and the hook pair are opaque to this crate;
/// they are relayed to whatever hook the toggled item registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub item: String,
    pub toggle: bool,
    pub data: Value,
    #[serde(default)]
    pub hook: Value,
    #[serde(default)]
    pub hook_data: Value,
}

/// Request/response channel to the game process.
#[async_trait(?Send)]
pub trait AppearanceChannel {
    /// Swap the subject model; the response is a full re-snapshot.
    async fn set_model(&self, model: u32) -> ChannelResult<Appearance>;
    async fn set_head_structure(&self, update: FeatureUpdate) -> ChannelResult<()>;
    async fn set_head_overlay(&self, update: HeadOverlayUpdate) -> ChannelResult<()>;
    async fn set_head_blend(&self, blend: HeadBlend) -> ChannelResult<()>;
    /// Apply a prop edit; the response is the texture count for the
    /// resulting variation.
    async fn set_prop(&self, request: SlotEditRequest) -> ChannelResult<u32>;
    /// Apply a drawable edit; the response is the texture count for the
    /// resulting variation.
    async fn set_drawable(&self, request: SlotEditRequest) -> ChannelResult<u32>;
    /// Toggle an item; the response is the resulting toggle state.
    async fn toggle_item(&self, request: ToggleRequest) -> ChannelResult<bool>;

    /// Replace the applied tattoo set; the response is an acknowledgement.
    async fn set_tattoos(&self, tattoos: &[Tattoo]) -> ChannelResult<bool>;
    /// Tattoo catalog for the subject's current model.
    async fn model_tattoos(&self) -> ChannelResult<Vec<TattooZone>>;
    /// Tattoos currently applied to the local player.
    async fn fetch_tattoos(&self) -> ChannelResult<Vec<Tattoo>>;

    async fn save_outfit(&self, request: SaveOutfitRequest) -> ChannelResult<bool>;
    async fn rename_outfit(&self, request: RenameOutfitRequest) -> ChannelResult<bool>;
    async fn delete_outfit(&self, id: u32) -> ChannelResult<bool>;
    async fn use_outfit(&self, outfit: &OutfitData) -> ChannelResult<bool>;
    /// Import an outfit shared by another owner; `None` when the source id
    /// is unknown to the remote end.
    async fn import_outfit(&self, request: ImportOutfitRequest)
    -> ChannelResult<Option<ImportedOutfit>>;
    /// Hand an outfit to another player. Fire-and-forget.
    async fn share_outfit(&self, request: ShareOutfitRequest) -> ChannelResult<()>;
    /// All outfits stored for `owner`.
    async fn fetch_outfits(&self, owner: &str) -> ChannelResult<Vec<Outfit>>;
}
