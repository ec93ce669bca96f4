//! UI boundary events.
//!
//! The embedded UI talks in named events; these enums fix the names and
//! payload shapes without caring how the transport delivers them.

use serde::{Deserialize, Serialize};

use crate::appearance::Appearance;
use crate::blend::HeadBlend;
use crate::channel::{FeatureUpdate, HeadOverlayUpdate, SlotEditRequest, ToggleRequest};
use crate::outfits::{
    ImportOutfitRequest, OutfitData, RenameOutfitRequest, SaveOutfitRequest, ShareOutfitRequest,
};
use crate::session::SessionData;
use crate::tattoo::Tattoo;

/// Outbound pushes to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum Push {
    #[serde(rename = "appearance:visible")]
    Visible(bool),
    #[serde(rename = "appearance:data")]
    Data(Box<SessionData>),
}

/// Inbound user intents.
///
/// The camera intents are listed for completeness of the boundary; the
/// core relays them to the camera collaborator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum Intent {
    #[serde(rename = "appearance:toggleItem")]
    ToggleItem(ToggleRequest),
    #[serde(rename = "appearance:save")]
    Save(Box<Appearance>),
    #[serde(rename = "appearance:cancel")]
    Cancel(Box<Appearance>),
    #[serde(rename = "appearance:camZoom")]
    CamZoom(f32),
    #[serde(rename = "appearance:camMove")]
    CamMove(f32),
    #[serde(rename = "appearance:camSection")]
    CamSection(String),
    #[serde(rename = "appearance:setModel")]
    SetModel(u32),
    #[serde(rename = "appearance:setHeadStructure")]
    SetHeadStructure(FeatureUpdate),
    #[serde(rename = "appearance:setHeadOverlay")]
    SetHeadOverlay(HeadOverlayUpdate),
    #[serde(rename = "appearance:setHeadBlend")]
    SetHeadBlend(HeadBlend),
    #[serde(rename = "appearance:setProp")]
    SetProp(SlotEditRequest),
    #[serde(rename = "appearance:setDrawable")]
    SetDrawable(SlotEditRequest),
    #[serde(rename = "appearance:setTattoos")]
    SetTattoos(Vec<Tattoo>),
    #[serde(rename = "appearance:getModelTattoos")]
    GetModelTattoos,
    #[serde(rename = "appearance:useOutfit")]
    UseOutfit(OutfitData),
    #[serde(rename = "appearance:itemOutfit")]
    ItemOutfit(ShareOutfitRequest),
    #[serde(rename = "appearance:renameOutfit")]
    RenameOutfit(RenameOutfitRequest),
    #[serde(rename = "appearance:deleteOutfit")]
    DeleteOutfit { id: u32 },
    #[serde(rename = "appearance:saveOutfit")]
    SaveOutfit(SaveOutfitRequest),
    #[serde(rename = "appearance:importOutfit")]
    ImportOutfit(ImportOutfitRequest),
    #[serde(rename = "appearance:fetchOutfit")]
    FetchOutfits,
}
