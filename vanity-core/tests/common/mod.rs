//! Shared fixtures: an in-memory engine and a scripted remote channel.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use byteorder::{ByteOrder, LittleEndian};
use tokio::sync::oneshot;

use vanity_core::appearance::Appearance;
use vanity_core::blend::{HEAD_BLEND_BUFFER_LEN, HeadBlend};
use vanity_core::catalog;
use vanity_core::channel::{
    AppearanceChannel, ChannelError, ChannelResult, FeatureUpdate, HeadOverlayUpdate,
    SlotEditRequest, ToggleRequest,
};
use vanity_core::engine::{CharacterEngine, PedHandle, RawOverlay};
use vanity_core::outfits::{
    ImportOutfitRequest, ImportedOutfit, Outfit, OutfitData, RenameOutfitRequest,
    SaveOutfitRequest, ShareOutfitRequest,
};
use vanity_core::tattoo::{Tattoo, TattooZone};

pub const PED: PedHandle = 7;

/// HashMap-backed engine double; unset queries answer engine defaults.
pub struct FakeEngine {
    pub model: Cell<u32>,
    pub armour: Cell<u32>,
    pub drawables: RefCell<HashMap<u32, (i32, i32)>>,
    pub drawable_counts: RefCell<HashMap<u32, (u32, u32)>>,
    pub props: RefCell<HashMap<u32, (i32, i32)>>,
    pub prop_counts: RefCell<HashMap<u32, (u32, u32)>>,
    pub overlays: RefCell<HashMap<u32, RawOverlay>>,
    pub overlay_counts: RefCell<HashMap<u32, u32>>,
    pub eye_color: Cell<i32>,
    pub hair: Cell<(i32, i32)>,
    pub features: RefCell<HashMap<u32, f32>>,
    pub blend: RefCell<[u8; HEAD_BLEND_BUFFER_LEN]>,
    pub decoration_zones: RefCell<HashMap<(u32, u32), i32>>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            model: Cell::new(catalog::male_model_hash()),
            armour: Cell::new(0),
            drawables: RefCell::default(),
            drawable_counts: RefCell::default(),
            props: RefCell::default(),
            prop_counts: RefCell::default(),
            overlays: RefCell::default(),
            overlay_counts: RefCell::default(),
            eye_color: Cell::new(0),
            hair: Cell::new((0, 0)),
            features: RefCell::default(),
            blend: RefCell::new([0u8; HEAD_BLEND_BUFFER_LEN]),
            decoration_zones: RefCell::default(),
        }
    }
}

impl FakeEngine {
    /// Write a typed blend into the raw buffer the engine hands back.
    pub fn set_blend(&self, blend: &HeadBlend) {
        let mut buffer = [0u8; HEAD_BLEND_BUFFER_LEN];
        let ids = [
            (0usize, blend.shape_first),
            (2, blend.shape_second),
            (4, blend.shape_third),
            (6, blend.skin_first),
            (8, blend.skin_second),
            (10, blend.skin_third),
            (18, u32::from(blend.has_parent)),
        ];
        for (word, value) in ids {
            LittleEndian::write_u32(&mut buffer[word * 4..word * 4 + 4], value);
        }
        let mixes = [
            (48usize, blend.shape_mix),
            (56, blend.skin_mix),
            (64, blend.third_mix),
        ];
        for (at, value) in mixes {
            LittleEndian::write_f32(&mut buffer[at..at + 4], value);
        }
        *self.blend.borrow_mut() = buffer;
    }
}

impl CharacterEngine for FakeEngine {
    fn drawable_variation(&self, _ped: PedHandle, component: u32) -> i32 {
        self.drawables.borrow().get(&component).map_or(0, |s| s.0)
    }

    fn drawable_texture(&self, _ped: PedHandle, component: u32) -> i32 {
        self.drawables.borrow().get(&component).map_or(0, |s| s.1)
    }

    fn drawable_variation_count(&self, _ped: PedHandle, component: u32) -> u32 {
        self.drawable_counts
            .borrow()
            .get(&component)
            .map_or(1, |c| c.0)
    }

    fn drawable_texture_count(&self, _ped: PedHandle, component: u32, _drawable: i32) -> u32 {
        self.drawable_counts
            .borrow()
            .get(&component)
            .map_or(1, |c| c.1)
    }

    fn prop_index(&self, _ped: PedHandle, anchor: u32) -> i32 {
        self.props.borrow().get(&anchor).map_or(-1, |s| s.0)
    }

    fn prop_texture(&self, _ped: PedHandle, anchor: u32) -> i32 {
        self.props.borrow().get(&anchor).map_or(-1, |s| s.1)
    }

    fn prop_count(&self, _ped: PedHandle, anchor: u32) -> u32 {
        self.prop_counts.borrow().get(&anchor).map_or(0, |c| c.0)
    }

    fn prop_texture_count(&self, _ped: PedHandle, anchor: u32, _prop: i32) -> u32 {
        self.prop_counts.borrow().get(&anchor).map_or(0, |c| c.1)
    }

    fn head_overlay_value_count(&self, overlay: u32) -> u32 {
        self.overlay_counts.borrow().get(&overlay).copied().unwrap_or(0)
    }

    fn head_overlay(&self, _ped: PedHandle, overlay: u32) -> RawOverlay {
        self.overlays
            .borrow()
            .get(&overlay)
            .copied()
            .unwrap_or(RawOverlay {
                value: 255,
                ..RawOverlay::default()
            })
    }

    fn eye_color(&self, _ped: PedHandle) -> i32 {
        self.eye_color.get()
    }

    fn hair_color(&self, _ped: PedHandle) -> i32 {
        self.hair.get().0
    }

    fn hair_highlight_color(&self, _ped: PedHandle) -> i32 {
        self.hair.get().1
    }

    fn face_feature(&self, _ped: PedHandle, feature: u32) -> f32 {
        self.features.borrow().get(&feature).copied().unwrap_or(0.0)
    }

    fn head_blend_buffer(&self, _ped: PedHandle) -> [u8; HEAD_BLEND_BUFFER_LEN] {
        *self.blend.borrow()
    }

    fn entity_model(&self, _ped: PedHandle) -> u32 {
        self.model.get()
    }

    fn decoration_zone(&self, dlc_hash: u32, overlay_hash: u32) -> i32 {
        self.decoration_zones
            .borrow()
            .get(&(dlc_hash, overlay_hash))
            .copied()
            .unwrap_or(-1)
    }

    fn armour(&self, _ped: PedHandle) -> u32 {
        self.armour.get()
    }

    fn set_armour(&self, _ped: PedHandle, value: u32) {
        self.armour.set(value);
    }
}

/// Channel double with scripted responses and a call log.
pub struct ScriptedChannel {
    pub calls: RefCell<Vec<String>>,
    /// The next round trip fails with a rejection when set.
    pub fail_next: Cell<bool>,
    /// Acknowledgement for outfit operations and tattoo writes.
    pub ack: Cell<bool>,
    pub texture_count: Cell<u32>,
    pub toggle_state: Cell<bool>,
    pub outfits: RefCell<Vec<Outfit>>,
    pub tattoos: RefCell<Vec<Tattoo>>,
    pub zones: RefCell<Vec<TattooZone>>,
    pub model_response: RefCell<Option<Appearance>>,
    pub import_response: RefCell<Option<ImportedOutfit>>,
    /// When parked, the next prop edit suspends until the sender fires.
    pub prop_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl Default for ScriptedChannel {
    fn default() -> Self {
        Self {
            calls: RefCell::default(),
            fail_next: Cell::new(false),
            ack: Cell::new(true),
            texture_count: Cell::new(0),
            toggle_state: Cell::new(false),
            outfits: RefCell::default(),
            tattoos: RefCell::default(),
            zones: RefCell::default(),
            model_response: RefCell::default(),
            import_response: RefCell::default(),
            prop_gate: RefCell::default(),
        }
    }
}

impl ScriptedChannel {
    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    fn outcome(&self) -> ChannelResult<()> {
        if self.fail_next.replace(false) {
            Err(ChannelError::Rejected("scripted failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl AppearanceChannel for ScriptedChannel {
    async fn set_model(&self, model: u32) -> ChannelResult<Appearance> {
        self.record("setModel");
        self.outcome()?;
        Ok(self.model_response.borrow().clone().unwrap_or_else(|| Appearance {
            model,
            ..Appearance::default()
        }))
    }

    async fn set_head_structure(&self, _update: FeatureUpdate) -> ChannelResult<()> {
        self.record("setHeadStructure");
        self.outcome()
    }

    async fn set_head_overlay(&self, _update: HeadOverlayUpdate) -> ChannelResult<()> {
        self.record("setHeadOverlay");
        self.outcome()
    }

    async fn set_head_blend(&self, _blend: HeadBlend) -> ChannelResult<()> {
        self.record("setHeadBlend");
        self.outcome()
    }

    async fn set_prop(&self, _request: SlotEditRequest) -> ChannelResult<u32> {
        self.record("setProp");
        let gate = self.prop_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.outcome()?;
        Ok(self.texture_count.get())
    }

    async fn set_drawable(&self, _request: SlotEditRequest) -> ChannelResult<u32> {
        self.record("setDrawable");
        self.outcome()?;
        Ok(self.texture_count.get())
    }

    async fn toggle_item(&self, _request: ToggleRequest) -> ChannelResult<bool> {
        self.record("toggleItem");
        self.outcome()?;
        Ok(self.toggle_state.get())
    }

    async fn set_tattoos(&self, _tattoos: &[Tattoo]) -> ChannelResult<bool> {
        self.record("setTattoos");
        self.outcome()?;
        Ok(self.ack.get())
    }

    async fn model_tattoos(&self) -> ChannelResult<Vec<TattooZone>> {
        self.record("getModelTattoos");
        self.outcome()?;
        Ok(self.zones.borrow().clone())
    }

    async fn fetch_tattoos(&self) -> ChannelResult<Vec<Tattoo>> {
        self.record("fetchTattoos");
        self.outcome()?;
        Ok(self.tattoos.borrow().clone())
    }

    async fn save_outfit(&self, _request: SaveOutfitRequest) -> ChannelResult<bool> {
        self.record("saveOutfit");
        self.outcome()?;
        Ok(self.ack.get())
    }

    async fn rename_outfit(&self, _request: RenameOutfitRequest) -> ChannelResult<bool> {
        self.record("renameOutfit");
        self.outcome()?;
        Ok(self.ack.get())
    }

    async fn delete_outfit(&self, _id: u32) -> ChannelResult<bool> {
        self.record("deleteOutfit");
        self.outcome()?;
        Ok(self.ack.get())
    }

    async fn use_outfit(&self, _outfit: &OutfitData) -> ChannelResult<bool> {
        self.record("useOutfit");
        self.outcome()?;
        Ok(self.ack.get())
    }

    async fn import_outfit(
        &self,
        _request: ImportOutfitRequest,
    ) -> ChannelResult<Option<ImportedOutfit>> {
        self.record("importOutfit");
        self.outcome()?;
        Ok(self.import_response.borrow().clone())
    }

    async fn share_outfit(&self, _request: ShareOutfitRequest) -> ChannelResult<()> {
        self.record("itemOutfit");
        self.outcome()
    }

    async fn fetch_outfits(&self, _owner: &str) -> ChannelResult<Vec<Outfit>> {
        self.record("fetchOutfits");
        self.outcome()?;
        Ok(self.outfits.borrow().clone())
    }
}
