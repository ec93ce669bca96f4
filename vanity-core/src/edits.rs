//! Single-flight mutation control.
//!
//! Every mutable category allows at most one outstanding round trip. A
//! second edit arriving while the first is in flight is dropped, not
//! queued: interleaved bound queries against the engine would corrupt the
//! cached snapshot. The in-flight flag is cleared by a drop guard, so no
//! branch (acknowledgement, channel failure, cancelled future) can wedge a
//! category for the rest of the session.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

use crate::appearance::{Appearance, FaceFeature, HairColor, OverlayEntry, SlotState};
use crate::blend::HeadBlend;
use crate::catalog;
use crate::channel::{
    AppearanceChannel, ChannelResult, FeatureUpdate, HeadOverlayUpdate, SlotEditRequest,
    ToggleRequest,
};
use crate::session::SessionState;
use crate::tattoo::{Tattoo, TattooList};

/// Mutable edit categories guarded by single-flight flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCategory {
    Prop,
    Drawable,
    Toggle,
}

/// Result of a guarded edit: applied with the reconciled slot state, or
/// dropped without a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome<T> {
    Applied(T),
    Dropped,
}

impl<T> EditOutcome<T> {
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped)
    }

    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Dropped => None,
        }
    }
}

#[derive(Debug, Default)]
struct FlightFlags {
    prop: Cell<bool>,
    drawable: Cell<bool>,
    toggle: Cell<bool>,
}

impl FlightFlags {
    const fn cell(&self, category: EditCategory) -> &Cell<bool> {
        match category {
            EditCategory::Prop => &self.prop,
            EditCategory::Drawable => &self.drawable,
            EditCategory::Toggle => &self.toggle,
        }
    }
}

/// Clears the in-flight flag on every exit path.
struct FlightGuard<'a>(&'a Cell<bool>);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Clone, Copy)]
enum SlotKind {
    Prop,
    Drawable,
}

impl SlotKind {
    const fn category(self) -> EditCategory {
        match self {
            Self::Prop => EditCategory::Prop,
            Self::Drawable => EditCategory::Drawable,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Prop => "prop",
            Self::Drawable => "drawable",
        }
    }
}

/// Serializes category-scoped edits against the remote mutation channel
/// and reconciles acknowledged bounds into the cached snapshot.
pub struct EditController<C> {
    channel: Rc<C>,
    state: Rc<SessionState>,
    flags: FlightFlags,
}

impl<C: AppearanceChannel> EditController<C> {
    #[must_use]
    pub fn new(channel: Rc<C>, state: Rc<SessionState>) -> Self {
        Self {
            channel,
            state,
            flags: FlightFlags::default(),
        }
    }

    /// Whether a category currently has a request in flight.
    #[must_use]
    pub fn in_flight(&self, category: EditCategory) -> bool {
        self.flags.cell(category).get()
    }

    /// Prop edit under single-flight discipline.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is; the cached snapshot is untouched
    /// and the category usable again.
    pub async fn set_prop(
        &self,
        slot: &str,
        value: i32,
        is_texture: bool,
    ) -> ChannelResult<EditOutcome<SlotState>> {
        self.set_slot(SlotKind::Prop, slot, value, is_texture).await
    }

    /// Drawable edit under single-flight discipline.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is; the cached snapshot is untouched
    /// and the category usable again.
    pub async fn set_drawable(
        &self,
        slot: &str,
        value: i32,
        is_texture: bool,
    ) -> ChannelResult<EditOutcome<SlotState>> {
        self.set_slot(SlotKind::Drawable, slot, value, is_texture)
            .await
    }

    async fn set_slot(
        &self,
        kind: SlotKind,
        slot: &str,
        value: i32,
        is_texture: bool,
    ) -> ChannelResult<EditOutcome<SlotState>> {
        let cell = self.flags.cell(kind.category());
        if cell.replace(true) {
            debug!("dropped {} edit for {slot}: already in flight", kind.label());
            return Ok(EditOutcome::Dropped);
        }
        let _guard = FlightGuard(cell);

        let Some(mut slot_state) = self.cached_slot(kind, slot) else {
            warn!("dropped {} edit for unknown slot {slot}", kind.label());
            return Ok(EditOutcome::Dropped);
        };

        if is_texture {
            slot_state.texture = value;
        } else {
            slot_state.value = value;
        }

        let request = SlotEditRequest {
            value: slot_state.value,
            index: slot_state.index,
            texture: slot_state.texture,
            is_texture,
        };
        let textures = match kind {
            SlotKind::Prop => self.channel.set_prop(request).await?,
            SlotKind::Drawable => self.channel.set_drawable(request).await?,
        };

        let mut appearance = self.state.appearance.borrow_mut();
        let Appearance {
            drawables,
            draw_total,
            props,
            prop_total,
            ..
        } = &mut *appearance;
        let (slots, totals) = match kind {
            SlotKind::Prop => (props, prop_total),
            SlotKind::Drawable => (drawables, draw_total),
        };

        // A base-variation change resets the texture and refreshes its
        // bound; a texture-only change leaves bounds alone.
        if !is_texture {
            slot_state.texture = 0;
            if let Some(total) = totals.get_mut(slot) {
                total.textures = textures;
            }
        }
        slots.insert(slot.to_string(), slot_state);

        Ok(EditOutcome::Applied(slot_state))
    }

    fn cached_slot(&self, kind: SlotKind, slot: &str) -> Option<SlotState> {
        let appearance = self.state.appearance.borrow();
        let slots = match kind {
            SlotKind::Prop => &appearance.props,
            SlotKind::Drawable => &appearance.drawables,
        };
        slots.get(slot).copied()
    }

    /// Toggle an item under single-flight discipline; the acknowledged
    /// state lands in the session's toggle table.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is.
    pub async fn toggle_item(&self, request: ToggleRequest) -> ChannelResult<EditOutcome<bool>> {
        let cell = self.flags.cell(EditCategory::Toggle);
        if cell.replace(true) {
            debug!("dropped toggle for {}: already in flight", request.item);
            return Ok(EditOutcome::Dropped);
        }
        let _guard = FlightGuard(cell);

        let item = request.item.clone();
        let state = self.channel.toggle_item(request).await?;
        self.state.toggles.borrow_mut().insert(item, state);
        Ok(EditOutcome::Applied(state))
    }

    /// Swap the subject model. The response carries a full re-snapshot;
    /// if tattoo zones were already resolved this session, they are
    /// re-resolved for the new model.
    ///
    /// # Errors
    ///
    /// Returns the channel failure of the model swap itself; a failed
    /// tattoo refresh is absorbed with a warning.
    pub async fn set_model(&self, model: u32) -> ChannelResult<Appearance> {
        let appearance = self.channel.set_model(model).await?;
        *self.state.appearance.borrow_mut() = appearance.clone();

        let loaded = self.state.tattoo_zones.borrow().is_some();
        if loaded {
            match self.channel.model_tattoos().await {
                Ok(zones) => *self.state.tattoo_zones.borrow_mut() = Some(zones),
                Err(err) => warn!("tattoo catalog refresh failed: {err}"),
            }
        }
        Ok(appearance)
    }

    /// # Errors
    ///
    /// Returns the channel failure as-is.
    pub async fn set_head_blend(&self, blend: HeadBlend) -> ChannelResult<()> {
        self.channel.set_head_blend(blend).await?;
        self.state.appearance.borrow_mut().head_blend = blend;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the channel failure as-is.
    pub async fn set_head_structure(&self, update: FeatureUpdate) -> ChannelResult<()> {
        self.channel.set_head_structure(update.clone()).await?;
        self.state.appearance.borrow_mut().head_structure.insert(
            update.id,
            FaceFeature {
                index: update.index,
                value: update.value,
            },
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the channel failure as-is.
    pub async fn set_head_overlay(&self, update: HeadOverlayUpdate) -> ChannelResult<()> {
        self.channel.set_head_overlay(update.clone()).await?;

        let mut appearance = self.state.appearance.borrow_mut();
        match update {
            HeadOverlayUpdate::Entry(entry) => {
                if let Some(name) = catalog::HEAD_OVERLAYS.get(entry.index() as usize) {
                    appearance.head_overlay.insert((*name).to_string(), entry);
                }
            }
            HeadOverlayUpdate::HairColor {
                hair_color,
                hair_highlight,
                ..
            } => {
                appearance.hair_color = HairColor {
                    color: hair_color,
                    highlight: hair_highlight,
                };
            }
            HeadOverlayUpdate::EyeColor(value) => {
                if let Some(OverlayEntry::EyeColor { overlay_value, .. }) =
                    appearance.head_overlay.get_mut(catalog::EYE_COLOR_OVERLAY)
                {
                    *overlay_value = value;
                }
            }
        }
        Ok(())
    }

    /// Replace the applied tattoo set; the cache follows only a positive
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is.
    pub async fn set_tattoos(&self, tattoos: Vec<Tattoo>) -> ChannelResult<bool> {
        let ok = self.channel.set_tattoos(&tattoos).await?;
        if ok {
            self.state.appearance.borrow_mut().tattoos = TattooList::from_vec(tattoos);
        }
        Ok(ok)
    }
}
