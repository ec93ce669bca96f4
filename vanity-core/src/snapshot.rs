//! Live appearance snapshots.
//!
//! One consistent [`Appearance`] record is assembled by walking the slot
//! catalogs against the engine. Engine queries are synchronous and cannot
//! fail; the only suspension point is the tattoo fetch, made for the local
//! player alone.

use std::collections::BTreeMap;

use log::warn;

use crate::appearance::{
    Appearance, Clothes, FaceFeature, HairColor, OverlayEntry, Skin, SlotState, SlotTotal,
    normalize_overlay_value,
};
use crate::blend;
use crate::catalog;
use crate::channel::AppearanceChannel;
use crate::engine::{CharacterEngine, PedHandle};
use crate::hash::hash_key;
use crate::tattoo::TattooList;

/// Who a snapshot is being taken of. Only the local player carries
/// tattoos; resolving them for anyone else would cost a pointless remote
/// round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    LocalPlayer,
    Other,
}

/// Position of `model` in the configured model list.
#[must_use]
pub fn find_model_index(models: &[String], model: u32) -> Option<usize> {
    models.iter().position(|name| hash_key(name) == model)
}

#[must_use]
pub fn hair_color<E: CharacterEngine>(engine: &E, ped: PedHandle) -> HairColor {
    HairColor {
        color: engine.hair_color(ped),
        highlight: engine.hair_highlight_color(ped),
    }
}

#[must_use]
pub fn head_blend<E: CharacterEngine>(engine: &E, ped: PedHandle) -> blend::HeadBlend {
    blend::decode(&engine.head_blend_buffer(ped))
}

/// Walk the overlay catalog, producing entries and per-overlay value
/// counts.
#[must_use]
pub fn head_overlays<E: CharacterEngine>(
    engine: &E,
    ped: PedHandle,
) -> (BTreeMap<String, OverlayEntry>, BTreeMap<String, u32>) {
    let mut entries = BTreeMap::new();
    let mut totals = BTreeMap::new();

    for (i, name) in catalog::HEAD_OVERLAYS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let index = i as u32;
        totals.insert((*name).to_string(), engine.head_overlay_value_count(index));

        let entry = if *name == catalog::EYE_COLOR_OVERLAY {
            OverlayEntry::EyeColor {
                index,
                overlay_value: engine.eye_color(ped),
            }
        } else {
            let raw = engine.head_overlay(ped, index);
            OverlayEntry::Full {
                index,
                overlay_value: normalize_overlay_value(raw.value),
                colour_type: raw.colour_type,
                first_color: raw.first_color,
                second_color: raw.second_color,
                overlay_opacity: raw.opacity,
            }
        };
        entries.insert((*name).to_string(), entry);
    }

    (entries, totals)
}

/// Face-feature morphs; empty for models without head morphs.
#[must_use]
pub fn head_structure<E: CharacterEngine>(
    engine: &E,
    ped: PedHandle,
) -> BTreeMap<String, FaceFeature> {
    if !catalog::is_freemode_model(engine.entity_model(ped)) {
        return BTreeMap::new();
    }

    catalog::FACE_FEATURES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            #[allow(clippy::cast_possible_truncation)]
            let index = i as u32;
            (
                (*name).to_string(),
                FaceFeature {
                    index,
                    value: engine.face_feature(ped, index),
                },
            )
        })
        .collect()
}

/// Walk the drawable catalog; texture bounds are taken against the current
/// variation.
#[must_use]
pub fn drawables<E: CharacterEngine>(
    engine: &E,
    ped: PedHandle,
) -> (BTreeMap<String, SlotState>, BTreeMap<String, SlotTotal>) {
    let mut slots = BTreeMap::new();
    let mut totals = BTreeMap::new();

    for (i, name) in catalog::DRAWABLE_SLOTS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let index = i as u32;
        let current = engine.drawable_variation(ped, index);

        totals.insert(
            (*name).to_string(),
            SlotTotal {
                index,
                total: engine.drawable_variation_count(ped, index),
                textures: engine.drawable_texture_count(ped, index, current),
            },
        );
        slots.insert(
            (*name).to_string(),
            SlotState {
                index,
                value: current,
                texture: engine.drawable_texture(ped, index),
            },
        );
    }

    (slots, totals)
}

/// Walk the prop catalog; anchors come from the catalog, not the list
/// position.
#[must_use]
pub fn props<E: CharacterEngine>(
    engine: &E,
    ped: PedHandle,
) -> (BTreeMap<String, SlotState>, BTreeMap<String, SlotTotal>) {
    let mut slots = BTreeMap::new();
    let mut totals = BTreeMap::new();

    for (name, anchor) in catalog::PROP_SLOTS {
        let current = engine.prop_index(ped, anchor);

        totals.insert(
            name.to_string(),
            SlotTotal {
                index: anchor,
                total: engine.prop_count(ped, anchor),
                textures: engine.prop_texture_count(ped, anchor, current),
            },
        );
        slots.insert(
            name.to_string(),
            SlotState {
                index: anchor,
                value: current,
                texture: engine.prop_texture(ped, anchor),
            },
        );
    }

    (slots, totals)
}

/// Assemble one consistent appearance record from live engine state.
///
/// The tattoo fetch is the only remote call and only happens for
/// [`Subject::LocalPlayer`]; a failed fetch degrades to an empty list.
pub async fn build<E, C>(
    engine: &E,
    channel: &C,
    models: &[String],
    ped: PedHandle,
    subject: Subject,
) -> Appearance
where
    E: CharacterEngine,
    C: AppearanceChannel,
{
    let (head_overlay, head_overlay_total) = head_overlays(engine, ped);
    let (drawables, draw_total) = drawables(engine, ped);
    let (props, prop_total) = props(engine, ped);
    let model = engine.entity_model(ped);

    let tattoos = if subject == Subject::LocalPlayer {
        match channel.fetch_tattoos().await {
            Ok(tattoos) => TattooList::from_vec(tattoos),
            Err(err) => {
                warn!("could not fetch applied tattoos, starting empty: {err}");
                TattooList::new()
            }
        }
    } else {
        TattooList::new()
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let model_index = find_model_index(models, model).map_or(-1, |i| i as i32);

    Appearance {
        model,
        model_index,
        hair_color: hair_color(engine, ped),
        head_blend: head_blend(engine, ped),
        head_overlay,
        head_overlay_total,
        head_structure: head_structure(engine, ped),
        drawables,
        draw_total,
        props,
        prop_total,
        tattoos,
    }
}

/// Clothing-only snapshot.
#[must_use]
pub fn clothes<E: CharacterEngine>(engine: &E, ped: PedHandle) -> Clothes {
    let (head_overlay, _) = head_overlays(engine, ped);
    let (drawables, _) = drawables(engine, ped);
    let (props, _) = props(engine, ped);
    Clothes {
        head_overlay,
        drawables,
        props,
    }
}

/// Genetics-only snapshot.
#[must_use]
pub fn skin<E: CharacterEngine>(engine: &E, ped: PedHandle) -> Skin {
    Skin {
        model: engine.entity_model(ped),
        head_blend: head_blend(engine, ped),
        head_structure: head_structure(engine, ped),
        hair_color: hair_color(engine, ped),
    }
}
