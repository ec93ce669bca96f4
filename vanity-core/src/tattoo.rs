//! Tattoo catalog resolution.
//!
//! The configured DLC name lists know nothing about placement; the engine's
//! decoration-zone lookup is the only authority on where a tattoo lands.
//! Resolution cross-references both, keeping only entries whose
//! gender-coded name matches the subject.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog;
use crate::config::TattooConfig;
use crate::engine::{CharacterEngine, PedHandle};
use crate::hash::hash_key;

/// Name suffix marker for female-coded tattoos.
const FEMALE_SUFFIX: &str = "_f";

/// One resolved tattoo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tattoo {
    pub label: String,
    pub hash: u32,
    pub zone: usize,
    pub dlc: String,
}

/// Applied tattoo sequence; small in practice.
pub type TattooList = SmallVec<[Tattoo; 4]>;

/// One DLC bucket within a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TattooDlc {
    pub label: String,
    pub dlc_index: usize,
    #[serde(default)]
    pub tattoos: Vec<Tattoo>,
}

/// One zone of the resolved catalog, bucketed per DLC in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TattooZone {
    pub zone: String,
    pub label: String,
    pub zone_index: usize,
    #[serde(default)]
    pub dlcs: Vec<TattooDlc>,
}

fn female_coded(name: &str) -> bool {
    name.to_lowercase().contains(FEMALE_SUFFIX)
}

/// Build the zone-indexed tattoo catalog for the subject ped.
///
/// A tattoo lands in a zone's DLC bucket only when its gender coding
/// matches the subject's model and the engine resolves the
/// `(dlc, name)` hash pair to that zone. Gender mismatches and failed
/// lookups are silently omitted.
#[must_use]
pub fn resolve_zones<E: CharacterEngine>(
    engine: &E,
    config: &TattooConfig,
    ped: PedHandle,
) -> Vec<TattooZone> {
    let mut zones: Vec<TattooZone> = config
        .categories
        .iter()
        .map(|category| TattooZone {
            zone: category.zone.clone(),
            label: category.label.clone(),
            zone_index: category.index,
            dlcs: config
                .dlcs
                .iter()
                .enumerate()
                .map(|(dlc_index, dlc)| TattooDlc {
                    label: dlc.dlc.clone(),
                    dlc_index,
                    tattoos: Vec::new(),
                })
                .collect(),
        })
        .collect();
    zones.sort_by_key(|zone| zone.zone_index);

    let female = engine.entity_model(ped) == catalog::female_model_hash();

    for (dlc_index, dlc) in config.dlcs.iter().enumerate() {
        let dlc_hash = hash_key(&dlc.dlc);
        for name in &dlc.tattoos {
            if female_coded(name) != female {
                continue;
            }

            let overlay_hash = hash_key(name);
            let Ok(zone_index) = usize::try_from(engine.decoration_zone(dlc_hash, overlay_hash))
            else {
                continue;
            };
            let Some(zone) = zones.iter_mut().find(|zone| zone.zone_index == zone_index) else {
                continue;
            };

            zone.dlcs[dlc_index].tattoos.push(Tattoo {
                label: name.clone(),
                hash: overlay_hash,
                zone: zone_index,
                dlc: dlc.dlc.clone(),
            });
        }
    }

    zones
}
