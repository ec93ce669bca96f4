//! Restriction policy resolution.
//!
//! A session's effective restriction set is the base blacklist plus every
//! group override the player is not exempt from. Exemption is granted by
//! the zone: a zone lists the job/gang names whose members keep the base
//! rules only. Resolution happens once per session open; the result is
//! immutable for the session's duration and only informs the UI which
//! entries to hide. Enforcement, if any, is a collaborator's concern.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog;

/// Group kind key for job-based overrides.
pub const GROUP_JOBS: &str = "jobs";
/// Group kind key for gang-based overrides.
pub const GROUP_GANGS: &str = "gangs";

/// Forbidden models and per-slot value sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Blacklist {
    #[serde(default)]
    pub models: BTreeSet<String>,
    #[serde(default)]
    pub drawables: BTreeMap<String, BTreeSet<i32>>,
    #[serde(default)]
    pub props: BTreeMap<String, BTreeSet<i32>>,
}

impl Blacklist {
    #[must_use]
    pub fn blocks_model(&self, model: &str) -> bool {
        self.models.contains(model)
    }

    #[must_use]
    pub fn blocks_drawable(&self, slot: &str, value: i32) -> bool {
        self.drawables.get(slot).is_some_and(|set| set.contains(&value))
    }

    #[must_use]
    pub fn blocks_prop(&self, slot: &str, value: i32) -> bool {
        self.props.get(slot).is_some_and(|set| set.contains(&value))
    }
}

/// Per-owner model allow-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AllowList {
    #[serde(default)]
    pub characters: BTreeMap<String, Vec<String>>,
}

/// Restriction tables as configured: the always-applied base set, group
/// overrides keyed by kind then group name, and the model allow-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistConfig {
    #[serde(default)]
    pub base: Blacklist,
    #[serde(default)]
    pub group_types: BTreeMap<String, BTreeMap<String, Blacklist>>,
    #[serde(default)]
    pub allow_list: AllowList,
}

/// Contextual scope a session is opened against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Menu type the zone maps to.
    #[serde(rename = "type")]
    pub kind: String,
    /// Jobs exempt from job-group overrides in this zone.
    #[serde(default)]
    pub jobs: Vec<String>,
    /// Gangs exempt from gang-group overrides in this zone.
    #[serde(default)]
    pub gangs: Vec<String>,
}

/// Subject gender, resolved from framework data at session open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Default base model for the gender, used by character creation.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Male => catalog::MALE_FREEMODE_MODEL,
            Self::Female => catalog::FEMALE_FREEMODE_MODEL,
        }
    }
}

/// Membership in one group (job or gang).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembership {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub rank: u32,
}

/// The player data policy resolution runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    /// Stable owner identifier for outfit and allow-list lookups.
    pub citizen_id: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub job: GroupMembership,
    #[serde(default)]
    pub gang: GroupMembership,
}

/// Key-wise union of `overlay` into `base`.
///
/// Models and each per-slot value set combine; nothing is replaced
/// wholesale, so overrides from several non-exempt groups compose
/// additively.
#[must_use]
pub fn merge(mut base: Blacklist, overlay: &Blacklist) -> Blacklist {
    base.models.extend(overlay.models.iter().cloned());
    for (slot, values) in &overlay.drawables {
        base.drawables
            .entry(slot.clone())
            .or_default()
            .extend(values.iter().copied());
    }
    for (slot, values) in &overlay.props {
        base.props
            .entry(slot.clone())
            .or_default()
            .extend(values.iter().copied());
    }
    base
}

fn exempt(kind: &str, zone: &Zone, identity: &PlayerIdentity) -> bool {
    match kind {
        GROUP_JOBS => zone.jobs.iter().any(|job| *job == identity.job.name),
        GROUP_GANGS => zone.gangs.iter().any(|gang| *gang == identity.gang.name),
        _ => false,
    }
}

/// Effective restriction set for a session.
///
/// Without a zone (generic/base mode) the base set applies unmodified.
/// Against a zone, every group override whose kind the player is not
/// exempt from is unioned in.
#[must_use]
pub fn resolve_blacklist(
    config: &BlacklistConfig,
    zone: Option<&Zone>,
    identity: &PlayerIdentity,
) -> Blacklist {
    let Some(zone) = zone else {
        return config.base.clone();
    };

    let mut effective = config.base.clone();
    for (kind, groups) in &config.group_types {
        if exempt(kind, zone, identity) {
            continue;
        }
        for overlay in groups.values() {
            effective = merge(effective, overlay);
        }
    }
    effective
}

/// Effective model list for an owner.
///
/// With no per-owner allow-list the global list already applies. Otherwise
/// every global model missing from the owner's list is appended in place;
/// repeated invocation adds nothing.
#[must_use]
pub fn expand_allowlist(models: &[String], allow_list: &mut AllowList, owner: &str) -> Vec<String> {
    let Some(owned) = allow_list.characters.get_mut(owner) else {
        return models.to_vec();
    };

    for model in models {
        if !owned.contains(model) {
            owned.push(model.clone());
        }
    }
    owned.clone()
}
