//! Static configuration.
//!
//! Model list, restriction tables, tattoo catalogs, and menu definitions
//! are loaded once at startup and treated as immutable afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::policy::BlacklistConfig;

/// Menu tab that enables the outfit manager.
pub const TAB_OUTFITS: &str = "outfits";
/// Menu tab that enables model selection.
pub const TAB_HERITAGE: &str = "heritage";
/// Menu tab that enables the tattoo catalog.
pub const TAB_TATTOOS: &str = "tattoos";

/// One menu definition, keyed by zone type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    #[serde(default)]
    pub tabs: Vec<String>,
    #[serde(default = "default_allow_exit")]
    pub allow_exit: bool,
}

impl MenuConfig {
    #[must_use]
    pub fn has_tab(&self, tab: &str) -> bool {
        self.tabs.iter().any(|t| t == tab)
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            allow_exit: default_allow_exit(),
        }
    }
}

fn default_allow_exit() -> bool {
    true
}

/// One DLC pack's tattoo name list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TattooDlcList {
    pub dlc: String,
    #[serde(default)]
    pub tattoos: Vec<String>,
}

/// One tattoo zone category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TattooCategory {
    pub zone: String,
    pub label: String,
    pub index: usize,
}

/// Tattoo catalog inputs: DLC name lists plus zone categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TattooConfig {
    #[serde(default)]
    pub dlcs: Vec<TattooDlcList>,
    #[serde(default)]
    pub categories: Vec<TattooCategory>,
}

/// Complete static configuration for the appearance editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceConfig {
    /// Registered model names, in selection order.
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub blacklist: BlacklistConfig,
    #[serde(default)]
    pub tattoos: TattooConfig,
    /// Menu definitions keyed by zone type.
    #[serde(default)]
    pub menus: BTreeMap<String, MenuConfig>,
}

impl AppearanceConfig {
    /// Empty configuration (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid
    /// configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
