//! Edit session lifecycle.
//!
//! One [`Session`] value owns everything a live edit touches: the cached
//! appearance, the outfit collection, the resolved tattoo catalog, and the
//! single-flight controller. Completions of round trips started by an
//! older session land in that session's own state and can never corrupt a
//! newer one. Callers keep at most one live session at a time.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::appearance::Appearance;
use crate::catalog;
use crate::channel::AppearanceChannel;
use crate::config::{AppearanceConfig, TAB_HERITAGE, TAB_OUTFITS, TAB_TATTOOS};
use crate::edits::EditController;
use crate::engine::{CharacterEngine, PedHandle};
use crate::hash::hash_key;
use crate::outfits::{Outfit, OutfitManager};
use crate::policy::{
    Blacklist, GroupMembership, PlayerIdentity, Zone, expand_allowlist, resolve_blacklist,
};
use crate::snapshot::{self, Subject};
use crate::tattoo::{self, TattooZone};

/// How a session is opened: against a configured zone carrying exemption
/// lists, or generically by menu type (base restrictions only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneRef {
    Zone(Zone),
    Kind(String),
}

impl ZoneRef {
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Zone(zone) => &zone.kind,
            Self::Kind(kind) => kind,
        }
    }

    #[must_use]
    pub const fn zone(&self) -> Option<&Zone> {
        match self {
            Self::Zone(zone) => Some(zone),
            Self::Kind(_) => None,
        }
    }
}

/// Live state shared between the controller and the managers.
#[derive(Debug, Default)]
pub struct SessionState {
    pub appearance: RefCell<Appearance>,
    /// Resolved tattoo catalog; `None` until the tattoos tab loads it.
    pub tattoo_zones: RefCell<Option<Vec<TattooZone>>>,
    /// Toggle state per item, seeded off at open.
    pub toggles: RefCell<BTreeMap<String, bool>>,
}

impl SessionState {
    #[must_use]
    pub fn new(appearance: Appearance, tattoo_zones: Option<Vec<TattooZone>>) -> Self {
        let toggles = catalog::TOGGLE_ITEMS
            .iter()
            .map(|item| ((*item).to_string(), false))
            .collect();
        Self {
            appearance: RefCell::new(appearance),
            tattoo_zones: RefCell::new(tattoo_zones),
            toggles: RefCell::new(toggles),
        }
    }
}

/// Payload for the UI's data push at session open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub tabs: Vec<String>,
    pub appearance: Appearance,
    pub blacklist: Blacklist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tattoos: Option<Vec<TattooZone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfits: Option<Vec<Outfit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    pub allow_exit: bool,
    pub job: GroupMembership,
}

/// A freshly opened session plus the payload for the UI push.
pub struct OpenedSession<E, C> {
    pub session: Session<E, C>,
    pub data: SessionData,
    /// Fires when the session closes. Present only for creation sessions,
    /// which park their caller until the new character is finalized.
    pub resume: Option<oneshot::Receiver<()>>,
}

/// One live appearance edit session.
pub struct Session<E, C> {
    engine: Rc<E>,
    ped: PedHandle,
    state: Rc<SessionState>,
    edits: EditController<C>,
    outfits: OutfitManager<C>,
    blacklist: Blacklist,
    original: Appearance,
    saved_armour: u32,
    is_open: Cell<bool>,
    pending_resume: RefCell<Option<oneshot::Sender<()>>>,
}

impl<E, C> Session<E, C>
where
    E: CharacterEngine,
    C: AppearanceChannel,
{
    /// Open an edit session for `ped`.
    ///
    /// Parks the current armour level, resolves the restriction set
    /// against `zone`, and loads outfit/model/tattoo data only for the
    /// tabs the zone's menu actually shows. A creation session first
    /// forces the player's gender-default model and parks a resume signal
    /// that [`close`](Self::close) fires.
    ///
    /// # Errors
    ///
    /// Fails when the zone type has no configured menu or a required
    /// round trip (outfit fetch, creation model swap) fails.
    pub async fn open(
        engine: Rc<E>,
        channel: Rc<C>,
        config: &AppearanceConfig,
        identity: PlayerIdentity,
        ped: PedHandle,
        zone: &ZoneRef,
        creation: bool,
    ) -> anyhow::Result<OpenedSession<E, C>> {
        let menu = config
            .menus
            .get(zone.kind())
            .with_context(|| format!("no menu configured for zone type '{}'", zone.kind()))?;

        let saved_armour = engine.armour(ped);
        let allow_exit = if creation { false } else { menu.allow_exit };

        let resume = if creation {
            channel
                .set_model(hash_key(identity.gender.default_model()))
                .await
                .context("could not apply the creation base model")?;
            Some(oneshot::channel())
        } else {
            None
        };

        let outfit_list = if menu.has_tab(TAB_OUTFITS) {
            Some(
                channel
                    .fetch_outfits(&identity.citizen_id)
                    .await
                    .context("could not fetch outfits")?,
            )
        } else {
            None
        };

        let models = menu.has_tab(TAB_HERITAGE).then(|| {
            let mut allow_list = config.blacklist.allow_list.clone();
            expand_allowlist(&config.models, &mut allow_list, &identity.citizen_id)
        });

        let tattoos = menu
            .has_tab(TAB_TATTOOS)
            .then(|| tattoo::resolve_zones(engine.as_ref(), &config.tattoos, ped));

        let blacklist = resolve_blacklist(&config.blacklist, zone.zone(), &identity);

        let appearance = snapshot::build(
            engine.as_ref(),
            channel.as_ref(),
            &config.models,
            ped,
            Subject::LocalPlayer,
        )
        .await;

        let state = Rc::new(SessionState::new(appearance.clone(), tattoos.clone()));
        let edits = EditController::new(Rc::clone(&channel), Rc::clone(&state));
        let outfits = OutfitManager::new(Rc::clone(&channel), Rc::clone(&state));
        if let Some(list) = &outfit_list {
            outfits.replace(list.clone());
        }

        let data = SessionData {
            tabs: menu.tabs.clone(),
            appearance: appearance.clone(),
            blacklist: blacklist.clone(),
            tattoos,
            outfits: outfit_list,
            models,
            allow_exit,
            job: identity.job.clone(),
        };

        let (sender, receiver) = match resume {
            Some((sender, receiver)) => (Some(sender), Some(receiver)),
            None => (None, None),
        };

        debug!("appearance session opened for ped {ped}");
        let session = Self {
            engine,
            ped,
            state,
            edits,
            outfits,
            blacklist,
            original: appearance,
            saved_armour,
            is_open: Cell::new(true),
            pending_resume: RefCell::new(sender),
        };

        Ok(OpenedSession {
            session,
            data,
            resume: receiver,
        })
    }

    /// Close the session: restore the parked armour level and fire the
    /// pending resume signal, if any. In-flight round trips are not
    /// cancelled; their completions land in this session's state.
    pub fn close(&self) {
        self.engine.set_armour(self.ped, self.saved_armour);
        if let Some(sender) = self.pending_resume.borrow_mut().take() {
            let _ = sender.send(());
        }
        self.is_open.set(false);
        debug!("appearance session closed for ped {}", self.ped);
    }

    /// The single-flight mutation controller.
    #[must_use]
    pub const fn edits(&self) -> &EditController<C> {
        &self.edits
    }

    /// The outfit collection manager.
    #[must_use]
    pub const fn outfits(&self) -> &OutfitManager<C> {
        &self.outfits
    }

    /// Shared live state (cached appearance, tattoo catalog, toggles).
    #[must_use]
    pub fn state(&self) -> Rc<SessionState> {
        Rc::clone(&self.state)
    }

    /// Current cached appearance.
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.state.appearance.borrow().clone()
    }

    /// The untouched snapshot taken at open; cancelling an edit session
    /// hands this back to the collaborators for re-application.
    #[must_use]
    pub const fn original(&self) -> &Appearance {
        &self.original
    }

    /// Effective restriction set, immutable for the session's duration.
    #[must_use]
    pub const fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    #[must_use]
    pub const fn saved_armour(&self) -> u32 {
        self.saved_armour
    }
}
