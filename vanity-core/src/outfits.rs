//! Outfit persistence.
//!
//! Every operation is optimistic-after-acknowledgement: the local
//! collection changes only once the remote end confirms, and a negative
//! acknowledgement leaves it untouched.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::appearance::SlotState;
use crate::channel::{AppearanceChannel, ChannelResult};
use crate::session::SessionState;

/// Drawables/props snapshot an outfit stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutfitData {
    pub drawables: BTreeMap<String, SlotState>,
    pub props: BTreeMap<String, SlotState>,
}

/// A named outfit in an owner's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: u32,
    pub label: String,
    pub outfit: OutfitData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobname: Option<String>,
}

/// Job scope an outfit can be saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobScope {
    pub name: String,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutfitRequest {
    pub label: String,
    pub outfit: OutfitData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobScope>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutfitRequest {
    pub label: String,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutfitRequest {
    pub id: u32,
    pub outfit_name: String,
}

/// Server-assigned entry answered on import; its id is distinct from the
/// source outfit's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedOutfit {
    pub id: u32,
    pub label: String,
    pub outfit: OutfitData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOutfitRequest {
    pub outfit: OutfitData,
    pub label: String,
}

/// CRUD over the owner's named outfits.
pub struct OutfitManager<C> {
    channel: Rc<C>,
    state: Rc<SessionState>,
    outfits: RefCell<Vec<Outfit>>,
}

impl<C: AppearanceChannel> OutfitManager<C> {
    #[must_use]
    pub fn new(channel: Rc<C>, state: Rc<SessionState>) -> Self {
        Self {
            channel,
            state,
            outfits: RefCell::new(Vec::new()),
        }
    }

    /// Current collection, in storage order.
    #[must_use]
    pub fn outfits(&self) -> Vec<Outfit> {
        self.outfits.borrow().clone()
    }

    /// Replace the collection wholesale (session open seeds it this way).
    pub fn replace(&self, outfits: Vec<Outfit>) {
        *self.outfits.borrow_mut() = outfits;
    }

    /// Persist the live drawables/props under `label`.
    ///
    /// On acknowledgement the new entry is appended with an id of
    /// collection-length + 1 and its own copy of the snapshot, so later
    /// edits to the live session cannot alias into it.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is; the collection is untouched.
    pub async fn save(&self, label: &str, job: Option<JobScope>) -> ChannelResult<bool> {
        let outfit = {
            let appearance = self.state.appearance.borrow();
            OutfitData {
                drawables: appearance.drawables.clone(),
                props: appearance.props.clone(),
            }
        };

        let ok = self
            .channel
            .save_outfit(SaveOutfitRequest {
                label: label.to_string(),
                outfit: outfit.clone(),
                job: job.clone(),
            })
            .await?;
        if ok {
            let mut outfits = self.outfits.borrow_mut();
            #[allow(clippy::cast_possible_truncation)]
            let id = outfits.len() as u32 + 1;
            outfits.push(Outfit {
                id,
                label: label.to_string(),
                outfit,
                jobname: job.map(|scope| scope.name),
            });
        }
        Ok(ok)
    }

    /// # Errors
    ///
    /// Returns the channel failure as-is; the collection is untouched.
    pub async fn rename(&self, id: u32, label: &str) -> ChannelResult<bool> {
        let ok = self
            .channel
            .rename_outfit(RenameOutfitRequest {
                label: label.to_string(),
                id,
            })
            .await?;
        if ok {
            let mut outfits = self.outfits.borrow_mut();
            if let Some(outfit) = outfits.iter_mut().find(|outfit| outfit.id == id) {
                outfit.label = label.to_string();
            }
        }
        Ok(ok)
    }

    /// # Errors
    ///
    /// Returns the channel failure as-is; the collection is untouched.
    pub async fn delete(&self, id: u32) -> ChannelResult<bool> {
        let ok = self.channel.delete_outfit(id).await?;
        if ok {
            self.outfits.borrow_mut().retain(|outfit| outfit.id != id);
        }
        Ok(ok)
    }

    /// Wear an outfit: on acknowledgement the live drawables/props are
    /// overwritten. Head, model, and tattoo state are untouched.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is; the live snapshot is untouched.
    pub async fn use_outfit(&self, outfit: &OutfitData) -> ChannelResult<bool> {
        let ok = self.channel.use_outfit(outfit).await?;
        if ok {
            let mut appearance = self.state.appearance.borrow_mut();
            appearance.drawables = outfit.drawables.clone();
            appearance.props = outfit.props.clone();
        }
        Ok(ok)
    }

    /// Import an outfit shared under `id`.
    ///
    /// A source id already present locally aborts without a round trip;
    /// that guard is best-effort only, the remote end stays the arbiter
    /// for concurrent imports. The appended entry carries the
    /// server-assigned id, never a locally derived one.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is; the collection is untouched.
    pub async fn import(&self, id: u32) -> ChannelResult<Option<Outfit>> {
        let outfit_name = {
            let outfits = self.outfits.borrow();
            if outfits.iter().any(|outfit| outfit.id == id) {
                debug!("skipped import of outfit {id}: already in the collection");
                return Ok(None);
            }
            format!("Imported Outfit {}", outfits.len() + 1)
        };

        let Some(imported) = self
            .channel
            .import_outfit(ImportOutfitRequest { id, outfit_name })
            .await?
        else {
            return Ok(None);
        };

        let outfit = Outfit {
            id: imported.id,
            label: imported.label,
            outfit: imported.outfit,
            jobname: None,
        };
        self.outfits.borrow_mut().push(outfit.clone());
        Ok(Some(outfit))
    }

    /// Hand an outfit to another player. Fire-and-forget: no local state
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is.
    pub async fn share(&self, outfit: OutfitData, label: &str) -> ChannelResult<()> {
        self.channel
            .share_outfit(ShareOutfitRequest {
                outfit,
                label: label.to_string(),
            })
            .await
    }

    /// Refresh the collection from the remote store.
    ///
    /// # Errors
    ///
    /// Returns the channel failure as-is; the collection is untouched.
    pub async fn fetch(&self, owner: &str) -> ChannelResult<usize> {
        let outfits = self.channel.fetch_outfits(owner).await?;
        let count = outfits.len();
        self.replace(outfits);
        Ok(count)
    }
}
