//! Vanity Appearance Engine
//!
//! Platform-agnostic core of the Vanity character appearance editor. This
//! crate owns the appearance data model, restriction policy resolution,
//! outfit and tattoo catalogs, and the single-flight mutation discipline
//! against the game process. Rendering, camera work, and the embedded UI are
//! external collaborators reached through the seams in [`engine`] and
//! [`channel`].

pub mod appearance;
pub mod blend;
pub mod catalog;
pub mod channel;
pub mod config;
pub mod edits;
pub mod engine;
pub mod events;
pub mod hash;
pub mod outfits;
pub mod policy;
pub mod session;
pub mod snapshot;
pub mod tattoo;

// Re-export commonly used types
pub use appearance::{
    Appearance, Clothes, FaceFeature, HairColor, OverlayEntry, Skin, SlotState, SlotTotal,
    normalize_overlay_value,
};
pub use blend::{HEAD_BLEND_BUFFER_LEN, HeadBlend};
pub use channel::{
    AppearanceChannel, ChannelError, ChannelResult, FeatureUpdate, HeadOverlayUpdate,
    SlotEditRequest, ToggleRequest,
};
pub use config::{AppearanceConfig, MenuConfig, TattooConfig};
pub use edits::{EditCategory, EditController, EditOutcome};
pub use engine::{CharacterEngine, PedHandle, RawOverlay};
pub use events::{Intent, Push};
pub use hash::hash_key;
pub use outfits::{Outfit, OutfitData, OutfitManager};
pub use policy::{Blacklist, Gender, GroupMembership, PlayerIdentity, Zone};
pub use session::{OpenedSession, Session, SessionData, SessionState, ZoneRef};
pub use snapshot::Subject;
pub use tattoo::{Tattoo, TattooDlc, TattooList, TattooZone};
