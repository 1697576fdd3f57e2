//! Modpack URL to game-server egg resolution.
//!
//! [`pipeline::Pipeline::resolve`] is the entry point: it classifies a
//! CurseForge or Modrinth URL, fetches the pack's metadata and generates a
//! panel egg. Resolution never fails; missing data degrades the egg instead.

pub mod config;
pub mod constants;
pub mod detect;
pub mod egg;
pub mod inference;
pub mod modpack;
pub mod pipeline;
pub mod sources;

pub use config::Settings;
pub use egg::EggDescriptor;
pub use modpack::{ModpackInfo, ModpackSource, Modloader, Platform};
pub use pipeline::{Pipeline, ResolvedModpack};
