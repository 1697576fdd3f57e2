// Modpack module for the normalized modpack representation

use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a modpack came from. `Unknown` marks URLs no detector pattern recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModpackSource {
    CurseForge,
    Modrinth,
    Unknown,
}

/// A platform the detector can recognise and a fetcher can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    CurseForge,
    Modrinth,
}

impl Platform {
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::CurseForge => "CurseForge",
            Platform::Modrinth => "Modrinth",
        }
    }
}

impl From<Platform> for ModpackSource {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::CurseForge => ModpackSource::CurseForge,
            Platform::Modrinth => ModpackSource::Modrinth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modloader {
    Forge,
    Fabric,
    NeoForge,
    Quilt,
    Vanilla,
}

impl Modloader {
    pub fn display_name(self) -> &'static str {
        match self {
            Modloader::Forge => "Forge",
            Modloader::Fabric => "Fabric",
            Modloader::NeoForge => "NeoForge",
            Modloader::Quilt => "Quilt",
            Modloader::Vanilla => "Vanilla",
        }
    }
}

impl fmt::Display for Modloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Modloader::Forge => "forge",
            Modloader::Fabric => "fabric",
            Modloader::NeoForge => "neoforge",
            Modloader::Quilt => "quilt",
            Modloader::Vanilla => "vanilla",
        };
        f.write_str(id)
    }
}

/// Normalized modpack metadata, built fresh for every resolution.
///
/// Fetchers fill the platform fields incrementally; anything upstream did
/// not report stays at its default. `java_version` is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModpackInfo {
    pub name: String,
    pub source: ModpackSource,
    pub source_url: String,
    pub slug: Option<String>,
    pub project_id: Option<String>,
    pub file_id: Option<String>,
    pub minecraft_version: Option<String>,
    /// `None` means unknown; the egg generator picks the default loader.
    pub modloader: Option<Modloader>,
    /// May hold the sentinels "latest"/"recommended", resolved by the install script.
    pub modloader_version: Option<String>,
    pub java_version: u32,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub author: Option<String>,
    pub download_url: Option<String>,
    pub mod_count: u32,
}

impl Default for ModpackInfo {
    fn default() -> Self {
        Self {
            name: constants::UNKNOWN_MODPACK_NAME.to_string(),
            source: ModpackSource::Unknown,
            source_url: String::new(),
            slug: None,
            project_id: None,
            file_id: None,
            minecraft_version: None,
            modloader: None,
            modloader_version: None,
            java_version: constants::DEFAULT_JAVA_VERSION,
            description: None,
            icon_url: None,
            author: None,
            download_url: None,
            mod_count: 0,
        }
    }
}

impl ModpackInfo {
    /// Starting point for a fetch: source, URL and slug known, everything else default.
    pub fn for_platform(platform: Platform, source_url: &str, slug: &str) -> Self {
        Self {
            source: platform.into(),
            source_url: source_url.to_string(),
            slug: Some(slug.to_string()),
            ..Self::default()
        }
    }

    /// Placeholder for URLs that matched no platform. Carries no platform data.
    pub fn unrecognized(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            description: Some(
                "Unable to parse modpack URL. Please provide a valid CurseForge or Modrinth URL."
                    .to_string(),
            ),
            ..Self::default()
        }
    }
}
