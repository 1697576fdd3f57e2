// Sources module for modpack platform fetchers

use crate::inference;
use crate::modpack::{ModpackInfo, Platform};
use async_trait::async_trait;
use log::warn;

pub mod curseforge;
pub mod http;
pub mod modrinth;

pub use curseforge::CurseForgeFetcher;
pub use modrinth::ModrinthFetcher;

/// What a single fetch attempt produced.
///
/// Timeouts, HTTP failures, bad JSON and missing credentials all collapse
/// into `Degraded`; callers only ever see the reason text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(ModpackInfo),
    Degraded { reason: String },
}

/// A modpack metadata source (Modrinth, CurseForge).
#[async_trait]
pub trait ModpackFetcher: Send + Sync {
    fn platform(&self) -> Platform;

    /// Query the platform for a modpack.
    ///
    /// # Arguments
    /// * `slug` - The project slug extracted from the URL
    /// * `secondary_id` - Optional pinned file/version id
    /// * `source_url` - The original URL, kept verbatim on the result
    async fn try_fetch(
        &self,
        slug: &str,
        secondary_id: Option<&str>,
        source_url: &str,
    ) -> FetchOutcome;

    /// Fetch a modpack, degrading to a slug-derived placeholder on any failure.
    async fn fetch(&self, slug: &str, secondary_id: Option<&str>, source_url: &str) -> Lookup {
        match self.try_fetch(slug, secondary_id, source_url).await {
            FetchOutcome::Fetched(info) => Lookup {
                info,
                degraded: None,
            },
            FetchOutcome::Degraded { reason } => {
                warn!(
                    "{} lookup for '{}' degraded: {}",
                    self.platform().display_name(),
                    slug,
                    reason
                );
                Lookup::placeholder(self.platform(), slug, source_url, reason)
            }
        }
    }
}

/// Metadata ready for egg generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub info: ModpackInfo,
    /// Why `info` is only a placeholder; `None` when the platform answered.
    pub degraded: Option<String>,
}

impl Lookup {
    pub fn placeholder(platform: Platform, slug: &str, source_url: &str, reason: String) -> Self {
        Self {
            info: degraded_info(platform, slug, source_url, &reason),
            degraded: Some(reason),
        }
    }
}

/// Best-effort placeholder used when a platform could not be queried.
pub fn degraded_info(platform: Platform, slug: &str, source_url: &str, reason: &str) -> ModpackInfo {
    ModpackInfo {
        name: inference::name_from_slug(slug),
        description: Some(format!(
            "{} modpack: {} ({})",
            platform.display_name(),
            slug,
            reason
        )),
        ..ModpackInfo::for_platform(platform, source_url, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modpack::ModpackSource;

    struct FailingFetcher;

    #[async_trait]
    impl ModpackFetcher for FailingFetcher {
        fn platform(&self) -> Platform {
            Platform::Modrinth
        }

        async fn try_fetch(&self, _: &str, _: Option<&str>, _: &str) -> FetchOutcome {
            FetchOutcome::Degraded {
                reason: "Error fetching details: connection refused".to_string(),
            }
        }
    }

    #[test]
    fn test_degraded_info() {
        let info = degraded_info(
            Platform::CurseForge,
            "all-the-mods-9",
            "https://www.curseforge.com/minecraft/modpacks/all-the-mods-9",
            "API key not configured",
        );
        assert_eq!(info.name, "All The Mods 9");
        assert_eq!(info.source, ModpackSource::CurseForge);
        assert_eq!(info.slug.as_deref(), Some("all-the-mods-9"));
        assert_eq!(
            info.description.as_deref(),
            Some("CurseForge modpack: all-the-mods-9 (API key not configured)")
        );
        assert_eq!(info.java_version, 17);
        assert!(info.modloader.is_none());
    }

    #[tokio::test]
    async fn test_fetch_absorbs_degraded_outcome() {
        let lookup = FailingFetcher
            .fetch("better-mc", None, "https://modrinth.com/modpack/better-mc")
            .await;
        assert_eq!(
            lookup.degraded.as_deref(),
            Some("Error fetching details: connection refused")
        );

        let info = lookup.info;
        assert_eq!(info.name, "Better Mc");
        assert_eq!(info.source, ModpackSource::Modrinth);
        assert!(
            info.description
                .as_deref()
                .unwrap()
                .contains("connection refused")
        );
    }
}
