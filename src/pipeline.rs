// Pipeline module: URL -> platform metadata -> egg

use crate::config::Settings;
use crate::detect::{self, Detection};
use crate::egg::{self, EggDescriptor};
use crate::modpack::{ModpackInfo, Platform};
use crate::sources::{CurseForgeFetcher, Lookup, ModpackFetcher, ModrinthFetcher, http};
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// Everything a caller needs to persist a generated egg.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedModpack {
    pub modpack: ModpackInfo,
    pub egg: EggDescriptor,
    /// Set when the platform could not be queried and `modpack` is a placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

/// Detector, fetchers and generator wired together.
///
/// Holds no mutable state; one instance can serve concurrent resolutions.
pub struct Pipeline {
    fetchers: Vec<Arc<dyn ModpackFetcher>>,
}

impl Pipeline {
    /// Build a pipeline whose fetchers share one HTTP client.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = http::build_client(settings.request_timeout())?;

        Ok(Self::with_fetchers(vec![
            Arc::new(CurseForgeFetcher::new(
                client.clone(),
                settings.curseforge_api_url.clone(),
                settings.curseforge_api_key.clone(),
            )),
            Arc::new(ModrinthFetcher::new(
                client,
                settings.modrinth_api_url.clone(),
            )),
        ]))
    }

    pub fn with_fetchers(fetchers: Vec<Arc<dyn ModpackFetcher>>) -> Self {
        Self { fetchers }
    }

    fn fetcher_for(&self, platform: Platform) -> Option<&Arc<dyn ModpackFetcher>> {
        self.fetchers.iter().find(|f| f.platform() == platform)
    }

    /// Detect the URL's platform and fetch its metadata. Never fails.
    pub async fn fetch_info(&self, url: &str) -> ModpackInfo {
        self.lookup(url).await.info
    }

    async fn lookup(&self, url: &str) -> Lookup {
        match detect::detect(url) {
            Detection::Matched {
                platform,
                slug,
                secondary_id,
            } => {
                info!(
                    "Detected {} modpack '{}' (pinned: {:?})",
                    platform.display_name(),
                    slug,
                    secondary_id
                );
                match self.fetcher_for(platform) {
                    Some(fetcher) => fetcher.fetch(&slug, secondary_id.as_deref(), url).await,
                    None => Lookup::placeholder(
                        platform,
                        &slug,
                        url,
                        "no fetcher configured".to_string(),
                    ),
                }
            }
            // Not a failure: the pack is simply unknown
            Detection::Unmatched => {
                info!("No platform recognised for '{}'", url);
                Lookup {
                    info: ModpackInfo::unrecognized(url),
                    degraded: None,
                }
            }
        }
    }

    /// Resolve a modpack URL into its metadata and a ready-to-import egg.
    ///
    /// Always produces an egg: unrecognised URLs get a vanilla egg and
    /// upstream failures a best-effort one, with the reason in `degraded`
    /// and in the egg's description.
    pub async fn resolve(&self, url: &str, java_override: Option<u32>) -> ResolvedModpack {
        let Lookup { info, degraded } = self.lookup(url).await;
        let egg = egg::generate(&info, java_override);
        ResolvedModpack {
            modpack: info,
            egg,
            degraded,
        }
    }
}
