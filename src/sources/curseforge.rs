// CurseForge fetcher implementation

use crate::constants;
use crate::inference;
use crate::modpack::{ModpackInfo, Platform};
use crate::sources::http;
use crate::sources::{FetchOutcome, ModpackFetcher};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Mod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub logo: Option<Logo>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub latest_files: Vec<File>,
}

#[derive(Debug, Deserialize)]
pub struct Logo {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
}

pub struct CurseForgeFetcher {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl CurseForgeFetcher {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    fn search_url(&self, slug: &str) -> String {
        format!(
            "{}/mods/search?gameId={}&classId={}&slug={}",
            self.api_url,
            constants::CURSEFORGE_MINECRAFT_GAME_ID,
            constants::CURSEFORGE_MODPACK_CLASS_ID,
            urlencoding::encode(slug)
        )
    }

    async fn fetch_details(
        &self,
        api_key: &str,
        slug: &str,
        file_id: Option<&str>,
        source_url: &str,
    ) -> anyhow::Result<ModpackInfo> {
        let mut info = ModpackInfo::for_platform(Platform::CurseForge, source_url, slug);

        let request = self
            .client
            .get(self.search_url(slug))
            .header("x-api-key", api_key);
        let search: Option<SearchResponse> = http::fetch_json_optional(request).await?;

        match search.and_then(|s| s.data.into_iter().next()) {
            Some(found) => apply_mod(&mut info, found, slug, file_id),
            None => debug!("CurseForge search returned no modpack for '{}'", slug),
        }

        info.java_version = inference::java_version_for(info.minecraft_version.as_deref());
        Ok(info)
    }
}

#[async_trait]
impl ModpackFetcher for CurseForgeFetcher {
    fn platform(&self) -> Platform {
        Platform::CurseForge
    }

    async fn try_fetch(
        &self,
        slug: &str,
        secondary_id: Option<&str>,
        source_url: &str,
    ) -> FetchOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return FetchOutcome::Degraded {
                reason: "API key not configured".to_string(),
            };
        };

        match self
            .fetch_details(api_key, slug, secondary_id, source_url)
            .await
        {
            Ok(info) => FetchOutcome::Fetched(info),
            Err(e) => FetchOutcome::Degraded {
                reason: format!("Error: {}", e),
            },
        }
    }
}

/// Copy a search hit onto the info, including facts from the chosen file.
pub fn apply_mod(info: &mut ModpackInfo, found: Mod, slug: &str, file_id: Option<&str>) {
    info.project_id = found.id.map(|id| id.to_string());
    info.name = found.name.unwrap_or_else(|| slug.to_string());
    info.description = Some(found.summary.unwrap_or_default());
    info.icon_url = found.logo.and_then(|logo| logo.url);
    info.author = found.authors.into_iter().next().and_then(|a| a.name);

    if let Some(file) = select_file(&found.latest_files, file_id) {
        apply_file(info, file);
    }
}

/// Pick the file pinned by the URL, else the first of `latestFiles`.
pub fn select_file<'a>(files: &'a [File], requested: Option<&str>) -> Option<&'a File> {
    requested
        .and_then(|wanted| {
            files
                .iter()
                .find(|f| f.id.is_some_and(|id| id.to_string() == wanted))
        })
        .or_else(|| files.first())
}

pub fn apply_file(info: &mut ModpackInfo, file: &File) {
    info.file_id = file.id.map(|id| id.to_string());
    info.download_url = file.download_url.clone();

    if let Some(mc_version) = inference::first_minecraft_version(&file.game_versions) {
        info.minecraft_version = Some(mc_version);
    }

    // CurseForge lists loaders among the game-version tags
    if let Some(loader) = file
        .game_versions
        .iter()
        .find_map(|tag| inference::modloader_from_hint(tag))
    {
        info.modloader = Some(loader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modpack::{ModpackSource, Modloader};
    use serde_json::json;

    const URL: &str = "https://www.curseforge.com/minecraft/modpacks/all-the-mods-9";

    fn fresh_info() -> ModpackInfo {
        ModpackInfo::for_platform(Platform::CurseForge, URL, "all-the-mods-9")
    }

    fn search_hit() -> Mod {
        serde_json::from_value(json!({
            "id": 715572,
            "name": "All the Mods 9 - ATM9",
            "summary": "All the mods, again",
            "logo": { "url": "https://media.forgecdn.net/avatars/logo.png" },
            "authors": [{ "name": "ATMTeam" }, { "name": "Someone" }],
            "latestFiles": [
                {
                    "id": 5000001,
                    "downloadUrl": "https://edge.forgecdn.net/files/latest.zip",
                    "gameVersions": ["Forge", "1.20.1"]
                },
                {
                    "id": 4000001,
                    "downloadUrl": "https://edge.forgecdn.net/files/older.zip",
                    "gameVersions": ["1.19.2", "NeoForge"]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_apply_mod_latest_file() {
        let mut info = fresh_info();
        apply_mod(&mut info, search_hit(), "all-the-mods-9", None);

        assert_eq!(info.name, "All the Mods 9 - ATM9");
        assert_eq!(info.project_id.as_deref(), Some("715572"));
        assert_eq!(info.description.as_deref(), Some("All the mods, again"));
        assert_eq!(
            info.icon_url.as_deref(),
            Some("https://media.forgecdn.net/avatars/logo.png")
        );
        assert_eq!(info.author.as_deref(), Some("ATMTeam"));
        assert_eq!(info.file_id.as_deref(), Some("5000001"));
        assert_eq!(info.minecraft_version.as_deref(), Some("1.20.1"));
        assert_eq!(info.modloader, Some(Modloader::Forge));
        assert_eq!(
            info.download_url.as_deref(),
            Some("https://edge.forgecdn.net/files/latest.zip")
        );
        assert_eq!(info.source, ModpackSource::CurseForge);
    }

    #[test]
    fn test_apply_mod_pinned_file() {
        let mut info = fresh_info();
        apply_mod(&mut info, search_hit(), "all-the-mods-9", Some("4000001"));

        assert_eq!(info.file_id.as_deref(), Some("4000001"));
        assert_eq!(info.minecraft_version.as_deref(), Some("1.19.2"));
        assert_eq!(info.modloader, Some(Modloader::NeoForge));
    }

    #[test]
    fn test_unknown_pinned_file_falls_back_to_first() {
        let mut info = fresh_info();
        apply_mod(&mut info, search_hit(), "all-the-mods-9", Some("123"));
        assert_eq!(info.file_id.as_deref(), Some("5000001"));
    }

    #[test]
    fn test_apply_mod_sparse_hit() {
        let hit: Mod = serde_json::from_value(json!({ "id": 1, "logo": null })).unwrap();
        let mut info = fresh_info();
        apply_mod(&mut info, hit, "all-the-mods-9", None);

        assert_eq!(info.name, "all-the-mods-9");
        assert_eq!(info.icon_url, None);
        assert_eq!(info.author, None);
        assert_eq!(info.file_id, None);
        assert_eq!(info.modloader, None);
    }

    #[test]
    fn test_first_loader_tag_wins() {
        let file: File = serde_json::from_value(json!({
            "id": 1,
            "gameVersions": ["1.20.1", "Quilt", "Fabric"]
        }))
        .unwrap();
        let mut info = fresh_info();
        apply_file(&mut info, &file);
        assert_eq!(info.modloader, Some(Modloader::Quilt));
    }

    #[test]
    fn test_search_url() {
        let fetcher = CurseForgeFetcher::new(
            Client::new(),
            "https://api.curseforge.com/v1",
            Some("key".into()),
        );
        assert_eq!(
            fetcher.search_url("all-the-mods-9"),
            "https://api.curseforge.com/v1/mods/search?gameId=432&classId=4471&slug=all-the-mods-9"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_degrades_without_network() {
        let fetcher = CurseForgeFetcher::new(Client::new(), "http://127.0.0.1:9", None);
        let outcome = fetcher.try_fetch("all-the-mods-9", None, URL).await;
        assert_eq!(
            outcome,
            FetchOutcome::Degraded {
                reason: "API key not configured".to_string()
            }
        );

        let lookup = fetcher.fetch("all-the-mods-9", None, URL).await;
        assert_eq!(lookup.degraded.as_deref(), Some("API key not configured"));
        let info = lookup.info;
        assert_eq!(info.name, "All The Mods 9");
        assert_eq!(
            info.description.as_deref(),
            Some("CurseForge modpack: all-the-mods-9 (API key not configured)")
        );
    }
}
