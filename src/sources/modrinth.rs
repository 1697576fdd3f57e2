// Modrinth fetcher implementation

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
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
pub struct VersionFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
pub struct Dependency {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
}

pub struct ModrinthFetcher {
    client: Client,
    api_url: String,
}

impl ModrinthFetcher {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    async fn fetch_details(
        &self,
        slug: &str,
        version_id: Option<&str>,
        source_url: &str,
    ) -> anyhow::Result<ModpackInfo> {
        let mut info = ModpackInfo::for_platform(Platform::Modrinth, source_url, slug);

        let project_url = format!("{}/project/{}", self.api_url, urlencoding::encode(slug));
        let versions_url = format!("{}/version", project_url);

        // Neither request depends on the other
        let (project, versions) = futures::join!(
            http::fetch_json_optional::<Project>(self.client.get(&project_url)),
            http::fetch_json_optional::<Vec<Version>>(self.client.get(&versions_url)),
        );

        if let Some(project) = project? {
            apply_project(&mut info, project, slug);
        }

        if let Some(versions) = versions? {
            if let Some(version) = select_version(&versions, version_id) {
                debug!(
                    "Selected Modrinth version {:?} ({:?}) for '{}'",
                    version.id, version.version_number, slug
                );
                apply_version(&mut info, version);
            }
        }

        info.java_version = inference::java_version_for(info.minecraft_version.as_deref());
        Ok(info)
    }
}

#[async_trait]
impl ModpackFetcher for ModrinthFetcher {
    fn platform(&self) -> Platform {
        Platform::Modrinth
    }

    async fn try_fetch(
        &self,
        slug: &str,
        secondary_id: Option<&str>,
        source_url: &str,
    ) -> FetchOutcome {
        match self.fetch_details(slug, secondary_id, source_url).await {
            Ok(info) => FetchOutcome::Fetched(info),
            Err(e) => FetchOutcome::Degraded {
                reason: format!("Error fetching details: {}", e),
            },
        }
    }
}

/// Copy project-level metadata onto the info.
pub fn apply_project(info: &mut ModpackInfo, project: Project, slug: &str) {
    info.name = project.title.unwrap_or_else(|| slug.to_string());
    info.project_id = project.id;
    info.description = Some(project.description.unwrap_or_default());
    info.icon_url = project.icon_url;
}

/// Pick the version pinned by the URL (by id or version number), else the
/// first listed one, which Modrinth returns newest-first.
pub fn select_version<'a>(versions: &'a [Version], requested: Option<&str>) -> Option<&'a Version> {
    requested
        .and_then(|wanted| {
            versions.iter().find(|v| {
                v.id.as_deref() == Some(wanted) || v.version_number.as_deref() == Some(wanted)
            })
        })
        .or_else(|| versions.first())
}

/// Copy version-level facts (game version, loader, download, loader version).
pub fn apply_version(info: &mut ModpackInfo, version: &Version) {
    info.file_id = version.id.clone();

    if let Some(mc_version) = inference::first_minecraft_version(&version.game_versions) {
        info.minecraft_version = Some(mc_version);
    }

    if let Some(loader) = version.loaders.first() {
        info.modloader = inference::modloader_from_hint(loader);
    }

    let primary = version
        .files
        .iter()
        .find(|f| f.primary)
        .or_else(|| version.files.first());
    if let Some(file) = primary {
        info.download_url = file.url.clone();
    }

    // Only meaningful once a loader is known; later matches replace earlier ones.
    for dep in &version.dependencies {
        let is_fabric_api = dep
            .project_id
            .as_deref()
            .is_some_and(|id| constants::FABRIC_API_PROJECT_IDS.contains(&id));
        if is_fabric_api {
            continue;
        }
        if let Some(version_id) = &dep.version_id
            && info.modloader.is_some()
        {
            info.modloader_version = Some(version_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modpack::{ModpackSource, Modloader};
    use serde_json::json;

    const URL: &str = "https://modrinth.com/modpack/all-the-mods-9";

    fn version(value: serde_json::Value) -> Version {
        serde_json::from_value(value).unwrap()
    }

    fn fresh_info() -> ModpackInfo {
        ModpackInfo::for_platform(Platform::Modrinth, URL, "all-the-mods-9")
    }

    #[test]
    fn test_apply_project() {
        let project: Project = serde_json::from_value(json!({
            "id": "AANobbMI",
            "slug": "all-the-mods-9",
            "title": "All the Mods 9",
            "description": "Kitchen sink pack",
            "icon_url": "https://cdn.modrinth.com/icon.png",
            "downloads": 1234
        }))
        .unwrap();

        let mut info = fresh_info();
        apply_project(&mut info, project, "all-the-mods-9");
        assert_eq!(info.name, "All the Mods 9");
        assert_eq!(info.project_id.as_deref(), Some("AANobbMI"));
        assert_eq!(info.description.as_deref(), Some("Kitchen sink pack"));
        assert_eq!(info.icon_url.as_deref(), Some("https://cdn.modrinth.com/icon.png"));
    }

    #[test]
    fn test_apply_project_without_title_uses_slug() {
        let project: Project = serde_json::from_value(json!({ "id": "abc" })).unwrap();
        let mut info = fresh_info();
        apply_project(&mut info, project, "all-the-mods-9");
        assert_eq!(info.name, "all-the-mods-9");
    }

    #[test]
    fn test_select_version_prefers_pinned() {
        let versions = vec![
            version(json!({ "id": "new1", "version_number": "2.0.0" })),
            version(json!({ "id": "old1", "version_number": "1.0.0" })),
        ];
        assert_eq!(
            select_version(&versions, Some("old1")).unwrap().id.as_deref(),
            Some("old1")
        );
        assert_eq!(
            select_version(&versions, Some("1.0.0")).unwrap().id.as_deref(),
            Some("old1")
        );
        assert_eq!(
            select_version(&versions, Some("missing")).unwrap().id.as_deref(),
            Some("new1")
        );
        assert_eq!(select_version(&versions, None).unwrap().id.as_deref(), Some("new1"));
        assert!(select_version(&[], None).is_none());
    }

    #[test]
    fn test_apply_version_fabric() {
        let v = version(json!({
            "id": "v9",
            "game_versions": ["23w31a", "1.20.1"],
            "loaders": ["fabric"],
            "files": [
                { "url": "https://cdn.modrinth.com/extra.zip", "primary": false },
                { "url": "https://cdn.modrinth.com/pack.mrpack", "primary": true }
            ],
            "dependencies": []
        }));

        let mut info = fresh_info();
        apply_version(&mut info, &v);
        assert_eq!(info.file_id.as_deref(), Some("v9"));
        assert_eq!(info.minecraft_version.as_deref(), Some("1.20.1"));
        assert_eq!(info.modloader, Some(Modloader::Fabric));
        assert_eq!(
            info.download_url.as_deref(),
            Some("https://cdn.modrinth.com/pack.mrpack")
        );
        assert_eq!(info.modloader_version, None);
        assert_eq!(info.source, ModpackSource::Modrinth);
    }

    #[test]
    fn test_apply_version_neoforge_loader() {
        let v = version(json!({ "loaders": ["neoforge"], "files": [] }));
        let mut info = fresh_info();
        apply_version(&mut info, &v);
        assert_eq!(info.modloader, Some(Modloader::NeoForge));
        assert_eq!(info.download_url, None);
    }

    #[test]
    fn test_download_falls_back_to_first_file() {
        let v = version(json!({
            "files": [
                { "url": "https://cdn.modrinth.com/a.mrpack" },
                { "url": "https://cdn.modrinth.com/b.mrpack" }
            ]
        }));
        let mut info = fresh_info();
        apply_version(&mut info, &v);
        assert_eq!(info.download_url.as_deref(), Some("https://cdn.modrinth.com/a.mrpack"));
    }

    #[test]
    fn test_dependency_scan_skips_fabric_api() {
        let v = version(json!({
            "loaders": ["fabric"],
            "dependencies": [
                { "project_id": "loader", "version_id": "0.15.11" },
                { "project_id": "P7dR8mSH", "version_id": "fabric-api-build" }
            ]
        }));
        let mut info = fresh_info();
        apply_version(&mut info, &v);
        assert_eq!(info.modloader_version.as_deref(), Some("0.15.11"));
    }

    #[test]
    fn test_dependency_scan_needs_known_loader() {
        let v = version(json!({
            "loaders": ["datapack"],
            "dependencies": [{ "project_id": "x", "version_id": "1.0" }]
        }));
        let mut info = fresh_info();
        apply_version(&mut info, &v);
        assert_eq!(info.modloader, None);
        assert_eq!(info.modloader_version, None);
    }
}
