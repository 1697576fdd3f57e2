// Egg variable definitions

use crate::modpack::{ModpackInfo, Modloader};
use serde::{Deserialize, Serialize};

/// One panel-editable environment variable of an egg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggVariable {
    pub name: String,
    pub description: String,
    pub env_variable: String,
    pub default_value: String,
    pub user_viewable: bool,
    pub user_editable: bool,
    pub rules: String,
    pub field_type: String,
}

impl EggVariable {
    fn text(
        name: &str,
        description: &str,
        env_variable: &str,
        default_value: &str,
        rules: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            env_variable: env_variable.to_string(),
            default_value: default_value.to_string(),
            user_viewable: true,
            user_editable: true,
            rules: rules.to_string(),
            field_type: "text".to_string(),
        }
    }

    fn locked(mut self) -> Self {
        self.user_editable = false;
        self
    }
}

/// Name, env key and unresolved default for a loader's version variable.
pub fn loader_version_variable(
    modloader: Modloader,
) -> Option<(&'static str, &'static str, &'static str)> {
    match modloader {
        Modloader::Fabric => Some(("Fabric Version", "FABRIC_VERSION", "latest")),
        Modloader::Forge => Some(("Forge Version", "FORGE_VERSION", "recommended")),
        Modloader::NeoForge => Some(("NeoForge Version", "NEOFORGE_VERSION", "latest")),
        Modloader::Quilt => Some(("Quilt Version", "QUILT_VERSION", "latest")),
        Modloader::Vanilla => None,
    }
}

/// Heap size in MB recommended for a pack with `mod_count` mods.
pub fn recommended_memory(mod_count: u32) -> u32 {
    match mod_count {
        201.. => 6144,
        101.. => 4096,
        51.. => 3072,
        21.. => 2048,
        _ => 1536,
    }
}

/// Variables for an egg. `minecraft_version` and `loader_version` are the
/// already-defaulted values the install script was rendered with.
pub fn build(
    info: &ModpackInfo,
    modloader: Modloader,
    minecraft_version: &str,
    loader_version: &str,
) -> Vec<EggVariable> {
    let mut variables = vec![
        EggVariable::text(
            "Server Jar File",
            "The name of the server jarfile to run.",
            "SERVER_JARFILE",
            "server.jar",
            "required|string|max:50",
        ),
        // Sizing rail: operators adjust the container limit, not this value
        EggVariable::text(
            "Server Memory",
            "The maximum amount of memory (in MB) for the server.",
            "SERVER_MEMORY",
            &recommended_memory(info.mod_count).to_string(),
            "required|numeric|min:512",
        )
        .locked(),
        EggVariable::text(
            "Minecraft Version",
            "The Minecraft version for the server.",
            "MINECRAFT_VERSION",
            minecraft_version,
            "required|string|max:20",
        ),
    ];

    if let Some((name, env_variable, _)) = loader_version_variable(modloader) {
        let description = format!("The version of {} to install.", modloader.display_name());
        variables.push(EggVariable::text(
            name,
            &description,
            env_variable,
            loader_version,
            "required|string|max:20",
        ));
    }

    if let Some(url) = &info.download_url {
        variables.push(EggVariable::text(
            "Modpack URL",
            "Direct download URL for the modpack.",
            "MODPACK_URL",
            url,
            "nullable|url",
        ));
    }

    variables
}
