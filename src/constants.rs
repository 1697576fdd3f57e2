// Constants module for shared string constants

pub const CONFIG_FILE: &str = "hatchery.toml";

pub const MODRINTH_API: &str = "https://api.modrinth.com/v2";
pub const CURSEFORGE_API: &str = "https://api.curseforge.com/v1";

/// CurseForge game id for Minecraft.
pub const CURSEFORGE_MINECRAFT_GAME_ID: u32 = 432;
/// CurseForge class id for the modpacks category.
pub const CURSEFORGE_MODPACK_CLASS_ID: u32 = 4471;

/// Modrinth project ids of Fabric API, a dependency that never carries a loader version.
pub const FABRIC_API_PROJECT_IDS: [&str; 2] = ["P7dR8mSH", "fabric-api"];

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const UNKNOWN_MODPACK_NAME: &str = "Unknown Modpack";
pub const DEFAULT_JAVA_VERSION: u32 = 17;
pub const DEFAULT_MC_VERSION: &str = "1.20.1";

pub const EGG_AUTHOR: &str = "hatchery@generated.local";
pub const YOLKS_IMAGE: &str = "ghcr.io/pterodactyl/yolks";
