// Egg generation for game-server panels (PTDL_v2 export format)

pub mod scripts;
pub mod variables;

use crate::constants;
use crate::modpack::{ModpackInfo, ModpackSource, Modloader};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use scripts::ScriptContext;
pub use variables::EggVariable;

const MEMORY_FLAGS: &str = "-Xms128M -Xmx{{SERVER_MEMORY}}M";

/// G1 tuning for Java 17 and newer.
const MODERN_JVM_FLAGS: &str = "-XX:+UseG1GC -XX:+ParallelRefProcEnabled -XX:MaxGCPauseMillis=200 \
-XX:+UnlockExperimentalVMOptions -XX:+DisableExplicitGC -XX:+AlwaysPreTouch -XX:G1HeapWastePercent=5 \
-XX:G1MixedGCCountTarget=4 -XX:G1MixedGCLiveThresholdPercent=90 -XX:G1RSetUpdatingPauseTimePercent=5 \
-XX:SurvivorRatio=32 -XX:+PerfDisableSharedMem -XX:MaxTenuringThreshold=1";

/// G1 tuning for Java 8 through 16.
const LEGACY_JVM_FLAGS: &str = "-XX:+UseG1GC -XX:+UnlockExperimentalVMOptions -XX:MaxGCPauseMillis=100 \
-XX:+DisableExplicitGC -XX:TargetSurvivorRatio=90 -XX:G1NewSizePercent=50 -XX:G1MaxNewSizePercent=80 \
-XX:G1HeapWastePercent=5 -XX:+UseStringDeduplication";

const JAR_LAUNCH: &str = "-jar {{SERVER_JARFILE}}";

// Panel parser configuration; these are JSON documents embedded as strings.
const CONFIG_FILES: &str = "{\r\n    \"server.properties\": {\r\n        \"parser\": \"properties\",\r\n        \"find\": {\r\n            \"server-port\": \"{{server.build.default.port}}\",\r\n            \"enable-query\": \"true\",\r\n            \"query.port\": \"{{server.build.default.port}}\"\r\n        }\r\n    }\r\n}";
const CONFIG_STARTUP: &str = "{\r\n    \"done\": \")! For help, type \"\r\n}";
const CONFIG_LOGS: &str = "{\r\n    \"custom\": false,\r\n    \"location\": \"logs/latest.log\"\r\n}";

/// Full deployment descriptor, serialized in the panel's egg export layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggDescriptor {
    #[serde(rename = "_comment")]
    pub comment: String,
    pub meta: EggMeta,
    pub exported_at: DateTime<Utc>,
    pub name: String,
    pub author: String,
    pub description: String,
    pub features: Vec<String>,
    /// Insertion ordered; the panel preselects the first image.
    pub docker_images: IndexMap<String, String>,
    pub file_denylist: Vec<String>,
    pub startup: String,
    pub config: EggConfig,
    pub scripts: EggScripts,
    pub variables: Vec<EggVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggMeta {
    pub version: String,
    pub update_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggConfig {
    pub files: String,
    pub startup: String,
    pub logs: String,
    pub stop: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggScripts {
    pub installation: InstallationScript,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationScript {
    pub script: String,
    pub container: String,
    pub entrypoint: String,
}

/// Loader the egg targets. Unrecognised URLs get a plain vanilla server;
/// everything else without a detected loader gets Forge.
pub fn effective_modloader(info: &ModpackInfo) -> Modloader {
    match (info.modloader, info.source) {
        (Some(loader), _) => loader,
        (None, ModpackSource::Unknown) => Modloader::Vanilla,
        (None, _) => Modloader::Forge,
    }
}

/// Docker images keyed by label, the effective version first. Java 17 and
/// 21 are always offered after it.
pub fn docker_images(java_version: u32) -> IndexMap<String, String> {
    [java_version, 17, 21]
        .into_iter()
        .map(|v| (format!("Java {}", v), format!("{}:java_{}", constants::YOLKS_IMAGE, v)))
        .collect()
}

pub fn startup_command(java_version: u32) -> String {
    let jvm_flags = if java_version >= 17 {
        MODERN_JVM_FLAGS
    } else {
        LEGACY_JVM_FLAGS
    };
    format!("java {} {} {}", MEMORY_FLAGS, jvm_flags, JAR_LAUNCH)
}

/// Generate an egg stamped with the current time.
pub fn generate(info: &ModpackInfo, java_override: Option<u32>) -> EggDescriptor {
    generate_at(info, java_override, Utc::now())
}

/// Generate an egg with an explicit export timestamp. Pure in its inputs.
pub fn generate_at(
    info: &ModpackInfo,
    java_override: Option<u32>,
    exported_at: DateTime<Utc>,
) -> EggDescriptor {
    // Zero means no override
    let java_version = java_override
        .filter(|v| *v != 0)
        .unwrap_or(info.java_version);
    let modloader = effective_modloader(info);

    let minecraft_version = info
        .minecraft_version
        .as_deref()
        .filter(|v| scripts::is_shell_token(v))
        .unwrap_or(constants::DEFAULT_MC_VERSION);

    let sentinel = variables::loader_version_variable(modloader)
        .map(|(_, _, sentinel)| sentinel)
        .unwrap_or("latest");
    let loader_version = info
        .modloader_version
        .as_deref()
        .filter(|v| scripts::is_shell_token(v))
        .unwrap_or(sentinel);

    let script = scripts::render(
        modloader,
        &ScriptContext {
            minecraft_version,
            loader_version,
            modpack_name: &info.name,
            source_url: &info.source_url,
        },
    );

    let description = info.description.clone().unwrap_or_else(|| {
        format!(
            "Generated {} server for {}",
            modloader.display_name(),
            info.name
        )
    });

    EggDescriptor {
        comment: "DO NOT EDIT: FILE GENERATED AUTOMATICALLY BY HATCHERY".to_string(),
        meta: EggMeta {
            version: "PTDL_v2".to_string(),
            update_url: None,
        },
        exported_at,
        name: info.name.clone(),
        author: constants::EGG_AUTHOR.to_string(),
        description,
        features: ["eula", "java_version", "pid_limit"]
            .into_iter()
            .map(String::from)
            .collect(),
        docker_images: docker_images(java_version),
        file_denylist: Vec::new(),
        startup: startup_command(java_version),
        config: EggConfig {
            files: CONFIG_FILES.to_string(),
            startup: CONFIG_STARTUP.to_string(),
            logs: CONFIG_LOGS.to_string(),
            stop: "stop".to_string(),
        },
        scripts: EggScripts {
            installation: InstallationScript {
                script,
                container: format!("eclipse-temurin:{}-jdk", java_version),
                entrypoint: "bash".to_string(),
            },
        },
        variables: variables::build(info, modloader, minecraft_version, loader_version),
    }
}
