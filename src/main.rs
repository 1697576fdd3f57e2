mod cli;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use hatchery::detect;
use hatchery::{ModpackSource, Pipeline, ResolvedModpack, Settings};
use log::debug;
use serde::Serialize;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            url,
            java,
            egg_only,
            compact,
            output,
        } => {
            let settings = Settings::load()?;
            debug!("Loaded settings from {}", hatchery::config::config_path().display());
            let pipeline = Pipeline::new(&settings)?;

            let pb = ui::spinner(&format!("Resolving {}", url));
            let resolved = pipeline.resolve(&url, java).await;
            report(&pb, &resolved);

            let json = if egg_only {
                to_json(&resolved.egg, compact)?
            } else {
                to_json(&resolved, compact)?
            };
            write_output(&json, output.as_deref())?;
        }
        Commands::Detect { url } => {
            let detection = detect::detect(&url);
            ui::emit(&to_json(&detection, false)?);
        }
    }

    Ok(())
}

fn report(pb: &indicatif::ProgressBar, resolved: &ResolvedModpack) {
    let modpack = &resolved.modpack;
    if modpack.source == ModpackSource::Unknown {
        ui::finish_spinner_degraded(
            pb,
            &modpack.name,
            "unrecognized URL, generated a vanilla egg",
        );
        return;
    }
    if let Some(reason) = &resolved.degraded {
        ui::finish_spinner_degraded(pb, &modpack.name, &format!("best-effort egg: {}", reason));
        return;
    }

    let loader = modpack
        .modloader
        .map(|l| l.display_name())
        .unwrap_or("unknown loader");
    let detail = format!(
        "Minecraft {} · {} · Java {}",
        modpack.minecraft_version.as_deref().unwrap_or("unknown"),
        loader,
        modpack.java_version
    );
    ui::finish_spinner_resolved(pb, &modpack.name, &detail);
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn write_output(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json)).map_err(|e| {
                ui::error(&format!("Could not write {}", path.display()));
                anyhow::anyhow!("Failed to write '{}': {}", path.display(), e)
            })?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => ui::emit(json),
    }
    Ok(())
}
