// Source detection for modpack URLs

use crate::modpack::{ModpackSource, Platform};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    // Checked in order; CurseForge before Modrinth.
    static ref PATTERNS: Vec<(Platform, Regex)> = vec![
        (
            Platform::CurseForge,
            Regex::new(r"curseforge\.com/minecraft/modpacks/([a-zA-Z0-9-]+)(?:/files/(\d+))?")
                .unwrap(),
        ),
        (
            Platform::CurseForge,
            Regex::new(
                r"legacy\.curseforge\.com/minecraft/modpacks/([a-zA-Z0-9-]+)(?:/files/(\d+))?"
            )
            .unwrap(),
        ),
        (
            Platform::Modrinth,
            Regex::new(r"modrinth\.com/modpack/([a-zA-Z0-9-]+)(?:/version/([a-zA-Z0-9]+))?")
                .unwrap(),
        ),
    ];
}

/// Result of classifying a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Detection {
    Matched {
        platform: Platform,
        slug: String,
        /// CurseForge file id or Modrinth version id/number, when the URL pins one.
        secondary_id: Option<String>,
    },
    Unmatched,
}

impl Detection {
    /// Flatten into the `(source, slug, secondary id)` triple.
    pub fn into_parts(self) -> (ModpackSource, Option<String>, Option<String>) {
        match self {
            Detection::Matched {
                platform,
                slug,
                secondary_id,
            } => (platform.into(), Some(slug), secondary_id),
            Detection::Unmatched => (ModpackSource::Unknown, None, None),
        }
    }
}

/// Classify a URL by platform. Total over any input string.
pub fn detect(url: &str) -> Detection {
    for (platform, pattern) in PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            // Group 1 is mandatory in every pattern
            let Some(slug) = caps.get(1) else { continue };
            return Detection::Matched {
                platform: *platform,
                slug: slug.as_str().to_string(),
                secondary_id: caps.get(2).map(|m| m.as_str().to_string()),
            };
        }
    }

    Detection::Unmatched
}
