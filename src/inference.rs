// Inference rules shared by the platform fetchers

use crate::constants;
use crate::modpack::Modloader;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MC_VERSION: Regex = Regex::new(r"^\d+\.\d+(\.\d+)?$").unwrap();
}

/// Whether a string is a plain Minecraft release version ("1.20" or "1.20.1").
pub fn is_minecraft_version(version: &str) -> bool {
    MC_VERSION.is_match(version)
}

/// First entry of a game-version list that is a plain release version.
pub fn first_minecraft_version<'a, I>(versions: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    versions
        .into_iter()
        .find(|v| is_minecraft_version(v))
        .cloned()
}

/// Java major version required by a Minecraft version.
///
/// | Minecraft      | Java |
/// |----------------|------|
/// | 1.21+          | 21   |
/// | 1.18 - 1.20    | 17   |
/// | 1.17           | 16   |
/// | 1.12 - 1.16    | 11   |
/// | older 1.x      | 8    |
/// | 2.x and later  | 21   |
///
/// Unknown or malformed versions get 17.
pub fn java_version_for(minecraft_version: Option<&str>) -> u32 {
    let Some(version) = minecraft_version else {
        return constants::DEFAULT_JAVA_VERSION;
    };

    // Signed parts are accepted; a negative minor lands in the oldest tier
    let parse = |part: &str| part.trim().parse::<i64>().ok();
    let mut parts = version.split('.');
    let major = parts.next().and_then(parse);
    let minor = match parts.next() {
        Some(p) => parse(p),
        None => Some(0),
    };

    match (major, minor) {
        (Some(1), Some(minor)) => match minor {
            21.. => 21,
            18.. => 17,
            17 => 16,
            12.. => 11,
            _ => 8,
        },
        (Some(_), Some(_)) => 21,
        _ => constants::DEFAULT_JAVA_VERSION,
    }
}

/// Map a loader hint (a Modrinth loader id or a CurseForge game-version tag)
/// to a modloader by substring. "neoforge" is tested before "forge".
pub fn modloader_from_hint(hint: &str) -> Option<Modloader> {
    let hint = hint.to_lowercase();

    if hint.contains("fabric") {
        Some(Modloader::Fabric)
    } else if hint.contains("neoforge") {
        Some(Modloader::NeoForge)
    } else if hint.contains("forge") {
        Some(Modloader::Forge)
    } else if hint.contains("quilt") {
        Some(Modloader::Quilt)
    } else {
        None
    }
}

/// Display name derived from a slug: hyphens become spaces, words title-cased.
///
/// A letter is upper-cased when it follows a non-letter and lower-cased
/// otherwise, so "all-the-mods-9" becomes "All The Mods 9".
pub fn name_from_slug(slug: &str) -> String {
    let mut name = String::with_capacity(slug.len());
    let mut prev_is_letter = false;

    for c in slug.replace('-', " ").chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                name.extend(c.to_lowercase());
            } else {
                name.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            name.push(c);
            prev_is_letter = false;
        }
    }

    name
}
