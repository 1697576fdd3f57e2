// Installation script templates
//
// Templates live as plain shell files next to this module. Substitution
// points are written `@NAME@`; everything else is emitted verbatim.

use crate::modpack::Modloader;

const FABRIC: &str = include_str!("scripts/fabric.sh");
const FORGE: &str = include_str!("scripts/forge.sh");
const NEOFORGE: &str = include_str!("scripts/neoforge.sh");
const QUILT: &str = include_str!("scripts/quilt.sh");
const VANILLA: &str = include_str!("scripts/vanilla.sh");

/// Values interpolated into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptContext<'a> {
    pub minecraft_version: &'a str,
    /// Concrete loader version or a sentinel the script resolves at install time.
    pub loader_version: &'a str,
    pub modpack_name: &'a str,
    pub source_url: &'a str,
}

/// The raw template for a modloader.
pub fn template_for(modloader: Modloader) -> &'static str {
    match modloader {
        Modloader::Fabric => FABRIC,
        Modloader::Forge => FORGE,
        Modloader::NeoForge => NEOFORGE,
        Modloader::Quilt => QUILT,
        Modloader::Vanilla => VANILLA,
    }
}

/// Render the installation script for a modloader.
pub fn render(modloader: Modloader, ctx: &ScriptContext<'_>) -> String {
    template_for(modloader)
        .replace("@MODPACK_NAME@", &comment_text(ctx.modpack_name))
        .replace("@SOURCE_URL@", &comment_text(ctx.source_url))
        .replace("@MINECRAFT_VERSION@", ctx.minecraft_version)
        .replace("@LOADER_VERSION@", ctx.loader_version)
}

/// Whether a value can sit inside a double-quoted shell assignment untouched.
pub fn is_shell_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
}

// Metadata only ever lands in `#` comment lines; a line break would end the comment.
fn comment_text(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
