use rust_embed::RustEmbed;

/// Files shipped under `etc/` at the workspace root
#[derive(RustEmbed)]
#[folder = "../etc/"]
pub struct Etc;
