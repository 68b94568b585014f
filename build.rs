//! Build script for chatsync.
//!
//! Copies the configuration template into the user's config directory so an
//! example sits next to where the application expects `config.toml`.

use std::{env, fs, path::PathBuf};

/// Copies `config.example.toml` to `<config_dir>/chatsync/config.example.toml`.
///
/// The real `config.toml` is never touched. A missing template only emits a
/// cargo warning; directory or write failures fail the build.
///
/// Destination by platform:
/// - Linux: `~/.config/chatsync/config.example.toml`
/// - macOS: `~/Library/Application Support/chatsync/config.example.toml`
/// - Windows: `%APPDATA%/chatsync/config.example.toml`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=config.example.toml");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join("config.example.toml");

    let mut out_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("chatsync");
    fs::create_dir_all(&out_dir)?;

    if template_path.is_file() {
        let contents = fs::read_to_string(&template_path)?;
        fs::write(out_dir.join("config.example.toml"), contents)?;
    } else {
        println!(
            "cargo:warning=config.example.toml not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
