use std::path::{Path, PathBuf};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use chatsync::{
    cli,
    config::{self, Config},
    error, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Path to the config file (default: <config dir>/chatsync/config.toml)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Add new tracks from a chat export to the target playlist
    Sync(SyncOptions),

    /// Create a playlist and make it the target playlist
    Create(CreateOptions),

    /// Watch a directory and sync every new chat export
    Watch(WatchOptions),

    /// Show the configured playlists
    Info,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Chat export to read track links from
    file: PathBuf,

    /// Only sync tracks shared on or before this date (D/M/YY)
    #[clap(long)]
    load_until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// Name of the new playlist
    name: String,

    /// Keep the current target playlist in the config
    #[clap(long)]
    no_update_config: bool,

    /// Create the playlist as private
    #[clap(long)]
    private: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct WatchOptions {
    /// Directory chat exports are dropped into
    #[clap(default_value = "chat")]
    directory: PathBuf,

    /// Log file (default: <data dir>/chatsync/playlist_updates.log)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn load_config(path: &Path) -> Config {
    match config::load(path).await {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::default_config_path);

    match cli.command {
        Command::Auth => cli::auth(&load_config(&config_path).await).await,
        Command::Sync(opt) => {
            let config = load_config(&config_path).await;
            cli::sync(&config, &opt.file, opt.load_until).await
        }
        Command::Create(opt) => {
            let config = load_config(&config_path).await;
            cli::create(
                &config_path,
                config,
                &opt.name,
                !opt.private,
                !opt.no_update_config,
            )
            .await
        }
        Command::Watch(opt) => {
            let config = load_config(&config_path).await;
            cli::watch(&config, &opt.directory, opt.log_file).await
        }
        Command::Info => cli::info(&config_path, &load_config(&config_path).await),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
