//! gbdump CLI
//!
//! Command-line interface for dumping and checking Game Boy cartridges.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gbdump_lib::settings::settings_path;

use crate::commands::dump::DumpArgs;

#[derive(Parser)]
#[command(name = "gbdump")]
#[command(about = "Dump and verify Game Boy cartridge ROMs", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/gbdump/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header of a ROM image
    Info {
        /// ROM image (.gb / .gbc)
        rom: PathBuf,
    },

    /// Check an image's checksums and size
    Verify {
        /// ROM image (.gb / .gbc)
        rom: PathBuf,
    },

    /// Dump a cartridge to an image file
    Dump(DumpArgs),

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(settings_path);

    let result = match cli.command {
        Commands::Info { rom } => commands::info::run_info(&rom),
        Commands::Verify { rom } => commands::verify::run_verify(&rom),
        Commands::Dump(args) => commands::dump::run_dump(&args, &config_path),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&config_path),
            ConfigAction::Path => {
                commands::config::run_config_path(&config_path);
                Ok(())
            }
            ConfigAction::Init { force } => commands::config::run_config_init(&config_path, force),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Route `log` to stdout, plain messages at info and a coloured tag above.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            level => writeln!(
                buf,
                "{}",
                format!("[{} {}] {}", level, record.target(), record.args())
                    .if_supports_color(Stdout, |t| t.dimmed())
            ),
        })
        .init();
}
