//! Boxtron configuration CLI
//!
//! Entry point for the `boxtron-conf` command-line tool.

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;
use std::path::PathBuf;
use std::process;

use boxtron_conf::autoexec::{NoCueRepair, PosixPathResolver};
use boxtron_conf::pipeline::Collaborators;
use boxtron_conf::settings::SettingsError;
use boxtron_conf::{generate, resolve, uniq_conf_name, GenerateOptions, HostSettings};

#[derive(Parser)]
#[command(name = "boxtron-conf")]
#[command(about = "Generate DOSBox configuration from Windows DOSBox arguments", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the user and auto configuration files for a launch
    Generate {
        /// Game identity used in file names (e.g. Steam app id)
        #[arg(long)]
        app_id: String,

        /// Host settings file (default: ~/.config/boxtron/settings.toml)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override an option, as section.option=value
        #[arg(long = "tweak")]
        tweaks: Vec<String>,

        /// Directory the game runs from (default: current directory)
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Regenerate the user file even if it exists
        #[arg(long)]
        force: bool,

        /// DOSBox arguments (after --)
        #[arg(last = true, required = true)]
        dosbox_args: Vec<String>,
    },

    /// Print the merged configuration as JSON
    Explain {
        /// Host settings file (default: ~/.config/boxtron/settings.toml)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override an option, as section.option=value
        #[arg(long = "tweak")]
        tweaks: Vec<String>,

        /// Directory the game runs from (default: current directory)
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// DOSBox arguments (after --)
        #[arg(last = true, required = true)]
        dosbox_args: Vec<String>,
    },

    /// Print the user configuration file name for a launch
    Key {
        /// Game identity used in file names (e.g. Steam app id)
        #[arg(long)]
        app_id: String,

        /// DOSBox arguments (after --)
        #[arg(last = true)]
        dosbox_args: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            app_id,
            settings,
            tweaks,
            dir,
            force,
            dosbox_args,
        } => {
            run_generate(app_id, settings, tweaks, dir, force, dosbox_args);
        }
        Commands::Explain {
            settings,
            tweaks,
            dir,
            dosbox_args,
        } => {
            run_explain(settings, tweaks, dir, dosbox_args);
        }
        Commands::Key {
            app_id,
            dosbox_args,
        } => {
            println!("{}", uniq_conf_name(&app_id, &dosbox_args));
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    error!("{}", message);
    process::exit(1);
}

fn load_settings(path: Option<PathBuf>) -> Result<HostSettings, SettingsError> {
    let path = match path {
        Some(p) => p,
        None => HostSettings::default_path()?,
    };
    HostSettings::load(&path)
}

fn run_generate(
    app_id: String,
    settings_path: Option<PathBuf>,
    tweaks: Vec<String>,
    dir: PathBuf,
    force: bool,
    dosbox_args: Vec<String>,
) {
    let settings = load_settings(settings_path).unwrap_or_else(|e| fail(e));
    let tweaks = settings.tweak_layer(&tweaks).unwrap_or_else(|e| fail(e));
    let midi = settings.midi.lookup();

    let opts = GenerateOptions {
        app_id,
        dosbox_args,
        dir,
        tweaks,
        display: settings.display.clone(),
        force,
    };
    let collab = Collaborators {
        resolver: &PosixPathResolver,
        cue: &NoCueRepair,
        midi: &midi,
    };

    let output = generate(&opts, &collab).unwrap_or_else(|e| fail(e));

    for notice in &output.notices {
        eprintln!("{}", notice);
    }
    println!("{}", output.user_conf.display());
    println!("{}", output.auto_conf.display());
}

fn run_explain(
    settings_path: Option<PathBuf>,
    tweaks: Vec<String>,
    dir: PathBuf,
    dosbox_args: Vec<String>,
) {
    let settings = load_settings(settings_path).unwrap_or_else(|e| fail(e));
    let tweaks = settings.tweak_layer(&tweaks).unwrap_or_else(|e| fail(e));

    let (_, config) = resolve(&dosbox_args, tweaks, &dir).unwrap_or_else(|e| fail(e));

    match config.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("Error serializing output: {}", e)),
    }
}
