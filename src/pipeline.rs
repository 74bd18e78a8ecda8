//! Pipeline orchestration
//!
//! Turns a DOSBox command line into the two generated configuration files:
//! - Parse the accepted argument subset
//! - Merge configuration layers
//! - Remove files left by retired naming schemes
//! - Write the user file (unless it already exists) and the auto file
//!
//! Nothing is written when the arguments do not describe a DOSBox launch.

use std::path::{Path, PathBuf};

use dosbox_argv::{parse_argv, ArgvError, DosboxArgs};
use log::info;
use thiserror::Error;

use crate::autoexec::{AutoexecRewriter, CueRepair, PathResolver};
use crate::config::{ConfigError, ResolvedConfig, Sections};
use crate::midi::MidiLookup;
use crate::naming::{cleanup_old_conf_files, uniq_conf_name};
use crate::settings::DisplaySettings;
use crate::writer::{write_auto_conf, write_user_conf, WriteError};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid DOSBox arguments: {0}")]
    Argv(#[from] ArgvError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to remove stale configuration: {0}")]
    Cleanup(#[source] std::io::Error),

    #[error("failed to write configuration: {0}")]
    Write(#[from] WriteError),
}

/// External capabilities the pipeline delegates to.
pub struct Collaborators<'a> {
    pub resolver: &'a dyn PathResolver,
    pub cue: &'a dyn CueRepair,
    pub midi: &'a dyn MidiLookup,
}

/// Inputs of one generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Game identity used in file names (e.g. a Steam app id)
    pub app_id: String,
    /// Arguments originally passed to `dosbox.exe`
    pub dosbox_args: Vec<String>,
    /// Directory the game runs from; files are read and written here
    pub dir: PathBuf,
    /// Tweak layer
    pub tweaks: Sections,
    /// Host display settings
    pub display: DisplaySettings,
    /// Regenerate the user file even if it exists
    pub force: bool,
}

/// Outcome of a generate run.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    /// User configuration file
    pub user_conf: PathBuf,
    /// Whether the user file was (re)written on this run
    pub user_conf_written: bool,
    /// Auto configuration file
    pub auto_conf: PathBuf,
    /// Sound setup summary for the user
    pub notices: Vec<String>,
    /// Stale files removed
    pub removed: Vec<PathBuf>,
}

/// Parse `dosbox_args` and merge every configuration layer.
pub fn resolve(
    dosbox_args: &[String],
    tweaks: Sections,
    dir: &Path,
) -> Result<(DosboxArgs, ResolvedConfig), PipelineError> {
    let args = parse_argv(dosbox_args)?;
    if !args.is_meaningful() {
        return Err(ConfigError::Usage.into());
    }
    let config = ResolvedConfig::from_args(&args, tweaks, dir)?;
    Ok((args, config))
}

/// Run the whole pipeline.
pub fn generate(
    opts: &GenerateOptions,
    collab: &Collaborators<'_>,
) -> Result<GenerateOutput, PipelineError> {
    let (_, config) = resolve(&opts.dosbox_args, opts.tweaks.clone(), &opts.dir)?;

    let removed = cleanup_old_conf_files(&opts.dir, &opts.app_id, &opts.dosbox_args)
        .map_err(PipelineError::Cleanup)?;

    let user_conf = opts.dir.join(uniq_conf_name(&opts.app_id, &opts.dosbox_args));
    let user_conf_written = opts.force || !user_conf.exists();
    if user_conf_written {
        let rewriter = AutoexecRewriter::new(collab.resolver, collab.cue);
        write_user_conf(&user_conf, &config, &opts.dosbox_args, &rewriter)?;
        info!("Created {}", user_conf.display());
    } else {
        info!("Using existing {}", user_conf.display());
    }

    let (auto_conf, auto) = write_auto_conf(&opts.dir, &config, &opts.display, collab.midi)?;

    Ok(GenerateOutput {
        user_conf,
        user_conf_written,
        auto_conf,
        notices: auto.notices,
        removed,
    })
}
