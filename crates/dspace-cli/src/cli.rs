//! CLI argument definitions for the export asset tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dspace_model::{
    AssetProps, ExportFormat, ExportOutcome, ExportPreset, ExportStatus, LayerId, Scale,
};
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "dspace",
    version,
    about = "Inspect and edit Design Space export assets",
    long_about = "Inspect and edit the export assets stored in a host document descriptor.\n\n\
                  Reads the JSON payload the host hands over (document plus layers with their\n\
                  exportAssets), applies the requested change and writes the payload back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps (always on with --log-file).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

impl Cli {
    /// Logging configuration for these flags.
    ///
    /// An explicit `--log-level` beats `-v`/`-q`, and either one disables the
    /// `RUST_LOG` override. File output is timestamped and never colored.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let level = explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter());
        let to_file = self.log_file.is_some();
        let ansi = match self.color.color {
            ColorChoice::Always => !to_file,
            ColorChoice::Never => false,
            ColorChoice::Auto => !to_file && io::stderr().is_terminal(),
        };
        let mut config = LogConfig::default()
            .with_level(level)
            .with_format(self.log_format.into())
            .with_timestamps(self.log_timestamps || to_file)
            .with_ansi(ansi)
            .with_log_file(self.log_file.clone());
        config.use_env_filter = explicit.is_none() && !self.verbosity.is_present();
        config
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show root exports and the layers that have exports.
    Summary(SummaryArgs),

    /// Show the export rows shared by a layer selection.
    Uniform(UniformArgs),

    /// Mark exports as requested ahead of an export run.
    Request(EditArgs),

    /// Add a preset batch of assets.
    AddPreset(AddPresetArgs),

    /// Update properties of the asset at an index (appends past the end).
    Set(SetArgs),

    /// Insert a new asset.
    Add(AddArgs),

    /// Remove the asset at an index.
    Remove(RemoveArgs),

    /// Record the result of an export run for the asset at an index.
    Resolve(ResolveArgs),

    /// List the available scales, formats and presets.
    Presets,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Descriptor payload (JSON).
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Only artboards (true) or only non-artboard layers (false).
    #[arg(long = "artboards", value_name = "BOOL")]
    pub artboards: Option<bool>,

    /// Only export-enabled (true) or only export-disabled layers (false).
    #[arg(long = "enabled", value_name = "BOOL")]
    pub export_enabled: Option<bool>,
}

#[derive(Args)]
pub struct UniformArgs {
    /// Descriptor payload (JSON).
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Layers in the selection.
    #[arg(long = "layer", value_name = "ID", required = true)]
    pub layers: Vec<LayerId>,
}

/// Target and output shared by the editing commands.
#[derive(Args)]
pub struct EditArgs {
    /// Descriptor payload (JSON).
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Layers to edit. Without any, the document root exports are edited.
    #[arg(long = "layer", value_name = "ID")]
    pub layers: Vec<LayerId>,

    /// Where to write the updated payload (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct AddPresetArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Preset to add.
    #[arg(long = "preset", value_enum)]
    pub preset: PresetArg,
}

#[derive(Args)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Position of the asset to remove.
    #[arg(long = "index", value_name = "N")]
    pub index: usize,
}

/// Asset properties given on the command line. Unset flags stay unchanged.
#[derive(Args)]
pub struct AssetPropsArgs {
    /// Export scale, e.g. `2`, `0.5` or `2x`.
    #[arg(long = "scale", value_name = "SCALE")]
    pub scale: Option<Scale>,

    /// Filename suffix. Replaces the one derived from the scale.
    #[arg(long = "suffix", value_name = "SUFFIX", allow_hyphen_values = true)]
    pub suffix: Option<String>,

    /// Output format (png, jpg, svg, pdf).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<ExportFormat>,

    /// Export status (new, requested, stable, error).
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<ExportStatus>,

    /// Path of the exported file.
    #[arg(long = "file-path", value_name = "PATH")]
    pub file_path: Option<PathBuf>,
}

impl AssetPropsArgs {
    pub fn to_props(&self) -> AssetProps {
        AssetProps {
            scale: self.scale,
            suffix: self.suffix.clone(),
            format: self.format,
            status: self.status,
            file_path: self.file_path.clone(),
        }
    }
}

#[derive(Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Position of the asset to update.
    #[arg(long = "index", value_name = "N")]
    pub index: usize,

    #[command(flatten)]
    pub props: AssetPropsArgs,
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Insert position (default: end of each list).
    #[arg(long = "index", value_name = "N")]
    pub index: Option<usize>,

    #[command(flatten)]
    pub props: AssetPropsArgs,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Position of the exported asset.
    #[arg(long = "index", value_name = "N")]
    pub index: usize,

    /// The export succeeded and wrote this file.
    #[arg(
        long = "written",
        value_name = "PATH",
        conflicts_with = "failed",
        required_unless_present = "failed"
    )]
    pub written: Option<PathBuf>,

    /// The export failed.
    #[arg(long = "failed")]
    pub failed: bool,
}

impl ResolveArgs {
    pub fn outcome(&self) -> ExportOutcome {
        match &self.written {
            Some(path) => ExportOutcome::Written(path.clone()),
            None => ExportOutcome::Failed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Ios,
    Android,
}

impl From<PresetArg> for ExportPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Ios => ExportPreset::Ios,
            PresetArg::Android => ExportPreset::Android,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
