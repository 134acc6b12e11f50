//! CLI argument definitions and command dispatch.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::DEFAULT_CONFIG_NAME;

/// Machine config CLI - layered machine/head/material profiles and color
/// tables for laser cutters and 3D printers.
#[derive(Parser, Debug)]
#[command(name = "mcfg", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "MCFG_FORMAT"
    )]
    pub format: OutputFormat,

    /// Verbose output (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file name or path
    #[arg(
        long,
        short = 'c',
        global = true,
        default_value = DEFAULT_CONFIG_NAME,
        env = "MCFG_CONFIG"
    )]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON.
    pub const fn use_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter configuration with example machines and a default
    /// color table
    Init(InitArgs),

    /// Print the resolved configuration file path
    Path,

    /// List record types present in the store
    Types,

    /// List record labels, optionally restricted to one type
    Labels(LabelsArgs),

    /// Read one property of a record
    Get(GetArgs),

    /// Overwrite one property of a record
    Set(SetArgs),

    /// Print the flattened working configuration
    Resolve(ResolveArgs),

    /// Inspect or modify the color table
    #[command(subcommand)]
    Color(ColorCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the init command.
#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the labels command.
#[derive(clap::Args, Debug)]
pub struct LabelsArgs {
    /// Record type to filter on (e.g. machine, head, material)
    pub kind: Option<String>,
}

/// Arguments for the get command.
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Record label
    pub label: String,

    /// Property key
    pub key: String,

    /// Nested key inside a mapping-valued property
    #[arg(long)]
    pub sub: Option<String>,
}

/// Arguments for the set command.
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Record label
    pub label: String,

    /// Property key
    pub key: String,

    /// New value (parsed as JSON, falling back to a plain string)
    pub value: String,

    /// Nested key inside a mapping-valued property
    #[arg(long)]
    pub sub: Option<String>,
}

/// Arguments for the resolve command.
#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Selector record type to resolve from
    #[arg(long, default_value = "default")]
    pub selector: String,
}

/// Color table subcommands.
#[derive(Subcommand, Debug)]
pub enum ColorCommands {
    /// Show one tag's entry, or the whole table
    Show(ColorShowArgs),

    /// Overwrite power, feed, or color for a tag
    Set(ColorSetArgs),

    /// Restore the default color table
    Reset,

    /// Pack a color value from RGB components or a power/feed pair
    Synth(ColorSynthArgs),
}

/// Arguments for color show.
#[derive(clap::Args, Debug)]
pub struct ColorShowArgs {
    /// Tag to show (e.g. L00, T1); all tags when omitted
    pub tag: Option<String>,
}

/// Arguments for color set.
#[derive(clap::Args, Debug)]
pub struct ColorSetArgs {
    /// Tag to modify (e.g. L00, T1)
    pub tag: String,

    /// Power fraction (0.0-1.0)
    #[arg(long)]
    pub power: Option<f64>,

    /// Feed fraction (0.0-1.0)
    #[arg(long)]
    pub feed: Option<f64>,

    /// Packed color, hex (#RRGGBB or 0xRRGGBB) or decimal
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for color synth.
#[derive(clap::Args, Debug)]
pub struct ColorSynthArgs {
    /// Red component (0.0-1.0)
    #[arg(long)]
    pub red: Option<f64>,

    /// Green component (0.0-1.0)
    #[arg(long)]
    pub green: Option<f64>,

    /// Blue component (0.0-1.0)
    #[arg(long)]
    pub blue: Option<f64>,

    /// Power fraction (0.0-1.0)
    #[arg(long)]
    pub power: Option<f64>,

    /// Feed fraction (0.0-1.0)
    #[arg(long)]
    pub feed: Option<f64>,
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
