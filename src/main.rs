//! Machine config CLI - layered machine/head/material profiles and color
//! tables for laser cutters and 3D printers.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser};
use console::style;
use serde_json::{json, Value};

use mcfg::cli::{
    Cli, ColorCommands, ColorSetArgs, ColorShowArgs, ColorSynthArgs, Commands, CompletionsArgs,
    GetArgs, InitArgs, LabelsArgs, ResolveArgs, SetArgs,
};
use mcfg::config::{
    default_color_table, resolve_config_path, sample_records, synthesize_color, MachineConfig,
    RecordStore, COLOR_TABLE_LABEL,
};
use mcfg::error::{McfgError, Result};
use mcfg::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }

    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init(args) => cmd_init(cli, args),
        Commands::Path => cmd_path(cli),
        Commands::Types => cmd_types(cli),
        Commands::Labels(args) => cmd_labels(cli, args),
        Commands::Get(args) => cmd_get(cli, args),
        Commands::Set(args) => cmd_set(cli, args),
        Commands::Resolve(args) => cmd_resolve(cli, args),
        Commands::Color(command) => match command {
            ColorCommands::Show(args) => cmd_color_show(cli, args),
            ColorCommands::Set(args) => cmd_color_set(cli, args),
            ColorCommands::Reset => cmd_color_reset(cli),
            ColorCommands::Synth(args) => cmd_color_synth(cli, args),
        },
        Commands::Completions(args) => cmd_completions(args),
    }
}

fn output_error(cli: &Cli, error: &McfgError) {
    if cli.use_json() {
        let payload = json!({
            "error": error.to_string(),
            "recoverable": error.is_user_recoverable(),
            "suggestion": error.suggestion(),
        });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {error}", style("error:").red().bold());
        if let Some(suggestion) = error.suggestion() {
            eprintln!("  {}", style(suggestion).dim());
        }
    }
}

fn print_json(cli: &Cli, value: &Value) {
    if cli.use_compact_json() {
        println!("{value}");
    } else {
        println!("{value:#}");
    }
}

/// Parse a CLI value argument: JSON if it parses, plain string otherwise.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse a color argument: `#RRGGBB`, `0xRRGGBB`, or decimal.
fn parse_color_arg(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"));

    let parsed = match hex {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|e| McfgError::Other(format!("Invalid color value '{raw}': {e}")))
}

// === Commands ===

fn cmd_init(cli: &Cli, args: &InitArgs) -> Result<()> {
    let path = resolve_config_path(&cli.config)?;
    if path.exists() && !args.force {
        return Err(McfgError::Other(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut records = sample_records();
    records.push(default_color_table());
    let store = RecordStore::from_records(records)?;
    store.write_to(&path)?;

    if cli.use_json() {
        print_json(
            cli,
            &json!({ "path": path.display().to_string(), "records": store.len() }),
        );
    } else {
        println!(
            "Wrote starter configuration ({} records) to {}",
            store.len(),
            style(path.display()).bold()
        );
    }
    Ok(())
}

fn cmd_path(cli: &Cli) -> Result<()> {
    let path = resolve_config_path(&cli.config)?;
    if cli.use_json() {
        print_json(cli, &json!({ "path": path.display().to_string() }));
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_types(cli: &Cli) -> Result<()> {
    let config = MachineConfig::open(&cli.config)?;
    let kinds = config.store().kinds();

    if cli.use_json() {
        print_json(cli, &json!(kinds));
    } else {
        for kind in kinds {
            println!("{kind}");
        }
    }
    Ok(())
}

fn cmd_labels(cli: &Cli, args: &LabelsArgs) -> Result<()> {
    let config = MachineConfig::open(&cli.config)?;

    if let Some(kind) = &args.kind {
        let labels = config.store().labels_of_kind(kind);
        if cli.use_json() {
            print_json(cli, &json!(labels));
        } else {
            for label in labels {
                println!("{label}");
            }
        }
    } else if cli.use_json() {
        let entries: Vec<Value> = config
            .store()
            .records()
            .iter()
            .map(|r| json!({ "label": r.label, "type": r.kind }))
            .collect();
        print_json(cli, &json!(entries));
    } else {
        for record in config.store().records() {
            println!("{} {}", record.label, style(format!("({})", record.kind)).dim());
        }
    }
    Ok(())
}

fn cmd_get(cli: &Cli, args: &GetArgs) -> Result<()> {
    let config = MachineConfig::open(&cli.config)?;
    let value = match &args.sub {
        Some(sub) => config
            .store()
            .nested_property_value(&args.label, &args.key, sub)?,
        None => config.store().property_value(&args.label, &args.key)?,
    };

    if cli.use_json() {
        print_json(cli, value);
    } else {
        println!("{value}");
    }
    Ok(())
}

fn cmd_set(cli: &Cli, args: &SetArgs) -> Result<()> {
    let mut config = MachineConfig::open(&cli.config)?;
    let value = parse_value(&args.value);

    let changed = match &args.sub {
        Some(sub) => config
            .store_mut()
            .set_nested_property_value(&args.label, &args.key, sub, value),
        None => config
            .store_mut()
            .set_property_value(&args.label, &args.key, value),
    };

    if changed {
        config.save()?;
    }

    if cli.use_json() {
        print_json(cli, &json!({ "changed": changed }));
    } else if changed {
        println!("Updated {}.{}", args.label, args.key);
    } else {
        println!("No matching record/property; nothing changed");
    }
    Ok(())
}

fn cmd_resolve(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let config = MachineConfig::open(&cli.config)?;
    let working = config.resolve_selector(&args.selector)?;

    if cli.use_json() {
        print_json(cli, &Value::Object(working));
    } else {
        let width = working.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in &working {
            println!("{} {value}", style(format!("{key:width$}")).bold());
        }
    }
    Ok(())
}

fn cmd_color_show(cli: &Cli, args: &ColorShowArgs) -> Result<()> {
    let config = MachineConfig::open(&cli.config)?;
    let store = config.store();

    let tags: Vec<String> = match &args.tag {
        Some(tag) => vec![tag.clone()],
        None => store
            .find_by_label(COLOR_TABLE_LABEL)
            .ok_or_else(|| McfgError::LabelNotFound {
                label: COLOR_TABLE_LABEL.to_string(),
            })?
            .property
            .keys()
            .cloned()
            .collect(),
    };

    if cli.use_json() {
        let entries: Vec<Value> = tags
            .iter()
            .map(|tag| {
                Ok(json!({
                    "tag": tag,
                    "power": store.power(tag)?,
                    "feed": store.feed(tag)?,
                    "color": store.color(tag)?,
                    "hex": store.color_hex(tag)?,
                }))
            })
            .collect::<Result<_>>()?;
        print_json(cli, &json!(entries));
    } else {
        for tag in &tags {
            let color = store.color(tag)?;
            println!(
                "{}  power={:<5} feed={:<5} color=#{color:06X}",
                style(format!("{tag:>3}")).bold(),
                store.power(tag)?,
                store.feed(tag)?,
            );
        }
    }
    Ok(())
}

fn cmd_color_set(cli: &Cli, args: &ColorSetArgs) -> Result<()> {
    if args.power.is_none() && args.feed.is_none() && args.color.is_none() {
        return Err(McfgError::Other(
            "Nothing to set: pass --power, --feed, or --color".to_string(),
        ));
    }

    let mut config = MachineConfig::open(&cli.config)?;
    if let Some(power) = args.power {
        config.store_mut().set_power(&args.tag, power)?;
    }
    if let Some(feed) = args.feed {
        config.store_mut().set_feed(&args.tag, feed)?;
    }
    if let Some(color) = &args.color {
        let packed = parse_color_arg(color)?;
        config.store_mut().set_color(&args.tag, packed)?;
    }
    config.save()?;

    if cli.use_json() {
        print_json(
            cli,
            &json!({
                "tag": args.tag,
                "power": config.store().power(&args.tag)?,
                "feed": config.store().feed(&args.tag)?,
                "hex": config.store().color_hex(&args.tag)?,
            }),
        );
    } else {
        println!("Updated color table entry {}", style(&args.tag).bold());
    }
    Ok(())
}

fn cmd_color_reset(cli: &Cli) -> Result<()> {
    let mut config = MachineConfig::open(&cli.config)?;
    let present = config.store().find_by_label(COLOR_TABLE_LABEL).is_some();

    config.store_mut().reset_color_table();
    if present {
        config.save()?;
    }

    if cli.use_json() {
        print_json(cli, &json!({ "reset": present }));
    } else if present {
        println!("Color table restored to defaults");
    } else {
        println!("No ColorTable record; nothing to reset");
    }
    Ok(())
}

fn cmd_color_synth(cli: &Cli, args: &ColorSynthArgs) -> Result<()> {
    let color = synthesize_color(args.red, args.green, args.blue, args.power, args.feed)?;

    if cli.use_json() {
        print_json(cli, &json!({ "color": color, "hex": format!("#{color:X}") }));
    } else {
        println!("#{color:X}");
    }
    Ok(())
}

fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "mcfg", &mut io::stdout());
    Ok(())
}
