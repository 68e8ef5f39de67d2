//! Command line front end for strapi-ts.
//!
//! Finds definition files, loads and de-duplicates them, runs the generator
//! and writes (or checks) the output tree.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod config;
mod importer;
mod writer;

pub use config::{AddField, FileConfig, OverridesConfig, Settings};

/// Command line flags.
#[derive(Parser, Debug)]
#[command(
    name = "strapi-ts",
    version,
    about = "Generate TypeScript interfaces and type guards from Strapi content-type definitions",
    long_about = None
)]
pub struct Cli {
    /// Folders searched for *.settings.json / schema.json, or definition files
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Folder of component definitions (*.json)
    #[arg(short = 'g', long = "components", value_name = "DIR")]
    pub components: Option<PathBuf>,

    /// Output folder [default: types]
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Put each content type in its own folder
    #[arg(short = 'n', long)]
    pub nested: bool,

    /// Emit enums instead of string literal unions
    #[arg(short = 'e', long = "enum")]
    pub enums: bool,

    /// Collections and repeatable components may be undefined
    #[arg(short = 'c', long)]
    pub collection_can_be_undefined: bool,

    /// TOML configuration file; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compare with the files on disk instead of writing; fail if anything differs
    #[arg(long)]
    pub check: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse `args` (program name first) and run. Returns the process exit code.
pub fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            run_command(|| run(cli))
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// One generation (or check) run.
pub fn run(cli: Cli) -> Result<(), String> {
    let settings = Settings::resolve(&cli)?;
    if settings.inputs.is_empty() && settings.components.is_none() {
        return Err(
            "No input given. Pass definition folders or files, or set `input` in the config file."
                .to_string(),
        );
    }

    let mut records = importer::load_records(&importer::discover_inputs(&settings.inputs)?, false)?;
    if let Some(dir) = &settings.components {
        records.extend(importer::load_records(
            &importer::discover_components(dir)?,
            true,
        )?);
    }
    let records = importer::dedupe_by_name(records);
    debug!("Loaded {} model definitions", records.len());

    let manifest = strapi_ts_core::generate(records, &settings.generator)
        .map_err(|e| format!("Generation failed: {e}"))?;

    if settings.check {
        let changes = writer::pending_changes(&settings.output, &manifest)?;
        if changes.is_empty() {
            println!(
                "All {} interfaces are up to date.",
                manifest.units.len()
            );
            return Ok(());
        }
        let style = writer::Style::for_stdout();
        for change in &changes {
            print!("{}", change.report(style));
        }
        return Err(format!(
            "{} generated file(s) in {} are out of date. Run without --check to update them.",
            changes.len(),
            settings.output.display()
        ));
    }

    writer::write_manifest(&settings.output, &manifest)?;
    println!("Generated {} interfaces.", manifest.units.len());
    Ok(())
}

/// Install the stderr fmt subscriber.
///
/// STRAPI_TS_LOG takes a plain level ("debug", "warn", ...) applied to the
/// strapi-ts crates, or a full filter spec like "strapi_ts_core=trace".
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = match std::env::var("STRAPI_TS_LOG") {
        Ok(level) if is_plain_level(&level) => crate_filter(&level),
        Ok(spec) => spec,
        Err(_) => crate_filter(default_level),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        debug!("tracing subscriber already initialized");
    }
}

fn crate_filter(level: &str) -> String {
    ["strapi_ts_common", "strapi_ts_core", "strapi_ts_cli"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
