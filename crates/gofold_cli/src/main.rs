//! gofold: Rename the globals of a Go source file, or fold the files of a
//! package into one.
//!
//! Usage:
//!   gofold rename -i IN -o OUT [options]
//!   gofold merge -o OUT FILE...

use clap::{Args, Parser as ClapParser, Subcommand};
use gofold_merge::Package;
use gofold_options::{parse_config_file, parse_key_value, RewriteOptions};
use gofold_transformers::{RenameReport, Rewriter};
use miette::{IntoDiagnostic, WrapErr};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GOFOLD_LOG";

#[derive(ClapParser, Debug)]
#[command(name = "gofold", version, about = "gofold - global renaming and package folding for Go source")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rename globals and edit the declarations of one file.
    Rename(RenameArgs),
    /// Merge the files of one package into a single file.
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
struct RenameArgs {
    /// Input Go file.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: PathBuf,

    /// Output file.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: PathBuf,

    /// Rename a global declaration.
    #[arg(short = 'd', long = "declare", value_name = "OLD=NEW", value_parser = parse_key_value)]
    declares: Vec<(String, String)>,

    /// Replace the value of a constant.
    #[arg(short = 'c', long = "const", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    consts: Vec<(String, String)>,

    /// Add an import.
    #[arg(long = "import", value_name = "ALIAS=PATH", value_parser = parse_key_value)]
    imports: Vec<(String, String)>,

    /// Remove a top-level declaration.
    #[arg(long = "remove", value_name = "NAME")]
    remove: Vec<String>,

    /// Prefix for every renamed global.
    #[arg(long)]
    prefix: Option<String>,

    /// Suffix for every renamed global.
    #[arg(long)]
    suffix: Option<String>,

    /// New package name.
    #[arg(short = 'p', long = "package")]
    package: Option<String>,

    /// JSON file with rewrite options. Command line flags take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the rename report and log at debug level.
    #[arg(long)]
    debug: bool,
}

impl RenameArgs {
    /// The rewrite options given on the command line.
    fn overrides(&self) -> RewriteOptions {
        RewriteOptions {
            package: self.package.clone(),
            declares: self.declares.iter().cloned().collect(),
            consts: self.consts.iter().cloned().collect(),
            imports: self.imports.iter().cloned().collect(),
            remove: self.remove.clone(),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// Output file.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: PathBuf,

    /// Files of one package, merged in the given order.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Rename(args) => {
            init_logging(args.debug);
            run_rename(args)
        }
        Command::Merge(args) => {
            init_logging(args.debug);
            run_merge(args)
        }
    };

    if let Err(report) = result {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

/// `--debug` forces debug output; otherwise the filter comes from
/// `GOFOLD_LOG`, defaulting to warnings only.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_rename(args: &RenameArgs) -> miette::Result<()> {
    let mut options = match &args.config {
        Some(path) => parse_config_file(path).into_diagnostic()?,
        None => RewriteOptions::default(),
    };
    options.merge_overrides(args.overrides());

    let text = read_source(&args.input)?;
    let file_name = args.input.display().to_string();
    let (output, report) = Rewriter::new(options)
        .rewrite_source(&file_name, &text)
        .into_diagnostic()?;
    write_output(&args.output, &output)?;

    if args.debug {
        print_report(&report);
    }
    tracing::info!(input = %file_name, renamed = report.changed().count(), "rewrote file");
    Ok(())
}

fn run_merge(args: &MergeArgs) -> miette::Result<()> {
    let mut package = Package::new();
    package.load_files(&args.files).into_diagnostic()?;
    let output = package.merge_to_string().into_diagnostic()?;
    write_output(&args.output, &output)
}

fn read_source(path: &Path) -> miette::Result<String> {
    let bytes = std::fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    let text = gofold_scanner::source_text(&bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("{} is not valid UTF-8", path.display()))?;
    Ok(text.to_string())
}

fn write_output(path: &Path, text: &str) -> miette::Result<()> {
    std::fs::write(path, text)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot write {}", path.display()))
}

fn print_report(report: &RenameReport) {
    for (new, old) in report.iter() {
        if new == old {
            println!("{}", new);
        } else {
            println!("{} -> {}", old, new);
        }
    }
}
