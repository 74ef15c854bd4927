use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use diagram::{AsciiSizing, DEFAULT_INDENT, Direction, RenderConfig, Summary, write_rules};
use tracing::Level;

mod input;

use input::CliError;

#[derive(Parser, Debug)]
#[command(name = "railtext", about = "Draw grammar rules as ASCII railroad diagrams")]
struct Cli {
    /// Flow direction: `ltr` or `rtl`.
    #[arg(long, env = "RAILTEXT_DIRECTION", default_value = "ltr")]
    direction: Direction,

    /// Columns to indent each diagram line by.
    #[arg(long, env = "RAILTEXT_INDENT", default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Only draw the named rule (repeatable).
    #[arg(long = "rule", value_name = "NAME")]
    rules: Vec<String>,

    /// Log progress at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// JSON grammar file; stdin when omitted.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(&cli) {
        Ok(summary) if summary.failed == 0 => {
            tracing::debug!(rendered = summary.rendered, "done");
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            tracing::warn!(rendered = summary.rendered, failed = summary.failed, "some rules were not drawn");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "railtext failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Summary, CliError> {
    let grammar = input::read_grammar(cli.file.as_deref())?;
    let rules = input::select_rules(grammar.rules, &cli.rules)?;
    tracing::debug!(rules = rules.len(), direction = ?cli.direction, "drawing grammar");

    let config = RenderConfig { direction: cli.direction, indent: cli.indent, ..RenderConfig::default() };
    let mut out = BufWriter::new(io::stdout().lock());
    write_rules(&mut out, &rules, &config, &AsciiSizing, None).map_err(CliError::Output)
}
