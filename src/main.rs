//! Line-based reader front end
//!
//! Usage:
//!   atomreader [--max-depth N] [--strict] [--json] [FILE]
//!
//! Without FILE, reads programs from stdin, joining lines until the
//! parentheses balance, and prints each parsed tree.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{bail, Context};
use atomreader::{AtomTree, Diagnostic, ParenStats, Parser, ParserConfig};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable holding the log level
const LOG_ENV: &str = "ATOMREADER_LOG";

struct Options {
    config: ParserConfig,
    json: bool,
    file: Option<String>,
}

fn main() -> ExitCode {
    init_logging();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {:#}", err);
            eprintln!("usage: atomreader [--max-depth N] [--strict] [--json] [FILE]");
            return ExitCode::from(2);
        }
    };

    let outcome = match &options.file {
        Some(path) => read_file(path, &options),
        None => repl(&options),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::WARN);

    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .with_filter(level);

    tracing_subscriber::registry().with(layer).init();
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
    let mut options = Options {
        config: ParserConfig::default(),
        json: false,
        file: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-depth" => {
                let value = args.next().context("--max-depth needs a value")?;
                let depth = value
                    .parse()
                    .with_context(|| format!("invalid --max-depth value: {}", value))?;
                options.config = options.config.with_max_depth(depth);
            }
            "--strict" => options.config = options.config.with_report_unterminated(true),
            "--json" => options.json = true,
            flag if flag.starts_with("--") => bail!("unknown flag: {}", flag),
            _ => {
                if options.file.is_some() {
                    bail!("only one input file is accepted");
                }
                options.file = Some(arg);
            }
        }
    }

    Ok(options)
}

/// Parses a whole file; `Ok(false)` when the tree holds error atoms
fn read_file(path: &str, options: &Options) -> anyhow::Result<bool> {
    let source = std::fs::read_to_string(path)
        .map_err(atomreader::Error::from)
        .with_context(|| format!("reading {}", path))?;

    let mut parser = Parser::with_config(&source, options.config.clone());
    let tree = parser.parse();
    show(&tree, parser.diagnostics(), options)?;

    let rest = parser.remaining();
    if !rest.trim().is_empty() {
        eprintln!("warning: {} characters left unread", rest.chars().count());
    }

    Ok(!tree.has_errors())
}

fn repl(options: &Options) -> anyhow::Result<bool> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buffer = String::new();

    loop {
        print!("{}", if buffer.is_empty() { "> " } else { ". " });
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        if buffer.is_empty() {
            match line.trim() {
                "" => continue,
                "exit" | "quit" => break,
                "help" => {
                    print_help();
                    continue;
                }
                _ => {}
            }
        }

        buffer.push_str(&line);
        buffer.push('\n');
        if ParenStats::of(&buffer).needs_more_input() {
            continue;
        }

        let source = std::mem::take(&mut buffer);
        let mut parser = Parser::with_config(&source, options.config.clone());
        let tree = parser.parse();
        show(&tree, parser.diagnostics(), options)?;
    }

    // Whatever was still pending when input ended
    if !buffer.trim().is_empty() {
        let mut parser = Parser::with_config(&buffer, options.config.clone());
        let tree = parser.parse();
        show(&tree, parser.diagnostics(), options)?;
    }

    Ok(true)
}

fn show(tree: &AtomTree, diagnostics: &[Diagnostic], options: &Options) -> anyhow::Result<()> {
    if options.json {
        println!("{}", tree.to_json()?);
    } else {
        println!("{}", tree);
    }
    for diagnostic in diagnostics {
        eprintln!("  {}", diagnostic);
    }
    Ok(())
}

fn print_help() {
    println!("Type S-expressions; input continues until parentheses balance.");
    println!();
    println!("  (+ 1 2)          a list");
    println!("  'x               a quoted symbol");
    println!("  \"text\" 1.5e3     string and float literals");
    println!("  ; comment        ignored to end of line");
    println!();
    println!("Commands: help, exit, quit");
}
