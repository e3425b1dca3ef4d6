//! Petrel CLI
//!
//! Reads a style sheet (or a bare declaration block) and writes it back out,
//! formatted or minified, with shorthands rebuilt where possible.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use petrel_common::warning::{clear_warnings, set_quiet, take_warnings};
use petrel_css::{DeclarationBlock, SerializeOptions, StyleSheet};

/// Petrel: parse CSS and write it back with shorthands rebuilt
#[derive(Parser, Debug)]
#[command(name = "petrel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Reformat a style sheet
    petrel style.css

    # Minify from stdin
    cat style.css | petrel --minify -

    # Serialize an inline style attribute
    petrel --block --css 'margin-top: 0; margin-right: 0; margin-bottom: 0; margin-left: 0'

    # Use double quotes and two-space indentation
    petrel --config petrel.json style.css
"#)]
struct Cli {
    /// Path to a CSS file, or `-` for stdin
    #[arg(value_name = "FILE")]
    path: Option<String>,

    /// Parse a CSS string directly instead of a file
    #[arg(long, value_name = "CSS")]
    css: Option<String>,

    /// Treat the input as a declaration block (the contents of a style attribute)
    #[arg(short, long)]
    block: bool,

    /// Write minified output
    #[arg(short, long)]
    minify: bool,

    /// JSON file with serialization options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not print warnings or the summary of dropped input
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);
    clear_warnings();

    let options = load_options(cli.config.as_ref())?;
    let input = read_input(&cli)?;

    let output = if cli.block {
        let block = DeclarationBlock::parse(&input);
        if cli.minify {
            block.minified_css_text_with(&options)
        } else {
            block.css_text_with(&options)
        }
    } else {
        let sheet = StyleSheet::parse_with(&input, options);
        if cli.minify {
            sheet.minified_css_text()
        } else {
            sheet.css_text()
        }
    };

    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }

    if !cli.quiet {
        print_summary(&take_warnings());
    }
    Ok(())
}

/// Options from `--config`, or the defaults.
fn load_options(path: Option<&PathBuf>) -> Result<SerializeOptions> {
    let Some(path) = path else {
        return Ok(SerializeOptions::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// The CSS source named on the command line.
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref css) = cli.css {
        return Ok(css.clone());
    }
    match cli.path.as_deref() {
        Some("-") | None => {
            let mut text = String::new();
            let _ = io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}")),
    }
}

fn print_summary(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("{}", format!("{} warning(s):", warnings.len()).yellow().bold());
    for warning in warnings {
        eprintln!("  {warning}");
    }
}
