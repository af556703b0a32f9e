//! Command-line interface for gqls.
//!
//! # Usage
//!
//! ```bash
//! # Convert one shorthand file to stdout
//! gqls convert query.gql
//!
//! # Convert to a file
//! gqls convert query.gql -o query.graphql
//!
//! # Rewrite every .gql import under src/
//! gqls rewrite src
//!
//! # Report structural problems in shorthand files
//! gqls check queries/*.gql
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use gqls_core::Diagnostic;
use gqls_rewrite::{RewriteError, RewriteOptions, RewriteReport};
use gqls_syntax::{convert_with_options, ConvertOptions};
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "gqls")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a shorthand file to GraphQL
    Convert {
        /// Shorthand file
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indentation size
        #[arg(long, default_value = "2")]
        indent: usize,

        /// Use tabs instead of spaces
        #[arg(long)]
        tabs: bool,

        /// Refuse to convert shorthand with structural errors
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite shorthand imports in a source tree
    Rewrite {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Extensions of source files to rewrite
        #[arg(short, long, default_value = "js,jsx")]
        extensions: String,

        /// Extension of shorthand files
        #[arg(long, default_value = "gql")]
        shorthand_extension: String,

        /// Extension of generated files
        #[arg(long, default_value = "graphql")]
        output_extension: String,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Stop at shorthand with structural errors
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check shorthand files for structural problems
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print version information
    Version,
}

pub fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            file,
            output,
            indent,
            tabs,
            strict,
        } => {
            let options = ConvertOptions {
                indent_size: indent,
                use_tabs: tabs,
            };
            convert_file(&file, output.as_deref(), options, strict, cli.quiet)
        }
        Commands::Rewrite {
            dir,
            extensions,
            shorthand_extension,
            output_extension,
            dry_run,
            strict,
            json,
        } => {
            let options = RewriteOptions {
                source_extensions: parse_extensions(&extensions),
                shorthand_extension,
                output_extension,
                strict,
                dry_run,
                ..Default::default()
            };
            rewrite(&dir, &options, json, cli.verbose, cli.quiet)
        }
        Commands::Check {
            files,
            strict,
            json,
        } => check_files(&files, strict, json, cli.verbose, cli.quiet),
        Commands::Version => {
            println!("gqls {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

/// Splits a comma-separated extension list, tolerating leading dots.
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

fn convert_file(
    file: &Path,
    output: Option<&Path>,
    options: ConvertOptions,
    strict: bool,
    quiet: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    debug!("Converting {}", file.display());
    let source = std::fs::read_to_string(file)?;
    let result = convert_with_options(&source, options);

    if strict && result.diagnostics.has_errors() {
        for diagnostic in result.diagnostics.errors() {
            eprintln!("{:?}", report(file, &source, diagnostic));
        }
        return Ok(1);
    }

    match output {
        Some(path) => {
            std::fs::write(path, &result.output)?;
            if !quiet {
                println!("{} {}", "Generated".green(), path.display());
            }
        }
        None => print!("{}", result.output),
    }

    Ok(0)
}

fn rewrite(
    dir: &Path,
    options: &RewriteOptions,
    json: bool,
    verbose: bool,
    quiet: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let report = match gqls_rewrite::rewrite_dir(dir, options) {
        Ok(report) => report,
        Err(RewriteError::Structure { path, diagnostics }) => {
            eprintln!("{} {}", "Error".red().bold(), path.display());
            for error in diagnostics.errors() {
                let line = error.primary_span().map_or(0, |s| s.line_number());
                eprintln!("  {} line {}: {}", "-->".blue(), line, error.title);
            }
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    debug!(
        "Scanned {} file(s) under {}",
        report.files_scanned,
        dir.display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    if !quiet {
        print_summary(&report, options.dry_run, verbose);
    }
    Ok(0)
}

fn print_summary(report: &RewriteReport, dry_run: bool, verbose: bool) {
    let verb = if dry_run { "Would rewrite" } else { "Rewrote" };

    for import in &report.imports {
        println!(
            "{} {} ({} -> {})",
            verb.green(),
            import.source.display(),
            import.shorthand.display(),
            import.output.display()
        );
    }

    if verbose {
        println!(
            "{} file(s) scanned, {} source file(s) written",
            report.files_scanned, report.sources_written
        );
    }

    println!(
        "{} {} import(s) rewritten",
        "Success:".green().bold(),
        report.imports.len()
    );
}

fn check_files(
    files: &[PathBuf],
    strict: bool,
    json: bool,
    verbose: bool,
    quiet: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut failed = false;
    let mut all = serde_json::Map::new();

    for file in files {
        if verbose {
            println!("{} {}", "Checking".blue(), file.display());
        }

        let source = std::fs::read_to_string(file)?;
        let result = convert_with_options(&source, ConvertOptions::default());
        let diagnostics = &result.diagnostics;

        if diagnostics.has_errors() || (strict && !diagnostics.is_empty()) {
            failed = true;
        }

        if json {
            all.insert(
                file.display().to_string(),
                serde_json::to_value(diagnostics)?,
            );
            continue;
        }

        for diagnostic in diagnostics {
            eprintln!("{:?}", report(file, &source, diagnostic));
        }
        if diagnostics.is_empty() && verbose {
            println!("{} {}", "OK".green(), file.display());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else if !failed && !quiet {
        println!(
            "{} {} file(s) checked",
            "Success:".green().bold(),
            files.len()
        );
    }

    Ok(i32::from(failed))
}

/// Builds a renderable report for one diagnostic against its source.
fn report(file: &Path, source: &str, diagnostic: &Diagnostic) -> Report {
    let labels = diagnostic
        .labels
        .iter()
        .map(|label| LabeledSpan::new_with_span(Some(label.message.clone()), label.span));

    let mut rendered = MietteDiagnostic::new(diagnostic.title.clone())
        .with_code(diagnostic.code.clone())
        .with_severity(diagnostic.severity.into())
        .with_labels(labels);
    if let Some(message) = &diagnostic.message {
        rendered = rendered.with_help(message.clone());
    }

    Report::new(rendered).with_source_code(NamedSource::new(
        file.display().to_string(),
        source.to_string(),
    ))
}
