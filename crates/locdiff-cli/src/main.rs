mod tables;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use locdiff_core::{Declaration, MissingReporting, ParseReporting};
use locdiff_parsers_strings::{collect_language_files, ParseDiagnostic};
use locdiff_services::{
    compare_files, format_specifier_subset, translate_all, CompareRun, TranslatedFile,
    FORMAT_SPECIFIER,
};
use locdiff_translate::NoopTranslator;
use serde::Serialize;
use tracing::{debug, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "locdiff", version, about = "Audit .strings localization files for missing translations")]
struct Cli {
    /// Base file to compare or reference
    #[arg(long)]
    base: PathBuf,

    /// Comparison files, or a single directory scanned recursively for
    /// Localizable.strings
    comparison_files: Vec<PathBuf>,

    /// Reporting level for parsing
    #[arg(long, value_enum)]
    parse: Option<ReportLevel>,

    /// Reporting level for missing declarations
    #[arg(long, value_enum)]
    missing: Option<ReportLevel>,

    /// Fetch machine translations for the missing entries
    #[arg(long, default_value_t = false)]
    translate: bool,

    /// Report output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportLevel {
    Default,
    Silent,
    Verbose,
}

impl ReportLevel {
    fn parse_reporting(self) -> ParseReporting {
        match self {
            Self::Default => ParseReporting::default(),
            Self::Silent => ParseReporting::silent(),
            Self::Verbose => ParseReporting::verbose(),
        }
    }

    fn missing_reporting(self) -> MissingReporting {
        match self {
            Self::Default => MissingReporting::default(),
            Self::Silent => MissingReporting::silent(),
            Self::Verbose => MissingReporting::verbose(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn from_config_name<T: ValueEnum>(name: &str) -> Option<T> {
    T::from_str(name, true).ok()
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "locdiff.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = init_tracing();

    let cli = Cli::parse();

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    run(cli, use_color)
}

fn run(cli: Cli, use_color: bool) -> Result<()> {
    let cfg = locdiff_config::load_config();

    // Config-file names go through the same ValueEnum parser as the CLI
    // flags, so the accepted spellings cannot drift apart.
    let parse_level = cli
        .parse
        .or_else(|| cfg.parse.as_deref().and_then(from_config_name))
        .unwrap_or(ReportLevel::Default);
    let missing_level = cli
        .missing
        .or_else(|| cfg.missing.as_deref().and_then(from_config_name))
        .unwrap_or(ReportLevel::Default);
    let format = cli
        .format
        .or_else(|| cfg.format.as_deref().and_then(from_config_name))
        .unwrap_or(OutputFormat::Text);
    let translate = cli.translate || cfg.translate.unwrap_or(false);

    let parse_reporting = parse_level.parse_reporting();
    let missing_reporting = missing_level.missing_reporting();
    debug!(
        event = "args",
        base = %cli.base.display(),
        comparisons = cli.comparison_files.len(),
        parse = ?parse_level,
        missing = ?missing_level,
        translate = translate,
    );

    if cli.comparison_files.is_empty() {
        eprintln!("No comparison files provided. Exiting.");
        return Ok(());
    }

    let comparison_files = if cli.comparison_files.len() == 1 && cli.comparison_files[0].is_dir() {
        let root = &cli.comparison_files[0];
        info!(event = "collect_language_files", root = %root.display());
        let files = collect_language_files(root, Some(&cli.base));
        info!(event = "collected", count = files.len());
        if files.is_empty() {
            return Err(eyre!(
                "no Localizable.strings files found under {}",
                root.display()
            ));
        }
        files
    } else {
        cli.comparison_files.clone()
    };

    let run = compare_files(&cli.base, &comparison_files, &parse_reporting)?;

    let translated = if translate {
        Some(translate_all(
            &NoopTranslator,
            &run.base_path,
            &run.files,
            &parse_reporting,
        ))
    } else {
        None
    };

    match format {
        OutputFormat::Text => render_text(&run, translated.as_deref(), &missing_reporting, use_color),
        OutputFormat::Json => render_json(&run, translated.as_deref())?,
    }

    Ok(())
}

fn render_diagnostic(diag: &ParseDiagnostic, use_color: bool) {
    let detail = match diag.kind.as_str() {
        "empty-line" => "empty line, skipping".to_string(),
        "pattern-mismatch" => format!(
            "does not match pattern: {}",
            diag.text.as_deref().unwrap_or_default()
        ),
        "duplicate-key" => format!(
            "key \"{}\" already seen at line {}, skipping",
            diag.key.as_deref().unwrap_or_default(),
            diag.first_line.unwrap_or_default()
        ),
        _ => String::new(),
    };

    if use_color {
        use owo_colors::OwoColorize;
        let kind = match diag.kind.as_str() {
            "duplicate-key" => format!("{}", diag.kind.yellow()),
            "pattern-mismatch" => format!("{}", diag.kind.red()),
            _ => format!("{}", diag.kind.cyan()),
        };
        eprintln!("[{}] {}:{} — {}", kind, diag.path, diag.line, detail);
    } else {
        eprintln!("[{}] {}:{} — {}", diag.kind, diag.path, diag.line, detail);
    }
}

fn render_text(
    run: &CompareRun,
    translated: Option<&[TranslatedFile]>,
    missing_reporting: &MissingReporting,
    use_color: bool,
) {
    for diag in &run.base_diagnostics {
        render_diagnostic(diag, use_color);
    }
    for file in &run.files {
        for diag in &file.diagnostics {
            render_diagnostic(diag, use_color);
        }
    }

    for file in &run.files {
        if missing_reporting.missing_declarations {
            if file.missing.is_empty() {
                println!("✔ No missing declarations found in {}.", file.path.display());
            } else {
                println!(
                    "Found {} missing declaration(s) in {}:",
                    file.missing.len(),
                    file.path.display()
                );
                println!("{}", tables::declarations_table(file.missing.iter()));
            }
        }

        if missing_reporting.string_format_warnings {
            let subset = format_specifier_subset(&file.missing);
            if !subset.is_empty() {
                println!(
                    "⚠ {} missing declaration(s) in {} contain string format specifiers ({}):",
                    subset.len(),
                    file.path.display(),
                    FORMAT_SPECIFIER
                );
                println!("{}", tables::declarations_table(subset.into_iter()));
            }
        }
    }

    let Some(translated) = translated else {
        return;
    };
    for file in translated {
        if !file.translated.is_empty() {
            println!(
                "Translated declarations for {} (dest {}):",
                file.path.display(),
                file.dest_lang
            );
            println!("{}", tables::translations_table(&file.translated));
        }
        if !file.manual.is_empty() {
            println!(
                "⚠ {} declaration(s) in {} still need manual translation:",
                file.manual.len(),
                file.path.display()
            );
            println!("{}", tables::declarations_table(file.manual.iter()));
        }
    }
}

#[derive(Serialize)]
struct JsonFileReport<'a> {
    path: String,
    diagnostics: &'a [ParseDiagnostic],
    missing: &'a [Declaration],
    format_specifier: Vec<&'a Declaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    translated: Option<&'a [locdiff_core::TranslatedDeclaration]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manual: Option<&'a [Declaration]>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    base: String,
    base_diagnostics: &'a [ParseDiagnostic],
    files: Vec<JsonFileReport<'a>>,
}

fn render_json(run: &CompareRun, translated: Option<&[TranslatedFile]>) -> Result<()> {
    let files = run
        .files
        .iter()
        .map(|file| {
            let translation = translated
                .and_then(|all| all.iter().find(|t| t.path == file.path));
            JsonFileReport {
                path: file.path.display().to_string(),
                diagnostics: &file.diagnostics,
                missing: &file.missing,
                format_specifier: format_specifier_subset(&file.missing),
                translated: translation.map(|t| t.translated.as_slice()),
                manual: translation.map(|t| t.manual.as_slice()),
            }
        })
        .collect();

    let report = JsonReport {
        base: run.base_path.display().to_string(),
        base_diagnostics: &run.base_diagnostics,
        files,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
