/*!
 * Command-line interface for codebase-exporter
 */

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use codebase_exporter::clipboard::SystemClipboard;
use codebase_exporter::config::{Args, Config};
use codebase_exporter::error::{ExportError, Result};
use codebase_exporter::export::{ClipboardSink, ExportSink, FileSink};
use codebase_exporter::exporter::{ExportOutcome, Exporter};
use codebase_exporter::project::BUILTIN_CATALOG;
use codebase_exporter::recent::RecentDirectoryStore;
use codebase_exporter::report::{ReportFormat, Reporter, SelectionReport};
use codebase_exporter::scanner::Scanner;

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);

    if let Err(e) = run(args) {
        log::debug!("Exiting after error: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
    log::trace!("Logger initialized with level: {:?}", level);
}

fn run(args: Args) -> Result<()> {
    let recent = RecentDirectoryStore::open_default();

    let target_dir = match args.directory_path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => recent.as_ref().and_then(RecentDirectoryStore::read).ok_or_else(|| {
            ExportError::Config(
                "No project directory given and no recent directory recorded".to_string(),
            )
        })?,
    };

    let config = Config::from_args(args, target_dir);
    config.validate()?;
    let project_type = config.resolve_project_type(&BUILTIN_CATALOG)?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {pos} files {wide_msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_prefix("Scanning");
    progress.enable_steady_tick(Duration::from_millis(100));

    let start_time = Instant::now();
    let scanner = Scanner::new(config.max_files, Arc::new(progress.clone()));
    let store = if config.remember { recent } else { None };
    let mut exporter =
        Exporter::new(BUILTIN_CATALOG.clone(), scanner, store).with_project_type(project_type);
    exporter.open_folder(&config.target_dir);
    progress.finish_and_clear();

    for name in &config.exclude {
        let touched = exporter.set_included_by_name(name, false);
        if touched == 0 {
            log::warn!("--exclude {} matched no file", name);
        }
    }

    let type_name = exporter.active_type().map(|t| t.name.clone());
    let mut report = SelectionReport::from_session(exporter.session(), type_name.as_deref());
    let reporter = Reporter::new(ReportFormat::ConsoleTable);

    if config.list_only || exporter.session().is_empty() {
        report.duration = start_time.elapsed();
        report.status = exporter.status().to_string();
        reporter.print_report(&report);
        return Ok(());
    }

    let sink: Box<dyn ExportSink> = if config.clip {
        Box::new(ClipboardSink::new(SystemClipboard::detect()?))
    } else {
        Box::new(FileSink::new(&config.output_file))
    };

    let outcome = exporter.export(sink.as_ref())?;
    if outcome == ExportOutcome::NothingSelected {
        log::warn!("{}", exporter.status());
    }

    report.destination = Some(if config.clip {
        "clipboard".to_string()
    } else {
        config.output_file.display().to_string()
    });
    report.duration = start_time.elapsed();
    report.status = exporter.status().to_string();
    reporter.print_report(&report);

    Ok(())
}
