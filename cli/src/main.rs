//! upsheet CLI - legacy Excel to XLSX conversion tool
//!
//! Converts a single workbook, a directory of workbooks, or a zip archive
//! of workbooks to the .xlsx format.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use upsheet::{
    BatchOptions, BatchSummary, Conversion, ConvertOptions, Error, InputKind, Reporter,
};

/// Convert .xls workbooks to .xlsx
#[derive(Parser)]
#[command(
    name = "upsheet",
    author = "iyulab",
    version,
    about = "Convert xls to xlsx",
    long_about = "upsheet - Convert legacy Excel workbooks to the .xlsx format.\n\n\
                  Accepts a single .xls/.xlsx/extension-less file, a directory, or a\n\
                  zip archive (with --include-zip). All cell values are written as text."
)]
struct Cli {
    /// Path to the input file or directory
    input_file: PathBuf,

    /// Rename the output file (single-file mode only)
    #[arg(long)]
    rename: Option<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Extract and scan zip archives
    #[arg(long = "include-zip")]
    include_zip: bool,

    /// Output directory for converted files (created if missing)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Prints batch progress to the terminal.
struct ConsoleReporter {
    spinner: ProgressBar,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            spinner: create_spinner("Scanning..."),
        }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Reporter for ConsoleReporter {
    fn processing(&mut self, input: &Path) {
        self.spinner
            .set_message(format!("Processing: {}", input.display()));
    }

    fn converted(&mut self, conversion: &Conversion) {
        self.spinner.println(format_conversion(conversion));
    }

    fn failed(&mut self, path: &Path, error: &Error) {
        self.spinner.println(format_failure(path, error));
    }

    fn extracting(&mut self, archive: &Path, scratch: &Path) {
        self.spinner.set_message(format!(
            "Extracting {} to {}",
            archive.display(),
            scratch.display()
        ));
    }

    fn warning(&mut self, message: &str) {
        self.spinner
            .println(format!("{} {}", "!".yellow().bold(), message));
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let kind = upsheet::resolve_input(&cli.input_file, cli.include_zip)?;

    if kind == InputKind::Spreadsheet {
        let options = ConvertOptions {
            rename: cli.rename,
            output_dir: cli.output,
        };
        let pb = create_spinner(&format!("Processing: {}", cli.input_file.display()));
        let result = upsheet::convert(&cli.input_file, &options);
        pb.finish_and_clear();

        return match result {
            Ok(conversion) => {
                println!("{}", format_conversion(&conversion));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", format_failure(&cli.input_file, &e));
                Ok(ExitCode::FAILURE)
            }
        };
    }

    if cli.rename.is_some() {
        println!(
            "{} --rename is ignored when converting a directory or archive",
            "!".yellow().bold()
        );
    }

    let options = BatchOptions {
        output_dir: cli.output,
        recursive: cli.recursive,
        include_zip: cli.include_zip,
    };

    let mut reporter = ConsoleReporter::new();
    let summary = match kind {
        InputKind::Directory => upsheet::walk(&cli.input_file, &options, &mut reporter),
        _ => upsheet::extract_and_process(&cli.input_file, &options, &mut reporter),
    };
    reporter.finish();

    print_summary(&summary);

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn format_conversion(conversion: &Conversion) -> String {
    format!(
        "{} Converted {} to {} (sheets: {})",
        "✓".green().bold(),
        conversion.input.display(),
        conversion.output.display(),
        conversion.sheets
    )
}

fn format_failure(path: &Path, error: &Error) -> String {
    format!("{} Failed {}: {}", "✗".red().bold(), path.display(), error)
}

fn print_summary(summary: &BatchSummary) {
    for archive in &summary.skipped_archives {
        println!(
            "{} Skipped zip archive {} (use --include-zip to process it)",
            "!".yellow().bold(),
            archive.display()
        );
    }

    println!("{}", "─".repeat(40));
    println!(
        "{}: {}   {}: {}",
        "Converted".bold(),
        summary.converted.to_string().green(),
        "Failed".bold(),
        if summary.failed > 0 {
            summary.failed.to_string().red()
        } else {
            summary.failed.to_string().normal()
        }
    );
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
