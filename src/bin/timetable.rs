use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use timetable_extract::{
    CodePattern, ExtractOptions, ExtractionReport, OutputFormat, SheetSelection,
    discover_courses, extract_timetable_file, read_grid,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "timetable",
    version,
    about = "Extract a per-course schedule from a spreadsheet timetable"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the course tokens found in the timetable.
    Courses(CoursesArgs),
    /// Extract one course's merged schedule.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct CoursesArgs {
    /// Input spreadsheet (xlsx, xls, xlsb, ods, csv or tsv).
    #[arg(short, long)]
    input: PathBuf,

    /// Worksheet name or 1-based index.
    #[arg(long)]
    sheet: Option<String>,

    /// Print the course list as a JSON array.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input spreadsheet (xlsx, xls, xlsb, ods, csv or tsv).
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path.
    #[arg(short, long)]
    output: PathBuf,

    /// Course token to extract, e.g. "BMCS Y2S2".
    #[arg(short, long)]
    course: String,

    /// Worksheet name or 1-based index.
    #[arg(long)]
    sheet: Option<String>,

    /// Output format: csv or json.
    #[arg(long, default_value = "csv")]
    format: String,

    /// CSV delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Omit the Day,Time,Course & Lecturer,Venue header row.
    #[arg(long)]
    no_header: bool,

    /// Course code prefix: three-letter or any-letters.
    #[arg(long, default_value = "three-letter")]
    code_pattern: String,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_sheet(value: Option<&str>) -> Result<SheetSelection> {
    value
        .map(SheetSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid sheet selection: {error}"))
        .context("failed to parse --sheet")
        .map(Option::unwrap_or_default)
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    let format = OutputFormat::from_str(&args.format)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --format")?;
    let code_pattern = CodePattern::from_str(&args.code_pattern)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --code-pattern")?;

    Ok(ExtractOptions {
        sheet: parse_sheet(args.sheet.as_deref())?,
        delimiter: args.delimiter as u8,
        format,
        code_pattern,
        include_header: !args.no_header,
    })
}

fn log_report(report: &ExtractionReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} record(s) skipped or incomplete", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} record={:?} text={:?}: {}",
                warning.code, warning.row, warning.text, warning.message
            );
        }
    }
}

fn run_courses(args: &CoursesArgs) -> Result<usize> {
    let sheet = parse_sheet(args.sheet.as_deref())?;
    let grid = read_grid(&args.input, &sheet)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    let courses = discover_courses(&grid);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
    } else {
        for course in &courses {
            println!("{course}");
        }
    }
    Ok(courses.len())
}

fn run_extract(args: &ExtractArgs) -> Result<ExtractionReport> {
    let options = parse_options(args)?;
    extract_timetable_file(&args.input, &args.output, &args.course, &options).with_context(|| {
        format!(
            "failed to extract '{}' from '{}'",
            args.course,
            args.input.display()
        )
    })
}

fn exit_for_count(count: usize) -> ExitCode {
    if count > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("timetable_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Courses(args) => run_courses(args),
        Commands::Extract(args) => run_extract(args).map(|report| {
            log_report(&report, args.verbose);
            report.row_count
        }),
    };

    match result {
        Ok(count) => exit_for_count(count),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
