//! specdoc CLI - API reference documents from OpenAPI specifications

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use specdoc::convert::BatchSummary;
use specdoc::{
    build_document, convert_batch, load_file_with_options, ConvertOptions, Converter,
    DocumentStats, JsonFormat, Language, LoadOptions, RenderOptions, RenderSettings, TextDirection,
};

#[derive(Parser)]
#[command(name = "specdoc")]
#[command(version)]
#[command(about = "Turn OpenAPI specifications into API reference documents", long_about = None)]
struct Cli {
    /// Input specification (JSON or YAML)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    doc: DocArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings shared by every command that builds a document.
#[derive(Args, Clone, Default)]
struct DocArgs {
    /// Settings file (JSON or YAML) applied before the flags below
    #[arg(long, global = true, value_name = "FILE", env = "SPECDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Document title
    #[arg(long, global = true, env = "SPECDOC_TITLE")]
    title: Option<String>,

    /// Layout direction (rtl, ltr, auto)
    #[arg(long, global = true, env = "SPECDOC_DIRECTION")]
    direction: Option<TextDirection>,

    /// Label language (english, persian)
    #[arg(long, global = true, env = "SPECDOC_LANGUAGE")]
    language: Option<Language>,

    /// Introduction text file
    #[arg(long, global = true, value_name = "FILE")]
    intro: Option<PathBuf>,

    /// Changelog file (JSON array of entries, or plain text)
    #[arg(long, global = true, value_name = "FILE")]
    changelog: Option<PathBuf>,

    /// Release date shown in the information table (defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    release_date: Option<NaiveDate>,

    /// Mark every operation as requiring authentication
    #[arg(long, global = true)]
    auth_required: bool,

    /// Authentication header name
    #[arg(long, global = true, env = "SPECDOC_AUTH_HEADER")]
    auth_header: Option<String>,

    /// Authentication header value
    #[arg(long, global = true, env = "SPECDOC_AUTH_VALUE")]
    auth_value: Option<String>,

    /// Base URL written into curl invocations
    #[arg(long, global = true, env = "SPECDOC_BASE_URL")]
    base_url: Option<String>,

    /// Omit the table of contents
    #[arg(long, global = true)]
    no_toc: bool,

    /// Omit page numbers
    #[arg(long, global = true)]
    no_page_numbers: bool,

    /// Accept specifications without an `openapi` field
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a specification to all formats (Markdown, text, JSON)
    Convert {
        /// Input specification
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert a specification to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input specification
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Number headings (1., 1.1., 1.1.1.)
        #[arg(short, long)]
        numbered: bool,

        /// Keep the table-of-contents placeholder instead of listing headings
        #[arg(long)]
        toc_placeholder: bool,
    },

    /// Convert a specification to plain text
    Text {
        /// Input specification
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a specification to the JSON document tree
    Json {
        /// Input specification
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show specification and document information
    Info {
        /// Input specification
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert many specifications in parallel
    Batch {
        /// Input specifications
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "specdoc_output")]
        output: PathBuf,

        /// Output format (markdown, json, text)
        #[arg(short, long, default_value = "markdown", env = "SPECDOC_FORMAT")]
        format: String,
    },

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let doc = cli.doc;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), &doc),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            numbered,
            toc_placeholder,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            &doc,
            RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_numbering(numbered)
                .with_toc(!toc_placeholder),
        ),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), &doc),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), &doc, compact),
        Some(Commands::Info { input, json }) => cmd_info(&input, &doc, json),
        Some(Commands::Batch {
            inputs,
            output,
            format,
        }) => cmd_batch(&inputs, &output, &format, &doc),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &doc)
            } else {
                println!("{}", "Usage: specdoc <FILE> [OUTPUT]".yellow());
                println!("       specdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl DocArgs {
    /// Defaults, then the settings file, then flags.
    fn settings(&self) -> Result<RenderSettings, Box<dyn std::error::Error>> {
        let mut settings = match self.config {
            Some(ref path) => RenderSettings::from_file(path)?,
            None => RenderSettings::default(),
        };

        if let Some(ref title) = self.title {
            settings = settings.with_title(title.clone());
        }
        if let Some(direction) = self.direction {
            settings = settings.with_direction(direction);
        }
        if let Some(language) = self.language {
            settings = settings.with_language(language);
        }
        if let Some(ref path) = self.intro {
            settings = settings.with_intro(fs::read_to_string(path)?);
        }
        if let Some(ref path) = self.changelog {
            settings = settings.with_changelog(fs::read_to_string(path)?);
        }
        if let Some(date) = self.release_date {
            settings = settings.with_release_date(date);
        } else if settings.release_date.is_none() {
            settings = settings.with_release_date(Local::now().date_naive());
        }
        if self.auth_required || self.auth_header.is_some() || self.auth_value.is_some() {
            let header = self
                .auth_header
                .clone()
                .unwrap_or_else(|| settings.auth_header_name.clone());
            let value = self
                .auth_value
                .clone()
                .unwrap_or_else(|| settings.auth_header_value.clone());
            let required = self.auth_required || settings.auth_required;
            settings = settings.with_auth(required, header, value);
        }
        if let Some(ref base_url) = self.base_url {
            settings = settings.with_base_url_placeholder(base_url.clone());
        }
        if self.no_toc {
            settings = settings.with_table_of_contents(false);
        }
        if self.no_page_numbers {
            settings = settings.with_page_numbers(false);
        }

        Ok(settings)
    }

    fn load_options(&self) -> LoadOptions {
        if self.lenient {
            LoadOptions::new().lenient()
        } else {
            LoadOptions::new()
        }
    }

    fn convert_options(&self) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
        Ok(ConvertOptions::new()
            .with_load_options(self.load_options())
            .with_settings(self.settings()?))
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
        .unwrap()
        .progress_chars("#>-")
}

fn cmd_convert(input: &Path, output: Option<&Path>, args: &DocArgs) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(progress_style());

    pb.set_message("Loading specification...");
    let spec = load_file_with_options(input, args.load_options())?;
    pb.inc(1);

    pb.set_message("Building document...");
    let doc = build_document(&spec, &args.settings()?);
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let render_options = RenderOptions::new().with_frontmatter(true);
    let markdown = specdoc::render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("api.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text and JSON...");
    let text = specdoc::render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("api.txt"), &text)?;
    let json = specdoc::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("document.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} api.md", "├─".dimmed());
    println!("  {} api.txt", "├─".dimmed());
    println!("  {} document.json", "└─".dimmed());

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    args: &DocArgs,
    render_options: RenderOptions,
) -> CliResult {
    let spec = load_file_with_options(input, args.load_options())?;
    let doc = build_document(&spec, &args.settings()?);
    let markdown = specdoc::render::to_markdown(&doc, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(input: &Path, output: Option<&Path>, args: &DocArgs) -> CliResult {
    let spec = load_file_with_options(input, args.load_options())?;
    let doc = build_document(&spec, &args.settings()?);
    let text = specdoc::render::to_text(&doc, &RenderOptions::new())?;
    write_or_print(output, &text)
}

fn cmd_json(input: &Path, output: Option<&Path>, args: &DocArgs, compact: bool) -> CliResult {
    let spec = load_file_with_options(input, args.load_options())?;
    let doc = build_document(&spec, &args.settings()?);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = specdoc::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, args: &DocArgs, as_json: bool) -> CliResult {
    // Lenient so documents without a version field still report
    let spec = load_file_with_options(input, args.load_options().lenient())?;
    let doc = build_document(&spec, &args.settings()?);
    let stats = DocumentStats::from_document(&doc);

    if as_json {
        let report = serde_json::json!({
            "metadata": doc.metadata,
            "paths": spec.paths.len(),
            "schemas": spec.components.schemas.len(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Specification Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: OpenAPI {}",
        "Format".bold(),
        spec.openapi.as_deref().unwrap_or("(undeclared)")
    );
    if let Some(ref title) = spec.info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref version) = spec.info.version {
        println!("{}: {}", "Version".bold(), version);
    }
    if let Some(url) = spec.first_server_url() {
        println!("{}: {}", "Server".bold(), url);
    }
    println!("{}: {}", "Paths".bold(), spec.paths.len());
    println!("{}: {}", "Operations".bold(), spec.operation_count());
    println!("{}: {}", "Schemas".bold(), spec.components.schemas.len());

    println!();
    println!("{}", "Document Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!(
        "{}: {}",
        "Direction".bold(),
        if doc.metadata.right_to_left { "RTL" } else { "LTR" }
    );
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Page breaks".bold(), stats.page_break_count);

    Ok(())
}

fn cmd_batch(inputs: &[PathBuf], output: &Path, format: &str, args: &DocArgs) -> CliResult {
    let converter = Converter::new();
    // Fail on an unknown format before any work starts
    converter.registry().lookup(format)?;
    let options = args.convert_options()?.with_format(format);

    fs::create_dir_all(output)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Converting {} specifications...", inputs.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let items = convert_batch(&converter, inputs, &options);
    spinner.finish_and_clear();

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(progress_style());
    for item in &items {
        let name = item.input.display().to_string();
        pb.set_message(name.clone());
        match item.result {
            Ok(ref result) => {
                let stem = item.input.file_stem().unwrap_or_default().to_string_lossy();
                let path = output.join(format!("{}.{}", stem, result.extension));
                fs::write(&path, &result.content)?;
                pb.println(format!("{} {}", "✓".green(), path.display()));
            }
            Err(ref e) => pb.println(format!("{} {}: {}", "✗".red(), name, e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let summary = BatchSummary::of(&items);
    println!(
        "\n{} {} converted, {} failed",
        "Done!".green().bold(),
        summary.succeeded,
        summary.failed
    );

    if summary.failed > 0 {
        return Err(format!("{} of {} conversions failed", summary.failed, items.len()).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "specdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("API reference documents from OpenAPI specifications");
    println!();
    println!("License: MIT");
}
