//! docrank CLI - rank PDF sections for a persona and task

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docrank::config::{
    DEFAULT_BODY_LINES, DEFAULT_BOOST_DELTA, DEFAULT_PENALTY_DELTA, DEFAULT_QUERY, DEFAULT_TOP_K,
};
use docrank::{
    refine_text, sections_from_file, write_output, InputSpec, JsonFormat, OutputRecord, Pipeline,
    RankConfig,
};

#[derive(Parser)]
#[command(name = "docrank")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank PDF sections against a persona's information need", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    rank: RankArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, score and rank sections from the input record's documents
    Rank(RankArgs),

    /// Show the sections extracted from a single PDF
    Sections {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct RankArgs {
    /// Directory containing the PDFs listed in the input record
    #[arg(long, value_name = "DIR", env = "DOCRANK_PDF_DIR", default_value = "./pdfs")]
    pdf_dir: PathBuf,

    /// Input record (persona, job to be done, documents)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DOCRANK_INPUT",
        default_value = "challenge1b_input.json"
    )]
    input: PathBuf,

    /// Output record path
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "DOCRANK_OUTPUT",
        default_value = "challenge1b_output.json"
    )]
    output: PathBuf,

    /// Number of ranked sections to keep
    #[arg(short = 'k', long, env = "DOCRANK_TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Lines after a title collected into its body
    #[arg(long, env = "DOCRANK_BODY_LINES", default_value_t = DEFAULT_BODY_LINES)]
    body_lines: usize,

    /// Penalty keyword matched in section bodies (repeatable; replaces defaults)
    #[arg(long = "penalty-keyword", value_name = "WORD", env = "DOCRANK_PENALTY_KEYWORDS", value_delimiter = ',')]
    penalty_keywords: Vec<String>,

    /// Boost keyword matched in document filenames (repeatable; replaces defaults)
    #[arg(long = "boost-keyword", value_name = "WORD", env = "DOCRANK_BOOST_KEYWORDS", value_delimiter = ',')]
    boost_keywords: Vec<String>,

    /// Score change when a penalty keyword matches
    #[arg(long, env = "DOCRANK_PENALTY_DELTA", default_value_t = DEFAULT_PENALTY_DELTA, allow_hyphen_values = true)]
    penalty_delta: f64,

    /// Score change when a boost keyword matches
    #[arg(long, env = "DOCRANK_BOOST_DELTA", default_value_t = DEFAULT_BOOST_DELTA, allow_hyphen_values = true)]
    boost_delta: f64,

    /// Relevance query every section is scored against
    #[arg(long, env = "DOCRANK_QUERY", default_value = DEFAULT_QUERY)]
    query: String,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

impl RankArgs {
    fn to_config(&self) -> RankConfig {
        let mut config = RankConfig::new()
            .with_pdf_dir(&self.pdf_dir)
            .with_input_path(&self.input)
            .with_output_path(&self.output)
            .with_top_k(self.top_k)
            .with_body_lines(self.body_lines)
            .with_penalty_delta(self.penalty_delta)
            .with_boost_delta(self.boost_delta)
            .with_query(&self.query);

        if !self.penalty_keywords.is_empty() {
            config = config.with_penalty_keywords(&self.penalty_keywords);
        }
        if !self.boost_keywords.is_empty() {
            config = config.with_boost_keywords(&self.boost_keywords);
        }
        config
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Rank(args)) => cmd_rank(&args),
        Some(Commands::Sections { input, json }) => cmd_sections(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_rank(&cli.rank),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_rank(args: &RankArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config();
    let input = InputSpec::load(&config.input_path)?;
    let pipeline = Pipeline::from_config(config)?;

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(input.documents.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let record = pipeline.run_with_progress(&input, chrono::Local::now(), |id, sections| {
        pb.set_message(format!("{} ({} sections)", id, sections));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    write_output(&record, &pipeline.config().output_path, JsonFormat::Pretty)?;

    print_summary(&record);
    println!(
        "\n{} {}",
        "Saved to".green(),
        pipeline.config().output_path.display()
    );

    Ok(())
}

fn print_summary(record: &OutputRecord) {
    println!("{}", "Top Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (section, analysis) in record
        .extracted_sections
        .iter()
        .zip(&record.subsection_analysis)
    {
        println!(
            "{:>2}. {} {}",
            section.importance_rank,
            section.section_title.bold(),
            format!("({} p.{})", section.document, section.page_number).dimmed()
        );
        if !analysis.refined_text.is_empty() {
            println!("    {}", preview(&analysis.refined_text, 80));
        }
    }
}

fn cmd_sections(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let sections = sections_from_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Sections".bold(), sections.len());
    println!("{}", "─".repeat(40).dimmed());

    for section in &sections {
        println!(
            "{} {}",
            format!("p.{:<3}", section.page_number).dimmed(),
            section.title.bold()
        );
        let body = refine_text(&section.body);
        if !body.is_empty() {
            println!("       {}", preview(&body, 72));
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF section ranking tool");
    println!();
    println!("License: MIT");
}

/// First `max` characters of `text`, with an ellipsis when cut.
fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
