use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sectio_core::{Document, ExtractConfig, extract_tree, group_children, sanitize, sort_groups, walk};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Extract the main text of an HTML document
#[derive(Parser, Debug)]
#[command(name = "sectio")]
#[command(version)]
#[command(about = "Extract the main text of HTML documents", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Tag kind to strip before analysis (repeatable, replaces the defaults)
    #[arg(long = "exclude", value_name = "TAG")]
    exclude: Vec<String>,

    /// Tag kind that forms sections (repeatable, replaces the default "p")
    #[arg(long = "paragraph-tag", value_name = "TAG")]
    paragraph_tags: Vec<String>,

    /// Extra tag kind recovered into sections after selection (repeatable)
    #[arg(long = "recover-tag", value_name = "TAG")]
    recover_tags: Vec<String>,

    /// Title separator (repeatable, replaces the defaults)
    #[arg(long = "separator", value_name = "SEP")]
    separators: Vec<String>,

    /// Base URL for resolving image sources
    #[arg(long, value_name = "URL")]
    base_url: Option<Url>,

    /// Ranked sections to summarize, 0 for all
    #[arg(long, default_value = "5", value_name = "NUM")]
    sections: usize,

    /// Skip recovery of missed elements into sections
    #[arg(long)]
    no_reconcile: bool,

    /// Print sibling element groups, largest first
    #[arg(long)]
    groups: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn extract_config(&self) -> ExtractConfig {
        let mut builder = ExtractConfig::builder()
            .reconcile(!self.no_reconcile)
            .max_debug_sections(self.sections);

        if !self.exclude.is_empty() {
            builder = builder.excluded_tags(self.exclude.iter().cloned());
        }
        if !self.paragraph_tags.is_empty() {
            builder = builder.paragraph_tags(self.paragraph_tags.iter().cloned());
        }
        if !self.recover_tags.is_empty() {
            builder = builder.recover_tags(self.recover_tags.iter().cloned());
        }
        if !self.separators.is_empty() {
            builder = builder.title_separators(self.separators.iter().cloned());
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.clone());
        }

        builder.build()
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "sectio_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: &str) -> anyhow::Result<String> {
    let html = if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))?
    };

    debug!(bytes = html.len(), input, "read input");
    Ok(html)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let started = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        echo::print_banner();
        let source = if args.input == "-" { "stdin".to_string() } else { format!("file {}", args.input) };
        echo::print_step(1, 4, &format!("Reading from {}", source));
    }

    let step = Instant::now();
    let html = read_input(&args.input)?;
    timings.push(("Read", step.elapsed()));

    if args.verbose {
        echo::print_detail("Size", &echo::format_size(html.len()));
        echo::print_step(2, 4, "Parsing and sanitizing HTML document");
    }

    let step = Instant::now();
    let config = args.extract_config();
    let mut doc = Document::parse(&html).context("Failed to parse HTML")?;
    let removed = sanitize(&mut doc, &config.excluded_tags);
    timings.push(("Parse", step.elapsed()));

    if args.verbose {
        echo::print_detail("Removed subtrees", &removed.to_string());
        echo::print_step(3, 4, "Selecting main section");
    }

    let root = doc.root();

    if args.groups {
        let records = walk(&root).context("Failed to walk document tree")?;
        for group in sort_groups(group_children(&records)) {
            eprintln!(
                "{} {}",
                format!("{:>4}", group.len()).bright_white(),
                format!("[{}]", group.tags.join(", ")).dimmed()
            );
        }
    }

    let step = Instant::now();
    let extracted = extract_tree(&root, &config).context("Failed to extract content")?;
    timings.push(("Extract", step.elapsed()));

    if args.verbose {
        match &extracted.title {
            Some(title) => echo::print_detail("Title", title),
            None => echo::print_warning("Document has no title element"),
        }
        echo::print_extraction_details(&extracted);
        echo::print_step(4, 4, "Writing output");
        echo::print_detail("Format", &format!("{:?}", args.format));
    }

    let output = match args.format {
        OutputFormat::Text => extracted.to_text(),
        OutputFormat::Json => extracted
            .to_format(sectio_core::OutputFormat::JsonPretty)
            .context("Failed to serialize output")?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    if args.verbose {
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}
