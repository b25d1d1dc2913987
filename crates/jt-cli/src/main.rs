#![forbid(unsafe_code)]

//! JiraTime CLI - render and validate Jira issue descriptions in the terminal.
//!
//! # Commands
//!
//! - `render`: Render a document to fixed-width terminal rows
//! - `parse`: Decode a document and print its tree as JSON
//! - `validate`: Report structural warnings for a document

mod config;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jt_core::{Document, DocumentWarning, parse_document, validate};
use jt_render_term::{GlyphMode, RenderConfig, render_with_config};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{FileConfig, host_of};

/// JiraTime CLI - render and validate Jira issue descriptions.
#[derive(Debug, Parser)]
#[command(
    name = "jt",
    version,
    about = "JiraTime CLI - render and validate Jira issue descriptions",
    long_about = "Renders Atlassian Document Format JSON (issue descriptions, comments)\n\
        into fixed-width, ANSI-styled terminal rows."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file path (default: $XDG_CONFIG_HOME/jiratime/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a document to terminal rows.
    Render(RenderArgs),

    /// Decode a document and print its tree as JSON.
    Parse {
        /// Input file path or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a document and report warnings.
    Validate {
        /// Input file path or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Output as JSON (structured warnings)
        #[arg(long)]
        json: bool,

        /// Exit with non-zero status on warnings (not just errors)
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Input file path or "-" for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Line width in columns (default 119)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Minimum number of rows; shorter output is padded with blank rows (default 33)
    #[arg(short = 'H', long)]
    min_lines: Option<usize>,

    /// Size width and minimum rows to the current terminal
    #[arg(long, conflicts_with_all = ["width", "min_lines"])]
    fit: bool,

    /// Host of your own Jira site; smart links to it show the issue key
    #[arg(long)]
    own_host: Option<String>,

    /// Jira base URL; its host is used when --own-host is not given
    #[arg(long, env = "JIRA_BASE_URL", hide_env_values = true)]
    base_url: Option<String>,

    /// Use ASCII bullets and icons
    #[arg(long)]
    ascii: bool,

    /// Disable ANSI styling and hyperlinks
    #[arg(long)]
    plain: bool,

    /// First row of the viewport
    #[arg(long, default_value_t = 0)]
    top_offset: usize,

    /// Number of rows in the viewport (default: all rows)
    #[arg(long)]
    rows: Option<usize>,

    /// Print render metadata (timing, line counts) as JSON to stderr
    #[arg(long)]
    json: bool,

    /// Output file path. If omitted, writes to stdout.
    #[arg(short, long)]
    output: Option<String>,
}

/// Metadata printed by `render --json`.
#[derive(Debug, Serialize)]
struct RenderMetadata {
    width: usize,
    lines: usize,
    content_lines: usize,
    overflow_lines: usize,
    viewport_offset: usize,
    viewport_rows: usize,
    blocks: usize,
    inline_nodes: usize,
    max_depth: usize,
    fallback: bool,
    warnings: Vec<String>,
    parse_time_ms: f64,
    render_time_ms: f64,
    total_time_ms: f64,
}

/// Result of validating a document.
#[derive(Debug, Serialize)]
struct ValidateResult {
    valid: bool,
    blocks: usize,
    inline_nodes: usize,
    max_depth: usize,
    warnings: Vec<DocumentWarning>,
    errors: Vec<ValidationError>,
}

#[derive(Debug, Serialize)]
struct ValidationError {
    code: String,
    message: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Render(args) => {
            let file_config = FileConfig::load(cli.config.as_deref())?;
            cmd_render(&args, &file_config)
        }
        Command::Parse { input, pretty } => cmd_parse(&input, pretty),
        Command::Validate {
            input,
            json,
            strict,
        } => cmd_validate(&input, json, strict),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).context(format!("Failed to read file: {input}"))
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).context(format!("Failed to write to: {path}"))?;
            info!("Wrote output to: {path}");
        }
        None => {
            io::stdout()
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

// =============================================================================
// Command: render
// =============================================================================

fn cmd_render(args: &RenderArgs, file_config: &FileConfig) -> Result<()> {
    let total_start = Instant::now();

    let parse_start = Instant::now();
    let source = load_input(&args.input)?;
    let (document, fallback) = decode_or_fallback(&source);
    let parse_time = parse_start.elapsed();

    let config = resolve_render_config(args, file_config)?;
    debug!(?config, "resolved render config");

    let render_start = Instant::now();
    let result = render_with_config(&document.content, &config);
    let render_time = render_start.elapsed();

    let (offset, rows) = viewport(&result.lines, args.top_offset, args.rows);
    let mut rendered = rows.join("\n");
    rendered.push('\n');

    let total_time = total_start.elapsed();

    if args.json {
        let stats = document.stats();
        let metadata = RenderMetadata {
            width: result.width,
            lines: result.lines.len(),
            content_lines: result.content_lines,
            overflow_lines: result.overflow_lines,
            viewport_offset: offset,
            viewport_rows: rows.len(),
            blocks: stats.blocks,
            inline_nodes: stats.inline_nodes,
            max_depth: stats.max_depth,
            fallback,
            warnings: validate(&document)
                .iter()
                .map(|warning| warning.code.as_str().to_string())
                .collect(),
            parse_time_ms: parse_time.as_secs_f64() * 1000.0,
            render_time_ms: render_time.as_secs_f64() * 1000.0,
            total_time_ms: total_time.as_secs_f64() * 1000.0,
        };
        let json_str = serde_json::to_string_pretty(&metadata)?;
        eprintln!("{json_str}");
    }

    write_output(args.output.as_deref(), &rendered)?;

    info!(
        "Rendered {} rows ({} content) in {:.2}ms",
        result.lines.len(),
        result.content_lines,
        total_time.as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Decode `source`, substituting the "No description." document when it is
/// not a document or has no content. The flag reports the substitution.
fn decode_or_fallback(source: &str) -> (Document, bool) {
    match parse_document(source) {
        Ok(document) if !document.is_empty() => (document, false),
        Ok(_) => {
            warn!("document is empty, showing fallback");
            (Document::fallback(), true)
        }
        Err(err) => {
            warn!(code = err.code().as_str(), "{err}; showing fallback");
            (Document::fallback(), true)
        }
    }
}

/// Defaults, then the config file, then flags and environment.
fn resolve_render_config(args: &RenderArgs, file_config: &FileConfig) -> Result<RenderConfig> {
    let mut config = RenderConfig::default();
    file_config.apply(&mut config);

    if args.fit {
        let (cols, rows) =
            crossterm::terminal::size().context("Failed to query terminal size for --fit")?;
        config.line_width = usize::from(cols);
        config.minimum_lines = usize::from(rows);
    }
    if let Some(width) = args.width {
        config.line_width = width;
    }
    if let Some(min_lines) = args.min_lines {
        config.minimum_lines = min_lines;
    }
    if args.ascii {
        config.glyph_mode = GlyphMode::Ascii;
    }
    if args.plain {
        config.color = false;
    }

    let own_host = match (&args.own_host, &args.base_url, &file_config.jira.base_url) {
        (Some(host), _, _) => host.clone(),
        (None, Some(base_url), _) | (None, None, Some(base_url)) => {
            host_of(base_url).unwrap_or_else(|| {
                warn!("Jira base URL '{base_url}' has no host, ignoring");
                String::new()
            })
        }
        (None, None, None) => String::new(),
    };
    Ok(config.with_own_host(&own_host))
}

/// Rows `[offset, offset + rows)`, the offset clamped so a full viewport is
/// shown whenever there are enough rows.
fn viewport(lines: &[String], top_offset: usize, rows: Option<usize>) -> (usize, &[String]) {
    let rows = rows.unwrap_or(lines.len());
    let offset = top_offset.min(lines.len().saturating_sub(rows));
    let end = offset.saturating_add(rows).min(lines.len());
    (offset, &lines[offset..end])
}

// =============================================================================
// Command: parse
// =============================================================================

fn cmd_parse(input: &str, pretty: bool) -> Result<()> {
    let source = load_input(input)?;
    let document = parse_document(&source).context("Failed to decode document")?;

    let output = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{output}");

    Ok(())
}

// =============================================================================
// Command: validate
// =============================================================================

fn cmd_validate(input: &str, json_output: bool, strict: bool) -> Result<()> {
    let source = load_input(input)?;

    let (document, errors) = match parse_document(&source) {
        Ok(document) => (document, Vec::new()),
        Err(err) => (
            Document::default(),
            vec![ValidationError {
                code: err.code().as_str().to_string(),
                message: err.to_string(),
            }],
        ),
    };
    let warnings = validate(&document);
    let stats = document.stats();

    let valid = errors.is_empty() && (!strict || warnings.is_empty());
    let result = ValidateResult {
        valid,
        blocks: stats.blocks,
        inline_nodes: stats.inline_nodes,
        max_depth: stats.max_depth,
        warnings,
        errors,
    };

    if json_output {
        let output = serde_json::to_string_pretty(&result)?;
        println!("{output}");
    } else {
        print_validation(&result);
    }

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn print_validation(result: &ValidateResult) {
    if result.valid {
        println!("✓ Valid document");
    } else {
        println!("✗ Invalid document");
    }
    println!("  Blocks:       {}", result.blocks);
    println!("  Inline nodes: {}", result.inline_nodes);
    println!("  Max depth:    {}", result.max_depth);

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for err in &result.errors {
            println!("  [{}] {}", err.code, err.message);
        }
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!(
                "  [{}] {} at {}",
                warning.code.as_str(),
                warning.message,
                warning.path
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: usize) -> Vec<String> {
        (0..count).map(|index| index.to_string()).collect()
    }

    fn render_args(input: &str) -> RenderArgs {
        RenderArgs {
            input: input.to_string(),
            width: None,
            min_lines: None,
            fit: false,
            own_host: None,
            base_url: None,
            ascii: false,
            plain: false,
            top_offset: 0,
            rows: None,
            json: false,
            output: None,
        }
    }

    #[test]
    fn viewport_clamps_offset_to_last_full_page() {
        let lines = rows(40);
        let (offset, page) = viewport(&lines, 12, Some(33));
        assert_eq!(offset, 7);
        assert_eq!(page.len(), 33);
        assert_eq!(page[0], "7");
    }

    #[test]
    fn viewport_without_rows_shows_the_rest() {
        let lines = rows(5);
        let (offset, page) = viewport(&lines, 3, None);
        assert_eq!(offset, 0);
        assert_eq!(page.len(), 5);

        let (offset, page) = viewport(&lines, 0, Some(10));
        assert_eq!(offset, 0);
        assert_eq!(page.len(), 5);
    }

    #[test]
    fn invalid_or_empty_documents_fall_back() {
        let (document, fallback) = decode_or_fallback("not json");
        assert!(fallback);
        assert_eq!(document, Document::fallback());

        let (_, fallback) = decode_or_fallback(r#"{"type":"doc","content":[]}"#);
        assert!(fallback);

        let (_, fallback) = decode_or_fallback(r#"[{"type":"rule"}]"#);
        assert!(!fallback);
    }

    #[test]
    fn own_host_precedence() {
        let mut file = FileConfig::default();
        file.jira.base_url = Some("https://file.atlassian.net".to_string());

        let args = render_args("-");
        let config = resolve_render_config(&args, &file).expect("config");
        assert_eq!(config.own_host.as_deref(), Some("file.atlassian.net"));

        let mut args = render_args("-");
        args.base_url = Some("https://env.atlassian.net/".to_string());
        let config = resolve_render_config(&args, &file).expect("config");
        assert_eq!(config.own_host.as_deref(), Some("env.atlassian.net"));

        args.own_host = Some("flag.atlassian.net".to_string());
        let config = resolve_render_config(&args, &file).expect("config");
        assert_eq!(config.own_host.as_deref(), Some("flag.atlassian.net"));
    }

    #[test]
    fn flags_override_file_settings() {
        let file = FileConfig::parse("[render]\nwidth = 60\nmin_lines = 5\n").expect("parse");
        let mut args = render_args("-");
        args.min_lines = Some(0);
        args.plain = true;
        args.ascii = true;
        let config = resolve_render_config(&args, &file).expect("config");
        assert_eq!(config.line_width, 60);
        assert_eq!(config.minimum_lines, 0);
        assert!(!config.color);
        assert_eq!(config.glyph_mode, GlyphMode::Ascii);
    }

    #[test]
    fn cli_parses_render_flags() {
        let cli = Cli::try_parse_from([
            "jt", "render", "doc.json", "--width", "80", "--rows", "10", "--plain",
        ])
        .expect("valid flags");
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.input, "doc.json");
        assert_eq!(args.width, Some(80));
        assert_eq!(args.rows, Some(10));
        assert!(args.plain);
    }

    #[test]
    fn fit_conflicts_with_explicit_geometry() {
        assert!(Cli::try_parse_from(["jt", "render", "--fit", "--width", "80"]).is_err());
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        assert!(load_input(&missing.to_string_lossy()).is_err());
    }

    #[test]
    fn writes_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let path_str = path.to_string_lossy().to_string();
        write_output(Some(&path_str), "rows\n").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "rows\n");
    }
}
