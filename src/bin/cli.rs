use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use logsift::config::Config;
use logsift::error::SiftError;
use logsift::parser::Encoding;
use logsift::report::ReportFormat;
use logsift::rules::{RuleSet, Severity};
use logsift::AnalyzeOptions;

#[derive(Parser)]
#[command(
    name = "logsift",
    about = "Offline log analysis with regex detection rules",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze log files or directories for security findings
    Analyze {
        /// Files or directories to analyze
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Rule definition file (JSON)
        #[arg(long, short = 'r')]
        rules: Option<PathBuf>,

        /// Output format (json, csv, markdown, html, text)
        #[arg(long, short = 'f', default_value = "text")]
        format: String,

        /// Per-file line cap, 0 = unlimited
        #[arg(long)]
        max_lines: Option<usize>,

        /// Source text encoding (utf-8, latin-1)
        #[arg(long)]
        encoding: Option<String>,

        /// Minimum finding severity for exit code 1
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the active detection rules
    ListRules {
        /// Rule definition file (JSON); defaults to the built-in rules
        #[arg(long, short = 'r')]
        rules: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .logsift.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            paths,
            config,
            rules,
            format,
            max_lines,
            encoding,
            fail_on,
            output,
        } => cmd_analyze(paths, config, rules, format, max_lines, encoding, fail_on, output),
        Commands::ListRules { rules, format } => cmd_list_rules(rules, format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_analyze(
    paths: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    rules: Option<PathBuf>,
    format_str: String,
    max_lines: Option<usize>,
    encoding_str: Option<String>,
    fail_on_str: Option<String>,
    output_path: Option<PathBuf>,
) -> Result<i32, SiftError> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(".logsift.toml"));
    let config = Config::load(&config_path)?;

    let format = ReportFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using text", format_str);
        ReportFormat::Text
    });

    let encoding_name = encoding_str.unwrap_or(config.analysis.encoding);
    let encoding = Encoding::from_str_lenient(&encoding_name).unwrap_or_else(|| {
        eprintln!("Warning: unknown encoding '{}', using utf-8", encoding_name);
        Encoding::Utf8
    });

    let fail_on = fail_on_str
        .and_then(|s| {
            let sev = Severity::from_str_lenient(&s);
            if sev.is_none() {
                eprintln!("Warning: unknown severity '{}', using config default", s);
            }
            sev
        })
        .unwrap_or(config.reporting.fail_on);

    let options = AnalyzeOptions {
        rules_path: rules.or(config.analysis.rules),
        encoding,
        max_lines: max_lines.unwrap_or(config.analysis.max_lines),
    };

    let report = logsift::analyze(&paths, &options)?;
    let rendered = logsift::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = below threshold, 1 = findings at/above threshold
    Ok(if report.exceeds(fail_on) { 1 } else { 0 })
}

fn cmd_list_rules(rules: Option<PathBuf>, format_str: String) -> Result<i32, SiftError> {
    let rule_set = match rules {
        Some(path) => RuleSet::load(&path),
        None => RuleSet::defaults(),
    };
    let metadata = rule_set.metadata();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&metadata)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<22} {:<10} DESCRIPTION", "ID", "SEVERITY");
            println!("{}", "-".repeat(80));
            for rule in &metadata {
                println!(
                    "{:<22} {:<10} {}",
                    rule.id,
                    rule.severity.to_string(),
                    rule.description
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, SiftError> {
    let path = PathBuf::from(".logsift.toml");

    if path.exists() && !force {
        eprintln!(".logsift.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .logsift.toml");

    Ok(0)
}
