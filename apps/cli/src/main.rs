//! matstract - chemical formula and abstract text tooling
//!
//! Usage:
//!   matstract canonical "Li(Ni0.5Mn1.5)O4"
//!   matstract parse "CuSO4·5H2O"
//!   matstract classify TiO2 PV "Ag(III)"
//!   matstract tokens --counts counts.json < sentences.txt
//!   matstract filter "TiO2, ZnO -SiO2" --materials O2Ti OZn

mod config;
mod logging;

use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matstract_formula::{normalize, parse_tree_with, ParseOptions};
use matstract_text::{MaterialFilter, SentenceProcessor};
use serde_json::json;

use crate::config::Config;

#[derive(Parser, Debug)]
#[clap(name = "matstract")]
#[clap(about = "Parse, canonicalize and classify chemical formulas")]
#[clap(version)]
struct Args {
    /// Configuration file (defaults to ./matstract.toml when present)
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,

    /// Maximum parenthesis nesting depth (at most 1024)
    #[clap(long, global = true)]
    max_depth: Option<usize>,

    /// Denominator bound used when reducing fractional amounts
    #[clap(long, global = true)]
    max_denominator: Option<u32>,

    /// Log level for matstract targets (overridden by RUST_LOG)
    #[clap(long, global = true)]
    log_level: Option<String>,

    /// Write logs as JSON lines
    #[clap(long, global = true)]
    json_logs: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the flattened composition of a formula as JSON
    Parse {
        formula: String,
    },
    /// Print the canonical formula of each argument, one per line
    Canonical {
        #[clap(required = true)]
        formulas: Vec<String>,
    },
    /// Report whether each token looks like a simple formula
    Classify {
        #[clap(required = true)]
        tokens: Vec<String>,
    },
    /// Normalize whitespace-tokenized sentences read line by line
    Tokens {
        /// Input file (stdin when omitted)
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Write formula mention counts as JSON to this path
        #[clap(long)]
        counts: Option<PathBuf>,
    },
    /// Show how a search query splits into included and excluded materials
    Filter {
        query: String,

        /// Canonical materials of a document to test against the filter
        #[clap(long, num_args = 1..)]
        materials: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &args);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command {
        Command::Parse { formula } => run_parse(&config, &formula, &mut out)?,
        Command::Canonical { formulas } => run_canonical(&config, &formulas, &mut out)?,
        Command::Classify { tokens } => run_classify(&tokens, &mut out)?,
        Command::Tokens { input, counts } => {
            run_tokens(&config, input, counts, &mut out)?;
        }
        Command::Filter { query, materials } => {
            run_filter(&config, &query, &materials, &mut out)?;
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}

/// Command-line flags win over every configuration source
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(max_depth) = args.max_depth {
        config.parser.max_depth = max_depth;
    }
    if let Some(max_denominator) = args.max_denominator {
        config.normalize.max_denominator = max_denominator;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json = true;
    }
}

fn parse_options(config: &Config) -> ParseOptions {
    ParseOptions {
        max_depth: config.parser.max_depth,
    }
}

fn run_parse(config: &Config, formula: &str, out: &mut impl Write) -> Result<()> {
    let tree = parse_tree_with(formula, &parse_options(config))
        .with_context(|| format!("Failed to parse formula '{formula}'"))?;
    let composition = tree
        .try_flatten()
        .with_context(|| format!("Failed to flatten formula '{formula}'"))?;

    let report = json!({
        "formula": formula,
        "composition": composition.to_f64_map(),
        "hydrate": tree.is_hydrate(),
        "canonical": normalize(&composition, config.normalize.max_denominator).as_str(),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn run_canonical(config: &Config, formulas: &[String], out: &mut impl Write) -> Result<()> {
    let options = parse_options(config);
    for formula in formulas {
        let composition = matstract_formula::parse_with(formula, &options)
            .with_context(|| format!("Failed to parse formula '{formula}'"))?;
        writeln!(
            out,
            "{}",
            normalize(&composition, config.normalize.max_denominator)
        )?;
    }
    Ok(())
}

fn run_classify(tokens: &[String], out: &mut impl Write) -> Result<()> {
    for token in tokens {
        writeln!(
            out,
            "{token}\t{}",
            matstract_formula::is_simple_formula(token)
        )?;
    }
    Ok(())
}

fn run_filter(
    config: &Config,
    query: &str,
    materials: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let filter = MaterialFilter::from_query(query, config.normalize.max_denominator);
    let mut report = json!({
        "include": filter.include(),
        "exclude": filter.exclude(),
    });
    if !materials.is_empty() {
        report["admits"] = json!(filter.admits(materials));
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn run_tokens(
    config: &Config,
    input: Option<PathBuf>,
    counts_path: Option<PathBuf>,
    out: &mut impl Write,
) -> Result<()> {
    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(io::BufReader::new(
            fs::File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?,
        )),
        None => Box::new(io::BufReader::new(io::stdin())),
    };

    let mut processor = SentenceProcessor::new(config.normalize.max_denominator);
    let mut sentences = 0usize;
    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        writeln!(out, "{}", processor.process_sentence(&tokens).join(" "))?;
        sentences += 1;
    }

    let counts = processor.into_material_counts();
    tracing::info!(sentences, materials = counts.len(), "Processed sentences");

    if let Some(path) = counts_path {
        let json = serde_json::to_string_pretty(&counts)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write counts to {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn strings(formulas: &[&str]) -> Vec<String> {
        formulas.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_canonical_prints_one_line_per_formula() {
        let config = Config::default();
        let formulas = strings(&["TiO2", "Li(Ni0.5Mn1.5)O4", "Fe0.9999Mn0.0001O"]);
        let text = output(|out| run_canonical(&config, &formulas, out));
        assert_eq!(text, "O2Ti\nLi2Mn3NiO8\nFeMn0O\n");
    }

    #[test]
    fn test_canonical_reports_the_failing_formula() {
        let config = Config::default();
        let mut out = Vec::new();
        let err = run_canonical(&config, &strings(&["TiO2", "Si(O2H3"]), &mut out).unwrap_err();
        assert!(err.to_string().contains("Si(O2H3"), "{err}");
        // formulas before the failure are already written
        assert_eq!(String::from_utf8(out).unwrap(), "O2Ti\n");
    }

    #[test]
    fn test_canonical_honours_configured_depth() {
        let mut config = Config::default();
        config.parser.max_depth = 1;
        let mut out = Vec::new();
        assert!(run_canonical(&config, &strings(&["K4(Fe(CN)6)"]), &mut out).is_err());

        config.parser.max_depth = 2;
        let text = output(|out| run_canonical(&config, &strings(&["K4(Fe(CN)6)"]), out));
        assert_eq!(text, "C6FeK4N6\n");
    }

    #[test]
    fn test_parse_report() {
        let config = Config::default();
        let text = output(|out| run_parse(&config, "CuSO4·5H2O", out));
        let report: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["formula"], "CuSO4·5H2O");
        assert_eq!(report["hydrate"], true);
        assert_eq!(report["canonical"], "CuH10O9S");
        assert_eq!(report["composition"]["H"], 10.0);
        assert_eq!(report["composition"]["O"], 9.0);
    }

    #[test]
    fn test_classify_lines() {
        let text = output(|out| run_classify(&strings(&["TiO2", "PV", "Ag(III)"]), out));
        assert_eq!(text, "TiO2\ttrue\nPV\tfalse\nAg(III)\tfalse\n");
    }

    #[test]
    fn test_filter_report() {
        let config = Config::default();
        let text = output(|out| run_filter(&config, "TiO2, Ti2O4 -SiO2", &[], out));
        let report: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["include"], serde_json::json!(["O2Ti", "O2Ti"]));
        assert_eq!(report["exclude"], serde_json::json!(["O2Si"]));
        assert!(report.get("admits").is_none());
    }

    #[test]
    fn test_filter_admits_materials() {
        let config = Config::default();
        let query = "TiO2, ZnO -SiO2";

        let text = output(|out| run_filter(&config, query, &strings(&["O2Ti", "CuO"]), out));
        let report: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["admits"], true);

        let text = output(|out| run_filter(&config, query, &strings(&["O2Ti", "O2Si"]), out));
        let report: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["admits"], false);
    }
}
