mod policy;
mod report;
mod sim;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use policy::ChoicePolicy;
use report::{ReportFormat, write_report};
use sim::{RunRecord, run_one};
use wildpath_game::{BuiltinContent, CharacterId, ContentSource};

#[derive(Debug, Parser)]
#[command(name = "wildpath-tester", version)]
#[command(about = "Automated QA testing for the Wildpath game - headless journey simulation")]
struct Args {
    /// Characters to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    characters: String,

    /// Choice policies to sweep
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = vec![ChoicePolicy::Best, ChoicePolicy::Worst, ChoicePolicy::Random])]
    policies: Vec<ChoicePolicy>,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Extra iterations per seed (each adds seed+i)
    #[arg(long, default_value_t = 1)]
    iterations: u64,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == ReportFormat::Console && args.output.is_none() {
        println!("{}", "🦌 Wildpath Automated Tester".bright_cyan().bold());
        println!("{}", "============================".cyan());
    }

    let start = Instant::now();
    let content = BuiltinContent
        .load_content()
        .context("builtin content failed to load")?;
    let characters = resolve_characters(&args.characters, &content)?;
    let seeds = resolve_seeds(&args.seeds, args.iterations)?;

    let mut runs: Vec<RunRecord> = Vec::new();
    for &character in &characters {
        for &policy in &args.policies {
            for &seed in &seeds {
                if args.verbose {
                    eprintln!("running {character} {policy:?} seed {seed}");
                }
                runs.push(run_one(&content, character, policy, seed)?);
            }
        }
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(stdout().lock()),
    };
    write_report(&mut writer, args.report, &runs)?;
    writer.flush()?;

    let failed = runs.iter().filter(|r| !r.passed()).count();
    log::info!(
        "{} runs in {:.2?}, {} failed",
        runs.len(),
        start.elapsed(),
        failed
    );
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Expand the `--characters` argument against the loaded content.
fn resolve_characters(
    arg: &str,
    content: &wildpath_game::ContentData,
) -> Result<Vec<CharacterId>> {
    if arg.trim().eq_ignore_ascii_case("all") {
        return Ok(content.characters.iter().map(|c| c.id).collect());
    }
    let mut ids = Vec::new();
    for token in split_csv(arg) {
        let id: CharacterId = token
            .parse()
            .ok()
            .with_context(|| format!("unknown character `{token}`"))?;
        if content.character(id).is_none() {
            bail!("no content for character `{token}`");
        }
        ids.push(id);
    }
    if ids.is_empty() {
        bail!("no characters selected");
    }
    Ok(ids)
}

fn resolve_seeds(arg: &str, iterations: u64) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in split_csv(arg) {
        let base: u64 = token
            .parse()
            .with_context(|| format!("invalid seed `{token}`"))?;
        for i in 0..iterations.max(1) {
            seeds.push(base.wrapping_add(i));
        }
    }
    if seeds.is_empty() {
        bail!("no seeds selected");
    }
    Ok(seeds)
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(split_csv("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn resolve_characters_accepts_all_and_names() {
        let content = BuiltinContent.load_content().unwrap();
        let all = resolve_characters("all", &content).unwrap();
        assert_eq!(all.len(), 4);
        let some = resolve_characters("deer,bee", &content).unwrap();
        assert_eq!(some, vec![CharacterId::Deer, CharacterId::Bee]);
        assert!(resolve_characters("wolf", &content).is_err());
        // Reserved ids without content are rejected too.
        assert!(resolve_characters("camel", &content).is_err());
    }

    #[test]
    fn resolve_seeds_expands_iterations() {
        assert_eq!(resolve_seeds("5,9", 2).unwrap(), vec![5, 6, 9, 10]);
        assert!(resolve_seeds("nope", 1).is_err());
    }
}
