//! Report rendering for simulation sweeps.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::sim::RunRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    total_runs: usize,
    passed: usize,
    failed: usize,
    runs: &'a [RunRecord],
}

pub fn write_report(out: &mut dyn Write, format: ReportFormat, runs: &[RunRecord]) -> Result<()> {
    match format {
        ReportFormat::Console => write_console(out, runs),
        ReportFormat::Json => write_json(out, runs),
    }
}

fn write_console(out: &mut dyn Write, runs: &[RunRecord]) -> Result<()> {
    for run in runs {
        let status = if run.passed() {
            "PASS".green()
        } else {
            "FAIL".red()
        };
        writeln!(
            out,
            "{status} {:8} {:6} seed={:<6} health={:3} pop={} bio={} score={:5} nodes={:?} badges={:?}",
            run.character,
            run.policy,
            run.seed,
            run.final_health,
            run.final_pop,
            run.final_bio,
            run.score,
            run.nodes_visited,
            run.badges,
        )?;
        for violation in &run.violations {
            writeln!(out, "       {} {violation}", "!".red())?;
        }
    }
    let failed = runs.iter().filter(|r| !r.passed()).count();
    let summary = format!("{} runs, {} failed", runs.len(), failed);
    if failed == 0 {
        writeln!(out, "{}", summary.green().bold())?;
    } else {
        writeln!(out, "{}", summary.red().bold())?;
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, runs: &[RunRecord]) -> Result<()> {
    let failed = runs.iter().filter(|r| !r.passed()).count();
    let summary = Summary {
        total_runs: runs.len(),
        passed: runs.len() - failed,
        failed,
        runs,
    };
    serde_json::to_writer_pretty(&mut *out, &summary)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(violations: Vec<String>) -> RunRecord {
        RunRecord {
            character: "deer".into(),
            policy: "best".into(),
            seed: 1,
            final_health: 80,
            final_pop: 5,
            final_bio: 4,
            score: 900,
            rounds_played: 4,
            nodes_visited: vec![0, 1, 2, 4, 5],
            badges: vec!["Forest Guardian".into()],
            quizzes_answered: 1,
            violations,
        }
    }

    #[test]
    fn json_report_carries_pass_counts() {
        let runs = vec![record(vec![]), record(vec!["health out of range".into()])];
        let mut buf = Vec::new();
        write_json(&mut buf, &runs).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["total_runs"], 2);
        assert_eq!(parsed["passed"], 1);
        assert_eq!(parsed["failed"], 1);
    }

    #[test]
    fn console_report_lists_violations() {
        colored::control::set_override(false);
        let runs = vec![record(vec!["score negative".into()])];
        let mut buf = Vec::new();
        write_console(&mut buf, &runs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("FAIL"));
        assert!(text.contains("score negative"));
        assert!(text.contains("1 runs, 1 failed"));
    }
}
