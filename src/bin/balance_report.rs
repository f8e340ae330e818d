//! Batch-simulate every class matchup and emit a JSON balance report.
//!
//! Usage: `balance_report [runs_per_matchup]` (default 20). The report
//! goes to stdout; progress logs go to stderr via tracing.

use std::collections::HashMap;

use coliseo_engine::game::arena::{Team, run_battle};
use coliseo_engine::game::ClassKey;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct MatchupStats {
    red: &'static str,
    blue: &'static str,
    runs: u32,
    red_wins: u32,
    blue_wins: u32,
    draws: u32,
    avg_duration_s: f32,
    avg_red_damage: f32,
    avg_blue_damage: f32,
}

#[derive(Serialize)]
struct ClassSummary {
    class: &'static str,
    battles: u32,
    wins: u32,
    win_rate: f32,
}

#[derive(Serialize)]
struct BalanceReport {
    runs_per_matchup: u32,
    matchups: Vec<MatchupStats>,
    summary: Vec<ClassSummary>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let runs: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);

    let mut matchups = Vec::new();
    let mut wins: HashMap<&'static str, (u32, u32)> = HashMap::new(); // (wins, battles)

    for (i, &red) in ClassKey::ALL.iter().enumerate() {
        tracing::info!(class = red.key_name(), "simulating matchups");
        for &blue in &ClassKey::ALL {
            let mut stats = MatchupStats {
                red: red.key_name(),
                blue: blue.key_name(),
                runs,
                red_wins: 0,
                blue_wins: 0,
                draws: 0,
                avg_duration_s: 0.0,
                avg_red_damage: 0.0,
                avg_blue_damage: 0.0,
            };
            for run in 0..runs {
                // Seed mixes the matchup index and run so every battle differs
                let seed = (i as u32) * 1_000_003 ^ (run + 1) * 7919 ^ blue as u32;
                let outcome = run_battle(red, blue, seed);
                match outcome.winner {
                    Some(Team::Red) => stats.red_wins += 1,
                    Some(Team::Blue) => stats.blue_wins += 1,
                    None => stats.draws += 1,
                }
                stats.avg_duration_s += outcome.duration_frames / 60.0;
                stats.avg_red_damage += outcome.red_damage;
                stats.avg_blue_damage += outcome.blue_damage;
            }
            let n = runs.max(1) as f32;
            stats.avg_duration_s /= n;
            stats.avg_red_damage /= n;
            stats.avg_blue_damage /= n;

            let red_entry = wins.entry(red.key_name()).or_default();
            red_entry.0 += stats.red_wins;
            red_entry.1 += runs;
            let blue_entry = wins.entry(blue.key_name()).or_default();
            blue_entry.0 += stats.blue_wins;
            blue_entry.1 += runs;

            matchups.push(stats);
        }
    }

    let mut summary: Vec<ClassSummary> = ClassKey::ALL
        .iter()
        .map(|k| {
            let (w, n) = wins.get(k.key_name()).copied().unwrap_or_default();
            ClassSummary {
                class: k.key_name(),
                battles: n,
                wins: w,
                win_rate: if n > 0 { w as f32 / n as f32 } else { 0.0 },
            }
        })
        .collect();
    summary.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));

    let report = BalanceReport {
        runs_per_matchup: runs,
        matchups,
        summary,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );
}
