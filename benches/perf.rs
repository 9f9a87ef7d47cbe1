use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use whiff_watch::config::PipelineConfig;
use whiff_watch::fake_lookup::FakeLookup;
use whiff_watch::pipeline::run_games;
use whiff_watch::types::{Game, Matchup, PlayerRef, SeasonRate};
use whiff_watch::{qualify, ranking, scoring};

fn sample_matchups(n: u32) -> Vec<Matchup> {
    (0..n)
        .map(|idx| Matchup {
            game_id: u64::from(idx / 26),
            pitcher: PlayerRef::new(idx / 26, format!("Pitcher {}", idx / 26)),
            pitcher_rate: SeasonRate::new(30.0 + f64::from(idx % 40), 180.0 + f64::from(idx % 90)),
            batter: PlayerRef::new(10_000 + idx, format!("Batter {idx}")),
            batter_rate: SeasonRate::new(40.0 + f64::from(idx % 70), 150.0 + f64::from(idx % 300)),
        })
        .collect()
}

// 15 games, 26-man rosters on both sides.
fn sample_day() -> FakeLookup {
    let mut lookup = FakeLookup::default();
    for g in 0..15u32 {
        let home = format!("Home {g}");
        let away = format!("Away {g}");
        let home_pitcher = 1_000 + g * 2;
        let away_pitcher = home_pitcher + 1;
        lookup = lookup
            .with_game(Game {
                game_id: u64::from(g),
                home_team_name: home.clone(),
                away_team_name: away.clone(),
                home_pitcher: Some(PlayerRef::new(home_pitcher, format!("Arm {home_pitcher}"))),
                away_pitcher: Some(PlayerRef::new(away_pitcher, format!("Arm {away_pitcher}"))),
                scheduled_time: String::new(),
                status: "Scheduled".to_string(),
            })
            .with_pitcher(home_pitcher, 40.0 + f64::from(g * 3), 200.0)
            .with_pitcher(away_pitcher, 35.0 + f64::from(g * 2), 190.0);
        for (team_idx, name) in [(g * 2, home), (g * 2 + 1, away)] {
            let roster: Vec<PlayerRef> = (0..26)
                .map(|slot| {
                    let id = 100_000 + team_idx * 100 + slot;
                    PlayerRef::new(id, format!("Batter {id}"))
                })
                .collect();
            for player in &roster {
                lookup = lookup.with_batter(player.id, 40.0 + f64::from(player.id % 60), 260.0);
            }
            lookup = lookup.with_team(&name, team_idx, roster);
        }
    }
    lookup
}

fn bench_score_and_rank(c: &mut Criterion) {
    let matchups = sample_matchups(2_000);
    c.bench_function("score_and_rank_2000", |b| {
        b.iter(|| {
            let qualified = qualify::filter_default(black_box(&matchups));
            let ranked = ranking::rank(scoring::score(&qualified));
            black_box(ranked.len());
        })
    });
}

fn bench_pipeline_day(c: &mut Criterion) {
    let lookup = sample_day();
    let cfg = PipelineConfig::default();
    c.bench_function("pipeline_fifteen_games", |b| {
        b.iter(|| {
            let out = run_games(black_box(&lookup.games), &lookup, &cfg);
            black_box(out.predictions.len());
        })
    });
}

criterion_group!(benches, bench_score_and_rank, bench_pipeline_day);
criterion_main!(benches);
