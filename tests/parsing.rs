use std::fs;
use std::path::PathBuf;

use whiff_watch::mlb_fetch::{
    StatGroup, parse_roster_json, parse_schedule_json, parse_season_rate_json, parse_teams_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_schedule_fixture() {
    let games = parse_schedule_json(&read_fixture("mlb_schedule.json")).expect("fixture should parse");
    // The third entry has no teams and is skipped.
    assert_eq!(games.len(), 2);

    let first = &games[0];
    assert_eq!(first.game_id, 777001);
    assert_eq!(first.home_team_name, "Seattle Mariners");
    assert_eq!(first.away_team_name, "Texas Rangers");
    assert_eq!(first.status, "Scheduled");
    assert_eq!(first.scheduled_time, "2025-06-01T20:10:00Z");
    let home = first.home_pitcher.as_ref().expect("home probable pitcher");
    assert_eq!(home.id, 669302);
    assert_eq!(home.display_name, "Logan Gilbert");
    assert_eq!(first.away_pitcher.as_ref().map(|p| p.id), Some(543037));
}

#[test]
fn schedule_without_probables_or_status() {
    let games = parse_schedule_json(&read_fixture("mlb_schedule.json")).expect("fixture should parse");
    let second = &games[1];
    assert!(second.home_pitcher.is_none());
    assert!(second.away_pitcher.is_none());
    assert_eq!(second.status, "Unknown");
}

#[test]
fn empty_schedule_bodies() {
    assert!(parse_schedule_json("").expect("empty should parse").is_empty());
    assert!(parse_schedule_json(r#"{"dates":[]}"#).expect("no dates").is_empty());
    assert!(parse_schedule_json("not json").is_err());
}

#[test]
fn parses_teams_fixture() {
    let teams = parse_teams_json(&read_fixture("mlb_teams.json")).expect("fixture should parse");
    assert_eq!(teams.len(), 3);
    assert!(teams.contains(&(136, "Seattle Mariners".to_string())));
}

#[test]
fn roster_excludes_pitchers() {
    let roster = parse_roster_json(&read_fixture("mlb_roster.json")).expect("fixture should parse");
    let ids: Vec<u32> = roster.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![663728, 677594]);
    assert_eq!(roster[0].display_name, "Cal Raleigh");
    assert_eq!(roster[0].position.as_deref(), Some("Catcher"));
}

#[test]
fn pitching_line_uses_batters_faced() {
    let rate = parse_season_rate_json(&read_fixture("mlb_pitching_stats.json"), StatGroup::Pitching)
        .expect("fixture should parse")
        .expect("split present");
    assert_eq!(rate.strikeouts, 58.0);
    assert_eq!(rate.sample_size, 232.0);
    assert!((rate.rate_percent() - 25.0).abs() < 1e-9);
}

#[test]
fn hitting_line_uses_at_bats() {
    let rate = parse_season_rate_json(&read_fixture("mlb_hitting_stats.json"), StatGroup::Hitting)
        .expect("fixture should parse")
        .expect("split present");
    assert_eq!(rate.strikeouts, 71.0);
    assert_eq!(rate.sample_size, 250.0);
    assert!((rate.rate_percent() - 28.4).abs() < 1e-9);
}

#[test]
fn wrong_group_reads_zero_sample() {
    // A hitting body read as pitching has no battersFaced field.
    let rate = parse_season_rate_json(&read_fixture("mlb_hitting_stats.json"), StatGroup::Pitching)
        .expect("fixture should parse")
        .expect("split present");
    assert!(!rate.has_sample());
}
