//! Tests for Sampler and Samples in model::sampler

use super::*;
use chrono::NaiveDate;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 8, 13)
        .and_then(|d| d.and_hms_opt(2, 0, 0))
        .expect("valid date")
}

fn update_tip(offset: TimeDelta, height: u64) -> String {
    format!(
        "{} UpdateTip: new best=00ab height={} version=0x20000000",
        (base() + offset).format("%Y-%m-%d %H:%M:%S"),
        height
    )
}

fn run(lines: Vec<String>) -> Vec<OutputRow> {
    Sampler::default()
        .samples("debug.log", lines.into_iter().map(Ok))
        .collect::<SyncTimeResult<Vec<_>>>()
        .expect("sampling should succeed")
}

fn elapsed_seconds(rows: &[OutputRow]) -> Vec<i64> {
    rows.iter().map(OutputRow::elapsed_seconds).collect()
}

#[test]
fn test_first_match_is_always_emitted() {
    let rows = run(vec![
        "Bitcoin version v0.16.3".to_string(),
        update_tip(TimeDelta::zero(), 100),
    ]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].elapsed_seconds(), 0);
    assert_eq!(rows[0].height, "100");
    assert_eq!(rows[0].date, "2018-08-13 02:00:00");
}

#[test]
fn test_skips_until_threshold() {
    let rows = run(vec![
        update_tip(TimeDelta::zero(), 1),
        update_tip(TimeDelta::minutes(5), 2),
        update_tip(TimeDelta::minutes(12), 3),
        update_tip(TimeDelta::minutes(15), 4),
    ]);
    assert_eq!(elapsed_seconds(&rows), vec![0, 720]);
    assert_eq!(rows[1].height, "3");
}

#[test]
fn test_threshold_after_second_sample() {
    let mut sampler = Sampler::default();
    let mut accept = |minutes: i64| {
        let text = update_tip(TimeDelta::minutes(minutes), 1);
        let sample = parse_line(1, &text)
            .expect("valid line")
            .expect("line should match");
        sampler.accept(sample).is_some()
    };
    assert!(accept(0));
    assert!(!accept(5));
    assert!(accept(12));
    assert_eq!(sampler.threshold(), TimeDelta::minutes(20));
    assert_eq!(sampler.start(), Some(base()));
}

#[test]
fn test_boundary_is_inclusive() {
    let rows = run(vec![
        update_tip(TimeDelta::zero(), 1),
        update_tip(TimeDelta::minutes(10), 2),
        update_tip(TimeDelta::seconds(1199), 3),
        update_tip(TimeDelta::minutes(20), 4),
    ]);
    assert_eq!(elapsed_seconds(&rows), vec![0, 600, 1200]);
}

#[test]
fn test_threshold_steps_after_gap() {
    let rows = run(vec![
        update_tip(TimeDelta::zero(), 1),
        update_tip(TimeDelta::minutes(35), 2),
        update_tip(TimeDelta::minutes(36), 3),
        update_tip(TimeDelta::minutes(37), 4),
        update_tip(TimeDelta::minutes(38), 5),
        update_tip(TimeDelta::minutes(39), 6),
    ]);
    // threshold 10 -> 20 -> 30 -> 40, so 38 and 39 minutes are held back
    assert_eq!(elapsed_seconds(&rows), vec![0, 2100, 2160, 2220]);
    let heights: Vec<&str> = rows.iter().map(|r| r.height.as_str()).collect();
    assert_eq!(heights, vec!["1", "2", "3", "4"]);
}

#[test]
fn test_elapsed_is_non_decreasing() {
    let lines = (0..200)
        .map(|i| update_tip(TimeDelta::seconds(i * 97), i as u64))
        .collect();
    let rows = run(lines);
    assert!(rows.len() > 1);
    assert!(rows
        .windows(2)
        .all(|pair| pair[0].elapsed <= pair[1].elapsed));
}

#[test]
fn test_no_matching_lines() {
    let rows = run(vec![
        "2018-08-13 02:00:00 Loading block index...".to_string(),
        "garbage".to_string(),
    ]);
    assert!(rows.is_empty());
}

#[test]
fn test_earlier_timestamp_is_not_emitted() {
    let rows = run(vec![
        update_tip(TimeDelta::minutes(30), 1),
        update_tip(TimeDelta::zero(), 2),
        update_tip(TimeDelta::minutes(40), 3),
    ]);
    assert_eq!(elapsed_seconds(&rows), vec![0, 600]);
}

#[test]
fn test_custom_step() {
    let rows = Sampler::new(TimeDelta::minutes(1))
        .samples(
            "debug.log",
            vec![
                Ok(update_tip(TimeDelta::zero(), 1)),
                Ok(update_tip(TimeDelta::seconds(30), 2)),
                Ok(update_tip(TimeDelta::seconds(60), 3)),
            ],
        )
        .collect::<SyncTimeResult<Vec<_>>>()
        .expect("sampling should succeed");
    assert_eq!(elapsed_seconds(&rows), vec![0, 60]);
}

#[test]
fn test_parse_error_stops_the_pass() {
    let lines = vec![
        Ok(update_tip(TimeDelta::zero(), 1)),
        Ok("2018-02-30 02:11:07 UpdateTip: height=2 version=1".to_string()),
        Ok(update_tip(TimeDelta::minutes(20), 3)),
    ];
    let mut samples = Sampler::default().samples("debug.log", lines);

    assert!(matches!(samples.next(), Some(Ok(_))));
    match samples.next() {
        Some(Err(SyncTimeError::Parse { line, .. })) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(samples.next().is_none());
}

#[test]
fn test_read_error_is_reported() {
    let lines = vec![
        Ok(update_tip(TimeDelta::zero(), 1)),
        Err(std::io::Error::other("disk gone")),
    ];
    let result: SyncTimeResult<Vec<_>> = Sampler::default().samples("debug.log", lines).collect();
    assert!(matches!(result, Err(SyncTimeError::Io { .. })));
}
