use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use kurve_core::dump::{decode_text, render, ParseMode, TableStyle};
use kurve_core::{DumpError, MemoryLayout, PlayerId, PlayerState};

fn testcase(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testcase")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn layout() -> MemoryLayout {
    MemoryLayout::new(0x7fffd8010ff6).unwrap()
}

#[test]
fn test_strict_dump_of_default_scenario() {
    let states = decode_text(
        &testcase("dump_default_scenario.txt"),
        ParseMode::Strict,
        &layout(),
    )
    .unwrap();

    assert_eq!(
        states,
        vec![
            (PlayerId::Red, PlayerState::new(50.0, 50.0, FRAC_PI_2)),
            (PlayerId::Yellow, PlayerState::new(50.0, 100.0, FRAC_PI_2)),
            (PlayerId::Orange, PlayerState::default()),
            (PlayerId::Green, PlayerState::new(50.0, 150.0, FRAC_PI_2)),
            (PlayerId::Pink, PlayerState::default()),
            (PlayerId::Blue, PlayerState::default()),
        ]
    );

    let table = render(&states, TableStyle::Arrows);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[1],
        "🟥 Red     50                   50                   → 1.5707964"
    );
    assert_eq!(
        lines[3],
        "🟧 Orange  0                    0                    ↓ 0"
    );
}

#[test]
fn test_lenient_dump_matches_strict() {
    let strict = decode_text(
        &testcase("dump_default_scenario.txt"),
        ParseMode::Strict,
        &layout(),
    )
    .unwrap();
    let lenient = decode_text(
        &testcase("dump_lenient.txt"),
        ParseMode::Lenient,
        &layout(),
    )
    .unwrap();
    assert_eq!(strict, lenient);
}

#[test]
fn test_lenient_picks_up_noise() {
    // the "12" of the scanmem banner and the "72" of the dump command are hex tokens too
    let states = decode_text(
        &testcase("dump_default_scenario.txt"),
        ParseMode::Lenient,
        &layout(),
    )
    .unwrap();
    assert_ne!(states[0].1.x, 50.0);
}

#[test]
fn test_classified_failures() {
    let result = decode_text(
        &testcase("dump_process_not_found.txt"),
        ParseMode::Strict,
        &layout(),
    );
    let err = result.unwrap_err();
    assert!(matches!(err, DumpError::ProcessNotFound));
    assert_eq!(
        err.user_message(),
        Some("Process not found. Is the game running?")
    );

    let err = decode_text(
        &testcase("dump_read_failed.txt"),
        ParseMode::Strict,
        &layout(),
    )
    .unwrap_err();
    assert!(matches!(err, DumpError::ReadMemoryFailed));
    assert_eq!(
        err.user_message(),
        Some("Read memory failed. Maybe the game is currently starting.")
    );

    let err = decode_text("", ParseMode::Lenient, &layout()).unwrap_err();
    assert_eq!(
        err.user_message(),
        Some("Empty input on stdin. Is the game running?")
    );
}

#[test]
fn test_short_capture_is_malformed() {
    let text = testcase("dump_default_scenario.txt");
    // drop the last dump line: 64 bytes, 16 values
    let short: String = text
        .lines()
        .filter(|line| !line.starts_with("7fffd8011036"))
        .map(|line| format!("{}\n", line))
        .collect();

    let err = decode_text(&short, ParseMode::Strict, &layout()).unwrap_err();
    assert!(matches!(
        err,
        DumpError::MalformedDump {
            expected: 18,
            found: 16
        }
    ));
    assert_eq!(err.user_message(), None);
}
