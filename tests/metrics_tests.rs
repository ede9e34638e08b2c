mod common;

use common::{challenge, keypress};
use rstest::rstest;
use stylus_metrics::error::MetricsError;
use stylus_metrics::layouts::Layout;
use stylus_metrics::metrics::{
    accurate_words_per_minute, challenge_rot_travel, classify_errors, words_per_minute,
};
use stylus_metrics::trial::{ChallengeKind, Keypress, Travel};

const EPS: f64 = 1e-9;

// --- TYPING SPEED ---

#[test]
fn wpm_reference_scenario() {
    // "cat" in 6s: (3-1)/5 words over 0.1 minutes = 4.0 WPM.
    let c = challenge(Layout::TiltType, ChallengeKind::Standard, "cat", "cat", 6.0, vec![]);
    assert!((words_per_minute(&c).unwrap() - 4.0).abs() < EPS);
    assert!((accurate_words_per_minute(&c).unwrap() - 4.0).abs() < EPS);
}

#[test]
fn wpm_empty_output_is_zero() {
    let c = challenge(Layout::TiltType, ChallengeKind::Standard, "cat", "", 6.0, vec![]);
    assert_eq!(words_per_minute(&c).unwrap(), 0.0);
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
fn wpm_rejects_non_positive_duration(#[case] duration: f64) {
    let c = challenge(Layout::TiltType, ChallengeKind::Standard, "cat", "cat", duration, vec![]);
    assert!(matches!(
        words_per_minute(&c),
        Err(MetricsError::NonPositiveDuration(_))
    ));
}

#[test]
fn awpm_scales_by_positional_accuracy() {
    let c = challenge(Layout::TiltType, ChallengeKind::Standard, "cat", "car", 6.0, vec![]);
    assert!((accurate_words_per_minute(&c).unwrap() - 4.0 * 2.0 / 3.0).abs() < EPS);
}

#[rstest]
#[case("cat", "cat")]
#[case("cat", "dog")]
#[case("hello world", "helol wrold")]
#[case("abc", "abcdef")] // longer output than prompt
fn awpm_never_exceeds_wpm(#[case] prompt: &str, #[case] output: &str) {
    let c = challenge(Layout::TiltType, ChallengeKind::Standard, prompt, output, 9.0, vec![]);
    let wpm = words_per_minute(&c).unwrap();
    let awpm = accurate_words_per_minute(&c).unwrap();
    assert!(awpm <= wpm + EPS, "aWPM {} exceeded WPM {}", awpm, wpm);
}

// --- ROTATIONAL TRAVEL ---

#[test]
fn rot_travel_sums_keypress_norms() {
    let c = challenge(
        Layout::ArcType,
        ChallengeKind::Standard,
        "ab",
        "ab",
        5.0,
        vec![
            keypress(None, Some([3.0, 4.0, 0.0])),
            keypress(None, Some([0.0, 0.0, 2.0])),
        ],
    );
    assert!((challenge_rot_travel(&c) - 7.0).abs() < EPS);
}

#[test]
fn rot_travel_tolerates_missing_rotation() {
    let c = challenge(
        Layout::ArcType,
        ChallengeKind::Standard,
        "ab",
        "ab",
        5.0,
        vec![
            keypress(None, Some([3.0, 4.0, 0.0])),
            keypress(Some([1.0, 1.0, 1.0]), None),
            Keypress {
                press_pos: None,
                travel: Some(Travel { rot: None }),
            },
        ],
    );
    assert!((challenge_rot_travel(&c) - 5.0).abs() < EPS);
}

#[test]
fn rot_travel_of_no_keypresses_is_zero() {
    let c = challenge(Layout::ArcType, ChallengeKind::Standard, "ab", "ab", 5.0, vec![]);
    assert_eq!(challenge_rot_travel(&c), 0.0);
}

// --- BLIND ERROR CLASSIFICATION ---

#[test]
fn classify_raycast_off_by_one() {
    // a=(0,1), q=(0,0): displacement (0,1). One error, off by one cell, not
    // dipped (the miss went up a row, not down).
    let pairs = vec![("a".to_string(), "q".to_string())];
    let breakdown = classify_errors(Layout::Raycast, &pairs).unwrap().unwrap();
    assert_eq!(breakdown.errors, 1);
    assert_eq!(breakdown.dipped, 0);
    assert_eq!(breakdown.off_by_one, 1);
    assert_eq!(breakdown.off_by_one_pct(), 100.0);
    assert_eq!(breakdown.dipped_pct(), 0.0);
}

#[test]
fn classify_raycast_dipped() {
    // q=(0,0), a=(0,1): the output landed one row below the target.
    let pairs = vec![("q".to_string(), "a".to_string())];
    let breakdown = classify_errors(Layout::Raycast, &pairs).unwrap().unwrap();
    assert_eq!(breakdown.dipped, 1);
    assert_eq!(breakdown.off_by_one, 1);
}

#[rstest]
#[case(Layout::TiltType)]
#[case(Layout::ArcType)] // ArcType classifies on the tilt grid too
fn classify_tilt_grid_dipped(#[case] layout: Layout) {
    // a=(0,0), b=(0,1): signed displacement (0,-1).
    let pairs = vec![("a".to_string(), "b".to_string())];
    let breakdown = classify_errors(layout, &pairs).unwrap().unwrap();
    assert_eq!(breakdown.errors, 1);
    assert_eq!(breakdown.dipped, 1);
    assert_eq!(breakdown.off_by_one, 1);
}

#[test]
fn classify_without_errors_is_none() {
    let pairs = vec![("cat".to_string(), "cat".to_string())];
    assert_eq!(classify_errors(Layout::Raycast, &pairs).unwrap(), None);
    assert_eq!(classify_errors(Layout::TiltType, &pairs).unwrap(), None);
}

#[test]
fn classify_propagates_characters_off_the_board() {
    let pairs = vec![("a".to_string(), "!".to_string())];
    assert!(matches!(
        classify_errors(Layout::Raycast, &pairs),
        Err(MetricsError::InvalidCharacter('!', Layout::Raycast))
    ));
    let pairs = vec![("a".to_string(), "1".to_string())];
    assert!(classify_errors(Layout::TiltType, &pairs).is_err());
}

#[test]
fn classify_zips_to_the_shorter_side() {
    // Only the first two characters pair up; the prompt tail is ignored.
    let pairs = vec![("abc".to_string(), "ab".to_string())];
    assert_eq!(classify_errors(Layout::TiltType, &pairs).unwrap(), None);
}
