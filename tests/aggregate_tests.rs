mod common;

use common::{challenge, keypress, log_of};
use stylus_metrics::aggregate::{build_study_data, collect_buckets, extract_layout_positions};
use stylus_metrics::geometry;
use stylus_metrics::layouts::Layout;
use stylus_metrics::trial::{merge_trials, ChallengeKind, TrialEntry};

const EPS: f64 = 1e-9;

fn command_entry() -> TrialEntry {
    serde_yaml_ng::from_str("command:\n  name: recenter\n").unwrap()
}

fn sample_logs() -> Vec<stylus_metrics::trial::TrialLog> {
    let log_a = log_of(vec![
        TrialEntry::Challenge(challenge(
            Layout::TiltType,
            ChallengeKind::Standard,
            "cat",
            "cat",
            6.0,
            vec![keypress(Some([0.0, 1.0, 2.0]), Some([3.0, 4.0, 0.0]))],
        )),
        TrialEntry::Challenge(challenge(
            Layout::TiltType,
            ChallengeKind::Practice,
            "dog",
            "dog",
            12.0,
            vec![keypress(Some([9.0, 9.0, 9.0]), None)],
        )),
        command_entry(),
        TrialEntry::Challenge(challenge(
            Layout::ArcType,
            ChallengeKind::Blind,
            "hi",
            "hj",
            30.0,
            vec![keypress(None, Some([0.0, 5.0, 0.0]))],
        )),
    ]);
    let log_b = log_of(vec![TrialEntry::Challenge(challenge(
        Layout::Raycast,
        ChallengeKind::Standard,
        "cab",
        "cab",
        10.0,
        vec![
            keypress(Some([1.0, 1.0, 1.0]), None),
            keypress(None, None), // pressPos missing: tolerated, skipped
        ],
    ))]);
    vec![log_a, log_b]
}

// --- BUCKETING POLICY ---

#[test]
fn commands_and_practice_are_excluded_by_default() {
    let buckets = collect_buckets(&sample_logs(), false).unwrap();
    assert_eq!(buckets.wpm[&Layout::TiltType].len(), 1);
    assert_eq!(buckets.wpm[&Layout::ArcType].len(), 1);
    assert_eq!(buckets.wpm[&Layout::Raycast].len(), 1);
    assert!(!buckets.wpm.contains_key(&Layout::SliderOnly));
}

#[test]
fn practice_is_kept_when_requested() {
    let buckets = collect_buckets(&sample_logs(), true).unwrap();
    assert_eq!(buckets.wpm[&Layout::TiltType].len(), 2);
}

#[test]
fn blind_pairs_are_recorded_per_layout() {
    let buckets = collect_buckets(&sample_logs(), false).unwrap();
    assert_eq!(
        buckets.blind_io[&Layout::ArcType],
        vec![("hi".to_string(), "hj".to_string())]
    );
    assert!(!buckets.blind_io.contains_key(&Layout::TiltType));
}

#[test]
fn travel_pairs_only_exist_for_rotational_layouts() {
    let buckets = collect_buckets(&sample_logs(), false).unwrap();
    assert!(!buckets.pit.contains_key(&Layout::Raycast));
    assert!(!buckets.pit.contains_key(&Layout::SliderOnly));

    let arc = &buckets.pit[&Layout::ArcType][0];
    assert!((arc.actual - 5.0).abs() < EPS);
    assert!((arc.ideal - geometry::arctype_ideal("hi").unwrap()).abs() < EPS);
    assert_eq!(arc.ideal_vector, None);

    let tilt = &buckets.pit[&Layout::TiltType][0];
    assert!(tilt.ideal_vector.is_some());
    assert!((tilt.ideal - geometry::tilttype_ideal("cat").unwrap()).abs() < EPS);
}

#[test]
fn durations_bucket_follows_the_challenge() {
    let buckets = collect_buckets(&sample_logs(), false).unwrap();
    assert_eq!(buckets.durations[&Layout::ArcType], vec![30.0]);
}

// --- POSITION EXTRACTION ---

#[test]
fn positions_come_from_the_merged_trial() {
    let logs = sample_logs();
    let merged = merge_trials(&logs);
    assert_eq!(merged.meta, "lost in merge");
    assert_eq!(merged.entries.len(), 5);

    let tilt = extract_layout_positions(&merged, Layout::TiltType, false);
    assert_eq!(tilt, vec![[0.0, 1.0, 2.0]]);

    // Practice positions come back when explicitly requested.
    let tilt_all = extract_layout_positions(&merged, Layout::TiltType, true);
    assert_eq!(tilt_all.len(), 2);

    // The keypress without a pressPos is skipped silently.
    let ray = extract_layout_positions(&merged, Layout::Raycast, false);
    assert_eq!(ray, vec![[1.0, 1.0, 1.0]]);

    assert!(extract_layout_positions(&merged, Layout::SliderOnly, false).is_empty());
}

// --- REDUCTION ---

#[test]
fn rows_follow_layout_order_with_optional_travel() {
    let data = build_study_data(&sample_logs(), false, 2.0).unwrap();
    let layouts: Vec<Layout> = data.rows.iter().map(|r| r.layout).collect();
    assert_eq!(
        layouts,
        vec![
            Layout::SliderOnly,
            Layout::ArcType,
            Layout::TiltType,
            Layout::Raycast
        ]
    );

    for row in &data.rows {
        assert_eq!(row.travel.is_some(), row.pit.is_some());
        if row.layout.has_travel_model() {
            assert!(row.travel.is_some());
        } else {
            assert!(row.travel.is_none());
        }
    }
}

#[test]
fn empty_layout_reduces_to_nan_without_raising() {
    let data = build_study_data(&sample_logs(), false, 2.0).unwrap();
    let slider = &data.rows[0];
    assert_eq!(slider.layout, Layout::SliderOnly);
    assert!(slider.wpm.mean.is_nan());
    assert!(slider.awpm.std.is_nan());
    assert!(slider.pos[0].mean.is_nan());
}

#[test]
fn buckets_are_replaced_by_their_filtered_subsets() {
    // Seven TiltType challenges engineered to one far WPM outlier: outputs of
    // six characters give WPM = 60 / duration.
    let entries: Vec<TrialEntry> = [6.0, 60.0 / 11.0, 5.0, 60.0 / 9.0, 6.0, 60.0 / 11.0, 0.6]
        .iter()
        .map(|&d| {
            TrialEntry::Challenge(challenge(
                Layout::TiltType,
                ChallengeKind::Standard,
                "abcdef",
                "abcdef",
                d,
                vec![],
            ))
        })
        .collect();
    let logs = vec![log_of(entries)];

    let data = build_study_data(&logs, false, 2.0).unwrap();
    let clean = &data.wpm[&Layout::TiltType];
    assert_eq!(clean.len(), 6, "the 100 WPM outlier should be rejected");
    assert!(clean.iter().all(|w| *w < 50.0));
    assert!(data.rows[2].wpm.mean.is_finite());
}

#[test]
fn pit_reduction_filters_three_independent_subsets() {
    // Ideal travel for "ab" is 22.5; actuals carry one outlier so the PIT and
    // actual subsets must both drop it independently.
    let actuals = [20.0, 22.0, 21.0, 23.0, 22.0, 21.0, 400.0];
    let entries: Vec<TrialEntry> = actuals
        .iter()
        .map(|&a| {
            TrialEntry::Challenge(challenge(
                Layout::TiltType,
                ChallengeKind::Standard,
                "ab",
                "ab",
                5.0,
                vec![keypress(None, Some([a, 0.0, 0.0]))],
            ))
        })
        .collect();
    let logs = vec![log_of(entries)];

    let data = build_study_data(&logs, false, 2.0).unwrap();
    assert_eq!(data.actual_travel[&Layout::TiltType].len(), 6);
    assert_eq!(data.pit[&Layout::TiltType].len(), 6);
    // All ideals are identical, so the strict window rejects the whole ideal
    // marginal; the PIT subset is filtered on its own statistics instead.
    assert!(data.ideal_travel[&Layout::TiltType].is_empty());
}
