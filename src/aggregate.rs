//! The trial aggregator: one sequential pass over every loaded session,
//! bucketing per-challenge metrics by layout, followed by the statistical
//! reduction that produces the summary rows and cleaned sample collections.

use crate::error::SmResult;
use crate::geometry;
use crate::layouts::Layout;
use crate::metrics::{accurate_words_per_minute, challenge_rot_travel, words_per_minute};
use crate::stats::{reject_outliers, summarize, Stat};
use crate::trial::{merge_trials, ChallengeKind, MergedTrial, TrialLog};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::debug;

/// One raw travel observation: actual rotational travel against the ideal for
/// the challenge's prompt. TiltType also keeps the accumulated ideal vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitSample {
    pub actual: f64,
    pub ideal: f64,
    pub ideal_vector: Option<(f64, f64)>,
}

/// Raw per-layout sample collections, mutated only during the single
/// aggregation pass and consumed by the reducer.
#[derive(Debug, Default)]
pub struct LayoutBuckets {
    pub wpm: HashMap<Layout, Vec<f64>>,
    pub awpm: HashMap<Layout, Vec<f64>>,
    pub durations: HashMap<Layout, Vec<f64>>,
    pub pit: HashMap<Layout, Vec<PitSample>>,
    pub blind_io: HashMap<Layout, Vec<(String, String)>>,
}

/// One reduced row per layout. Travel and PIT are absent for layouts without
/// a rotational model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub layout: Layout,
    pub pos: [Stat; 3],
    pub wpm: Stat,
    pub awpm: Stat,
    pub travel: Option<Stat>,
    pub pit: Option<Stat>,
}

/// The reducer's output: summary rows plus the outlier-filtered sample
/// collections the chart builders consume.
#[derive(Debug)]
pub struct StudyData {
    pub header: Vec<String>,
    pub rows: Vec<SummaryRow>,
    pub positions: HashMap<Layout, Vec<[f64; 3]>>,
    pub wpm: HashMap<Layout, Vec<f64>>,
    pub awpm: HashMap<Layout, Vec<f64>>,
    pub durations: HashMap<Layout, Vec<f64>>,
    pub actual_travel: HashMap<Layout, Vec<f64>>,
    pub ideal_travel: HashMap<Layout, Vec<f64>>,
    pub pit: HashMap<Layout, Vec<f64>>,
    pub blind_io: HashMap<Layout, Vec<(String, String)>>,
}

pub fn summary_header() -> Vec<String> {
    [
        "Layout",
        "Avg X",
        "Std Dev X",
        "Avg Y",
        "Std Dev Y",
        "Avg Z",
        "Std Dev Z",
        "Avg WPM",
        "Std Dev WPM",
        "Avg aWPM",
        "Std Dev aWPM",
        "Avg Travel",
        "Std Dev Travel",
        "Avg PIT",
        "Std Dev PIT",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Bucket every challenge's derived metrics by layout. Commands are skipped
/// outright; practice challenges are skipped unless requested.
pub fn collect_buckets(logs: &[TrialLog], include_practice: bool) -> SmResult<LayoutBuckets> {
    let mut buckets = LayoutBuckets::default();

    for log in logs {
        for entry in &log.trial {
            let challenge = match entry.as_challenge() {
                Some(c) => c,
                None => continue,
            };
            if challenge.kind == ChallengeKind::Practice && !include_practice {
                continue;
            }

            let layout = challenge.layout;
            buckets
                .wpm
                .entry(layout)
                .or_default()
                .push(words_per_minute(challenge)?);
            buckets
                .awpm
                .entry(layout)
                .or_default()
                .push(accurate_words_per_minute(challenge)?);

            match layout {
                Layout::ArcType => buckets.pit.entry(layout).or_default().push(PitSample {
                    actual: challenge_rot_travel(challenge),
                    ideal: geometry::arctype_ideal(&challenge.prompt)?,
                    ideal_vector: None,
                }),
                Layout::TiltType => buckets.pit.entry(layout).or_default().push(PitSample {
                    actual: challenge_rot_travel(challenge),
                    ideal: geometry::tilttype_ideal(&challenge.prompt)?,
                    ideal_vector: Some(geometry::tilttype_ideal_vector(&challenge.prompt)?),
                }),
                _ => {}
            }

            buckets
                .durations
                .entry(layout)
                .or_default()
                .push(challenge.time.duration);

            if challenge.kind == ChallengeKind::Blind {
                buckets
                    .blind_io
                    .entry(layout)
                    .or_default()
                    .push((challenge.prompt.clone(), challenge.output.clone()));
            }
        }
    }

    Ok(buckets)
}

/// Flatten the keypress positions of one layout out of the merged trial.
/// Entries without keypresses or press positions are tolerated silently:
/// trial files across the study do not share a uniform schema.
pub fn extract_layout_positions(
    merged: &MergedTrial,
    layout: Layout,
    include_practice: bool,
) -> Vec<[f64; 3]> {
    let mut out = Vec::new();
    for entry in &merged.entries {
        let challenge = match entry.as_challenge() {
            Some(c) => c,
            None => continue,
        };
        if challenge.layout != layout {
            continue;
        }
        if challenge.kind == ChallengeKind::Practice && !include_practice {
            continue;
        }
        for kp in &challenge.keypresses {
            if let Some(pos) = kp.press_pos {
                out.push(pos);
            }
        }
    }
    out
}

/// Run the full aggregation and reduction. Every metric bucket is
/// outlier-rejected against its own unfiltered statistics; the travel pairs
/// reduce to three independently filtered subsets (actual marginal, ideal
/// marginal, per-sample PIT percentage).
pub fn build_study_data(
    logs: &[TrialLog],
    include_practice: bool,
    outlier_sigma: f64,
) -> SmResult<StudyData> {
    let buckets = collect_buckets(logs, include_practice)?;

    let merged = merge_trials(logs);
    debug!(meta = %merged.meta, sessions = logs.len(), "merged trial streams");

    let mut positions = HashMap::new();
    for layout in Layout::iter() {
        positions.insert(
            layout,
            extract_layout_positions(&merged, layout, include_practice),
        );
    }

    let empty: Vec<f64> = Vec::new();
    let mut rows = Vec::new();
    let mut clean_wpm = HashMap::new();
    let mut clean_awpm = HashMap::new();
    let mut clean_durations = HashMap::new();
    let mut actual_travel = HashMap::new();
    let mut ideal_travel = HashMap::new();
    let mut pit = HashMap::new();

    for layout in Layout::iter() {
        let posses = &positions[&layout];
        let axis_stat = |axis: usize| {
            let vals: Vec<f64> = posses.iter().map(|p| p[axis]).collect();
            summarize(&vals)
        };
        let pos = [axis_stat(0), axis_stat(1), axis_stat(2)];

        let wpm_clean = reject_outliers(buckets.wpm.get(&layout).unwrap_or(&empty), outlier_sigma);
        let wpm_stat = summarize(&wpm_clean);
        clean_wpm.insert(layout, wpm_clean);

        let awpm_clean =
            reject_outliers(buckets.awpm.get(&layout).unwrap_or(&empty), outlier_sigma);
        let awpm_stat = summarize(&awpm_clean);
        clean_awpm.insert(layout, awpm_clean);

        let dur_clean = reject_outliers(
            buckets.durations.get(&layout).unwrap_or(&empty),
            outlier_sigma,
        );
        clean_durations.insert(layout, dur_clean);

        let (travel_stat, pit_stat) = match buckets.pit.get(&layout) {
            Some(samples) => {
                let actuals: Vec<f64> = samples.iter().map(|s| s.actual).collect();
                let ideals: Vec<f64> = samples.iter().map(|s| s.ideal).collect();
                let ratios: Vec<f64> = samples
                    .iter()
                    .map(|s| 100.0 * s.actual / s.ideal)
                    .collect();

                let actual_clean = reject_outliers(&actuals, outlier_sigma);
                let travel_stat = summarize(&actual_clean);
                actual_travel.insert(layout, actual_clean);

                ideal_travel.insert(layout, reject_outliers(&ideals, outlier_sigma));

                let pit_clean = reject_outliers(&ratios, outlier_sigma);
                let pit_stat = summarize(&pit_clean);
                pit.insert(layout, pit_clean);

                (Some(travel_stat), Some(pit_stat))
            }
            None => (None, None),
        };

        rows.push(SummaryRow {
            layout,
            pos,
            wpm: wpm_stat,
            awpm: awpm_stat,
            travel: travel_stat,
            pit: pit_stat,
        });
    }

    Ok(StudyData {
        header: summary_header(),
        rows,
        positions,
        wpm: clean_wpm,
        awpm: clean_awpm,
        durations: clean_durations,
        actual_travel,
        ideal_travel,
        pit,
        blind_io: buckets.blind_io,
    })
}
