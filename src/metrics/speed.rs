use crate::error::{MetricsError, SmResult};
use crate::trial::Challenge;

/// Raw typing speed: entered length (in standard 5-character words, first
/// character free) over elapsed minutes. A non-positive duration means the
/// study data is corrupt and aborts the run.
pub fn words_per_minute(challenge: &Challenge) -> SmResult<f64> {
    let interval = challenge.time.duration;
    if interval <= 0.0 {
        return Err(MetricsError::NonPositiveDuration(interval));
    }
    let minutes_of_entry = interval / 60.0;
    let words_entered = challenge.output.chars().count().saturating_sub(1) as f64 / 5.0;
    Ok(words_entered / minutes_of_entry)
}

/// WPM scaled by positional accuracy: matching characters of the zipped
/// prompt/output pair over prompt length. An empty prompt degenerates to NaN
/// rather than panicking.
pub fn accurate_words_per_minute(challenge: &Challenge) -> SmResult<f64> {
    let matches = challenge
        .output
        .chars()
        .zip(challenge.prompt.chars())
        .filter(|(o, p)| o == p)
        .count();
    let accuracy = matches as f64 / challenge.prompt.chars().count() as f64;
    Ok(accuracy * words_per_minute(challenge)?)
}
