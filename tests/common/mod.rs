#![allow(dead_code)]

use stylus_metrics::layouts::Layout;
use stylus_metrics::trial::{
    Challenge, ChallengeKind, Keypress, TimeInfo, Travel, TrialEntry, TrialLog,
};

pub fn keypress(pos: Option<[f64; 3]>, rot: Option<[f64; 3]>) -> Keypress {
    Keypress {
        press_pos: pos,
        travel: rot.map(|rot| Travel { rot: Some(rot) }),
    }
}

pub fn challenge(
    layout: Layout,
    kind: ChallengeKind,
    prompt: &str,
    output: &str,
    duration: f64,
    keypresses: Vec<Keypress>,
) -> Challenge {
    Challenge {
        layout,
        kind,
        prompt: prompt.to_string(),
        output: output.to_string(),
        time: TimeInfo { duration },
        keypresses,
    }
}

pub fn log_of(entries: Vec<TrialEntry>) -> TrialLog {
    TrialLog {
        meta: None,
        trial: entries,
    }
}
