use crate::layouts::Layout;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One recorded session file. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct TrialLog {
    #[serde(default)]
    pub meta: Option<serde_yaml_ng::Value>,
    pub trial: Vec<TrialEntry>,
}

/// An entry in a session's ordered event stream. Commands are proctor events
/// (recenter, layout switch, ...) and never contribute metrics.
#[derive(Debug, Clone)]
pub enum TrialEntry {
    Challenge(Challenge),
    Command(serde_yaml_ng::Value),
}

// The logs store entries as single-key maps (`challenge: ...` / `command:
// ...`), which serde_yaml_ng only accepts for enums through its singleton_map
// adapter, so the derive is routed through it via a mirror enum.
impl<'de> Deserialize<'de> for TrialEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "lowercase")]
        enum Tagged {
            Challenge(Challenge),
            Command(serde_yaml_ng::Value),
        }

        Ok(
            match serde_yaml_ng::with::singleton_map::deserialize(deserializer)? {
                Tagged::Challenge(c) => TrialEntry::Challenge(c),
                Tagged::Command(v) => TrialEntry::Command(v),
            },
        )
    }
}

impl TrialEntry {
    pub fn as_challenge(&self) -> Option<&Challenge> {
        match self {
            TrialEntry::Challenge(c) => Some(c),
            TrialEntry::Command(_) => None,
        }
    }
}

/// Task types observed in the logs. Anything that is neither a practice run
/// nor a blind entry counts as a standard challenge, whatever the log calls
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    Practice,
    Blind,
    Standard,
}

impl<'de> Deserialize<'de> for ChallengeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "Practice" => ChallengeKind::Practice,
            "Blind" => ChallengeKind::Blind,
            _ => ChallengeKind::Standard,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Challenge {
    pub layout: Layout,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: ChallengeKind,
    pub prompt: String,
    pub output: String,
    pub time: TimeInfo,
    #[serde(default, deserialize_with = "ordered_keypresses")]
    pub keypresses: Vec<Keypress>,
}

fn default_kind() -> ChallengeKind {
    ChallengeKind::Standard
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeInfo {
    pub duration: f64,
}

/// A single keypress record. Both fields are optional: older trial files
/// predate position capture, and slider keypresses carry no rotation.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Keypress {
    #[serde(rename = "pressPos", default)]
    pub press_pos: Option<[f64; 3]>,
    #[serde(default)]
    pub travel: Option<Travel>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Travel {
    #[serde(default)]
    pub rot: Option<[f64; 3]>,
}

/// The logs key keypresses by timestamp id, but only the records themselves
/// are ever consumed. Document order is temporal order, so we keep a Vec and
/// discard the keys.
fn ordered_keypresses<'de, D>(deserializer: D) -> Result<Vec<Keypress>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KeypressMapVisitor;

    impl<'de> Visitor<'de> for KeypressMapVisitor {
        type Value = Vec<Keypress>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of keypress ids to keypress records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, kp)) = map.next_entry::<IgnoredAny, Keypress>()? {
                out.push(kp);
            }
            Ok(out)
        }

        // Some sessions serialize an empty keypress table as null.
        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(KeypressMapVisitor)
}

/// A virtual trial made by concatenating every session's event stream.
/// Session metadata does not survive the merge; the marker is kept purely as
/// a diagnostic placeholder.
#[derive(Debug, Clone)]
pub struct MergedTrial {
    pub meta: String,
    pub entries: Vec<TrialEntry>,
}

pub fn merge_trials(logs: &[TrialLog]) -> MergedTrial {
    let entries = logs
        .iter()
        .flat_map(|log| log.trial.iter().cloned())
        .collect();
    MergedTrial {
        meta: "lost in merge".to_string(),
        entries,
    }
}
