use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The four input-method variants under study. Trial logs spell these exactly
/// as the variant names, so serde and strum both use the verbatim identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum Layout {
    SliderOnly,
    ArcType,
    TiltType,
    Raycast,
}

impl Layout {
    /// ArcType and TiltType carry rotational ideal-travel models; the other
    /// two do not participate in travel/PIT metrics.
    pub fn has_travel_model(&self) -> bool {
        matches!(self, Self::ArcType | Self::TiltType)
    }
}
