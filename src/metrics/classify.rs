//! Error taxonomy for blind challenges.
//!
//! Each zipped prompt/output character pair is classified by the signed
//! displacement on the layout's key grid: "dipped" entries landed one cell
//! below the target on the second axis, "off-by-one" entries missed by a
//! single grid cell in total.

use crate::error::{MetricsError, SmResult};
use crate::geometry;
use crate::layouts::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorBreakdown {
    pub errors: usize,
    pub dipped: usize,
    pub off_by_one: usize,
}

impl ErrorBreakdown {
    pub fn dipped_pct(&self) -> f64 {
        100.0 * self.dipped as f64 / self.errors as f64
    }

    pub fn off_by_one_pct(&self) -> f64 {
        100.0 * self.off_by_one as f64 / self.errors as f64
    }
}

/// Classify a layout's blind (prompt, output) pairs. Returns None when the
/// layout produced no errors at all, so the percentages stay well-defined.
/// TiltType and ArcType classify on the tilt grid; everything else uses the
/// Raycast board, where a character without a grid cell is malformed data.
pub fn classify_errors(layout: Layout, pairs: &[(String, String)]) -> SmResult<Option<ErrorBreakdown>> {
    let mut breakdown = ErrorBreakdown {
        errors: 0,
        dipped: 0,
        off_by_one: 0,
    };

    for (prompt, output) in pairs {
        for (p, o) in prompt.chars().zip(output.chars()) {
            let (a, b) = match layout {
                Layout::TiltType | Layout::ArcType => geometry::tilttype_displacement(p, o, true)?,
                _ => {
                    let pp = geometry::raycast_pos(p)
                        .ok_or(MetricsError::InvalidCharacter(p, Layout::Raycast))?;
                    let oo = geometry::raycast_pos(o)
                        .ok_or(MetricsError::InvalidCharacter(o, Layout::Raycast))?;
                    (pp.0 - oo.0, pp.1 - oo.1)
                }
            };

            if b == -1 {
                breakdown.dipped += 1;
            }
            if a.abs() + b.abs() == 1 {
                breakdown.off_by_one += 1;
            }
            if p != o {
                breakdown.errors += 1;
            }
        }
    }

    if breakdown.errors == 0 {
        return Ok(None);
    }
    Ok(Some(breakdown))
}
