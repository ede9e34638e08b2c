//! Layout-specific ideal-travel models.
//!
//! Each model maps characters into an abstract key-grid coordinate space for
//! its layout. Ranges come from the study hardware: ArcType sweeps 45..145
//! degrees of arm rotation, TiltType pitches 5..12 degrees on x and rolls
//! 30..120 degrees on z.

use crate::error::{MetricsError, SmResult};
use crate::layouts::Layout;

pub const ARCTYPE_X_RANGE: f64 = 145.0 - 45.0;
pub const TILTTYPE_X_RANGE: f64 = 12.0 - 5.0;
pub const TILTTYPE_Z_RANGE: f64 = 120.0 - 30.0;

/// 26 letters packed four per bin: ceil(26 / 4).
pub const LETTER_BINS: f64 = 7.0;

const RAYCAST_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL;", "ZXCVBNM,. "];

/// TiltType key-grid cell for a character: letters row-major in a 4-column
/// grid, space on the sentinel cell outside the letter block.
pub fn tilttype_pos(c: char) -> SmResult<(i32, i32)> {
    if c == ' ' {
        return Ok((6, 3));
    }
    if !c.is_ascii_alphabetic() {
        return Err(MetricsError::InvalidCharacter(c, Layout::TiltType));
    }
    let delta = c.to_ascii_lowercase() as i32 - 'a' as i32;
    Ok((delta / 4, delta % 4))
}

/// ArcType bin for a character: one of 7 letter bins, space on bin 7.
pub fn arctype_bin(c: char) -> SmResult<i32> {
    if c == ' ' {
        return Ok(7);
    }
    if !c.is_ascii_alphabetic() {
        return Err(MetricsError::InvalidCharacter(c, Layout::ArcType));
    }
    Ok((c.to_ascii_lowercase() as i32 - 'a' as i32) / 4)
}

/// Raycast grid cell `(column, row)` on the fixed 3-row board, or None for a
/// character the board does not carry.
pub fn raycast_pos(c: char) -> Option<(i32, i32)> {
    let upper = c.to_ascii_uppercase();
    for (row_idx, row) in RAYCAST_ROWS.iter().enumerate() {
        if let Some(col) = row.find(upper) {
            return Some((col as i32, row_idx as i32));
        }
    }
    None
}

/// Component-wise displacement `pos(p) - pos(c)`. Signed mode preserves
/// direction for error-direction classification.
fn displace(p: (i32, i32), c: (i32, i32), signed: bool) -> (i32, i32) {
    if signed {
        (p.0 - c.0, p.1 - c.1)
    } else {
        ((p.0 - c.0).abs(), (p.1 - c.1).abs())
    }
}

pub fn tilttype_displacement(p: char, c: char, signed: bool) -> SmResult<(i32, i32)> {
    Ok(displace(tilttype_pos(p)?, tilttype_pos(c)?, signed))
}

pub fn raycast_displacement(p: char, c: char, signed: bool) -> Option<(i32, i32)> {
    Some(displace(raycast_pos(p)?, raycast_pos(c)?, signed))
}

/// Ideal ArcType travel for a prompt: consecutive-pair bin distances scaled
/// to degrees of arc. Empty and single-character prompts have no pairs.
pub fn arctype_ideal(prompt: &str) -> SmResult<f64> {
    let per_bin = ARCTYPE_X_RANGE / LETTER_BINS;
    let mut ideal = 0.0;
    let mut last: Option<char> = None;
    for c in prompt.chars() {
        if let Some(p) = last {
            ideal += (arctype_bin(p)? - arctype_bin(c)?).abs() as f64 * per_bin;
        }
        last = Some(c);
    }
    Ok(ideal)
}

/// Ideal TiltType travel accumulated as a 2D (x, z) vector over consecutive
/// prompt pairs.
pub fn tilttype_ideal_vector(prompt: &str) -> SmResult<(f64, f64)> {
    let mut acc = (0.0, 0.0);
    let mut last: Option<char> = None;
    for c in prompt.chars() {
        if let Some(p) = last {
            let (dx, dz) = tilttype_displacement(p, c, false)?;
            acc.0 += dx as f64 * TILTTYPE_X_RANGE / LETTER_BINS;
            acc.1 += dz as f64 * TILTTYPE_Z_RANGE / 4.0;
        }
        last = Some(c);
    }
    Ok(acc)
}

/// Euclidean norm of the accumulated TiltType ideal vector.
pub fn tilttype_ideal(prompt: &str) -> SmResult<f64> {
    let (x, z) = tilttype_ideal_vector(prompt)?;
    Ok((x * x + z * z).sqrt())
}
