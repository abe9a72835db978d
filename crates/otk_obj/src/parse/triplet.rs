//! Face corner (`v[/vt[/vn]]`) parsing and index normalization.

use crate::error::LoadError;
use crate::lexer::Token;

/// One face corner's references into the position/texcoord/normal arrays,
/// absolute and 0-based. [`IndexTriplet::OMITTED`] marks an attribute the
/// corner does not reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndexTriplet {
    pub v: u32,
    pub vt: u32,
    pub vn: u32,
}

impl IndexTriplet {
    pub const OMITTED: u32 = u32::MAX;
}

/// Splits a face token into its raw 1-based (possibly negative) indices.
/// `None` components were omitted. The position is mandatory.
fn split_face_token(text: &str) -> Option<(i32, Option<i32>, Option<i32>)> {
    let mut segments = text.splitn(3, '/');
    let v = segments.next()?.parse().ok()?;
    let vt = match segments.next() {
        None | Some("") => None,
        Some(s) => Some(s.parse().ok()?),
    };
    let vn = match segments.next() {
        None | Some("") => None,
        Some(s) => Some(s.parse().ok()?),
    };
    Some((v, vt, vn))
}

/// Converts a 1-based index (negative means counted back from the current
/// end) into an absolute 0-based index into an array of length `len`.
/// Zero and out-of-range indices are rejected.
fn normalize_index(raw: i32, len: usize) -> Option<u32> {
    if raw > 0 {
        let index = (raw - 1) as usize;
        (index < len).then_some(index as u32)
    } else if raw < 0 {
        len.checked_sub(raw.unsigned_abs() as usize)
            .map(|index| index as u32)
    } else {
        None
    }
}

/// Parses one face corner token against the current attribute array lengths.
pub(crate) fn parse_triplet(
    token: &Token<'_>,
    counts: (usize, usize, usize),
) -> crate::Result<IndexTriplet> {
    let (raw_v, raw_vt, raw_vn) =
        split_face_token(token.text).ok_or_else(|| LoadError::parse_face(token))?;
    let (num_v, num_vt, num_vn) = counts;
    let fix = |raw: Option<i32>, len: usize| match raw {
        None => Ok(IndexTriplet::OMITTED),
        Some(raw) => normalize_index(raw, len).ok_or_else(|| LoadError::parse_face(token)),
    };
    Ok(IndexTriplet {
        v: fix(Some(raw_v), num_v)?,
        vt: fix(raw_vt, num_vt)?,
        vn: fix(raw_vn, num_vn)?,
    })
}
