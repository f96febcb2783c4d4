//! Coordinate-convention suffixes for renamed functions.

use super::rules::{
    is_projection, CONVENTION_MARKERS, DEPTH_RANGE_SUFFIX, HANDED_FUNCTIONS, RIGHT_HANDED_SUFFIX,
};

/// Whether `name` already states a handedness or depth-range convention.
pub fn has_convention(name: &str) -> bool {
    CONVENTION_MARKERS.iter().any(|marker| name.contains(*marker))
}

/// Append `_RH` (and `_NO` for projections) after every handed function
/// fragment in `name`.
///
/// Fragments are visited in table order. When more than one matches, each is
/// suffixed independently; the 1.x API has no such name, so this only pins
/// the behavior.
pub fn annotate(name: &str) -> String {
    if has_convention(name) {
        return name.to_string();
    }

    let mut annotated = name.to_string();
    for &function in HANDED_FUNCTIONS {
        if !annotated.contains(function) {
            continue;
        }
        let mut suffixed = format!("{}{}", function, RIGHT_HANDED_SUFFIX);
        if is_projection(function) {
            suffixed.push_str(DEPTH_RANGE_SUFFIX);
        }
        annotated = annotated.replace(function, &suffixed);
    }
    annotated
}
