//! Sequence reordering helpers.
//!
//! All functions except [`move_one`] are pure: they clone into a fresh `Vec`
//! and leave the input untouched. Selection is always by position, so equal
//! values at different indices are never confused with each other.

use itertools::Itertools;
use serde_json::Value;
use tracing::{instrument, trace};

/// Moves the elements at `indices` as one contiguous block in front of the
/// element that originally sat at `destination`.
///
/// The block keeps the relative order the elements had in `sequence`, no
/// matter how `indices` is ordered. Indices outside `0..sequence.len()` are
/// ignored, duplicates count once. A `destination` at or past the end
/// appends the block.
///
/// ```
/// use utilkit::domain::reorder::move_group;
///
/// assert_eq!(move_group(&[1, 2, 3, 4, 5], &[1, 2], 4), vec![1, 4, 2, 3, 5]);
/// assert_eq!(move_group(&[1, 2, 3, 4, 5], &[2, 4], 1), vec![1, 3, 5, 2, 4]);
/// ```
#[instrument(level = "trace", skip(sequence))]
pub fn move_group<T: Clone>(sequence: &[T], indices: &[usize], destination: usize) -> Vec<T> {
    let mut selected = vec![false; sequence.len()];
    for &idx in indices {
        if let Some(slot) = selected.get_mut(idx) {
            *slot = true;
        }
    }

    let block: Vec<&T> = sequence
        .iter()
        .zip(&selected)
        .filter_map(|(item, &picked)| picked.then_some(item))
        .collect();
    trace!("moving {} of {} elements", block.len(), sequence.len());

    let destination = destination.min(sequence.len());
    let mut result = Vec::with_capacity(sequence.len());
    for (idx, item) in sequence.iter().enumerate() {
        if idx == destination {
            result.extend(block.iter().map(|&item| item.clone()));
        }
        if !selected[idx] {
            result.push(item.clone());
        }
    }
    if destination == sequence.len() {
        result.extend(block.iter().map(|&item| item.clone()));
    }
    result
}

/// Returns a copy of `sequence` with the first element matching `predicate`
/// moved to the front. Without a match the copy is unchanged.
pub fn move_to_start<T, P>(sequence: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    let mut result = sequence.to_vec();
    if let Some(idx) = sequence.iter().position(predicate) {
        move_one(&mut result, idx as isize, 0);
    }
    result
}

/// Removes the element at `from` and reinserts it at `to`, in place.
///
/// Negative indices count from the end (`-1` is the last element). An
/// out-of-range `from` leaves the sequence untouched; `to` is clamped into
/// the valid insertion range.
pub fn move_one<T>(sequence: &mut Vec<T>, from: isize, to: isize) {
    let len = sequence.len() as isize;
    let start = if from < 0 { len + from } else { from };
    if start < 0 || start >= len {
        trace!(from, len, "source index out of range, nothing moved");
        return;
    }
    let end = if to < 0 { len + to } else { to };

    let item = sequence.remove(start as usize);
    let end = end.clamp(0, sequence.len() as isize) as usize;
    sequence.insert(end, item);
}

/// Non-mutating variant of [`move_one`].
pub fn move_immutable<T: Clone>(sequence: &[T], from: isize, to: isize) -> Vec<T> {
    let mut result = sequence.to_vec();
    move_one(&mut result, from, to);
    result
}

/// `Some(items)` only when `items` is present and holds at least one element.
pub fn non_empty<T>(items: Option<&[T]>) -> Option<&[T]> {
    items.filter(|items| !items.is_empty())
}

/// Finds the smallest positive serial number not yet used by `<prefix><n>`
/// values in `field` of the given records.
///
/// A bare `prefix` counts as serial 1. Values with other prefixes, non-string
/// values and suffixes without leading digits are ignored. Returns
/// `default_no` when nothing matches.
#[instrument(level = "debug", skip(records))]
pub fn unused_min_serial_number(records: &[Value], field: &str, prefix: &str, default_no: u64) -> u64 {
    let serials: Vec<u64> = records
        .iter()
        .filter_map(|record| record.get(field)?.as_str()?.strip_prefix(prefix))
        .filter_map(parse_serial)
        .filter(|&n| n > 0)
        .sorted()
        .dedup()
        .collect();

    if serials.is_empty() {
        return default_no;
    }

    serials
        .iter()
        .zip(1u64..)
        .find(|(serial, expected)| **serial != *expected)
        .map(|(_, expected)| expected)
        .unwrap_or(serials.len() as u64 + 1)
}

/// Leading-digit parse of a serial suffix; an empty suffix is serial 1.
fn parse_serial(suffix: &str) -> Option<u64> {
    if suffix.is_empty() {
        return Some(1);
    }
    let digits: String = suffix.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
