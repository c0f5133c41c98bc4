//! Binary search over sorted slices with an optional nearest-neighbour fallback.

use std::cmp::Ordering;

/// What to return when the target is not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchBias {
    /// Only exact matches.
    #[default]
    Exact,
    /// Index of the greatest element smaller than the target.
    Forward,
    /// Index of the smallest element greater than the target.
    Backward,
}

/// Searches the ascending `sorted` slice for `target`.
///
/// ```
/// use utilkit::domain::search::{binary_search_index, SearchBias};
///
/// let odd = [1, 3, 5, 7, 9];
/// assert_eq!(binary_search_index(&odd, &5, SearchBias::Exact), Some(2));
/// assert_eq!(binary_search_index(&odd, &6, SearchBias::Forward), Some(2));
/// assert_eq!(binary_search_index(&odd, &6, SearchBias::Backward), Some(3));
/// ```
pub fn binary_search_index<T: PartialOrd>(sorted: &[T], target: &T, bias: SearchBias) -> Option<usize> {
    let mut low = 0usize;
    let mut high = sorted.len();
    let mut nearest = None;

    while low < high {
        let mid = low + (high - low) / 2;
        match sorted[mid].partial_cmp(target) {
            Some(Ordering::Equal) => return Some(mid),
            Some(Ordering::Less) => {
                if bias == SearchBias::Forward {
                    nearest = Some(mid);
                }
                low = mid + 1;
            }
            Some(Ordering::Greater) => {
                if bias == SearchBias::Backward {
                    nearest = Some(mid);
                }
                high = mid;
            }
            // unordered (NaN): nothing sensible to bisect on
            None => return None,
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ODD: [i32; 10] = [1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

    #[rstest]
    #[case(5, SearchBias::Exact, Some(2))]
    #[case(4, SearchBias::Exact, None)]
    #[case(4, SearchBias::Forward, Some(1))]
    #[case(4, SearchBias::Backward, Some(2))]
    #[case(0, SearchBias::Forward, None)]
    #[case(0, SearchBias::Backward, Some(0))]
    #[case(20, SearchBias::Forward, Some(9))]
    #[case(20, SearchBias::Backward, None)]
    #[case(19, SearchBias::Backward, Some(9))]
    fn test_binary_search_index(#[case] target: i32, #[case] bias: SearchBias, #[case] expected: Option<usize>) {
        assert_eq!(binary_search_index(&ODD, &target, bias), expected);
    }

    #[test]
    fn test_binary_search_index_on_empty_slice() {
        let empty: [f64; 0] = [];
        assert_eq!(binary_search_index(&empty, &1.0, SearchBias::Forward), None);
    }
}
