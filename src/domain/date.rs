//! Calendar helpers for chart period pickers.

use chrono::{Datelike, Local};

use crate::domain::error::{DomainError, DomainResult};

/// The current year in local time.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Every year from `start` to `end` inclusive; `end` defaults to the
/// current year.
///
/// An `end` before `start` is rejected.
pub fn range_of_years(start: i32, end: Option<i32>) -> DomainResult<Vec<i32>> {
    let end = end.unwrap_or_else(current_year);
    if end < start {
        return Err(DomainError::invalid_argument(format!(
            "end year {end} is before start year {start}"
        )));
    }
    Ok((start..=end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2019, 2023, vec![2019, 2020, 2021, 2022, 2023])]
    #[case(2020, 2020, vec![2020])]
    #[case(-1, 1, vec![-1, 0, 1])]
    fn test_range_of_years(#[case] start: i32, #[case] end: i32, #[case] expected: Vec<i32>) {
        assert_eq!(range_of_years(start, Some(end)).unwrap(), expected);
    }

    #[test]
    fn test_range_of_years_defaults_to_current_year() {
        let this_year = current_year();
        let years = range_of_years(2019, None).unwrap();
        assert_eq!(years.first(), Some(&2019));
        assert_eq!(years.last(), Some(&this_year));
        assert_eq!(years.len(), (this_year - 2019 + 1) as usize);
    }

    #[rstest]
    #[case(2023, 2019)]
    #[case(2020, 2019)]
    fn test_range_of_years_rejects_end_before_start(#[case] start: i32, #[case] end: i32) {
        assert!(matches!(
            range_of_years(start, Some(end)),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
