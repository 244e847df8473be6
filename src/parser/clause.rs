use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::cursor::Cursor;
use crate::date::PartialDate;
use crate::prelude::*;
use crate::types::{Month, Year};

/// An optional leading space, an optional ignored word (usually the weekday,
/// sometimes followed by a comma), the day with any ordinal suffix, the month
/// name and an optional year.
const DATE_CLAUSE_PATTERN: &str =
    r"^ ?(?:[A-Za-z]+,? )?([0-9]+)[A-Za-z]* ([A-Za-z]+)(?: ([0-9]+))?";

#[allow(clippy::expect_used)]
static DATE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_CLAUSE_PATTERN).expect("date clause pattern compiles"));

/// The text at the cursor does not begin with a date.
///
/// This ends a date list; it is never an error on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "not a date")]
pub struct NotADate;

/// Matches one date at the very start of the cursor and moves past it.
///
/// On `NotADate` the cursor is left untouched. A match whose words do not
/// form a real date (unknown month, day 31 in June, a year outside
/// `1..=9999`) is also `NotADate`.
pub fn date_clause(cursor: &mut Cursor<'_>) -> Result<PartialDate, NotADate> {
    let text = cursor.rest();
    let Some(captures) = DATE_CLAUSE.captures(text) else {
        debug!(text, "no date at cursor, this is probably fine");
        return Err(NotADate);
    };
    let Some(date) = build_date(&captures) else {
        debug!(text, "date-like text is not a calendar date");
        return Err(NotADate);
    };
    if date.year().is_none() {
        debug!(text, "year not present in date");
    }

    cursor.advance(captures.get(0).map_or(0, |whole| whole.end()));
    Ok(date)
}

fn build_date(captures: &Captures<'_>) -> Option<PartialDate> {
    let day = captures.get(1)?.as_str().parse::<u8>().ok()?;
    let month = Month::from_name(captures.get(2)?.as_str())?;
    let year = match captures.get(3) {
        Some(year) => Some(Year::new(year.as_str().parse::<u16>().ok()?).ok()?),
        None => None,
    };
    PartialDate::new(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MONTH_NAMES;
    use proptest::prelude::*;

    struct TestCase {
        input: &'static str,
        expected: (Option<u16>, u8, u8),
        rest: &'static str,
    }

    fn parse(input: &str) -> Result<(PartialDate, &str), NotADate> {
        let mut cursor = Cursor::new(input);
        let date = date_clause(&mut cursor)?;
        Ok((date, cursor.rest()))
    }

    #[test]
    fn test_date_clause_cases() {
        let cases = [
            TestCase {
                input: "monday 27th december 2021 as a bank holiday in england.",
                expected: (Some(2021), 12, 27),
                rest: " as a bank holiday in england.",
            },
            TestCase {
                input: "27th december and 29th may 2017",
                expected: (None, 12, 27),
                rest: " and 29th may 2017",
            },
            TestCase {
                input: " friday 3rd june 2022",
                expected: (Some(2022), 6, 3),
                rest: "",
            },
            TestCase {
                input: "monday, 28th december 2015, and",
                expected: (Some(2015), 12, 28),
                rest: ", and",
            },
            TestCase {
                input: "2 june",
                expected: (None, 6, 2),
                rest: "",
            },
            TestCase {
                input: "tuesday 29th february 2000.",
                expected: (Some(2000), 2, 29),
                rest: ".",
            },
        ];

        for case in &cases {
            let (date, rest) = parse(case.input)
                .unwrap_or_else(|_| panic!("expected a date in {:?}", case.input));
            let (year, month, day) = case.expected;
            assert_eq!(date.year().map(Year::get), year, "year of {:?}", case.input);
            assert_eq!(date.month().get(), month, "month of {:?}", case.input);
            assert_eq!(date.day().get(), day, "day of {:?}", case.input);
            assert_eq!(rest, case.rest, "remainder of {:?}", case.input);
        }
    }

    #[test]
    fn test_not_a_date() {
        for input in [
            "",
            " as bank holidays in england",
            "a random memo about cats",
            "27th smarch 2021",
            "31st june 2022",
            "29th february 2021",
            "27th december 0",
            "300th december 2021",
            "27th december 99999",
        ] {
            let mut cursor = Cursor::new(input);
            assert_eq!(date_clause(&mut cursor), Err(NotADate), "{input:?}");
            assert_eq!(cursor.rest(), input, "cursor moved on {input:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_single_date_is_recognized(
            prefix in prop::sample::select(vec!["", " ", "monday ", "friday, ", " tuesday "]),
            day in 1u8..=28,
            ordinal in prop::sample::select(vec!["", "st", "nd", "rd", "th"]),
            month in 1u8..=12,
            year in prop::option::of(1850u16..=2150),
            tail in prop::sample::select(vec!["", ".", ",", " and ", " as a bank holiday in england."]),
        ) {
            let month_name = MONTH_NAMES[usize::from(month - 1)];
            let year_text = year.map(|y| format!(" {y}")).unwrap_or_default();
            let input = format!("{prefix}{day}{ordinal} {month_name}{year_text}{tail}");

            let (date, rest) = parse(&input).unwrap();
            prop_assert_eq!(date.year().map(Year::get), year);
            prop_assert_eq!(date.month().get(), month);
            prop_assert_eq!(date.day().get(), day);
            prop_assert_eq!(rest, tail);
        }
    }
}
