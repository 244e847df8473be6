use tracing::{debug, error};

use super::HolidayDates;
use super::countries::skip_countries;
use super::date_list::date_list;
use crate::cursor::Cursor;
use crate::date::Polarity;
use crate::error::ProclamationError;

/// Phrases declaring the preceding dates bank holidays in the countries that
/// follow. The doubled "and public" variant appears in a published notice.
const HOLIDAY_CONNECTORS: &[&str] = &[
    " a bank holiday in ",
    " as bank holidays in ",
    " as a bank holiday in ",
    " as a bank and public holiday in ",
    " as a bank and public and public holiday in ",
];

/// Phrases that start another date-list clause after a country list
const CLAUSE_CONNECTORS: &[(&str, Polarity)] = &[
    (" and appointing ", Polarity::Granted),
    (" appointing ", Polarity::Granted),
    (" in the place of ", Polarity::Revoked),
    (" in place of ", Polarity::Revoked),
    (" instead of ", Polarity::Revoked),
];

/// Stripped from the end of the operative text, each at most once, in order
const TRAILER: &[&str] = &[".", " elizabeth r ", " elizabeth r", "."];

/// A clause some notices append after the signature. Everything from here on
/// carries no dates.
const TRAILING_BOILERPLATE: &str = " the proclamation of a bank holiday directly ";

/// Parses the body of a proclamation, everything after its preamble.
///
/// The whole body must be consumed: text left over once the known trailer
/// is stripped is an error rather than being ignored.
///
/// # Errors
/// - `UnexpectedTextInClause` if a date list is not followed by a
///   "...bank holiday in" phrase where one is required
/// - `UnexpectedTrailingText` if anything remains after the last clause
/// - any error from [`date_list`]
pub fn parse_proclamation(body: &str) -> Result<HolidayDates, ProclamationError> {
    let mut cursor = Cursor::new(body);
    let mut dates = HolidayDates::default();
    let mut next = Polarity::Granted;

    loop {
        let clause = date_list(&mut cursor, next)?;
        debug!(granted = ?clause.granted, revoked = ?clause.revoked, "parsed dates for clause");
        let clause_grants = !clause.granted.is_empty();
        dates.extend(clause);

        cursor.eat(",");

        // An "in place of" clause naming no new holidays has no country list
        let pure_negation =
            (next == Polarity::Revoked || !dates.revoked.is_empty()) && !clause_grants;
        if !pure_negation {
            if cursor.eat_any(HOLIDAY_CONNECTORS).is_none() {
                error!(text = cursor.rest(), "unexpected text within proclamation");
                return Err(ProclamationError::UnexpectedTextInClause(
                    cursor.rest().to_owned(),
                ));
            }
            skip_countries(&mut cursor);
        }

        cursor.eat(",");

        match cursor.eat_first(CLAUSE_CONNECTORS) {
            Some(polarity) => next = polarity,
            None => break,
        }
    }

    for literal in TRAILER {
        cursor.eat(literal);
    }
    if cursor.eat(TRAILING_BOILERPLATE) {
        cursor.finish();
    }

    if !cursor.is_empty() {
        error!(text = cursor.rest(), "unexpected extra text in proclamation");
        return Err(ProclamationError::UnexpectedTrailingText(
            cursor.rest().to_owned(),
        ));
    }

    Ok(dates)
}
