use tracing::debug;

use super::HolidayDates;
use super::clause::date_clause;
use crate::cursor::Cursor;
use crate::date::{PendingDate, Polarity};
use crate::error::ProclamationError;

/// Phrases that may follow a date inside a list, and the polarity they give
/// the next date. Longer phrases come before the shorter ones they contain.
const DATE_CONNECTORS: &[(&str, Polarity)] = &[
    (" in the place of ", Polarity::Revoked),
    (" in place of ", Polarity::Revoked),
    (" instead of ", Polarity::Revoked),
    (" and appointing ", Polarity::Granted),
    (" appointing ", Polarity::Granted),
    (" and ", Polarity::Granted),
];

/// Parses dates until the text no longer starts with one.
///
/// `first` is the polarity of the first date; each connector sets the
/// polarity of the date after it only. Yearless dates wait in order until a
/// later date in the same list carries a year, then all take that year and
/// join the polarity they were read with.
///
/// # Errors
/// - `UnresolvedYear` if the list ends while a yearless date is still waiting
/// - `InvalidDate` if the inherited year makes a waiting date impossible
pub fn date_list(
    cursor: &mut Cursor<'_>,
    first: Polarity,
) -> Result<HolidayDates, ProclamationError> {
    debug!(text = cursor.rest(), "parsing date list");
    let mut dates = HolidayDates::default();
    let mut pending: Vec<PendingDate> = Vec::new();
    let mut next = first;

    while let Ok(date) = date_clause(cursor) {
        match date.resolved() {
            None => pending.push(PendingDate {
                polarity: next,
                date,
            }),
            Some(resolved) => {
                for waiting in pending.drain(..) {
                    dates.push(waiting.polarity, waiting.stamp(resolved.year())?);
                }
                dates.push(next, resolved);
            }
        }

        next = Polarity::Granted;
        cursor.eat(",");
        if let Some(polarity) = cursor.eat_first(DATE_CONNECTORS) {
            next = polarity;
        }
    }

    match pending.first() {
        Some(waiting) => Err(ProclamationError::UnresolvedYear(format!(
            "{} {}",
            waiting.date.day(),
            waiting.date.month().name()
        ))),
        None => Ok(dates),
    }
}
