//! Recursive-descent parsing of the operative text of a proclamation.
//!
//! Each stage reads from a shared [`Cursor`](crate::cursor::Cursor) and either
//! consumes a recognized phrase or leaves the cursor where it was:
//!
//! - [`clause`]: one calendar date ("monday 27th december 2021")
//! - [`date_list`]: dates joined by connectors, with negation and year inheritance
//! - [`countries`]: the trailing list of constituent countries
//! - [`proclamation`]: repeated date-list / country-list clauses and the trailer

pub mod clause;
pub mod countries;
pub mod date_list;
pub mod proclamation;

use serde::{Deserialize, Serialize};

use crate::date::{Polarity, ProclaimedDate};

pub use clause::{NotADate, date_clause};
pub use countries::skip_countries;
pub use date_list::date_list;
pub use proclamation::parse_proclamation;

/// The dates a proclamation makes bank holidays and the dates it takes that
/// status away from, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayDates {
    pub granted: Vec<ProclaimedDate>,
    pub revoked: Vec<ProclaimedDate>,
}

impl HolidayDates {
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty() && self.revoked.is_empty()
    }

    pub(crate) fn push(&mut self, polarity: Polarity, date: ProclaimedDate) {
        match polarity {
            Polarity::Granted => self.granted.push(date),
            Polarity::Revoked => self.revoked.push(date),
        }
    }

    pub(crate) fn extend(&mut self, other: Self) {
        self.granted.extend(other.granted);
        self.revoked.extend(other.revoked);
    }
}
