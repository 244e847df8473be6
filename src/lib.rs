//! Extraction of bank holiday dates from UK proclamation notices.
//!
//! A notice is normalized, recognized by its preamble and then parsed clause
//! by clause into the dates it makes bank holidays ("granted") and the dates
//! it takes that status away from ("revoked"). Any phrasing the grammar does
//! not know is an error; nothing is guessed.
//!
//! ```
//! use proclaimed_holidays::{ProclaimedDate, parse_notice};
//!
//! let dates = parse_notice(
//!     "A Proclamation appointing Monday 27th December 2021 as a bank holiday in England.",
//! )?;
//! assert_eq!(dates.granted, vec![ProclaimedDate::new(2021, 12, 27)?]);
//! assert!(dates.revoked.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod consts;
mod cursor;
mod date;
mod error;
mod ledger;
mod notice;
pub mod parser;
mod prelude;
mod types;

pub use consts::*;
pub use cursor::Cursor;
pub use date::{DateError, PartialDate, PendingDate, Polarity, ProclaimedDate};
pub use error::{NoticeError, ProclamationError};
pub use ledger::{DateMap, FailureNotifier, HolidayLedger};
pub use notice::{Notice, NoticeId, normalize, parse_notice};
pub use parser::{HolidayDates, NotADate};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
