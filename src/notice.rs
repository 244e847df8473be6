//! Normalization of raw notice text and dispatch on its preamble.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::consts::FEED_ID_PREFIX;
use crate::cursor::Cursor;
use crate::error::{NoticeError, ProclamationError};
use crate::parser::{HolidayDates, parse_proclamation};
use crate::prelude::*;

/// Substring rewrites applied in order after case folding. Monarch and
/// country variants collapse into the single form the grammar expects.
const REWRITES: &[(&str, &str)] = &[
    ("king", "queen"),
    ("charles r", "elizabeth r"),
    ("wales", "england"),
    ("scotland", "england"),
    ("northern ireland", "england"),
    ("p roclamation", "proclamation"),
];

/// Everything from this word on is recital, not operative text
const RECITAL_MARKER: &str = "whereas";

/// Openings after which the proclamation body starts directly
const PREAMBLES: &[&str] = &[
    "by the queen a proclamation appointing ",
    "a proclamation appointing ",
    "proclamation by the queen a proclamation appointing ",
    "appointing ",
    "by the queen a proclamation elizabeth r. appointing ",
];

/// Either marker identifies a Northern Ireland order made by the Secretary
/// of State. "banking" has become "banqueen" by this point, hence the
/// shortened act name.
const ORDER_MARKERS: &[&str] = &[
    "proclamation by the secretary of state",
    "financial dealings act 1971",
];
const ORDER_PREAMBLE: &str = "order appointing ";

/// A notice carrying both markers asks for the great seal to be affixed and
/// names no dates of its own.
const GREAT_SEAL_MARKERS: &[&str] = &[
    "lord high chancellor of great britain",
    "great seal of the realm",
];

/// Identifier of a gazette notice
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Deref, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NoticeId(String);

impl NoticeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts the id from a feed entry such as
    /// `https://www.thegazette.co.uk/id/notice/4064186`.
    ///
    /// # Errors
    /// Returns `NoticeError::InvalidNoticeId` if the entry does not carry the
    /// gazette prefix or nothing follows it.
    pub fn from_feed_url(url: &str) -> Result<Self, NoticeError> {
        match url.strip_prefix(FEED_ID_PREFIX) {
            Some(id) if !id.is_empty() => Ok(Self::new(id)),
            _ => {
                error!(url, "unable to get notice id");
                Err(NoticeError::InvalidNoticeId(url.to_owned()))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A notice as retrieved: its id and the text of its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub text: String,
}

impl Notice {
    pub fn new(id: impl Into<NoticeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Parses the notice text, tagging any failure with the notice id.
    pub fn parse(&self) -> Result<HolidayDates, NoticeError> {
        debug!(notice = %self.id, "processing notice");
        parse_notice(&self.text).map_err(|source| NoticeError::Parse {
            id: self.id.clone(),
            source,
        })
    }
}

/// Reduces raw notice text to the single lowercase form the grammar is
/// written against.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = collapsed.to_lowercase();
    let operative = lowered
        .split_once(RECITAL_MARKER)
        .map_or(lowered.as_str(), |(operative, _)| operative);

    let mut text = operative.to_owned();
    for (from, to) in REWRITES {
        text = text.replace(from, to);
    }
    text.trim().to_owned()
}

enum Opening<'a> {
    Proclamation(&'a str),
    GreatSeal,
}

fn opening(text: &str) -> Option<Opening<'_>> {
    let mut cursor = Cursor::new(text);
    if cursor.eat_any(PREAMBLES).is_some() {
        return Some(Opening::Proclamation(cursor.rest()));
    }
    if ORDER_MARKERS.iter().any(|marker| text.contains(marker)) {
        if let Some((_, body)) = text.split_once(ORDER_PREAMBLE) {
            return Some(Opening::Proclamation(body));
        }
    }
    if GREAT_SEAL_MARKERS.iter().all(|marker| text.contains(marker)) {
        return Some(Opening::GreatSeal);
    }
    None
}

/// Parses a bank holiday proclamation notice and returns the dates made bank
/// holidays and the dates no longer bank holidays.
///
/// # Errors
/// `UnrecognizedPreamble` if the text opens like no known notice, otherwise
/// whatever [`parse_proclamation`] reports for the body.
pub fn parse_notice(raw: &str) -> Result<HolidayDates, ProclamationError> {
    let text = normalize(raw);
    debug!(text = %text, "cleaned up notice");

    match opening(&text) {
        Some(Opening::Proclamation(body)) => parse_proclamation(body),
        Some(Opening::GreatSeal) => {
            warn!("skipping notice relating to the great seal");
            Ok(HolidayDates::default())
        }
        None => {
            error!(text = %text, "notice did not match any expected format");
            Err(ProclamationError::UnrecognizedPreamble)
        }
    }
}
