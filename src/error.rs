use crate::DateError;
use crate::notice::NoticeId;

/// Why the text of a single notice could not be parsed.
///
/// Every variant is final for that notice: parsing is deterministic, so the
/// same text fails the same way every time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProclamationError {
    /// The notice opens with none of the known proclamation preambles.
    #[error("Notice did not match any expected format")]
    UnrecognizedPreamble,

    /// A date list was not followed by a "...bank holiday in" phrase.
    #[error("Unexpected text within proclamation: '{0}'")]
    UnexpectedTextInClause(String),

    /// Text remained after the last clause and the signature.
    #[error("Unexpected extra text in proclamation: '{0}'")]
    UnexpectedTrailingText(String),

    /// A date list ended while a date without a year was still waiting for one.
    #[error("No year given for {0} or any date after it")]
    UnresolvedYear(String),

    #[error(transparent)]
    InvalidDate(#[from] DateError),
}

/// Failures raised while accumulating the results of many notices.
#[derive(Debug, thiserror::Error)]
pub enum NoticeError {
    #[error("Failed to process notice {id}: {source}")]
    Parse {
        id: NoticeId,
        #[source]
        source: ProclamationError,
    },

    /// The same notice id arrived twice with different dates.
    #[error("The same notice ({id}) was processed twice")]
    DuplicateNotice { id: NoticeId },

    #[error("Unable to get notice id from '{0}'")]
    InvalidNoticeId(String),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl NoticeError {
    /// The notice this error concerns, when one is known
    pub fn notice_id(&self) -> Option<&NoticeId> {
        match self {
            Self::Parse { id, .. } | Self::DuplicateNotice { id } => Some(id),
            Self::InvalidNoticeId(_) | Self::Serialize(_) => None,
        }
    }
}
