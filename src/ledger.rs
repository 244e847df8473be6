//! Accumulation of parsed notices into the two published date maps.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, error, info};

use crate::consts::{GRANTED_ARTIFACT, REVOKED_ARTIFACT};
use crate::date::ProclaimedDate;
use crate::error::NoticeError;
use crate::notice::{Notice, NoticeId};
use crate::parser::HolidayDates;

/// Dates per notice, ordered by notice id
pub type DateMap = BTreeMap<NoticeId, Vec<ProclaimedDate>>;

/// Receives every notice failure before it is returned to the caller.
///
/// Implementations forward to whatever alerting channel the host uses. `()`
/// discards failures.
pub trait FailureNotifier: Send + Sync {
    fn notice_failed(&self, error: &NoticeError);
}

impl FailureNotifier for () {
    fn notice_failed(&self, _error: &NoticeError) {}
}

/// Granted and revoked dates of every notice processed in one run.
///
/// Each map has its own lock. Writers always take granted before revoked, so
/// the ledger can be shared between worker threads.
#[derive(Debug, Default)]
pub struct HolidayLedger {
    granted: Mutex<DateMap>,
    revoked: Mutex<DateMap>,
}

impl HolidayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the dates of one notice.
    ///
    /// Both maps are locked (granted, then revoked) for the whole check and
    /// insert, so either both lists are recorded or neither is. Empty lists are
    /// not stored; a missing entry compares equal to an empty list. Recording
    /// the same dates for an id again is a no-op.
    ///
    /// # Errors
    /// Returns `NoticeError::DuplicateNotice` if the id is already recorded
    /// with different granted or revoked dates.
    pub fn record(&self, id: &NoticeId, dates: &HolidayDates) -> Result<(), NoticeError> {
        let mut granted = lock(&self.granted);
        let mut revoked = lock(&self.revoked);

        if granted.contains_key(id) || revoked.contains_key(id) {
            let previous_granted = granted.get(id).map_or(&[][..], Vec::as_slice);
            let previous_revoked = revoked.get(id).map_or(&[][..], Vec::as_slice);
            if previous_granted == dates.granted.as_slice()
                && previous_revoked == dates.revoked.as_slice()
            {
                return Ok(());
            }
            error!(
                notice = %id,
                ?previous_granted,
                ?previous_revoked,
                current = ?dates,
                "the same notice was processed twice"
            );
            return Err(NoticeError::DuplicateNotice { id: id.clone() });
        }

        if !dates.granted.is_empty() {
            granted.insert(id.clone(), dates.granted.clone());
        }
        if !dates.revoked.is_empty() {
            revoked.insert(id.clone(), dates.revoked.clone());
        }
        Ok(())
    }

    /// Parses `notice` and records its dates.
    ///
    /// Any failure is passed to `notifier` and then returned; a run that sees
    /// one should fail as a whole rather than publish incomplete maps.
    pub fn ingest(
        &self,
        notice: &Notice,
        notifier: &dyn FailureNotifier,
    ) -> Result<HolidayDates, NoticeError> {
        let result = notice.parse().and_then(|dates| {
            self.record(&notice.id, &dates)?;
            Ok(dates)
        });

        match &result {
            Ok(dates) => debug!(notice = %notice.id, ?dates, "parsed notice"),
            Err(err) => {
                error!(notice = %notice.id, error = %err, "failed to process notice");
                notifier.notice_failed(err);
            }
        }
        result
    }

    /// Snapshot of the granted dates recorded so far
    pub fn granted(&self) -> DateMap {
        lock(&self.granted).clone()
    }

    /// Snapshot of the revoked dates recorded so far
    pub fn revoked(&self) -> DateMap {
        lock(&self.revoked).clone()
    }

    /// The granted map as the JSON object published under `GRANTED_ARTIFACT`
    pub fn granted_json(&self) -> Result<String, NoticeError> {
        Ok(serde_json::to_string(&*lock(&self.granted))?)
    }

    /// The revoked map as the JSON object published under `REVOKED_ARTIFACT`
    pub fn revoked_json(&self) -> Result<String, NoticeError> {
        Ok(serde_json::to_string(&*lock(&self.revoked))?)
    }

    /// Both artifacts as (object name, JSON body) pairs, ready for upload.
    pub fn artifacts(&self) -> Result<[(&'static str, String); 2], NoticeError> {
        let artifacts = [
            (GRANTED_ARTIFACT, self.granted_json()?),
            (REVOKED_ARTIFACT, self.revoked_json()?),
        ];
        info!(
            granted = lock(&self.granted).len(),
            revoked = lock(&self.revoked).len(),
            "rendered holiday artifacts"
        );
        Ok(artifacts)
    }
}

// A poisoned map still holds only complete inserts
fn lock(map: &Mutex<DateMap>) -> std::sync::MutexGuard<'_, DateMap> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(year: u16, month: u8, day: u8) -> ProclaimedDate {
        ProclaimedDate::new(year, month, day).unwrap()
    }

    fn jubilee() -> Notice {
        Notice::new(
            NoticeId::new("3986291"),
            "By the Queen A Proclamation appointing Thursday 2nd June 2022 in place of Monday \
             30th May 2022 and Friday 3rd June 2022 as bank holidays in England, Wales, \
             Scotland and Northern Ireland.",
        )
    }

    #[derive(Default)]
    struct CountingNotifier(AtomicUsize);

    impl FailureNotifier for CountingNotifier {
        fn notice_failed(&self, _error: &NoticeError) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_ingest_records_both_maps() {
        let ledger = HolidayLedger::new();
        ledger.ingest(&jubilee(), &()).unwrap();

        let id = NoticeId::new("3986291");
        assert_eq!(
            ledger.granted().get(&id),
            Some(&vec![date(2022, 6, 2), date(2022, 6, 3)])
        );
        assert_eq!(ledger.revoked().get(&id), Some(&vec![date(2022, 5, 30)]));
    }

    #[test]
    fn test_empty_lists_are_not_recorded() {
        let ledger = HolidayLedger::new();
        let notice = Notice::new(
            NoticeId::new("1"),
            "a proclamation appointing monday 27th december 2021 as a bank holiday in england.",
        );
        ledger.ingest(&notice, &()).unwrap();
        assert_eq!(ledger.granted().len(), 1);
        assert!(ledger.revoked().is_empty());
    }

    #[test]
    fn test_identical_record_is_a_no_op() {
        let ledger = HolidayLedger::new();
        ledger.ingest(&jubilee(), &()).unwrap();
        ledger.ingest(&jubilee(), &()).unwrap();
        assert_eq!(ledger.granted().len(), 1);
    }

    #[test]
    fn test_duplicate_with_different_dates_fails() {
        let ledger = HolidayLedger::new();
        let notifier = CountingNotifier::default();
        let id = NoticeId::new("42");
        let first = HolidayDates {
            granted: vec![date(2021, 12, 27)],
            revoked: vec![],
        };
        let second = HolidayDates {
            granted: vec![date(2021, 12, 28)],
            revoked: vec![],
        };
        ledger.record(&id, &first).unwrap();
        assert!(matches!(
            ledger.record(&id, &second),
            Err(NoticeError::DuplicateNotice { .. })
        ));
        assert_eq!(ledger.granted().get(&id), Some(&first.granted));

        let clash = Notice::new(
            id.clone(),
            "appointing tuesday 28th december 2021 as a bank holiday in england.",
        );
        let err = ledger.ingest(&clash, &notifier).unwrap_err();
        assert_eq!(err.notice_id(), Some(&id));
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_added_revoked_dates_are_a_duplicate() {
        let ledger = HolidayLedger::new();
        let id = NoticeId::new("X");
        let first = HolidayDates {
            granted: vec![date(2022, 6, 2)],
            revoked: vec![],
        };
        let second = HolidayDates {
            granted: vec![date(2022, 6, 2)],
            revoked: vec![date(2022, 5, 30)],
        };
        ledger.record(&id, &first).unwrap();
        assert!(matches!(
            ledger.record(&id, &second),
            Err(NoticeError::DuplicateNotice { .. })
        ));
        assert!(ledger.revoked().is_empty());
        assert_eq!(ledger.granted().get(&id), Some(&first.granted));
    }

    #[test]
    fn test_rejected_record_writes_nothing() {
        let ledger = HolidayLedger::new();
        let id = NoticeId::new("Y");
        let first = HolidayDates {
            granted: vec![],
            revoked: vec![date(2022, 5, 30)],
        };
        let second = HolidayDates {
            granted: vec![date(2022, 6, 2)],
            revoked: vec![date(2022, 5, 31)],
        };
        ledger.record(&id, &first).unwrap();
        assert!(matches!(
            ledger.record(&id, &second),
            Err(NoticeError::DuplicateNotice { .. })
        ));
        assert!(ledger.granted().is_empty());
        assert_eq!(ledger.revoked().get(&id), Some(&first.revoked));
    }

    #[test]
    fn test_parse_failure_is_notified_and_not_recorded() {
        let ledger = HolidayLedger::new();
        let notifier = CountingNotifier::default();
        let notice = Notice::new(NoticeId::new("7"), "a random memo about cats");

        let err = ledger.ingest(&notice, &notifier).unwrap_err();
        assert!(matches!(err, NoticeError::Parse { .. }));
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
        assert!(ledger.granted().is_empty());
        assert!(ledger.revoked().is_empty());
    }

    #[test]
    fn test_artifacts_json() {
        let ledger = HolidayLedger::new();
        ledger.ingest(&jubilee(), &()).unwrap();

        let [(granted_name, granted), (revoked_name, revoked)] = ledger.artifacts().unwrap();
        assert_eq!(granted_name, "proclaimed_bhs.json");
        assert_eq!(granted, r#"{"3986291":["2022-06-02","2022-06-03"]}"#);
        assert_eq!(revoked_name, "proclaimed_not_bhs.json");
        assert_eq!(revoked, r#"{"3986291":["2022-05-30"]}"#);

        let restored: DateMap = serde_json::from_str(&granted).unwrap();
        assert_eq!(restored, ledger.granted());
    }

    #[test]
    fn test_concurrent_ingest() {
        let ledger = HolidayLedger::new();
        let notices: Vec<Notice> = (1..=28u8)
            .map(|day| {
                Notice::new(
                    NoticeId::new(format!("notice-{day}")),
                    format!("appointing {day} february 2030 as a bank holiday in england."),
                )
            })
            .collect();

        std::thread::scope(|scope| {
            for chunk in notices.chunks(5) {
                let ledger = &ledger;
                scope.spawn(move || {
                    for notice in chunk {
                        ledger.ingest(notice, &()).unwrap();
                    }
                });
            }
        });

        let granted = ledger.granted();
        assert_eq!(granted.len(), 28);
        assert_eq!(
            granted.get(&NoticeId::new("notice-14")),
            Some(&vec![date(2030, 2, 14)])
        );
    }
}
