use crate::cursor::Cursor;

/// Normalization folds every constituent country into "england", so these
/// are the only forms a country list can take.
const COUNTRY_FORMS: &[&str] = &["england", ", england", " and england", ", and england"];

/// Skips a run of country names and returns how many were skipped.
pub fn skip_countries(cursor: &mut Cursor<'_>) -> usize {
    let mut skipped = 0;
    while cursor.eat_any(COUNTRY_FORMS).is_some() {
        skipped += 1;
    }
    skipped
}
