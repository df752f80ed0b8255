//! Default publish-eligibility policy.
//!
//! Liveness is injected into [`crate::build_search_index`] as a predicate so
//! callers can swap policies; this module provides the default one: drafts
//! are never live, dated documents go live on their publish date, and
//! undated documents are always live.

use chrono::{NaiveDate, Utc};

use crate::SearchDocument;

/// Whether `doc` is publish-eligible as of `today`.
pub fn is_live(doc: &SearchDocument, today: NaiveDate) -> bool {
    if doc.draft {
        return false;
    }
    match doc.date {
        Some(date) => date <= today,
        None => true,
    }
}

/// The default predicate, evaluated against the current UTC date.
pub fn live_today() -> impl Fn(&SearchDocument) -> bool {
    let today = Utc::now().date_naive();
    move |doc| is_live(doc, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doc(draft: bool, date: Option<NaiveDate>) -> SearchDocument {
        SearchDocument {
            draft,
            date,
            ..Default::default()
        }
    }

    #[test]
    fn drafts_are_never_live() {
        assert!(!is_live(&doc(true, None), day(2019, 6, 24)));
        assert!(!is_live(&doc(true, Some(day(2019, 1, 1))), day(2019, 6, 24)));
    }

    #[test]
    fn future_dated_documents_are_not_live_yet() {
        let today = day(2019, 6, 24);
        assert!(!is_live(&doc(false, Some(day(2019, 6, 25))), today));
        assert!(is_live(&doc(false, Some(day(2019, 6, 24))), today));
        assert!(is_live(&doc(false, Some(day(2019, 6, 23))), today));
    }

    #[test]
    fn undated_documents_are_live() {
        assert!(is_live(&doc(false, None), day(2019, 6, 24)));
    }
}
