//! Entry validation for new links.
//!
//! This is the single boundary enforcing name uniqueness and parent
//! existence. The tree builder does not re-check either.

use std::collections::HashSet;
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use crate::domain::error::DomainError;
use crate::domain::record::{FlatRecord, RecordDraft};

/// Optional http(s) scheme, domain name or IPv4 address, then optional port,
/// path, query string and fragment.
const URL_PATTERN: &str = r"(?i)^(https?://)?((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))(:\d+)?(/[-a-z\d%_.~+]*)*(\?[;&a-z\d%_.~+=-]*)?(#[-a-z\d_]*)?$";

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"))
}

pub fn is_valid_url(url: &str) -> bool {
    url_regex().is_match(url)
}

/// Validates a draft against the existing collection and returns the record
/// to append.
///
/// Fields are trimmed and blank optionals become `None`. Checks run in
/// order: name populated, name unused, url well-formed, parent existing.
pub fn validate_new_record(
    existing: &[FlatRecord],
    draft: &RecordDraft,
) -> Result<FlatRecord, DomainError> {
    let name = draft.name.trim();
    let url = non_blank(draft.url.as_deref());
    let parent = non_blank(draft.parent.as_deref());

    if name.is_empty() {
        return Err(DomainError::EmptyName);
    }
    if existing.iter().any(|r| r.name == name) {
        return Err(DomainError::DuplicateName(name.to_string()));
    }
    if let Some(url) = url {
        if !is_valid_url(url) {
            return Err(DomainError::InvalidUrl(url.to_string()));
        }
    }
    if let Some(parent) = parent {
        if !existing.iter().any(|r| r.name == parent) {
            return Err(DomainError::UnknownParent(parent.to_string()));
        }
    }

    Ok(FlatRecord {
        name: name.to_string(),
        url: url.map(str::to_string),
        parent_name: parent.map(str::to_string),
    })
}

/// Names occurring more than once, in first-occurrence order.
pub fn duplicate_names(records: &[FlatRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !seen.insert(r.name.as_str()))
        .map(|r| r.name.clone())
        .unique()
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn existing() -> Vec<FlatRecord> {
        vec![
            FlatRecord::new("Work"),
            FlatRecord::new("Email").with_parent("Work"),
        ]
    }

    fn draft(name: &str, url: Option<&str>, parent: Option<&str>) -> RecordDraft {
        RecordDraft {
            name: name.to_string(),
            url: url.map(str::to_string),
            parent: parent.map(str::to_string),
        }
    }

    #[rstest]
    #[case("https://mail.example.com")]
    #[case("http://example.com:8080/path/to?x=1&y=2#top")]
    #[case("example.org")]
    #[case("192.168.0.1/admin")]
    #[case("HTTPS://EXAMPLE.COM")]
    fn given_well_formed_url_when_checking_then_accepts(#[case] url: &str) {
        assert!(is_valid_url(url), "{url} should be valid");
    }

    #[rstest]
    #[case("not a url")]
    #[case("localhost")]
    #[case("ftp://example.com")]
    #[case("https://")]
    fn given_malformed_url_when_checking_then_rejects(#[case] url: &str) {
        assert!(!is_valid_url(url), "{url} should be invalid");
    }

    #[test]
    fn given_valid_draft_when_validating_then_trims_fields() {
        let record = validate_new_record(
            &existing(),
            &draft("  Calendar ", Some(" https://cal.example.com "), Some("Work ")),
        )
        .unwrap();
        assert_eq!(
            record,
            FlatRecord::new("Calendar")
                .with_url("https://cal.example.com")
                .with_parent("Work")
        );
    }

    #[test]
    fn given_blank_optionals_when_validating_then_become_none() {
        let record =
            validate_new_record(&existing(), &draft("Home", Some("  "), Some(""))).unwrap();
        assert!(record.url.is_none());
        assert!(record.is_root_level());
    }

    #[rstest]
    #[case(draft("   ", None, None), DomainError::EmptyName)]
    #[case(draft("Email", None, None), DomainError::DuplicateName("Email".into()))]
    #[case(draft("Bad", Some("no way"), None), DomainError::InvalidUrl("no way".into()))]
    #[case(draft("Kid", None, Some("Nobody")), DomainError::UnknownParent("Nobody".into()))]
    fn given_invalid_draft_when_validating_then_returns_error(
        #[case] draft: RecordDraft,
        #[case] expected: DomainError,
    ) {
        assert_eq!(validate_new_record(&existing(), &draft), Err(expected));
    }

    #[test]
    fn given_repeated_names_when_scanning_then_lists_each_once() {
        let records = vec![
            FlatRecord::new("a"),
            FlatRecord::new("b"),
            FlatRecord::new("a"),
            FlatRecord::new("a"),
            FlatRecord::new("b"),
        ];
        assert_eq!(duplicate_names(&records), vec!["a", "b"]);
        assert!(duplicate_names(&existing()).is_empty());
    }
}
