//! BWF tag expansion for probed metadata.
//!
//! Broadcast-wave recorders pack their a=v metadata into the RIFF
//! `comment` tag as CR-LF separated KEY=VALUE lines, and the BWF coding
//! history into a single delimited string. This module expands both into
//! structured form so downstream code never touches the raw blobs.

use std::collections::BTreeMap;

use super::types::{CodingHistory, ProbeReport};

/// Expand the `comment` and `coding_history` tags of a probed report.
///
/// Each KEY=VALUE line of `format.tags.comment` becomes an entry in the
/// format's top-level attribute map, and the comment itself is reset to
/// the empty string so the raw blob is never re-emitted downstream. When
/// the report carries no tag block or no comment, it is returned
/// structurally unchanged.
///
/// A present, non-empty `coding_history` string is restructured into a
/// key/value mapping in the same pass; an absent or empty one is left
/// untouched.
pub fn expand_tags(mut report: ProbeReport) -> ProbeReport {
    let Some(tags) = report.format.tags.as_mut() else {
        return report;
    };
    let Some(raw_comment) = tags.comment.clone() else {
        return report;
    };

    let parsed = parse_comment(&raw_comment);
    tags.comment = Some(String::new());

    if let Some(CodingHistory::Raw(raw)) = &tags.coding_history {
        if !raw.is_empty() {
            let entries = parse_coding_history(raw);
            tags.coding_history = Some(CodingHistory::Entries(entries));
        }
    }

    report.format.attributes.extend(parsed);
    report
}

/// Parse CR-LF separated KEY=VALUE lines.
///
/// Lines without a `=` after the key carry no attribute and are ignored.
fn parse_comment(comment: &str) -> BTreeMap<String, String> {
    comment
        .split("\r\n")
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Split a flat coding-history string into a key/value mapping.
///
/// Entries are separated by comma, semicolon, or backslash; each entry
/// splits on its first `=`, and a trailing escaped CR-LF sequence (the
/// four characters `\r\n`) is stripped from the value. Entries without a
/// `=` carry no data and are skipped.
fn parse_coding_history(history: &str) -> BTreeMap<String, String> {
    history
        .split([',', ';', '\\'])
        .filter_map(|entry| entry.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| {
            let value = value.strip_suffix("\\r\\n").unwrap_or(value);
            (key.to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::parse_report;

    #[test]
    fn comment_lines_become_attributes() {
        let report = parse_report(
            br#"{"streams":[],"format":{"tags":{"comment":"K1=V1\r\nK2=V2"}}}"#,
        )
        .unwrap();

        let expanded = expand_tags(report);
        assert_eq!(expanded.format.attributes.get("K1").unwrap(), "V1");
        assert_eq!(expanded.format.attributes.get("K2").unwrap(), "V2");

        // The raw blob is cleared, not dropped
        let tags = expanded.format.tags.unwrap();
        assert_eq!(tags.comment.as_deref(), Some(""));
    }

    #[test]
    fn comment_line_without_equals_is_ignored() {
        let report = parse_report(
            br#"{"streams":[],"format":{"tags":{"comment":"sTRK1=Boom\r\njunk line\r\n=orphan"}}}"#,
        )
        .unwrap();

        let expanded = expand_tags(report);
        assert_eq!(expanded.format.attributes.len(), 1);
        assert_eq!(expanded.format.attributes.get("sTRK1").unwrap(), "Boom");
    }

    #[test]
    fn absent_tags_returns_report_unchanged() {
        let report =
            parse_report(br#"{"streams":[],"format":{"duration":"12.0"}}"#).unwrap();
        let expanded = expand_tags(report.clone());
        assert_eq!(expanded, report);
        assert!(expanded.format.tags.is_none());
    }

    #[test]
    fn absent_comment_returns_report_unchanged() {
        // coding_history stays raw when there is no comment to expand
        let report = parse_report(
            br#"{"streams":[],"format":{"tags":{"coding_history":"A=1,B=2"}}}"#,
        )
        .unwrap();

        let expanded = expand_tags(report.clone());
        assert_eq!(expanded, report);
        assert!(matches!(
            expanded.format.tags.unwrap().coding_history,
            Some(CodingHistory::Raw(_))
        ));
    }

    #[test]
    fn coding_history_splits_on_all_delimiters() {
        let report = parse_report(
            br#"{"streams":[],"format":{"tags":{"comment":"K=V","coding_history":"A=1,B=2\\r\\n;C=3"}}}"#,
        )
        .unwrap();

        let expanded = expand_tags(report);
        let tags = expanded.format.tags.unwrap();
        let Some(CodingHistory::Entries(entries)) = tags.coding_history else {
            panic!("coding history was not restructured");
        };

        assert_eq!(entries.get("A").unwrap(), "1");
        assert_eq!(entries.get("B").unwrap(), "2");
        assert_eq!(entries.get("C").unwrap(), "3");
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn empty_coding_history_left_untouched() {
        let report = parse_report(
            br#"{"streams":[],"format":{"tags":{"comment":"K=V","coding_history":""}}}"#,
        )
        .unwrap();

        let expanded = expand_tags(report);
        let tags = expanded.format.tags.unwrap();
        assert_eq!(tags.coding_history, Some(CodingHistory::Raw(String::new())));
    }

    #[test]
    fn coding_history_entries_without_equals_are_skipped() {
        let entries = parse_coding_history("A=PCM,stray;B=48000");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("A").unwrap(), "PCM");
        assert_eq!(entries.get("B").unwrap(), "48000");
    }

    #[test]
    fn expansion_merges_into_existing_attributes() {
        let report = parse_report(
            br#"{"streams":[],"format":{"tags":{"comment":"sSPEED=048.000\r\nsTRK1=MixL"}}}"#,
        )
        .unwrap();

        let expanded = expand_tags(report);
        assert_eq!(expanded.format.attributes.get("sSPEED").unwrap(), "048.000");
        assert_eq!(expanded.format.attributes.get("sTRK1").unwrap(), "MixL");
    }
}
