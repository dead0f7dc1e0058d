use crate::descriptor::FileDescriptor;
use crate::rule::Rule;

/// Decide inclusion for one descriptor against the ordered active filter
/// subsequence. Filters compose by logical AND; an empty list includes
/// everything. Every test reads the descriptor's original metadata, so the
/// decision is independent of any renaming.
pub fn include_file(file: &FileDescriptor, filters: &[&Rule]) -> bool {
    filters.iter().all(|rule| matches_filter(file, rule))
}

/// Evaluate a single filter rule. Total: malformed or unset bounds degrade
/// to "unbounded", and non-filter or inactive rules never veto inclusion.
pub fn matches_filter(file: &FileDescriptor, rule: &Rule) -> bool {
    if !rule.is_active() {
        return true;
    }
    match rule {
        Rule::FilterName {
            inclusive, pattern, ..
        } => file.original_name.contains(pattern.as_str()) == *inclusive,
        Rule::FilterDocType {
            inclusive,
            doc_types,
            ..
        } => {
            // Vacuous match: an empty inclusive list excludes everything,
            // an empty exclusive list includes everything.
            let is_member = doc_types
                .iter()
                .any(|doc_type| doc_type.eq_ignore_ascii_case(&file.doc_type));
            is_member == *inclusive
        },
        Rule::FilterTimePeriod {
            inclusive,
            start_time,
            end_time,
            ..
        } => {
            let after_start = start_time.map_or(true, |start| file.modified >= start);
            let before_end = end_time.map_or(true, |end| file.modified <= end);
            (after_start && before_end) == *inclusive
        },
        Rule::FilterTime { before, time, .. } => match time {
            None => true,
            Some(time) => {
                if *before {
                    file.modified < *time
                } else {
                    file.modified >= *time
                }
            },
        },
        Rule::FilterSize {
            greater_than, size, ..
        } => {
            if *greater_than {
                file.size > *size
            } else {
                file.size <= *size
            }
        },
        Rule::CustomText { .. }
        | Rule::FindAndReplace { .. }
        | Rule::ClearAll { .. }
        | Rule::ChangeCase { .. }
        | Rule::NumSequence { .. }
        | Rule::InsertDate { .. }
        | Rule::InsertTime { .. } => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ByteBase;
    use chrono::{TimeZone, Utc};

    fn descriptor(name: &str, doc_type: &str, size: u64, hour: u32) -> FileDescriptor {
        let mtime = Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap();
        FileDescriptor::new(name, doc_type, size, mtime)
    }

    #[test]
    fn empty_filter_list_includes_everything() {
        let file = descriptor("report.pdf", "pdf", 100, 12);
        assert!(include_file(&file, &[]));
    }

    #[test]
    fn name_filter_matches_substring_and_inverts() {
        let file = descriptor("holiday_photo.jpg", "jpg", 100, 12);
        let matching = Rule::FilterName {
            inclusive: true,
            pattern: "photo".to_string(),
            active: true,
        };
        let inverted = Rule::FilterName {
            inclusive: false,
            pattern: "photo".to_string(),
            active: true,
        };
        assert!(matches_filter(&file, &matching));
        assert!(!matches_filter(&file, &inverted));
    }

    #[test]
    fn name_filter_reads_the_original_name() {
        let mut file = descriptor("draft.txt", "txt", 100, 12);
        file.current_name = "final.txt".to_string();
        let rule = Rule::FilterName {
            inclusive: true,
            pattern: "final".to_string(),
            active: true,
        };
        assert!(!matches_filter(&file, &rule));
    }

    #[test]
    fn doc_type_membership_is_case_insensitive() {
        let file = descriptor("scan.PDF", "PDF", 100, 12);
        let rule = Rule::FilterDocType {
            inclusive: true,
            doc_types: vec!["pdf".to_string(), "doc".to_string()],
            active: true,
        };
        assert!(matches_filter(&file, &rule));
    }

    #[test]
    fn empty_doc_type_list_is_a_vacuous_match() {
        let file = descriptor("scan.pdf", "pdf", 100, 12);
        let inclusive = Rule::FilterDocType {
            inclusive: true,
            doc_types: vec![],
            active: true,
        };
        let exclusive = Rule::FilterDocType {
            inclusive: false,
            doc_types: vec![],
            active: true,
        };
        assert!(!matches_filter(&file, &inclusive));
        assert!(matches_filter(&file, &exclusive));
    }

    #[test]
    fn time_period_bounds_are_inclusive_and_optional() {
        let file = descriptor("a.txt", "txt", 100, 12);
        let at = |hour| Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap();

        let inside = Rule::FilterTimePeriod {
            inclusive: true,
            start_time: Some(at(12)),
            end_time: Some(at(13)),
            active: true,
        };
        assert!(matches_filter(&file, &inside));

        let outside = Rule::FilterTimePeriod {
            inclusive: true,
            start_time: Some(at(13)),
            end_time: Some(at(14)),
            active: true,
        };
        assert!(!matches_filter(&file, &outside));

        let unbounded = Rule::FilterTimePeriod {
            inclusive: true,
            start_time: None,
            end_time: None,
            active: true,
        };
        assert!(matches_filter(&file, &unbounded));

        let inverted = Rule::FilterTimePeriod {
            inclusive: false,
            start_time: Some(at(12)),
            end_time: Some(at(13)),
            active: true,
        };
        assert!(!matches_filter(&file, &inverted));
    }

    #[test]
    fn time_filter_splits_at_the_boundary() {
        let file = descriptor("a.txt", "txt", 100, 12);
        let boundary = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let before = Rule::FilterTime {
            before: true,
            time: Some(boundary),
            active: true,
        };
        let after = Rule::FilterTime {
            before: false,
            time: Some(boundary),
            active: true,
        };
        // mtime == boundary lands on the "not before" side.
        assert!(!matches_filter(&file, &before));
        assert!(matches_filter(&file, &after));

        let unset = Rule::FilterTime {
            before: true,
            time: None,
            active: true,
        };
        assert!(matches_filter(&file, &unset));
    }

    #[test]
    fn size_threshold_is_strict_above_or_at_most() {
        let exactly = descriptor("a.bin", "bin", 1024, 12);
        let above = descriptor("b.bin", "bin", 1025, 12);
        let rule = Rule::FilterSize {
            greater_than: true,
            byte_base: ByteBase::Binary,
            size: 1024,
            active: true,
        };
        assert!(!matches_filter(&exactly, &rule));
        assert!(matches_filter(&above, &rule));

        let at_most = Rule::FilterSize {
            greater_than: false,
            byte_base: ByteBase::Binary,
            size: 1024,
            active: true,
        };
        assert!(matches_filter(&exactly, &at_most));
        assert!(!matches_filter(&above, &at_most));
    }

    #[test]
    fn filters_compose_by_and() {
        let file = descriptor("holiday_photo.jpg", "jpg", 2048, 12);
        let name = Rule::FilterName {
            inclusive: true,
            pattern: "photo".to_string(),
            active: true,
        };
        let too_big = Rule::FilterSize {
            greater_than: true,
            byte_base: ByteBase::Binary,
            size: 4096,
            active: true,
        };
        assert!(include_file(&file, &[&name]));
        assert!(!include_file(&file, &[&name, &too_big]));
    }

    #[test]
    fn inactive_filters_never_veto() {
        let file = descriptor("a.txt", "txt", 100, 12);
        let rule = Rule::FilterName {
            inclusive: true,
            pattern: "nomatch".to_string(),
            active: false,
        };
        assert!(matches_filter(&file, &rule));
    }
}
