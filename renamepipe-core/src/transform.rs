use crate::rule::{Rule, CASE_LOWER, CASE_SENTENCE, CASE_TITLE, CASE_UPPER};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Per-file inputs to the rename phase that are not the name itself.
#[derive(Debug, Clone, Copy)]
pub struct RenameContext {
    /// The descriptor's last-modified timestamp. Date and time inserts
    /// read this, never the wall clock, so output is reproducible.
    pub modified: DateTime<Utc>,
    /// Position of this file among the batch's survivors, starting at 0.
    pub sequence_index: u64,
}

/// Thread a name through the active transform subsequence, strictly in
/// list order. Identical inputs always produce identical output.
pub fn apply_transforms(name: &str, transforms: &[&Rule], ctx: &RenameContext) -> String {
    let mut current = name.to_string();
    for rule in transforms {
        current = apply_transform(&current, rule, ctx);
    }
    current
}

/// Apply a single transform to a name.
///
/// Extension convention: positional inserts (`CustomText`, `NumSequence`,
/// `InsertDate`, `InsertTime`) wrap the stem and leave the extension
/// alone; `FindAndReplace` and `ChangeCase` see the whole name; `ClearAll`
/// resets the whole name, extension included.
pub fn apply_transform(name: &str, rule: &Rule, ctx: &RenameContext) -> String {
    if !rule.is_active() {
        return name.to_string();
    }
    match rule {
        Rule::CustomText { text, at_start, .. } => {
            let (stem, ext) = split_name(name);
            let stem = if *at_start {
                format!("{text}{stem}")
            } else {
                format!("{stem}{text}")
            };
            rejoin(stem, ext)
        },
        Rule::FindAndReplace {
            find_text,
            replace_text,
            ..
        } => {
            // An empty needle would match everywhere; treat it as a no-op.
            if find_text.is_empty() {
                name.to_string()
            } else {
                name.replace(find_text.as_str(), replace_text)
            }
        },
        Rule::ClearAll { .. } => String::new(),
        Rule::ChangeCase { case_choice, .. } => match *case_choice {
            CASE_UPPER => name.to_uppercase(),
            CASE_LOWER => name.to_lowercase(),
            CASE_TITLE => title_case(name),
            CASE_SENTENCE => sentence_case(name),
            // Unknown selectors fail closed.
            _ => name.to_string(),
        },
        Rule::NumSequence {
            start_num,
            num_padding,
            at_start,
            separator,
            ..
        } => {
            let (stem, ext) = split_name(name);
            let value = start_num.saturating_add(ctx.sequence_index);
            // Zero-pad to the requested width; wider numbers are never
            // truncated.
            let number = format!("{:01$}", value, *num_padding as usize);
            let stem = if *at_start {
                format!("{number}{separator}{stem}")
            } else {
                format!("{stem}{separator}{number}")
            };
            rejoin(stem, ext)
        },
        Rule::InsertDate {
            year,
            month,
            day,
            year_4,
            separator,
            at_start,
            ..
        } => {
            let mut parts: Vec<String> = Vec::new();
            if *year {
                if *year_4 {
                    parts.push(format!("{:04}", ctx.modified.year()));
                } else {
                    parts.push(format!("{:02}", ctx.modified.year().rem_euclid(100)));
                }
            }
            if *month {
                parts.push(format!("{:02}", ctx.modified.month()));
            }
            if *day {
                parts.push(format!("{:02}", ctx.modified.day()));
            }
            if parts.is_empty() {
                return name.to_string();
            }
            insert_block(name, &parts.join(separator), separator, *at_start)
        },
        Rule::InsertTime {
            hour_24,
            separator,
            at_start,
            ..
        } => {
            let block = if *hour_24 {
                format!(
                    "{:02}{sep}{:02}{sep}{:02}",
                    ctx.modified.hour(),
                    ctx.modified.minute(),
                    ctx.modified.second(),
                    sep = separator,
                )
            } else {
                let (is_pm, hour) = ctx.modified.hour12();
                format!(
                    "{:02}{sep}{:02}{sep}{:02}",
                    hour,
                    ctx.modified.minute(),
                    ctx.modified.second(),
                    sep = separator,
                )
                + if is_pm { "pm" } else { "am" }
            };
            insert_block(name, &block, separator, *at_start)
        },
        Rule::FilterName { .. }
        | Rule::FilterDocType { .. }
        | Rule::FilterTimePeriod { .. }
        | Rule::FilterTime { .. }
        | Rule::FilterSize { .. } => name.to_string(),
    }
}

/// Split into stem and extension. Leading-dot names (`.gitignore`) and
/// trailing-dot names count as all stem.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

fn rejoin(stem: String, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Insert a formatted block at the start or end of the stem, joined to it
/// with `separator`.
fn insert_block(name: &str, block: &str, separator: &str, at_start: bool) -> String {
    let (stem, ext) = split_name(name);
    let stem = if at_start {
        format!("{block}{separator}{stem}")
    } else {
        format!("{stem}{separator}{block}")
    };
    rejoin(stem, ext)
}

/// Uppercase the first alphabetic character of each word; words break at
/// spaces, underscores, hyphens and dots.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if matches!(ch, ' ' | '_' | '-' | '.') {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Uppercase the first alphabetic character of the whole name, lowercase
/// the rest.
fn sentence_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalized = false;
    for ch in name.chars() {
        if !capitalized && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            capitalized = true;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ctx() -> RenameContext {
        RenameContext {
            modified: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap(),
            sequence_index: 0,
        }
    }

    #[test]
    fn custom_text_wraps_the_stem() {
        let rule = Rule::CustomText {
            text: "new_".to_string(),
            at_start: true,
            active: true,
        };
        assert_eq!(apply_transform("photo.jpg", &rule, &ctx()), "new_photo.jpg");

        let rule = Rule::CustomText {
            text: "_old".to_string(),
            at_start: false,
            active: true,
        };
        assert_eq!(apply_transform("photo.jpg", &rule, &ctx()), "photo_old.jpg");
    }

    #[test]
    fn custom_text_without_extension() {
        let rule = Rule::CustomText {
            text: "x".to_string(),
            at_start: false,
            active: true,
        };
        assert_eq!(apply_transform("README", &rule, &ctx()), "READMEx");
    }

    #[test]
    fn find_and_replace_hits_all_occurrences() {
        let rule = Rule::FindAndReplace {
            find_text: "aa".to_string(),
            replace_text: "b".to_string(),
            active: true,
        };
        assert_eq!(apply_transform("aaaa.txt", &rule, &ctx()), "bb.txt");
    }

    #[test]
    fn find_and_replace_empty_needle_is_identity() {
        let rule = Rule::FindAndReplace {
            find_text: String::new(),
            replace_text: "x".to_string(),
            active: true,
        };
        assert_eq!(apply_transform("photo.jpg", &rule, &ctx()), "photo.jpg");
    }

    #[test]
    fn find_and_replace_sees_the_extension() {
        let rule = Rule::FindAndReplace {
            find_text: "jpg".to_string(),
            replace_text: "jpeg".to_string(),
            active: true,
        };
        assert_eq!(apply_transform("photo.jpg", &rule, &ctx()), "photo.jpeg");
    }

    #[test]
    fn clear_all_empties_the_whole_name() {
        let rule = Rule::ClearAll { active: true };
        assert_eq!(apply_transform("photo.jpg", &rule, &ctx()), "");
    }

    #[test]
    fn change_case_policies() {
        let case = |choice| Rule::ChangeCase {
            case_choice: choice,
            active: true,
        };
        assert_eq!(
            apply_transform("my file.TXT", &case(CASE_UPPER), &ctx()),
            "MY FILE.TXT"
        );
        assert_eq!(
            apply_transform("My File.TXT", &case(CASE_LOWER), &ctx()),
            "my file.txt"
        );
        assert_eq!(
            apply_transform("my summer_trip.jpg", &case(CASE_TITLE), &ctx()),
            "My Summer_Trip.Jpg"
        );
        assert_eq!(
            apply_transform("MY summer TRIP", &case(CASE_SENTENCE), &ctx()),
            "My summer trip"
        );
    }

    #[test]
    fn change_case_unknown_choice_is_a_no_op() {
        let rule = Rule::ChangeCase {
            case_choice: 42,
            active: true,
        };
        assert_eq!(apply_transform("MiXeD.TxT", &rule, &ctx()), "MiXeD.TxT");
    }

    #[test]
    fn num_sequence_pads_without_truncating() {
        let rule = Rule::NumSequence {
            start_num: 998,
            num_padding: 2,
            at_start: true,
            separator: "-".to_string(),
            active: true,
        };
        let mut context = ctx();
        context.sequence_index = 7;
        // 998 + 7 = 1005 needs more digits than the padding allows.
        assert_eq!(apply_transform("a.txt", &rule, &context), "1005-a.txt");
    }

    #[test]
    fn num_sequence_at_end_sits_before_the_extension() {
        let rule = Rule::NumSequence {
            start_num: 1,
            num_padding: 3,
            at_start: false,
            separator: "_".to_string(),
            active: true,
        };
        assert_eq!(apply_transform("a.txt", &rule, &ctx()), "a_001.txt");
    }

    #[test]
    fn insert_date_formats_enabled_fields() {
        let rule = Rule::InsertDate {
            year: true,
            month: true,
            day: true,
            year_4: true,
            separator: "_".to_string(),
            at_start: true,
            active: true,
        };
        assert_eq!(
            apply_transform("scan.pdf", &rule, &ctx()),
            "2024_03_05_scan.pdf"
        );

        let two_digit = Rule::InsertDate {
            year: true,
            month: false,
            day: false,
            year_4: false,
            separator: "_".to_string(),
            at_start: false,
            active: true,
        };
        assert_eq!(apply_transform("scan.pdf", &two_digit, &ctx()), "scan_24.pdf");
    }

    #[test]
    fn insert_date_with_no_fields_enabled_is_a_no_op() {
        let rule = Rule::InsertDate {
            year: false,
            month: false,
            day: false,
            year_4: true,
            separator: "_".to_string(),
            at_start: true,
            active: true,
        };
        assert_eq!(apply_transform("scan.pdf", &rule, &ctx()), "scan.pdf");
    }

    #[test]
    fn insert_time_24_hour_and_12_hour() {
        let rule = Rule::InsertTime {
            hour_24: true,
            separator: "-".to_string(),
            at_start: false,
            active: true,
        };
        assert_eq!(apply_transform("log.txt", &rule, &ctx()), "log-14-07-09.txt");

        let twelve = Rule::InsertTime {
            hour_24: false,
            separator: "-".to_string(),
            at_start: true,
            active: true,
        };
        assert_eq!(
            apply_transform("log.txt", &twelve, &ctx()),
            "02-07-09pm-log.txt"
        );
    }

    #[test]
    fn inactive_transform_is_skipped() {
        let rule = Rule::ClearAll { active: false };
        assert_eq!(apply_transform("keep.me", &rule, &ctx()), "keep.me");
    }

    #[test]
    fn transforms_thread_in_list_order() {
        let upper = Rule::ChangeCase {
            case_choice: CASE_UPPER,
            active: true,
        };
        let replace = Rule::FindAndReplace {
            find_text: "PHOTO".to_string(),
            replace_text: "IMG".to_string(),
            active: true,
        };
        // Uppercasing first makes the replace hit; the reverse would not.
        assert_eq!(
            apply_transforms("photo.jpg", &[&upper, &replace], &ctx()),
            "IMG.JPG"
        );
        assert_eq!(
            apply_transforms("photo.jpg", &[&replace, &upper], &ctx()),
            "PHOTO.JPG"
        );
    }

    #[test]
    fn clear_all_discards_everything_before_it() {
        let prefix = Rule::CustomText {
            text: "junk_".to_string(),
            at_start: true,
            active: true,
        };
        let clear = Rule::ClearAll { active: true };
        let suffix = Rule::CustomText {
            text: "x".to_string(),
            at_start: true,
            active: true,
        };
        assert_eq!(
            apply_transforms("photo.jpg", &[&prefix, &clear, &suffix], &ctx()),
            "x"
        );
    }

    #[test]
    fn split_name_edge_cases() {
        assert_eq!(split_name("a.txt"), ("a", Some("txt")));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", Some("gz")));
        assert_eq!(split_name(".gitignore"), (".gitignore", None));
        assert_eq!(split_name("trailing."), ("trailing.", None));
        assert_eq!(split_name("noext"), ("noext", None));
        assert_eq!(split_name(""), ("", None));
    }
}
