use crate::config::DefaultsConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Case policy selectors for `ChangeCase`. Values outside the known range
/// are a no-op at apply time.
pub const CASE_UPPER: u8 = 0;
pub const CASE_LOWER: u8 = 1;
pub const CASE_TITLE: u8 = 2;
pub const CASE_SENTENCE: u8 = 3;

/// Widest zero-padding a `NumSequence` rule may request.
pub const MAX_NUM_PADDING: u32 = 64;

/// Rejected rule parameters. Raised at construction/insert time so an
/// invalid rule never enters a list; evaluation itself is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("sequence padding {padding} exceeds the maximum of {max} digits")]
    PaddingTooWide { padding: u32, max: u32 },
}

/// Unit ladder used when a size threshold is entered in scaled units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ByteBase {
    /// 1000-based (kB, MB, ...).
    Decimal,
    /// 1024-based (KiB, MiB, ...).
    Binary,
}

impl ByteBase {
    pub fn multiplier(self) -> u64 {
        match self {
            Self::Decimal => 1000,
            Self::Binary => 1024,
        }
    }

    /// Scale a unit-entry value onto the byte ladder: `value * base^exponent`.
    /// Saturates rather than wrapping on absurd exponents.
    pub fn scale(self, value: u64, exponent: u32) -> u64 {
        value.saturating_mul(self.multiplier().saturating_pow(exponent))
    }
}

/// Which half of the pipeline a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RuleKind {
    /// Rewrites the candidate name.
    Transform,
    /// Decides set membership.
    Filter,
}

/// One rule in the pipeline.
///
/// The externally tagged serde shape (`{ "CustomText": { ... } }`) is the
/// wire format the TypeScript front-end speaks; the exported TS bindings
/// reproduce it as a discriminated union.
///
/// Every variant carries an `active` flag so it can be switched off without
/// losing its position or parameters. Rules execute strictly in list order;
/// none has an implicit priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Rule {
    CustomText {
        text: String,
        at_start: bool,
        active: bool,
    },
    FindAndReplace {
        find_text: String,
        replace_text: String,
        active: bool,
    },
    ClearAll {
        active: bool,
    },
    ChangeCase {
        /// One of the `CASE_*` selectors; unknown values fail closed.
        #[ts(type = "number")]
        case_choice: u8,
        active: bool,
    },
    NumSequence {
        #[ts(type = "number")]
        start_num: u64,
        #[ts(type = "number")]
        num_padding: u32,
        at_start: bool,
        separator: String,
        active: bool,
    },
    InsertDate {
        year: bool,
        month: bool,
        day: bool,
        /// 4-digit year when set, 2-digit otherwise.
        year_4: bool,
        separator: String,
        at_start: bool,
        active: bool,
    },
    InsertTime {
        /// 24-hour clock when set, 12-hour with an am/pm suffix otherwise.
        hour_24: bool,
        separator: String,
        at_start: bool,
        active: bool,
    },
    FilterName {
        inclusive: bool,
        pattern: String,
        active: bool,
    },
    FilterDocType {
        inclusive: bool,
        doc_types: Vec<String>,
        active: bool,
    },
    FilterTimePeriod {
        inclusive: bool,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        active: bool,
    },
    FilterTime {
        before: bool,
        time: Option<DateTime<Utc>>,
        active: bool,
    },
    FilterSize {
        greater_than: bool,
        byte_base: ByteBase,
        /// Threshold in bytes. Use [`ByteBase::scale`] to convert a value
        /// entered in scaled units.
        #[ts(type = "number")]
        size: u64,
        active: bool,
    },
}

impl Rule {
    // Default constructors, one per variant. These mirror the factory
    // functions the front-end uses to add a fresh rule to the editor.

    pub fn custom_text() -> Self {
        Self::CustomText {
            text: String::new(),
            at_start: true,
            active: true,
        }
    }

    pub fn find_and_replace() -> Self {
        Self::FindAndReplace {
            find_text: String::new(),
            replace_text: String::new(),
            active: true,
        }
    }

    pub fn clear_all() -> Self {
        Self::ClearAll { active: true }
    }

    pub fn change_case() -> Self {
        Self::ChangeCase {
            case_choice: CASE_UPPER,
            active: true,
        }
    }

    pub fn num_sequence() -> Self {
        Self::NumSequence {
            start_num: 0,
            num_padding: 4,
            at_start: true,
            separator: "_".to_string(),
            active: true,
        }
    }

    pub fn insert_date() -> Self {
        Self::InsertDate {
            year: true,
            month: true,
            day: true,
            year_4: true,
            separator: "_".to_string(),
            at_start: true,
            active: true,
        }
    }

    pub fn insert_time() -> Self {
        Self::InsertTime {
            hour_24: true,
            separator: "_".to_string(),
            at_start: true,
            active: true,
        }
    }

    pub fn filter_name() -> Self {
        Self::FilterName {
            inclusive: true,
            pattern: String::new(),
            active: true,
        }
    }

    pub fn filter_doc_type() -> Self {
        Self::FilterDocType {
            inclusive: true,
            doc_types: Vec::new(),
            active: true,
        }
    }

    pub fn filter_time_period() -> Self {
        Self::FilterTimePeriod {
            inclusive: true,
            start_time: None,
            end_time: None,
            active: true,
        }
    }

    pub fn filter_time() -> Self {
        Self::FilterTime {
            before: true,
            time: None,
            active: true,
        }
    }

    pub fn filter_size() -> Self {
        Self::FilterSize {
            greater_than: false,
            byte_base: ByteBase::Binary,
            size: 0,
            active: true,
        }
    }

    // Constructors honoring the user's configured defaults.

    pub fn num_sequence_with(defaults: &DefaultsConfig) -> Self {
        Self::NumSequence {
            start_num: 0,
            num_padding: defaults.num_padding,
            at_start: true,
            separator: defaults.separator.clone(),
            active: true,
        }
    }

    pub fn insert_date_with(defaults: &DefaultsConfig) -> Self {
        Self::InsertDate {
            year: true,
            month: true,
            day: true,
            year_4: defaults.year_4,
            separator: defaults.separator.clone(),
            at_start: true,
            active: true,
        }
    }

    pub fn insert_time_with(defaults: &DefaultsConfig) -> Self {
        Self::InsertTime {
            hour_24: defaults.hour_24,
            separator: defaults.separator.clone(),
            at_start: true,
            active: true,
        }
    }

    /// Check the parameters a caller (or a deserialized payload) supplied.
    /// Lists run this on insert so a bad rule never executes.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        match self {
            Self::NumSequence { num_padding, .. } if *num_padding > MAX_NUM_PADDING => {
                Err(ConstructionError::PaddingTooWide {
                    padding: *num_padding,
                    max: MAX_NUM_PADDING,
                })
            },
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::CustomText { .. }
            | Self::FindAndReplace { .. }
            | Self::ClearAll { .. }
            | Self::ChangeCase { .. }
            | Self::NumSequence { .. }
            | Self::InsertDate { .. }
            | Self::InsertTime { .. } => RuleKind::Transform,
            Self::FilterName { .. }
            | Self::FilterDocType { .. }
            | Self::FilterTimePeriod { .. }
            | Self::FilterTime { .. }
            | Self::FilterSize { .. } => RuleKind::Filter,
        }
    }

    pub fn is_transform(&self) -> bool {
        self.kind() == RuleKind::Transform
    }

    pub fn is_filter(&self) -> bool {
        self.kind() == RuleKind::Filter
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::CustomText { active, .. }
            | Self::FindAndReplace { active, .. }
            | Self::ClearAll { active }
            | Self::ChangeCase { active, .. }
            | Self::NumSequence { active, .. }
            | Self::InsertDate { active, .. }
            | Self::InsertTime { active, .. }
            | Self::FilterName { active, .. }
            | Self::FilterDocType { active, .. }
            | Self::FilterTimePeriod { active, .. }
            | Self::FilterTime { active, .. }
            | Self::FilterSize { active, .. } => *active,
        }
    }

    pub fn set_active(&mut self, value: bool) {
        match self {
            Self::CustomText { active, .. }
            | Self::FindAndReplace { active, .. }
            | Self::ClearAll { active }
            | Self::ChangeCase { active, .. }
            | Self::NumSequence { active, .. }
            | Self::InsertDate { active, .. }
            | Self::InsertTime { active, .. }
            | Self::FilterName { active, .. }
            | Self::FilterDocType { active, .. }
            | Self::FilterTimePeriod { active, .. }
            | Self::FilterTime { active, .. }
            | Self::FilterSize { active, .. } => *active = value,
        }
    }

    // Variant predicates, mutually exclusive and collectively exhaustive.
    // The front-end type guards are generated from these names.

    pub fn is_custom_text(&self) -> bool {
        matches!(self, Self::CustomText { .. })
    }

    pub fn is_find_and_replace(&self) -> bool {
        matches!(self, Self::FindAndReplace { .. })
    }

    pub fn is_clear_all(&self) -> bool {
        matches!(self, Self::ClearAll { .. })
    }

    pub fn is_change_case(&self) -> bool {
        matches!(self, Self::ChangeCase { .. })
    }

    pub fn is_num_sequence(&self) -> bool {
        matches!(self, Self::NumSequence { .. })
    }

    pub fn is_insert_date(&self) -> bool {
        matches!(self, Self::InsertDate { .. })
    }

    pub fn is_insert_time(&self) -> bool {
        matches!(self, Self::InsertTime { .. })
    }

    pub fn is_filter_name(&self) -> bool {
        matches!(self, Self::FilterName { .. })
    }

    pub fn is_filter_doc_type(&self) -> bool {
        matches!(self, Self::FilterDocType { .. })
    }

    pub fn is_filter_time_period(&self) -> bool {
        matches!(self, Self::FilterTimePeriod { .. })
    }

    pub fn is_filter_time(&self) -> bool {
        matches!(self, Self::FilterTime { .. })
    }

    pub fn is_filter_size(&self) -> bool {
        matches!(self, Self::FilterSize { .. })
    }
}
