#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::fn_params_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod batch;
pub mod config;
pub mod descriptor;
pub mod filter;
pub mod list;
pub mod preview;
pub mod rule;
pub mod transform;

pub use batch::{
    run_batch, run_batch_parallel, BatchOutcome, BatchPhase, BatchRunner, FileOutcome,
    NameCollision, Resolution,
};
pub use config::{Config, DefaultsConfig};
pub use descriptor::FileDescriptor;
pub use filter::{include_file, matches_filter};
pub use list::{ListError, RuleEntry, RuleId, RuleList};
pub use preview::{render_outcome, should_use_color, Preview};
pub use rule::{
    ByteBase, ConstructionError, Rule, RuleKind, CASE_LOWER, CASE_SENTENCE, CASE_TITLE,
    CASE_UPPER, MAX_NUM_PADDING,
};
pub use transform::{apply_transform, apply_transforms, RenameContext};
