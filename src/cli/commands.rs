// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// All flags of the converter and their conversion into the
// application-layer PrepConfig.
//
// Dataset selectors are taken as plain strings and validated in
// TryFrom, so an unsupported value surfaces as a configuration
// error before any file is read.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::Args;
use std::path::PathBuf;

use crate::application::prepare_use_case::{FailurePolicy, PrepConfig, Selector};
use crate::domain::errors::PrepError;

/// All arguments for a conversion run.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct PrepArgs {
    /// Seed for every randomized resplit
    #[arg(long, default_value_t = 13)]
    pub seed: u64,

    /// Directory holding the raw corpora; must already exist
    #[arg(long, default_value = "data")]
    pub root_dir: PathBuf,

    /// Root directory for ground-truth CSVs (created if absent)
    #[arg(long, default_value = "mediqa")]
    pub gt_dir: PathBuf,

    /// Also build the pairwise QNLI variant (qnnli) of the old GLUE release
    #[arg(long)]
    pub old_glue: bool,

    /// GLUE datasets to convert: all or none
    #[arg(long, default_value = "all")]
    pub glue_dataset: String,

    /// MEDIQA datasets (MedNLI, RQE, MEDIQA QA, MedQuAD): all or none
    #[arg(long, default_value = "all")]
    pub mediqa_dataset: String,

    /// SciTail and SNLI: all or none
    #[arg(long, default_value = "all")]
    pub other_dataset: String,

    /// Stop at the first dataset that fails instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// JSON file replacing entries of the built-in label maps
    #[arg(long)]
    pub label_maps: Option<PathBuf>,

    /// Number of (train, dev) folds exported for MEDIQA QA
    #[arg(long, default_value_t = 5)]
    pub mediqa_folds: usize,

    /// Negative answers added per MedQuAD question
    #[arg(long, default_value_t = 2)]
    pub medquad_negatives: usize,
}

/// Convert CLI PrepArgs into the application-layer PrepConfig.
/// The application layer never sees clap types.
impl TryFrom<PrepArgs> for PrepConfig {
    type Error = PrepError;

    fn try_from(a: PrepArgs) -> Result<Self, Self::Error> {
        let failure_policy = if a.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Isolate
        };

        Ok(PrepConfig {
            root_dir:          a.root_dir,
            gt_dir:            a.gt_dir,
            seed:              a.seed,
            old_glue:          a.old_glue,
            glue_datasets:     a.glue_dataset.parse::<Selector>()?,
            mediqa_datasets:   a.mediqa_dataset.parse::<Selector>()?,
            other_datasets:    a.other_dataset.parse::<Selector>()?,
            failure_policy,
            label_maps:        a.label_maps,
            mediqa_folds:      a.mediqa_folds,
            medquad_negatives: a.medquad_negatives,
            ..PrepConfig::default()
        })
    }
}
