// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses flags with clap,
// hands a PrepConfig to the application layer and prints the
// outcome.
//
// Example:
//   canon-prep --root-dir data --glue-dataset all \
//              --mediqa-dataset none --other-dataset all
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use commands::PrepArgs;

use crate::application::prepare_use_case::{PrepConfig, PrepareUseCase};

/// The main CLI struct.
#[derive(Parser, Debug)]
#[command(
    name = "canon-prep",
    version,
    about = "Preprocess GLUE/SNLI/SciTail/MEDIQA datasets into canonical TSV files."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: PrepArgs,
}

impl Cli {
    /// Validate the flags and run the conversion.
    pub fn run(self) -> Result<()> {
        // Selector errors abort here, before any dataset is touched
        let config = PrepConfig::try_from(self.args)?;

        tracing::info!(
            "Preprocessing from '{}' (glue={}, mediqa={}, other={}, seed={})",
            config.root_dir.display(),
            config.glue_datasets,
            config.mediqa_datasets,
            config.other_datasets,
            config.seed
        );

        let report = PrepareUseCase::new(config).execute()?;

        println!(
            "Converted {} datasets ({} files).",
            report.completed.len(),
            report.files.len()
        );
        if !report.is_success() {
            for (name, reason) in &report.failed {
                eprintln!("  failed: {name}: {reason}");
            }
            bail!("{} dataset(s) failed", report.failed.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare_use_case::{FailurePolicy, Selector};
    use crate::domain::errors::PrepError;

    #[test]
    fn test_defaults_parse() {
        let cli = Cli::try_parse_from(["canon-prep"]).unwrap();
        let cfg = PrepConfig::try_from(cli.args).unwrap();
        assert_eq!(cfg.seed, 13);
        assert_eq!(cfg.glue_datasets, Selector::All);
        assert_eq!(cfg.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn test_selector_flags() {
        let cli = Cli::try_parse_from([
            "canon-prep",
            "--glue-dataset",
            "None",
            "--mediqa-dataset",
            "all",
            "--fail-fast",
            "--seed",
            "7",
        ])
        .unwrap();
        let cfg = PrepConfig::try_from(cli.args).unwrap();
        assert_eq!(cfg.glue_datasets, Selector::None);
        assert_eq!(cfg.failure_policy, FailurePolicy::FailFast);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn test_bad_selector_is_configuration_error() {
        let cli = Cli::try_parse_from(["canon-prep", "--other-dataset", "snli"]).unwrap();
        let err = PrepConfig::try_from(cli.args).unwrap_err();
        assert!(matches!(err, PrepError::Configuration(_)));
    }
}
