// ============================================================
// Layer 5 — Output Layout
// ============================================================
// Knows where every output file goes and creates the folders.
//
//   <root>/canonical_data/
//     mnli_train.tsv
//     mediqa_0_dev.tsv
//     ...
//     prep_config.json        ← effective run configuration
//
//   <gt_root>/
//     task1_mednli/gt_dev.csv
//     task3_qa/gt_dev.csv
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::{dataset::Split, errors::PrepError};

/// Sub-directory of the root that receives canonical TSVs.
pub const CANONICAL_DIR: &str = "canonical_data";

pub struct OutputLayout {
    canonical_dir: PathBuf,
    gt_root:       PathBuf,
}

impl OutputLayout {
    /// Check that `root` exists and create `<root>/canonical_data`.
    pub fn prepare(root: &Path, gt_root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(PrepError::Path(root.to_path_buf()).into());
        }

        let canonical_dir = root.join(CANONICAL_DIR);
        fs::create_dir_all(&canonical_dir).with_context(|| {
            format!("Cannot create output directory '{}'", canonical_dir.display())
        })?;

        Ok(Self {
            canonical_dir,
            gt_root: gt_root.to_path_buf(),
        })
    }

    pub fn canonical_dir(&self) -> &Path {
        &self.canonical_dir
    }

    /// `<root>/canonical_data/<dataset>_<split>.tsv`
    pub fn canonical_path(&self, dataset: &str, split: &Split) -> PathBuf {
        self.canonical_dir.join(format!("{dataset}_{split}.tsv"))
    }

    /// `<gt_root>/<task>/gt_<split>.csv`
    pub fn ground_truth_path(&self, task: &str, split: &Split) -> PathBuf {
        self.gt_root.join(task).join(format!("gt_{split}.csv"))
    }

    /// Save the run configuration next to the canonical files.
    pub fn save_config<C: Serialize>(&self, cfg: &C) -> Result<PathBuf> {
        let path = self.canonical_dir.join("prep_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(path)
    }
}
