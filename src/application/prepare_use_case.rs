// ============================================================
// Layer 2 — PrepareUseCase (split orchestration)
// ============================================================
// Runs the whole conversion, one dataset at a time:
//
//   Step 1: Check the root, create canonical_data/   (Layer 5)
//   Step 2: Build label maps once                    (Layer 5)
//   Step 3: Save the run config                      (Layer 5)
//   For every enabled dataset plan:
//     Step 4: Load each split                        (Layer 4 - loader)
//     Step 5: Apply the dataset's split policy       (Layer 4 - splitter)
//     Step 6: Validate uids, fields and GT ids       (Layer 3 / 4)
//     Step 7: Export ground truth                    (Layer 4 - ground_truth)
//     Step 8: Write canonical TSVs                   (Layer 4 - writer)
//
// Ground truth is exported before the canonical write so the
// scorer's labels always come from the records as loaded. A
// dataset that fails validation writes nothing; one that fails
// while writing has its already-written files removed.
//
// A failing dataset is logged and skipped unless the run is
// configured fail-fast. Configuration and path problems abort
// before any dataset is touched.
//
// Reference: Rust Book §9 (Error Handling), §13 (Iterators)

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, str::FromStr};

use crate::application::catalog::{self, DatasetPlan, Family, SplitPolicy, SHARED_TASK_SPLIT};
use crate::data::{
    ground_truth,
    splitter::{self, SplitSet, SplitSizes},
    writer::CanonicalWriter,
};
use crate::domain::{
    dataset::{Dataset, Split},
    errors::{PrepError, PrepResult},
    label_map::LabelMaps,
    record::Record,
};
use crate::infra::{label_store::LabelStore, layout::OutputLayout};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Dataset-family selector. Only "all" and "none" are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    All,
    None,
}

impl Selector {
    pub fn is_enabled(self) -> bool {
        self == Selector::All
    }
}

impl FromStr for Selector {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Selector::All),
            "none" => Ok(Selector::None),
            other => Err(PrepError::Configuration(format!(
                "unsupported dataset selector '{other}': only 'all' or 'none' are \
                 supported, please run again with one of them"
            ))),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Selector::All => "all",
            Selector::None => "none",
        })
    }
}

/// What to do when one dataset fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Log the error, skip the dataset, keep going
    Isolate,
    /// Stop the run at the first failing dataset
    FailFast,
}

/// Every setting of a conversion run.
/// Saved as prep_config.json next to the canonical files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    pub root_dir:             PathBuf,
    pub gt_dir:               PathBuf,
    pub seed:                 u64,
    pub old_glue:             bool,
    pub glue_datasets:        Selector,
    pub mediqa_datasets:      Selector,
    pub other_datasets:       Selector,
    pub failure_policy:       FailurePolicy,
    pub label_maps:           Option<PathBuf>,
    pub mediqa_folds:         usize,
    pub medquad_negatives:    usize,
    pub medquad_dev_fraction: f64,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            root_dir:             PathBuf::from("data"),
            gt_dir:               PathBuf::from("mediqa"),
            seed:                 13,
            old_glue:             false,
            glue_datasets:        Selector::All,
            mediqa_datasets:      Selector::All,
            other_datasets:       Selector::All,
            failure_policy:       FailurePolicy::Isolate,
            label_maps:           None,
            mediqa_folds:         5,
            medquad_negatives:    2,
            medquad_dev_fraction: 0.1,
        }
    }
}

impl PrepConfig {
    /// The selector that switches `family` on or off.
    pub fn selector(&self, family: Family) -> Selector {
        match family {
            Family::Glue => self.glue_datasets,
            Family::Mediqa => self.mediqa_datasets,
            Family::Other => self.other_datasets,
        }
    }
}

// ─── Run report ───────────────────────────────────────────────────────────────

/// Outcome of a run: which datasets finished and which failed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub completed: Vec<String>,
    pub failed:    Vec<(String, String)>,
    pub files:     Vec<PathBuf>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    /// Execute every enabled dataset plan.
    pub fn execute(&self) -> Result<RunReport> {
        let cfg = &self.config;

        // ── Steps 1-3: layout, label maps, config ─────────────────────────────
        let layout = OutputLayout::prepare(&cfg.root_dir, &cfg.gt_dir)?;
        let labels = LabelStore::load_or_default(cfg.label_maps.as_deref())?;
        layout.save_config(cfg)?;

        let plans = catalog::build(cfg);
        tracing::info!(
            "Converting {} datasets into '{}'",
            plans.len(),
            layout.canonical_dir().display()
        );

        let writer = CanonicalWriter::new();
        let mut report = RunReport::default();

        for plan in &plans {
            match self.run_plan(plan, &labels, &layout, &writer) {
                Ok(files) => {
                    tracing::info!("done with {}", plan.name);
                    report.completed.push(plan.name.clone());
                    report.files.extend(files);
                }
                Err(e) if cfg.failure_policy == FailurePolicy::FailFast => {
                    return Err(e.context(format!("Dataset '{}' failed", plan.name)));
                }
                Err(e) => {
                    tracing::error!("Skipping dataset '{}': {:#}", plan.name, e);
                    report.failed.push((plan.name.clone(), format!("{e:#}")));
                }
            }
        }

        Ok(report)
    }

    /// Load, reshape, export and write one dataset. Returns every
    /// file written.
    fn run_plan(
        &self,
        plan:   &DatasetPlan,
        labels: &LabelMaps,
        layout: &OutputLayout,
        writer: &CanonicalWriter,
    ) -> Result<Vec<PathBuf>> {
        tracing::info!("Processing {} ({:?} family)", plan.name, plan.family);

        // ── Step 4: Load each split ───────────────────────────────────────────
        let mut loaded = Vec::with_capacity(plan.inputs.len());
        for input in &plan.inputs {
            let records = input
                .source
                .load(labels)
                .with_context(|| format!("Loading {}", input.source.describe()))?;
            tracing::info!("Loaded {} {} {} samples", records.len(), plan.name, input.split);
            loaded.push((input.split.clone(), records));
        }

        // ── Step 5: Split policy ──────────────────────────────────────────────
        // Each dataset gets its own RNG so results do not depend on
        // which other datasets ran first.
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let splits = apply_policy(&plan.policy, loaded, &mut rng)?;

        // ── Step 6: Validate every split before writing any ──────────────────
        let datasets: Vec<Dataset> = splits
            .into_iter()
            .map(|(split, records)| Dataset::new(&plan.name, split, &plan.provenance, records))
            .collect();
        for ds in &datasets {
            ds.ensure_unique_uids()?;
            writer
                .check(&ds.records, plan.format, &plan.extra_features)
                .with_context(|| format!("Validating {}", ds.file_stem()))?;
            if ds.is_empty() {
                tracing::warn!("{} ({}) has no records", ds.file_stem(), ds.provenance);
            }
        }
        if let Some(gt) = &plan.ground_truth {
            for split in &gt.splits {
                let ds = find_split(&datasets, split)?;
                ground_truth::check(&ds.records, gt.composite_keys)?;
            }
        }

        // ── Steps 7-8: Ground truth, then canonical TSVs ──────────────────────
        let mut files = Vec::new();
        if let Err(e) = write_outputs(plan, &datasets, layout, writer, &mut files) {
            remove_written(&files);
            return Err(e);
        }
        Ok(files)
    }
}

fn find_split<'a>(datasets: &'a [Dataset], split: &Split) -> Result<&'a Dataset> {
    datasets
        .iter()
        .find(|d| &d.split == split)
        .with_context(|| format!("No '{split}' split for ground truth"))
}

/// Write every output file of `plan`, recording each path in
/// `files` as soon as it exists.
fn write_outputs(
    plan:     &DatasetPlan,
    datasets: &[Dataset],
    layout:   &OutputLayout,
    writer:   &CanonicalWriter,
    files:    &mut Vec<PathBuf>,
) -> Result<()> {
    if let Some(gt) = &plan.ground_truth {
        for split in &gt.splits {
            let ds = find_split(datasets, split)?;
            let path = layout.ground_truth_path(&gt.task, split);
            ground_truth::export(&ds.records, &path, gt.composite_keys)?;
            files.push(path);
        }
    }

    for ds in datasets {
        let path = layout.canonical_path(&ds.name, &ds.split);
        let summary = writer
            .write(&ds.records, plan.format, &path, &plan.extra_features)
            .with_context(|| format!("Writing '{}'", path.display()))?;
        tracing::debug!(
            "{}: {} of {} rows written as format {}",
            ds.file_stem(),
            summary.rows,
            ds.len(),
            plan.format.tag()
        );
        files.push(path);
    }
    Ok(())
}

/// A failed dataset keeps none of its outputs.
fn remove_written(files: &[PathBuf]) {
    for path in files {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Could not remove '{}': {}", path.display(), e);
        }
    }
}

// ─── Split policies ───────────────────────────────────────────────────────────

fn take(loaded: &mut Vec<(Split, Vec<Record>)>, split: &Split) -> PrepResult<Vec<Record>> {
    let pos = loaded
        .iter()
        .position(|(s, _)| s == split)
        .ok_or_else(|| PrepError::Configuration(format!("split '{split}' was not loaded")))?;
    Ok(loaded.remove(pos).1)
}

fn take_set(loaded: &mut Vec<(Split, Vec<Record>)>) -> PrepResult<SplitSet> {
    Ok(SplitSet::new(
        take(loaded, &Split::Train)?,
        take(loaded, &Split::Dev)?,
        take(loaded, &Split::Test)?,
    ))
}

fn standard(set: SplitSet) -> Vec<(Split, Vec<Record>)> {
    vec![
        (Split::Train, set.train),
        (Split::Dev, set.dev),
        (Split::Test, set.test),
    ]
}

/// Turn the loaded splits into the splits that get written.
pub fn apply_policy(
    policy:     &SplitPolicy,
    mut loaded: Vec<(Split, Vec<Record>)>,
    rng:        &mut StdRng,
) -> PrepResult<Vec<(Split, Vec<Record>)>> {
    let out = match policy {
        SplitPolicy::AsLoaded => loaded,

        SplitPolicy::MergeAndPromote => {
            let shared = take(&mut loaded, &Split::Named(SHARED_TASK_SPLIT.to_string()))?;
            let set = take_set(&mut loaded)?;
            standard(splitter::merge_and_promote(set, shared))
        }

        SplitPolicy::ShuffleResplit { sizes } => {
            let set = take_set(&mut loaded)?;
            let sizes = sizes.unwrap_or_else(|| SplitSizes::of(&set));
            standard(splitter::shuffle_resplit(set, sizes, rng)?)
        }

        SplitPolicy::KWay { folds } => {
            let pool: Vec<Record> = loaded
                .iter()
                .filter(|(s, _)| matches!(s, Split::Train | Split::Dev))
                .flat_map(|(_, records)| records.iter().cloned())
                .collect();
            let pairs = splitter::k_way_split(&pool, *folds, rng)?;
            for (i, (train, dev)) in pairs.into_iter().enumerate() {
                tracing::info!("Fold {}: {} train, {} dev", i, train.len(), dev.len());
                loaded.push((Split::fold(i, &Split::Train), train));
                loaded.push((Split::fold(i, &Split::Dev), dev));
            }
            loaded
        }

        SplitPolicy::NegativeAugmentation { per_question, dev_fraction } => {
            let pool: Vec<Record> = loaded.into_iter().flat_map(|(_, r)| r).collect();
            let augmented = splitter::augment_negatives(pool, *per_question, rng);
            let (train, dev) = splitter::split_train_val(augmented, 1.0 - dev_fraction, rng);
            vec![(Split::Train, train), (Split::Dev, dev)]
        }

        SplitPolicy::PairwiseMultiHypothesis { positive_label } => loaded
            .into_iter()
            .map(|(split, rows)| {
                let fused = splitter::pair_multi_hypothesis(&rows, positive_label, rng);
                (split, fused)
            })
            .collect(),
    };
    Ok(out)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn only_other(root: &Path) -> PrepConfig {
        PrepConfig {
            root_dir:        root.to_path_buf(),
            gt_dir:          root.join("gt"),
            glue_datasets:   Selector::None,
            mediqa_datasets: Selector::None,
            other_datasets:  Selector::All,
            ..PrepConfig::default()
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn snli_row(id: &str, premise: &str, label: &str) -> String {
        format!("{id}\tc\tp\tb1\tb2\tp1\tp2\t{premise}\tA hypothesis.\t{label}\n")
    }

    fn seed_other_family(root: &Path) {
        let scitail = root.join("SciTailV1.1/tsv_format");
        for split in ["train", "dev", "test"] {
            write(
                &scitail.join(format!("scitail_1.0_{split}.tsv")),
                "Plants need light.\tLight feeds\tplants.\tentails\nRocks sing.\tRocks are loud.\tneutral\n",
            );
        }
        for split in ["train", "dev", "test"] {
            let body = format!(
                "header\n{}{}",
                snli_row(&format!("{split}1"), "A dog runs.", "entailment"),
                snli_row(&format!("{split}2"), "A cat sleeps.", "contradiction"),
            );
            write(&root.join(format!("SNLI/{split}.tsv")), &body);
        }
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("ALL".parse::<Selector>().unwrap(), Selector::All);
        assert_eq!("none".parse::<Selector>().unwrap(), Selector::None);
        let err = "mnli".parse::<Selector>().unwrap_err();
        assert!(matches!(err, PrepError::Configuration(_)));
    }

    #[test]
    fn test_missing_root_aborts_before_processing() {
        let dir = tempdir().unwrap();
        let cfg = only_other(&dir.path().join("absent"));
        let err = PrepareUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(err.downcast_ref::<PrepError>(), Some(PrepError::Path(_))));
    }

    #[test]
    fn test_other_family_end_to_end() {
        let dir = tempdir().unwrap();
        seed_other_family(dir.path());

        let report = PrepareUseCase::new(only_other(dir.path())).execute().unwrap();
        assert!(report.is_success());
        assert_eq!(report.completed, vec!["scitail", "snli"]);

        let canon = dir.path().join("canonical_data");
        let snli = fs::read_to_string(canon.join("snli_dev.tsv")).unwrap();
        // Labels mapped to ids, rows in file order
        assert_eq!(
            snli,
            "dev1\t2\tA dog runs.\tA hypothesis.\ndev2\t0\tA cat sleeps.\tA hypothesis.\n"
        );

        // SciTail's first row has a stray tab; the shifted label column
        // no longer maps, so only the clean row survives
        let scitail = fs::read_to_string(canon.join("scitail_train.tsv")).unwrap();
        assert_eq!(scitail, "1\t0\tRocks sing.\tRocks are loud.\n");
        assert!(canon.join("prep_config.json").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempdir().unwrap();
        seed_other_family(dir.path());
        let cfg = only_other(dir.path());

        PrepareUseCase::new(cfg.clone()).execute().unwrap();
        let first = fs::read(dir.path().join("canonical_data/snli_train.tsv")).unwrap();
        PrepareUseCase::new(cfg).execute().unwrap();
        let second = fs::read(dir.path().join("canonical_data/snli_train.tsv")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_files_isolated_by_default() {
        let dir = tempdir().unwrap();
        seed_other_family(dir.path());
        fs::remove_file(dir.path().join("SNLI/test.tsv")).unwrap();

        let report = PrepareUseCase::new(only_other(dir.path())).execute().unwrap();
        assert_eq!(report.completed, vec!["scitail"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "snli");
    }

    #[test]
    fn test_fail_fast_stops_run() {
        let dir = tempdir().unwrap();
        let cfg = PrepConfig {
            failure_policy: FailurePolicy::FailFast,
            ..only_other(dir.path())
        };
        let err = PrepareUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("scitail"));
    }

    fn only_mediqa(root: &Path) -> PrepConfig {
        PrepConfig {
            root_dir:        root.to_path_buf(),
            gt_dir:          root.join("gt"),
            glue_datasets:   Selector::None,
            other_datasets:  Selector::None,
            mediqa_datasets: Selector::All,
            mediqa_folds:    2,
            ..PrepConfig::default()
        }
    }

    fn qa_line(q: u32, a: u32) -> String {
        format!(
            r#"{{"uid":"Q{q}____A{a}","label":{},"premise":"question {q}","hypothesis":"answer {a}","extras":{{"score":1.0,"rank":{a}}}}}"#,
            a % 2
        ) + "\n"
    }

    fn seed_mediqa_qa(root: &Path, test_body: &str) {
        let qa = root.join("MEDIQA2019/MEDIQA_Task3_QA");
        write(&qa.join("train.jsonl"), &(1..=4).map(|a| qa_line(1, a)).collect::<String>());
        write(&qa.join("dev.jsonl"), &(1..=4).map(|a| qa_line(2, a)).collect::<String>());
        write(&qa.join("test.jsonl"), test_body);
    }

    fn failed_names(report: &RunReport) -> Vec<&str> {
        report.failed.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_invalid_later_split_writes_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        // the test split has a record without a hypothesis
        let bad = qa_line(3, 1) + r#"{"uid":"Q3____A2","label":0,"premise":"question 3","extras":{"score":1.0,"rank":2}}"# + "\n";
        seed_mediqa_qa(root, &bad);

        let report = PrepareUseCase::new(only_mediqa(root)).execute().unwrap();
        assert!(failed_names(&report).contains(&"mediqa"));

        let canon = root.join("canonical_data");
        assert!(!canon.join("mediqa_train.tsv").exists());
        assert!(!canon.join("mediqa_dev.tsv").exists());
        assert!(!root.join("gt/task3_qa/gt_dev.csv").exists());
    }

    #[test]
    fn test_write_failure_removes_earlier_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed_mediqa_qa(root, &qa_line(3, 1));
        // a directory in place of the test file makes its write fail
        fs::create_dir_all(root.join("canonical_data/mediqa_test.tsv")).unwrap();

        let report = PrepareUseCase::new(only_mediqa(root)).execute().unwrap();
        assert!(failed_names(&report).contains(&"mediqa"));

        let canon = root.join("canonical_data");
        assert!(!canon.join("mediqa_train.tsv").exists());
        assert!(!canon.join("mediqa_dev.tsv").exists());
        assert!(!root.join("gt/task3_qa/gt_dev.csv").exists());
    }

    #[test]
    fn test_rqe_text_labels_mapped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let line = |id: &str, label: &str| {
            format!(r#"{{"uid":"{id}","label":"{label}","premise":"chq {id}","hypothesis":"faq {id}"}}"#) + "\n"
        };
        for split in ["train", "dev", "test"] {
            let body = line(&format!("{split}1"), "true") + &line(&format!("{split}2"), "false");
            write(&root.join("RQE").join(format!("{split}.jsonl")), &body);
        }

        let report = PrepareUseCase::new(only_mediqa(root)).execute().unwrap();
        assert!(report.completed.iter().any(|n| n == "rqe"));
        let rqe_dev = fs::read_to_string(root.join("canonical_data/rqe_dev.tsv")).unwrap();
        assert_eq!(rqe_dev, "dev1\t1\tchq dev1\tfaq dev1\ndev2\t0\tchq dev2\tfaq dev2\n");
        assert_eq!(
            fs::read_to_string(root.join("gt/task2_rqe/gt_dev.csv")).unwrap(),
            "pair_id,label\ndev1,1\ndev2,0\n"
        );
    }

    #[test]
    fn test_mediqa_family_end_to_end() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        let mednli_line = |id: &str, label: &str| {
            format!(
                r#"{{"pairID":"{id}","sentence1":"s1 {id}","sentence2":"s2 {id}","gold_label":"{label}"}}"#
            ) + "\n"
        };
        let mednli = root.join("mednli-dataset");
        write(&mednli.join("mli_train_v1.jsonl"), &(mednli_line("t1", "entailment") + &mednli_line("t2", "neutral")));
        write(&mednli.join("mli_dev_v1.jsonl"), &mednli_line("d1", "contradiction"));
        write(&mednli.join("mli_test_v1.jsonl"), &mednli_line("x1", "entailment"));
        write(&mednli.join("mednli_bionlp19_shared_task.jsonl"), &mednli_line("s1", "neutral"));

        let rqe_line = |id: &str, label: u8| {
            format!(r#"{{"uid":"{id}","label":{label},"premise":"chq {id}","hypothesis":"faq {id}"}}"#) + "\n"
        };
        for (split, ids) in [("train", ["r1", "r2"]), ("dev", ["r3", "r4"]), ("test", ["r5", "r6"])] {
            let body: String = ids.iter().enumerate().map(|(i, id)| rqe_line(*id, i as u8 % 2)).collect();
            write(&root.join("RQE").join(format!("{split}.jsonl")), &body);
        }

        let qa_line = |q: u32, a: u32| {
            format!(
                r#"{{"uid":"Q{q}____A{a}","label":{},"premise":"question {q}","hypothesis":"answer {a}","extras":{{"score":{}.0,"rank":{a}}}}}"#,
                a % 2,
                a + 1
            ) + "\n"
        };
        let qa = root.join("MEDIQA2019/MEDIQA_Task3_QA");
        write(&qa.join("train.jsonl"), &(1..=6).map(|a| qa_line(1, a)).collect::<String>());
        write(&qa.join("dev.jsonl"), &(1..=4).map(|a| qa_line(2, a)).collect::<String>());
        write(&qa.join("test.jsonl"), &qa_line(3, 1));

        let medquad_line = |q: u32| {
            format!(r#"{{"uid":"mq{q}","label":1,"premise":"what is {q}","hypothesis":"{q} is a thing"}}"#) + "\n"
        };
        write(&root.join("MedQuAD/medquad.jsonl"), &(0..10).map(medquad_line).collect::<String>());

        let cfg = PrepConfig {
            root_dir:        root.to_path_buf(),
            gt_dir:          root.join("gt"),
            glue_datasets:   Selector::None,
            other_datasets:  Selector::None,
            mediqa_datasets: Selector::All,
            mediqa_folds:    2,
            ..PrepConfig::default()
        };
        let report = PrepareUseCase::new(cfg).execute().unwrap();
        assert!(report.is_success(), "{:?}", report.failed);

        let canon = root.join("canonical_data");
        let read = |name: &str| fs::read_to_string(canon.join(name)).unwrap();

        // MedNLI: train = train + dev, dev = old test, test = shared task
        assert_eq!(read("mednli_train.tsv").lines().count(), 3);
        assert_eq!(read("mednli_dev.tsv"), "x1\t2\ts1 x1\ts2 x1\n");
        assert_eq!(
            fs::read_to_string(root.join("gt/task1_mednli/gt_dev.csv")).unwrap(),
            "pair_id,label\nx1,2\n"
        );

        // rqe_shuff keeps the original sizes
        for split in ["train", "dev", "test"] {
            assert_eq!(read(&format!("rqe_shuff_{split}.tsv")).lines().count(), 2);
        }

        // MEDIQA: 6-column rows, composite ground truth, two folds
        let first = read("mediqa_dev.tsv").lines().next().unwrap().to_string();
        assert_eq!(first, "Q2____A1\t1\tquestion 2\tanswer 1\t2.0\t1");
        let gt = fs::read_to_string(root.join("gt/task3_qa/gt_dev.csv")).unwrap();
        assert!(gt.starts_with("qid,aid,label\nQ2,A1,1\n"));
        let fold_devs = read("mediqa_0_dev.tsv").lines().count() + read("mediqa_1_dev.tsv").lines().count();
        assert_eq!(fold_devs, 10);

        // MedQuAD: 10 positives + 2 negatives each = 30, 10% dev
        let medquad = read("medquad_train.tsv").lines().count() + read("medquad_dev.tsv").lines().count();
        assert_eq!(medquad, 30);
        assert_eq!(read("medquad_dev.tsv").lines().count(), 3);
    }
}
