// ============================================================
// Layer 2 — Dataset Catalog
// ============================================================
// Declares every dataset the converter knows about: where its
// split files live, which loader reads them, which row format
// it is written in, and which split policy reshapes it.
//
// Families (each switched on/off from the command line):
//   other   scitail, snli
//   glue    mnli, mrpc, qnli, qqp, rte, wnli, sst, cola, stsb
//           (+ qnnli with --old-glue)
//   mediqa  mednli, rqe, rqe_shuff, mediqa, medquad
//
// Dataset-specific split remapping is spelled out here as a
// SplitPolicy value per dataset; nothing is inferred from names.
//
// Reference: Rust Book §6 (Enums), §17 (Trait Objects)

use std::path::Path;

use crate::application::prepare_use_case::PrepConfig;
use crate::data::{
    loader::{Corpus, JsonlSource, MedNliSource, TsvSource},
    splitter::SplitSizes,
};
use crate::domain::{
    dataset::Split,
    format::DataFormat,
    record::FieldValue,
    traits::RecordSource,
};

/// Loaded split name under which MergeAndPromote expects the
/// separately supplied test set.
pub const SHARED_TASK_SPLIT: &str = "shared_task";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Glue,
    Mediqa,
    Other,
}

/// How loaded splits are regrouped before writing.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitPolicy {
    /// Write splits exactly as loaded
    AsLoaded,
    /// train+dev → train, test → dev, shared_task → test
    MergeAndPromote,
    /// Pool train/dev/test and recut; `None` keeps the loaded sizes
    ShuffleResplit { sizes: Option<SplitSizes> },
    /// Write splits as loaded, plus `folds` (train, dev) pairs
    /// drawn from pooled train + dev
    KWay { folds: usize },
    /// Pool everything, add negatives, then cut into train/dev
    NegativeAugmentation { per_question: usize, dev_fraction: f64 },
    /// Fuse consecutive same-question pair rows into
    /// two-candidate records
    PairwiseMultiHypothesis { positive_label: FieldValue },
}

/// Which splits get a ground-truth CSV, and in which layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthSpec {
    pub task:           String,
    pub splits:         Vec<Split>,
    pub composite_keys: bool,
}

/// One split file and the loader that reads it.
pub struct SplitInput {
    pub split:  Split,
    pub source: Box<dyn RecordSource>,
}

/// Everything needed to produce one dataset's output files.
pub struct DatasetPlan {
    pub name:           String,
    pub provenance:     String,
    pub family:         Family,
    pub format:         DataFormat,
    pub inputs:         Vec<SplitInput>,
    pub policy:         SplitPolicy,
    pub extra_features: Vec<String>,
    pub ground_truth:   Option<GroundTruthSpec>,
}

impl DatasetPlan {
    fn new(name: &str, provenance: &str, family: Family, format: DataFormat) -> Self {
        Self {
            name:           name.to_string(),
            provenance:     provenance.to_string(),
            family,
            format,
            inputs:         Vec::new(),
            policy:         SplitPolicy::AsLoaded,
            extra_features: Vec::new(),
            ground_truth:   None,
        }
    }

    fn input(mut self, split: Split, source: impl RecordSource + 'static) -> Self {
        self.inputs.push(SplitInput { split, source: Box::new(source) });
        self
    }

    fn policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn ground_truth(mut self, task: &str, composite_keys: bool) -> Self {
        self.ground_truth = Some(GroundTruthSpec {
            task: task.to_string(),
            splits: vec![Split::Dev],
            composite_keys,
        });
        self
    }

    /// Standard train/dev/test TSV trio in `dir`.
    fn glue_trio(self, dir: &Path, corpus: Corpus) -> Self {
        self.input(Split::Train, TsvSource::labelled(dir.join("train.tsv"), corpus))
            .input(Split::Dev, TsvSource::labelled(dir.join("dev.tsv"), corpus))
            .input(Split::Test, TsvSource::test(dir.join("test.tsv"), corpus))
    }

    /// train/dev/test JSON-lines interchange files in `dir`, text
    /// labels mapped through `label_map`.
    fn jsonl_trio(self, dir: &Path, label_map: &'static str) -> Self {
        let source =
            |split: &str| JsonlSource::labelled_by(dir.join(format!("{split}.jsonl")), label_map);
        self.input(Split::Train, source("train"))
            .input(Split::Dev, source("dev"))
            .input(Split::Test, source("test"))
    }
}

/// The plans enabled by `cfg`, in processing order.
pub fn build(cfg: &PrepConfig) -> Vec<DatasetPlan> {
    let mut plans = other_plans(&cfg.root_dir);
    plans.extend(glue_plans(&cfg.root_dir, cfg.old_glue));
    plans.extend(mediqa_plans(cfg));
    plans.retain(|p| cfg.selector(p.family).is_enabled());
    plans
}

fn other_plans(root: &Path) -> Vec<DatasetPlan> {
    use crate::domain::format::DataFormat::PremiseAndOneHypothesis as Pair;

    let scitail_dir = root.join("SciTailV1.1").join("tsv_format");
    let scitail = |split: &str| scitail_dir.join(format!("scitail_1.0_{split}.tsv"));

    vec![
        DatasetPlan::new("scitail", "SciTail", Family::Other, Pair)
            .input(Split::Train, TsvSource::labelled(scitail("train"), Corpus::SciTail))
            .input(Split::Dev, TsvSource::labelled(scitail("dev"), Corpus::SciTail))
            .input(Split::Test, TsvSource::labelled(scitail("test"), Corpus::SciTail)),
        // SNLI's test set is labelled
        DatasetPlan::new("snli", "SNLI", Family::Other, Pair)
            .input(Split::Train, TsvSource::labelled(root.join("SNLI/train.tsv"), Corpus::Snli))
            .input(Split::Dev, TsvSource::labelled(root.join("SNLI/dev.tsv"), Corpus::Snli))
            .input(Split::Test, TsvSource::labelled(root.join("SNLI/test.tsv"), Corpus::Snli)),
    ]
}

fn glue_plans(root: &Path, old_glue: bool) -> Vec<DatasetPlan> {
    use crate::domain::format::DataFormat::{
        PremiseAndMultiHypothesis as Multi, PremiseAndOneHypothesis as Pair, PremiseOnly,
    };

    let mnli = root.join("MNLI");
    let named = |s: &str| Split::Named(s.to_string());

    let mut plans = vec![
        DatasetPlan::new("mnli", "MultiNLI", Family::Glue, Pair)
            .input(Split::Train, TsvSource::labelled(mnli.join("train.tsv"), Corpus::Mnli))
            .input(named("matched_dev"), TsvSource::labelled(mnli.join("dev_matched.tsv"), Corpus::Mnli))
            .input(named("mismatched_dev"), TsvSource::labelled(mnli.join("dev_mismatched.tsv"), Corpus::Mnli))
            .input(named("matched_test"), TsvSource::test(mnli.join("test_matched.tsv"), Corpus::Mnli))
            .input(named("mismatched_test"), TsvSource::test(mnli.join("test_mismatched.tsv"), Corpus::Mnli)),
        DatasetPlan::new("mrpc", "MRPC", Family::Glue, Pair).glue_trio(&root.join("MRPC"), Corpus::Mrpc),
        DatasetPlan::new("qnli", "QNLI", Family::Glue, Pair).glue_trio(&root.join("QNLI"), Corpus::Qnli),
    ];

    if old_glue {
        plans.push(
            DatasetPlan::new("qnnli", "QNLI", Family::Glue, Multi)
                .glue_trio(&root.join("QNLI"), Corpus::Qnli)
                .policy(SplitPolicy::PairwiseMultiHypothesis {
                    // "entailment" in the qnli label map
                    positive_label: FieldValue::Int(1),
                }),
        );
    }

    plans.extend([
        DatasetPlan::new("qqp", "QQP", Family::Glue, Pair).glue_trio(&root.join("QQP"), Corpus::Qqp),
        DatasetPlan::new("rte", "RTE", Family::Glue, Pair).glue_trio(&root.join("RTE"), Corpus::Rte),
        DatasetPlan::new("wnli", "WNLI", Family::Glue, Pair).glue_trio(&root.join("WNLI"), Corpus::Wnli),
        DatasetPlan::new("sst", "SST-2", Family::Glue, PremiseOnly).glue_trio(&root.join("SST-2"), Corpus::Sst),
        DatasetPlan::new("cola", "CoLA", Family::Glue, PremiseOnly).glue_trio(&root.join("CoLA"), Corpus::Cola),
        DatasetPlan::new("stsb", "STS-B", Family::Glue, Pair).glue_trio(&root.join("STS-B"), Corpus::Stsb),
    ]);
    plans
}

fn mediqa_plans(cfg: &PrepConfig) -> Vec<DatasetPlan> {
    use crate::domain::format::DataFormat::PremiseAndOneHypothesis as Pair;

    let root = &cfg.root_dir;
    let mednli = root.join("mednli-dataset");
    let rqe = root.join("RQE");
    let qa = root.join("MEDIQA2019").join("MEDIQA_Task3_QA");

    let mut mediqa = DatasetPlan::new("mediqa", "MEDIQA 2019 QA", Family::Mediqa, Pair)
        .jsonl_trio(&qa, "mediqa")
        .policy(SplitPolicy::KWay { folds: cfg.mediqa_folds })
        .ground_truth("task3_qa", true);
    mediqa.extra_features = vec!["score".to_string(), "rank".to_string()];

    vec![
        DatasetPlan::new("mednli", "MedNLI", Family::Mediqa, Pair)
            .input(Split::Train, MedNliSource::new(mednli.join("mli_train_v1.jsonl")))
            .input(Split::Dev, MedNliSource::new(mednli.join("mli_dev_v1.jsonl")))
            .input(Split::Test, MedNliSource::new(mednli.join("mli_test_v1.jsonl")))
            .input(
                Split::Named(SHARED_TASK_SPLIT.to_string()),
                MedNliSource::new(mednli.join("mednli_bionlp19_shared_task.jsonl")),
            )
            .policy(SplitPolicy::MergeAndPromote)
            .ground_truth("task1_mednli", false),
        DatasetPlan::new("rqe", "RQE AMIA 2016", Family::Mediqa, Pair)
            .jsonl_trio(&rqe, "rqe")
            .ground_truth("task2_rqe", false),
        DatasetPlan::new("rqe_shuff", "RQE AMIA 2016", Family::Mediqa, Pair)
            .jsonl_trio(&rqe, "rqe")
            .policy(SplitPolicy::ShuffleResplit { sizes: None }),
        mediqa,
        DatasetPlan::new("medquad", "MedQuAD", Family::Mediqa, Pair)
            .input(Split::Train, JsonlSource::new(root.join("MedQuAD").join("medquad.jsonl")))
            .policy(SplitPolicy::NegativeAugmentation {
                per_question: cfg.medquad_negatives,
                dev_fraction: cfg.medquad_dev_fraction,
            }),
    ]
}
