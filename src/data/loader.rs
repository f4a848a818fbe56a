// ============================================================
// Layer 4 — Corpus Loaders
// ============================================================
// Reads the raw benchmark files and turns every row into a
// Record. Three sources implement RecordSource:
//
//   TsvSource     GLUE, SNLI and SciTail tab-separated dumps
//   MedNliSource  MedNLI JSON-lines ({pairID, sentence1, ...})
//   JsonlSource   records already in the canonical JSON shape
//                 (RQE / MEDIQA / MedQuAD interchange exports),
//                 text labels optionally mapped through a LabelMap
//
// Column positions differ per corpus and between the labelled
// (train/dev) and unlabeled (test) files of the same corpus;
// Corpus::layout holds that table. Rows that cannot be parsed
// (too few columns, a label outside the vocabulary) are skipped
// and counted, never fatal.
//
// Reference: Rust Book §8 (Collections)
//            Rust Book §9 (Error Handling)
//            serde_json documentation (from_str)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::{
    label_map::LabelMaps,
    record::{FieldValue, Record},
    traits::RecordSource,
};

// ─── Column layouts ───────────────────────────────────────────────────────────

/// A column position counted from the start or the end of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Col {
    At(usize),
    Last,
}

impl Col {
    fn get<'a>(self, cols: &[&'a str]) -> Option<&'a str> {
        match self {
            Col::At(i) => cols.get(i).copied(),
            Col::Last => cols.last().copied(),
        }
    }
}

/// How a corpus stores its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelKind {
    /// No label column (test files)
    Absent,
    /// Text label mapped through the named LabelMap
    Mapped(Col, &'static str),
    /// Integer class id
    Int(Col),
    /// Regression score
    Float(Col),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub header:     bool,
    /// `None` numbers rows in file order
    pub uid:        Option<Col>,
    pub premise:    Col,
    pub hypothesis: Option<Col>,
    pub label:      LabelKind,
}

/// The tab-separated corpora the catalog knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corpus {
    Mnli,
    Snli,
    SciTail,
    Rte,
    Qnli,
    Wnli,
    Mrpc,
    Qqp,
    Sst,
    Cola,
    Stsb,
}

impl Corpus {
    /// Column layout of the labelled (`is_train`) or test file.
    pub fn layout(self, is_train: bool) -> Layout {
        use Col::{At, Last};

        let pair = |uid, p, h, label| Layout {
            header: true,
            uid: Some(At(uid)),
            premise: At(p),
            hypothesis: Some(At(h)),
            label,
        };

        match (self, is_train) {
            (Corpus::Mnli, true) => pair(0, 8, 9, LabelKind::Mapped(Last, "mnli")),
            (Corpus::Mnli, false) => pair(0, 8, 9, LabelKind::Absent),
            (Corpus::Snli, true) => pair(0, 7, 8, LabelKind::Mapped(Last, "snli")),
            (Corpus::Snli, false) => pair(0, 7, 8, LabelKind::Absent),
            (Corpus::SciTail, _) => Layout {
                header: false,
                uid: None,
                premise: At(0),
                hypothesis: Some(At(1)),
                label: LabelKind::Mapped(At(2), "scitail"),
            },
            (Corpus::Rte, true) => pair(0, 1, 2, LabelKind::Mapped(At(3), "rte")),
            (Corpus::Qnli, true) => pair(0, 1, 2, LabelKind::Mapped(At(3), "qnli")),
            (Corpus::Wnli, true) => pair(0, 1, 2, LabelKind::Int(At(3))),
            (Corpus::Rte | Corpus::Qnli | Corpus::Wnli, false) => {
                pair(0, 1, 2, LabelKind::Absent)
            }
            (Corpus::Mrpc, true) => Layout {
                header: true,
                uid: None,
                premise: At(3),
                hypothesis: Some(At(4)),
                label: LabelKind::Int(At(0)),
            },
            (Corpus::Mrpc, false) => pair(0, 3, 4, LabelKind::Absent),
            (Corpus::Qqp, true) => pair(0, 3, 4, LabelKind::Int(At(5))),
            (Corpus::Qqp, false) => pair(0, 1, 2, LabelKind::Absent),
            (Corpus::Sst, true) => Layout {
                header: true,
                uid: None,
                premise: At(0),
                hypothesis: None,
                label: LabelKind::Int(At(1)),
            },
            (Corpus::Sst, false) => Layout {
                header: true,
                uid: Some(At(0)),
                premise: At(1),
                hypothesis: None,
                label: LabelKind::Absent,
            },
            // CoLA train/dev ship without a header row
            (Corpus::Cola, true) => Layout {
                header: false,
                uid: None,
                premise: At(3),
                hypothesis: None,
                label: LabelKind::Int(At(1)),
            },
            (Corpus::Cola, false) => Layout {
                header: true,
                uid: Some(At(0)),
                premise: At(1),
                hypothesis: None,
                label: LabelKind::Absent,
            },
            (Corpus::Stsb, true) => pair(0, 7, 8, LabelKind::Float(At(9))),
            (Corpus::Stsb, false) => pair(0, 7, 8, LabelKind::Absent),
        }
    }
}

/// Parse one split row into a record. `row_index` numbers data
/// rows for corpora without an id column.
pub fn parse_row(
    line:      &str,
    row_index: usize,
    layout:    &Layout,
    labels:    &LabelMaps,
) -> Option<Record> {
    let cols: Vec<&str> = line.split('\t').collect();

    let uid = match layout.uid {
        Some(col) => col.get(&cols)?.trim().to_string(),
        None => row_index.to_string(),
    };
    let premise = layout.premise.get(&cols)?;

    let label = match layout.label {
        LabelKind::Absent => None,
        LabelKind::Mapped(col, map) => {
            let id = labels.get(map)?.id_of(col.get(&cols)?)?;
            Some(FieldValue::from(id))
        }
        LabelKind::Int(col) => Some(FieldValue::Int(col.get(&cols)?.trim().parse().ok()?)),
        LabelKind::Float(col) => Some(FieldValue::Float(col.get(&cols)?.trim().parse().ok()?)),
    };

    let record = match layout.hypothesis {
        Some(col) => Record::pair(uid, label, premise, col.get(&cols)?),
        None => Record::premise_only(uid, label, premise),
    };
    Some(record)
}

// ─── TsvSource ────────────────────────────────────────────────────────────────

/// One tab-separated split file of a known corpus.
pub struct TsvSource {
    path:     PathBuf,
    corpus:   Corpus,
    is_train: bool,
}

impl TsvSource {
    /// A labelled (train or dev) file.
    pub fn labelled(path: impl Into<PathBuf>, corpus: Corpus) -> Self {
        Self { path: path.into(), corpus, is_train: true }
    }

    /// An unlabeled test file.
    pub fn test(path: impl Into<PathBuf>, corpus: Corpus) -> Self {
        Self { path: path.into(), corpus, is_train: false }
    }
}

impl RecordSource for TsvSource {
    fn load(&self, labels: &LabelMaps) -> Result<Vec<Record>> {
        let text = read_text(&self.path)?;
        let layout = self.corpus.layout(self.is_train);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let rows = text
            .lines()
            .skip(usize::from(layout.header))
            .filter(|l| !l.trim().is_empty());

        for (row_index, line) in rows.enumerate() {
            match parse_row(line, row_index, &layout, labels) {
                Some(r) => records.push(r),
                None => {
                    tracing::debug!(
                        "Skipping malformed row {} of '{}'",
                        row_index,
                        self.path.display()
                    );
                    skipped += 1;
                }
            }
        }

        tracing::info!(
            "Loaded {} {:?} rows from '{}' ({} skipped)",
            records.len(),
            self.corpus,
            self.path.display(),
            skipped
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("{:?} tsv '{}'", self.corpus, self.path.display())
    }
}

// ─── MedNliSource ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MedNliLine {
    #[serde(rename = "pairID")]
    pair_id:    String,
    sentence1:  String,
    sentence2:  String,
    #[serde(default)]
    gold_label: Option<String>,
}

/// MedNLI JSON-lines file; labels go through the "mednli" map.
pub struct MedNliSource {
    path: PathBuf,
}

impl MedNliSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for MedNliSource {
    fn load(&self, labels: &LabelMaps) -> Result<Vec<Record>> {
        let map = labels
            .get("mednli")
            .context("No label map configured for 'mednli'")?;

        let text = read_text(&self.path)?;
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (n, line) in json_lines(&text) {
            let row: MedNliLine = serde_json::from_str(line).with_context(|| {
                format!("Bad MedNLI line {} in '{}'", n + 1, self.path.display())
            })?;

            let label = match row.gold_label.as_deref() {
                None => None,
                Some(l) => match map.id_of(l) {
                    Some(id) => Some(FieldValue::from(id)),
                    None => {
                        skipped += 1;
                        continue;
                    }
                },
            };
            records.push(Record::pair(row.pair_id, label, row.sentence1, row.sentence2));
        }

        tracing::info!(
            "Loaded {} MedNLI rows from '{}' ({} skipped)",
            records.len(),
            self.path.display(),
            skipped
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("MedNLI jsonl '{}'", self.path.display())
    }
}

// ─── JsonlSource ──────────────────────────────────────────────────────────────

/// JSON-lines file whose lines already deserialize into Record.
///
/// With a label map name, text labels ("true", "1") are mapped to
/// class ids through that map; rows whose text label is outside
/// the map are skipped. Numeric labels pass through unchanged.
pub struct JsonlSource {
    path:      PathBuf,
    label_map: Option<&'static str>,
}

impl JsonlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), label_map: None }
    }

    /// Map text labels through the named LabelMap.
    pub fn labelled_by(path: impl Into<PathBuf>, label_map: &'static str) -> Self {
        Self { path: path.into(), label_map: Some(label_map) }
    }
}

impl RecordSource for JsonlSource {
    fn load(&self, labels: &LabelMaps) -> Result<Vec<Record>> {
        let map = match self.label_map {
            Some(name) => Some(
                labels
                    .get(name)
                    .with_context(|| format!("No label map configured for '{name}'"))?,
            ),
            None => None,
        };

        let text = read_text(&self.path)?;
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (n, line) in json_lines(&text) {
            let mut record: Record = serde_json::from_str(line).with_context(|| {
                format!("Bad record on line {} of '{}'", n + 1, self.path.display())
            })?;

            if let (Some(map), Some(FieldValue::Text(label))) = (map, record.label.as_ref()) {
                let Some(id) = map.id_of(label) else {
                    tracing::debug!(
                        "Skipping record '{}' of '{}': unknown label '{}'",
                        record.uid,
                        self.path.display(),
                        label
                    );
                    skipped += 1;
                    continue;
                };
                record.label = Some(FieldValue::from(id));
            }
            records.push(record);
        }

        tracing::info!(
            "Loaded {} records from '{}' ({} skipped)",
            records.len(),
            self.path.display(),
            skipped
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("jsonl '{}'", self.path.display())
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read '{}'", path.display()))
}

/// Non-blank lines with their zero-based line numbers.
fn json_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Hypothesis;
    use tempfile::tempdir;

    fn load(name: &str, content: &str, source: impl Fn(PathBuf) -> Box<dyn RecordSource>) -> Vec<Record> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        source(path).load(&LabelMaps::default()).unwrap()
    }

    #[test]
    fn test_rte_labelled_rows() {
        let tsv = "index\tsentence1\tsentence2\tlabel\n\
                   0\tA man sleeps.\tSomeone rests.\tentailment\n\
                   1\tIt rains.\tIt is sunny.\tnot_entailment\n";
        let records = load("train.tsv", tsv, |p| Box::new(TsvSource::labelled(p, Corpus::Rte)));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].uid, "0");
        assert_eq!(records[0].label, Some(FieldValue::Int(1)));
        assert_eq!(records[1].single_hypothesis(), Some("It is sunny."));
    }

    #[test]
    fn test_unknown_label_row_skipped() {
        // SNLI marks pairs without annotator agreement with "-"
        let header = (0..10).map(|i| format!("c{i}")).collect::<Vec<_>>().join("\t");
        let row = |id: &str, label: &str| {
            format!("{id}\tx\tx\tx\tx\tx\tx\tPremise {id}\tHypothesis {id}\t{label}")
        };
        let tsv = format!("{header}\n{}\n{}\n", row("a", "neutral"), row("b", "-"));
        let records = load("dev.tsv", &tsv, |p| Box::new(TsvSource::labelled(p, Corpus::Snli)));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].premise, "Premise a");
        assert_eq!(records[0].label, Some(FieldValue::Int(1)));
    }

    #[test]
    fn test_sst_test_rows_are_unlabeled() {
        let tsv = "index\tsentence\n0\tgreat film\n1\tdull\n";
        let records = load("test.tsv", tsv, |p| Box::new(TsvSource::test(p, Corpus::Sst)));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Record::is_unlabeled));
        assert!(records[1].hypothesis.is_none());
    }

    #[test]
    fn test_cola_has_no_header_and_numbers_rows() {
        let tsv = "gj04\t1\t\tThe sailors rode the breeze.\ngj04\t0\t*\tThe more we study.\n";
        let records = load("train.tsv", tsv, |p| Box::new(TsvSource::labelled(p, Corpus::Cola)));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].uid, "1");
        assert_eq!(records[1].label, Some(FieldValue::Int(0)));
    }

    #[test]
    fn test_stsb_score_is_float() {
        let row = "0\tg\tf\ty\to\ts1\ts2\tA plane takes off.\tAn air plane is taking off.\t5.000";
        let tsv = format!("header\n{row}\n");
        let records = load("dev.tsv", &tsv, |p| Box::new(TsvSource::labelled(p, Corpus::Stsb)));
        assert_eq!(records[0].label, Some(FieldValue::Float(5.0)));
        assert_eq!(records[0].label_text(), "5.0");
    }

    #[test]
    fn test_short_row_skipped() {
        let tsv = "index\tq\ts\tlabel\n0\tonly question\n";
        let records = load("dev.tsv", tsv, |p| Box::new(TsvSource::labelled(p, Corpus::Qnli)));
        assert!(records.is_empty());
    }

    #[test]
    fn test_mednli_jsonl() {
        let jsonl = concat!(
            r#"{"pairID":"p1","sentence1":"Pt has fever.","sentence2":"Pt is febrile.","gold_label":"entailment"}"#,
            "\n\n",
            r#"{"pairID":"p2","sentence1":"a","sentence2":"b"}"#,
            "\n"
        );
        let records = load("mli_dev.jsonl", jsonl, |p| Box::new(MedNliSource::new(p)));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, Some(FieldValue::Int(2)));
        assert!(records[1].is_unlabeled());
    }

    #[test]
    fn test_interchange_jsonl() {
        let jsonl = r#"{"uid":"Q1____A1","label":1,"premise":"q","hypothesis":"a","extras":{"score":3.0,"rank":1}}"#;
        let records = load("mediqa_dev.jsonl", jsonl, |p| Box::new(JsonlSource::new(p)));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hypothesis, Some(Hypothesis::Single("a".into())));
    }

    #[test]
    fn test_jsonl_text_labels_mapped() {
        let jsonl = concat!(
            r#"{"uid":"r1","label":"true","premise":"chq","hypothesis":"faq"}"#,
            "\n",
            r#"{"uid":"r2","label":"false","premise":"chq","hypothesis":"faq"}"#,
            "\n",
            r#"{"uid":"r3","label":"maybe","premise":"chq","hypothesis":"faq"}"#,
            "\n",
            r#"{"uid":"r4","label":1,"premise":"chq","hypothesis":"faq"}"#,
            "\n"
        );
        let records = load("rqe_dev.jsonl", jsonl, |p| Box::new(JsonlSource::labelled_by(p, "rqe")));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].label_text(), "1");
        assert_eq!(records[1].label_text(), "0");
        // numeric labels are kept as they are
        assert_eq!(records[2].uid, "r4");
        assert_eq!(records[2].label, Some(FieldValue::Int(1)));
    }

    #[test]
    fn test_jsonl_label_override_applies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rqe_dev.jsonl");
        fs::write(&path, r#"{"uid":"r1","label":"true","premise":"q","hypothesis":"a"}"#).unwrap();

        let mut labels = LabelMaps::default();
        let overrides: LabelMaps =
            serde_json::from_str(r#"{"maps":{"rqe":{"labels":["true","false"]}}}"#).unwrap();
        labels.merge(overrides);

        let records = JsonlSource::labelled_by(path, "rqe").load(&labels).unwrap();
        assert_eq!(records[0].label, Some(FieldValue::Int(0)));
    }

    #[test]
    fn test_jsonl_without_map_keeps_text_label() {
        let jsonl = r#"{"uid":"m1","label":"yes","premise":"q","hypothesis":"a"}"#;
        let records = load("medquad.jsonl", jsonl, |p| Box::new(JsonlSource::new(p)));
        assert_eq!(records[0].label_text(), "yes");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let source = TsvSource::labelled(dir.path().join("absent.tsv"), Corpus::Mnli);
        assert!(source.load(&LabelMaps::default()).is_err());
    }
}
