// ============================================================
// Layer 4 — Ground-Truth Exporter
// ============================================================
// Writes the reduced identifier + label file an external scorer
// compares predictions against.
//
// Two layouts, chosen by the caller:
//   composite_keys = false     composite_keys = true
//     pair_id,label              qid,aid,label
//     X7,1                       Q1,A2,1
//
// Composite uids are "<qid>____<aid>". Values are written
// unquoted, so ids and labels may not contain a comma. Every
// record is checked before the file is created, so a malformed id
// never leaves a truncated CSV behind.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::domain::{
    errors::{PrepError, PrepResult},
    record::Record,
};

/// Separator between question and answer ids in composite uids.
pub const COMPOSITE_SEPARATOR: &str = "____";

/// One projected row of a ground-truth file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroundTruthEntry {
    Simple { pair_id: String, label: String },
    Composite { qid: String, aid: String, label: String },
}

impl GroundTruthEntry {
    /// Project `record` to its id(s) and label.
    pub fn from_record(record: &Record, composite_keys: bool) -> PrepResult<Self> {
        if record.uid.contains(',') {
            return Err(PrepError::MalformedIdentifier { uid: record.uid.clone() });
        }
        let label = record.label_text();
        if label.contains(',') {
            return Err(PrepError::DelimiterInField {
                uid:   record.uid.clone(),
                field: "label".to_string(),
            });
        }
        if !composite_keys {
            return Ok(GroundTruthEntry::Simple {
                pair_id: record.uid.clone(),
                label,
            });
        }

        let (qid, aid) = split_composite(&record.uid)?;
        Ok(GroundTruthEntry::Composite {
            qid: qid.to_string(),
            aid: aid.to_string(),
            label,
        })
    }

    fn to_csv_line(&self) -> String {
        match self {
            GroundTruthEntry::Simple { pair_id, label } => format!("{pair_id},{label}"),
            GroundTruthEntry::Composite { qid, aid, label } => format!("{qid},{aid},{label}"),
        }
    }
}

/// Split "<qid>____<aid>" into exactly two non-empty parts.
pub fn split_composite(uid: &str) -> PrepResult<(&str, &str)> {
    let malformed = || PrepError::MalformedIdentifier { uid: uid.to_string() };
    let mut parts = uid.split(COMPOSITE_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(q), Some(a), None) if !q.is_empty() && !a.is_empty() => Ok((q, a)),
        _ => Err(malformed()),
    }
}

/// Header row for the chosen layout.
pub fn header(composite_keys: bool) -> &'static str {
    if composite_keys {
        "qid,aid,label"
    } else {
        "pair_id,label"
    }
}

/// Check that every record projects to a well-formed CSV row.
pub fn check(records: &[Record], composite_keys: bool) -> PrepResult<()> {
    records
        .iter()
        .try_for_each(|r| GroundTruthEntry::from_record(r, composite_keys).map(drop))
}

/// Write the ground-truth CSV for `records` to `destination`,
/// creating parent directories as needed. Returns the row count.
pub fn export(records: &[Record], destination: &Path, composite_keys: bool) -> PrepResult<usize> {
    let entries = records
        .iter()
        .map(|r| GroundTruthEntry::from_record(r, composite_keys))
        .collect::<PrepResult<Vec<_>>>()?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let unlabeled = records.iter().filter(|r| r.is_unlabeled()).count();
    if unlabeled > 0 {
        tracing::warn!(
            "{} ground-truth rows in '{}' have no label",
            unlabeled,
            destination.display()
        );
    }

    let mut out = BufWriter::new(File::create(destination)?);
    writeln!(out, "{}", header(composite_keys))?;
    for entry in &entries {
        writeln!(out, "{}", entry.to_csv_line())?;
    }
    out.flush()?;

    tracing::info!(
        "Exported {} ground-truth rows to '{}'",
        entries.len(),
        destination.display()
    );
    Ok(entries.len())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_composite_export() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("task3_qa").join("gt_dev.csv");
        let records = vec![Record::pair("Q1____A2", Some(1i64.into()), "q", "a")];
        let rows = export(&records, &dest, true).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "qid,aid,label\nQ1,A2,1\n");
    }

    #[test]
    fn test_simple_export() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("gt_dev.csv");
        let records = vec![
            Record::pair("X7", Some("0".into()), "p", "h"),
            Record::pair("X8", Some("1".into()), "p", "h"),
        ];
        export(&records, &dest, false).unwrap();
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "pair_id,label\nX7,0\nX8,1\n"
        );
    }

    #[test]
    fn test_simple_mode_keeps_separator_in_uid() {
        let r = Record::pair("Q1____A2", Some(1i64.into()), "q", "a");
        let entry = GroundTruthEntry::from_record(&r, false).unwrap();
        assert_eq!(entry.to_csv_line(), "Q1____A2,1");
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("gt_dev.csv");
        let records = vec![
            Record::pair("Q1____A1", Some(1i64.into()), "q", "a"),
            Record::pair("Q1-A2", Some(0i64.into()), "q", "a"),
        ];
        let err = export(&records, &dest, true).unwrap_err();
        assert!(matches!(err, PrepError::MalformedIdentifier { uid } if uid == "Q1-A2"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_comma_in_uid_is_malformed() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("gt_dev.csv");
        let records = vec![Record::pair("X7,X8", Some(1i64.into()), "p", "h")];
        let err = export(&records, &dest, false).unwrap_err();
        assert!(matches!(err, PrepError::MalformedIdentifier { uid } if uid == "X7,X8"));
        assert!(!dest.exists());

        let composite = vec![Record::pair("Q1____A1,A2", Some(1i64.into()), "q", "a")];
        assert!(matches!(
            check(&composite, true),
            Err(PrepError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_comma_in_label_rejected() {
        let records = vec![Record::pair("X7", Some("a,b".into()), "p", "h")];
        let err = check(&records, false).unwrap_err();
        assert!(matches!(err, PrepError::DelimiterInField { field, .. } if field == "label"));
    }

    #[test]
    fn test_split_composite_rejects_extra_parts() {
        assert!(split_composite("a____b____c").is_err());
        assert!(split_composite("____b").is_err());
        assert_eq!(split_composite("q____a").unwrap(), ("q", "a"));
    }
}
