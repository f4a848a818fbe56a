// ============================================================
// Layer 4 — Canonical Writer
// ============================================================
// Writes a record collection as a tab-delimited, headerless
// file in the column layout of one DataFormat.
//
// Steps for each destination:
//   1. Resolve the format        (tagged writes parse first)
//   2. Validate every record     (nothing is opened on failure)
//   3. Sanitize a working copy   (callers never see the edit)
//   4. Render + write each row   (input order, one line each)
//
// If an I/O error interrupts step 4 the partial file is removed,
// so a destination is either complete or absent.
//
// Example (PremiseAndMultiHypothesis, two candidates):
//   "7\t101,102\t0\tWho wrote it?\tShe wrote it.\tIt rained.\n"
//
// Reference: Rust Book §12 (I/O and File Handling)
//            std::io::BufWriter documentation

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::data::sanitizer::{contains_delimiter, sanitize};
use crate::domain::{
    errors::{PrepError, PrepResult},
    format::DataFormat,
    record::{FieldValue, Hypothesis, Record},
};

/// What a successful write produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    pub rows:      usize,
    pub unlabeled: usize,
}

/// Writes canonical TSV files.
pub struct CanonicalWriter;

impl CanonicalWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `records` to `destination` in `format`.
    ///
    /// `extra_features` names extra columns appended after the
    /// hypothesis for PremiseAndOneHypothesis; pass `&[]` for none.
    pub fn write(
        &self,
        records:        &[Record],
        format:         DataFormat,
        destination:    &Path,
        extra_features: &[String],
    ) -> PrepResult<WriteSummary> {
        if !format.supports_extra_features() && !extra_features.is_empty() {
            tracing::warn!(
                "Ignoring extra features {:?}: {} rows have no feature columns",
                extra_features,
                format
            );
        }
        let extras = active_extras(format, extra_features);
        self.check(records, format, extra_features)?;

        let summary = match write_rows(records, format, destination, extras) {
            Ok(summary) => summary,
            Err(e) => {
                // Never leave a half-written canonical file behind
                if let Err(rm) = fs::remove_file(destination) {
                    tracing::warn!(
                        "Could not remove partial file '{}': {}",
                        destination.display(),
                        rm
                    );
                }
                return Err(e);
            }
        };

        if summary.unlabeled > 0 {
            tracing::warn!(
                "{} of {} rows in '{}' have no label; wrote sentinel '{}'",
                summary.unlabeled,
                summary.rows,
                destination.display(),
                crate::domain::record::UNLABELED
            );
        }
        tracing::debug!(
            "Wrote {} {} rows to '{}'",
            summary.rows,
            format,
            destination.display()
        );
        Ok(summary)
    }

    /// Validate `records` for `format` without touching the disk.
    /// `write` runs the same checks; callers writing several files
    /// use this to reject a dataset before any of them exists.
    pub fn check(
        &self,
        records:        &[Record],
        format:         DataFormat,
        extra_features: &[String],
    ) -> PrepResult<()> {
        let extras = active_extras(format, extra_features);
        records.iter().try_for_each(|r| validate(r, format, extras))
    }

    /// Same as [`write`](Self::write) but takes the format as a tag
    /// string ("2", "PremiseOnly", ...). An unknown tag fails before
    /// the destination is touched.
    pub fn write_tagged(
        &self,
        records:        &[Record],
        format_tag:     &str,
        destination:    &Path,
        extra_features: &[String],
    ) -> PrepResult<WriteSummary> {
        let format: DataFormat = format_tag.parse()?;
        self.write(records, format, destination, extra_features)
    }
}

impl Default for CanonicalWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Extra columns actually written for `format`.
fn active_extras(format: DataFormat, extra_features: &[String]) -> &[String] {
    if format.supports_extra_features() {
        extra_features
    } else {
        &[]
    }
}

fn missing(record: &Record, field: &str) -> PrepError {
    PrepError::MissingField {
        uid:   record.uid.clone(),
        field: field.to_string(),
    }
}

/// Check that `record` carries every field `format` writes.
fn validate(record: &Record, format: DataFormat, extras: &[String]) -> PrepResult<()> {
    // An empty label column would be indistinguishable from a
    // parsing error downstream; unlabeled rows use the sentinel.
    if matches!(&record.label, Some(FieldValue::Text(l)) if l.trim().is_empty()) {
        return Err(missing(record, "label"));
    }

    match format {
        DataFormat::PremiseOnly | DataFormat::Sequence => {}
        DataFormat::PremiseAndOneHypothesis => {
            if record.single_hypothesis().is_none() {
                return Err(missing(record, "hypothesis"));
            }
        }
        DataFormat::PremiseAndMultiHypothesis => {
            if record.ruid.is_none() {
                return Err(missing(record, "ruid"));
            }
            match &record.hypothesis {
                Some(Hypothesis::Multi(hs)) if !hs.is_empty() => {}
                _ => return Err(missing(record, "hypothesis")),
            }
        }
    }

    // Extras are written verbatim, so a text value must already be
    // free of delimiters
    for name in extras {
        match record.extras.get(name) {
            None => return Err(missing(record, name)),
            Some(FieldValue::Text(t)) if contains_delimiter(t) => {
                return Err(PrepError::DelimiterInField {
                    uid:   record.uid.clone(),
                    field: name.clone(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Render one already-sanitized record as a tab-joined line
/// (without the trailing newline).
fn render_row(record: &Record, format: DataFormat, extras: &[String]) -> String {
    let mut cols: Vec<String> = Vec::with_capacity(6);
    let hypotheses: &[String] = match &record.hypothesis {
        Some(Hypothesis::Single(h)) => std::slice::from_ref(h),
        Some(Hypothesis::Multi(hs)) => hs,
        None => &[],
    };

    match format {
        DataFormat::PremiseOnly | DataFormat::Sequence => {
            cols.push(record.uid.clone());
            cols.push(record.label_text());
            cols.push(record.premise.clone());
        }
        DataFormat::PremiseAndOneHypothesis => {
            cols.push(record.uid.clone());
            cols.push(record.label_text());
            cols.push(record.premise.clone());
            cols.extend(hypotheses.iter().take(1).cloned());
            cols.extend(
                extras
                    .iter()
                    .filter_map(|name| record.extras.get(name))
                    .map(ToString::to_string),
            );
        }
        DataFormat::PremiseAndMultiHypothesis => {
            cols.push(record.uid.clone());
            cols.push(record.ruid.clone().unwrap_or_default());
            cols.push(record.label_text());
            cols.push(record.premise.clone());
            cols.extend(hypotheses.iter().cloned());
        }
    }

    cols.join("\t")
}

fn write_rows(
    records:     &[Record],
    format:      DataFormat,
    destination: &Path,
    extras:      &[String],
) -> PrepResult<WriteSummary> {
    // File::create truncates an existing file
    let mut out = BufWriter::new(File::create(destination)?);
    let mut summary = WriteSummary::default();

    for record in records {
        let mut row = record.clone();
        sanitize(&mut row, format.required_fields());

        writeln!(out, "{}", render_row(&row, format, extras))?;

        summary.rows += 1;
        if row.is_unlabeled() {
            summary.unlabeled += 1;
        }
    }

    out.flush()?;
    Ok(summary)
}
