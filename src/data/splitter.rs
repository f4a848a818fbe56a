// ============================================================
// Layer 4 — Split Derivation
// ============================================================
// Regroups loaded records into new splits. Nothing here invents
// text: every derived record reuses a premise and a hypothesis
// that some loaded record already carried.
//
// Policies:
//   merge_and_promote     train+dev → train, test → dev, extra → test
//   shuffle_resplit       pool everything, reshuffle, cut by sizes
//   k_way_split           K (train, dev) folds with disjoint devs
//   augment_negatives     pair questions with other questions' answers
//   pair_multi_hypothesis fuse consecutive rows of one question
//   split_train_val       shuffle and cut one pool in two
//
// All shuffles draw from a caller-owned RNG, so a fixed seed
// reproduces the same groupings on every run.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use std::collections::{HashMap, HashSet};

use rand::{seq::SliceRandom, Rng};

use crate::domain::{
    errors::{PrepError, PrepResult},
    record::{FieldValue, Record},
};

/// Label given to augmented negative pairs.
pub const NEGATIVE_LABEL: i64 = 0;

/// The three standard partitions of one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitSet {
    pub train: Vec<Record>,
    pub dev:   Vec<Record>,
    pub test:  Vec<Record>,
}

impl SplitSet {
    pub fn new(train: Vec<Record>, dev: Vec<Record>, test: Vec<Record>) -> Self {
        Self { train, dev, test }
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.dev.len() + self.test.len()
    }
}

/// Record counts for each split of a resplit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub dev:   usize,
    pub test:  usize,
}

impl SplitSizes {
    /// The sizes `set` already has.
    pub fn of(set: &SplitSet) -> Self {
        Self {
            train: set.train.len(),
            dev:   set.dev.len(),
            test:  set.test.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.dev + self.test
    }
}

// ─── Merge and promote ────────────────────────────────────────────────────────

/// Old train + dev become train, the old test becomes dev and a
/// separately supplied test set becomes test.
pub fn merge_and_promote(original: SplitSet, new_test: Vec<Record>) -> SplitSet {
    let SplitSet { mut train, dev, test } = original;
    train.extend(dev);
    tracing::debug!(
        "Merge-and-promote: {} train, {} dev (old test), {} test (new)",
        train.len(),
        test.len(),
        new_test.len()
    );
    SplitSet::new(train, test, new_test)
}

// ─── Shuffle resplit ──────────────────────────────────────────────────────────

/// Pool every split of `original`, shuffle, and cut the pool into
/// `sizes.train` / `sizes.dev` / `sizes.test` records.
pub fn shuffle_resplit<R: Rng + ?Sized>(
    original: SplitSet,
    sizes:    SplitSizes,
    rng:      &mut R,
) -> PrepResult<SplitSet> {
    if sizes.total() != original.total() {
        return Err(PrepError::Configuration(format!(
            "resplit sizes {}+{}+{} do not cover the {} pooled records",
            sizes.train,
            sizes.dev,
            sizes.test,
            original.total()
        )));
    }

    let SplitSet { mut train, dev, test } = original;
    train.extend(dev);
    train.extend(test);
    let mut pool = train;

    pool.shuffle(rng);

    // split_off(n) keeps [0..n) and returns [n..)
    let mut rest = pool.split_off(sizes.train);
    let test = rest.split_off(sizes.dev);
    Ok(SplitSet::new(pool, rest, test))
}

// ─── K-way split ──────────────────────────────────────────────────────────────

/// Partition `pool` into `k` (train, dev) pairs.
///
/// Positions are shuffled once and dealt round-robin into folds,
/// so every record lands in exactly one dev slice and slice sizes
/// differ by at most one. Within a fold both halves keep the pool's
/// original order.
pub fn k_way_split<R: Rng + ?Sized>(
    pool: &[Record],
    k:    usize,
    rng:  &mut R,
) -> PrepResult<Vec<(Vec<Record>, Vec<Record>)>> {
    if k < 2 {
        return Err(PrepError::Configuration(format!(
            "k-way split needs at least 2 folds, got {k}"
        )));
    }

    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.shuffle(rng);

    let mut fold_of = vec![0usize; pool.len()];
    for (position, &idx) in order.iter().enumerate() {
        fold_of[idx] = position % k;
    }

    let folds = (0..k)
        .map(|fold| {
            let (dev, train): (Vec<_>, Vec<_>) = pool
                .iter()
                .zip(&fold_of)
                .partition(|&(_, &f)| f == fold);
            (
                train.into_iter().map(|(r, _)| r.clone()).collect(),
                dev.into_iter().map(|(r, _)| r.clone()).collect(),
            )
        })
        .collect();

    Ok(folds)
}

// ─── Negative augmentation ────────────────────────────────────────────────────

/// For every question (premise) add up to `per_question` records
/// pairing it with answers drawn from other questions, labelled
/// [`NEGATIVE_LABEL`]. A question is never paired with an answer it
/// already has, and the same negative is never added twice.
///
/// Returns the original records in input order followed by the
/// negatives, grouped by question in first-appearance order.
pub fn augment_negatives<R: Rng + ?Sized>(
    positives:    Vec<Record>,
    per_question: usize,
    rng:          &mut R,
) -> Vec<Record> {
    // Distinct answers in first-appearance order
    let mut answers: Vec<&str> = Vec::new();
    let mut answer_seen: HashSet<&str> = HashSet::new();

    // question text → (index of first record, answers it already has)
    let mut questions: Vec<(usize, HashSet<&str>)> = Vec::new();
    let mut question_index: HashMap<&str, usize> = HashMap::new();

    for (i, r) in positives.iter().enumerate() {
        let Some(answer) = r.single_hypothesis() else {
            continue;
        };
        if answer_seen.insert(answer) {
            answers.push(answer);
        }
        let slot = *question_index.entry(r.premise.as_str()).or_insert_with(|| {
            questions.push((i, HashSet::new()));
            questions.len() - 1
        });
        questions[slot].1.insert(answer);
    }

    let mut negatives = Vec::new();
    for (first, own_answers) in &questions {
        let anchor = &positives[*first];
        let candidates: Vec<&str> = answers
            .iter()
            .copied()
            .filter(|a| !own_answers.contains(a))
            .collect();

        for (k, answer) in candidates.choose_multiple(rng, per_question).enumerate() {
            let mut neg = Record::pair(
                format!("{}-neg{}", anchor.uid, k),
                Some(FieldValue::Int(NEGATIVE_LABEL)),
                anchor.premise.clone(),
                *answer,
            );
            neg.ruid = anchor.ruid.clone();
            negatives.push(neg);
        }
    }

    tracing::debug!(
        "Negative augmentation: {} questions, {} positives, {} negatives",
        questions.len(),
        positives.len(),
        negatives.len()
    );

    let mut out = positives;
    out.extend(negatives);
    out
}

// ─── Pairwise multi-hypothesis ────────────────────────────────────────────────

/// Fuse consecutive pair records that share a premise into one
/// two-candidate record.
///
/// * rows are walked in order; a row whose successor has a different
///   premise is dropped on its own and pairing resumes at the successor
/// * labelled pairs with identical labels are dropped
/// * candidate order is swapped with probability 0.5
/// * the label is the index of the candidate whose source label
///   equals `positive_label`; unlabeled pairs stay unlabeled
///
/// `ruid` holds both source uids, comma-joined, in candidate order.
pub fn pair_multi_hypothesis<R: Rng + ?Sized>(
    rows:           &[Record],
    positive_label: &FieldValue,
    rng:            &mut R,
) -> Vec<Record> {
    let mut out = Vec::with_capacity(rows.len() / 2);
    let mut skipped = 0usize;

    let mut i = 0;
    while i < rows.len() {
        let (a, Some(b)) = (&rows[i], rows.get(i + 1)) else {
            // trailing row without a partner
            skipped += 1;
            break;
        };
        let (Some(ha), Some(hb)) = (a.single_hypothesis(), b.single_hypothesis()) else {
            skipped += 1;
            i += 1;
            continue;
        };
        if a.premise != b.premise {
            skipped += 1;
            i += 1;
            continue;
        }
        i += 2;

        let labelled = a.label.is_some() && b.label.is_some();
        if labelled && a.label == b.label {
            skipped += 1;
            continue;
        }

        let (first, second, h1, h2) = if rng.gen_bool(0.5) {
            (b, a, hb, ha)
        } else {
            (a, b, ha, hb)
        };

        let label = if labelled {
            let idx: i64 = if first.label.as_ref() == Some(positive_label) { 0 } else { 1 };
            Some(FieldValue::Int(idx))
        } else {
            None
        };

        out.push(Record::multi(
            a.uid.clone(),
            format!("{},{}", first.uid, second.uid),
            label,
            a.premise.clone(),
            vec![h1.to_string(), h2.to_string()],
        ));
    }

    if skipped > 0 {
        tracing::debug!("Pairing skipped {} rows or pairs", skipped);
    }
    out
}

// ─── Train / validation ───────────────────────────────────────────────────────

/// Shuffle `samples` and split into (train, validation).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.9 = 90%
/// * `rng`            - Seeded source for the shuffle
pub fn split_train_val<T, R: Rng + ?Sized>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    rng:            &mut R,
) -> (Vec<T>, Vec<T>) {
    samples.shuffle(rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}
