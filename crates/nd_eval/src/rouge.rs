//! ROUGE-1, ROUGE-2, and ROUGE-Lsum between a reference text and a
//! candidate summary. Tokenization lowercases and splits on
//! non-alphanumeric runs; a light Porter-style suffix pass stems tokens
//! longer than three characters. Lsum is the summary-level union-LCS
//! variant over newline-delimited sentences.

use std::collections::{BTreeSet, HashMap};

use crate::{round4, Score};

#[derive(Debug, Clone, Copy)]
pub struct RougeScores {
    pub rouge1: Score,
    pub rouge2: Score,
    pub rouge_lsum: Score,
}

pub fn score(reference: &str, candidate: &str) -> RougeScores {
    let ref_tokens = tokenize(reference);
    let cand_tokens = tokenize(candidate);

    RougeScores {
        rouge1: ngram_score(&ref_tokens, &cand_tokens, 1),
        rouge2: ngram_score(&ref_tokens, &cand_tokens, 2),
        rouge_lsum: lcs_sum_score(reference, candidate),
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(stem)
        .collect()
}

/// Compact suffix stripping in the Porter step-1 spirit, enough to line
/// plural and inflected forms up. Tokens of three characters or fewer are
/// left alone.
fn stem(token: &str) -> String {
    if token.len() <= 3 {
        return token.to_string();
    }
    for (suffix, replacement) in [
        ("sses", "ss"),
        ("ies", "i"),
        ("ss", "ss"),
        ("ing", ""),
        ("ed", ""),
        ("s", ""),
    ] {
        if let Some(stripped) = token.strip_suffix(suffix) {
            if stripped.len() >= 2 {
                return format!("{}{}", stripped, replacement);
            }
            return token.to_string();
        }
    }
    token.to_string()
}

fn ngram_score(reference: &[String], candidate: &[String], n: usize) -> Score {
    if reference.len() < n || candidate.len() < n {
        return from_precision_recall(0.0, 0.0);
    }

    let mut ref_counts: HashMap<&[String], usize> = HashMap::new();
    for gram in reference.windows(n) {
        *ref_counts.entry(gram).or_insert(0) += 1;
    }
    let mut cand_counts: HashMap<&[String], usize> = HashMap::new();
    for gram in candidate.windows(n) {
        *cand_counts.entry(gram).or_insert(0) += 1;
    }

    // Clipped overlap: a candidate n-gram only counts as often as the
    // reference contains it.
    let mut matches = 0usize;
    for (gram, count) in &cand_counts {
        if let Some(ref_count) = ref_counts.get(*gram) {
            matches += (*count).min(*ref_count);
        }
    }

    let precision = matches as f64 / (candidate.len() - n + 1) as f64;
    let recall = matches as f64 / (reference.len() - n + 1) as f64;
    from_precision_recall(precision, recall)
}

fn sentences(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(tokenize)
        .collect()
}

/// Summary-level LCS: for each reference sentence, the union of its LCS
/// matches against every candidate sentence; hits are clipped by token
/// multiplicity on both sides.
fn lcs_sum_score(reference: &str, candidate: &str) -> Score {
    let ref_sentences = sentences(reference);
    let cand_sentences = sentences(candidate);

    let ref_total: usize = ref_sentences.iter().map(Vec::len).sum();
    let cand_total: usize = cand_sentences.iter().map(Vec::len).sum();
    if ref_total == 0 || cand_total == 0 {
        return from_precision_recall(0.0, 0.0);
    }

    let mut ref_budget: HashMap<&str, usize> = HashMap::new();
    for token in ref_sentences.iter().flatten() {
        *ref_budget.entry(token.as_str()).or_insert(0) += 1;
    }
    let mut cand_budget: HashMap<&str, usize> = HashMap::new();
    for token in cand_sentences.iter().flatten() {
        *cand_budget.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut hits = 0usize;
    for ref_sentence in &ref_sentences {
        for index in union_lcs(ref_sentence, &cand_sentences) {
            let token = ref_sentence[index].as_str();
            let ref_left = ref_budget.get_mut(token);
            if let Some(ref_left) = ref_left {
                if *ref_left > 0 {
                    if let Some(cand_left) = cand_budget.get_mut(token) {
                        if *cand_left > 0 {
                            hits += 1;
                            *ref_left -= 1;
                            *cand_left -= 1;
                        }
                    }
                }
            }
        }
    }

    let precision = hits as f64 / cand_total as f64;
    let recall = hits as f64 / ref_total as f64;
    from_precision_recall(precision, recall)
}

/// Union of the reference-side LCS index sets against every candidate
/// sentence.
fn union_lcs(reference: &[String], candidate_sentences: &[Vec<String>]) -> BTreeSet<usize> {
    let mut union = BTreeSet::new();
    for candidate in candidate_sentences {
        union.extend(lcs_indices(reference, candidate));
    }
    union
}

/// Indices into `reference` of one longest common subsequence with
/// `candidate`, recovered by DP backtracking.
fn lcs_indices(reference: &[String], candidate: &[String]) -> Vec<usize> {
    let m = reference.len();
    let n = candidate.len();
    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if reference[i - 1] == candidate[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut indices = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if reference[i - 1] == candidate[j - 1] {
            indices.push(i - 1);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    indices.reverse();
    indices
}

fn from_precision_recall(precision: f64, recall: f64) -> Score {
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    Score {
        precision: round4(precision),
        recall: round4(recall),
        f1: round4(f1),
    }
}
