//! Answer evaluation for typed and cloze reviews.

use crate::error::{Error, Result};
use crate::types::{Answer, Correctness, Evaluation, Grade};

/// Punctuation stripped during normalization: ASCII plus the common
/// full-width CJK marks.
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}', '，', '。', '！', '？',
    '、', '；', '：', '“', '”', '‘', '’', '（', '）', '《', '》', '【', '】',
];

const CORRECT_THRESHOLD: f64 = 0.9;
const TEXT_PARTIAL_THRESHOLD: f64 = 0.7;
const BLANK_PARTIAL_THRESHOLD: f64 = 0.6;
const BLANK_HALF_CREDIT_THRESHOLD: f64 = 0.6;
/// Below this length ratio, edit distance is not meaningful and the answer
/// is wrong outright.
const LENGTH_RATIO_FLOOR: f64 = 0.3;

/// Normalize a string for comparison: lowercase, strip punctuation, trim
/// and collapse whitespace runs (including newlines) to single spaces.
pub fn normalize(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized edit-distance similarity between two already-normalized
/// strings: `1 - distance / max(len)`, measured in characters.
///
/// An empty operand scores 0; identical strings score 1 without running
/// the distance computation.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Evaluate a user answer against the reference answer.
///
/// Both answers must have the same shape: text against text, or blank list
/// against blank list with equal length.
pub fn evaluate(reference: &Answer, user: &Answer) -> Result<Evaluation> {
    match (reference, user) {
        (Answer::Text(reference), Answer::Text(user)) => Ok(evaluate_text(reference, user)),
        (Answer::Blanks(reference), Answer::Blanks(user)) => evaluate_blanks(reference, user),
        _ => Err(Error::AnswerShapeMismatch),
    }
}

fn evaluate_text(reference: &str, user: &str) -> Evaluation {
    let reference = normalize(reference);
    let user = normalize(user);

    if user.is_empty() {
        return wrong();
    }

    let ref_len = reference.chars().count();
    let user_len = user.chars().count();
    let length_ratio = ref_len.min(user_len) as f64 / ref_len.max(user_len) as f64;
    if length_ratio < LENGTH_RATIO_FLOOR {
        return wrong();
    }

    let similarity = similarity(&reference, &user);
    let correctness = if similarity >= CORRECT_THRESHOLD {
        Correctness::Correct
    } else if similarity >= TEXT_PARTIAL_THRESHOLD {
        Correctness::Partial
    } else {
        Correctness::Wrong
    };

    Evaluation {
        correctness,
        similarity,
    }
}

/// Cloze mode: each blank contributes full, half or no credit, and the
/// overall score is the mean contribution. The partial floor here is 0.6,
/// lower than text mode's 0.7.
fn evaluate_blanks(reference: &[String], user: &[String]) -> Result<Evaluation> {
    if reference.is_empty() {
        return Err(Error::EmptyCloze);
    }
    if reference.len() != user.len() {
        return Err(Error::BlankCountMismatch {
            expected: reference.len(),
            actual: user.len(),
        });
    }

    let total: f64 = reference
        .iter()
        .zip(user)
        .map(|(reference, user)| {
            let similarity = similarity(&normalize(reference), &normalize(user));
            if similarity >= CORRECT_THRESHOLD {
                1.0
            } else if similarity >= BLANK_HALF_CREDIT_THRESHOLD {
                0.5
            } else {
                0.0
            }
        })
        .sum();

    let overall = total / reference.len() as f64;
    let correctness = if overall >= CORRECT_THRESHOLD {
        Correctness::Correct
    } else if overall >= BLANK_PARTIAL_THRESHOLD {
        Correctness::Partial
    } else {
        Correctness::Wrong
    };

    Ok(Evaluation {
        correctness,
        similarity: overall,
    })
}

fn wrong() -> Evaluation {
    Evaluation {
        correctness: Correctness::Wrong,
        similarity: 0.0,
    }
}

/// Suggest a grade from a similarity score.
///
/// A simpler threshold table than the correctness classification, for
/// callers that want the evaluator to pick the review grade.
pub fn suggest_grade(similarity: f64) -> Grade {
    if similarity >= 0.9 {
        Grade::Easy
    } else if similarity >= 0.8 {
        Grade::Good
    } else if similarity >= 0.5 {
        Grade::Hard
    } else {
        Grade::Again
    }
}
