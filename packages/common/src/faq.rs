//! Free-text FAQ lookup.
//!
//! Matching runs in two stages over an ordered FAQ list: a substring pass
//! over every question variant, then a keyword-overlap score. Iteration
//! order is significant: the first substring hit wins, and among equal
//! overlap scores the earliest FAQ wins.

use std::collections::HashSet;

use serde::Serialize;

/// Answer returned when nothing matches well enough.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find an answer to that. \
    Send us a message through the contact form and we'll get back to you.";

/// Minimum share of input words that must appear in a FAQ's questions.
pub const MIN_OVERLAP: f64 = 0.25;

/// One FAQ entry as seen by the matcher.
#[derive(Debug, Clone)]
pub struct Faq {
    pub id: i32,
    /// Question variants, in display order.
    pub questions: Vec<String>,
    pub answer: String,
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct FaqMatch {
    pub answer: String,
    /// `None` when the fallback answer was returned.
    pub matched_id: Option<i32>,
}

impl FaqMatch {
    fn found(faq: &Faq) -> Self {
        Self {
            answer: faq.answer.clone(),
            matched_id: Some(faq.id),
        }
    }

    fn fallback() -> Self {
        Self {
            answer: FALLBACK_ANSWER.to_string(),
            matched_id: None,
        }
    }
}

/// Lowercase, drop everything outside `[a-z0-9]` and whitespace, collapse
/// whitespace runs and trim.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn words(normalized: &str) -> HashSet<&str> {
    normalized.split_whitespace().collect()
}

/// Find the best answer for `input` among `faqs`.
pub fn match_question(faqs: &[Faq], input: &str) -> FaqMatch {
    let needle = normalize(input);

    if !needle.is_empty() {
        for faq in faqs {
            for question in &faq.questions {
                let variant = normalize(question);
                if variant.is_empty() {
                    continue;
                }
                if needle.contains(&variant) || variant.contains(&needle) {
                    return FaqMatch::found(faq);
                }
            }
        }
    }

    let input_words = words(&needle);
    let denominator = input_words.len().max(1) as f64;

    let mut best: Option<(&Faq, f64)> = None;
    for faq in faqs {
        let joined = normalize(&faq.questions.join(" "));
        let faq_words = words(&joined);
        let shared = input_words.intersection(&faq_words).count();
        let score = shared as f64 / denominator;
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((faq, score));
        }
    }

    match best {
        Some((faq, score)) if score >= MIN_OVERLAP => FaqMatch::found(faq),
        _ => FaqMatch::fallback(),
    }
}
