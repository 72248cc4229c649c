//! Keyword-overlap matcher.
//!
//! A record's score is the number of (user token, record term) pairs where
//! one string contains the other. Record terms are its keywords followed by
//! its question tokens, without de-duplication.

use app_schema::qa::QaPair;
use tracing::*;

pub const FALLBACK_RESPONSE: &str = "Lo siento, no entendí tu pregunta. ¿Podrías reformularla?";

pub const MIN_TOKEN_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub answer: String,
    pub understood: bool,
    pub record_id: Option<i64>,
}

impl MatchOutcome {
    fn fallback() -> Self {
        Self {
            answer: FALLBACK_RESPONSE.to_owned(),
            understood: false,
            record_id: None,
        }
    }
}

fn long_enough(term: &str) -> bool {
    term.chars().count() >= MIN_TOKEN_CHARS
}

/// Lowercase words of at least three characters, split on anything that is
/// not a letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| long_enough(t))
        .map(str::to_owned)
        .collect()
}

pub fn record_terms(record: &QaPair) -> Vec<String> {
    let mut terms: Vec<String> = record
        .keyword_list()
        .into_iter()
        .filter(|k| long_enough(k))
        .collect();
    terms.extend(tokenize(&record.question));
    terms
}

pub fn score(tokens: &[String], terms: &[String]) -> usize {
    tokens
        .iter()
        .map(|token| {
            terms
                .iter()
                .filter(|term| term.contains(token.as_str()) || token.contains(term.as_str()))
                .count()
        })
        .sum()
}

/// Picks the best-scoring record; ties go to the earliest record.
pub fn match_utterance(utterance: &str, records: &[QaPair], threshold: usize) -> MatchOutcome {
    let tokens = tokenize(utterance);
    if tokens.is_empty() {
        debug!("No usable tokens in {:?}", utterance);
        return MatchOutcome::fallback();
    }

    let mut best: Option<(&QaPair, usize)> = None;
    for record in records {
        let s = score(&tokens, &record_terms(record));
        if best.is_none_or(|(_, top)| s > top) {
            best = Some((record, s));
        }
    }

    match best {
        Some((record, s)) if s >= threshold.max(1) => {
            debug!("Matched record {} with score {}", record.id, s);
            MatchOutcome {
                answer: record.answer.clone(),
                understood: true,
                record_id: Some(record.id),
            }
        }
        _ => MatchOutcome::fallback(),
    }
}
