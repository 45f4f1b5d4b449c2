//! Phrase Matcher — fixed multi-word skill, qualification and competency phrases.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Ceiling on the score points phrase coverage can add.
pub const MAX_PHRASE_BONUS: f64 = 15.0;

static PHRASE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // named technical domains
        r"(?i)(?-u:\b)(?:machine learning|artificial intelligence|data science|software development|project management|customer service|business analysis|digital marketing|cloud computing|database management)(?-u:\b)",
        // qualifications
        r"(?i)(?-u:\b)(?:bachelor'?s? degree|master'?s? degree|years? of experience|[0-9]+\+? years?)(?-u:\b)",
        // competency claims
        r"(?i)(?-u:\b)(?:proficient in|experience with|knowledge of|familiarity with|expertise in)(?-u:\b)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("phrase pattern must compile"))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseCoverage {
    /// Unique phrases found in the job description, in detection order.
    pub phrases: Vec<String>,
    /// How many of `phrases` also occur in the resume.
    pub matched: usize,
    /// `min(15, matched / phrases * 15)`, 0 when no phrase was detected.
    pub bonus: f64,
}

/// Every phrase-pattern hit in `text`, lowercased and deduplicated.
///
/// Patterns run in a fixed order and each contributes its leftmost
/// non-overlapping matches, so `3+ years of experience` yields `3+ years`.
pub fn extract_key_phrases(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();

    PHRASE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(&lowered))
        .map(|m| m.as_str().to_string())
        .filter(|phrase| seen.insert(phrase.clone()))
        .collect()
}

pub fn analyze_phrases(job_description: &str, resume_text: &str) -> PhraseCoverage {
    let phrases = extract_key_phrases(job_description);
    let resume = resume_text.to_lowercase();
    let matched = phrases
        .iter()
        .filter(|phrase| resume.contains(phrase.as_str()))
        .count();

    let bonus = if phrases.is_empty() {
        0.0
    } else {
        (matched as f64 / phrases.len() as f64 * MAX_PHRASE_BONUS).min(MAX_PHRASE_BONUS)
    };

    PhraseCoverage {
        phrases,
        matched,
        bonus,
    }
}

/// Adds the phrase bonus to the keyword score, capped at 100.
pub fn adjusted_score(basic_score: u32, phrase_bonus: f64) -> f64 {
    (basic_score as f64 + phrase_bonus).min(100.0)
}
