//! Keyword Analyzer — job-description tokens vs resume text, by raw substring overlap.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Tokens of this length or shorter never become keywords.
const MIN_KEYWORD_LEN_EXCLUSIVE: usize = 3;

/// Common English words excluded from keyword extraction.
const STOPLIST: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "who", "boy", "did", "let", "put", "say", "she", "too", "use", "will", "with", "have",
    "this", "that", "they", "from", "been", "were", "said", "each", "which", "their", "time",
    "about", "would", "there", "could", "other", "after", "first", "well", "water", "very",
    "what", "know", "through", "back", "much", "before", "go", "good", "write", "used", "me",
    "any", "same", "right", "look", "think", "also", "around", "another", "came", "three",
    "word", "work", "must", "because", "does", "part", "even", "place", "such", "here", "take",
    "why", "help", "different", "away", "again", "off", "went", "number", "great", "tell",
    "men", "small", "every", "found", "still", "between", "name", "should", "home", "big",
    "give", "air", "line", "set", "own", "under", "read", "last", "never", "us", "left", "end",
    "along", "while", "might", "next", "sound", "below", "saw", "something", "thought", "both",
    "few", "those", "always", "show", "large", "often", "together", "asked", "house", "don",
    "world", "going", "want", "school", "important", "until", "form", "food", "keep",
    "children", "feet", "land", "side", "without", "once", "animal", "life", "enough", "took",
    "sometimes", "four", "head", "above", "kind", "began", "almost", "live", "page", "got",
    "earth", "need", "far", "hand", "high", "year", "mother", "light", "country", "father",
    "night", "picture", "being", "study", "second", "soon", "story", "since", "white", "ever",
    "paper", "hard", "near", "sentence", "better", "best", "across", "during", "today",
    "however", "sure", "knew", "it", "try", "told", "young", "sun", "thing", "whole", "hear",
    "example", "heard", "several", "change", "answer", "room", "sea", "against", "top",
    "turned", "learn", "point", "city", "play", "toward", "five", "using", "himself", "usually",
    "money", "seen", "didn", "car", "morning", "i", "long", "red", "dog", "family", "run", "eat",
    "book", "eye", "job", "though", "business", "issue", "become", "person", "your", "some",
    "these", "may", "people", "when", "come", "its", "only", "made", "where", "way", "down",
    "them", "as", "many", "then", "so", "make", "like", "into", "more", "no", "my", "than",
    "call", "find",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPLIST.iter().copied().collect());

/// Outcome of comparing job-description keywords against a resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordOverlap {
    /// Keywords found in the resume, in job-description order.
    pub matched: Vec<String>,
    /// Keywords absent from the resume, in job-description order.
    pub missing: Vec<String>,
    /// `round(matched / total * 100)`, or 0 when there are no keywords.
    pub basic_score: u32,
}

impl KeywordOverlap {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Extracts the unique keywords of `text`, preserving first appearance.
///
/// Every character outside `[A-Za-z0-9_]` and whitespace acts as a separator,
/// so `react.js` yields `react` and `js`.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut seen = HashSet::new();
    normalized
        .split_whitespace()
        .filter(|token| token.len() > MIN_KEYWORD_LEN_EXCLUSIVE)
        .filter(|token| !STOPWORDS.contains(token))
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Splits the job description's keywords by whether the resume contains them.
///
/// Containment is a plain substring test on the lowercased resume, so
/// `experience` is satisfied by `experienced`.
pub fn analyze_keywords(job_description: &str, resume_text: &str) -> KeywordOverlap {
    let resume = resume_text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = extract_keywords(job_description)
        .into_iter()
        .partition(|keyword| resume.contains(keyword.as_str()));

    let total = matched.len() + missing.len();
    let basic_score = if total == 0 {
        0
    } else {
        ((matched.len() as f64 / total as f64) * 100.0).round() as u32
    };

    KeywordOverlap {
        matched,
        missing,
        basic_score,
    }
}
