// Resume Matcher
// Text extraction -> keyword overlap + phrase bonus -> templated feedback.
// Pure computation: nothing here touches the network, disk or shared state.

pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod phrases;

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::errors::MatchError;
use crate::matcher::extract::{extract_resume_text, ResumeMimeType};
use crate::matcher::feedback::generate_feedback;
use crate::matcher::keywords::analyze_keywords;
use crate::matcher::phrases::{adjusted_score, analyze_phrases};

/// Job descriptions shorter than this (after trimming) are rejected.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
/// Extracted resumes shorter than this (after trimming) are rejected.
pub const MIN_RESUME_TEXT_CHARS: usize = 100;
/// Matched/missing keyword lists are truncated to this many entries.
pub const TOP_KEYWORDS: usize = 10;

/// An uploaded resume file, held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub bytes: Bytes,
    pub mime_type: ResumeMimeType,
    pub file_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct MatchRequest {
    pub resume: Option<ResumeUpload>,
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Final 0-100 score.
    pub score: u8,
    pub feedback: String,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub resume_length: usize,
    pub job_description_length: usize,
}

/// Validates a match request, extracts the resume text and scores it.
pub fn match_resume(request: &MatchRequest) -> Result<MatchResult, MatchError> {
    let resume = request
        .resume
        .as_ref()
        .filter(|upload| !upload.bytes.is_empty())
        .ok_or(MatchError::MissingResume)?;

    let job_description = request
        .job_description
        .as_deref()
        .filter(|jd| jd.trim().chars().count() >= MIN_JOB_DESCRIPTION_CHARS)
        .ok_or(MatchError::InvalidJobDescription)?;

    let resume_text = extract_resume_text(&resume.bytes, &resume.mime_type, &resume.file_name)?;
    if resume_text.trim().chars().count() < MIN_RESUME_TEXT_CHARS {
        return Err(MatchError::InsufficientText);
    }

    Ok(analyze_match(&resume_text, job_description))
}

/// Scores already-extracted resume text against a job description.
pub fn analyze_match(resume_text: &str, job_description: &str) -> MatchResult {
    let overlap = analyze_keywords(job_description, resume_text);
    let phrases = analyze_phrases(job_description, resume_text);
    let score = adjusted_score(overlap.basic_score, phrases.bonus)
        .round()
        .clamp(0.0, 100.0) as u8;

    debug!(
        keywords = overlap.total(),
        matched = overlap.matched.len(),
        basic_score = overlap.basic_score,
        phrases = phrases.phrases.len(),
        phrase_matches = phrases.matched,
        score,
        "Resume analysis complete"
    );

    let feedback = generate_feedback(score, &overlap.matched, &overlap.missing);

    MatchResult {
        score,
        feedback,
        matched_keywords: overlap.matched.into_iter().take(TOP_KEYWORDS).collect(),
        missing_keywords: overlap.missing.into_iter().take(TOP_KEYWORDS).collect(),
        resume_length: resume_text.chars().count(),
        job_description_length: job_description.chars().count(),
    }
}
