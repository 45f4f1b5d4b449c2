//! Feedback Generator — maps a match score to a templated explanation.

/// Score at or above which a match is "excellent".
pub const EXCELLENT_THRESHOLD: u8 = 80;
/// Score at or above which a match is a "good foundation".
pub const GOOD_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsAlignment,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            ScoreBand::Excellent
        } else if score >= GOOD_THRESHOLD {
            ScoreBand::Good
        } else {
            ScoreBand::NeedsAlignment
        }
    }
}

/// Builds the feedback paragraph for `score`.
///
/// Keyword citations are exact prefixes of `matched` / `missing`, quoted and
/// joined with `", "` or `" and "` depending on the band.
pub fn generate_feedback(score: u8, matched: &[String], missing: &[String]) -> String {
    let mut feedback = String::new();

    match ScoreBand::for_score(score) {
        ScoreBand::Excellent => {
            feedback.push_str(
                "Excellent match! Your resume demonstrates strong alignment with the job requirements. ",
            );
            feedback.push_str(&format!(
                "You've successfully highlighted key terms like \"{}\" that match what the employer is looking for. ",
                join_prefix(matched, 3, "\", \"")
            ));
            if missing.is_empty() {
                feedback.push_str(
                    "Your resume covers most of the key requirements mentioned in the job posting.",
                );
            } else {
                feedback.push_str(&format!(
                    "To further strengthen your application, consider incorporating terms like \"{}\" if they reflect your actual experience.",
                    join_prefix(missing, 2, "\" and \"")
                ));
            }
        }
        ScoreBand::Good => {
            feedback.push_str(
                "Good foundation! Your resume shows relevant experience, but there's room for improvement. ",
            );
            feedback.push_str(&format!(
                "You've included important keywords like \"{}\", which is great. ",
                join_prefix(matched, 3, "\", \"")
            ));
            feedback.push_str(&format!(
                "To boost your match score, consider adding experience or skills related to \"{}\" if applicable to your background. ",
                join_prefix(missing, 3, "\", \"")
            ));
            feedback.push_str(
                "Also, try to mirror some of the specific language used in the job posting.",
            );
        }
        ScoreBand::NeedsAlignment => {
            feedback.push_str("Your resume needs significant alignment with this job posting. ");
            if !matched.is_empty() {
                feedback.push_str(&format!(
                    "While you do have some relevant terms like \"{}\", ",
                    join_prefix(matched, 2, "\" and \"")
                ));
            }
            feedback.push_str(&format!(
                "the job posting emphasizes \"{}\" which aren't prominently featured in your resume. ",
                join_prefix(missing, 5, "\", \"")
            ));
            feedback.push_str(
                "Consider highlighting relevant experience that demonstrates these skills, or look for positions that better match your current qualifications.",
            );
        }
    }

    feedback
}

fn join_prefix(words: &[String], limit: usize, separator: &str) -> String {
    words
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_bands_are_exact_at_boundaries() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::NeedsAlignment);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::NeedsAlignment);
    }

    #[test]
    fn test_excellent_cites_three_matched_and_two_missing() {
        let matched = words(&["rust", "tokio", "axum", "serde"]);
        let missing = words(&["kafka", "redis", "grpc"]);
        let feedback = generate_feedback(85, &matched, &missing);

        assert!(feedback.starts_with("Excellent match!"));
        assert!(feedback.contains("\"rust\", \"tokio\", \"axum\""));
        assert!(!feedback.contains("serde"));
        assert!(feedback.contains("\"kafka\" and \"redis\""));
        assert!(!feedback.contains("grpc"));
    }

    #[test]
    fn test_excellent_with_full_coverage() {
        let feedback = generate_feedback(100, &words(&["rust"]), &[]);
        assert!(feedback.contains("Excellent match"));
        assert!(feedback.contains("covers most of the key requirements"));
        assert!(!feedback.contains("consider incorporating"));
    }

    #[test]
    fn test_good_foundation_band() {
        let matched = words(&["python", "pandas"]);
        let missing = words(&["spark", "airflow", "dbt", "looker"]);
        let feedback = generate_feedback(65, &matched, &missing);

        assert!(feedback.starts_with("Good foundation!"));
        assert!(!feedback.contains("Excellent match"));
        assert!(feedback.contains("\"python\", \"pandas\""));
        assert!(feedback.contains("\"spark\", \"airflow\", \"dbt\""));
        assert!(!feedback.contains("looker"));
        assert!(feedback.ends_with("used in the job posting."));
    }

    #[test]
    fn test_needs_alignment_with_some_matches() {
        let matched = words(&["react", "rest", "design"]);
        let missing = words(&["node", "apis", "years", "developer", "graphql", "docker"]);
        let feedback = generate_feedback(40, &matched, &missing);

        assert!(!feedback.contains("Excellent match"));
        assert!(!feedback.contains("Good foundation"));
        assert!(feedback.contains("\"react\" and \"rest\", "));
        assert!(!feedback.contains("design"));
        assert!(feedback.contains("\"node\", \"apis\", \"years\", \"developer\", \"graphql\""));
        assert!(!feedback.contains("docker"));
    }

    #[test]
    fn test_needs_alignment_without_matches_skips_citation() {
        let feedback = generate_feedback(0, &[], &words(&["kubernetes"]));
        assert!(!feedback.contains("While you do have"));
        assert!(feedback.contains("emphasizes \"kubernetes\""));
    }
}
