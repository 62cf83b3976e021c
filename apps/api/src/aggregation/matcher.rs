//! Matcher — keeps only postings whose company and role agree with the request.
//!
//! Both predicates are tolerant boolean checks; there is no scoring.
//!
//! Company: case-insensitive equality, or either name contained in the other.
//! Role: every significant word of the requested role must appear somewhere in
//! the posting title. Words of two letters or fewer and the stop words below do
//! not count. A role with no significant words matches every title.

use crate::models::job::Job;

const STOP_WORDS: [&str; 10] = ["and", "or", "the", "for", "in", "at", "of", "to", "a", "an"];
const MIN_WORD_LEN: usize = 3;

/// Filters `jobs` down to matches, preserving input order.
pub fn filter_jobs(jobs: Vec<Job>, company: &str, role: &str) -> Vec<Job> {
    let required = required_role_words(role);
    jobs.into_iter()
        .filter(|job| {
            company_matches(&job.company_name, company) && title_has_words(&job.title, &required)
        })
        .collect()
}

pub fn company_matches(candidate: &str, requested: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let requested = requested.to_lowercase();
    candidate == requested || candidate.contains(&requested) || requested.contains(&candidate)
}

/// Lowercased role words that a title must contain.
pub fn required_role_words(role: &str) -> Vec<String> {
    role.to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() >= MIN_WORD_LEN && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

fn title_has_words(title: &str, required: &[String]) -> bool {
    let title = title.to_lowercase();
    required.iter().all(|word| title.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn role_matches(title: &str, role: &str) -> bool {
        title_has_words(title, &required_role_words(role))
    }

    fn job(title: &str, company: &str) -> Job {
        Job {
            title: title.to_string(),
            company_name: company.to_string(),
            link: String::new(),
            location: String::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_company_equal_ignoring_case() {
        assert!(company_matches("ACME CORP", "acme corp"));
        assert!(company_matches("Acme", "aCmE"));
    }

    #[test]
    fn test_company_containment_both_directions() {
        assert!(company_matches("Acme Corp", "Acme"));
        assert!(company_matches("Acme Corp International", "Acme Corp International Holdings"));
        assert!(!company_matches("Globex", "Acme"));
    }

    #[test]
    fn test_empty_candidate_company_is_contained_in_anything() {
        assert!(company_matches("", "Acme"));
    }

    #[test]
    fn test_required_words_drop_short_and_stop_words() {
        assert_eq!(required_role_words("the AI Engineer"), vec!["engineer"]);
        assert_eq!(
            required_role_words("Head of Research and Development"),
            vec!["head", "research", "development"]
        );
    }

    #[test]
    fn test_stop_word_only_role_matches_everything() {
        assert!(required_role_words("and or the").is_empty());
        assert!(role_matches("Barista", "and or the"));
    }

    #[test]
    fn test_role_requires_every_word() {
        assert!(role_matches("Senior Software Engineer", "Software Engineer"));
        assert!(!role_matches("Software Developer", "Software Engineer"));
    }

    #[test]
    fn test_role_words_match_as_substrings() {
        // "engineer" is found inside "Engineering"
        assert!(role_matches("Engineering Manager", "engineer"));
    }

    #[test]
    fn test_acme_software_engineer_scenario() {
        let jobs = vec![
            job("Software Engineer", "Acme Corp"),
            job("Data Scientist", "Acme Corp"),
        ];
        let matched = filter_jobs(jobs, "Acme", "Software Engineer");
        assert_eq!(matched, vec![job("Software Engineer", "Acme Corp")]);
    }

    #[test]
    fn test_ai_engineer_matches_any_engineer_title() {
        let jobs = vec![
            job("Platform Engineer", "Acme"),
            job("AI Researcher", "Acme"),
        ];
        let matched = filter_jobs(jobs, "Acme", "the AI Engineer");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Platform Engineer");
    }

    #[test]
    fn test_both_predicates_required() {
        let jobs = vec![
            job("Software Engineer", "Mock Company"),
            job("Senior Software Engineer", "Mock Company"),
            job("Data Scientist", "Mock Company"),
            job("Software Engineer", "Different Company"),
        ];
        let matched = filter_jobs(jobs, "Mock Company", "Software Engineer");
        let titles: Vec<_> = matched.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Software Engineer", "Senior Software Engineer"]);
    }

    #[test]
    fn test_filter_is_order_preserving_subsequence() {
        let jobs = vec![
            job("Engineer A", "Acme"),
            job("Designer", "Acme"),
            job("Engineer B", "Acme"),
            job("Engineer C", "Globex"),
            job("Engineer D", "acme inc"),
        ];
        let matched = filter_jobs(jobs, "Acme", "Engineer");
        let titles: Vec<_> = matched.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Engineer A", "Engineer B", "Engineer D"]);
    }
}
