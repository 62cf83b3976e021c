//! Optional post-processing stage that collapses postings seen more than once.
//!
//! Off by default: the same posting found through two providers is returned
//! twice unless a strategy is configured.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::job::Job;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    #[default]
    None,
    /// Same posting URL. Jobs without a link are never collapsed.
    Link,
    /// Same normalized company, title and location.
    CompanyTitleLocation,
}

impl FromStr for DedupStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" => Ok(DedupStrategy::None),
            "link" => Ok(DedupStrategy::Link),
            "company_title_location" => Ok(DedupStrategy::CompanyTitleLocation),
            other => Err(format!(
                "unknown dedup strategy '{other}' (expected none, link or company_title_location)"
            )),
        }
    }
}

/// Keeps the first occurrence of every key, preserving order.
pub fn dedup_jobs(jobs: Vec<Job>, strategy: DedupStrategy) -> Vec<Job> {
    if strategy == DedupStrategy::None {
        return jobs;
    }

    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| match dedup_key(job, strategy) {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect()
}

fn dedup_key(job: &Job, strategy: DedupStrategy) -> Option<String> {
    match strategy {
        DedupStrategy::None => None,
        DedupStrategy::Link => {
            let link = job.link.trim();
            (!link.is_empty()).then(|| link.to_string())
        }
        DedupStrategy::CompanyTitleLocation => Some(format!(
            "{}\u{1f}{}\u{1f}{}",
            normalize(&job.company_name),
            normalize(&job.title),
            normalize(&job.location)
        )),
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
