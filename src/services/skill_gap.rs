// src/services/skill_gap.rs
//
// Pure skill-gap comparison shared by the resume and job-fit features.
// Matching is a bidirectional case-insensitive substring test, deliberately
// loose so that phrasing variants still count ("Python" matches "Python 3").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapResult {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub match_percentage: f64,
}

/// Compare required skills against held skills.
///
/// `matching` keeps the order of `held`, `missing` keeps the order of
/// `required`. The percentage is matched-count over required-count, rounded
/// to one decimal, and 0 when `required` is empty.
pub fn analyze_skill_gap(required: &[String], held: &[String]) -> SkillGapResult {
    let matching: Vec<String> = held
        .iter()
        .filter(|h| required.iter().any(|r| overlaps(r, h)))
        .cloned()
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|r| !held.iter().any(|h| overlaps(r, h)))
        .cloned()
        .collect();

    let match_percentage = if required.is_empty() {
        0.0
    } else {
        round1(matching.len() as f64 / required.len() as f64 * 100.0)
    };

    SkillGapResult {
        matching,
        missing,
        match_percentage,
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
