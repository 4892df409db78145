// src/generators/resume.rs
//
// Resume-facing features: targeted update suggestions (driven by the skill
// gap between job and resume) and per-posting optimization suggestions.

use crate::generators::{generate_or_fallback, join_skills, parse_lines, truncate_chars};
use crate::models::{JobPosting, Priority, ResumeOptimization, ResumeSuggestions, UserProfile};
use crate::services::{analyze_skill_gap, TextGenerator};
use tracing::info;

const SUGGESTIONS_MAX_TOKENS: u32 = 700;
const OPTIMIZE_MAX_TOKENS: u32 = 600;

const SUGGESTION_MIN_LINE_LEN: usize = 4;
const SUGGESTION_CAP: usize = 7;

/// Provide resume improvements tailored to a target job. The skill gap is
/// computed locally; only the suggestion list and summary come from the
/// provider, with a deterministic list when it is unavailable.
pub async fn suggest_resume_updates(
    client: &dyn TextGenerator,
    resume_text: &str,
    job: &JobPosting,
    resume_skills: &[String],
    job_skills: &[String],
) -> ResumeSuggestions {
    let gap = analyze_skill_gap(job_skills, resume_skills);

    let prompt = format!(
        "You are a career coach. Review the resume and job description and suggest improvements.\n\n\
         Job Title: {title}\n\
         Company: {company}\n\
         Job Description: {description}\n\n\
         Resume (truncated):\n\
         {resume}\n\n\
         Provide:\n\
         1. 5-7 specific resume improvements\n\
         2. Key keywords/skills to add\n\
         3. A short summary of fit gaps\n\n\
         Resume Suggestions:",
        title = job.title,
        company = job.company,
        description = truncate_chars(&job.description, 600),
        resume = truncate_chars(resume_text, 1200),
    );

    let (summary, suggestions) = generate_or_fallback(
        client,
        prompt,
        SUGGESTIONS_MAX_TOKENS,
        |text| {
            let suggestions = parse_lines(text, SUGGESTION_MIN_LINE_LEN);
            if suggestions.is_empty() {
                return None;
            }
            let summary = text.lines().next().unwrap_or_default().trim().to_string();
            Some((summary, suggestions))
        },
        fallback_suggestions,
    )
    .await;

    info!(job_title = %job.title, suggestion_count = suggestions.len(), "Generated resume suggestions");

    ResumeSuggestions {
        summary,
        suggestions: suggestions.into_iter().take(8).collect(),
        matching_skills: gap.matching.into_iter().take(12).collect(),
        missing_skills: gap.missing.iter().take(12).cloned().collect(),
        keywords_to_add: gap.missing.into_iter().take(10).collect(),
        job_requirements: job_skills.iter().take(15).cloned().collect(),
    }
}

fn fallback_suggestions() -> (String, Vec<String>) {
    let suggestions = vec![
        "Add a concise summary tailored to the role and company.".to_string(),
        "Highlight measurable achievements tied to the job requirements.".to_string(),
        "Emphasize relevant projects and technical stack alignment.".to_string(),
        "Mirror key job keywords in skills and experience sections.".to_string(),
        "Include recent, role-relevant certifications or training.".to_string(),
    ];
    let summary =
        "Focus on adding missing skills and measurable impact relevant to the role.".to_string();
    (summary, suggestions)
}

/// Generate optimization suggestions for one posting. The priority flag is a
/// structural artifact of the surviving suggestion count, preserved as-is.
pub async fn optimize_resume(
    client: &dyn TextGenerator,
    profile: &UserProfile,
    job: &JobPosting,
) -> ResumeOptimization {
    let prompt = format!(
        "As a resume expert, analyze this resume for the target job and provide specific improvements:\n\n\
         Target Job: {title} at {company}\n\
         Job Description: {description}\n\n\
         Current Skills: {skills}\n\
         Experience: {years} years\n\n\
         Provide 5-7 specific, actionable suggestions to improve the resume for THIS job:\n\
         1. Keywords to add\n\
         2. Skills to highlight\n\
         3. Experience to emphasize\n\
         4. Sections to rewrite\n\n\
         Suggestions:",
        title = job.title,
        company = job.company,
        description = truncate_chars(&job.description, 400),
        skills = join_skills(&profile.skills, 15),
        years = profile.experience_years,
    );

    let suggestions = generate_or_fallback(
        client,
        prompt,
        OPTIMIZE_MAX_TOKENS,
        |text| {
            // Plain non-blank lines here, no bullet stripping: the cap comes
            // before any other filtering.
            let lines: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .take(SUGGESTION_CAP)
                .collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines)
            }
        },
        || fallback_optimizations(&job.skills_required),
    )
    .await;

    info!(job_title = %job.title, suggestion_count = suggestions.len(), "Generated resume optimization");

    let priority = if suggestions.len() > 5 {
        Priority::High
    } else {
        Priority::Medium
    };

    ResumeOptimization {
        suggestions,
        keywords_to_add: job.skills_required.iter().take(8).cloned().collect(),
        priority,
    }
}

fn fallback_optimizations(skills_required: &[String]) -> Vec<String> {
    let lead_skill = skills_required
        .first()
        .map(String::as_str)
        .unwrap_or("relevant technologies");

    vec![
        format!("Emphasize experience with {lead_skill}"),
        "Add quantifiable achievements with metrics".to_string(),
        "Tailor your professional summary to match the job description".to_string(),
        "Include relevant keywords from the job posting".to_string(),
        "Highlight projects that demonstrate required skills".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{CannedGenerator, OfflineGenerator};

    fn job() -> JobPosting {
        JobPosting {
            title: "Platform Engineer".to_string(),
            company: "Hooli".to_string(),
            description: "Kubernetes platform work.".to_string(),
            skills_required: vec![
                "Kubernetes".to_string(),
                "Go".to_string(),
                "Terraform".to_string(),
            ],
            external_id: None,
            source: None,
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: "Kim".to_string(),
            skills: vec!["Go".to_string(), "Docker".to_string()],
            experience_years: 4,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn suggestions_carry_skill_gap_on_fallback() {
        let client = OfflineGenerator::default();
        let result = suggest_resume_updates(
            &client,
            "resume body",
            &job(),
            &strings(&["go", "docker"]),
            &strings(&["Kubernetes", "Go", "Terraform"]),
        )
        .await;

        assert_eq!(result.suggestions.len(), 5);
        assert!(!result.summary.is_empty());
        assert_eq!(result.matching_skills, strings(&["go"]));
        assert_eq!(result.missing_skills, strings(&["Kubernetes", "Terraform"]));
        assert_eq!(result.keywords_to_add, strings(&["Kubernetes", "Terraform"]));
        assert_eq!(
            result.job_requirements,
            strings(&["Kubernetes", "Go", "Terraform"])
        );
    }

    #[tokio::test]
    async fn parsed_suggestions_are_capped_at_eight() {
        let body = (1..=12)
            .map(|i| format!("- Improvement number {i} for the resume"))
            .collect::<Vec<_>>()
            .join("\n");
        let client = CannedGenerator(body);
        let result =
            suggest_resume_updates(&client, "resume", &job(), &strings(&[]), &strings(&[])).await;

        assert_eq!(result.suggestions.len(), 8);
        assert_eq!(result.summary, "- Improvement number 1 for the resume");
    }

    #[tokio::test]
    async fn noise_only_output_falls_back() {
        // Every line at or below the 4-char threshold is discarded.
        let client = CannedGenerator("ok\n-\n•\nyes".to_string());
        let result =
            suggest_resume_updates(&client, "resume", &job(), &strings(&[]), &strings(&[])).await;
        assert_eq!(result.suggestions.len(), 5);
        assert!(result.summary.contains("missing skills"));
    }

    #[tokio::test]
    async fn optimize_priority_follows_suggestion_count() {
        let six = CannedGenerator(
            (1..=6)
                .map(|i| format!("Suggestion {i}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        let result = optimize_resume(&six, &profile(), &job()).await;
        assert_eq!(result.suggestions.len(), 6);
        assert_eq!(result.priority, Priority::High);

        let offline = OfflineGenerator::default();
        let result = optimize_resume(&offline, &profile(), &job()).await;
        assert_eq!(result.suggestions.len(), 5);
        assert_eq!(result.priority, Priority::Medium);
        assert!(result.suggestions[0].contains("Kubernetes"));
    }

    #[tokio::test]
    async fn optimize_caps_at_seven_and_keeps_keywords() {
        let many = CannedGenerator(
            (1..=10)
                .map(|i| format!("Suggestion {i}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        let result = optimize_resume(&many, &profile(), &job()).await;
        assert_eq!(result.suggestions.len(), 7);
        assert_eq!(result.priority, Priority::High);
        assert_eq!(
            result.keywords_to_add,
            strings(&["Kubernetes", "Go", "Terraform"])
        );
    }
}
