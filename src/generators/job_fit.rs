// src/generators/job_fit.rs

use crate::generators::generate_or_fallback;
use crate::models::{JobFitAnalysis, JobPosting, UserProfile};
use crate::services::{analyze_skill_gap, TextGenerator};
use tracing::info;

const MAX_TOKENS: u32 = 600;

/// Analyze how well a profile fits a posting. The skill gap and percentage
/// are always computed locally; the provider only contributes the narrative.
pub async fn analyze_job_requirements(
    client: &dyn TextGenerator,
    job: &JobPosting,
    profile: &UserProfile,
) -> JobFitAnalysis {
    let gap = analyze_skill_gap(&job.skills_required, &profile.skills);

    let prompt = format!(
        "Analyze this job opportunity for the candidate:\n\n\
         Job Title: {title}\n\
         Company: {company}\n\
         Required Skills: {required}\n\n\
         Candidate Skills: {held}\n\
         Experience: {years} years\n\n\
         Provide:\n\
         1. Skill match percentage\n\
         2. Top 3 strengths that align with the role\n\
         3. Top 3 skills to improve or learn\n\
         4. Overall fit assessment\n\n\
         Analysis:",
        title = job.title,
        company = job.company,
        required = job.skills_required.join(", "),
        held = profile.skills.join(", "),
        years = profile.experience_years,
    );

    let matched = gap.matching.len();
    let required = job.skills_required.len();
    let percentage = gap.match_percentage;

    let analysis = generate_or_fallback(
        client,
        prompt,
        MAX_TOKENS,
        |text| Some(text.to_string()),
        || {
            format!(
                "You match {matched} of {required} required skills ({percentage}% match)."
            )
        },
    )
    .await;

    let recommendations = if gap.missing.is_empty() {
        vec!["Continue building on your existing skills".to_string()]
    } else {
        gap.missing.iter().take(5).cloned().collect()
    };

    info!(job_title = %job.title, match_percentage = percentage, "Analyzed job requirements");

    JobFitAnalysis {
        matching_skills: gap.matching.into_iter().take(10).collect(),
        missing_skills: gap.missing.into_iter().take(10).collect(),
        match_percentage: percentage,
        analysis,
        recommendations,
    }
}
