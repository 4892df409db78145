// src/generators/cover_letter.rs

use crate::generators::{generate_or_fallback, join_skills, truncate_chars};
use crate::models::{JobPosting, UserProfile};
use crate::services::TextGenerator;
use tracing::info;

const MAX_TOKENS: u32 = 600;

/// Generate a customized cover letter for one job application. Returns plain
/// text on every path; when the provider is down the letter comes from a
/// deterministic template interpolating the same profile fields.
pub async fn generate_cover_letter(
    client: &dyn TextGenerator,
    profile: &UserProfile,
    job: &JobPosting,
) -> String {
    let skills_str = join_skills(&profile.skills, 10);
    let name = applicant_name(profile);

    let prompt = format!(
        "Write a professional cover letter for the following job application:\n\n\
         Job Title: {title}\n\
         Company: {company}\n\
         Job Description: {description}\n\n\
         Candidate Profile:\n\
         - Name: {name}\n\
         - Experience: {years} years\n\
         - Key Skills: {skills}\n\n\
         Write a concise, professional cover letter (3-4 paragraphs) that:\n\
         1. Expresses enthusiasm for the role\n\
         2. Highlights relevant skills and experience\n\
         3. Explains why they're a great fit\n\
         4. Includes a call to action\n\n\
         Cover Letter:",
        title = job.title,
        company = job.company,
        description = truncate_chars(&job.description, 300),
        name = name,
        years = profile.experience_years,
        skills = skills_str,
    );

    let letter = generate_or_fallback(
        client,
        prompt,
        MAX_TOKENS,
        |text| Some(text.to_string()),
        || fallback_letter(name, profile.experience_years, &skills_str, job),
    )
    .await;

    info!(job_title = %job.title, "Generated cover letter");
    letter
}

fn applicant_name(profile: &UserProfile) -> &str {
    if profile.name.is_empty() {
        "The Applicant"
    } else {
        &profile.name
    }
}

fn fallback_letter(name: &str, years: u32, skills_str: &str, job: &JobPosting) -> String {
    let primary_skill = skills_str
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("software development");

    format!(
        "Dear Hiring Manager,\n\n\
         I am writing to express my strong interest in the {title} position at {company}. \
         With {years} years of professional experience and expertise in {skills}, I am \
         confident in my ability to contribute effectively to your team.\n\n\
         My background in {primary_skill} has prepared me well for this role. I am \
         particularly drawn to this opportunity because of {company}'s reputation and the \
         exciting challenges this position offers.\n\n\
         I would welcome the opportunity to discuss how my skills and experience align with \
         your needs. Thank you for considering my application, and I look forward to hearing \
         from you.\n\n\
         Best regards,\n\
         {name}",
        title = job.title,
        company = job.company,
        years = years,
        skills = skills_str,
        primary_skill = primary_skill,
        name = name,
    )
}
