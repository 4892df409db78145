// src/generators/insights.rs

use crate::generators::{generate_or_fallback, join_skills};
use crate::models::{ApplicationRecord, InsightsReport, UserProfile};
use crate::services::skill_gap::round1;
use crate::services::TextGenerator;
use std::collections::HashSet;
use tracing::info;

const MAX_TOKENS: u32 = 700;

/// How many applications feed the trending-companies and top-skills sets.
/// A deliberate cap, not a pagination artifact.
const TREND_WINDOW: usize = 10;

/// Compute job-search statistics over a batch of applications and combine
/// them with an AI narrative (or a one-line templated summary) and fixed
/// recommendations.
pub async fn generate_ai_insights(
    client: &dyn TextGenerator,
    applications: &[ApplicationRecord],
    profile: &UserProfile,
) -> InsightsReport {
    let total = applications.len();
    let count = |status: &str| applications.iter().filter(|a| a.status == status).count();
    let applied = count("applied");
    let interviews = count("interview_scheduled");
    let offers = count("offer_received");
    let rejected = count("rejected");

    let success_rate = rate(offers, total);
    let interview_rate = rate(interviews, total);

    let prompt = format!(
        "Analyze this job search performance and provide insights:\n\n\
         Total Applications: {total}\n\
         Applied: {applied}\n\
         Interviews: {interviews}\n\
         Offers: {offers}\n\
         Rejected: {rejected}\n\n\
         User Skills: {skills}\n\
         Experience: {years} years\n\n\
         Provide:\n\
         1. Performance assessment\n\
         2. Three specific recommendations to improve success rate\n\
         3. Skills to focus on based on application results\n\
         4. Application strategy suggestions\n\n\
         Insights:",
        skills = join_skills(&profile.skills, 10),
        years = profile.experience_years,
    );

    let summary = generate_or_fallback(
        client,
        prompt,
        MAX_TOKENS,
        |text| Some(text.to_string()),
        || format!("You've applied to {total} jobs with a {success_rate}% offer rate."),
    )
    .await;

    let window = &applications[..applications.len().min(TREND_WINDOW)];
    let trending_companies = dedup_preserving_order(window.iter().map(|a| a.job.company.clone()));
    let top_skills_needed: Vec<String> = dedup_preserving_order(
        window
            .iter()
            .flat_map(|a| a.job.skills_required.iter().take(3).cloned()),
    )
    .into_iter()
    .take(10)
    .collect();

    info!(total = total, success_rate = success_rate, "Generated job-search insights");

    InsightsReport {
        success_rate,
        interview_rate,
        summary,
        recommendations: vec![
            "Tailor your resume to each job posting".to_string(),
            "Follow up on applications after 5-7 days".to_string(),
            "Practice interview skills for common questions".to_string(),
        ],
        trending_companies,
        top_skills_needed,
    }
}

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}

fn dedup_preserving_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{CannedGenerator, OfflineGenerator};
    use crate::models::JobPosting;
    use chrono::Utc;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Noor".to_string(),
            skills: vec!["Rust".to_string()],
            experience_years: 2,
        }
    }

    fn application(status: &str, company: &str, skills: &[&str]) -> ApplicationRecord {
        ApplicationRecord {
            status: status.to_string(),
            job: JobPosting {
                title: "Engineer".to_string(),
                company: company.to_string(),
                description: String::new(),
                skills_required: skills.iter().map(|s| s.to_string()).collect(),
                external_id: None,
                source: None,
            },
            user: profile(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_zero_rates() {
        let client = OfflineGenerator::default();
        let report = generate_ai_insights(&client, &[], &profile()).await;

        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.interview_rate, 0.0);
        assert_eq!(report.summary, "You've applied to 0 jobs with a 0% offer rate.");
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.trending_companies.is_empty());
        assert!(report.top_skills_needed.is_empty());
    }

    #[tokio::test]
    async fn rates_are_percent_of_total_rounded() {
        let apps = vec![
            application("applied", "A", &[]),
            application("interview_scheduled", "B", &[]),
            application("offer_received", "C", &[]),
            application("rejected", "D", &[]),
            application("saved", "E", &[]),
            application("applied", "F", &[]),
        ];
        let client = OfflineGenerator::default();
        let report = generate_ai_insights(&client, &apps, &profile()).await;

        // 1 offer and 1 interview out of 6.
        assert_eq!(report.success_rate, 16.7);
        assert_eq!(report.interview_rate, 16.7);
        assert!(report.summary.contains("6 jobs"));
    }

    #[tokio::test]
    async fn ai_summary_replaces_the_template() {
        let apps = vec![application("applied", "A", &[])];
        let client = CannedGenerator("Your pipeline looks healthy.".to_string());
        let report = generate_ai_insights(&client, &apps, &profile()).await;
        assert_eq!(report.summary, "Your pipeline looks healthy.");
    }

    #[tokio::test]
    async fn trends_only_consider_the_first_ten_applications() {
        let mut apps: Vec<ApplicationRecord> = (0..10)
            .map(|i| application("applied", &format!("Company{i}"), &["Rust", "Go", "SQL", "C"]))
            .collect();
        apps.push(application("applied", "Beyond", &["Cobol"]));

        let client = OfflineGenerator::default();
        let report = generate_ai_insights(&client, &apps, &profile()).await;

        assert_eq!(report.trending_companies.len(), 10);
        assert!(!report.trending_companies.contains(&"Beyond".to_string()));
        // First 3 skills per application, deduplicated: the fourth never shows.
        assert_eq!(
            report.top_skills_needed,
            vec!["Rust".to_string(), "Go".to_string(), "SQL".to_string()]
        );
    }

    #[tokio::test]
    async fn duplicate_companies_are_deduplicated() {
        let apps = vec![
            application("applied", "Acme", &[]),
            application("rejected", "Acme", &[]),
            application("applied", "Globex", &[]),
        ];
        let client = OfflineGenerator::default();
        let report = generate_ai_insights(&client, &apps, &profile()).await;
        assert_eq!(
            report.trending_companies,
            vec!["Acme".to_string(), "Globex".to_string()]
        );
    }
}
