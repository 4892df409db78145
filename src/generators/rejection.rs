// src/generators/rejection.rs

use crate::generators::{generate_or_fallback, join_skills};
use crate::models::{ApplicationRecord, RejectionAnalysis};
use crate::services::TextGenerator;
use tracing::info;

const MAX_TOKENS: u32 = 400;

/// The recommendation list is fixed on every path; only the narrative
/// analysis varies with the provider.
const RECOMMENDATIONS: [&str; 4] = [
    "Review the job requirements and identify skill gaps",
    "Build projects showcasing relevant skills",
    "Consider certifications in key technology areas",
    "Network with professionals in similar roles",
];

/// Analyze a rejected application and produce narrative insights plus fixed
/// recommendations and the posting's top skill focus areas.
pub async fn analyze_rejection(
    client: &dyn TextGenerator,
    application: &ApplicationRecord,
) -> RejectionAnalysis {
    let job = &application.job;
    let user = &application.user;
    let notes = application.notes.as_deref().unwrap_or("");

    let prompt = format!(
        "Analyze this rejected job application and provide insights:\n\n\
         Job: {title} at {company}\n\
         Candidate Skills: {skills}\n\
         Experience: {years} years\n\
         Application Notes: {notes}\n\n\
         Provide a brief analysis (3-4 sentences) covering:\n\
         1. Possible reasons for rejection\n\
         2. Skills that may have been lacking\n\
         3. Specific recommendations for improvement\n\n\
         Analysis:",
        title = job.title,
        company = job.company,
        skills = join_skills(&user.skills, 8),
        years = user.experience_years,
        notes = notes,
    );

    let analysis = generate_or_fallback(
        client,
        prompt,
        MAX_TOKENS,
        |text| Some(text.to_string()),
        || fallback_analysis(&job.title, &job.skills_required),
    )
    .await;

    info!(job_title = %job.title, "Completed rejection analysis");

    RejectionAnalysis {
        analysis,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        skill_focus_areas: job.skills_required.iter().take(3).cloned().collect(),
    }
}

fn fallback_analysis(title: &str, skills_required: &[String]) -> String {
    let focus_skill = skills_required
        .first()
        .map(String::as_str)
        .unwrap_or("relevant technologies");

    format!(
        "Based on the application for {title}, here are some possible factors:\n\n\
         1. The role may have required more specialized experience in certain technical areas.\n\
         2. Competition was likely strong, with candidates who had more direct experience with \
         the required technologies.\n\
         3. Consider strengthening your skills in {focus_skill} and gaining hands-on project \
         experience.\n\
         4. Tailor your application materials more specifically to highlight relevant \
         achievements.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{CannedGenerator, OfflineGenerator};
    use crate::models::{JobPosting, UserProfile};
    use chrono::Utc;

    fn application() -> ApplicationRecord {
        ApplicationRecord {
            status: "rejected".to_string(),
            job: JobPosting {
                title: "Data Engineer".to_string(),
                company: "Globex".to_string(),
                description: "Pipelines.".to_string(),
                skills_required: vec![
                    "Spark".to_string(),
                    "Airflow".to_string(),
                    "Python".to_string(),
                    "Kafka".to_string(),
                ],
                external_id: None,
                source: None,
            },
            user: UserProfile {
                name: "Sam".to_string(),
                skills: vec!["Python".to_string(), "SQL".to_string()],
                experience_years: 3,
            },
            notes: Some("Rejected after phone screen".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn recommendations_are_fixed_even_on_ai_success() {
        let client = CannedGenerator("The rejection likely came down to experience.".to_string());
        let result = analyze_rejection(&client, &application()).await;

        assert_eq!(result.analysis, "The rejection likely came down to experience.");
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(
            result.recommendations[0],
            "Review the job requirements and identify skill gaps"
        );
    }

    #[tokio::test]
    async fn focus_areas_are_top_three_required_skills() {
        let client = OfflineGenerator::default();
        let result = analyze_rejection(&client, &application()).await;

        assert_eq!(
            result.skill_focus_areas,
            vec!["Spark".to_string(), "Airflow".to_string(), "Python".to_string()]
        );
        assert!(result.analysis.contains("Data Engineer"));
        assert!(result.analysis.contains("Spark"));
    }

    #[tokio::test]
    async fn fallback_without_required_skills_stays_populated() {
        let client = OfflineGenerator::default();
        let mut app = application();
        app.job.skills_required.clear();

        let result = analyze_rejection(&client, &app).await;
        assert!(result.analysis.contains("relevant technologies"));
        assert!(result.skill_focus_areas.is_empty());
        assert_eq!(result.recommendations.len(), 4);
    }
}
