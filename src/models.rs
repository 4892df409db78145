// src/models.rs
//
// Input records handed in by the application layer (routing/persistence are
// external to this crate) and the structured results the AI features return.
// Every result type is always fully populated: the generators never return
// partial data, even when the provider is unreachable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile fields the AI features read. Owned by the profile module of the
/// embedding application; this crate only consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
}

/// A job posting as stored by the application layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub external_id: Option<String>,
    pub source: Option<String>,
}

/// One tracked application. `status` is one of "saved", "applied",
/// "interview_scheduled", "offer_received", "rejected"; unknown values are
/// tolerated (see `suggest_next_actions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub status: String,
    pub job: JobPosting,
    pub user: UserProfile,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of analyzing a rejected application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionAnalysis {
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub skill_focus_areas: Vec<String>,
}

/// Resume improvement suggestions tailored to a target job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeSuggestions {
    pub summary: String,
    pub suggestions: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub keywords_to_add: Vec<String>,
    pub job_requirements: Vec<String>,
}

/// Skill-gap comparison between a job posting and a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFitAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: f64,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

/// Resume optimization suggestions for one target posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeOptimization {
    pub suggestions: Vec<String>,
    pub keywords_to_add: Vec<String>,
    pub priority: Priority,
}

/// Priority flag on `ResumeOptimization`. Derived purely from how many
/// suggestions survive truncation (more than 5 means "high"), not from any
/// semantic judgment of the suggestions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// Context for email template generation. Optional fields belong to specific
/// template families: `days_since_application` to follow-ups,
/// `interview_date` to thank-yous, the salary fields to negotiations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplateContext {
    pub company: String,
    pub role: String,
    pub user_name: String,
    pub days_since_application: Option<i64>,
    pub interview_date: Option<String>,
    pub current_offer: Option<String>,
    pub desired_salary: Option<String>,
}

/// Aggregate job-search statistics plus an AI (or templated) narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub success_rate: f64,
    pub interview_rate: f64,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub trending_companies: Vec<String>,
    pub top_skills_needed: Vec<String>,
}

/// Aggregate output of the five-stage interview preparation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewPrep {
    pub company: String,
    pub role: String,
    pub key_requirements: Vec<String>,
    pub technical_questions: Vec<String>,
    pub behavioral_questions: Vec<String>,
    pub tips: Vec<String>,
    pub preparation_checklist: Vec<String>,
    pub agents_used: Vec<AgentRun>,
}

/// Ledger entry for one pipeline stage. Status is "completed" whenever the
/// stage returned a result, including via its rule-based fallback; the ledger
/// does not distinguish AI output from fallback output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub name: String,
    pub status: String,
}

impl AgentRun {
    pub(crate) fn completed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: "completed".to_string(),
        }
    }
}
