// src/lib.rs
//! AI generation core for the Job Tracker platform.
//!
//! Produces career-application content: cover letters, rejection analyses,
//! resume suggestions, interview preparation packets, email templates, and
//! aggregate job-search insights. Every feature composes a prompt from
//! structured input, dispatches it to IBM watsonx, and falls back to a
//! deterministic rule-based generator whenever the provider is unreachable,
//! misconfigured, or returns unusable output — public entry points always
//! return a fully populated result and never fail.
//!
//! The HTTP routing, persistence, scheduling, and notification layers live in
//! the embedding application; this crate only consumes their records
//! ([`models::UserProfile`], [`models::JobPosting`],
//! [`models::ApplicationRecord`]) and hands back structured results.

pub mod generators;
pub mod interview;
pub mod models;
pub mod services;

pub use generators::{
    analyze_job_requirements, analyze_rejection, generate_ai_insights, generate_cover_letter,
    generate_email_template, optimize_resume, suggest_next_actions, suggest_resume_updates,
};
pub use interview::generate_interview_prep;
pub use services::{
    analyze_skill_gap, GenerationResult, SkillGapResult, TextGenerator, WatsonxConfig,
    WatsonxService,
};
