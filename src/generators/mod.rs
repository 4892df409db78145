// src/generators/mod.rs
//
// Content generators. Each feature builds a prompt from truncated context,
// asks the provider for text, parses it into the feature's shape, and falls
// back to a deterministic template when the provider is unavailable or the
// output fails the feature's parse heuristic. No generator ever fails
// outward: every public function returns a fully populated result.

pub mod cover_letter;
pub mod email;
pub mod insights;
pub mod job_fit;
pub mod next_actions;
pub mod rejection;
pub mod resume;

pub use cover_letter::generate_cover_letter;
pub use email::generate_email_template;
pub use insights::generate_ai_insights;
pub use job_fit::analyze_job_requirements;
pub use next_actions::suggest_next_actions;
pub use rejection::analyze_rejection;
pub use resume::{optimize_resume, suggest_resume_updates};

use crate::services::{GenerationResult, TextGenerator};
use tracing::warn;

/// Attempt the provider, fall back deterministically.
///
/// `parse` turns generated text into the feature's shape and returns `None`
/// when the output fails the feature's quality heuristic; `fallback` builds
/// the template result. Both paths produce the same shape, so callers cannot
/// tell the source apart structurally.
pub(crate) async fn generate_or_fallback<T>(
    client: &dyn TextGenerator,
    prompt: String,
    max_tokens: u32,
    parse: impl FnOnce(&str) -> Option<T>,
    fallback: impl FnOnce() -> T,
) -> T {
    match client.generate(&prompt, max_tokens).await {
        GenerationResult::Text(text) => match parse(&text) {
            Some(result) => result,
            None => {
                warn!("Generated text failed the parse heuristic, using fallback template");
                fallback()
            }
        },
        GenerationResult::Unavailable => fallback(),
    }
}

/// Cap a string at `max` characters without splitting a code point.
/// Prompt inputs are always pre-truncated to bound request size.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Split generated text into list items: trim each line, strip leading and
/// trailing bullet markers, drop lines whose length is at or below `min_len`.
/// The threshold is per-feature and part of the behavioral contract.
pub(crate) fn parse_lines(text: &str, min_len: usize) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_matches(|c: char| c == '-' || c == '•' || c == ' ')
                .trim()
                .to_string()
        })
        .filter(|line| line.len() > min_len)
        .collect()
}

pub(crate) fn join_skills(skills: &[String], limit: usize) -> String {
    skills
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::services::{GenerationResult, TextGenerator};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Simulates an unreachable or misconfigured provider while counting how
    /// often it was asked.
    #[derive(Default)]
    pub struct OfflineGenerator {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for OfflineGenerator {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> GenerationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            GenerationResult::Unavailable
        }
    }

    /// Always answers with the same canned text.
    pub struct CannedGenerator(pub String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> GenerationResult {
            GenerationResult::Text(self.0.clone())
        }
    }
}
