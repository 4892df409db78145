// src/services/mod.rs
//
// Provider-facing services shared by all content generators.

pub mod skill_gap;
pub mod watsonx;

// Re-export commonly used types for convenience
pub use skill_gap::{analyze_skill_gap, SkillGapResult};
pub use watsonx::{GenerationResult, TextGenerator, WatsonxConfig, WatsonxService};
