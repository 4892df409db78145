// src/interview/mod.rs
//
// Five-stage interview preparation pipeline. Stages run strictly in order
// and are independently fault-isolated: a provider failure in one stage
// switches that stage to its rule-based fallback and never blocks the rest.

mod stages;

use crate::models::{AgentRun, InterviewPrep};
use crate::services::TextGenerator;
use async_trait::async_trait;
use stages::{
    BehavioralInterviewer, InterviewCoach, PreparationPlanner, RequirementsAnalyzer,
    TechnicalInterviewer,
};
use tracing::info;

/// Read-only inputs plus the requirements accumulated by stage one, which
/// the technical and coaching stages key off.
pub(crate) struct PrepContext {
    pub company: String,
    pub role: String,
    pub description: String,
    pub requirements: Vec<String>,
}

/// One pipeline stage. `run` produces the stage's items (falling back
/// internally, never failing); `record` files them into the aggregate and,
/// for the requirements stage, into the context for later stages.
#[async_trait]
pub(crate) trait PrepStage: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, client: &dyn TextGenerator, ctx: &PrepContext) -> Vec<String>;
    fn record(&self, prep: &mut InterviewPrep, ctx: &mut PrepContext, items: Vec<String>);
}

/// Generate interview preparation materials for a role at a company.
///
/// The `agents_used` ledger always carries five entries with status
/// "completed"; it does not record whether a stage used the provider or its
/// fallback.
pub async fn generate_interview_prep(
    client: &dyn TextGenerator,
    company: &str,
    role: &str,
    description: &str,
) -> InterviewPrep {
    let stages: [Box<dyn PrepStage>; 5] = [
        Box::new(RequirementsAnalyzer),
        Box::new(TechnicalInterviewer),
        Box::new(BehavioralInterviewer),
        Box::new(InterviewCoach),
        Box::new(PreparationPlanner),
    ];

    let mut ctx = PrepContext {
        company: company.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        requirements: Vec::new(),
    };

    let mut prep = InterviewPrep {
        company: company.to_string(),
        role: role.to_string(),
        key_requirements: Vec::new(),
        technical_questions: Vec::new(),
        behavioral_questions: Vec::new(),
        tips: Vec::new(),
        preparation_checklist: Vec::new(),
        agents_used: Vec::new(),
    };

    for stage in &stages {
        let items = stage.run(client, &ctx).await;
        stage.record(&mut prep, &mut ctx, items);
        prep.agents_used.push(AgentRun::completed(stage.name()));
    }

    info!(company = %company, role = %role, "Generated interview prep via stage pipeline");
    prep
}
