// src/interview/stages.rs

use super::{PrepContext, PrepStage};
use crate::generators::generate_or_fallback;
use crate::models::InterviewPrep;
use crate::services::TextGenerator;
use async_trait::async_trait;

/// Keyword scan table for requirements extraction, checked against the
/// lower-cased role and description in this order.
const TECH_KEYWORDS: [(&str, &str); 16] = [
    ("python", "Python programming"),
    ("java", "Java development"),
    ("javascript", "JavaScript/Node.js"),
    ("react", "React frontend framework"),
    ("aws", "AWS cloud services"),
    ("azure", "Azure cloud platform"),
    ("docker", "Docker containerization"),
    ("kubernetes", "Kubernetes orchestration"),
    ("sql", "SQL databases"),
    ("api", "REST API design"),
    ("agile", "Agile methodology"),
    ("git", "Git version control"),
    ("ci/cd", "CI/CD pipelines"),
    ("machine learning", "Machine learning"),
    ("data", "Data analysis"),
    ("cloud", "Cloud computing"),
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Stage 1: extracts key requirements from the role and description.
/// Entirely rule-based, no provider call.
pub(crate) struct RequirementsAnalyzer;

#[async_trait]
impl PrepStage for RequirementsAnalyzer {
    fn name(&self) -> &'static str {
        "Job Requirements Analyzer"
    }

    async fn run(&self, _client: &dyn TextGenerator, ctx: &PrepContext) -> Vec<String> {
        let role_lower = ctx.role.to_lowercase();
        let description_lower = ctx.description.to_lowercase();

        let mut requirements: Vec<String> = TECH_KEYWORDS
            .iter()
            .filter(|(keyword, _)| {
                description_lower.contains(keyword) || role_lower.contains(keyword)
            })
            .map(|(_, label)| label.to_string())
            .collect();

        if contains_any(&role_lower, &["senior", "lead", "principal"]) {
            requirements.insert(0, "Leadership and mentoring".to_string());
        }
        if contains_any(&role_lower, &["frontend", "ui", "ux"]) {
            requirements.push("UI/UX principles".to_string());
        }
        if contains_any(&role_lower, &["backend", "server"]) {
            requirements.push("Backend architecture".to_string());
        }

        requirements.truncate(5);
        if requirements.is_empty() {
            requirements = vec![
                "Problem solving".to_string(),
                "Communication".to_string(),
                "Technical depth".to_string(),
            ];
        }
        requirements
    }

    fn record(&self, prep: &mut InterviewPrep, ctx: &mut PrepContext, items: Vec<String>) {
        ctx.requirements = items.clone();
        prep.key_requirements = items;
    }
}

/// Stage 2: role-specific technical questions. Needs at least 3 usable
/// lines from the provider, otherwise falls back to a curated set keyed by
/// role family plus up to two requirement-specific extras.
pub(crate) struct TechnicalInterviewer;

#[async_trait]
impl PrepStage for TechnicalInterviewer {
    fn name(&self) -> &'static str {
        "Technical Interview Agent"
    }

    async fn run(&self, client: &dyn TextGenerator, ctx: &PrepContext) -> Vec<String> {
        let prompt = format!(
            "You are a technical interview expert. Generate 5 technical interview questions for a {role} position.\n\n\
             Key Requirements: {requirements}\n\n\
             Provide 5 specific, challenging technical questions that assess:\n\
             1. Core technical knowledge\n\
             2. Problem-solving ability\n\
             3. Real-world experience\n\
             4. Best practices\n\
             5. System design or architecture\n\n\
             Format: One question per line.\n\n\
             Questions:",
            role = ctx.role,
            requirements = ctx.requirements.join(", "),
        );

        generate_or_fallback(
            client,
            prompt,
            400,
            |text| {
                let questions: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|l| l.len() > 10)
                    .map(str::to_string)
                    .collect();
                if questions.len() >= 3 {
                    Some(questions.into_iter().take(5).collect())
                } else {
                    None
                }
            },
            || fallback_technical_questions(&ctx.role, &ctx.requirements),
        )
        .await
    }

    fn record(&self, prep: &mut InterviewPrep, _ctx: &mut PrepContext, items: Vec<String>) {
        prep.technical_questions = items;
    }
}

fn fallback_technical_questions(role: &str, requirements: &[String]) -> Vec<String> {
    let role_lower = role.to_lowercase();
    let mut questions: Vec<String> = if contains_any(&role_lower, &["frontend", "react"]) {
        vec![
            "Explain the component lifecycle in React and how hooks changed it".to_string(),
            format!("How would you optimize performance in a large {role} application?"),
            "Describe your approach to state management - Redux vs Context API".to_string(),
            "What's the difference between controlled and uncontrolled components?".to_string(),
            "How do you handle complex form validation in React?".to_string(),
        ]
    } else if contains_any(&role_lower, &["backend", "api"]) {
        vec![
            format!("Design a scalable API for a {role} role - walk us through your approach"),
            "How do you handle database optimization and query performance?".to_string(),
            "Explain your approach to API versioning and backward compatibility".to_string(),
            "How do you implement authentication and authorization?".to_string(),
            "Describe your caching strategy for high-traffic applications".to_string(),
        ]
    } else if role_lower.contains("full stack") {
        vec![
            format!("Walk us through your tech stack and why you chose it for {role}"),
            "How do you ensure consistency between frontend and backend?".to_string(),
            "Describe your deployment pipeline and monitoring strategy".to_string(),
            "How do you approach database design in a full-stack project?".to_string(),
            "Explain your approach to testing across the full stack".to_string(),
        ]
    } else {
        vec![
            format!("Tell us about a complex technical challenge you solved for a {role} position"),
            format!("How do you stay updated with new technologies relevant to {role}?"),
            "Describe your approach to code review and quality assurance".to_string(),
            "What's your experience with version control and collaboration?".to_string(),
            format!("How do you approach debugging in {role}?"),
        ]
    };

    for requirement in requirements.iter().take(2) {
        let req_lower = requirement.to_lowercase();
        if req_lower.contains("kubernetes") {
            questions.push(
                "Explain Kubernetes architecture and container orchestration benefits".to_string(),
            );
        } else if req_lower.contains("ci/cd") {
            questions.push("How would you design a CI/CD pipeline for this role?".to_string());
        } else if req_lower.contains("cloud") {
            questions.push(format!("What's your experience with cloud services in {role}?"));
        }
    }

    questions.truncate(5);
    questions
}

/// Stage 3: behavioral questions in STAR format, recolored by company
/// keywords on the fallback path.
pub(crate) struct BehavioralInterviewer;

#[async_trait]
impl PrepStage for BehavioralInterviewer {
    fn name(&self) -> &'static str {
        "Behavioral Interview Agent"
    }

    async fn run(&self, client: &dyn TextGenerator, ctx: &PrepContext) -> Vec<String> {
        let prompt = format!(
            "You are an expert interviewer. Generate 5 behavioral interview questions for a {role} position at {company}.\n\n\
             These questions should assess:\n\
             1. Cultural fit with {company}\n\
             2. Leadership and teamwork\n\
             3. Problem-solving under pressure\n\
             4. Motivation and career goals\n\
             5. Learning and adaptability\n\n\
             Use STAR method format (Situation, Task, Action, Result).\n\
             Format: One question per line.\n\n\
             Questions:",
            role = ctx.role,
            company = ctx.company,
        );

        generate_or_fallback(
            client,
            prompt,
            350,
            |text| {
                let questions: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|l| l.len() > 15)
                    .map(str::to_string)
                    .collect();
                if questions.len() >= 3 {
                    Some(questions.into_iter().take(5).collect())
                } else {
                    None
                }
            },
            || fallback_behavioral_questions(&ctx.company, &ctx.role),
        )
        .await
    }

    fn record(&self, prep: &mut InterviewPrep, _ctx: &mut PrepContext, items: Vec<String>) {
        prep.behavioral_questions = items;
    }
}

fn fallback_behavioral_questions(company: &str, role: &str) -> Vec<String> {
    let mut questions = vec![
        format!("Why are you interested in the {role} position at {company}?"),
        "Tell us about a time you had to collaborate with a difficult team member".to_string(),
        "Describe a situation where you had to meet a tight deadline - how did you handle it?"
            .to_string(),
        format!("What attracted you to {company}'s mission and culture?"),
        "Tell us about a time you failed - what did you learn?".to_string(),
    ];

    let company_lower = company.to_lowercase();
    if contains_any(&company_lower, &["tech", "software"]) {
        questions[0] = format!("What excites you about working on {role} challenges at {company}?");
    } else if company_lower.contains("finance") {
        questions[0] =
            format!("How do your analytical skills apply to the {role} position at {company}?");
    } else if contains_any(&company_lower, &["startup", "ai", "ml"]) {
        questions[0] =
            format!("What draws you to the fast-paced environment of {company} for this {role}?");
    }

    questions.truncate(5);
    questions
}

/// Stage 4: coaching tips. The strictest parse heuristic of the pipeline:
/// five usable lines or the curated list takes over.
pub(crate) struct InterviewCoach;

#[async_trait]
impl PrepStage for InterviewCoach {
    fn name(&self) -> &'static str {
        "Interview Coaching Agent"
    }

    async fn run(&self, client: &dyn TextGenerator, ctx: &PrepContext) -> Vec<String> {
        let req_text = if ctx.requirements.is_empty() {
            "the role requirements".to_string()
        } else {
            ctx.requirements.join(", ")
        };

        let prompt = format!(
            "You are an interview coach. Provide 7 specific, actionable interview tips for a candidate applying for {role} at {company}.\n\n\
             Key Requirements: {req_text}\n\n\
             Tips should cover:\n\
             1. Company research and preparation\n\
             2. How to answer behavioral questions\n\
             3. Technical preparation strategies\n\
             4. Questions to ask the interviewer\n\
             5. Body language and presentation\n\
             6. Follow-up best practices\n\
             7. Common mistakes to avoid\n\n\
             Format: One tip per line, be specific and actionable.\n\n\
             Tips:",
            role = ctx.role,
            company = ctx.company,
        );

        generate_or_fallback(
            client,
            prompt,
            450,
            |text| {
                let tips: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|l| l.len() > 15)
                    .map(str::to_string)
                    .collect();
                if tips.len() >= 5 {
                    Some(tips.into_iter().take(7).collect())
                } else {
                    None
                }
            },
            || fallback_tips(&ctx.company, &ctx.role, &req_text),
        )
        .await
    }

    fn record(&self, prep: &mut InterviewPrep, _ctx: &mut PrepContext, items: Vec<String>) {
        prep.tips = items;
    }
}

fn fallback_tips(company: &str, role: &str, req_text: &str) -> Vec<String> {
    let mut tips = vec![
        format!("Research {company}'s recent products, initiatives, and company culture before the interview"),
        "Use the STAR method (Situation, Task, Action, Result) for behavioral questions".to_string(),
        "Prepare 3-5 specific examples from your experience that highlight relevant achievements"
            .to_string(),
        "Ask thoughtful questions about the team structure and success metrics for the role"
            .to_string(),
        format!("Highlight your experience with {req_text}"),
    ];

    let role_lower = role.to_lowercase();
    if contains_any(&role_lower, &["senior", "lead"]) {
        tips.push("Emphasize leadership, mentoring, and strategic thinking examples".to_string());
        tips.push(
            "Be prepared to discuss architectural decisions and technical trade-offs".to_string(),
        );
    }
    if role_lower.contains("backend") {
        tips.push("Be ready to discuss system design and scalability concepts".to_string());
    }
    if role_lower.contains("frontend") {
        tips.push("Prepare to discuss user experience and performance optimization".to_string());
    }

    tips.push("Maintain eye contact and use confident body language".to_string());
    tips.push("Listen carefully and take notes during the interview".to_string());

    tips.truncate(7);
    tips
}

/// Stage 5: preparation checklist. Always rule-based, no provider call.
pub(crate) struct PreparationPlanner;

#[async_trait]
impl PrepStage for PreparationPlanner {
    fn name(&self) -> &'static str {
        "Preparation Agent"
    }

    async fn run(&self, _client: &dyn TextGenerator, ctx: &PrepContext) -> Vec<String> {
        vec![
            "✓ Review your resume and be ready to discuss each point in detail".to_string(),
            "✓ Research the company: mission, products, recent news, and company culture"
                .to_string(),
            format!(
                "✓ Study the {} role requirements and prepare relevant examples",
                ctx.role
            ),
            "✓ Prepare 5-7 specific STAR method examples from your experience".to_string(),
            "✓ Prepare thoughtful questions to ask the interviewer (at least 5)".to_string(),
            "✓ Test your tech setup if it's a virtual interview (camera, mic, lighting)"
                .to_string(),
            "✓ Plan your outfit - dress professionally and appropriately for the company"
                .to_string(),
            "✓ Plan your travel/setup - arrive 10-15 minutes early for in-person interviews"
                .to_string(),
            "✓ Bring printed copies of your resume and cover letter".to_string(),
            "✓ Practice your answers and mock interview with a friend or mentor".to_string(),
            "✓ Get a good night's sleep the day before".to_string(),
            "✓ Eat a healthy meal before the interview".to_string(),
        ]
    }

    fn record(&self, prep: &mut InterviewPrep, _ctx: &mut PrepContext, items: Vec<String>) {
        prep.preparation_checklist = items;
    }
}
