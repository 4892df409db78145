// src/generators/email.rs
//
// Email template generation: follow-up, thank-you, and negotiation families.
// An unknown template kind is not an error, it selects the follow-up family.

use crate::generators::generate_or_fallback;
use crate::models::EmailTemplateContext;
use crate::services::TextGenerator;
use tracing::info;

const MAX_TOKENS: u32 = 500;

pub const FOLLOW_UP: &str = "follow_up";
pub const THANK_YOU: &str = "thank_you";
pub const NEGOTIATION: &str = "negotiation";

/// Generate an email for the given template kind. Plain text on every path.
pub async fn generate_email_template(
    client: &dyn TextGenerator,
    kind: &str,
    ctx: &EmailTemplateContext,
) -> String {
    let prompt = build_prompt(kind, ctx);

    let email = generate_or_fallback(
        client,
        prompt,
        MAX_TOKENS,
        |text| Some(text.to_string()),
        || fallback_email(kind, ctx),
    )
    .await;

    info!(template_kind = %kind, company = %ctx.company, "Generated email template");
    email
}

fn build_prompt(kind: &str, ctx: &EmailTemplateContext) -> String {
    match kind {
        THANK_YOU => format!(
            "Write a professional thank-you email after a job interview:\n\n\
             Company: {company}\n\
             Position: {role}\n\
             Applicant: {name}\n\
             Interview Date: {date}\n\n\
             Write a sincere thank-you email that:\n\
             1. Thanks the interviewer\n\
             2. Reaffirms interest\n\
             3. Mentions a specific discussion point\n\
             4. Includes next steps\n\n\
             Email:",
            company = ctx.company,
            role = ctx.role,
            name = ctx.user_name,
            date = ctx.interview_date.as_deref().unwrap_or("recent"),
        ),
        NEGOTIATION => format!(
            "Write a professional salary negotiation email:\n\n\
             Company: {company}\n\
             Position: {role}\n\
             Applicant: {name}\n\
             Current Offer: ${offer}\n\
             Desired Salary: ${desired}\n\n\
             Write a tactful negotiation email that:\n\
             1. Expresses gratitude for the offer\n\
             2. Presents counter-offer with justification\n\
             3. Remains positive and collaborative\n\
             4. Invites discussion\n\n\
             Email:",
            company = ctx.company,
            role = ctx.role,
            name = ctx.user_name,
            offer = ctx.current_offer.as_deref().unwrap_or("X"),
            desired = ctx.desired_salary.as_deref().unwrap_or("Y"),
        ),
        // Follow-up is the default family for unknown kinds.
        _ => format!(
            "Write a professional follow-up email for a job application:\n\n\
             Company: {company}\n\
             Position: {role}\n\
             Applicant: {name}\n\
             Days since application: {days}\n\n\
             Write a polite, concise follow-up email that:\n\
             1. References the application\n\
             2. Reiterates interest\n\
             3. Asks about timeline\n\
             4. Remains professional\n\n\
             Email:",
            company = ctx.company,
            role = ctx.role,
            name = ctx.user_name,
            days = ctx.days_since_application.unwrap_or(7),
        ),
    }
}

fn fallback_email(kind: &str, ctx: &EmailTemplateContext) -> String {
    let company = &ctx.company;
    let role = &ctx.role;
    let name = &ctx.user_name;

    match kind {
        THANK_YOU => format!(
            "Subject: Thank You - {role} Interview\n\n\
             Dear Hiring Manager,\n\n\
             Thank you for taking the time to meet with me regarding the {role} position at \
             {company}. I enjoyed our conversation and learning more about the team and company \
             culture.\n\n\
             Our discussion about [specific topic] further confirmed my enthusiasm for this role. \
             I believe my experience aligns well with your needs, and I'm excited about the \
             possibility of contributing to your team.\n\n\
             Please let me know if you need any additional information. I look forward to hearing \
             about the next steps.\n\n\
             Best regards,\n\
             {name}"
        ),
        NEGOTIATION => format!(
            "Subject: {role} Offer Discussion\n\n\
             Dear Hiring Manager,\n\n\
             Thank you for extending the offer for the {role} position at {company}. I'm excited \
             about the opportunity and appreciate your confidence in me.\n\n\
             After careful consideration of the role's responsibilities and market rates for \
             similar positions, I was hoping we could discuss a salary of ${desired}. This \
             reflects my [years of experience/specialized skills/market research].\n\n\
             I'm confident we can find a number that works for both of us. I'm very enthusiastic \
             about joining the team and contributing to {company}'s success.\n\n\
             I'd welcome the opportunity to discuss this further. Thank you for your \
             understanding.\n\n\
             Best regards,\n\
             {name}",
            desired = ctx.desired_salary.as_deref().unwrap_or("X"),
        ),
        _ => format!(
            "Subject: Following Up on {role} Application\n\n\
             Dear Hiring Manager,\n\n\
             I hope this email finds you well. I recently applied for the {role} position at \
             {company} and wanted to follow up on the status of my application.\n\n\
             I remain very interested in this opportunity and believe my skills and experience \
             would be a great fit for your team. I would appreciate any update you can provide \
             regarding the timeline for next steps.\n\n\
             Thank you for your consideration, and I look forward to hearing from you.\n\n\
             Best regards,\n\
             {name}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{CannedGenerator, OfflineGenerator};

    fn ctx() -> EmailTemplateContext {
        EmailTemplateContext {
            company: "Initrode".to_string(),
            role: "SRE".to_string(),
            user_name: "Robin".to_string(),
            days_since_application: Some(9),
            interview_date: Some("2026-08-20".to_string()),
            current_offer: Some("120,000".to_string()),
            desired_salary: Some("135,000".to_string()),
        }
    }

    #[tokio::test]
    async fn provider_text_is_returned_verbatim() {
        let client = CannedGenerator("Subject: Hello\n\nBody.".to_string());
        let email = generate_email_template(&client, FOLLOW_UP, &ctx()).await;
        assert_eq!(email, "Subject: Hello\n\nBody.");
    }

    #[tokio::test]
    async fn each_family_has_a_distinct_fallback() {
        let client = OfflineGenerator::default();

        let follow_up = generate_email_template(&client, FOLLOW_UP, &ctx()).await;
        assert!(follow_up.starts_with("Subject: Following Up on SRE Application"));
        assert!(follow_up.ends_with("Robin"));

        let thank_you = generate_email_template(&client, THANK_YOU, &ctx()).await;
        assert!(thank_you.starts_with("Subject: Thank You - SRE Interview"));
        assert!(thank_you.contains("Initrode"));

        let negotiation = generate_email_template(&client, NEGOTIATION, &ctx()).await;
        assert!(negotiation.starts_with("Subject: SRE Offer Discussion"));
        assert!(negotiation.contains("$135,000"));
    }

    #[tokio::test]
    async fn unknown_kind_falls_back_to_follow_up_family() {
        let client = OfflineGenerator::default();
        let unknown = generate_email_template(&client, "unknown_type", &ctx()).await;
        let follow_up = generate_email_template(&client, FOLLOW_UP, &ctx()).await;
        assert_eq!(unknown, follow_up);
    }

    #[tokio::test]
    async fn fallback_is_idempotent() {
        let client = OfflineGenerator::default();
        let first = generate_email_template(&client, NEGOTIATION, &ctx()).await;
        let second = generate_email_template(&client, NEGOTIATION, &ctx()).await;
        assert_eq!(first, second);
    }
}
