// src/generators/next_actions.rs
//
// Pure rule table mapping application status and elapsed time to suggested
// next steps. No provider call; same input always yields the same output.

/// Suggest next actions for an application. Matched branches return exactly
/// three items; an unknown status returns an empty list rather than an error.
pub fn suggest_next_actions(status: &str, days_since_applied: i64) -> Vec<String> {
    let suggestions: &[&str] = match status {
        "saved" => &[
            "Review the job description thoroughly and tailor your resume",
            "Research the company culture and recent news",
            "Prepare a customized cover letter highlighting relevant experience",
        ],
        "applied" if days_since_applied < 7 => &[
            "Wait for initial response (typically takes 7-10 days)",
            "Prepare for potential technical screening questions",
            "Continue applying to similar roles",
        ],
        "applied" if days_since_applied < 14 => &[
            "Consider sending a polite follow-up email to the recruiter",
            "Connect with current employees on LinkedIn for insights",
            "Review and strengthen interview preparation",
        ],
        "applied" => &[
            "Send a professional follow-up email expressing continued interest",
            "Reach out to the hiring manager if contact information is available",
            "Consider this application inactive and focus on new opportunities",
        ],
        "interview_scheduled" => &[
            "Research common interview questions for this role and company",
            "Prepare STAR method examples showcasing relevant achievements",
            "Review the job description and prepare questions for the interviewer",
        ],
        "offer_received" => &[
            "Evaluate the offer against your requirements and market rates",
            "Negotiate salary and benefits if appropriate",
            "Request time to make a decision if needed (typically 3-7 days)",
        ],
        "rejected" => &[
            "Request feedback on your application or interview performance",
            "Analyze what could be improved for future applications",
            "Stay positive and continue applying to other opportunities",
        ],
        _ => &[],
    };

    suggestions.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_status_yields_three_items() {
        for status in [
            "saved",
            "applied",
            "interview_scheduled",
            "offer_received",
            "rejected",
        ] {
            assert_eq!(suggest_next_actions(status, 0).len(), 3, "status {status}");
        }
    }

    #[test]
    fn applied_branches_on_day_thresholds() {
        let fresh = suggest_next_actions("applied", 3);
        assert!(fresh[0].contains("Wait for initial response"));

        let mid = suggest_next_actions("applied", 10);
        assert_eq!(mid.len(), 3);
        assert!(mid[0].contains("follow-up email"));
        assert!(mid.iter().all(|s| !s.contains("inactive")));

        let stale = suggest_next_actions("applied", 14);
        assert!(stale.iter().any(|s| s.contains("inactive")));
    }

    #[test]
    fn unknown_status_is_empty_not_an_error() {
        assert!(suggest_next_actions("withdrawn", 5).is_empty());
        assert!(suggest_next_actions("", 0).is_empty());
    }

    #[test]
    fn same_input_same_output() {
        assert_eq!(
            suggest_next_actions("offer_received", 2),
            suggest_next_actions("offer_received", 2)
        );
    }
}
