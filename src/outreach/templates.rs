// src/outreach/templates.rs
//! Static message catalog: three tone variants per channel, plus the
//! fixed tips list appended to every bundle.

use serde::{Deserialize, Serialize};

/// Fixed tone variants, in carousel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneVariant {
    Standard,
    Personal,
    Silly,
}

impl ToneVariant {
    pub const ALL: [ToneVariant; 3] = [
        ToneVariant::Standard,
        ToneVariant::Personal,
        ToneVariant::Silly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneVariant::Standard => "standard",
            ToneVariant::Personal => "personal",
            ToneVariant::Silly => "silly",
        }
    }
}

/// An email draft template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

/// One value per tone variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneSet<T> {
    pub standard: T,
    pub personal: T,
    pub silly: T,
}

impl<T> ToneSet<T> {
    pub fn get(&self, variant: ToneVariant) -> &T {
        match variant {
            ToneVariant::Standard => &self.standard,
            ToneVariant::Personal => &self.personal,
            ToneVariant::Silly => &self.silly,
        }
    }
}

/// LinkedIn connection-message templates.
pub fn linkedin_messages() -> ToneSet<String> {
    ToneSet {
        standard: "Hi [Name], I saw the [Job Title] role at [Company] and I'm really excited \
                   about the opportunity. I'd love to connect and learn more about the position."
            .to_string(),
        personal: "Hey [Name]! I've been following [Company]'s journey and I'm genuinely \
                   impressed by your recent work. I'd love to chat about the [Job Title] role."
            .to_string(),
        silly: "Hi [Name]! 🚀 I promise I'm more professional than this emoji suggests, but I \
                couldn't resist reaching out about the [Job Title] role at [Company]!"
            .to_string(),
    }
}

/// Email draft templates.
pub fn email_messages() -> ToneSet<EmailTemplate> {
    ToneSet {
        standard: EmailTemplate {
            subject: "Excited about the [Job Title] role at [Company]".to_string(),
            body: "Hi [Name],\n\nI came across the [Job Title] position at [Company] and I'm \
                   genuinely excited about the opportunity.\n\nI'd love to discuss how my \
                   experience could help drive [Company]'s initiatives forward.\n\nWould you be \
                   open to a brief conversation?\n\nBest regards,\n[Your Name]"
                .to_string(),
        },
        personal: EmailTemplate {
            subject: "Your recent work at [Company] caught my attention".to_string(),
            body: "Hi [Name],\n\nYour recent work on scaling [Company]'s platform really caught \
                   my attention.\n\nI'd love to chat about how my experience could contribute to \
                   your team's success on the [Job Title] side.\n\nBest,\n[Your Name]"
                .to_string(),
        },
        silly: EmailTemplate {
            subject: "🚀 [Job Title] ready for takeoff at [Company]!".to_string(),
            body: "Hi [Name],\n\nI promise I'm more professional than this emoji suggests! \
                   😄\n\nI'm genuinely excited about the [Job Title] role and would love to \
                   discuss how I can help [Company] reach new heights.\n\nReady when you \
                   are!\n[Your Name]"
                .to_string(),
        },
    }
}

/// Tips appended to every generated bundle.
pub fn outreach_tips() -> Vec<String> {
    vec![
        "Reach out within 48 hours of the job being posted for the best response rate."
            .to_string(),
        "Mention something specific about the company to show you did your homework.".to_string(),
        "Keep your first message short; ask for a conversation, not a job.".to_string(),
        "Follow up once after 4-5 business days if you don't hear back.".to_string(),
        "Connect on LinkedIn before or right after sending your email.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_order() {
        assert_eq!(ToneVariant::ALL[0], ToneVariant::Standard);
        assert_eq!(ToneVariant::ALL[1], ToneVariant::Personal);
        assert_eq!(ToneVariant::ALL[2], ToneVariant::Silly);
    }

    #[test]
    fn test_catalog_templates_carry_tokens() {
        let linkedin = linkedin_messages();
        for variant in ToneVariant::ALL {
            assert!(linkedin.get(variant).contains("[Name]"));
        }
        let email = email_messages();
        assert!(email.get(ToneVariant::Standard).body.contains("[Company]"));
    }

    #[test]
    fn test_tone_set_serializes_with_lowercase_keys() {
        let json = serde_json::to_value(linkedin_messages()).unwrap();
        assert!(json.get("standard").is_some());
        assert!(json.get("personal").is_some());
        assert!(json.get("silly").is_some());
    }
}
