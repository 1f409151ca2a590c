// src/outreach/mod.rs
use serde::{Deserialize, Serialize};

pub mod personalize;
pub mod selector;
pub mod templates;

pub use selector::{ContactSelectors, VariantSelector};
pub use templates::{EmailTemplate, ToneSet, ToneVariant};

use crate::extraction::ExtractionOutput;
use personalize::TemplateValues;

/// Job posting details shown on the results view. Read-only; produced by
/// the extraction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub department: String,
    pub location: String,
    pub url: String,
}

/// A decision-maker or alternative contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Contact {
    fn from_parts(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        linkedin_url: Option<String>,
        default_name: &str,
        title: &str,
    ) -> Option<Self> {
        // A contact without an email is not actionable and is dropped.
        let email = email?;
        let name = format!(
            "{} {}",
            first_name.unwrap_or_default(),
            last_name.unwrap_or_default()
        )
        .trim()
        .to_string();

        Some(Self {
            name: if name.is_empty() {
                default_name.to_string()
            } else {
                name
            },
            title: title.to_string(),
            email,
            linkedin_url,
            profile_image: None,
        })
    }
}

/// The aggregate persisted to session-scoped storage and re-hydrated on the
/// results view.
///
/// Immutable once generated: browsing tone variants only mutates the
/// separate [`ContactSelectors`] view state, never the bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachBundle {
    pub job_details: Option<JobPosting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiring_manager: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceo: Option<Contact>,
    pub alternative_contacts: Vec<Contact>,
    pub linkedin_messages: ToneSet<String>,
    pub email_messages: ToneSet<EmailTemplate>,
    pub tips: Vec<String>,
}

impl OutreachBundle {
    /// Assemble a bundle from one extraction execution, attaching the
    /// static message catalog and the fixed tips list.
    pub fn from_extraction(output: ExtractionOutput) -> Self {
        let job_details = output.job_details.map(|job| JobPosting {
            title: job.title,
            company: job.company,
            department: job.department,
            location: job.location,
            url: job.url,
        });

        let hiring_manager = Contact::from_parts(
            output.department_head_first_name,
            output.department_head_last_name,
            output.department_head_email,
            output.department_head_linked_in_url,
            "Likely Hiring Manager",
            "Department Head",
        );

        let ceo = Contact::from_parts(
            output.ceo_first_name,
            output.ceo_last_name,
            output.ceo_email,
            output.ceo_linked_in_url,
            "CEO",
            "CEO",
        );

        let alternative_contacts = output
            .alternative_contacts
            .into_iter()
            .map(|raw| Contact {
                name: raw.name,
                title: raw.title,
                email: raw.email,
                linkedin_url: raw.linkedin_url,
                profile_image: None,
            })
            .collect();

        Self {
            job_details,
            hiring_manager,
            ceo,
            alternative_contacts,
            linkedin_messages: templates::linkedin_messages(),
            email_messages: templates::email_messages(),
            tips: templates::outreach_tips(),
        }
    }

    fn values_for(&self, contact: &Contact) -> TemplateValues {
        TemplateValues::new(
            Some(contact.name.as_str()),
            self.job_details.as_ref().map(|j| j.title.as_str()),
            self.job_details.as_ref().map(|j| j.company.as_str()),
        )
    }

    /// The LinkedIn draft for `contact` at the given tone, tokens resolved.
    pub fn linkedin_draft(&self, contact: &Contact, variant: ToneVariant) -> String {
        let template = self.linkedin_messages.get(variant);
        personalize::personalize(template, &self.values_for(contact))
    }

    /// The email draft for `contact` at the given tone, tokens resolved in
    /// both subject and body.
    pub fn email_draft(&self, contact: &Contact, variant: ToneVariant) -> EmailTemplate {
        let template = self.email_messages.get(variant);
        let values = self.values_for(contact);
        EmailTemplate {
            subject: personalize::personalize(&template.subject, &values),
            body: personalize::personalize(&template.body, &values),
        }
    }
}
