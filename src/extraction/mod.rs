// src/extraction/mod.rs
use serde::{Deserialize, Serialize};

pub mod client;
pub mod fallback;

pub use client::ExtractionClient;

/// Job details as reported by the extraction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    pub url: String,
}

/// A raw contact record from the extraction payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContact {
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// The `output` object of one extraction execution.
///
/// Decision-maker fields arrive flat (first/last name, email, LinkedIn URL
/// per role) rather than as nested contact records; any of them may be
/// missing when the upstream lookup came back empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionOutput {
    pub job_details: Option<JobDetails>,
    pub company_name: Option<String>,
    pub job_post_url: Option<String>,

    pub department_head_first_name: Option<String>,
    pub department_head_last_name: Option<String>,
    pub department_head_email: Option<String>,
    pub department_head_linked_in_url: Option<String>,

    pub ceo_first_name: Option<String>,
    pub ceo_last_name: Option<String>,
    pub ceo_email: Option<String>,
    pub ceo_linked_in_url: Option<String>,

    pub alternative_contacts: Vec<RawContact>,
}

/// Wire envelope returned by the extraction endpoint.
#[derive(Debug, Deserialize)]
pub struct ExtractionEnvelope {
    pub output: ExtractionOutput,
}
