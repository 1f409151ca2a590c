// src/outreach/personalize.rs
//! Placeholder substitution for outreach drafts

/// Literal tokens recognized inside message templates.
const NAME_TOKEN: &str = "[Name]";
const JOB_TITLE_TOKEN: &str = "[Job Title]";
const COMPANY_TOKEN: &str = "[Company]";

const NAME_FALLBACK: &str = "there";
const JOB_TITLE_FALLBACK: &str = "this role";
const COMPANY_FALLBACK: &str = "your company";

/// Resolved substitution values for one contact/job pair.
///
/// Every field is optional; a missing value substitutes a fixed fallback
/// rather than an empty string.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

impl TemplateValues {
    pub fn new(
        name: Option<&str>,
        job_title: Option<&str>,
        company: Option<&str>,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            job_title: job_title.map(str::to_string),
            company: company.map(str::to_string),
        }
    }
}

/// First whitespace-delimited token of a full name, or the fixed fallback
/// when the name is empty or blank.
pub fn first_name(full_name: &str) -> &str {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or(NAME_FALLBACK)
}

/// Replace every occurrence of `[Name]`, `[Job Title]` and `[Company]` in
/// `template` with the resolved values.
///
/// The scan is a single left-to-right pass: substituted values are never
/// re-examined, so running the result through `personalize` again is a
/// no-op. Malformed or partial tokens pass through as literal text.
pub fn personalize(template: &str, values: &TemplateValues) -> String {
    let name = match values.name.as_deref() {
        Some(n) => first_name(n),
        None => NAME_FALLBACK,
    };
    let job_title = values.job_title.as_deref().unwrap_or(JOB_TITLE_FALLBACK);
    let company = values.company.as_deref().unwrap_or(COMPANY_FALLBACK);

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while !rest.is_empty() {
        let hit = [
            (NAME_TOKEN, name),
            (JOB_TITLE_TOKEN, job_title),
            (COMPANY_TOKEN, company),
        ]
        .into_iter()
        .filter_map(|(token, value)| rest.find(token).map(|pos| (pos, token, value)))
        .min_by_key(|(pos, _, _)| *pos);

        match hit {
            Some((pos, token, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + token.len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }

    out
}

/// Convert literal newlines to `<br />` for HTML display.
///
/// Presentation concern only; the stored template is left untouched.
pub fn newlines_to_breaks(text: &str) -> String {
    text.replace('\n', "<br />")
}
