// src/utils.rs
use url::Url;

/// Message shown whenever the submitted job URL fails validation.
pub const INVALID_URL_MESSAGE: &str = "Please enter a company's job posting URL";

/// Validate a job-posting URL before anything is sent upstream.
///
/// Only absolute http(s) URLs are accepted. A rejected URL must never
/// reach the extraction service.
pub fn validate_job_url(raw: &str) -> Result<Url, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(INVALID_URL_MESSAGE);
    }

    let url = Url::parse(trimmed).map_err(|_| INVALID_URL_MESSAGE)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(INVALID_URL_MESSAGE),
    }
}

/// Human-readable file size for logged resume descriptors.
pub fn format_file_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_job_url_accepts_https() {
        assert!(validate_job_url("https://company.com/careers/123").is_ok());
        assert!(validate_job_url("http://jobs.example.org/post?id=9").is_ok());
    }

    #[test]
    fn test_validate_job_url_rejects_garbage() {
        assert_eq!(validate_job_url("not a url"), Err(INVALID_URL_MESSAGE));
        assert_eq!(validate_job_url(""), Err(INVALID_URL_MESSAGE));
        assert_eq!(validate_job_url("   "), Err(INVALID_URL_MESSAGE));
    }

    #[test]
    fn test_validate_job_url_rejects_non_http_schemes() {
        assert_eq!(
            validate_job_url("ftp://files.example.com/job.txt"),
            Err(INVALID_URL_MESSAGE)
        );
        assert_eq!(
            validate_job_url("javascript:alert(1)"),
            Err(INVALID_URL_MESSAGE)
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }
}
