use reqwest::Url;

/// Code hosting platforms the backend knows how to extract from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePlatform {
    GitHub,
    GitLab,
}

impl SourcePlatform {
    pub const ALL: [SourcePlatform; 2] = [SourcePlatform::GitHub, SourcePlatform::GitLab];

    pub fn host(&self) -> &'static str {
        match self {
            SourcePlatform::GitHub => "github.com",
            SourcePlatform::GitLab => "gitlab.com",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourcePlatform::GitHub => "GitHub",
            SourcePlatform::GitLab => "GitLab",
        }
    }

    fn from_host(host: &str) -> Option<Self> {
        let host = host.trim_start_matches("www.");
        Self::ALL
            .into_iter()
            .find(|platform| host.eq_ignore_ascii_case(platform.host()))
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum RepoUrlValidation {
    Empty,
    Invalid,
    Unsupported(String),
    Supported(SourcePlatform),
}

impl RepoUrlValidation {
    pub fn is_supported(&self) -> bool {
        matches!(self, RepoUrlValidation::Supported(_))
    }

    /// Feedback shown under the URL field, if any
    pub fn message(&self) -> Option<String> {
        match self {
            RepoUrlValidation::Empty => None,
            RepoUrlValidation::Invalid => {
                Some("Enter a full repository URL, e.g. https://github.com/owner/repo".to_string())
            }
            RepoUrlValidation::Unsupported(host) => Some(format!(
                "Repositories on {} are not supported (GitHub and GitLab only)",
                host
            )),
            RepoUrlValidation::Supported(platform) => {
                Some(format!("{} repository detected", platform.display_name()))
            }
        }
    }
}

/// Classify a repository URL by its host
pub fn validate_repo_url(input: &str) -> RepoUrlValidation {
    let input = input.trim();
    if input.is_empty() {
        return RepoUrlValidation::Empty;
    }

    let url = match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => return RepoUrlValidation::Invalid,
    };

    match url.host_str() {
        Some(host) => match SourcePlatform::from_host(host) {
            Some(platform) => RepoUrlValidation::Supported(platform),
            None => RepoUrlValidation::Unsupported(host.to_string()),
        },
        None => RepoUrlValidation::Invalid,
    }
}

pub fn repo_url_validation_class(validation: &RepoUrlValidation) -> &'static str {
    match validation {
        RepoUrlValidation::Supported(_) => "input-field input-valid",
        RepoUrlValidation::Invalid | RepoUrlValidation::Unsupported(_) => {
            "input-field input-invalid"
        }
        RepoUrlValidation::Empty => "input-field",
    }
}

pub fn repo_url_validation_style(validation: &RepoUrlValidation) -> &'static str {
    match validation {
        RepoUrlValidation::Supported(_) => "border: 2px solid #10b981; background-color: #f0fdf4;",
        RepoUrlValidation::Invalid => "border: 2px solid #ef4444; background-color: #fef2f2;",
        RepoUrlValidation::Unsupported(_) => {
            "border: 2px solid #f59e0b; background-color: #fffbeb;"
        }
        RepoUrlValidation::Empty => "",
    }
}
