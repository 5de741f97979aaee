//! Resume catalog.
//!
//! The CMS serves three resume variants, addressed by slug. How a download
//! link is obtained is a client setting; see [`ResumeLinkMode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeKind {
    OnePage,
    Full,
    Technical,
}

impl ResumeKind {
    pub const ALL: [ResumeKind; 3] = [ResumeKind::OnePage, ResumeKind::Full, ResumeKind::Technical];

    pub fn slug(self) -> &'static str {
        match self {
            ResumeKind::OnePage => "onepage",
            ResumeKind::Full => "full",
            ResumeKind::Technical => "technical",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ResumeKind::OnePage => "One-Page Resume",
            ResumeKind::Full => "Full CV",
            ResumeKind::Technical => "Technical Resume",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ResumeKind::OnePage => "A concise summary for quick reviews.",
            ResumeKind::Full => "The complete curriculum vitae with all details.",
            ResumeKind::Technical => "Focused on tech skills, projects, and stack.",
        }
    }

    /// File name suggested to the browser / written to disk.
    pub fn filename(self) -> &'static str {
        match self {
            ResumeKind::OnePage => "resume-onepage.pdf",
            ResumeKind::Full => "resume-full-cv.pdf",
            ResumeKind::Technical => "resume-technical.pdf",
        }
    }

    /// Path of the direct download endpoint, relative to the API base.
    pub fn direct_path(self) -> String {
        format!("/api/resumes/{}", self.slug())
    }

    /// Path of the presigned-link endpoint, relative to the API base.
    pub fn presigned_path(self) -> String {
        format!("/api/resumes/presigned/{}", self.slug())
    }
}

impl fmt::Display for ResumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResumeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResumeKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::NotFound {
                entity: "Resume",
                slug: s.to_string(),
            })
    }
}

/// How resume download links are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeLinkMode {
    /// Link straight to `/api/resumes/{slug}`; the CMS streams the file.
    #[default]
    Direct,
    /// Ask `/api/resumes/presigned/{slug}` for a short-lived storage URL on
    /// every download.
    Presigned,
}

impl FromStr for ResumeLinkMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ResumeLinkMode::Direct),
            "presigned" => Ok(ResumeLinkMode::Presigned),
            other => Err(CoreError::Validation(format!(
                "unknown resume link mode '{other}' (expected 'direct' or 'presigned')"
            ))),
        }
    }
}

/// Response of the presigned-link endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedLink {
    pub url: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
