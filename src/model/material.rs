use serde::{Deserialize, Serialize};

/// The fixed set of artifacts a student submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialKind {
    ResearchPlan,
    Abstract,
    Slideshow,
    Presentation,
    ResearchReport,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResearchPlan => "research-plan",
            Self::Abstract => "abstract",
            Self::Slideshow => "slideshow",
            Self::Presentation => "presentation",
            Self::ResearchReport => "research-report",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "research-plan" => Some(Self::ResearchPlan),
            "abstract" => Some(Self::Abstract),
            "slideshow" => Some(Self::Slideshow),
            "presentation" => Some(Self::Presentation),
            "research-report" => Some(Self::ResearchReport),
            _ => None,
        }
    }

    /// File extensions accepted for this artifact.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::ResearchPlan | Self::Abstract | Self::ResearchReport => &["pdf", "doc", "docx"],
            Self::Slideshow | Self::Presentation => &["pdf", "ppt", "pptx", "key"],
        }
    }

    /// Upload size ceiling in bytes.
    pub fn max_bytes(&self) -> usize {
        match self {
            Self::ResearchPlan | Self::Abstract | Self::ResearchReport => 10 * 1024 * 1024,
            Self::Slideshow | Self::Presentation => 50 * 1024 * 1024,
        }
    }
}
