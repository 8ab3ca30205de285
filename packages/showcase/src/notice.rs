//! User-facing notifications raised by the add-project workflow.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Success,
    Destructive,
}

/// A toast: short title, one-line description, visual variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, variant: NoticeVariant) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new("Error", description, NoticeVariant::Destructive)
    }

    pub fn project_added() -> Self {
        Self::new("Success", "Project added successfully", NoticeVariant::Success)
    }

    pub fn preview_unavailable() -> Self {
        Self::new(
            "Preview not available",
            "Please ensure you're logged in and have access to the Figma file",
            NoticeVariant::Default,
        )
    }
}
