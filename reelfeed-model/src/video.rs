use crate::error::{ModelError, Result};
use crate::ids::VideoId;
use std::fmt::{self, Display, Formatter};

/// Form factor of a clip. Sections demand one kind or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VideoKind {
    /// Vertical short-form clip
    ShortForm,
    /// Horizontal long-form video
    LongForm,
}

impl Display for VideoKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VideoKind::ShortForm => write!(f, "short"),
            VideoKind::LongForm => write!(f, "long"),
        }
    }
}

/// A video as published by the realtime data collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoRecord {
    pub id: VideoId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub media_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub external_redirect_url: Option<String>,
    pub kind: VideoKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trending: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl VideoRecord {
    pub fn new(id: VideoId, kind: VideoKind) -> Self {
        Self {
            id,
            media_url: None,
            external_redirect_url: None,
            kind,
            category: String::new(),
            trending: false,
            title: String::new(),
            description: String::new(),
        }
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    pub fn with_external_redirect(mut self, url: impl Into<String>) -> Self {
        self.external_redirect_url = Some(url.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_trending(mut self, trending: bool) -> Self {
        self.trending = trending;
        self
    }

    pub fn is_short(&self) -> bool {
        self.kind == VideoKind::ShortForm
    }

    /// The hosted asset URL, if one is set and non-blank.
    pub fn media_url(&self) -> Option<&str> {
        self.media_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// A record must point somewhere: either a hosted asset or an
    /// external redirect.
    pub fn validate(&self) -> Result<()> {
        let has_redirect = self
            .external_redirect_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        if self.media_url().is_none() && !has_redirect {
            return Err(ModelError::InvalidRecord(format!(
                "{} has neither a media url nor an external redirect",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> VideoId {
        VideoId::new(raw).unwrap()
    }

    #[test]
    fn blank_media_url_is_not_resolvable() {
        let record =
            VideoRecord::new(id("a"), VideoKind::ShortForm).with_media_url("  ");
        assert_eq!(record.media_url(), None);
        assert!(record.validate().is_err());
    }

    #[test]
    fn redirect_only_records_are_valid() {
        let record = VideoRecord::new(id("b"), VideoKind::LongForm)
            .with_external_redirect("https://example.com/watch?v=1");
        assert!(record.validate().is_ok());
        assert_eq!(record.media_url(), None);
    }
}
