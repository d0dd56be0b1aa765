//! The immutable topic descriptor fed into the layout engine.

use serde::{Deserialize, Serialize};

use crate::types::{TopicId, TopicRef};

/// One concept or skill entry in a learning roadmap.
///
/// Topics are pure input data: the layout engine turns an ordered list of
/// them into a positioned graph and never mutates them. Construction goes
/// through [`Topic::new`] plus the optional [`with_category_hint`]
/// (`with_*` builder) rather than struct literals.
///
/// [`with_category_hint`]: Self::with_category_hint
///
/// # Examples
///
/// ```rust
/// use roadweave::topic::Topic;
///
/// let topic = Topic::new("t1", "HTML", "Structure of web documents")
///     .with_category_hint("fundamentals");
/// assert_eq!(topic.id.as_str(), "t1");
/// assert_eq!(topic.category_hint.as_deref(), Some("fundamentals"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Caller-supplied stable identity, unique within one topic list.
    pub id: TopicId,
    /// Display title; must be non-empty for layout.
    pub title: String,
    /// One-line description shown on the content node.
    pub short_description: String,
    /// Optional hint naming the category this topic belongs to. The layout
    /// engine uses it to label the bucket's category node when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_hint: Option<String>,
}

impl Topic {
    #[must_use]
    pub fn new(
        id: impl Into<TopicId>,
        title: impl Into<String>,
        short_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            short_description: short_description.into(),
            category_hint: None,
        }
    }

    /// Attach a category hint used when labeling this topic's bucket.
    #[must_use]
    pub fn with_category_hint(mut self, hint: impl Into<String>) -> Self {
        self.category_hint = Some(hint.into());
        self
    }

    /// Normalize this topic into the boundary [`TopicRef`] value.
    #[must_use]
    pub fn to_ref(&self) -> TopicRef {
        TopicRef::new(self.id.clone(), self.title.clone())
    }
}
