//! Core identity and boundary types for the roadweave crate.
//!
//! This module defines the value types used throughout the system to identify
//! topics, graph elements, and cached content. These are the core domain
//! concepts that define what a roadmap *is*.
//!
//! # Key Types
//!
//! - [`NodeKind`] / [`EdgeKind`]: classify nodes and edges in a roadmap graph
//! - [`Language`]: the language a piece of topic content is generated in
//! - [`TopicRef`]: the canonical "selected topic" value at the system boundary
//! - [`CacheKey`]: the composite `(topic, language)` identity for cached text
//!
//! # Identity Discipline
//!
//! Every id newtype here wraps a stable, human-readable string. Ids produced
//! by the layout engine are derived from deterministic hashes of their inputs
//! (see [`crate::utils::ids`]), never from wall-clock time, so the same topic
//! list always yields the same graph.
//!
//! # Examples
//!
//! ```rust
//! use roadweave::types::{Language, NodeKind, TopicId, TopicRef};
//!
//! let entry = NodeKind::Entry;
//! assert!(entry.is_entry());
//!
//! // Languages round-trip through their wire codes.
//! let lang = Language::from("french");
//! assert_eq!(lang, Language::French);
//! assert_eq!(lang.code(), "french");
//!
//! // External selection input is normalized to a TopicRef immediately.
//! let selected = TopicRef::new(TopicId::from("t1"), "HTML");
//! assert_eq!(selected.label, "HTML");
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

id_newtype! {
    /// Identifier of a [`Topic`](crate::topic::Topic) input descriptor.
    ///
    /// Topic ids are supplied by the caller and must be unique within one
    /// topic list; the layout engine rejects duplicates.
    TopicId
}

id_newtype! {
    /// Identifier of a [`Node`](crate::graph::Node) within a roadmap.
    ///
    /// Derived deterministically from the node's role and its source topic
    /// (or the roadmap title for entry/exit nodes).
    NodeId
}

id_newtype! {
    /// Identifier of an [`Edge`](crate::graph::Edge) within a roadmap.
    ///
    /// Derived from the source and target node ids.
    EdgeId
}

impl NodeId {
    /// Id of the entry title node of the roadmap named `title`.
    #[must_use]
    pub fn for_entry(title: &str) -> Self {
        Self(crate::utils::ids::derive_id("entry", title))
    }

    /// Id of the exit node of the roadmap named `title`.
    #[must_use]
    pub fn for_exit(title: &str) -> Self {
        Self(crate::utils::ids::derive_id("exit", title))
    }

    /// Id of the category node anchored by the first topic of its bucket.
    #[must_use]
    pub fn for_category(anchor: &TopicId) -> Self {
        Self(crate::utils::ids::derive_id("category", anchor.as_str()))
    }

    /// Id of the content node representing `topic`.
    ///
    /// Deterministic per topic, which makes topic-to-node lookup a direct
    /// re-derivation instead of a search.
    #[must_use]
    pub fn for_content(topic: &TopicId) -> Self {
        Self(crate::utils::ids::derive_id("content", topic.as_str()))
    }
}

impl EdgeId {
    /// Id of the edge `source -> target` of the given kind.
    ///
    /// The kind participates in the id so that a decorative cross-link and a
    /// sequential edge between the same pair remain distinct edges.
    #[must_use]
    pub fn between(source: &NodeId, target: &NodeId, kind: EdgeKind) -> Self {
        Self(crate::utils::ids::derive_id(
            "edge",
            &format!("{source}>{target}:{kind}"),
        ))
    }
}

id_newtype! {
    /// Identifier of a whole [`Roadmap`](crate::graph::Roadmap).
    RoadmapId
}

/// Classifies a node within a roadmap graph.
///
/// A valid non-empty roadmap contains exactly one [`Entry`](Self::Entry) and
/// exactly one [`Exit`](Self::Exit) node; the model layer enforces this.
///
/// # Examples
///
/// ```rust
/// use roadweave::types::NodeKind;
///
/// assert!(NodeKind::Entry.is_entry());
/// assert!(NodeKind::Exit.is_exit());
/// assert_eq!(NodeKind::Category.to_string(), "category");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The single title node a roadmap begins with.
    Entry,
    /// Heading node for one contiguous bucket of topics.
    Category,
    /// One learnable topic.
    Content,
    /// The single terminal node a roadmap ends with.
    Exit,
}

impl NodeKind {
    /// Returns `true` if this is an [`Entry`](Self::Entry) node.
    #[must_use]
    pub fn is_entry(&self) -> bool {
        matches!(self, Self::Entry)
    }

    /// Returns `true` if this is an [`Exit`](Self::Exit) node.
    #[must_use]
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Returns `true` if this is a [`Category`](Self::Category) node.
    #[must_use]
    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category)
    }

    /// Returns `true` if this is a [`Content`](Self::Content) node.
    #[must_use]
    pub fn is_content(&self) -> bool {
        matches!(self, Self::Content)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Category => write!(f, "category"),
            Self::Content => write!(f, "content"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Classifies an edge within a roadmap graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// A link along the intended learning order: entry to category, category
    /// into its bucket, the chain through a bucket, and the final step into
    /// the exit node.
    Sequential,
    /// The link from the last topic of one bucket to the first topic of the
    /// next.
    CrossCategory,
    /// A decorative link between non-adjacent topics of the same bucket,
    /// emitted only by the seeded cross-link pass.
    CrossLink,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::CrossCategory => write!(f, "cross-category"),
            Self::CrossLink => write!(f, "cross-link"),
        }
    }
}

/// The language a piece of topic content is generated in.
///
/// Cache entries are scoped per language: content generated under one
/// language never overwrites content stored under another. The well-known
/// variants carry the prompt instruction handed to the content generator;
/// [`Other`](Self::Other) admits languages the crate has no instruction for.
///
/// # Examples
///
/// ```rust
/// use roadweave::types::Language;
///
/// assert_eq!(Language::from("japanese"), Language::Japanese);
/// assert_eq!(Language::English.code(), "english");
///
/// // Unknown codes survive round-trips instead of being rejected.
/// let custom = Language::from("klingon");
/// assert_eq!(custom, Language::Other("klingon".into()));
/// assert_eq!(custom.code(), "klingon");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Japanese,
    Chinese,
    Nepali,
    /// A language code this crate carries no tailored instruction for.
    Other(String),
}

impl Language {
    /// The lowercase wire code for this language.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
            Self::Nepali => "nepali",
            Self::Other(code) => code,
        }
    }

    /// The prompt instruction passed to the content generator for this
    /// language.
    #[must_use]
    pub fn instruction(&self) -> Cow<'static, str> {
        match self {
            Self::English => Cow::Borrowed(
                "Use professional English terminology, be detailed and comprehensive.",
            ),
            Self::Spanish => Cow::Borrowed(
                "Escribe en español con terminología profesional, sé detallado y exhaustivo.",
            ),
            Self::French => Cow::Borrowed(
                "Écrivez en français avec une terminologie professionnelle, soyez détaillé et complet.",
            ),
            Self::German => Cow::Borrowed(
                "Schreiben Sie auf Deutsch mit professioneller Terminologie, seien Sie detailliert und umfassend.",
            ),
            Self::Japanese => Cow::Borrowed(
                "プロフェッショナルな日本語の用語を使用し、詳細かつ包括的に記述してください。",
            ),
            Self::Chinese => Cow::Borrowed("使用专业的中文术语，详细而全面。"),
            Self::Nepali => Cow::Borrowed(
                "Write 70% of the content in Nepali and 30% in English to ensure readability. Include English translations for technical terms.",
            ),
            Self::Other(code) => Cow::Owned(format!("Provide the content in {code}.")),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        match code {
            "english" => Self::English,
            "spanish" => Self::Spanish,
            "french" => Self::French,
            "german" => Self::German,
            "japanese" => Self::Japanese,
            "chinese" => Self::Chinese,
            "nepali" => Self::Nepali,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

/// The canonical "selected topic" value at the system boundary.
///
/// Renderer selection events, cache requests, and the display binding all
/// speak `TopicRef`. External inputs of whatever shape (bare labels, full
/// node payloads) are normalized to it at the edge rather than branched on
/// downstream.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicRef {
    /// Stable topic identity, used for cache addressing.
    pub id: TopicId,
    /// Human-readable label, handed to the content generator.
    pub label: String,
}

impl TopicRef {
    #[must_use]
    pub fn new(id: TopicId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl fmt::Display for TopicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// Composite identity addressing one cached piece of generated content.
///
/// Equality and hashing only; no ordering is defined or required.
///
/// # Examples
///
/// ```rust
/// use roadweave::types::{CacheKey, Language, TopicId};
///
/// let english = CacheKey::new(TopicId::from("t1"), Language::English);
/// let french = CacheKey::new(TopicId::from("t1"), Language::French);
/// assert_ne!(english, french);
/// assert_eq!(english.to_string(), "t1@english");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub topic: TopicId,
    pub language: Language,
}

impl CacheKey {
    #[must_use]
    pub fn new(topic: TopicId, language: Language) -> Self {
        Self { topic, language }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.topic, self.language)
    }
}
