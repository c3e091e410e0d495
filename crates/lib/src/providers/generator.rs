//! # Content Generator Contract
//!
//! A generator drafts section content for one attempt. On retries it
//! receives the previous attempt's error findings as structured feedback;
//! the core never rewrites content itself.

use crate::errors::GeneratorError;
use crate::fields::ExtractedFields;
use crate::salutation::PhrasePair;
use crate::taxonomy::{DocumentKind, SectionSpec};
use crate::validate::ValidationFinding;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One drafted section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDraft {
    /// Section name from the kind's [`SectionSpec`].
    pub name: String,
    pub content: String,
}

impl SectionDraft {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Everything a generator needs for one drafting attempt.
#[derive(Debug)]
pub struct DraftRequest<'a> {
    pub request_text: &'a str,
    pub kind: DocumentKind,
    pub spec: &'static SectionSpec,
    pub fields: &'a ExtractedFields,
    /// The mandatory opening/closing pair for the record's recipient rank.
    pub phrases: PhrasePair,
    /// Error findings from the previous attempt; empty on the first.
    pub feedback: &'a [ValidationFinding],
    /// 1-based attempt counter.
    pub attempt: u32,
}

/// A trait for drafting document sections.
///
/// Implementations wrap whatever produces the prose (an LLM provider, a
/// template filler, a test mock). The returned drafts must use the section
/// names of the request's spec; an unknown name aborts the attempt.
#[async_trait]
pub trait ContentGenerator: Send + Sync + Debug + DynClone {
    async fn draft(&self, request: &DraftRequest<'_>) -> Result<Vec<SectionDraft>, GeneratorError>;
}

dyn_clone::clone_trait_object!(ContentGenerator);
