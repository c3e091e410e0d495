//! # Error Types
//!
//! Startup-time defects (`ConfigError`) are kept strictly apart from the
//! recoverable conditions of a running request. Incomplete fields and
//! ambiguous classification are surfaced as [`crate::GenerationOutcome`]
//! values, never as errors; only provider failures and an exhausted retry
//! budget abort a generation attempt.

use crate::salutation::RecipientRank;
use crate::taxonomy::DocumentKind;
use crate::validate::ValidationFinding;
use thiserror::Error;

/// A defect in the registry or configuration tables, detected once at
/// startup. Never raised while handling a request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("document kind '{0}' declares no sections")]
    EmptySectionSpec(DocumentKind),
    #[error("document kind '{0}' declares no required sections")]
    NoRequiredSections(DocumentKind),
    #[error("document kind '{0}' permits no recipient ranks")]
    NoPermittedRanks(DocumentKind),
    #[error("recipient rank '{0}' resolves to an empty phrase pair")]
    EmptyPhrasePair(RecipientRank),
    #[error("classifier config: {0}")]
    Classifier(String),
    #[error("client is missing its {0} provider")]
    MissingProvider(&'static str),
}

/// Failures reported by a [`crate::providers::generator::ContentGenerator`]
/// implementation, or by the client while merging its drafts.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("content provider request failed: {0}")]
    Provider(String),
    #[error("content provider returned an empty draft")]
    EmptyDraft,
    #[error("draft section '{0}' is not defined for the document kind")]
    UnknownSection(String),
}

/// Failures reported by a [`crate::providers::extractor::FieldExtractor`]
/// implementation.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("field extraction failed: {0}")]
    Provider(String),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A generation attempt that cannot continue.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("field extraction failed: {0}")]
    Extractor(#[from] ExtractError),
    #[error("content generation failed: {0}")]
    Generator(#[from] GeneratorError),
    /// The retry budget ran out without producing a compliant document. The
    /// findings of the final attempt are carried so the caller can report
    /// them instead of emitting a non-compliant document.
    #[error("document still invalid after {attempts} attempts")]
    RetryExhausted {
        attempts: u32,
        findings: Vec<ValidationFinding>,
    },
}
