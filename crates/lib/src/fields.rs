//! # Extracted Fields
//!
//! The structured record a field extractor populates from the user's free
//! text. The core never parses the request itself; it consumes this record
//! as classification evidence and enforces the completeness contract before
//! classification runs.

use crate::salutation::RecipientRank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fields recovered from a free-form request.
///
/// Everything is optional at the type level; [`completeness_check`] decides
/// what is minimally required before the pipeline may proceed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    pub sender: Option<String>,
    pub sender_agency: Option<String>,
    pub recipient: Option<String>,
    pub recipient_agency: Option<String>,
    pub recipient_rank: Option<RecipientRank>,
    pub subject: Option<String>,
    pub purpose: Option<String>,
    pub references: Vec<String>,
    pub attachments: Vec<String>,
    /// Document number as written, e.g. "สทช 123/2568".
    pub doc_number: Option<String>,
    /// Province or locality mentioned in the request.
    pub location: Option<String>,
    /// Buddhist-era year as written, e.g. "2568".
    pub year_be: Option<String>,
    pub date_range: Option<String>,
}

/// The kind-independent minimum a record must carry before classification.
pub const REQUIRED_FIELDS: &[&str] =
    &["sender", "recipient", "recipient_rank", "subject", "purpose"];

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Names of the minimum-required fields still missing from `fields`.
///
/// An empty set means the record is complete enough to classify. A non-empty
/// set is not a failure: it signals the orchestrator to ask the user for the
/// missing details. Monotone by construction: populating a field can only
/// shrink the result.
pub fn completeness_check(fields: &ExtractedFields) -> BTreeSet<&'static str> {
    let mut missing = BTreeSet::new();
    if blank(&fields.sender) {
        missing.insert("sender");
    }
    if blank(&fields.recipient) {
        missing.insert("recipient");
    }
    if fields.recipient_rank.is_none() {
        missing.insert("recipient_rank");
    }
    if blank(&fields.subject) {
        missing.insert("subject");
    }
    if blank(&fields.purpose) {
        missing.insert("purpose");
    }
    missing
}
