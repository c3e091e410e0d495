//! # Provider Contracts
//!
//! The core is a library: field extraction and content generation are
//! performed by external collaborators (an LLM, a rule-based parser, a mock)
//! behind these traits. Each call is a single bounded request/response step;
//! the core retains no state across calls, and cancellation or timeout of a
//! slow provider is the caller's concern.

pub mod extractor;
pub mod generator;

pub use extractor::{FieldExtractor, RegexFieldExtractor};
pub use generator::{ContentGenerator, DraftRequest, SectionDraft};
