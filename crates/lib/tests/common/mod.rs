#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared mock providers and record builders so tests stay isolated and
//! repeatable: a scripted content generator with call history and a fixed
//! field extractor, mirroring how real LLM-backed providers plug in.

use async_trait::async_trait;
use sarabun::errors::{ExtractError, GeneratorError};
use sarabun::providers::extractor::FieldExtractor;
use sarabun::providers::generator::{ContentGenerator, DraftRequest, SectionDraft};
use sarabun::{ExtractedFields, RecipientRank, ValidationFinding};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once for the test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

/// A request whose evidence points clearly at an external letter.
pub const EXTERNAL_REQUEST: &str =
    "ขอให้จัดทำหนังสือส่งถึงกระทรวงอื่น เรื่อง ขอเชิญตรวจสอบร่วม เรียน อธิบดีกรมโรงงานอุตสาหกรรม";

/// Complete extracted fields for [`EXTERNAL_REQUEST`]: cross-agency
/// recipient, agency-head rank, subject and purpose all present.
pub fn complete_external_fields() -> ExtractedFields {
    ExtractedFields {
        sender: Some("นายสมชาย ใจดี".to_string()),
        sender_agency: Some("สำนักงาน กสทช.".to_string()),
        recipient: Some("อธิบดีกรมโรงงานอุตสาหกรรม".to_string()),
        recipient_agency: Some("กระทรวงอุตสาหกรรม".to_string()),
        recipient_rank: Some(RecipientRank::AgencyHead),
        subject: Some("ขอเชิญตรวจสอบร่วม".to_string()),
        purpose: Some("เพื่อประสานการตรวจสอบคลื่นความถี่".to_string()),
        ..Default::default()
    }
}

/// A full, compliant draft for an external letter, in template order.
pub fn valid_external_drafts() -> Vec<SectionDraft> {
    vec![
        SectionDraft::new("reference_no", "ที่ สทช ๑๐๔/๒๕๖๘"),
        SectionDraft::new("agency_address", "สำนักงาน กสทช. ถนนพหลโยธิน กรุงเทพมหานคร ๑๐๔๐๐"),
        SectionDraft::new("date", "๖ สิงหาคม ๒๕๖๘"),
        SectionDraft::new("subject", "ขอเชิญตรวจสอบร่วม"),
        SectionDraft::new("salutation", "เรียน อธิบดีกรมโรงงานอุตสาหกรรม"),
        SectionDraft::new(
            "body",
            "ด้วยสำนักงาน กสทช. มีความประสงค์ขอเชิญเจ้าหน้าที่ของกรมโรงงานอุตสาหกรรมเข้าร่วมการตรวจสอบคลื่นความถี่",
        ),
        SectionDraft::new("closing", "ขอแสดงความนับถือ"),
        SectionDraft::new("signature", "(นายสมชาย ใจดี)"),
    ]
}

/// The same draft with the required subject section dropped.
pub fn incomplete_external_drafts() -> Vec<SectionDraft> {
    valid_external_drafts()
        .into_iter()
        .filter(|d| d.name != "subject")
        .collect()
}

// --- Mock Field Extractor ---

#[derive(Clone, Debug)]
pub struct MockFieldExtractor {
    pub fields: ExtractedFields,
}

impl MockFieldExtractor {
    pub fn new(fields: ExtractedFields) -> Self {
        Self { fields }
    }
}

#[async_trait]
impl FieldExtractor for MockFieldExtractor {
    async fn extract(&self, _request_text: &str) -> Result<ExtractedFields, ExtractError> {
        Ok(self.fields.clone())
    }
}

// --- Mock Content Generator ---

/// Pops one scripted response per call and records the attempt number and
/// the feedback findings it was given.
#[derive(Clone, Debug)]
pub struct MockContentGenerator {
    pub call_history: Arc<RwLock<Vec<(u32, Vec<ValidationFinding>)>>>,
    responses: Arc<RwLock<Vec<Vec<SectionDraft>>>>,
}

impl MockContentGenerator {
    pub fn new(responses: Vec<Vec<SectionDraft>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn draft(&self, request: &DraftRequest<'_>) -> Result<Vec<SectionDraft>, GeneratorError> {
        self.call_history
            .write()
            .unwrap()
            .push((request.attempt, request.feedback.to_vec()));

        self.responses
            .write()
            .unwrap()
            .pop()
            .ok_or_else(|| GeneratorError::Provider("mock response queue exhausted".to_string()))
    }
}
