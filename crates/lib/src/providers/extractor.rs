//! # Field Extractor Contract
//!
//! A field extractor turns the user's free text into an [`ExtractedFields`]
//! record. LLM-backed extractors live outside this crate; the bundled
//! [`RegexFieldExtractor`] is a rule-based reference implementation built on
//! the patterns of real correspondence (document numbers, provinces,
//! Buddhist-era years, organizations).

use crate::errors::ExtractError;
use crate::fields::ExtractedFields;
use crate::salutation::RecipientRank;
use async_trait::async_trait;
use dyn_clone::DynClone;
use regex::Regex;
use std::fmt::Debug;

/// A trait for populating an [`ExtractedFields`] record from free text.
#[async_trait]
pub trait FieldExtractor: Send + Sync + Debug + DynClone {
    async fn extract(&self, request_text: &str) -> Result<ExtractedFields, ExtractError>;
}

dyn_clone::clone_trait_object!(FieldExtractor);

/// Rule-based extractor. Best-effort: it recovers what the patterns can see
/// and leaves the rest unset, letting the completeness check drive the
/// clarification loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexFieldExtractor;

impl RegexFieldExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FieldExtractor for RegexFieldExtractor {
    async fn extract(&self, request_text: &str) -> Result<ExtractedFields, ExtractError> {
        extract_fields(request_text)
    }
}

fn capture(pattern: &str, text: &str) -> Result<Option<String>, ExtractError> {
    let re = Regex::new(pattern)?;
    Ok(re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Recipient rank from title words in the text, most senior first so that
/// นายกรัฐมนตรี is not shadowed by a generic match.
fn detect_rank(text: &str) -> Option<RecipientRank> {
    if text.contains("นายกรัฐมนตรี") {
        Some(RecipientRank::HeadOfGovernment)
    } else if text.contains("รัฐมนตรี") {
        Some(RecipientRank::Minister)
    } else if ["อธิบดี", "ผู้อำนวยการ", "ผู้ว่าราชการ", "เลขาธิการ"]
        .iter()
        .any(|t| text.contains(t))
    {
        Some(RecipientRank::AgencyHead)
    } else if ["ประชาชน", "สาธารณชน", "ผู้สนใจทั่วไป"]
        .iter()
        .any(|t| text.contains(t))
    {
        Some(RecipientRank::GeneralPublic)
    } else {
        None
    }
}

/// The synchronous core of [`RegexFieldExtractor`].
pub fn extract_fields(text: &str) -> Result<ExtractedFields, ExtractError> {
    let mut fields = ExtractedFields::default();

    // Document number, e.g. "สทช 123/2568".
    fields.doc_number = capture(r"(สทช\s*\d+[./]?\d*)", text)?;

    // Buddhist-era year. A bare 25xx match is good enough here; the year
    // also rides inside doc numbers and date ranges.
    fields.year_be = capture(r"(25\d{2})", text)?;

    fields.date_range = capture(r"วันที่\s*(\d+\s*[-–]\s*\d+\s*\S+\s*\d{4})", text)?;

    // Province names are short; stop at common action words or whitespace.
    fields.location = capture(
        r"จังหวัด\s*([ก-๙]+?)(?:ตรวจ|เพื่อ|ระหว่าง|วันที่|ใน|และ|\s|$)",
        text,
    )?;

    // Sender and recipient agencies.
    fields.sender_agency = capture(
        r"(?:จาก|ในนาม)\s*((?:กระทรวง|กรม|สำนักงาน|เทศบาล)[ก-๙]+)",
        text,
    )?;
    fields.recipient_agency = capture(
        r"(?:ถึง|ไปยัง|ส่งถึง|เสนอ)\s*((?:กระทรวง|กรม|สำนักงาน|เทศบาล|บริษัท)[ก-๙]*)",
        text,
    )?;

    // Organization mentioned anywhere doubles as the recipient agency when
    // no addressed agency was found.
    let organization = capture(r"(บริษัท\s*[^\s,]+)", text)?;
    if fields.recipient_agency.is_none() {
        fields.recipient_agency = organization;
    }

    fields.recipient = capture(r"(?:กราบเรียน|เรียน|ถึง)\s*([ก-๙A-Za-z.\s]+?)(?:\n|เรื่อง|เพื่อ|$)", text)?
        .or_else(|| fields.recipient_agency.clone());

    fields.recipient_rank = detect_rank(text);

    fields.subject = capture(r"เรื่อง\s*([^\n]+)", text)?;
    fields.purpose = capture(r"(เพื่อ[^\n]{2,120})", text)?;

    Ok(fields)
}
