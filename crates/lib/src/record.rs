//! # Document Record
//!
//! The mutable working object for one document in progress. A record is
//! owned by exactly one workflow at a time; core functions borrow it and
//! never fork it. Section content keeps insertion order with unique keys, so
//! the validator can check relative ordering against the template.

use crate::salutation::RecipientRank;
use crate::taxonomy::DocumentKind;
use crate::validate::ValidationFinding;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SectionEntry {
    name: String,
    content: String,
}

/// One document being generated: kind and rank are unset until classified
/// and extracted, sections fill in over the generation attempts, and the
/// findings of the most recent validation ride along for feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Correlation id for logs; carries no domain meaning.
    pub id: Uuid,
    pub request_text: String,
    pub kind: Option<DocumentKind>,
    pub recipient_rank: Option<RecipientRank>,
    /// Declared reference documents (อ้างถึง), which make the references
    /// section mandatory where the template has one.
    #[serde(default)]
    pub references: Vec<String>,
    /// Declared attachments (สิ่งที่ส่งมาด้วย), same contract as references.
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    sections: Vec<SectionEntry>,
    #[serde(default)]
    pub findings: Vec<ValidationFinding>,
}

impl DocumentRecord {
    /// A fresh record at request intake: nothing classified, no sections.
    pub fn new(request_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_text: request_text.into(),
            kind: None,
            recipient_rank: None,
            references: Vec::new(),
            attachments: Vec::new(),
            sections: Vec::new(),
            findings: Vec::new(),
        }
    }

    /// Sets or replaces a section. A replaced section keeps its original
    /// position, so regeneration cannot reorder content.
    pub fn set_section(&mut self, name: &str, content: impl Into<String>) {
        let content = content.into();
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(entry) => entry.content = content,
            None => self.sections.push(SectionEntry {
                name: name.to_string(),
                content,
            }),
        }
    }

    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.content.as_str())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .iter()
            .map(|s| (s.name.as_str(), s.content.as_str()))
    }

    /// Reorders sections by a position key. The client uses this to keep
    /// merge order canonical when a retry fills in a previously missing
    /// section; validator ordering findings then reflect the content, not
    /// the merge history.
    pub fn sort_sections_by_key(&mut self, position: impl Fn(&str) -> usize) {
        self.sections.sort_by_key(|s| position(&s.name));
    }

    /// Explicit restart: clears classification, content, and findings while
    /// keeping the request and id. The only path to re-classification.
    pub fn reset(&mut self) {
        self.kind = None;
        self.sections.clear();
        self.findings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_section_keeps_insertion_order_on_replace() {
        let mut record = DocumentRecord::new("คำขอ");
        record.set_section("subject", "เดิม");
        record.set_section("body", "เนื้อหา");
        record.set_section("subject", "แก้ไขแล้ว");

        let names: Vec<&str> = record.sections().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["subject", "body"]);
        assert_eq!(record.section("subject"), Some("แก้ไขแล้ว"));
    }

    #[test]
    fn reset_clears_classification_and_content() {
        let mut record = DocumentRecord::new("คำขอ");
        record.kind = Some(DocumentKind::External);
        record.set_section("subject", "เรื่อง");
        let id = record.id;

        record.reset();
        assert!(record.kind.is_none());
        assert_eq!(record.sections().count(), 0);
        assert_eq!(record.id, id);
        assert_eq!(record.request_text, "คำขอ");
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = DocumentRecord::new("คำขอ");
        record.kind = Some(DocumentKind::Internal);
        record.recipient_rank = Some(RecipientRank::AgencyHead);
        record.set_section("subject", "ขออนุมัติ");

        let json = serde_json::to_string(&record).unwrap();
        let back: DocumentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, Some(DocumentKind::Internal));
        assert_eq!(back.section("subject"), Some("ขออนุมัติ"));
    }
}
