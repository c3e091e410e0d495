//! # Document Kind Classifier
//!
//! Scores each [`DocumentKind`] by weighted evidence and picks the best.
//! Evidence comes in two tiers: structural signals derived from the
//! extracted fields (agency relations, phrases in the stated purpose) and
//! lexical trigger terms matched in the raw request text. Structure is more
//! reliable than wording, so structural weight must strictly exceed lexical
//! weight.
//!
//! The function is pure: identical inputs always produce identical output.
//! Trigger-term lists and weights are configuration data, tuned empirically
//! rather than hard-coded into the control flow.

use crate::errors::ConfigError;
use crate::fields::ExtractedFields;
use crate::salutation::RecipientRank;
use crate::taxonomy::DocumentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Classifier tuning data. Deserializable so deployments can override the
/// built-in Thai trigger tables without touching code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Weight of one structural signal. Must exceed `lexical_weight`.
    pub structural_weight: f32,
    /// Weight of one lexical trigger match in the raw request text.
    pub lexical_weight: f32,
    /// Confidence below this signals ambiguity; the orchestrator asks the
    /// user instead of guessing.
    pub ambiguity_threshold: f32,
    /// Per-kind trigger terms matched against the raw request text.
    pub triggers: BTreeMap<DocumentKind, Vec<String>>,
    /// Per-kind phrases matched against the extracted subject and purpose
    /// fields. Counted as structural evidence.
    pub purpose_triggers: BTreeMap<DocumentKind, Vec<String>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            structural_weight: 3.0,
            lexical_weight: 1.0,
            ambiguity_threshold: 0.2,
            triggers: default_triggers(),
            purpose_triggers: default_purpose_triggers(),
        }
    }
}

impl ClassifierConfig {
    /// Startup validation of the tuning data. Failures indicate a deployment
    /// defect in an override file, never a user-facing condition.
    pub fn verify(&self) -> Result<(), ConfigError> {
        if self.lexical_weight <= 0.0 {
            return Err(ConfigError::Classifier(
                "lexical_weight must be positive".to_string(),
            ));
        }
        if self.structural_weight <= self.lexical_weight {
            return Err(ConfigError::Classifier(format!(
                "structural_weight ({}) must exceed lexical_weight ({})",
                self.structural_weight, self.lexical_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.ambiguity_threshold) {
            return Err(ConfigError::Classifier(format!(
                "ambiguity_threshold ({}) must lie within 0..=1",
                self.ambiguity_threshold
            )));
        }
        for kind in DocumentKind::ALL {
            if self.triggers.get(&kind).map_or(true, |t| t.is_empty()) {
                return Err(ConfigError::Classifier(format!(
                    "no lexical triggers configured for kind '{kind}'"
                )));
            }
        }
        Ok(())
    }
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_triggers() -> BTreeMap<DocumentKind, Vec<String>> {
    BTreeMap::from([
        (
            DocumentKind::External,
            terms(&[
                "หนังสือภายนอก",
                "กระทรวงอื่น",
                "หน่วยงานภายนอก",
                "ขอแสดงความนับถือ",
                "อ้างถึง",
                "สิ่งที่ส่งมาด้วย",
                "บริษัท",
                "ผู้จัดการ",
                "เชิญตรวจร่วม",
                "ขอความอนุเคราะห์",
            ]),
        ),
        (
            DocumentKind::Internal,
            terms(&[
                "บันทึกข้อความ",
                "หนังสือภายใน",
                "ภายในหน่วยงาน",
                "ขออนุมัติ",
                "เรื่องเดิม",
                "จึงเรียนมาเพื่อ",
                "รายงานผล",
                "เชิญประชุม",
            ]),
        ),
        (
            DocumentKind::Stamped,
            terms(&[
                "หนังสือประทับตรา",
                "ประทับตรา",
                "ขอสำเนา",
                "ส่งสำเนา",
                "นำส่งเอกสาร",
                "ตอบรับ",
            ]),
        ),
        (
            DocumentKind::Order,
            terms(&[
                "คำสั่ง",
                "สั่งการ",
                "แต่งตั้ง",
                "มอบหมาย",
                "ระเบียบ",
                "ข้อบังคับ",
                "ให้ถือปฏิบัติ",
            ]),
        ),
        (
            DocumentKind::Announcement,
            terms(&[
                "ประกาศ",
                "แถลงการณ์",
                "ประชาสัมพันธ์",
                "แจ้งให้ทราบโดยทั่วกัน",
                "รับสมัคร",
            ]),
        ),
        (
            DocumentKind::Record,
            terms(&[
                "รายงานการประชุม",
                "ระเบียบวาระ",
                "มติที่ประชุม",
                "ผู้เข้าประชุม",
                "คณะกรรมการ",
                "หนังสือรับรอง",
                "บันทึกหลักฐาน",
            ]),
        ),
    ])
}

fn default_purpose_triggers() -> BTreeMap<DocumentKind, Vec<String>> {
    BTreeMap::from([
        (DocumentKind::External, Vec::new()),
        (DocumentKind::Internal, terms(&["ขออนุมัติ", "รายงานผล"])),
        (
            DocumentKind::Stamped,
            terms(&["ขอสำเนา", "นำส่ง", "ตอบรับ"]),
        ),
        (
            DocumentKind::Order,
            terms(&["แต่งตั้ง", "มอบหมาย", "ให้ดำเนินการ", "ให้ถือปฏิบัติ"]),
        ),
        (
            DocumentKind::Announcement,
            terms(&["ประกาศ", "ประชาสัมพันธ์", "แจ้งให้ทราบ"]),
        ),
        (DocumentKind::Record, terms(&["ประชุม"])),
    ])
}

/// The classifier's decision: the chosen kind, the normalized margin over
/// the runner-up, and the full score table for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub kind: DocumentKind,
    pub runner_up: DocumentKind,
    /// `(top - runner_up) / top`, or 0.0 when no evidence matched at all.
    pub confidence: f32,
    /// Scores per kind, best first.
    pub scores: Vec<(DocumentKind, f32)>,
}

fn count_matches(haystack: &str, needles: Option<&Vec<String>>) -> u32 {
    needles.map_or(0, |list| {
        list.iter()
            .filter(|t| !t.is_empty() && haystack.contains(t.as_str()))
            .count() as u32
    })
}

/// Structural signals for one kind, derived from the extracted fields only.
fn structural_matches(kind: DocumentKind, fields: &ExtractedFields, config: &ClassifierConfig) -> u32 {
    let mut count = 0;

    let agencies = fields
        .sender_agency
        .as_deref()
        .zip(fields.recipient_agency.as_deref());
    match kind {
        DocumentKind::External => {
            if agencies.is_some_and(|(s, r)| s != r) {
                count += 1;
            }
        }
        DocumentKind::Internal => {
            if agencies.is_some_and(|(s, r)| s == r) {
                count += 1;
            }
        }
        DocumentKind::Announcement => {
            if fields.recipient_rank == Some(RecipientRank::GeneralPublic) {
                count += 1;
            }
        }
        DocumentKind::Stamped | DocumentKind::Order | DocumentKind::Record => {}
    }

    let mut stated = String::new();
    if let Some(subject) = &fields.subject {
        stated.push_str(subject);
    }
    stated.push(' ');
    if let Some(purpose) = &fields.purpose {
        stated.push_str(purpose);
    }
    count += count_matches(&stated, config.purpose_triggers.get(&kind));

    count
}

/// Selects the document kind for a request.
///
/// Pure and idempotent. Ties on equal scores are broken by the declaration
/// order of [`DocumentKind`]: the more general, less legally binding kinds
/// win, so orders and announcements are only chosen on unambiguous evidence.
pub fn classify(
    request_text: &str,
    fields: &ExtractedFields,
    config: &ClassifierConfig,
) -> Classification {
    let mut scores: Vec<(DocumentKind, f32)> = DocumentKind::ALL
        .into_iter()
        .map(|kind| {
            let lexical = count_matches(request_text, config.triggers.get(&kind));
            let structural = structural_matches(kind, fields, config);
            let score = structural as f32 * config.structural_weight
                + lexical as f32 * config.lexical_weight;
            (kind, score)
        })
        .collect();

    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let (kind, top) = scores[0];
    let (runner_up, second) = scores[1];
    let confidence = if top > 0.0 { (top - second) / top } else { 0.0 };

    debug!(%kind, confidence, ?scores, "classified request");

    Classification {
        kind,
        runner_up,
        confidence,
        scores,
    }
}
