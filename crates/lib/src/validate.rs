//! # Document Validator
//!
//! Checks a populated [`DocumentRecord`] against the taxonomy registry and
//! the salutation resolver. Findings are structured data (severity + rule
//! code + section + message) so an orchestrator or UI can act on specific
//! codes; the validator never rewrites content, it only reports.
//!
//! All checks run in one pass so every defect is reported together. The one
//! exception is a missing document kind: without a kind there is no template
//! to check against, so that single fatal finding is returned alone.

use crate::record::DocumentRecord;
use crate::salutation::{self, RecipientRank};
use crate::taxonomy::{self, Condition};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Severity of one finding. Errors block hand-off to the renderer; warnings
/// are surfaced but do not block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Machine-readable rule codes, one per compliance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    KindMissing,
    RankMissing,
    SectionMissing,
    SectionOutOfOrder,
    RankNotPermitted,
    PhrasePairMismatch,
    ConditionalSectionMissing,
    InformalRegister,
}

/// One reported compliance issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub severity: Severity,
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub message: String,
}

impl ValidationFinding {
    fn error(rule: Rule, section: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            rule,
            section: section.map(String::from),
            message: message.into(),
        }
    }

    fn warning(rule: Rule, section: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            rule,
            section: section.map(String::from),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.section {
            Some(section) => write!(f, "[{severity}] {section}: {}", self.message),
            None => write!(f, "[{severity}] {}", self.message),
        }
    }
}

/// Tunable validator data: the informal-term list behind the register check.
/// An empty list disables the check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub informal_terms: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            informal_terms: ["โอเค", "เยอะ", "แป๊บ", "นะครับ", "นะคะ", "จ้า", "ฝากด้วย"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// True when the findings contain no error-severity entries.
pub fn is_valid(findings: &[ValidationFinding]) -> bool {
    findings.iter().all(|f| f.severity != Severity::Error)
}

/// Validates a record against its kind's template and the resolver tables.
///
/// Check order: kind set, required sections, section ordering, rank
/// permissibility, phrase-pair agreement, conditionally required sections,
/// lexical register. Each check is independent; all run even when an earlier
/// one fails.
pub fn validate(record: &DocumentRecord, config: &ValidatorConfig) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    // 1. Without a kind there is no template; nothing else is checkable.
    let Some(kind) = record.kind else {
        return vec![ValidationFinding::error(
            Rule::KindMissing,
            None,
            "document kind has not been assigned",
        )];
    };
    let spec = taxonomy::section_spec(kind);

    // 2. Required sections present and non-empty.
    for def in spec.required() {
        match record.section(def.name) {
            None => findings.push(ValidationFinding::error(
                Rule::SectionMissing,
                Some(def.name),
                format!("required section '{}' ({}) is missing", def.name, def.title_th),
            )),
            Some(content) if content.trim().is_empty() => {
                findings.push(ValidationFinding::error(
                    Rule::SectionMissing,
                    Some(def.name),
                    format!("required section '{}' ({}) is empty", def.name, def.title_th),
                ))
            }
            Some(_) => {}
        }
    }

    // 3. Relative ordering of whatever template sections are present.
    let mut last: Option<(&str, usize)> = None;
    for (name, _) in record.sections() {
        let Some(position) = spec.position(name) else {
            continue;
        };
        if let Some((prev_name, prev_position)) = last {
            if position < prev_position {
                findings.push(ValidationFinding::error(
                    Rule::SectionOutOfOrder,
                    Some(name),
                    format!("section '{name}' must come before '{prev_name}'"),
                ));
                continue;
            }
        }
        last = Some((name, position));
    }

    // 4. Rank permissibility for the kind.
    match record.recipient_rank {
        None => findings.push(ValidationFinding::error(
            Rule::RankMissing,
            None,
            "recipient rank has not been extracted",
        )),
        Some(rank) => {
            if !taxonomy::permitted_ranks(kind).contains(&rank) {
                findings.push(ValidationFinding::error(
                    Rule::RankNotPermitted,
                    None,
                    format!("recipient rank '{rank}' is not permissible for a {kind} document"),
                ));
            }
        }
    }

    // 5. Phrase-pair agreement, for the phrase sections this template has.
    if let Some(rank) = record.recipient_rank {
        if let Some(finding) = check_phrase_pair(record, spec.get("salutation").is_some(), rank) {
            findings.push(finding);
        }
    }

    // 6. Conditionally required sections.
    for def in spec.sections {
        let Some(condition) = def.required_when else {
            continue;
        };
        let triggered = match condition {
            Condition::AttachmentsDeclared => !record.attachments.is_empty(),
            Condition::ReferencesDeclared => !record.references.is_empty(),
        };
        let present = record
            .section(def.name)
            .is_some_and(|c| !c.trim().is_empty());
        if triggered && !present {
            findings.push(ValidationFinding::error(
                Rule::ConditionalSectionMissing,
                Some(def.name),
                format!(
                    "section '{}' ({}) is required because the record declares matching content",
                    def.name, def.title_th
                ),
            ));
        }
    }

    // 7. Register check over free-text sections. Fixed-phrase sections are
    // covered by check 5 and skipped here.
    for (name, content) in record.sections() {
        if name == "salutation" || name == "closing" {
            continue;
        }
        for term in &config.informal_terms {
            if !term.is_empty() && content.contains(term.as_str()) {
                findings.push(ValidationFinding::warning(
                    Rule::InformalRegister,
                    Some(name),
                    format!("informal term '{term}' is unsuitable for official correspondence"),
                ));
            }
        }
    }

    debug!(
        kind = %kind,
        errors = findings.iter().filter(|f| f.severity == Severity::Error).count(),
        warnings = findings.iter().filter(|f| f.severity == Severity::Warning).count(),
        "validated document record"
    );
    findings
}

/// Compares the record's opening/closing phrases with the pair resolved for
/// the rank. One finding covers the pair: mixing components across ranks is
/// a single agreement violation.
fn check_phrase_pair(
    record: &DocumentRecord,
    template_has_salutation: bool,
    rank: RecipientRank,
) -> Option<ValidationFinding> {
    if !template_has_salutation {
        return None;
    }
    let expected = salutation::resolve(rank);
    let mut mismatch = false;

    if let Some(content) = record.section("salutation") {
        if !content.trim().is_empty()
            && salutation::leading_opening(content) != Some(expected.opening)
        {
            mismatch = true;
        }
    }
    if let Some(content) = record.section("closing") {
        if !content.trim().is_empty()
            && salutation::leading_closing(content) != Some(expected.closing)
        {
            mismatch = true;
        }
    }

    mismatch.then(|| {
        ValidationFinding::error(
            Rule::PhrasePairMismatch,
            Some("salutation"),
            format!(
                "opening/closing must be the pair '{}' / '{}' for rank '{rank}'",
                expected.opening, expected.closing
            ),
        )
    })
}
