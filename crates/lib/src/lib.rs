//! # sarabun: Thai Official Document Classification & Template Binding
//!
//! This crate is the decision core of a Thai official-document generation
//! system: it maps a free-form request to one of the six legally defined
//! document kinds, binds the kind's section template and salutation rules,
//! and validates assembled content against them. Everything that produces
//! prose or pixels (field extraction, content generation, rendering) is an
//! external collaborator behind the traits in [`providers`].
//!
//! The core is stateless and side-effect-free per call: `classify` and
//! `validate` are pure functions over their inputs and the read-only
//! registry tables, so concurrent workflows need no locking. Each
//! [`DocumentRecord`] has exactly one owner at a time.

pub mod classify;
pub mod errors;
pub mod fields;
pub mod prompts;
pub mod providers;
pub mod record;
pub mod salutation;
pub mod taxonomy;
pub mod validate;

pub use classify::{classify, Classification, ClassifierConfig};
pub use errors::{ConfigError, ExtractError, GenerateError, GeneratorError};
pub use fields::{completeness_check, ExtractedFields, REQUIRED_FIELDS};
pub use record::DocumentRecord;
pub use salutation::{resolve, validate_pair, PhrasePair, RecipientRank};
pub use taxonomy::{permitted_ranks, section_spec, DocumentKind, SectionSpec};
pub use validate::{is_valid, validate, Rule, Severity, ValidationFinding, ValidatorConfig};

use providers::extractor::FieldExtractor;
use providers::generator::{ContentGenerator, DraftRequest};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Default bound on regenerate attempts after the first draft.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// The result of one generation run.
///
/// Incomplete fields and ambiguous classification are expected, recoverable
/// outcomes the caller resolves with the user; they are values here, not
/// errors. Only provider failures and retry exhaustion are [`GenerateError`]s.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// A record with zero error findings, ready for the renderer.
    Document(DocumentRecord),
    /// The extractor could not recover these required fields; ask the user.
    NeedsClarification(BTreeSet<&'static str>),
    /// Classification confidence fell below the configured threshold; ask
    /// the user to choose instead of guessing.
    AmbiguousKind {
        best: DocumentKind,
        runner_up: DocumentKind,
        confidence: f32,
    },
}

/// Drives the extract → classify → draft → validate pipeline with bounded
/// retries. Build one with [`DocumentClient::builder`].
#[derive(Clone, Debug)]
pub struct DocumentClient {
    extractor: Box<dyn FieldExtractor>,
    generator: Box<dyn ContentGenerator>,
    classifier: ClassifierConfig,
    validator: ValidatorConfig,
    max_retries: u32,
}

/// A builder for [`DocumentClient`] instances.
#[derive(Default)]
pub struct DocumentClientBuilder {
    extractor: Option<Box<dyn FieldExtractor>>,
    generator: Option<Box<dyn ContentGenerator>>,
    classifier: Option<ClassifierConfig>,
    validator: Option<ValidatorConfig>,
    max_retries: Option<u32>,
}

impl DocumentClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extractor(mut self, extractor: Box<dyn FieldExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn generator(mut self, generator: Box<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn classifier_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier = Some(config);
        self
    }

    pub fn validator_config(mut self, config: ValidatorConfig) -> Self {
        self.validator = Some(config);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Builds the client, verifying the registry and configuration tables
    /// once up front so table defects surface at startup, never mid-request.
    pub fn build(self) -> Result<DocumentClient, ConfigError> {
        let extractor = self.extractor.ok_or(ConfigError::MissingProvider("field extractor"))?;
        let generator = self.generator.ok_or(ConfigError::MissingProvider("content generator"))?;
        let classifier = self.classifier.unwrap_or_default();
        taxonomy::verify()?;
        classifier.verify()?;

        Ok(DocumentClient {
            extractor,
            generator,
            classifier,
            validator: self.validator.unwrap_or_default(),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }
}

impl DocumentClient {
    pub fn builder() -> DocumentClientBuilder {
        DocumentClientBuilder::new()
    }

    /// Runs the full pipeline for a request, classifying the kind from the
    /// extracted evidence.
    pub async fn generate(&self, request_text: &str) -> Result<GenerationOutcome, GenerateError> {
        let fields = self.extractor.extract(request_text).await?;

        let missing = completeness_check(&fields);
        if !missing.is_empty() {
            info!(?missing, "request is missing required fields");
            return Ok(GenerationOutcome::NeedsClarification(missing));
        }

        let classification = classify(request_text, &fields, &self.classifier);
        if classification.confidence < self.classifier.ambiguity_threshold {
            info!(
                best = %classification.kind,
                confidence = classification.confidence,
                "classification is ambiguous"
            );
            return Ok(GenerationOutcome::AmbiguousKind {
                best: classification.kind,
                runner_up: classification.runner_up,
                confidence: classification.confidence,
            });
        }
        info!(kind = %classification.kind, confidence = classification.confidence, "classified");

        self.run_attempts(classification.kind, request_text, &fields)
            .await
    }

    /// Runs the pipeline with a caller-chosen kind, skipping classification.
    /// This is the pre-selected-category path: the user already knows what
    /// they are writing.
    pub async fn generate_as(
        &self,
        request_text: &str,
        kind: DocumentKind,
    ) -> Result<GenerationOutcome, GenerateError> {
        let fields = self.extractor.extract(request_text).await?;

        let missing = completeness_check(&fields);
        if !missing.is_empty() {
            info!(?missing, "request is missing required fields");
            return Ok(GenerationOutcome::NeedsClarification(missing));
        }

        self.run_attempts(kind, request_text, &fields).await
    }

    /// The bounded draft/validate loop: one initial attempt plus
    /// `max_retries` regenerations, each fed the previous error findings.
    async fn run_attempts(
        &self,
        kind: DocumentKind,
        request_text: &str,
        fields: &ExtractedFields,
    ) -> Result<GenerationOutcome, GenerateError> {
        let Some(rank) = fields.recipient_rank else {
            return Ok(GenerationOutcome::NeedsClarification(BTreeSet::from([
                "recipient_rank",
            ])));
        };

        let spec = section_spec(kind);
        let phrases = resolve(rank);

        let mut record = DocumentRecord::new(request_text);
        record.kind = Some(kind);
        record.recipient_rank = Some(rank);
        record.references = fields.references.clone();
        record.attachments = fields.attachments.clone();

        let attempts = self.max_retries + 1;
        let mut feedback: Vec<ValidationFinding> = Vec::new();

        for attempt in 1..=attempts {
            let request = DraftRequest {
                request_text,
                kind,
                spec,
                fields,
                phrases,
                feedback: &feedback,
                attempt,
            };
            let drafts = self.generator.draft(&request).await?;
            if drafts.is_empty() {
                return Err(GeneratorError::EmptyDraft.into());
            }
            for draft in drafts {
                if spec.get(&draft.name).is_none() {
                    return Err(GeneratorError::UnknownSection(draft.name).into());
                }
                record.set_section(&draft.name, draft.content);
            }
            record.sort_sections_by_key(|name| spec.position(name).unwrap_or(usize::MAX));

            let findings = validate(&record, &self.validator);
            record.findings = findings.clone();
            if is_valid(&findings) {
                info!(record = %record.id, %kind, attempt, "document validated");
                return Ok(GenerationOutcome::Document(record));
            }

            feedback = findings
                .into_iter()
                .filter(|f| f.severity == Severity::Error)
                .collect();
            warn!(
                record = %record.id,
                attempt,
                errors = feedback.len(),
                "draft failed validation"
            );
        }

        Err(GenerateError::RetryExhausted {
            attempts,
            findings: feedback,
        })
    }
}
