//! Classification use case
//!
//! Validate the whole program, then classify it. Validation failures leave
//! no partial verdict behind.

use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{ClassifierConfig, Validatable};
use crate::errors::Result;
use crate::features::escape_analysis::domain::Verdict;
use crate::features::escape_analysis::infrastructure::{ProgramValidator, RuleClassifier};
use crate::features::escape_analysis::ports::{EscapeClassifierPort, ProgramValidatorPort};
use crate::features::program_graph::Program;
use crate::features::type_catalog::TypeCatalog;

/// Validator + classifier behind one configuration
pub struct EscapeClassificationService<V = ProgramValidator, C = RuleClassifier> {
    config: ClassifierConfig,
    validator: V,
    classifier: C,
}

impl EscapeClassificationService {
    /// Service with the rule classifier; rejects an invalid configuration
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let classifier = RuleClassifier::new(&config);
        Ok(Self {
            config,
            validator: ProgramValidator::new(),
            classifier,
        })
    }
}

impl Default for EscapeClassificationService {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        let classifier = RuleClassifier::new(&config);
        Self {
            config,
            validator: ProgramValidator::new(),
            classifier,
        }
    }
}

impl<V, C> EscapeClassificationService<V, C>
where
    V: ProgramValidatorPort,
    C: EscapeClassifierPort,
{
    /// Service with custom components
    pub fn with_components(config: ClassifierConfig, validator: V, classifier: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            validator,
            classifier,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify every construction site of `program`
    pub fn classify(&self, catalog: &TypeCatalog, program: &Program) -> Result<Verdict> {
        let start = Instant::now();
        debug!(
            functions = program.functions().len(),
            sites = program.site_count(),
            operations = program.operation_count(),
            classifier = self.classifier.name(),
            "classifying program"
        );

        self.validator.validate(catalog, program)?;
        let verdict = self.classifier.classify(catalog, program);

        debug!(
            stack = verdict.stack_count(),
            heap = verdict.heap_count(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "program classified"
        );
        Ok(verdict)
    }

    /// Classify independent programs; results keep the input order
    pub fn classify_batch(&self, batch: &[(&TypeCatalog, &Program)]) -> Vec<Result<Verdict>> {
        let parallel = self.config.batch_is_parallel(batch.len());
        info!(programs = batch.len(), parallel, "classifying batch");

        if parallel {
            batch
                .par_iter()
                .map(|(catalog, program)| self.classify(catalog, program))
                .collect()
        } else {
            batch
                .iter()
                .map(|(catalog, program)| self.classify(catalog, program))
                .collect()
        }
    }
}

/// Classify with the default configuration
pub fn classify(catalog: &TypeCatalog, program: &Program) -> Result<Verdict> {
    EscapeClassificationService::default().classify(catalog, program)
}

/// Classify with an explicit configuration
pub fn classify_with(
    config: ClassifierConfig,
    catalog: &TypeCatalog,
    program: &Program,
) -> Result<Verdict> {
    EscapeClassificationService::new(config)?.classify(catalog, program)
}

/// Classify a batch with the default configuration
pub fn classify_batch(batch: &[(&TypeCatalog, &Program)]) -> Vec<Result<Verdict>> {
    EscapeClassificationService::default().classify_batch(batch)
}
