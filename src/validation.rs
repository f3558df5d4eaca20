//! Validation channel: configuration problems collected during a pass.

use crate::error::ChartError;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub source: String,
    pub message: String,
    pub member_names: Vec<String>,
}

impl ValidationResult {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            member_names: Vec::new(),
        }
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_names.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn from_error(source: impl Into<String>, error: &ChartError) -> Self {
        let result = Self::new(source, error.to_string());
        match error {
            ChartError::UnresolvedAxis { axis, .. } => result.with_members([axis.clone()]),
            ChartError::ItemTypeMismatch { source_name, .. }
            | ChartError::UnresolvedDataSource { source_name, .. } => {
                result.with_members([source_name.clone()])
            }
            _ => result,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)?;
        if !self.member_names.is_empty() {
            write!(f, " [{}]", self.member_names.join(", "))?;
        }
        Ok(())
    }
}

/// Collects results for one pass; drained by the orchestrator.
#[derive(Debug, Default)]
pub struct ValidationCollector {
    results: Vec<ValidationResult>,
}

impl ValidationCollector {
    pub fn report(&mut self, result: ValidationResult) {
        tracing::warn!(%result, "validation");
        self.results.push(result);
    }

    pub fn report_error(&mut self, source: &str, error: &ChartError) {
        self.report(ValidationResult::from_error(source, error));
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn take(&mut self) -> Vec<ValidationResult> {
        std::mem::take(&mut self.results)
    }
}
