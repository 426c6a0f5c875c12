//! The central validator that turns raw subrule records into a `Rule`.
use super::error::{ValidationError, ValidationErrorType};
use super::rules::{fields, series};
use crate::config::MatchConfig;
use crate::error::NetTreeError;
use crate::input::{Dataset, Rule, Subrule, SubruleSpec};

/// The gatekeeper in front of the builder.
///
/// Checks every subrule record against the dataset and collects all problems
/// before failing, so a caller sees the full list at once. The builder itself
/// assumes a validated `Rule`.
pub struct Validator<'a> {
    dataset: &'a Dataset,
    config: &'a MatchConfig,
}

impl<'a> Validator<'a> {
    pub fn new(dataset: &'a Dataset, config: &'a MatchConfig) -> Self {
        Self { dataset, config }
    }

    /// # Returns
    /// - `Ok(Rule)` if every record is valid.
    /// - `Err(NetTreeError::Schema)` listing every issue found.
    pub fn validate(&self, specs: &[SubruleSpec]) -> Result<Rule, NetTreeError> {
        if specs.is_empty() {
            return Err(NetTreeError::schema(ValidationError::new(
                ValidationErrorType::EmptyRule,
                "a rule needs at least one subrule",
            )));
        }

        let mut errors = Vec::new();
        let mut subrules = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            let issues_before = errors.len();
            let mut record = |issue: ValidationError| errors.push(issue.at_subrule(index));

            for (field, present) in [
                ("series", spec.series.is_some()),
                ("symbol", spec.symbol.is_some()),
                ("op", spec.op.is_some()),
            ] {
                if !present {
                    record(ValidationError::new(
                        ValidationErrorType::MissingField,
                        format!("missing required key '{}'", field),
                    ));
                }
            }

            let series = spec
                .series
                .as_deref()
                .map(|name| series::resolve_series(self.dataset, name))
                .transpose()
                .unwrap_or_else(|e| {
                    record(e);
                    None
                });
            let reference = spec
                .symbol
                .as_ref()
                .map(fields::parse_reference)
                .transpose()
                .unwrap_or_else(|e| {
                    record(e);
                    None
                });
            let operator = spec
                .op
                .as_deref()
                .map(fields::parse_operator)
                .transpose()
                .unwrap_or_else(|e| {
                    record(e);
                    None
                });
            let gap = fields::parse_gap(spec.gap.as_ref(), self.config.default_gap)
                .map_err(&mut record)
                .ok();

            if let (Some(series), Some(reference)) = (series, &reference) {
                if let Some(err) = series::validate_value_kind(self.dataset, series, reference) {
                    record(err);
                }
            }

            if errors.len() > issues_before {
                continue;
            }
            if let (Some(series), Some(reference), Some(operator), Some(gap)) = (series, reference, operator, gap) {
                subrules.push(Subrule {
                    series,
                    series_name: self.dataset.series_name(series).to_string(),
                    reference,
                    operator,
                    gap,
                });
            }
        }

        if errors.is_empty() {
            Rule::new(subrules)
        } else {
            Err(NetTreeError::Schema(errors))
        }
    }
}
