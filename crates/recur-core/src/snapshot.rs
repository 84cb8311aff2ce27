use tracing::debug;

use crate::error::ProjectionError;
use crate::models::{RuleParameters, RuleSnapshot, Timestamp};

/// Read-only view over a live recurrence-rule instance.
///
/// Implemented by whatever engine expands the rule. The occurrence sequence
/// must be finite, ordered, and return the same data on every call while the
/// view is borrowed.
pub trait RecurrenceRuleView {
    /// The parameters the rule was declared with.
    fn rule_parameters(&self) -> RuleParameters;

    /// Total number of occurrences the rule produces.
    fn occurrence_count(&self) -> usize {
        self.occurrences().len()
    }

    /// Every occurrence the rule produces, in order.
    fn occurrences(&self) -> &[Timestamp];

    /// Serialized rule text, re-parseable by the same engine.
    fn to_canonical_text(&self) -> String;
}

impl<V: RecurrenceRuleView + ?Sized> RecurrenceRuleView for &V {
    fn rule_parameters(&self) -> RuleParameters {
        (**self).rule_parameters()
    }

    fn occurrence_count(&self) -> usize {
        (**self).occurrence_count()
    }

    fn occurrences(&self) -> &[Timestamp] {
        (**self).occurrences()
    }

    fn to_canonical_text(&self) -> String {
        (**self).to_canonical_text()
    }
}

impl RuleSnapshot {
    /// Freezes the current state of a rule.
    ///
    /// The occurrence list is copied, so later edits to the engine never reach
    /// an issued snapshot. `until` is the declared end when the rule has one,
    /// otherwise the last produced occurrence.
    ///
    /// # Errors
    /// `ProjectionError::EmptyRecurrence` if the rule produces nothing.
    pub fn extract<V: RecurrenceRuleView + ?Sized>(view: &V) -> Result<Self, ProjectionError> {
        let occurrences = view.occurrences().to_vec();
        let last = *occurrences.last().ok_or(ProjectionError::EmptyRecurrence)?;

        let RuleParameters {
            start,
            explicit_end,
            frequency,
            interval,
        } = view.rule_parameters();

        let count = occurrences.len();
        let until = explicit_end.unwrap_or(last);

        debug!(
            %frequency,
            interval,
            count,
            %until,
            "extracted rule snapshot"
        );

        Ok(Self {
            start,
            until,
            frequency,
            interval,
            count,
            occurrences,
            canonical_text: view.to_canonical_text(),
        })
    }
}
