//! Occurrence record assembly.

use tracing::debug;

use crate::calendar::CalendarFields;
use crate::error::{CoreError, ProjectionError};
use crate::models::{HostRef, MinimalEventRecord, OccurrenceRecord, RuleSnapshot, Timestamp};
use crate::snapshot::RecurrenceRuleView;

/// Builds [`OccurrenceRecord`]s from a rule and one of its occurrences.
///
/// Stateless: every call is an independent, synchronous assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceProjector;

impl OccurrenceProjector {
    pub fn new() -> Self {
        Self
    }

    /// Projects one occurrence of `view` into a record.
    ///
    /// # Arguments
    /// * `occurrence_time` - A timestamp the rule produced; membership is not checked
    /// * `view` - The governing rule
    /// * `host_ref` - Host record the occurrence belongs to, if any
    /// * `repeat_index` - Zero-based position in the rule's sequence
    ///
    /// # Errors
    /// Returns `CoreError::Projection` naming the occurrence and rule when the
    /// index is negative, the weekday is out of range, or the rule is empty.
    /// No partially built record is ever returned.
    pub fn project<V: RecurrenceRuleView + ?Sized>(
        &self,
        occurrence_time: Timestamp,
        view: &V,
        host_ref: Option<HostRef>,
        repeat_index: i64,
    ) -> Result<OccurrenceRecord, CoreError> {
        Self::assemble(occurrence_time, view, host_ref, repeat_index)
            .map_err(|source| projection_error(occurrence_time, view, source))
    }

    /// Projects every occurrence of `view` in order, using each position as
    /// its repeat index.
    pub fn project_all<V: RecurrenceRuleView + ?Sized>(
        &self,
        view: &V,
        host_ref: Option<HostRef>,
    ) -> Result<Vec<OccurrenceRecord>, CoreError> {
        let occurrences = view.occurrences();
        if occurrences.is_empty() {
            let start = view.rule_parameters().start;
            return Err(projection_error(start, view, ProjectionError::EmptyRecurrence));
        }

        // One snapshot serves the whole batch
        let snapshot = RuleSnapshot::extract(view)
            .map_err(|source| projection_error(occurrences[0], view, source))?;

        let mut records = Vec::with_capacity(occurrences.len());
        for (index, &occurrence_time) in occurrences.iter().enumerate() {
            let fields = CalendarFields::derive(&occurrence_time)
                .map_err(|source| projection_error(occurrence_time, view, source))?;
            records.push(OccurrenceRecord {
                host_ref,
                occurrence_time,
                repeat_index: index,
                is_original: index == 0,
                fields,
                rule: snapshot.clone(),
            });
        }

        debug!(count = records.len(), "projected all occurrences");
        Ok(records)
    }

    fn assemble<V: RecurrenceRuleView + ?Sized>(
        occurrence_time: Timestamp,
        view: &V,
        host_ref: Option<HostRef>,
        repeat_index: i64,
    ) -> Result<OccurrenceRecord, ProjectionError> {
        let repeat_index = usize::try_from(repeat_index)
            .map_err(|_| ProjectionError::InvalidRepeatIndex(repeat_index))?;
        let fields = CalendarFields::derive(&occurrence_time)?;
        let rule = RuleSnapshot::extract(view)?;

        debug!(%occurrence_time, repeat_index, "projected occurrence");

        Ok(OccurrenceRecord {
            host_ref,
            occurrence_time,
            repeat_index,
            is_original: repeat_index == 0,
            fields,
            rule,
        })
    }
}

fn projection_error<V: RecurrenceRuleView + ?Sized>(
    occurrence: Timestamp,
    view: &V,
    source: ProjectionError,
) -> CoreError {
    CoreError::Projection {
        occurrence: occurrence.to_rfc3339(),
        rule: view.to_canonical_text(),
        source,
    }
}

impl<'a> MinimalEventRecord<'a> {
    /// Builds a display-only record from a timestamp and the host's already
    /// materialized occurrence list.
    pub fn build(
        occurrence_time: Timestamp,
        host_ref: Option<HostRef>,
        occurrences: &'a [Timestamp],
    ) -> Result<Self, ProjectionError> {
        Ok(Self {
            host_ref,
            occurrence_time,
            fields: CalendarFields::derive(&occurrence_time)?,
            occurrences,
        })
    }
}
