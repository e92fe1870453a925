use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Change Report
-------------------------------------------------------------------------------------------------*/

/// Explains how a newly fetched dataset differs from the previous snapshot. Intended for
/// operator-facing logging.
///
/// When there is no usable previous snapshot, `is_new` is set and every other field is left at
/// its default.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChangeReport {
    pub is_new: bool,

    pub old_change_number: i64,
    pub new_change_number: i64,

    pub old_service_count: usize,
    pub new_service_count: usize,

    /// Service ids present only in the new dataset.
    pub added_ids: BTreeSet<String>,

    /// Service ids present only in the previous dataset.
    pub removed_ids: BTreeSet<String>,

    /// Service ids present in both datasets whose services are not considered equal.
    pub modified_ids: BTreeSet<String>,
}

impl ChangeReport {
    pub(crate) fn new_dataset() -> Self {
        Self {
            is_new: true,
            ..Self::default()
        }
    }

    /// True when any service was added, removed, or modified.
    pub fn has_service_changes(&self) -> bool {
        !self.added_ids.is_empty() || !self.removed_ids.is_empty() || !self.modified_ids.is_empty()
    }
}
