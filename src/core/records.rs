use chrono::{DateTime, Utc};
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Service Record
-------------------------------------------------------------------------------------------------*/

/// Output document for a single Azure service tag. Borrows its strings from the [Dataset] it was
/// generated from.
///
/// [Dataset]: crate::Dataset
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ServiceRecord<'d> {
    pub id: &'d str,
    pub name: &'d str,
    pub metadata: Metadata<'d>,
    pub address_prefixes: AddressPrefixes<'d>,
}

impl ServiceRecord<'_> {
    /// Storage key for this record; see [record_key].
    pub fn key(&self) -> String {
        record_key(self.id)
    }
}

/// Service metadata. `change_number` is the service's own change number, while
/// `global_change_number` and `cloud` come from the enclosing dataset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Metadata<'d> {
    pub change_number: i64,
    pub region: &'d str,
    pub platform: &'d str,
    pub system_service: &'d str,
    pub network_features: &'d [String],
    pub global_change_number: i64,
    pub cloud: &'d str,
}

/// A service's address prefixes, as published and split by [PrefixType].
///
/// [PrefixType]: crate::PrefixType
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AddressPrefixes<'d> {
    pub all: &'d [String],
    pub ipv4: Vec<&'d str>,
    pub ipv6: Vec<&'d str>,
    pub counts: Counts,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub ipv4: usize,
    pub ipv6: usize,
}

/*-------------------------------------------------------------------------------------------------
  Summary Record
-------------------------------------------------------------------------------------------------*/

/// Dataset-level summary document written once per run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SummaryRecord<'d> {
    pub change_number: i64,
    pub cloud: &'d str,

    /// Number of services in the dataset, including any skipped for an empty id.
    pub service_count: usize,

    #[serde(with = "crate::core::datetime")]
    pub generated_at: DateTime<Utc>,
}

/*-------------------------------------------------------------------------------------------------
  Record Keys
-------------------------------------------------------------------------------------------------*/

/// Derive a storage key from a service id: lowercase, with every `.` replaced by `_`.
///
/// Distinct ids can map to the same key (`AzureCloud.EastUS` and `azurecloud_eastus`); no
/// attempt is made to disambiguate them.
///
/// ```
/// assert_eq!(azureipranges::record_key("AzureCloud.eastus2"), "azurecloud_eastus2");
/// ```
pub fn record_key(id: &str) -> String {
    id.replace('.', "_").to_lowercase()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
