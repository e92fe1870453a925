use crate::core::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

/// Decode a Service Tags JSON payload.
pub fn parse(json: &[u8]) -> Result<Dataset> {
    serde_json::from_slice(json).map_err(Error::Parse)
}

// An explicit `null` decodes the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Dataset
--------------------------------------------------------------------------------------*/

/// One published snapshot of the Azure IP Ranges and Service Tags.
///
/// Missing and `null` fields decode to their empty value; unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(rename = "changeNumber", deserialize_with = "null_as_default")]
    pub change_number: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub cloud: String,

    #[serde(rename = "values", deserialize_with = "null_as_default")]
    pub services: Vec<Service>,
}

/*--------------------------------------------------------------------------------------
  Service
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: ServiceProperties,
}

/*--------------------------------------------------------------------------------------
  Service Properties
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceProperties {
    #[serde(deserialize_with = "null_as_default")]
    pub change_number: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub system_service: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_prefixes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub network_features: Vec<String>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
