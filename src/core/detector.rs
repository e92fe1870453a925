use crate::core::change_report::ChangeReport;
use crate::core::errors::Result;
use crate::core::json::{self, Dataset, Service};
use log::{info, warn};
use std::collections::HashMap;

/*-------------------------------------------------------------------------------------------------
  Verdict
-------------------------------------------------------------------------------------------------*/

/// Outcome of comparing a new Service Tags payload against the previous snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// There is no previous snapshot.
    NoPrevious,

    /// The previous snapshot could not be parsed.
    DegradedPrevious,

    ChangeNumberDiffers { old: i64, new: i64 },

    /// Same change number, but the raw payloads are not byte-for-byte identical.
    ContentDiffers,

    Unchanged { change_number: i64 },
}

impl Verdict {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Verdict::Unchanged { .. })
    }
}

/*-------------------------------------------------------------------------------------------------
  Change Detection
-------------------------------------------------------------------------------------------------*/

/// Decide whether `new` differs from the `previous` snapshot.
///
/// Fails only when `new` does not parse; a missing or corrupt previous snapshot counts as a
/// change.
pub fn has_changed(previous: Option<&[u8]>, new: &[u8]) -> Result<bool> {
    check(previous, new).map(|verdict| verdict.is_changed())
}

/// Like [has_changed], but reports which rule decided the outcome.
///
/// Rules, in order: no previous snapshot; unparsable previous snapshot; differing change
/// numbers; differing bytes; otherwise unchanged.
pub fn check(previous: Option<&[u8]>, new: &[u8]) -> Result<Verdict> {
    let Some(previous) = previous else {
        info!("No previous data found, treating as new data");
        json::parse(new)?;
        return Ok(Verdict::NoPrevious);
    };

    let new_dataset = json::parse(new)?;
    let Some(previous_dataset) = parse_previous(previous) else {
        return Ok(Verdict::DegradedPrevious);
    };

    let verdict = if previous_dataset.change_number != new_dataset.change_number {
        info!(
            "Change number differs; old: {}, new: {}",
            previous_dataset.change_number, new_dataset.change_number
        );
        Verdict::ChangeNumberDiffers {
            old: previous_dataset.change_number,
            new: new_dataset.change_number,
        }
    } else if previous != new {
        info!("Change numbers match but content differs, treating as changed");
        Verdict::ContentDiffers
    } else {
        info!(
            "No changes detected; change number: {}",
            new_dataset.change_number
        );
        Verdict::Unchanged {
            change_number: new_dataset.change_number,
        }
    };

    Ok(verdict)
}

/*-------------------------------------------------------------------------------------------------
  Diff
-------------------------------------------------------------------------------------------------*/

/// Build a [ChangeReport] describing the services added, removed, and modified between the
/// `previous` snapshot and `new`.
///
/// A service present in both datasets counts as modified when [services_equal] is false. When
/// there is no usable previous snapshot the report only has `is_new` set.
pub fn diff(previous: Option<&[u8]>, new: &[u8]) -> Result<ChangeReport> {
    let new_dataset = json::parse(new)?;

    let Some(previous_dataset) = previous.and_then(parse_previous) else {
        return Ok(ChangeReport::new_dataset());
    };

    let old_services = services_by_id(&previous_dataset);
    let new_services = services_by_id(&new_dataset);

    let added_ids = new_services
        .keys()
        .filter(|id| !old_services.contains_key(*id))
        .map(|id| id.to_string())
        .collect();

    let removed_ids = old_services
        .keys()
        .filter(|id| !new_services.contains_key(*id))
        .map(|id| id.to_string())
        .collect();

    let modified_ids = new_services
        .iter()
        .filter_map(|(id, new_service)| {
            old_services
                .get(id)
                .filter(|old_service| !services_equal(old_service, new_service))
                .map(|_| id.to_string())
        })
        .collect();

    Ok(ChangeReport {
        is_new: false,
        old_change_number: previous_dataset.change_number,
        new_change_number: new_dataset.change_number,
        old_service_count: previous_dataset.services.len(),
        new_service_count: new_dataset.services.len(),
        added_ids,
        removed_ids,
        modified_ids,
    })
}

/// Cheap service equality: id, name, and service change number match, and both services publish
/// the same *number* of address prefixes. Prefix contents are not compared.
pub fn services_equal(a: &Service, b: &Service) -> bool {
    a.id == b.id
        && a.name == b.name
        && a.properties.address_prefixes.len() == b.properties.address_prefixes.len()
        && a.properties.change_number == b.properties.change_number
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn parse_previous(previous: &[u8]) -> Option<Dataset> {
    json::parse(previous)
        .inspect_err(|error| warn!("Failed to parse previous data, treating as new: {}", error))
        .ok()
}

// Later duplicates of an id replace earlier ones.
fn services_by_id(dataset: &Dataset) -> HashMap<&str, &Service> {
    dataset
        .services
        .iter()
        .map(|service| (service.id.as_str(), service))
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{log_error, Error};
    use crate::core::transform::tests::{test_dataset, test_service};
    use std::collections::BTreeSet;
    use test_log::test;

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    fn to_json(dataset: &Dataset) -> Vec<u8> {
        serde_json::to_vec_pretty(dataset).unwrap()
    }

    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    /*----------------------------------------------------------------------------------
      has_changed / check
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_identical_payloads_unchanged() {
        let json = to_json(&test_dataset(
            100,
            vec![test_service("A", &["1.2.3.0/24"])],
        ));

        assert!(!has_changed(Some(json.as_slice()), &json).unwrap());
        assert_eq!(
            check(Some(json.as_slice()), &json).unwrap(),
            Verdict::Unchanged { change_number: 100 }
        );
    }

    #[test]
    fn test_change_number_differs() {
        let services = vec![test_service("A", &["1.2.3.0/24"])];
        let old = to_json(&test_dataset(100, services.clone()));
        let new = to_json(&test_dataset(101, services));

        assert!(has_changed(Some(old.as_slice()), &new).unwrap());
        assert_eq!(
            check(Some(old.as_slice()), &new).unwrap(),
            Verdict::ChangeNumberDiffers { old: 100, new: 101 }
        );
    }

    #[test]
    fn test_content_differs_with_same_change_number() {
        let old = to_json(&test_dataset(100, vec![test_service("A", &[])]));
        let new = to_json(&test_dataset(100, vec![test_service("B", &[])]));

        assert_eq!(
            check(Some(old.as_slice()), &new).unwrap(),
            Verdict::ContentDiffers
        );
    }

    #[test]
    fn test_whitespace_only_difference_is_a_change() {
        let old = br#"{"changeNumber": 1, "cloud": "Public", "values": []}"#;
        let new = br#"{"changeNumber":1,"cloud":"Public","values":[]}"#;

        assert!(has_changed(Some(&old[..]), new).unwrap());
    }

    #[test]
    fn test_no_previous_is_changed() {
        let new = to_json(&test_dataset(1, vec![]));

        assert!(has_changed(None, &new).unwrap());
        assert_eq!(check(None, &new).unwrap(), Verdict::NoPrevious);
    }

    #[test]
    fn test_corrupt_previous_is_changed() {
        let new = to_json(&test_dataset(1, vec![]));

        assert_eq!(
            check(Some(&b"{ not json"[..]), &new).unwrap(),
            Verdict::DegradedPrevious
        );
        assert!(has_changed(Some(&b""[..]), &new).unwrap());
    }

    #[test]
    fn test_previous_with_null_fields_is_usable() {
        let old = br#"{
          "changeNumber": 100,
          "cloud": null,
          "values": [
            {
              "name": "A",
              "id": "A",
              "properties": {
                "changeNumber": 1,
                "region": null,
                "addressPrefixes": ["1.2.3.0/24"],
                "networkFeatures": null
              }
            }
          ]
        }"#;
        let new = to_json(&test_dataset(
            101,
            vec![test_service("A", &["1.2.3.0/24"])],
        ));

        assert_eq!(
            check(Some(&old[..]), &new).unwrap(),
            Verdict::ChangeNumberDiffers { old: 100, new: 101 }
        );

        let report = diff(Some(&old[..]), &new).inspect_err(log_error).unwrap();
        assert!(!report.is_new);
        assert_eq!(report.old_change_number, 100);
        assert_eq!(report.old_service_count, 1);
        assert!(!report.has_service_changes());
    }

    #[test]
    fn test_corrupt_new_is_an_error() {
        let old = to_json(&test_dataset(1, vec![]));

        let result =
            has_changed(Some(old.as_slice()), b"{\"changeNumber\": 1,").inspect_err(log_error);
        assert!(matches!(result, Err(Error::Parse(_))));

        let result = has_changed(None, b"").inspect_err(log_error);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    /*----------------------------------------------------------------------------------
      diff
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_diff_added_and_removed() {
        let old = to_json(&test_dataset(
            100,
            vec![test_service("A", &["1.2.3.0/24"]), test_service("B", &[])],
        ));
        let new = to_json(&test_dataset(
            100,
            vec![test_service("B", &[]), test_service("C", &["::1/128"])],
        ));

        assert!(has_changed(Some(old.as_slice()), &new).unwrap());

        let report = diff(Some(old.as_slice()), &new).unwrap();
        assert!(!report.is_new);
        assert_eq!(report.added_ids, ids(&["C"]));
        assert_eq!(report.removed_ids, ids(&["A"]));
        assert!(report.modified_ids.is_empty());
        assert_eq!(report.old_change_number, 100);
        assert_eq!(report.new_change_number, 100);
        assert_eq!(report.old_service_count, 2);
        assert_eq!(report.new_service_count, 2);
        assert!(report.has_service_changes());
    }

    #[test]
    fn test_diff_modified() {
        let mut renamed = test_service("A", &[]);
        renamed.name = "Renamed".to_string();
        let mut bumped = test_service("B", &[]);
        bumped.properties.change_number = 2;

        let old = to_json(&test_dataset(
            1,
            vec![
                test_service("A", &[]),
                test_service("B", &[]),
                test_service("C", &["10.0.0.0/8"]),
            ],
        ));
        let new = to_json(&test_dataset(
            2,
            vec![
                renamed,
                bumped,
                test_service("C", &["10.0.0.0/8", "10.1.0.0/16"]),
            ],
        ));

        let report = diff(Some(old.as_slice()), &new).unwrap();
        assert_eq!(report.modified_ids, ids(&["A", "B", "C"]));
        assert!(report.added_ids.is_empty());
        assert!(report.removed_ids.is_empty());
    }

    #[test]
    fn test_diff_ignores_same_length_prefix_edits() {
        let old = to_json(&test_dataset(1, vec![test_service("A", &["10.0.0.0/8"])]));
        let new = to_json(&test_dataset(1, vec![test_service("A", &["11.0.0.0/8"])]));

        assert!(has_changed(Some(old.as_slice()), &new).unwrap());
        let report = diff(Some(old.as_slice()), &new).unwrap();
        assert!(!report.has_service_changes());
    }

    #[test]
    fn test_diff_without_previous() {
        let new = to_json(&test_dataset(1, vec![test_service("A", &[])]));

        let report = diff(None, &new).unwrap();
        assert_eq!(report, ChangeReport::new_dataset());

        let report = diff(Some(&b"garbage"[..]), &new).unwrap();
        assert!(report.is_new);
        assert_eq!(report.new_change_number, 0);
        assert!(report.added_ids.is_empty());
    }

    #[test]
    fn test_diff_corrupt_new_is_an_error() {
        assert!(matches!(diff(None, b"nope"), Err(Error::Parse(_))));
    }

    /*----------------------------------------------------------------------------------
      services_equal
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_services_equal() {
        let a = test_service("A", &["10.0.0.0/8"]);

        let mut other_region = a.clone();
        other_region.properties.region = "westus".to_string();
        assert!(services_equal(&a, &other_region));

        let mut other_prefix = a.clone();
        other_prefix.properties.address_prefixes = vec!["::/0".to_string()];
        assert!(services_equal(&a, &other_prefix));

        let mut more_prefixes = a.clone();
        more_prefixes
            .properties
            .address_prefixes
            .push("::/0".to_string());
        assert!(!services_equal(&a, &more_prefixes));

        assert!(!services_equal(&a, &test_service("B", &["10.0.0.0/8"])));
    }
}
