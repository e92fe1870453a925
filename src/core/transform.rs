use crate::core::json::{Dataset, Service};
use crate::core::prefix_type::PrefixType;
use crate::core::records::{AddressPrefixes, Counts, Metadata, ServiceRecord, SummaryRecord};
use chrono::{DateTime, Utc};
use log::trace;

/*-------------------------------------------------------------------------------------------------
  Transform
-------------------------------------------------------------------------------------------------*/

/// Convert a [Dataset] into one [ServiceRecord] per service plus a [SummaryRecord] stamped with
/// the current UTC time.
///
/// Services with an empty id produce no record but are still counted in
/// [SummaryRecord::service_count].
pub fn transform(dataset: &Dataset) -> (Vec<ServiceRecord<'_>>, SummaryRecord<'_>) {
    transform_at(dataset, Utc::now())
}

/// [transform] with an explicit generation time.
pub fn transform_at(
    dataset: &Dataset,
    generated_at: DateTime<Utc>,
) -> (Vec<ServiceRecord<'_>>, SummaryRecord<'_>) {
    let records = dataset
        .services
        .iter()
        .filter(|service| {
            let keep = !service.id.is_empty();
            if !keep {
                trace!("Skipping service with an empty id: {:?}", service.name);
            }
            keep
        })
        .map(|service| service_record(service, dataset))
        .collect();

    let summary = SummaryRecord {
        change_number: dataset.change_number,
        cloud: &dataset.cloud,
        service_count: dataset.services.len(),
        generated_at,
    };

    (records, summary)
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn service_record<'d>(service: &'d Service, dataset: &'d Dataset) -> ServiceRecord<'d> {
    let properties = &service.properties;
    let (ipv4, ipv6) = categorize(&properties.address_prefixes);

    ServiceRecord {
        id: &service.id,
        name: &service.name,
        metadata: Metadata {
            change_number: properties.change_number,
            region: &properties.region,
            platform: &properties.platform,
            system_service: &properties.system_service,
            network_features: &properties.network_features,
            global_change_number: dataset.change_number,
            cloud: &dataset.cloud,
        },
        address_prefixes: AddressPrefixes {
            all: &properties.address_prefixes,
            counts: Counts {
                total: properties.address_prefixes.len(),
                ipv4: ipv4.len(),
                ipv6: ipv6.len(),
            },
            ipv4,
            ipv6,
        },
    }
}

/// Split prefixes into (IPv4, IPv6), preserving order. Uncategorized prefixes are dropped.
fn categorize(prefixes: &[String]) -> (Vec<&str>, Vec<&str>) {
    let mut ipv4 = Vec::new();
    let mut ipv6 = Vec::new();

    for prefix in prefixes {
        match PrefixType::classify(prefix) {
            Some(PrefixType::IPv4) => ipv4.push(prefix.as_str()),
            Some(PrefixType::IPv6) => ipv6.push(prefix.as_str()),
            None => trace!("Uncategorized address prefix: {:?}", prefix),
        }
    }

    (ipv4, ipv6)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
