//! Track the [Azure IP Ranges and Service Tags](https://www.microsoft.com/en-us/download/details.aspx?id=56519)
//! and publish them as one document per service tag.
//!
//! A run fetches the current Service Tags JSON, compares it with the previously saved copy, and,
//! when it changed, writes a summary document plus a document per service with its address
//! prefixes split into IPv4 and IPv6.
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> azureipranges::Result<()> {
//! let snapshot = Path::new("ServiceTags_Public.json");
//!
//! let json = azureipranges::Client::new().fetch()?;
//! let previous = azureipranges::read_snapshot(snapshot);
//!
//! if azureipranges::has_changed(previous.as_deref(), &json)? {
//!     let report = azureipranges::diff(previous.as_deref(), &json)?;
//!     println!("added: {:?}", report.added_ids);
//!
//!     azureipranges::save_snapshot(snapshot, &json)?;
//!     let dataset = azureipranges::parse(&json)?;
//!     let (records, summary) = azureipranges::transform(&dataset);
//!     azureipranges::Writer::new("data/services", azureipranges::Format::Yaml)
//!         .write(&records, &summary)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Logging goes through the [log] facade; install a logger to see it.

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Primary Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::change_report::ChangeReport;
pub use crate::core::client::{
    find_json_link, read_json_file, Client, ClientBuilder, DEFAULT_DOWNLOAD_PAGE_URL,
};
pub use crate::core::detector::{check, diff, has_changed, services_equal, Verdict};
pub use crate::core::errors::{Error, Result};
pub use crate::core::json::{parse, Dataset, Service, ServiceProperties};
pub use crate::core::prefix_type::PrefixType;
pub use crate::core::records::{
    record_key, AddressPrefixes, Counts, Metadata, ServiceRecord, SummaryRecord,
};
pub use crate::core::snapshot::{read_snapshot, save_snapshot};
pub use crate::core::transform::{transform, transform_at};
pub use crate::core::writer::{Format, WriteSummary, Writer};
