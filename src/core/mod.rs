/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod change_report;
pub mod client;
pub mod datetime;
pub mod detector;
pub mod errors;
pub mod json;
pub mod prefix_type;
pub mod records;
pub mod snapshot;
pub mod transform;
pub mod writer;
