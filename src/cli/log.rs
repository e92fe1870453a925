use azureipranges::{ChangeReport, WriteSummary};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{debug, info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Logger Setup
--------------------------------------------------------------------------------------*/

pub fn init(verbose: &Verbosity<InfoLevel>) {
    let level = verbose.log_level();

    let result = stderrlog::new()
        .module(env!("CARGO_CRATE_NAME"))
        .quiet(level.is_none())
        .verbosity(level.map_or(0, |level| level as usize - 1))
        .init();

    if let Err(error) = result {
        eprintln!("Unable to initialize logging: {error}");
    }
}

/*--------------------------------------------------------------------------------------
  Change Report
--------------------------------------------------------------------------------------*/

pub fn change_report(report: &ChangeReport) {
    if report.is_new {
        info!("This is a new dataset");
        return;
    }

    info!(
        "Change details; old change number: {}, new change number: {}, old service count: {}, new service count: {}",
        report.old_change_number,
        report.new_change_number,
        report.old_service_count,
        report.new_service_count
    );

    let count_added = report.added_ids.len();
    if count_added > 0 {
        info!("Services added ({count_added}): {:?}", report.added_ids);
    };

    let count_removed = report.removed_ids.len();
    if count_removed > 0 {
        info!("Services removed ({count_removed}): {:?}", report.removed_ids);
    };

    let count_modified = report.modified_ids.len();
    if count_modified > 0 {
        info!("Services modified: {count_modified}");
        if count_modified <= 10 {
            debug!("Modified services: {:?}", report.modified_ids);
        }
    };
}

/*--------------------------------------------------------------------------------------
  Write Summary
--------------------------------------------------------------------------------------*/

pub fn write_summary(write_summary: &WriteSummary) {
    if write_summary.failed > 0 {
        warn!("Failed to write {} service file(s)", write_summary.failed);
    }
}
