use crate::cli;
use azureipranges::{Client, Result, Writer};
use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Run: fetch, detect changes, save the snapshot, and generate the documents
--------------------------------------------------------------------------------------*/

pub fn run(args: &cli::Args) -> Result<()> {
    info!("Azure IP Ranges Generator");

    let json = match &args.from_file {
        Some(path) => azureipranges::read_json_file(path)?,
        None => Client::new().fetch()?,
    };

    let snapshot_path = args.snapshot_path();
    let previous = azureipranges::read_snapshot(&snapshot_path);

    let verdict = azureipranges::check(previous.as_deref(), &json)?;
    if !verdict.is_changed() && !args.force {
        info!("No changes detected, skipping generation");
        return Ok(());
    }

    let report = azureipranges::diff(previous.as_deref(), &json)
        .inspect(cli::log::change_report)
        .inspect_err(|error| warn!("Failed to get change details: {}", error))
        .ok();

    azureipranges::save_snapshot(&snapshot_path, &json)?;

    let dataset = azureipranges::parse(&json)?;
    let (records, summary) = azureipranges::transform(&dataset);

    let writer = Writer::new(&args.output, args.format.into());
    let write_summary = writer.write(&records, &summary)?;
    cli::log::write_summary(&write_summary);

    cli::output::run_summary(
        &summary,
        report.as_ref(),
        &write_summary,
        writer.output_dir(),
    );

    info!("Process complete");
    Ok(())
}
