use std::path::PathBuf;

use chrono::NaiveDate;
use toolbox_data::storage::KeyValueStorage;
use toolbox_domain::entities::conversions::convert_to_data_reading;
use toolbox_domain::entities::Notice;
use toolbox_domain::services::insights::summarize;
use toolbox_domain::services::views::{chart_points, daily_rows, recorded_days};
use toolbox_domain::services::ReadingsStore;
use tracing::info;

use super::{CommandError, Outcome};
use crate::cli::ReadingsCommand;
use crate::output;

/// Run a readings subcommand against `store`. `today` is the local date used
/// for defaults and preset ranges.
pub async fn execute<S: KeyValueStorage>(
    command: &ReadingsCommand,
    store: &mut ReadingsStore<S>,
    today: NaiveDate,
) -> Result<Outcome, CommandError> {
    match command {
        ReadingsCommand::Add {
            systolic,
            diastolic,
            date,
        } => {
            let reading = store.record(*systolic, *diastolic, date.unwrap_or(today))?;
            Ok(Outcome::lines(vec![output::format_reading(&reading)])
                .with_notice(Notice::reading_saved()))
        }

        ReadingsCommand::List {
            day: Some(day),
            json,
            ..
        } => {
            let rows = daily_rows(&store.readings(), *day);
            if *json {
                return Ok(Outcome::lines(vec![serde_json::to_string_pretty(&rows)?]));
            }
            if rows.is_empty() {
                return Ok(Outcome::lines(vec![output::no_readings_on(*day)]));
            }
            Ok(Outcome::lines(rows.iter().map(output::format_daily_row).collect()))
        }

        ReadingsCommand::List {
            day: None,
            filter,
            json,
        } => {
            let readings = store.filter_by_range(filter.to_range(today).as_ref());
            if *json {
                let stored: Vec<_> = readings.iter().map(convert_to_data_reading).collect();
                return Ok(Outcome::lines(vec![serde_json::to_string_pretty(&stored)?]));
            }
            if readings.is_empty() {
                return Ok(Outcome::lines(vec!["No readings yet.".to_string()]));
            }
            Ok(Outcome::lines(readings.iter().map(output::format_reading).collect()))
        }

        ReadingsCommand::Chart { filter, json } => {
            let readings = store.filter_by_range(filter.to_range(today).as_ref());
            let points = chart_points(&readings);
            if *json {
                return Ok(Outcome::lines(vec![serde_json::to_string_pretty(&points)?]));
            }
            if points.is_empty() {
                return Ok(Outcome::lines(vec![
                    "No readings yet. Add a reading to see your blood pressure trend.".to_string(),
                ]));
            }
            Ok(Outcome::lines(points.iter().map(output::format_chart_point).collect()))
        }

        ReadingsCommand::Days => Ok(Outcome::lines(
            recorded_days(&store.readings())
                .into_iter()
                .map(|day| day.format("%Y-%m-%d").to_string())
                .collect(),
        )),

        ReadingsCommand::Summary { filter } => {
            let readings = store.filter_by_range(filter.to_range(today).as_ref());
            match summarize(&readings) {
                Some(summary) => Ok(Outcome::lines(output::format_summary(&summary))),
                None => Ok(Outcome::lines(vec!["No readings yet.".to_string()])),
            }
        }

        ReadingsCommand::Import { path } => {
            let count = store.import_file(path).await?;
            Ok(Outcome::notice(Notice::imported(count)))
        }

        ReadingsCommand::Export {
            format,
            output: destination,
        } => {
            let payload = store.export_to(*format)?;
            let path = destination
                .clone()
                .unwrap_or_else(|| PathBuf::from(&payload.filename));

            tokio::fs::write(&path, payload.content.as_bytes()).await?;
            info!("Wrote {} ({})", path.display(), payload.mime_type);

            Ok(Outcome::lines(vec![format!("Wrote {}", path.display())])
                .with_notice(Notice::exported(*format)))
        }
    }
}
