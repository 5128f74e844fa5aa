//! Command line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use toolbox_domain::entities::{DateRange, DateRangePreset};
use toolbox_domain::services::TransferFormat;
use toolbox_domain::tools::EncodingKind;

/// Blood pressure tracker and text utilities.
#[derive(Parser, Debug)]
#[command(name = "toolbox", about = "Blood pressure tracker and text utilities", version)]
pub struct Cli {
    /// Storage backend: memory, file or sqlite.
    #[arg(long, global = true, env = "TOOLBOX_STORAGE")]
    pub storage: Option<String>,

    /// Directory for file storage and the default database.
    #[arg(long, global = true, env = "DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// SQLite database path.
    #[arg(long, global = true, env = "DB_SQLITE_PATH", value_name = "PATH")]
    pub sqlite_path: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record, browse, import and export blood pressure readings.
    #[command(subcommand)]
    Readings(ReadingsCommand),

    /// Encode text as URL component, Base64 or HTML.
    Encode(CodecArgs),

    /// Decode URL component, Base64 or HTML text.
    Decode(CodecArgs),

    /// Print a video search URL for the karaoke version of a song.
    Karaoke {
        /// Song name.
        #[arg(required = true, num_args = 1..)]
        song: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct CodecArgs {
    /// Encoding: url, base64 or html.
    #[arg(short, long, default_value = "url")]
    pub kind: EncodingKind,

    /// Input text.
    pub text: String,
}

#[derive(Subcommand, Debug)]
pub enum ReadingsCommand {
    /// Record a reading for a day (today by default) at the current time.
    Add {
        /// Systolic pressure (30-300).
        #[arg(short, long)]
        systolic: u16,

        /// Diastolic pressure (30-300).
        #[arg(short, long)]
        diastolic: u16,

        /// Day of the reading, YYYY-MM-DD.
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },

    /// List readings for one day or a date range.
    List {
        /// Show the table for a single day.
        #[arg(long, value_name = "DATE", conflicts_with_all = ["range", "from"])]
        day: Option<NaiveDate>,

        #[command(flatten)]
        filter: RangeArgs,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print chart points for a date range.
    Chart {
        #[command(flatten)]
        filter: RangeArgs,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the days that have readings.
    Days,

    /// Summary statistics for a date range.
    Summary {
        #[command(flatten)]
        filter: RangeArgs,
    },

    /// Replace all readings with the contents of a .json or .csv file.
    Import {
        /// File to import.
        path: PathBuf,
    },

    /// Write all readings to a .json or .csv file.
    Export {
        /// Output format: json or csv.
        #[arg(short, long, default_value = "csv")]
        format: TransferFormat,

        /// Output file. Defaults to a dated file name in the current directory.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Date range selection shared by the range views
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Preset range: last-7-days, last-3-weeks, last-month, last-3-months,
    /// last-6-months or last-year.
    #[arg(long, value_name = "PRESET", conflicts_with = "from")]
    pub range: Option<DateRangePreset>,

    /// First day of a custom range, YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day of a custom range. Defaults to the first day.
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<NaiveDate>,
}

impl RangeArgs {
    /// The selected range; `None` selects everything
    pub fn to_range(&self, today: NaiveDate) -> Option<DateRange> {
        match (self.range, self.from) {
            (Some(preset), _) => Some(DateRange::from_preset(preset, today)),
            (None, Some(from)) => Some(DateRange::new(from, self.to)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "toolbox", "readings", "add", "-s", "120", "-d", "80", "--date", "2025-06-13",
        ])
        .unwrap();

        match cli.command {
            Command::Readings(ReadingsCommand::Add {
                systolic,
                diastolic,
                date,
            }) => {
                assert_eq!((systolic, diastolic), (120, 80));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 13));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_range_preset_and_custom_conflict() {
        let result = Cli::try_parse_from([
            "toolbox", "readings", "chart", "--range", "last-7-days", "--from", "2025-06-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_args() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let preset = RangeArgs {
            range: Some(DateRangePreset::Last7Days),
            ..Default::default()
        };
        assert_eq!(
            preset.to_range(today).unwrap().from(),
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
        );

        let single = RangeArgs {
            from: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..Default::default()
        };
        assert_eq!(
            single.to_range(today).unwrap().last_day(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(RangeArgs::default().to_range(today).is_none());
    }

    #[test]
    fn test_global_storage_flag() {
        let cli = Cli::try_parse_from([
            "toolbox", "encode", "--storage", "memory", "-k", "base64", "hi",
        ])
        .unwrap();
        assert_eq!(cli.storage.as_deref(), Some("memory"));
    }
}
