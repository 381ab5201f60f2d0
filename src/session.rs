//! The interactive explore loop and the one-shot summary.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::city::City;
use crate::filter::TripFilter;
use crate::loader::load_city;
use crate::output::{print_json, write_report};
use crate::prompt::{Prompter, get_filters};
use crate::stats::TripReport;
use crate::viewer::display_raw_data;

/// Prompt, load, report and page raw rows until the user declines a restart.
pub fn explore<R: BufRead, W: Write>(data_dir: &Path, input: R, output: W) -> Result<()> {
    let mut prompter = Prompter::new(input, output);
    let mut rounds = 0;

    loop {
        let selection = get_filters(&mut prompter)?;
        info!(
            city = %selection.city,
            month = %selection.filter.month,
            day = %selection.filter.day,
            "Selection made"
        );

        let dataset = load_city(selection.city, data_dir)?;
        let view = selection.filter.apply(&dataset);

        write_report(prompter.output(), &view)?;
        display_raw_data(&mut prompter, &view)?;
        rounds += 1;

        if !prompter.confirm("\nWould you like to restart? Enter yes or no.\n")? {
            break;
        }
    }

    info!(rounds, "Session finished");
    Ok(())
}

/// How `summary` prints its report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

/// Computes one report without asking anything.
pub fn summary<W: Write>(
    data_dir: &Path,
    city: City,
    filter: TripFilter,
    format: SummaryFormat,
    out: &mut W,
) -> Result<TripReport> {
    let dataset = load_city(city, data_dir)?;
    let view = filter.apply(&dataset);

    let report = match format {
        SummaryFormat::Text => write_report(out, &view)?,
        SummaryFormat::Json => {
            let report = TripReport::from_view(&view);
            print_json(out, &report)?;
            report
        }
    };
    out.flush()?;
    Ok(report)
}
