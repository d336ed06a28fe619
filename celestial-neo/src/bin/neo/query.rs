//! `neo query`: filter close approaches and print or save the matches.

use crate::cli::{Cli, QueryArgs};
use anyhow::{bail, Context};
use celestial_neo::filters::limit;
use celestial_neo::write::{write_to_csv, write_to_json};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

const DEFAULT_DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Json,
}

pub fn run(args: &QueryArgs, cli: &Cli) -> anyhow::Result<()> {
    let format = match &args.outfile {
        Some(path) => Some(output_format(path)?),
        None => None,
    };

    let db = cli
        .data_config()
        .load()
        .context("Failed to load NEO data")?;
    let criteria = args.criteria();
    tracing::debug!(active = criteria.active(), "running query");
    let filters = criteria.into_filters();

    let start = Instant::now();
    let results = db.query(&filters);

    match (&args.outfile, format) {
        (Some(path), Some(OutputFormat::Csv)) => {
            let rows = write_to_csv(limit(results, args.limit), path)
                .with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("Wrote {} results to {:?}", rows, path);
        }
        (Some(path), Some(OutputFormat::Json)) => {
            let rows = write_to_json(limit(results, args.limit), path)
                .with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("Wrote {} results to {:?}", rows, path);
        }
        _ => {
            let n = args.limit.unwrap_or(DEFAULT_DISPLAY_LIMIT);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for approach in limit(results, Some(n)) {
                writeln!(out, "{}", approach)?;
            }
        }
    }

    tracing::info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "query finished"
    );
    Ok(())
}

fn output_format(path: &Path) -> anyhow::Result<OutputFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(OutputFormat::Csv),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(OutputFormat::Json),
        _ => bail!("Output file must end in .csv or .json: {:?}", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_by_extension() {
        assert_eq!(output_format(Path::new("out.csv")).unwrap(), OutputFormat::Csv);
        assert_eq!(output_format(Path::new("out.JSON")).unwrap(), OutputFormat::Json);
        assert!(output_format(Path::new("out.txt")).is_err());
        assert!(output_format(Path::new("out")).is_err());
    }
}
