//! `neo inspect`: look up one NEO and optionally list its close approaches.

use crate::cli::{Cli, InspectArgs};
use anyhow::Context;
use celestial_neo::{NearEarthObject, NeoDatabase};
use std::io::Write;

pub fn run(args: &InspectArgs, cli: &Cli) -> anyhow::Result<()> {
    let db = cli
        .data_config()
        .load()
        .context("Failed to load NEO data")?;
    let stdout = std::io::stdout();
    inspect(&db, args, &mut stdout.lock())
}

fn find<'a>(db: &'a NeoDatabase, args: &InspectArgs) -> Option<&'a NearEarthObject> {
    match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    }
}

fn inspect<W: Write>(db: &NeoDatabase, args: &InspectArgs, out: &mut W) -> anyhow::Result<()> {
    let Some(neo) = find(db, args) else {
        writeln!(out, "No matching NEOs exist in the database.")?;
        return Ok(());
    };

    writeln!(out, "{}", neo)?;
    if args.verbose {
        for approach in db.approaches_of(neo) {
            writeln!(out, "- {}", approach)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestial_neo::CloseApproach;
    use chrono::NaiveDate;

    fn db() -> NeoDatabase {
        let time = NaiveDate::from_ymd_opt(2029, 4, 13)
            .unwrap()
            .and_hms_opt(21, 46, 0)
            .unwrap();
        NeoDatabase::new(
            vec![NearEarthObject::new(
                "99942",
                Some("Apophis".to_string()),
                0.37,
                true,
            )],
            vec![CloseApproach::new("99942", time, 0.000254, 7.42)],
        )
        .unwrap()
    }

    fn args(pdes: Option<&str>, name: Option<&str>, verbose: bool) -> InspectArgs {
        InspectArgs {
            pdes: pdes.map(str::to_string),
            name: name.map(str::to_string),
            verbose,
        }
    }

    fn render(args: &InspectArgs) -> String {
        let mut out = Vec::new();
        inspect(&db(), args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_inspect_by_name_verbose() {
        let text = render(&args(None, Some("Apophis"), true));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("NEO 99942 (Apophis)"));
        assert!(lines[1].starts_with("- On 2029-04-13 21:46"));
    }

    #[test]
    fn test_inspect_miss() {
        let text = render(&args(Some("apophis"), None, false));
        assert_eq!(text.trim(), "No matching NEOs exist in the database.");
    }
}
