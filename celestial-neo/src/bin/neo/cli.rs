//! CLI argument definitions for neo

use celestial_neo::config::{DEFAULT_CAD_FILE, DEFAULT_NEO_FILE};
use celestial_neo::filters::Criteria;
use celestial_neo::{DataConfig, LinkPolicy};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "neo")]
#[command(about = "Explore near-Earth objects and their close approaches")]
#[command(version)]
pub struct Cli {
    /// CSV file of near-Earth objects
    #[arg(long, global = true, env = "NEO_NEOFILE", default_value = DEFAULT_NEO_FILE)]
    pub neofile: PathBuf,

    /// JSON file of close approaches
    #[arg(long, global = true, env = "NEO_CADFILE", default_value = DEFAULT_CAD_FILE)]
    pub cadfile: PathBuf,

    /// Fail if a close approach references an unknown designation
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log filter directive (e.g. "info", "celestial_neo=debug")
    #[arg(long, global = true, env = "NEO_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn data_config(&self) -> DataConfig {
        let policy = if self.strict {
            LinkPolicy::Strict
        } else {
            LinkPolicy::Lenient
        };
        DataConfig::default()
            .with_neo_file(&self.neofile)
            .with_cad_file(&self.cadfile)
            .with_link_policy(policy)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a single NEO by designation or name
    Inspect(InspectArgs),

    /// Find close approaches matching the given criteria
    Query(QueryArgs),
}

#[derive(Parser)]
#[command(group(ArgGroup::new("target").required(true).args(["pdes", "name"])))]
pub struct InspectArgs {
    /// Primary designation, matched exactly
    #[arg(short, long)]
    pub pdes: Option<String>,

    /// IAU name, matched exactly
    #[arg(short, long)]
    pub name: Option<String>,

    /// Also list every close approach of the NEO
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance, in au
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Maximum approach distance, in au
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Minimum relative velocity, in km/s
    #[arg(long)]
    pub min_velocity: Option<f64>,

    /// Maximum relative velocity, in km/s
    #[arg(long)]
    pub max_velocity: Option<f64>,

    /// Minimum NEO diameter, in km
    #[arg(long)]
    pub min_diameter: Option<f64>,

    /// Maximum NEO diameter, in km
    #[arg(long)]
    pub max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,

    /// Maximum number of results (0 = no limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Write results to a .csv or .json file instead of printing
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

impl QueryArgs {
    pub fn criteria(&self) -> Criteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Criteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
            ..Default::default()
        }
    }
}
