//! flowpath CLI - longest flow path measurement on D8 direction rasters

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flowpath_algorithms::{dispatch, LfpAlgorithm};
use flowpath_core::io::{read_direction_raster, read_outlets, write_sources};
use flowpath_core::{CellLocation, FlowGrid};

const CELL_PRINT_LIMIT: usize = 8;

const ALGORITHM_HELP: &str = "available algorithms:
 1.  recursive (sequential)
 2.  recursive (task-based parallel)
 3.  top-down: maximum length (sequential)
 4.  top-down: single update (sequential)
 5.  top-down: single update (parallel)
 6.  double drop (sequential)
 7.  double drop (parallel)";

#[derive(Parser)]
#[command(name = "flowpath")]
#[command(author, version, about = "Longest flow path on a D8 flow direction raster")]
#[command(after_help = ALGORITHM_HELP)]
struct Cli {
    /// Flow direction raster (GeoTIFF, D8 codes 1,2,4,8,16,32,64,128)
    direction_file: PathBuf,

    /// Outlet location file (row, column and label per line, one-based)
    outlet_file: PathBuf,

    /// Algorithm index (1-7)
    algorithm_index: i64,

    /// Output CSV file for the source locations
    output_file: PathBuf,

    /// Algorithm parameter (task-based recursive: task creation limit,
    /// top-down: 1 for all outlets, default: only first outlet)
    #[arg(default_value = "0")]
    algorithm_parameter: i64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn print_one_based(label: &str, cells: &[(i64, i64)]) {
    println!("number of {} locations: {}", label, cells.len());

    for &(row, col) in cells.iter().take(CELL_PRINT_LIMIT) {
        println!("- row {}, column {}", row, col);
    }
    if cells.len() > CELL_PRINT_LIMIT {
        println!("- ...");
    }
}

fn print_cells(label: &str, cells: &[CellLocation]) {
    let one_based: Vec<(i64, i64)> = cells
        .iter()
        .map(|cell| {
            let (row, col) = cell.one_based();
            (row as i64, col as i64)
        })
        .collect();
    print_one_based(label, &one_based);
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == clap::error::ErrorKind::MissingRequiredArgument => {
            // Too few arguments: show the full usage including the
            // algorithm listing, as the measurement workflow expects.
            Cli::command().print_help().ok();
            std::process::exit(2);
        }
        Err(err) => err.exit(),
    };
    setup_logging(cli.verbose);

    let algorithm = LfpAlgorithm::from_index(cli.algorithm_index)?;

    info!("loading flow direction file ({})", cli.direction_file.display());
    let pb = spinner("Reading raster...");
    let raster = read_direction_raster(&cli.direction_file)
        .context("Failed to read flow direction raster")?;
    pb.finish_and_clear();
    let grid = FlowGrid::new(raster);
    info!(
        "flow direction data: {} rows, {} columns",
        grid.rows(),
        grid.cols()
    );

    info!("loading outlet file ({})", cli.outlet_file.display());
    let outlets = read_outlets(&cli.outlet_file).context("Failed to read outlet file")?;

    info!("executing {} algorithm...", algorithm.label());

    let multiple = cli.algorithm_parameter != 0 && algorithm.supports_multiple();
    if multiple {
        print_one_based("outlet", &outlets);
    } else if let Some(&(row, col)) = outlets.first() {
        println!("outlet location: row {}, column {}", row, col);
    }

    let report = dispatch(
        &grid,
        &outlets,
        cli.algorithm_index,
        cli.algorithm_parameter,
    )?;

    if report.multiple {
        print_cells("source", &report.sources);
    } else {
        let (row, col) = report.sources[0].one_based();
        println!("source location: row {}, column {}", row, col);
    }
    println!("execution time (ms): {}", report.elapsed.as_millis());

    write_sources(&cli.output_file, &report.sources).context("Failed to write output file")?;
    info!("sources saved to {}", cli.output_file.display());

    Ok(())
}
