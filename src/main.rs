use std::fs::File;
use std::io;
use std::path::Path;
use std::process::exit;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use log::{error, info};

use fleet_dispatch::input::Input;
use fleet_dispatch::output::{write_schedule, ScheduleRecord};
use fleet_dispatch::schedule::{Scheduler, SchedulerConfig};
use fleet_dispatch::test::random_samples::{self, SampleConfig};

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    about = "Computes makespan-optimal pickup and delivery schedules for vehicle fleets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    #[command(about = "Compute the optimal schedule for a network, shipments and vehicles")]
    Solve(SolveArgs),

    #[command(about = "Compute the optimal schedule for a random instance")]
    RunRandom(RunRandomArgs),
}

#[derive(Args, Clone, Debug)]
struct SearchArgs {
    #[arg(
        long = "no-memo",
        help = "Do not reuse results of already solved states. Slow, for verification only."
    )]
    no_memo: bool,
}

impl SearchArgs {
    fn config(&self) -> SchedulerConfig {
        SchedulerConfig {
            memoize: !self.no_memo,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct SolveArgs {
    #[arg(
        short,
        long = "edges",
        default_value = "Edges.csv",
        help = "CSV file with columns [name, from, to, distance]. The name column is optional."
    )]
    edges_path: String,

    #[arg(
        short,
        long = "shipments",
        default_value = "Shipments.csv",
        help = "CSV file with columns [name, weight, from, to]."
    )]
    shipments_path: String,

    #[arg(
        short,
        long = "vehicles",
        default_value = "Vehicles.csv",
        help = "CSV file with columns [name, capacity, start]."
    )]
    vehicles_path: String,

    #[arg(
        short = 'o',
        long,
        help = "The file to write the schedule to. If not given, the schedule is written to stdout."
    )]
    out_filename: Option<String>,

    #[clap(flatten)]
    search_args: SearchArgs,
}

#[derive(Args, Clone, Debug)]
struct RunRandomArgs {
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 6)]
    nodes: usize,

    #[arg(long, help = "Edges added on top of a random spanning tree.", default_value_t = 3)]
    extra_edges: usize,

    #[arg(long, default_value_t = 3)]
    shipments: usize,

    #[arg(long, default_value_t = 2)]
    vehicles: usize,

    #[clap(flatten)]
    search_args: SearchArgs,
}

fn write_output(schedule: &[ScheduleRecord], out_filename: Option<&str>) {
    let result = match out_filename {
        Some(out_filename) => match File::create(out_filename) {
            Ok(file) => write_schedule(schedule, file),
            Err(err) => {
                error!("Could not create output file {}: {}", out_filename, err);
                exit(1);
            }
        },
        None => write_schedule(schedule, io::stdout().lock()),
    };
    result.unwrap_or_else(|it| {
        error!("Could not write schedule:\n{:#?}", it);
        exit(1);
    });
}

fn main_solve(args: &SolveArgs) {
    if let Some(out_filename) = &args.out_filename {
        if Path::new(out_filename).exists() {
            error!("Output file already exists: {}", out_filename);
            exit(1);
        }
    }

    let input = Input::read(&args.edges_path, &args.shipments_path, &args.vehicles_path)
        .unwrap_or_else(|it| {
            error!("Could not read input:\n{:#?}", it);
            exit(1);
        });
    info!("Number edges: {}", input.edges.len());
    info!("Number shipments: {}", input.shipments.len());
    info!("Number vehicles: {}", input.vehicles.len());

    let start = Instant::now();
    let mut scheduler = Scheduler::with_config(
        &input.edges,
        &input.shipments,
        &input.vehicles,
        args.search_args.config(),
    );
    info!("Number nodes: {}", scheduler.graph().num_nodes());
    let schedule = match scheduler.try_solve() {
        Ok(schedule) => schedule,
        Err(err) => {
            error!("No schedule found: {}", err);
            Vec::new()
        }
    };
    info!("Solved in {:?}", start.elapsed());

    write_output(&schedule, args.out_filename.as_deref());
}

fn main_run_random(args: &RunRandomArgs) {
    if args.nodes == 0 {
        error!("A random network needs at least one node");
        exit(1);
    }
    let config = SampleConfig {
        num_nodes: args.nodes,
        num_extra_edges: args.extra_edges,
        num_shipments: args.shipments,
        num_vehicles: args.vehicles,
        ..SampleConfig::default()
    };
    let schedule = random_samples::run(args.seed, &config, args.search_args.config());
    write_output(&schedule, None);
}

fn main() {
    env_logger::builder().parse_env("LOG").init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => main_solve(&args),
        Commands::RunRandom(args) => main_run_random(&args),
    }
}
