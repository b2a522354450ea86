use std::path::PathBuf;

use clap::Parser;
use elapsed::measure_time;
use itertools::Itertools;
use log::{debug, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use ctt_sat_core::oracle::{self, Outcome};
use ctt_sat_core::solver::VarisatSolver;
use ctt_timetable::{encode, EncodeConfig, Instance, Mode, VarKey, Weights};

use crate::output::write_formula;

mod output;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Encode ITC2007 curriculum-based timetabling instances as SAT / MaxSAT")]
struct Cli {
    /// ITC2007 `.ctt` instance
    #[clap(parse(from_os_str), value_name = "FILE")]
    instance: PathBuf,

    /// Encoding mode: strict (3), isolation (4.1), working-days (4.2), complete (4.4)
    #[clap(short, long, default_value = "complete")]
    mode: Mode,

    /// Write the formula to this file (DIMACS, or WCNF when weighted)
    #[clap(short, long, parse(from_os_str), value_name = "PATH")]
    output: Option<PathBuf>,

    /// Solve the formula with the built-in oracle
    #[clap(long)]
    solve: bool,

    /// Weight of an isolated curriculum lecture
    #[clap(long, default_value_t = 2)]
    isolation_weight: u64,

    /// Weight of each missing working day
    #[clap(long, default_value_t = 5)]
    working_days_weight: u64,

    /// Weight of each additional room
    #[clap(long, default_value_t = 1)]
    stability_weight: u64,

    /// Weight of each student above the room capacity
    #[clap(long, default_value_t = 1)]
    capacity_weight: u64,

    /// Log level
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn config(&self) -> EncodeConfig {
        EncodeConfig {
            mode: self.mode,
            weights: Weights {
                isolation: self.isolation_weight,
                working_days: self.working_days_weight,
                stability: self.stability_weight,
                capacity: self.capacity_weight,
            },
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    TermLogger::init(args.log_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    debug!("args = {:?}", args);

    let (elapsed_parse, instance) = measure_time(|| Instance::from_file(&args.instance));
    let instance = instance?;
    info!(
        "Instance '{}': {} courses ({} lectures), {} rooms, {} curricula, {} days x {} periods, {} unavailabilities, parsed in {}",
        instance.name,
        instance.courses.len(),
        instance.total_lectures(),
        instance.rooms.len(),
        instance.curricula.len(),
        instance.num_days,
        instance.periods_per_day,
        instance.unavailabilities.len(),
        elapsed_parse
    );

    let config = args.config();
    let (elapsed_encode, encoded) = measure_time(|| encode(&instance, &config));
    let encoded = encoded?;
    let formula = &encoded.formula;
    info!(
        "Mode {}: {} variables, {} hard clauses, {} soft clauses (total weight {}), encoded in {}",
        config.mode,
        formula.num_vars,
        formula.hard.len(),
        formula.soft.len(),
        formula.total_soft_weight(),
        elapsed_encode
    );

    if let Some(path) = &args.output {
        write_formula(path, formula)?;
    }

    if args.solve {
        let mut solver = VarisatSolver::new();
        info!("Solving with {}...", solver);
        let (elapsed_solve, outcome) = measure_time(|| oracle::solve(&mut solver, formula));
        if let Outcome::Optimal { model, .. } = &outcome {
            let lectures = model
                .true_vars()
                .filter(|&lit| matches!(encoded.pool.key(lit), Some(VarKey::Ch(..))))
                .count();
            debug!("Model schedules {} lectures", lectures);
        }

        println!("instance: {}", instance.name);
        println!("mode:     {} ({})", config.mode, config.mode.section());
        println!("status:   {}", outcome);
        if let Some(cost) = outcome.cost() {
            println!("cost:     {}", cost);
        }
        println!(
            "times:    {}",
            [
                ("parse", elapsed_parse.to_string()),
                ("encode", elapsed_encode.to_string()),
                ("solve", elapsed_solve.to_string()),
            ]
            .iter()
            .map(|(name, time)| format!("{} {}", name, time))
            .join(", ")
        );
    }

    Ok(())
}
