use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;

use gravsim::{bench_gravity, bench_methods};
use gravsim::{Integrator, Method, NVec3, NewtonianGravity, Scenario, ScenarioConfig, Universe};

#[derive(Parser, Debug)]
#[command(version, about = "Batch N-body simulator: prints position snapshots to stdout")]
struct Args {
    /// Scenario file (YAML) with the universe definition at t = 0
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Override the integration method from the scenario file
    /// (euler | leapfrog | rk4 | ab4 | ab8 | abm4 | abm8)
    #[arg(short, long)]
    method: Option<String>,

    /// Center printed positions on the body with this index
    #[arg(short, long)]
    center: Option<usize>,

    /// Center printed positions on the system barycenter
    #[arg(long, conflicts_with = "center")]
    barycenter: bool,

    /// Run the timing sweeps instead of a simulation
    #[arg(long)]
    bench: bool,
}

fn load_scenario(path: &PathBuf) -> Result<ScenarioConfig> {
    let file =
        File::open(path).with_context(|| format!("cannot open scenario file {}", path.display()))?;
    let reader = BufReader::new(file);
    let cfg = serde_yaml::from_reader(reader)
        .with_context(|| format!("cannot parse scenario file {}", path.display()))?;
    Ok(cfg)
}

fn print_header(universe: &Universe) {
    print!("# time");
    for body in &universe.bodies {
        print!(" {0}_x {0}_y {0}_z", body.name);
    }
    println!();
}

fn print_step(time: f64, universe: &Universe, args: &Args) {
    let center = if args.barycenter {
        universe.barycenter().unwrap_or_else(NVec3::zeros)
    } else if let Some(index) = args.center {
        universe.bodies[index].position
    } else {
        NVec3::zeros()
    };

    print!("{time:.15e}");
    for body in &universe.bodies {
        let p = body.position - center;
        print!(" {:.15e} {:.15e} {:.15e}", p.x, p.y, p.z);
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity()?;
        bench_methods()?;
        return Ok(());
    }

    let Some(path) = &args.file else {
        bail!("a scenario file is required (see --help)");
    };
    let cfg = load_scenario(path)?;
    let mut scenario = Scenario::build(cfg)?;

    if let Some(name) = &args.method {
        // keep the scenario's force model, swap only the scheme
        let gravity = NewtonianGravity {
            g: scenario.parameters.g,
            min_separation: scenario.parameters.min_separation,
        };
        let method: Method = name.parse()?;
        scenario.integrator = Integrator::with_gravity(method, gravity);
    }

    if let Some(index) = args.center {
        if index >= scenario.universe.len() {
            bail!(
                "--center index {index} out of range, universe has {} bodies",
                scenario.universe.len()
            );
        }
    }

    print_header(&scenario.universe);
    let result = scenario.run(|time, universe| print_step(time, universe, &args));
    if let Err(error) = &result {
        warn!("simulation aborted: {error}");
    }
    result.context("simulation failed")
}
