use std::path::PathBuf;

use anyhow::Context;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use structopt::StructOpt;
use tspbb::{log::build_pace_logger_for_verbosity, prelude::*};

#[derive(Debug, StructOpt)]
enum Kind {
    /// Distances between points drawn uniformly from a square
    Euclidean {
        #[structopt(long, default_value = "1000")]
        side: f64,
    },
    /// Integral symmetric costs drawn uniformly from `[min, max)`
    Symmetric {
        #[structopt(long, default_value = "1")]
        min: u32,
        #[structopt(long, default_value = "100")]
        max: u32,
    },
    /// Integral costs drawn independently for both directions
    Asymmetric {
        #[structopt(long, default_value = "1")]
        min: u32,
        #[structopt(long, default_value = "100")]
        max: u32,
    },
}

impl Kind {
    fn check_parameters(&self) -> anyhow::Result<()> {
        match *self {
            Kind::Euclidean { side } => {
                anyhow::ensure!(
                    side.is_finite() && side > 0.0,
                    "side length must be positive and finite, got {side}"
                );
            }
            Kind::Symmetric { min, max } | Kind::Asymmetric { min, max } => {
                anyhow::ensure!(min < max, "empty cost range {min}..{max}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, StructOpt)]
struct Opt {
    /// Number of cities per instance
    #[structopt(short = "n", long, default_value = "10")]
    cities: NumCities,

    /// Number of instances to write
    #[structopt(short, long, default_value = "1")]
    repeats: usize,

    #[structopt(short, long, default_value = "1234")]
    seed: u64,

    /// Output directory; files are named `<prefix><n>_<index>.txt`
    #[structopt(short, long, default_value = ".", parse(from_os_str))]
    output: PathBuf,

    #[structopt(long, default_value = "random")]
    prefix: String,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,

    #[structopt(subcommand)]
    kind: Kind,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Warn, opt.verbose);

    anyhow::ensure!(opt.cities >= 2, "need at least two cities");
    opt.kind.check_parameters()?;

    let mut rng = Pcg64::seed_from_u64(opt.seed);
    std::fs::create_dir_all(&opt.output)
        .with_context(|| format!("Cannot create {}", opt.output.display()))?;

    for index in 0..opt.repeats {
        let matrix = match opt.kind {
            Kind::Euclidean { side } => CostMatrix::random_euclidean(&mut rng, opt.cities, side),
            Kind::Symmetric { min, max } => {
                CostMatrix::random_symmetric(&mut rng, opt.cities, min..max)
            }
            Kind::Asymmetric { min, max } => {
                CostMatrix::random_asymmetric(&mut rng, opt.cities, min..max)
            }
        };

        let path = opt
            .output
            .join(format!("{}{}_{index:>03}.txt", opt.prefix, opt.cities));
        matrix
            .try_write_matrix_file(&path)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        info!("Wrote {}", path.display());
        println!("{}", path.display());
    }

    Ok(())
}
