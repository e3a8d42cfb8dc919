use std::{
    io::{BufReader, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use log::{LevelFilter, info};
use structopt::StructOpt;
use tspbb::{log::build_pace_logger_for_verbosity, prelude::*};

#[derive(Debug, StructOpt)]
#[structopt(about = "Exact travelling salesperson tours by depth-first branch and bound")]
struct Opts {
    /// Path of the instance; read from stdin if neither this nor `--name` is given
    #[structopt(short, long, parse(from_os_str))]
    instance: Option<PathBuf>,

    /// Instance name, looked up as `<dir>/<name>.txt`
    #[structopt(short, long, conflicts_with = "instance")]
    name: Option<String>,

    /// Directory searched for `--name`
    #[structopt(long, default_value = "./tests_tsp/", parse(from_os_str))]
    dir: PathBuf,

    /// Do not append `.txt` to `--name`
    #[structopt(long)]
    no_suffix: bool,

    /// Strategies to run (exhaustive, partial-cost, mst); all of them by default
    #[structopt(short, long)]
    strategy: Vec<Strategy>,

    /// Print a JSON report instead of the text blocks
    #[structopt(long)]
    json: bool,

    /// Echo the cost matrix
    #[structopt(long)]
    print_matrix: bool,

    /// Print the sorted edge list used by the spanning tree estimate
    #[structopt(long)]
    print_edges: bool,

    /// Stop each search after this many seconds
    #[structopt(short = "T", long)]
    timeout: Option<f64>,

    /// Disable the doubled spanning tree ceiling of the mst strategy
    #[structopt(long)]
    no_ceiling: bool,

    /// Split the search over the rayon pool (needs the `par` feature)
    #[structopt(long)]
    parallel: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

impl Opts {
    fn instance_label(&self) -> String {
        match (&self.instance, &self.name) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => String::from("<stdin>"),
        }
    }

    fn search_options(&self) -> anyhow::Result<SearchOptions> {
        let timeout = self
            .timeout
            .map(Duration::try_from_secs_f64)
            .transpose()
            .context("Invalid timeout")?;

        Ok(SearchOptions {
            use_mst_ceiling: !self.no_ceiling,
            timeout,
            parallel: self.parallel,
        })
    }
}

fn load_matrix(opts: &Opts) -> anyhow::Result<CostMatrix> {
    let path = match (&opts.instance, &opts.name) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(name)) => Some(resolve_instance_path(&opts.dir, name, !opts.no_suffix)),
        (None, None) => None,
    };

    if let Some(path) = path {
        info!("Read instance {}", path.display());
        CostMatrix::try_read_matrix_file(&path)
            .with_context(|| format!("Unable to open input file: {}", path.display()))
    } else {
        let stdin = std::io::stdin().lock();
        Ok(CostMatrix::try_read_matrix(BufReader::new(stdin))?)
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Warn, opts.verbose);
    signal_handling::initialize();

    let matrix = load_matrix(&opts)?;
    let options = opts.search_options()?;
    let strategies = if opts.strategy.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        opts.strategy.clone()
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !opts.json {
        writeln!(out, "the number of cities: {}", matrix.number_of_cities())?;
        if opts.print_matrix {
            write_matrix_echo(&matrix, &mut out)?;
        }
        if opts.print_edges {
            write_edge_list(&EdgeList::sorted_upper_triangle(&matrix), &mut out)?;
        }
    }

    let mut outcomes = Vec::with_capacity(strategies.len());
    for (i, &strategy) in strategies.iter().enumerate() {
        if signal_handling::received_ctrl_c() {
            break;
        }

        let outcome = solve(&matrix, strategy, &options)?;
        if !opts.json {
            if i > 0 {
                writeln!(out)?;
            }
            write_outcome(&outcome, &mut out)?;
        }
        outcomes.push(outcome);
    }

    if opts.json {
        JsonReport {
            instance: &opts.instance_label(),
            number_of_cities: matrix.number_of_cities(),
            outcomes: &outcomes,
        }
        .try_write(&mut out)?;
    }

    out.flush()?;
    Ok(())
}
