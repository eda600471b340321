//! Command-line grid router.
//!
//! Run: cargo run --bin gridroute -- --width 40 --height 20 --density 0.3
//!      cargo run --bin gridroute -- --map maze.txt --movement cardinal

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use wayfind_demos::{DemoError, HeuristicKind, ObstacleMap, route};
use wayfind_paths::{Movement, SearchOptions, analyze_heuristic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MovementArg {
    Cardinal,
    Octile,
}

impl From<MovementArg> for Movement {
    fn from(m: MovementArg) -> Self {
        match m {
            MovementArg::Cardinal => Movement::Cardinal,
            MovementArg::Octile => Movement::Octile,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gridroute")]
#[command(about = "Find a shortest route across an obstacle grid with A*")]
struct Args {
    /// ASCII map file: `#` wall, `.` floor, `S` start, `G` goal.
    #[arg(short = 'm', long = "map", value_name = "FILE")]
    map: Option<PathBuf>,

    /// Width of a generated map.
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Height of a generated map.
    #[arg(long, default_value_t = 20)]
    height: i32,

    /// Share of walled cells in a generated map.
    #[arg(long, default_value_t = 0.25)]
    density: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = MovementArg::Octile)]
    movement: MovementArg,

    #[arg(long = "heuristic", value_enum, default_value_t = HeuristicKind::Octile)]
    heuristic: HeuristicKind,

    /// Inflate the heuristic; above 1 trades optimality for speed.
    #[arg(short = 'w', long, default_value_t = 1.0)]
    weight: f64,

    /// Stop after this many expansions.
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Stop after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Cap the closed set, evicting the highest-cost vertices.
    #[arg(long)]
    max_closed: Option<usize>,

    /// Re-expand closed vertices reached by a cheaper path.
    #[arg(long)]
    reopen: bool,

    /// Check the heuristic against true distances before searching.
    #[arg(long)]
    analyze: bool,
}

impl Args {
    fn options(&self) -> SearchOptions {
        let mut opts = SearchOptions::default().with_reopen_closed(self.reopen);
        if let Some(n) = self.max_nodes {
            opts = opts.with_max_nodes(n);
        }
        if let Some(ms) = self.timeout_ms {
            opts = opts.with_timeout(Duration::from_millis(ms));
        }
        if let Some(n) = self.max_closed {
            opts = opts.with_max_closed(n);
        }
        opts
    }

    fn load_map(&self) -> Result<ObstacleMap, Box<dyn std::error::Error>> {
        match &self.map {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(ObstacleMap::parse(&text)?)
            }
            None => Ok(ObstacleMap::random(
                self.width,
                self.height,
                self.density,
                self.seed,
            )?),
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let map = args.load_map()?;
    let grid = map.build(args.movement.into())?;
    let heuristic = args.heuristic.over(&grid, args.weight);
    log::info!(
        "{}x{} map, {} open cells, {} edges",
        map.width,
        map.height,
        grid.open_cells(),
        grid.graph().edge_count()
    );

    if args.analyze {
        let report = analyze_heuristic(grid.graph(), heuristic.as_ref());
        println!(
            "heuristic {:?} x{}: admissible={} consistent={} mae={:.4} worst_over={:.4}",
            args.heuristic,
            args.weight,
            report.admissible,
            report.consistent,
            report.mean_absolute_error,
            report.worst_overestimate
        );
    }

    let route = route(&map, &grid, heuristic.as_ref(), &args.options())?;
    print!("{}", map.render(&route.cells));

    let res = &route.result;
    if res.found {
        println!("cost:     {:.4}", res.cost);
        println!("length:   {}", res.path.len());
    } else {
        println!("no route: {}", res.termination);
    }
    println!("explored: {}", res.nodes_explored);
    println!(
        "pushes:   {} (stale {}, reopened {}, evicted {}, peak open {})",
        res.stats.pushes,
        res.stats.stale_pops,
        res.stats.reopened,
        res.stats.evictions,
        res.stats.peak_open
    );
    println!("optimal:  {}", res.optimality_guaranteed);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        if let Some(DemoError::MissingEndpoint(_)) = e.downcast_ref::<DemoError>() {
            eprintln!("Error: {e} (mark it with S or G in the map)");
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
