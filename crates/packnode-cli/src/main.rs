use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use packnode_cli::{YamlConfig, load_requests, parse_on_failure, parse_sort_order};
use packnode_core::config::{FailurePolicy, SortOrder};
use packnode_core::{
    PackerConfig, Request, Size, pack_with_tree, to_json_array, to_json_hash, tree_to_json,
};
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "packnode",
    about = "Place rectangles on a fixed-size canvas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack a list of rectangles and export their placements
    Pack(PackArgs),
    /// Simple timing bench on seeded random rectangles (prints time + occupancy)
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Request list: .json / .yaml / .yml ([{key, w, h}]) or text lines "key WxH"
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output file for the layout JSON (stdout when omitted)
    #[arg(short, long, help_heading = "Input/Output")]
    out: Option<PathBuf>,
    /// YAML config file path (overrides canvas/order options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Layout
    /// Canvas size as w,h or w:h or wxh
    #[arg(short, long, default_value = "1024x1024", help_heading = "Layout")]
    size: Size,
    /// Sort order: area_asc|area_desc|none
    #[arg(long, default_value = "area_asc", help_heading = "Layout")]
    sort_order: String,
    /// Pack largest rectangles first (same as --sort-order area_desc)
    #[arg(short, long, default_value_t = false, help_heading = "Layout")]
    largest_first: bool,
    /// What to do with a rectangle that does not fit: abort | skip
    #[arg(long, default_value = "abort", help_heading = "Layout")]
    on_failure: String,

    // Export
    /// Metadata format: json-array | json (alias) | json-hash
    #[arg(long, default_value = "json-array", help_heading = "Export")]
    metadata: String,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Dump the pack tree (nodes + placements, JSON) to this file
    #[arg(long, help_heading = "Export")]
    dump_tree: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Number of random rectangles
    #[arg(long, default_value_t = 1000)]
    count: usize,
    /// Smallest side length
    #[arg(long, default_value_t = 4)]
    min: u32,
    /// Largest side length
    #[arg(long, default_value_t = 64)]
    max: u32,
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Canvas size as w,h or w:h or wxh
    #[arg(long, default_value = "2048x2048")]
    size: Size,
    /// Sort order: area_asc|area_desc|none
    #[arg(long, default_value = "area_desc")]
    sort_order: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Bench(b) => run_bench(b),
    }
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let mut base = PackerConfig {
        width: cli.size.w,
        height: cli.size.h,
        sort_order: parse_sort_order(&cli.sort_order)?,
        on_failure: parse_on_failure(&cli.on_failure)?,
    };
    if cli.largest_first {
        base.sort_order = SortOrder::AreaDesc;
    }

    // Config file values win over CLI flags
    let cfg = if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y = YamlConfig::from_yaml(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_packer_config(base)?
    } else {
        base
    };

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let requests = load_requests(&cli.input)?;
    info!(count = requests.len(), input = %cli.input.display(), "loaded requests");

    let (layout, packer) = pack_with_tree(requests, cfg.clone())
        .with_context(|| format!("pack onto {}x{} canvas", cfg.width, cfg.height))?;

    let stats = layout.stats();
    info!("{}", stats.summary());
    for r in &layout.unplaced {
        warn!(key = %r.key, w = r.w, h = r.h, "did not fit");
    }

    if cli.dry_run {
        return Ok(());
    }

    let value = match cli.metadata.to_ascii_lowercase().as_str() {
        "json-array" | "json" => to_json_array(&layout),
        "json-hash" => to_json_hash(&layout),
        other => anyhow::bail!("unknown metadata format: {}", other),
    };
    let json = serde_json::to_string_pretty(&value)?;
    match &cli.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote layout");
        }
        None => println!("{}", json),
    }

    if let Some(stats_path) = &cli.export_stats {
        fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
    }
    if let Some(tree_path) = &cli.dump_tree {
        let dump = serde_json::to_string_pretty(&tree_to_json(&packer))?;
        fs::write(tree_path, dump).with_context(|| format!("write {}", tree_path.display()))?;
        debug!(nodes = packer.nodes().len(), "wrote tree dump");
    }
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    if b.min == 0 || b.min > b.max {
        anyhow::bail!("invalid side range {}..={}", b.min, b.max);
    }
    let mut rng = rand::rngs::StdRng::seed_from_u64(b.seed);
    let requests: Vec<Request<String>> = (0..b.count)
        .map(|i| {
            let w = rng.gen_range(b.min..=b.max);
            let h = rng.gen_range(b.min..=b.max);
            Request::new(format!("rect_{}", i), w, h)
        })
        .collect();
    let cfg = PackerConfig::builder()
        .with_canvas(b.size.w, b.size.h)
        .sort_order(parse_sort_order(&b.sort_order)?)
        .on_failure(FailurePolicy::Skip)
        .build();

    let start = Instant::now();
    let (layout, packer) = pack_with_tree(requests, cfg)?;
    let dur = start.elapsed();
    let stats = layout.stats();
    println!(
        "placed={}/{} occupancy={:.2}% nodes={} time={}",
        stats.num_placed,
        stats.num_requests,
        stats.occupancy * 100.0,
        packer.nodes().len(),
        bench_fmt_dur(dur)
    );
    Ok(())
}

fn bench_fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
