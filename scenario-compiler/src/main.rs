use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use kurve_core::config::{LoggerConfig, ToolConfig};
use kurve_core::scanmem::Scanmem;
use kurve_core::scenario::Scenario;
use kurve_core::{ArrayOrder, LayoutOverrides};

/// Puts the players of the running game where a scenario wants them.
///
/// scanmem usually needs root to attach: `sudo scenario-compiler --pid $(pgrep dosbox)`
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario file (toml). The built-in scenario is used when omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Tool configuration (toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address of the x-coordinate array, e.g. 0x7fffd8010ff6
    #[arg(long, value_parser = clap_num::maybe_hex::<u64>)]
    base_address: Option<u64>,

    /// Bytes between two player slots
    #[arg(long)]
    stride: Option<usize>,

    /// Order of the arrays in memory, e.g. x,y,direction
    #[arg(long)]
    order: Option<ArrayOrder>,

    /// Run the program with scanmem against this process
    #[arg(short, long)]
    pid: Option<u32>,

    /// Print the bare program without banners
    #[arg(short, long)]
    quiet: bool,
}

fn init_logger(config: &LoggerConfig) {
    env_logger::Builder::new()
        .filter_level(config.level_filter)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ToolConfig::load_or_default(args.config.as_deref())
        .with_context(|| "loading config")?;
    init_logger(&config.logger_config);

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario: {}", path.display()))?,
        None => Scenario::default(),
    };

    let overrides = LayoutOverrides {
        base_address: args.base_address,
        stride: args.stride,
        order: args.order,
    };
    let layout = overrides.apply(scenario.layout_over(config.layout)?)?;
    log::debug!("using {:?}", layout);

    let program = scenario.compile(&layout);
    if args.quiet {
        println!("{}", program);
    } else {
        println!("BEGIN scanmem program");
        println!();
        println!("     {}", program);
        println!();
        println!("END scanmem program");
        println!();
    }

    if let Some(pid) = args.pid {
        Scanmem::new(config.scanmem)
            .run(pid, &program)
            .with_context(|| format!("running scanmem against process {}", pid))?;
    }

    Ok(())
}
