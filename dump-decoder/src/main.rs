use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use kurve_core::config::{LoggerConfig, ToolConfig};
use kurve_core::dump::{decode_text, render_to, ParseMode, TableStyle};
use kurve_core::scanmem::Scanmem;
use kurve_core::scenario::dump_program;
use kurve_core::{ArrayOrder, LayoutOverrides, MemoryLayout};

/// Shows where the players of the running game are and which way they head.
///
/// Reads scanmem output, e.g.
/// `sudo scanmem $(pgrep dosbox) -c 'option endianness 1;dump 0x7fffd8010ff6 72;exit' | dump-decoder`
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Captured scanmem output. Read from stdin when omitted.
    #[arg(short, long, conflicts_with = "pid")]
    input: Option<PathBuf>,

    /// Capture the dump from this process with scanmem
    #[arg(short, long)]
    pid: Option<u32>,

    /// Take every hex byte of the input, without waiting for the `> dump` line
    #[arg(long)]
    lenient: bool,

    /// Leave out the compass arrows
    #[arg(long)]
    plain: bool,

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
}

fn init_logger(config: &LoggerConfig) {
    env_logger::Builder::new()
        .filter_level(config.level_filter)
        .parse_default_env()
        .init();
}

fn read_input(args: &Args, config: &ToolConfig, layout: &MemoryLayout) -> Result<String> {
    if let Some(pid) = args.pid {
        let program = dump_program(layout);
        log::debug!("dump program: {}", program);
        let text = Scanmem::new(config.scanmem.clone())
            .capture(pid, &program)
            .with_context(|| format!("capturing dump of process {}", pid))?;
        return Ok(text);
    }

    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading input: {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .with_context(|| "reading stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ToolConfig::load_or_default(args.config.as_deref())
        .with_context(|| "loading config")?;
    init_logger(&config.logger_config);

    let overrides = LayoutOverrides {
        base_address: args.base_address,
        stride: args.stride,
        order: args.order,
    };
    let layout = overrides.apply(config.layout)?;

    let text = read_input(&args, &config, &layout)?;

    let mode = if args.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };
    let states = match decode_text(&text, mode, &layout) {
        Ok(states) => states,
        Err(err) => match err.user_message() {
            Some(message) => {
                println!("⚠️  {}", message);
                std::process::exit(1);
            }
            None => return Err(err.into()),
        },
    };

    let style = if args.plain {
        TableStyle::Plain
    } else {
        TableStyle::Arrows
    };
    render_to(&mut io::stdout().lock(), &states, style)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["dump-decoder", "--lenient", "--plain", "-i", "dump.txt"])
            .unwrap();
        assert!(args.lenient);
        assert!(args.plain);
        assert_eq!(args.input, Some(PathBuf::from("dump.txt")));

        // a dump comes either from a file or from a live process
        assert!(Args::try_parse_from(["dump-decoder", "-i", "dump.txt", "--pid", "42"]).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let path = std::env::temp_dir().join(format!("kurve-dump-{}.txt", std::process::id()));
        std::fs::write(&path, "> dump 0x0 72\n00 00 48 42\n").unwrap();

        let args = Args::try_parse_from(["dump-decoder", "-i", path.to_str().unwrap()]).unwrap();
        let config = ToolConfig::default();
        let text = read_input(&args, &config, &config.layout).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(text, "> dump 0x0 72\n00 00 48 42\n");
    }
}
