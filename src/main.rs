use clap::{CommandFactory, Parser};
use iptool::{cli, Error};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::process;

const EXAMPLES: &str = "Examples:
  iptool 1.0.0.0
  iptool 16777216
  iptool 1.0.0.0/24
  iptool 1.0.0.0 1.1.0.0
  iptool 1.0.0.1-255
  iptool 1.0.0.0-1.0.0.255
  iptool 1.0.0.0 255.255.255.0";

/// Convert between IP ranges, CIDR prefixes, masks and integers.
#[derive(Parser)]
#[command(name = "iptool", version, after_help = EXAMPLES)]
struct Opts {
    /// Log why each conversion was skipped
    #[arg(long)]
    debug: bool,

    /// An address, prefix, range or integer; or two of them
    args: Vec<String>,
}

fn init_logging(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {M} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    if let Err(e) = init_logging(opts.debug) {
        eprintln!("Error initializing log4rs: {}", e);
    }
    log::debug!("args: {:?}", opts.args);

    match cli::run(opts.args.as_slice()) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(Error::Usage) => {
            if let Err(e) = Opts::command().print_help() {
                log::warn!("cannot print help: {}", e);
            }
            process::exit(2);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
