//! # Compact Info Application Entry Point
//!
//! Runs the watchface against a simulated platform: minute ticks from the
//! current local time, a slowly draining battery, and a companion answering
//! weather requests from weatherapi.com (or its cache).
//!
//! ```text
//! compact-info [--stdout] [--minutes N] [--battery P] [--config PATH]
//! ```
//!
//! - `--stdout`: print the final frame as ASCII art instead of a text summary
//! - `--minutes`: number of minute ticks to simulate (default 0)
//! - `--battery`: starting charge in percent (default 100)
//! - `--config`: configuration file (default `compact-config.toml`)

// Test modules
#[cfg(test)]
mod tests;

mod sim;

use std::env;

use anyhow::{bail, Context};
use chrono::Local;
use log::{info, warn};

use compact_info_lib::{
    companion,
    config::Config,
    message::AppMessage,
    renderer::{draw_ascii, text_summary},
};

use crate::sim::Simulation;

#[derive(Debug, PartialEq, Eq)]
struct Options {
    stdout: bool,
    minutes: u32,
    battery: u8,
    config: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            stdout: false,
            minutes: 0,
            battery: 100,
            config: None,
        }
    }
}

fn parse_args<I>(args: I) -> anyhow::Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => options.stdout = true,
            "--minutes" => {
                let value = args.next().context("--minutes needs a value")?;
                options.minutes = value
                    .parse()
                    .with_context(|| format!("invalid minute count {:?}", value))?;
            }
            "--battery" => {
                let value = args.next().context("--battery needs a value")?;
                let percent: u8 = value
                    .parse()
                    .with_context(|| format!("invalid battery percentage {:?}", value))?;
                options.battery = percent.min(100);
            }
            "--config" => {
                options.config = Some(args.next().context("--config needs a path")?);
            }
            other => bail!("unknown argument {:?}", other),
        }
    }

    Ok(options)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = parse_args(env::args().skip(1))?;
    let config = match &options.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    // Create Tokio runtime for the companion's HTTP requests
    let rt = tokio::runtime::Runtime::new()?;

    let fetch_weather = |celsius: bool| -> Option<AppMessage> {
        match rt.block_on(companion::fetch(&config.companion, celsius)) {
            Ok(report) => Some(report.to_message()),
            Err(error) => {
                // Weather stays on "Loading..." rather than failing the run
                warn!("Weather fetch failed: {}", error);
                None
            }
        }
    };

    let start = Local::now().naive_local();
    let mut simulation = Simulation::new(&config, start, options.battery);
    simulation.run(options.minutes, fetch_weather);
    info!(
        "Simulated {} minute(s), {} redraw(s)",
        options.minutes,
        simulation.host().redraws()
    );

    if options.stdout {
        draw_ascii(simulation.state())?;
    } else {
        println!("{}", text_summary(simulation.state()));
    }

    simulation.shutdown();
    Ok(())
}
