use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use model::raw_request::RawRequest;
use model::stage::StageContext;
use offline_proxy_event::config::Config;
use offline_proxy_event::event_builder::EventBuilder;
use offline_proxy_event::ids::UuidGenerator;
use offline_proxy_event::logging::Logging;
use serde::Deserialize;

/// A captured request and the stage it was received on.
#[derive(Deserialize, Debug)]
struct Input {
    request: RawRequest,
    stage: StageContext,
}

fn read_input(path: Option<String>) -> anyhow::Result<Input> {
    let raw = match path {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("Error reading input file {path}"))?
        }
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Error reading input from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("Input is not a valid captured request")
}

fn main() -> anyhow::Result<()> {
    let logging = Logging::init()?;

    let input = read_input(std::env::args().nth(1))?;
    let config = Config::load(&input.stage.stage).context("Could not load configuration")?;
    logging.set_verbose(config.verbose);

    tracing::info!(url = %input.request.url, stage = %input.stage.stage, "Execution started");

    let event = EventBuilder::new(&config, &UuidGenerator).build(&input.request, &input.stage);
    println!("{}", serde_json::to_string_pretty(&event)?);

    Ok(())
}
