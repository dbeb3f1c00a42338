// src/bin/collect.rs
use color_eyre::eyre::{Result, WrapErr};
use namus_scrape::{
    collect,
    config::options::CollectOptions,
    core::net::Api,
    log,
    progress::LogProgress,
};

fn main() -> Result<()> {
    color_eyre::install()?;
    log::init();

    let opts = CollectOptions::from_env().wrap_err("Invalid collector configuration")?;
    let api = Api::new(&opts.api_base, &opts.user_agent)?;
    let mut progress = LogProgress::new(opts.feedback_interval);

    collect::run(&api, &opts, &mut progress).wrap_err("Error fetching regions list")?;
    tracing::info!("Master scrape completed.");
    Ok(())
}
