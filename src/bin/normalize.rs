// src/bin/normalize.rs
use color_eyre::eyre::{Result, WrapErr};
use namus_scrape::{config::options::NormalizeOptions, log, normalize};

fn main() -> Result<()> {
    color_eyre::install()?;
    log::init();

    let opts = NormalizeOptions::from_env().wrap_err("Invalid normalizer configuration")?;
    normalize::run(&opts)
        .wrap_err_with(|| format!("Failed to write {}", opts.out_file.display()))?;
    Ok(())
}
