#[macro_use]
extern crate diesel;

use std::process;

use clap::Parser;
use log::{error, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::data::import;
use crate::data::source;
use crate::db::establish_connection;
use crate::error::AppError;
use crate::geocode::MapboxResolver;

mod cli;
mod config;
mod data;
mod db;
mod error;
mod geocode;

#[cfg(test)]
mod test_support;

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let resolver = MapboxResolver::new(&config.geocoder)?;

    info!("Reading shelters from {}", cli.input.display());
    let rows = source::open(&cli.input, cli.format)?;

    let mut conn = establish_connection(&config.database_url)?;
    import::run(rows, &mut conn, &resolver, &cli.import_options())?;

    Ok(())
}
