// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::io;
use std::process;

use anyhow::Result;
use tracing::Level;

use scales::catalog::{CatalogSession, JsonFileStore, ScaleCatalog};
use scales::cli::{parse_args, App, Invocation, USAGE};
use scales::config::Settings;
use scales::playback::select_player;
use scales::ScalesError;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(invocation: Invocation) -> Result<()> {
    if !invocation.command.needs_catalog() {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut settings = Settings::discover(invocation.options.config.as_deref())?;
    if let Some(data) = invocation.options.data {
        settings.data_path = data;
    }

    let defaults = if settings.extended_presets {
        ScaleCatalog::extended_defaults()
    } else {
        ScaleCatalog::factory_defaults()
    };
    let session = CatalogSession::open(JsonFileStore::new(&settings.data_path), defaults)?;
    let player = select_player(&settings.playback);

    let mut app = App::new(session, &settings, player);
    app.run(&invocation.command, &mut io::stdout().lock())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("[!] {}", err);
            eprintln!("Run with --help for usage information");
            process::exit(1);
        }
    };
    init_logging(invocation.options.verbose);

    if let Err(err) = run(invocation) {
        let fatal = err
            .downcast_ref::<ScalesError>()
            .map_or(false, ScalesError::is_fatal);
        eprintln!("[!] {}{:#}", if fatal { "FATAL ERROR: " } else { "" }, err);
        process::exit(1);
    }
}
