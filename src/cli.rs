// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Command-line front end.
//!
//! Parses arguments into a [`Command`] and runs it against an open
//! catalog session, writing user-facing output to any writer.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{CatalogSession, CatalogStore};
use crate::config::Settings;
use crate::music::{parse_targets, rank, resolve_key, Pitch, Scale};
use crate::playback::TonePlayer;

/// Usage text
pub const USAGE: &str = "\
SCALES - Display, listen to, and manage a set of musical scales

Usage: scales [OPTIONS] <COMMAND> [ARGS]

Commands:
  list [KEY]                List all saved scales rooted on KEY (default C)
  scale <NAME> [KEY]        Display scale NAME rooted on KEY
  random [KEY]              Display a random scale rooted on KEY
  find <NOTES> [KEY]        Rank scales on KEY by how many of NOTES (e.g. E-G-Bb) they contain
  play <NAME> [KEY]         Display and play scale NAME rooted on KEY
  add <NAME> <VALUES>       Add a scale; VALUES are semitone steps separated by '-' (e.g. 2-2-1-2-2-2-1)
  edit <NAME> <VALUES>      Replace the steps of scale NAME
  remove <NAME>             Remove scale NAME
  restore-data              Restore the scale data to factory settings
  help                      Show this help message

Options:
  --data <PATH>             Scale data file (overrides settings and $SCALES_DATA)
  --config <PATH>           Settings file (default $SCALES_CONFIG or ./scales.toml)
  -v, --verbose             Debug logging on stderr
  -h, --help                Show this help message";

/// Options that apply to every command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    /// Catalog file override
    pub data: Option<PathBuf>,
    /// Settings file override
    pub config: Option<PathBuf>,
    /// Debug logging
    pub verbose: bool,
}

/// One user command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List { key: Option<String> },
    Show { name: String, key: Option<String> },
    Random { key: Option<String> },
    Find { notes: String, key: Option<String> },
    Play { name: String, key: Option<String> },
    Add { name: String, values: String },
    Edit { name: String, values: String },
    Remove { name: String },
    RestoreData,
    Help,
}

impl Command {
    /// Commands that never touch the catalog
    pub fn needs_catalog(&self) -> bool {
        !matches!(self, Command::Help)
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub options: GlobalOptions,
    pub command: Command,
}

/// Parse arguments, excluding the program name
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut options = GlobalOptions::default();
    let mut rest = args;

    while let Some(first) = rest.first() {
        match first.as_str() {
            "--data" | "--config" => {
                let value = rest
                    .get(1)
                    .ok_or_else(|| anyhow!("{} requires a path", first))?;
                let path = Some(PathBuf::from(value));
                if first == "--data" {
                    options.data = path;
                } else {
                    options.config = path;
                }
                rest = &rest[2..];
            }
            "-v" | "--verbose" => {
                options.verbose = true;
                rest = &rest[1..];
            }
            _ => break,
        }
    }

    let Some((name, params)) = rest.split_first() else {
        return Ok(Invocation {
            options,
            command: Command::Help,
        });
    };

    let arg = |i: usize, what: &str| -> Result<String> {
        params
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow!("'{}' requires {}", name, what))
    };
    let optional = |i: usize| params.get(i).cloned();

    let (command, max_params) = match name.as_str() {
        "list" => (Command::List { key: optional(0) }, 1),
        "scale" => (
            Command::Show {
                name: arg(0, "a scale name")?,
                key: optional(1),
            },
            2,
        ),
        "random" => (Command::Random { key: optional(0) }, 1),
        "find" => (
            Command::Find {
                notes: arg(0, "a list of notes")?,
                key: optional(1),
            },
            2,
        ),
        "play" => (
            Command::Play {
                name: arg(0, "a scale name")?,
                key: optional(1),
            },
            2,
        ),
        "add" => (
            Command::Add {
                name: arg(0, "a scale name")?,
                values: arg(1, "scale values")?,
            },
            2,
        ),
        "edit" => (
            Command::Edit {
                name: arg(0, "a scale name")?,
                values: arg(1, "scale values")?,
            },
            2,
        ),
        "remove" => (
            Command::Remove {
                name: arg(0, "a scale name")?,
            },
            1,
        ),
        "restore-data" => (Command::RestoreData, 0),
        "help" | "--help" | "-h" => (Command::Help, usize::MAX),
        other => bail!("Unknown command: {}", other),
    };

    if params.len() > max_params {
        bail!("Too many arguments for '{}'", name);
    }

    Ok(Invocation { options, command })
}

/// Runs commands against one catalog session
pub struct App<S: CatalogStore> {
    session: CatalogSession<S>,
    default_key: String,
    player: Box<dyn TonePlayer>,
    rng: StdRng,
}

impl<S: CatalogStore> App<S> {
    /// Create an app over an open session
    pub fn new(session: CatalogSession<S>, settings: &Settings, player: Box<dyn TonePlayer>) -> Self {
        Self {
            session,
            default_key: settings.default_key.clone(),
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for the random command
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Resolve an optional key argument; returns the display label and pitch
    fn key(&self, key: &Option<String>) -> Result<(String, Pitch)> {
        let text = key.as_deref().unwrap_or(&self.default_key);
        let pitch = resolve_key(text)?;
        Ok((text.to_uppercase(), pitch))
    }

    /// Run one command
    pub fn run(&mut self, command: &Command, out: &mut dyn Write) -> Result<()> {
        match command {
            Command::List { key } => {
                let (label, root) = self.key(key)?;
                let catalog = self.session.catalog();
                writeln!(out, "[*] Listing {} scales:", catalog.len())?;
                for entry in catalog.iter() {
                    writeln!(
                        out,
                        "Scale: \"{}\" - Values: \"{}\" - Example ({}) - {}",
                        entry.name,
                        entry.intervals,
                        label,
                        entry.realize(root)
                    )?;
                }
            }
            Command::Show { name, key } => {
                let entry = self.session.catalog().get(name)?;
                let (label, root) = self.key(key)?;
                write_scale(out, &entry.name, &label, &entry.realize(root))?;
            }
            Command::Random { key } => {
                let (label, root) = self.key(key)?;
                let entry = self.session.catalog().choose(&mut self.rng)?;
                write_scale(out, &entry.name, &label, &entry.realize(root))?;
            }
            Command::Find { notes, key } => {
                let targets = parse_targets(notes)?;
                let (label, root) = self.key(key)?;
                let wanted: Vec<String> = targets.iter().map(Pitch::to_string).collect();
                writeln!(
                    out,
                    "[*] Scales in \"{}\" ranked by notes matched from {}:",
                    label,
                    wanted.join("-")
                )?;
                for m in rank(root, &targets, self.session.catalog()) {
                    writeln!(
                        out,
                        "{}/{} \"{}\" : {}",
                        m.count(),
                        targets.len(),
                        m.name,
                        m.scale
                    )?;
                }
            }
            Command::Play { name, key } => {
                let entry = self.session.catalog().get(name)?;
                let (label, root) = self.key(key)?;
                let scale = entry.realize(root);
                write_scale(out, &entry.name, &label, &scale)?;
                out.flush()?;
                self.player.play(&scale)?;
            }
            Command::Add { name, values } => {
                let intervals = self.session.add(name, values)?;
                writeln!(out, "[*] Added scale: \"{}\" with values: {}", name, intervals)?;
            }
            Command::Edit { name, values } => {
                let intervals = self.session.edit(name, values)?;
                writeln!(out, "[*] Edited scale: \"{}\" with values: {}", name, intervals)?;
            }
            Command::Remove { name } => {
                self.session.remove(name)?;
                writeln!(out, "[*] Removed scale: \"{}\"", name)?;
            }
            Command::RestoreData => {
                self.session.restore_defaults()?;
                writeln!(out, "[*] Restored data to factory settings.")?;
            }
            Command::Help => writeln!(out, "{}", USAGE)?,
        }
        Ok(())
    }
}

fn write_scale(out: &mut dyn Write, name: &str, label: &str, scale: &Scale) -> Result<()> {
    writeln!(out, "\"{}\" scale in \"{}\" : {}", name, label, scale)?;
    Ok(())
}
