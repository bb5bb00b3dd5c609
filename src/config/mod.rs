// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings for the scales tool.
//!
//! Settings come from an optional TOML file. Every field has a default,
//! so an empty or absent file is valid.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "SCALES_CONFIG";
/// Environment variable naming the catalog data file
pub const DATA_ENV: &str = "SCALES_DATA";
/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "scales.toml";
/// Catalog data file name
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Where the scale catalog is stored
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Root key used when a command does not name one
    #[serde(default = "default_key")]
    pub default_key: String,
    /// Seed new catalogs with modes and pentatonics, not just Major/Minor
    #[serde(default = "default_extended_presets")]
    pub extended_presets: bool,
    /// Tone playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,
}

fn default_data_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DATA_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
fn default_key() -> String {
    "C".to_string()
}
fn default_extended_presets() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            default_key: default_key(),
            extended_presets: default_extended_presets(),
            playback: PlaybackConfig::default(),
        }
    }
}

/// Which tone player to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Log notes without producing sound
    #[default]
    Silent,
    /// Sine tones on the default output device
    Audio,
}

/// Tone playback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Player backend
    #[serde(default)]
    pub player: PlayerKind,
    /// Length of each note in milliseconds
    #[serde(default = "default_note_ms")]
    pub note_ms: u64,
    /// Octave of the root note (MIDI convention, middle C = C4)
    #[serde(default = "default_octave")]
    pub octave: i8,
    /// Output amplitude (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_note_ms() -> u64 {
    400
}
fn default_octave() -> i8 {
    4
}
fn default_volume() -> f32 {
    0.3
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            player: PlayerKind::default(),
            note_ms: default_note_ms(),
            octave: default_octave(),
            volume: default_volume(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(text).context("Failed to parse settings TOML")?;
        settings.playback.volume = settings.playback.volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Resolve settings for one invocation.
    ///
    /// The file is `explicit` if given, else `$SCALES_CONFIG`, else
    /// `scales.toml` in the working directory when it exists; otherwise
    /// defaults apply. `$SCALES_DATA` then overrides the data path.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        Self::discover_with(explicit, |name| env::var_os(name), Path::new(DEFAULT_CONFIG_FILE))
    }

    /// [`Settings::discover`] with the environment lookup and the local
    /// settings file supplied by the caller
    pub fn discover_with<F>(explicit: Option<&Path>, var: F, local: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| var(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| local.exists().then(|| local.to_path_buf()));

        let mut settings = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(data) = var(DATA_ENV) {
            settings.data_path = PathBuf::from(data);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_settings() {
        let text = r#"
data_path = "/tmp/scales/data.json"
default_key = "Eb"
extended_presets = false

[playback]
player = "audio"
note_ms = 250
octave = 3
volume = 0.5
"#;

        let settings = Settings::from_toml(text).unwrap();
        assert_eq!(settings.data_path, PathBuf::from("/tmp/scales/data.json"));
        assert_eq!(settings.default_key, "Eb");
        assert!(!settings.extended_presets);
        assert_eq!(settings.playback.player, PlayerKind::Audio);
        assert_eq!(settings.playback.note_ms, 250);
        assert_eq!(settings.playback.octave, 3);
        assert_eq!(settings.playback.volume, 0.5);
    }

    #[test]
    fn test_default_values() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.default_key, "C");
        assert!(settings.extended_presets);
        assert_eq!(settings.playback, PlaybackConfig::default());
        assert!(settings.data_path.ends_with(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = Settings::from_toml("[playback]\nvolume = 4.0\n").unwrap();
        assert_eq!(settings.playback.volume, 1.0);
    }

    #[test]
    fn test_unknown_player_is_rejected() {
        assert!(Settings::from_toml("[playback]\nplayer = \"midi\"\n").is_err());
    }

    /// Writes three settings files that differ only in `default_key`
    fn settings_files(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
        let write = |name: &str, key: &str| {
            let path = dir.path().join(name);
            fs::write(&path, format!("default_key = \"{}\"\n", key)).unwrap();
            path
        };
        (write("flag.toml", "D"), write("env.toml", "E"), write("scales.toml", "F"))
    }

    fn env_of(vars: Vec<(&'static str, PathBuf)>) -> impl Fn(&str) -> Option<OsString> {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone().into_os_string())
        }
    }

    #[test]
    fn test_discover_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let (flag, env_file, local) = settings_files(&dir);
        let var = env_of(vec![(CONFIG_ENV, env_file)]);

        let settings = Settings::discover_with(Some(&flag), var, &local).unwrap();
        assert_eq!(settings.default_key, "D");
    }

    #[test]
    fn test_discover_env_before_local_file() {
        let dir = TempDir::new().unwrap();
        let (_, env_file, local) = settings_files(&dir);

        let settings =
            Settings::discover_with(None, env_of(vec![(CONFIG_ENV, env_file)]), &local).unwrap();
        assert_eq!(settings.default_key, "E");

        let settings = Settings::discover_with(None, env_of(vec![]), &local).unwrap();
        assert_eq!(settings.default_key, "F");
    }

    #[test]
    fn test_discover_defaults_without_any_file() {
        let dir = TempDir::new().unwrap();
        let settings =
            Settings::discover_with(None, env_of(vec![]), &dir.path().join("scales.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_discover_data_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("flag.toml");
        fs::write(&config, "data_path = \"/from/file.json\"\n").unwrap();
        let var = env_of(vec![(DATA_ENV, PathBuf::from("/from/env.json"))]);

        let settings = Settings::discover_with(Some(&config), var, &config).unwrap();
        assert_eq!(settings.data_path, PathBuf::from("/from/env.json"));
    }

    #[test]
    fn test_discover_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::discover_with(Some(&missing), env_of(vec![]), &missing).is_err());
    }

    #[test]
    fn test_load_and_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scales.toml");
        let mut original = Settings::default();
        original.default_key = "F#".to_string();
        original.playback.note_ms = 120;
        fs::write(&path, original.to_toml().unwrap()).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, original);
        assert!(Settings::load(dir.path().join("missing.toml")).is_err());
    }
}
