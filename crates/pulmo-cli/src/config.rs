use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// User preferences. Read-only: the CLI never writes this file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Default for `--format` when the flag is not given.
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// `<config dir>/pulmo/config.json`.
pub fn default_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("pulmo").join("config.json"))
}

/// A loaded config and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub config: Config,
    pub path: PathBuf,
    /// `false` when no file existed and the defaults were used.
    pub found: bool,
    /// The on-disk version, when the file needed migrating.
    pub migrated_from: Option<u32>,
}

impl Loaded {
    /// Report how the config was loaded. Call once logging is installed.
    pub fn log(&self) {
        let path = self.path.display();
        if !self.found {
            tracing::debug!(path = %path, "no config file, using defaults");
            return;
        }
        match self.migrated_from {
            Some(from) => tracing::info!(
                path = %path,
                from,
                to = CURRENT_VERSION,
                "migrated config in memory; file left unchanged"
            ),
            None => tracing::debug!(path = %path, "config loaded"),
        }
    }
}

/// Load the config from `path`, or from [`default_path`] when none is given.
///
/// A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> eyre::Result<Loaded> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_path()?,
    };

    if !path.exists() {
        return Ok(Loaded {
            config: Config {
                config_version: CURRENT_VERSION,
                ..Config::default()
            },
            path,
            found: false,
            migrated_from: None,
        });
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    let (config, on_disk_version) = parse_versioned(&contents)?;
    Ok(Loaded {
        config,
        path,
        found: true,
        migrated_from: (on_disk_version < CURRENT_VERSION).then_some(on_disk_version),
    })
}

/// Parse config JSON, running migrations before deserializing.
pub fn parse(contents: &str) -> eyre::Result<Config> {
    parse_versioned(contents).map(|(config, _)| config)
}

/// Parsed config plus the version it was stored at.
fn parse_versioned(contents: &str) -> eyre::Result<(Config, u32)> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = stored_version(&json)?;

    let migrated = migrate(json, on_disk_version)?;
    let config: Config = serde_json::from_value(migrated)?;
    Ok((config, on_disk_version))
}

/// `config_version` from raw JSON. Missing means 0.
fn stored_version(json: &serde_json::Value) -> eyre::Result<u32> {
    let Some(raw) = json.get("config_version") else {
        return Ok(0);
    };
    raw.as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| eyre::eyre!("config_version {raw} is not a supported version number"))
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update pulmo."
        ));
    }

    // v0 → v1: `format` was renamed to `output`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(format) = obj.remove("format") {
            obj.entry("output").or_insert(format);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}
