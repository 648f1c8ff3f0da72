use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use directories::BaseDirs;
use log::LevelFilter;
use serde::Deserialize;

use crate::form::RawFormInput;
use crate::palette::RgbColor;

const CONFIG_FILE_NAME: &str = "config.toml";
pub const APP_NAME: &str = "rolo";

#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub phone_region: Option<String>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    /// Tag label -> chip color, applied to persons as they are added.
    pub tag_colors: HashMap<String, RgbColor>,
    pub ui: UiConfig,
    pub contacts: Vec<RawFormInput>,
}

impl Config {
    /// Defaults used when no configuration file exists.
    pub fn defaults(config_path: PathBuf) -> Self {
        Self {
            config_path,
            phone_region: None,
            log_level: LevelFilter::Info,
            log_file: None,
            tag_colors: HashMap::new(),
            ui: UiFile::default().into(),
            contacts: Vec::new(),
        }
    }

    fn from_file(config_path: PathBuf, file: ConfigFile) -> Result<Self> {
        let phone_region = file
            .phone_region
            .as_ref()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| value.to_ascii_uppercase());

        let log_level = LevelFilter::from_str(file.log_level.trim())
            .map_err(|_| anyhow!("invalid log_level `{}`", file.log_level))?;

        Ok(Config {
            config_path,
            phone_region,
            log_level,
            log_file: file.log_file.as_deref().map(expand_tilde),
            tag_colors: file.tag_colors,
            ui: file.ui.into(),
            contacts: file.contacts.into_iter().map(Into::into).collect(),
        })
    }
}

/// Expand ~ to home directory in paths
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = home::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

// =============================================================================
// UI Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors: UiColors,
}

#[derive(Debug, Clone)]
pub struct UiColors {
    pub border: RgbColor,
    pub selection_bg: RgbColor,
    pub selection_fg: RgbColor,
    pub status_fg: RgbColor,
    pub status_bg: RgbColor,
}

// =============================================================================
// Paths and loading
// =============================================================================

fn config_root() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    Ok(base.config_dir().join(APP_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE_NAME))
}

/// Default log file location under the platform data dir.
pub fn default_log_path() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    Ok(base
        .data_local_dir()
        .join(APP_NAME)
        .join(format!("{}.log", APP_NAME)))
}

/// Load the configuration. An explicit path must exist; the default path
/// may be absent, in which case defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("configuration file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_path()?;
            if !path.exists() {
                return Ok(Config::defaults(path));
            }
            path
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read configuration file at {}", path.display()))?;
    parse(&raw, path)
}

pub fn parse(raw: &str, path: PathBuf) -> Result<Config> {
    let value: toml::Value = toml::from_str(raw)
        .with_context(|| format!("failed to parse {} as TOML", path.display()))?;

    warn_unknown_keys(&value);

    let cfg_file: ConfigFile = value
        .try_into()
        .with_context(|| format!("failed to deserialize config from {}", path.display()))?;

    Config::from_file(path, cfg_file)
}

// =============================================================================
// Unknown key warnings
// =============================================================================

fn warn_unknown_keys(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };

    let known = HashSet::from([
        "phone_region".to_string(),
        "log_level".to_string(),
        "log_file".to_string(),
        "tag_colors".to_string(),
        "ui".to_string(),
        "contacts".to_string(),
    ]);

    for key in table.keys() {
        if !known.contains(key) {
            eprintln!("warning: unknown configuration key `{}`", key);
        }
    }

    if let Some(ui_val) = table.get("ui") {
        warn_unknown_ui_keys(ui_val);
    }
}

fn warn_unknown_ui_keys(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };

    for key in table.keys() {
        if key != "colors" {
            eprintln!("warning: unknown ui.* entry `{}`", key);
        }
    }

    let Some(colors) = table.get("colors").and_then(|v| v.as_table()) else {
        return;
    };
    let known = HashSet::from([
        "border".to_string(),
        "selection_bg".to_string(),
        "selection_fg".to_string(),
        "status_fg".to_string(),
        "status_bg".to_string(),
    ]);
    for key in colors.keys() {
        if !known.contains(key) {
            eprintln!("warning: unknown ui.colors entry `{}`", key);
        }
    }
}

// =============================================================================
// Config file structure
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigFile {
    phone_region: Option<String>,
    log_level: String,
    log_file: Option<PathBuf>,
    tag_colors: HashMap<String, RgbColor>,
    ui: UiFile,
    contacts: Vec<ContactFile>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            phone_region: None,
            log_level: "info".to_string(),
            log_file: None,
            tag_colors: HashMap::new(),
            ui: UiFile::default(),
            contacts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct UiFile {
    colors: UiColorsFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiColorsFile {
    border: RgbColor,
    selection_bg: RgbColor,
    selection_fg: RgbColor,
    status_fg: RgbColor,
    status_bg: RgbColor,
}

impl Default for UiColorsFile {
    fn default() -> Self {
        Self {
            border: RgbColor::new(255, 165, 0),
            selection_bg: RgbColor::new(255, 165, 0),
            selection_fg: RgbColor::new(0, 0, 0),
            status_fg: RgbColor::new(255, 165, 0),
            status_bg: RgbColor::new(0, 0, 0),
        }
    }
}

impl From<UiFile> for UiConfig {
    fn from(file: UiFile) -> Self {
        Self {
            colors: UiColors {
                border: file.colors.border,
                selection_bg: file.colors.selection_bg,
                selection_fg: file.colors.selection_fg,
                status_fg: file.colors.status_fg,
                status_bg: file.colors.status_bg,
            },
        }
    }
}

/// A `[[contacts]]` seed entry. Goes through the add pipeline at startup.
#[derive(Debug, Clone, Deserialize)]
struct ContactFile {
    name: String,
    phone: String,
    email: String,
    address: String,
    #[serde(default)]
    tags: String,
}

impl From<ContactFile> for RawFormInput {
    fn from(file: ContactFile) -> Self {
        RawFormInput {
            name: file.name,
            phone: file.phone,
            email: file.email,
            address: file.address,
            tags: file.tags,
        }
    }
}
