use clockface::{DialLabel, DialSpec, Easing, FaceParams, Insets, ParamsError, TextRole};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorError {
    #[error("Invalid hex color '{input}': {source}")]
    InvalidHex {
        input: String,
        source: palette::rgb::FromHexError,
    },
}

/// `#RRGGBB` color as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        let rgb: Srgb<f64> = self.0.into_format();
        Srgba::new(rgb.red, rgb.green, rgb.blue, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|source| ColorError::InvalidHex {
                input: s.to_string(),
                source,
            })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0.red, self.0.green, self.0.blue)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: HexColor,
    pub foreground: HexColor,
    pub ticks: HexColor,
    pub numerals: HexColor,
    pub center_text: HexColor,
    pub dial: HexColor,
    pub dial_label: HexColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: HexColor::rgb(0x7E, 0x7E, 0x7E),
            foreground: HexColor::rgb(0x00, 0x00, 0x00),
            ticks: HexColor::rgb(0xFF, 0xFF, 0xFF),
            numerals: HexColor::rgb(0xFF, 0xFF, 0xFF),
            center_text: HexColor::rgb(0xFF, 0xFF, 0xFF),
            dial: HexColor::rgb(0x1F, 0x9E, 0xD9),
            dial_label: HexColor::rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    pub numeral_size: f64,
    pub center_size: f64,
    pub label_size: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            numeral_size: 18.0,
            center_size: 22.0,
            label_size: 22.0,
        }
    }
}

impl TextConfig {
    pub fn size_for(&self, role: TextRole) -> f64 {
        match role {
            TextRole::Numeral => self.numeral_size,
            TextRole::CenterLabel => self.center_size,
            TextRole::ControlLabel => self.label_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: clockface::animator::DEFAULT_DURATION.as_millis() as u64,
            easing: Easing::default(),
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialConfig {
    pub label: DialLabel,
    #[serde(default)]
    pub angle: f64,
    pub color: Option<HexColor>,
}

impl DialConfig {
    pub fn spec(&self) -> DialSpec {
        DialSpec {
            label: self.label.clone(),
            angle: self.angle,
        }
    }
}

fn default_dials() -> Vec<DialConfig> {
    let start = DialSpec::start();
    vec![DialConfig {
        label: start.label,
        angle: start.angle,
        color: None,
    }]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub face: FaceParams,
    #[serde(default)]
    pub insets: Insets,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default = "default_dials")]
    pub dials: Vec<DialConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            face: FaceParams::default(),
            insets: Insets::default(),
            animation: AnimationConfig::default(),
            colors: ColorConfig::default(),
            text: TextConfig::default(),
            dials: default_dials(),
        }
    }
}

impl Config {
    pub fn dial_specs(&self) -> Vec<DialSpec> {
        self.dials.iter().map(DialConfig::spec).collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.face.validate()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid face parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "radclock", "radclock").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// The `--config` override if given, the per-user config file otherwise.
pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    path.map_or_else(get_config_path, |p| Ok(p.to_path_buf()))
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = resolve_path(path)?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("RADCLOCK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path =
        resolve_path(path).map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(path: Option<PathBuf>, tx: Sender<AppEvent>) {
    // notify reports absolute paths, and a bare file name has an empty parent
    let config_path = match resolve_path(path.as_deref()) {
        Ok(p) => match std::path::absolute(&p) {
            Ok(abs) => abs,
            Err(e) => {
                log::error!("Failed to resolve {}: {}", p.display(), e);
                return;
            }
        },
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
