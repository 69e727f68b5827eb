use carousel::{CarouselOptions, DirectionResolver, SwipeConfig, TextDirection};
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CarouselName(String);

carousel::impl_string_newtype!(CarouselName);

pub const REVIEWS_INTERVAL_MS: u64 = 4200;
pub const SERVICES_INTERVAL_MS: u64 = 2500;
pub const TRANSITION_MS: u64 = 500;

fn default_visible_count() -> usize {
    carousel::carousel::DEFAULT_VISIBLE_COUNT
}

fn default_interval_ms() -> u64 {
    REVIEWS_INTERVAL_MS
}

fn default_transition_ms() -> u64 {
    TRANSITION_MS
}

fn default_carousels() -> Vec<CarouselSettings> {
    vec![
        CarouselSettings::new("reviews", 3, REVIEWS_INTERVAL_MS),
        CarouselSettings::new("services", 4, SERVICES_INTERVAL_MS),
        CarouselSettings::new("media", 1, SERVICES_INTERVAL_MS),
    ]
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CarouselSettings {
    pub name: CarouselName,
    /// JSON file holding a `{ success, data }` envelope. Bundled items are used without it.
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default = "default_visible_count")]
    pub visible_count: usize,
    /// Zero disables auto-advance.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Overrides the page-level direction for this carousel only.
    #[serde(default)]
    pub direction: Option<TextDirection>,
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

impl CarouselSettings {
    pub fn new(name: &str, visible_count: usize, interval_ms: u64) -> Self {
        Self {
            name: CarouselName::from(name),
            source: None,
            visible_count,
            interval_ms,
            direction: None,
            swipe: SwipeConfig::default(),
            transition_ms: TRANSITION_MS,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn options(&self, page_direction: TextDirection) -> CarouselOptions {
        CarouselOptions {
            visible_count: self.visible_count.max(1),
            direction: DirectionResolver::resolve(self.direction, page_direction).direction(),
            swipe: self.swipe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub direction: TextDirection,
    #[serde(default = "default_carousels")]
    pub carousels: Vec<CarouselSettings>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: TextDirection::default(),
            carousels: default_carousels(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "storefront", "showcase").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("SHOWCASE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!("No config at {}, using defaults", path.display());
        return Config::default();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
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

fn watch_dir(
    dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Editors replace files as often as they write them in place.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let _watcher = match watch_dir(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_dir.display(), e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                log::debug!("Config changed: {:?}", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_toml(s: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        assert_eq!(parse_toml(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_toml("");
        assert_eq!(config.direction, TextDirection::Rtl);
        assert_eq!(config.carousels.len(), 3);
        assert_eq!(config.carousels[0].interval_ms, REVIEWS_INTERVAL_MS);
        assert_eq!(config.carousels[1].interval_ms, SERVICES_INTERVAL_MS);
    }

    #[test]
    fn test_partial_carousel_settings() {
        let config = parse_toml(
            r#"
direction = "LTR"

[[carousels]]
name = "reviews"
direction = "rtl"
interval_ms = 3000

[carousels.swipe]
min_distance_px = 30
"#,
        );

        assert_eq!(config.direction, TextDirection::Ltr);
        let reviews = &config.carousels[0];
        assert_eq!(reviews.name, CarouselName::from("reviews"));
        assert_eq!(reviews.interval(), Duration::from_millis(3000));
        assert_eq!(reviews.visible_count, 3);
        assert_eq!(reviews.transition_ms, TRANSITION_MS);
        assert_eq!(reviews.swipe.min_distance_px, 30.0);
        assert_eq!(reviews.swipe.jitter_px, 10.0);
        assert_eq!(
            reviews.options(config.direction).direction,
            TextDirection::Rtl
        );
    }

    #[test]
    fn test_options_inherit_page_direction() {
        let settings = CarouselSettings {
            visible_count: 0,
            ..CarouselSettings::new("media", 1, 0)
        };
        let options = settings.options(TextDirection::Ltr);
        assert_eq!(options.direction, TextDirection::Ltr);
        assert_eq!(options.visible_count, 1);
    }

    #[test]
    fn test_settings_deserialization_from_json() {
        let settings: CarouselSettings =
            serde_json::from_str(r#"{"name": "services", "direction": "Right-To-Left"}"#).unwrap();
        assert_eq!(settings.direction, Some(TextDirection::Rtl));
        assert_eq!(settings.source, None);
        assert_eq!(settings.interval_ms, REVIEWS_INTERVAL_MS);
    }

    #[test]
    fn test_only_config_file_changes_trigger_reload() {
        let config_path = PathBuf::from("/tmp/showcase/config.toml");
        let event = |kind, path: &str| notify::Event::new(kind).add_path(PathBuf::from(path));

        let modify = EventKind::Modify(notify::event::ModifyKind::Any);
        assert!(touches_config(&event(modify, "/tmp/showcase/config.toml"), &config_path));
        assert!(!touches_config(&event(modify, "/tmp/showcase/other.toml"), &config_path));
        assert!(!touches_config(
            &event(
                EventKind::Access(notify::event::AccessKind::Any),
                "/tmp/showcase/config.toml"
            ),
            &config_path
        ));
    }
}
