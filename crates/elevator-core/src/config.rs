use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Settings for one elevator ride.
///
/// Read once when the engine is built and never mutated during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorConfig {
    /// Anchor id to ride to. Absent means the top of the page.
    #[serde(default)]
    pub target: Option<String>,
    /// Distance to stop short of the destination, in page offset units.
    /// Added when riding to the top, subtracted when riding to an anchor.
    #[serde(default)]
    pub vertical_padding: f64,
    /// Fixed ride duration in milliseconds. Zero or absent derives the
    /// duration from the travel distance.
    #[serde(default)]
    pub duration_ms: Option<f64>,
    /// Play the travel and arrival sounds
    #[serde(default = "default_true")]
    pub audio: bool,
    /// Sound played while travelling
    #[serde(default)]
    pub travel_sound: SoundSource,
    /// Sound played on arrival
    #[serde(default)]
    pub arrival_sound: SoundSource,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            target: None,
            vertical_padding: 0.0,
            duration_ms: None,
            audio: default_true(),
            travel_sound: SoundSource::default(),
            arrival_sound: SoundSource::default(),
        }
    }
}

/// Where a sound cue comes from.
///
/// In TOML this is either a keyword (`"builtin"`, `"bell"`, `"silent"`) or
/// an argv array for an external player, e.g. `["paplay", "ding.wav"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SoundSource {
    /// The asset shipped with the app for this channel
    #[default]
    Builtin,
    /// Terminal bell
    Bell,
    /// No sound at all
    Silent,
    /// External player command (program followed by its arguments)
    Command(Vec<String>),
}

impl Serialize for SoundSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            SoundSource::Builtin => serializer.serialize_str("builtin"),
            SoundSource::Bell => serializer.serialize_str("bell"),
            SoundSource::Silent => serializer.serialize_str("silent"),
            SoundSource::Command(argv) => argv.serialize(serializer),
        }
    }
}

// Accept either a keyword string or an argv array
impl<'de> Deserialize<'de> for SoundSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Visitor};
        use std::fmt;

        struct SoundSourceVisitor;

        impl<'de> Visitor<'de> for SoundSourceVisitor {
            type Value = SoundSource;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"builtin\", \"bell\", \"silent\" or an array of command arguments")
            }

            fn visit_str<E>(self, value: &str) -> Result<SoundSource, E>
            where
                E: de::Error,
            {
                match value.to_lowercase().as_str() {
                    "builtin" | "default" => Ok(SoundSource::Builtin),
                    "bell" => Ok(SoundSource::Bell),
                    "silent" | "none" | "off" => Ok(SoundSource::Silent),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<SoundSource, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut argv = Vec::new();
                while let Some(arg) = seq.next_element::<String>()? {
                    argv.push(arg);
                }
                if argv.is_empty() {
                    return Err(de::Error::invalid_length(0, &self));
                }
                Ok(SoundSource::Command(argv))
            }
        }

        deserializer.deserialize_any(SoundSourceVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while the elevator is moving
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    /// Accent color (titles, the elevator button)
    pub accent: Option<String>,
    /// Illustration color
    pub art: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "G" (Shift+g), "<CR>" (Enter), "gg"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Ride the elevator
    #[serde(default = "default_key_elevate")]
    pub elevate: String,
    /// Open the Elevator.js homepage in a browser
    #[serde(default = "default_key_open_link")]
    pub open_link: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            elevate: default_key_elevate(),
            open_link: default_key_open_link(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_elevate() -> String { "<CR>".to_string() }
fn default_key_open_link() -> String { "o".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("elevator")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaulting when it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/elevator/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("elevator")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("elevator.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_elevator_config() {
        let config = ElevatorConfig::default();
        assert_eq!(config.target, None);
        assert_eq!(config.vertical_padding, 0.0);
        assert_eq!(config.duration_ms, None);
        assert!(config.audio);
        assert_eq!(config.travel_sound, SoundSource::Builtin);
        assert_eq!(config.arrival_sound, SoundSource::Builtin);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.elevator.audio);
        assert_eq!(config.ui.animation_fps, 60);
        assert_eq!(config.keymap.elevate, "<CR>");
        assert_eq!(config.ui.theme.name, "gruvbox-dark");
    }

    #[test]
    fn test_partial_elevator_section() {
        let config = AppConfig::from_toml(
            r#"
            [elevator]
            target = "3"
            vertical_padding = 2.5
            duration_ms = 1500
            audio = false
            "#,
        )
        .unwrap();
        assert_eq!(config.elevator.target.as_deref(), Some("3"));
        assert_eq!(config.elevator.vertical_padding, 2.5);
        assert_eq!(config.elevator.duration_ms, Some(1500.0));
        assert!(!config.elevator.audio);
    }

    #[test]
    fn test_sound_source_keywords_and_commands() {
        let config = AppConfig::from_toml(
            r#"
            [elevator]
            travel_sound = ["mpv", "--loop", "muzak.mp3"]
            arrival_sound = "bell"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.elevator.travel_sound,
            SoundSource::Command(vec!["mpv".into(), "--loop".into(), "muzak.mp3".into()])
        );
        assert_eq!(config.elevator.arrival_sound, SoundSource::Bell);

        let silent = AppConfig::from_toml("[elevator]\narrival_sound = \"silent\"").unwrap();
        assert_eq!(silent.elevator.arrival_sound, SoundSource::Silent);
    }

    #[test]
    fn test_sound_source_rejects_unknown_keyword() {
        assert!(AppConfig::from_toml("[elevator]\narrival_sound = \"trumpet\"").is_err());
        assert!(AppConfig::from_toml("[elevator]\narrival_sound = []").is_err());
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let by_name = AppConfig::from_toml("[ui]\ntheme = \"nord\"").unwrap();
        assert_eq!(by_name.ui.theme.name, "nord");

        let with_colors = AppConfig::from_toml(
            r##"
            [ui.theme]
            name = "dracula"
            colors = { accent = "#ff0000" }
            "##,
        )
        .unwrap();
        assert_eq!(with_colors.ui.theme.name, "dracula");
        assert_eq!(with_colors.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_toml_roundtrip_keeps_sound_sources() {
        let mut config = AppConfig::default();
        config.elevator.arrival_sound = SoundSource::Command(vec!["paplay".into(), "ding.wav".into()]);
        config.elevator.travel_sound = SoundSource::Silent;
        let text = config.to_toml().unwrap();
        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back.elevator, config.elevator);
    }
}
