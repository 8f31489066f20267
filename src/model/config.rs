use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub timer: TimerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// "light" or "dark"
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: default_theme(),
            show_key_hints: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Default countdown length in seconds (25 minutes)
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            duration_secs: default_duration_secs(),
        }
    }
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_true() -> bool {
    true
}

fn default_duration_secs() -> u32 {
    25 * 60
}

impl AppConfig {
    pub fn dark_mode(&self) -> bool {
        self.ui.theme == "dark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ui.theme, "light");
        assert!(config.ui.show_key_hints);
        assert_eq!(config.timer.duration_secs, 1500);
        assert!(!config.dark_mode());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
[ui]
theme = "dark"
"#,
        )
        .unwrap();
        assert!(config.dark_mode());
        assert!(config.ui.show_key_hints);
        assert_eq!(config.timer.duration_secs, 1500);
    }

    #[test]
    fn test_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
[ui]
theme = "dark"
show_key_hints = false

[timer]
duration_secs = 600
"#,
        )
        .unwrap();
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.timer.duration_secs, 600);
    }
}
