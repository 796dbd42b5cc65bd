//! Configuration loader with multi-source merging

use super::settings::Settings;
use conductor_domain::ProviderId;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Loads settings from defaults, config files, and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CONDUCTOR_*` (double underscore nesting), plus the
    ///    conventional direct keys (`GOOGLE_API_KEY`, `DASHSCOPE_API_KEY`,
    ///    `DEEPSEEK_API_KEY`, `MOONSHOT_API_KEY`, `TAVILY_API_KEY`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./conductor.toml`
    /// 4. Global: `~/.config/conductor/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<Settings, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = PathBuf::from("conductor.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CONDUCTOR_").split("__"));

        let mut settings: Settings = figment.extract().map_err(Box::new)?;
        Self::apply_env_keys(&mut settings);
        Ok(settings)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> Settings {
        let mut settings = Settings::default();
        Self::apply_env_keys(&mut settings);
        settings
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("conductor").join("config.toml"))
    }

    /// Fill unset API keys from the conventional environment variables.
    fn apply_env_keys(settings: &mut Settings) {
        let pairs = [
            (ProviderId::Google, "GOOGLE_API_KEY"),
            (ProviderId::Qwen, "DASHSCOPE_API_KEY"),
            (ProviderId::DeepSeek, "DEEPSEEK_API_KEY"),
            (ProviderId::Kimi, "MOONSHOT_API_KEY"),
        ];
        for (provider, var) in pairs {
            let endpoint = match provider {
                ProviderId::Google => &mut settings.providers.google,
                ProviderId::Qwen => &mut settings.providers.qwen,
                ProviderId::DeepSeek => &mut settings.providers.deepseek,
                ProviderId::Kimi => &mut settings.providers.kimi,
            };
            if endpoint.api_key.is_none()
                && let Ok(value) = std::env::var(var)
                && !value.is_empty()
            {
                endpoint.api_key = Some(value);
            }
        }

        if settings.search.tavily_api_key.is_none()
            && let Ok(value) = std::env::var("TAVILY_API_KEY")
            && !value.is_empty()
        {
            settings.search.tavily_api_key = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("conductor"));
    }

    #[test]
    fn test_load_defaults_has_endpoints() {
        let settings = ConfigLoader::load_defaults();
        assert!(settings.endpoint(ProviderId::Qwen).base_url.is_some());
    }
}
