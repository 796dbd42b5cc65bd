//! Local tool executor
//!
//! The one [`ToolExecutorPort`] implementation. Dispatch is an exhaustive
//! match on [`ToolKind`]; a name the registry does not know becomes an
//! error record immediately, with no I/O.

use super::{SearchSource, TavilySource, WeatherSource, weather::OpenMeteoSource};
use super::{calc, clock, search, weather};
use crate::config::Settings;
use async_trait::async_trait;
use conductor_application::ports::tool_executor::ToolExecutorPort;
use conductor_domain::{ToolCall, ToolKind, ToolRecord};
use std::sync::Arc;
use tracing::info;

pub struct LocalToolExecutor {
    weather: Arc<dyn WeatherSource>,
    search: Arc<dyn SearchSource>,
}

impl LocalToolExecutor {
    pub fn new(settings: &Settings) -> Self {
        let client = reqwest::Client::new();
        Self {
            weather: Arc::new(OpenMeteoSource::new(client.clone())),
            search: Arc::new(TavilySource::new(
                client,
                settings.search.tavily_api_key.clone(),
            )),
        }
    }

    pub fn with_sources(
        weather: Arc<dyn WeatherSource>,
        search: Arc<dyn SearchSource>,
    ) -> Self {
        Self { weather, search }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    async fn execute(&self, call: &ToolCall) -> ToolRecord {
        let Some(kind) = ToolKind::from_name(&call.tool_name) else {
            return ToolRecord::new(call, format!("错误: 未知工具 '{}'", call.tool_name));
        };

        info!(tool = %kind, "executing tool");

        let result = match kind {
            ToolKind::GetWeather => weather::run(self.weather.as_ref(), call).await,
            ToolKind::SearchWeb => search::run(self.search.as_ref(), call).await,
            ToolKind::Calculate => calc::run(call),
            ToolKind::GetCurrentTime => clock::run(call),
        };
        ToolRecord::new(call, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::search::SearchOutcome;
    use crate::tools::weather::{Forecast, GeoLocation};

    struct NoWeather;

    #[async_trait]
    impl WeatherSource for NoWeather {
        async fn geocode(&self, _city: &str) -> Result<Option<GeoLocation>, String> {
            Ok(None)
        }

        async fn forecast(&self, _lat: f64, _lon: f64) -> Result<Forecast, String> {
            Err("unreachable".to_string())
        }
    }

    struct NoSearch;

    #[async_trait]
    impl SearchSource for NoSearch {
        fn is_configured(&self) -> bool {
            false
        }

        async fn search(&self, _query: &str) -> Result<SearchOutcome, String> {
            Err("unreachable".to_string())
        }
    }

    fn executor() -> LocalToolExecutor {
        LocalToolExecutor::with_sources(Arc::new(NoWeather), Arc::new(NoSearch))
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_record() {
        let record = executor().execute(&ToolCall::new("rm_rf")).await;
        assert_eq!(record.result, "错误: 未知工具 'rm_rf'");
    }

    #[tokio::test]
    async fn test_dispatches_calculate() {
        let call = ToolCall::new("calculate").with_arg("expression", "6*7");
        let record = executor().execute(&call).await;
        assert_eq!(record.result, "计算结果: 6*7 = 42");
        assert_eq!(record.tool_name, "calculate");
    }

    #[tokio::test]
    async fn test_failing_call_still_yields_record() {
        let call = ToolCall::new("get_weather").with_arg("city", "nowhere");
        let record = executor().execute(&call).await;
        let json: serde_json::Value = serde_json::from_str(&record.result).unwrap();
        assert!(json["error"].as_str().unwrap().contains("nowhere"));
    }

    #[tokio::test]
    async fn test_default_wiring_from_settings() {
        let executor = LocalToolExecutor::new(&Settings::default());
        // Unconfigured search degrades to simulated results, no network
        let call = ToolCall::new("search_web").with_arg("query", "rust");
        let record = executor.execute(&call).await;
        let json: serde_json::Value = serde_json::from_str(&record.result).unwrap();
        assert_eq!(json["is_simulated"], true);
    }
}
