//! Web search tool backed by Tavily
//!
//! Without a configured API key the tool degrades to fixed simulated
//! results carrying an explicit `is_simulated` flag, so a keyless setup
//! still exercises the whole tool path end to end.

use async_trait::async_trait;
use conductor_domain::ToolCall;
use serde::Deserialize;
use tracing::warn;

const TAVILY_URL: &str = "https://api.tavily.com/search";

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchOutcome {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One web search
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Whether real searches can be issued at all
    fn is_configured(&self) -> bool;

    async fn search(&self, query: &str) -> Result<SearchOutcome, String>;
}

pub struct TavilySource {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl TavilySource {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl SearchSource for TavilySource {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> Result<SearchOutcome, String> {
        let api_key = self.api_key.as_deref().ok_or("no API key")?;
        let body = serde_json::json!({
            "api_key": api_key,
            "query": query,
            "search_depth": "basic",
            "max_results": 5,
            "include_answer": true,
        });

        self.client
            .post(TAVILY_URL)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())
    }
}

fn simulated_results(query: &str) -> String {
    serde_json::json!({
        "query": query,
        "is_simulated": true,
        "results": [
            {
                "title": format!("{} - 官方文档", query),
                "url": "https://example.com/doc",
                "content": "这是一个关于该搜索词的模拟官方文档内容..."
            },
            {
                "title": format!("{} 的最新动态", query),
                "url": "https://news.example.com/latest",
                "content": "最新的行业动态显示..."
            },
            {
                "title": format!("维基百科: {}", query),
                "url": format!("https://wikipedia.org/wiki/{}", query),
                "content": "维基百科上的详细解释..."
            }
        ]
    })
    .to_string()
}

/// Run one `search_web` call and return its result payload
pub async fn run(source: &dyn SearchSource, call: &ToolCall) -> String {
    let query = call.get_string("query").unwrap_or_default();
    if query.is_empty() {
        return serde_json::json!({"error": "缺少搜索关键词"}).to_string();
    }

    if !source.is_configured() {
        return simulated_results(query);
    }

    match source.search(query).await {
        Ok(outcome) => {
            let results: Vec<serde_json::Value> = outcome
                .results
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "title": r.title,
                        "url": r.url,
                        "content": r.content,
                    })
                })
                .collect();
            serde_json::json!({
                "query": query,
                "answer": outcome.answer,
                "results": results,
            })
            .to_string()
        }
        Err(e) => {
            warn!(query, error = %e, "search failed");
            serde_json::json!({"error": format!("搜索出错: {}", e)}).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSource {
        outcome: Result<SearchOutcome, String>,
    }

    #[async_trait]
    impl SearchSource for ScriptedSource {
        fn is_configured(&self) -> bool {
            true
        }

        async fn search(&self, _query: &str) -> Result<SearchOutcome, String> {
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_no_key_yields_simulated_flag() {
        let source = TavilySource::new(reqwest::Client::new(), None);
        let call = ToolCall::new("search_web").with_arg("query", "Rust 所有权");

        let result = run(&source, &call).await;
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(json["is_simulated"], true);
        assert_eq!(json["query"], "Rust 所有权");
        assert_eq!(json["results"].as_array().unwrap().len(), 3);
        assert_eq!(json["results"][0]["title"], "Rust 所有权 - 官方文档");
    }

    #[tokio::test]
    async fn test_configured_source_forwards_answer_and_hits() {
        let source = ScriptedSource {
            outcome: Ok(SearchOutcome {
                answer: Some("42".to_string()),
                results: vec![SearchHit {
                    title: "t".to_string(),
                    url: "https://example.com".to_string(),
                    content: "c".to_string(),
                }],
            }),
        };
        let call = ToolCall::new("search_web").with_arg("query", "answer");

        let result = run(&source, &call).await;
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(json["answer"], "42");
        assert!(json.get("is_simulated").is_none());
        assert_eq!(json["results"][0]["url"], "https://example.com");
    }

    #[tokio::test]
    async fn test_search_failure_is_error_payload() {
        let source = ScriptedSource {
            outcome: Err("timeout".to_string()),
        };
        let call = ToolCall::new("search_web").with_arg("query", "x");

        let result = run(&source, &call).await;
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(json["error"], "搜索出错: timeout");
    }

    #[tokio::test]
    async fn test_missing_query() {
        let source = TavilySource::new(reqwest::Client::new(), None);
        let result = run(&source, &ToolCall::new("search_web")).await;
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(json["error"], "缺少搜索关键词");
    }
}
