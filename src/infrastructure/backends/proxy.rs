#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::gemini::GenerateContentResponse;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::ImageRequest;
use crate::domain::models::ResponsePart;
use crate::domain::models::TextRequest;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyOptions {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProxyRequest {
    prompt: String,
    options: ProxyOptions,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProxyError {
    #[serde(default)]
    error: String,
}

/// Talks to a pass-through endpoint that holds the real credentials and
/// forwards `{prompt, ...options}` upstream.
pub struct Proxy {
    url: String,
    timeout: String,
}

impl Default for Proxy {
    fn default() -> Proxy {
        return Proxy {
            url: Config::get(ConfigKey::ProxyURL),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl Proxy {
    async fn generate(&self, req: &ProxyRequest) -> Result<GenerateContentResponse> {
        let res = reqwest::Client::new().post(&self.url).json(req).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ProxyError>(&body)
                .map(|err| return err.error)
                .unwrap_or_default();

            tracing::error!(
                status = status,
                model = req.options.model,
                reason = reason,
                "Failed to make request to proxy"
            );

            if reason.is_empty() {
                bail!(format!("Proxy request failed, {status}"));
            }
            bail!(format!("Proxy request failed, {status}: {reason}"));
        }

        return Ok(res.json::<GenerateContentResponse>().await?);
    }
}

#[async_trait]
impl Backend for Proxy {
    fn name(&self) -> BackendName {
        return BackendName::Proxy;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Proxy URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Proxy is not reachable");
                bail!("Proxy is not reachable");
            }
        };

        // Only POST is served, a 405 still proves the endpoint is up.
        let status = res.status().as_u16();
        if status >= 500 {
            tracing::error!(status = status, "Proxy health check failed");
            bail!("Proxy health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn generate_text(&self, request: TextRequest) -> Result<String> {
        let req = ProxyRequest {
            prompt: request.prompt,
            options: ProxyOptions {
                model: request.model,
                system_instruction: Some(request.system_instruction),
                response_modalities: None,
            },
        };

        let res = self.generate(&req).await?;
        return res.into_text();
    }

    #[allow(clippy::implicit_return)]
    async fn generate_image(&self, request: ImageRequest) -> Result<Vec<ResponsePart>> {
        let req = ProxyRequest {
            prompt: request.prompt,
            options: ProxyOptions {
                model: request.model,
                system_instruction: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            },
        };

        let res = self.generate(&req).await?;
        return Ok(res.into_parts());
    }
}
