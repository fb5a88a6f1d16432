use serde_json::json;

/// Posts a single registration to the API. Makes one attempt; callers decide
/// what to do with a failure.
pub struct ReqwestRegisterClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ReqwestRegisterClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn register(&self, email: &str, password: &str) -> anyhow::Result<serde_json::Value> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request failed: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_default();
            anyhow::bail!("server returned status {status}: {message}");
        }
        let body = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read body: {e}"))?;
        Ok(body)
    }
}
