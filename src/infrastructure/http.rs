pub mod indicator_client;

pub use indicator_client::*;

use crate::domain::{
    errors::FetchError,
    logging::{LogComponent, get_logger},
};
use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::collections::HashMap;

/// HTTP client on top of gloo for WASM
#[derive(Debug, Clone)]
pub struct GlooHttpClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    timeout_ms: Option<u32>,
}

impl GlooHttpClient {
    pub fn new(base_url: String) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url,
            default_headers,
            timeout_ms: None,
        }
    }

    /// Races every request against a timer; `None` disables the race.
    pub fn with_timeout(mut self, timeout_ms: Option<u32>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> Option<u32> {
        self.timeout_ms
    }

    /// Absolute URLs pass through, anything else is joined to the base URL.
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
        }
    }

    /// GET returning the body text
    pub async fn get(&self, endpoint: &str) -> Result<String, FetchError> {
        let url = self.resolve(endpoint);

        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("GET: {}", url));

        let request = Box::pin(self.send_get(&url));
        let result = match self.timeout_ms {
            None => request.await,
            Some(timeout_ms) => match select(request, Box::pin(TimeoutFuture::new(timeout_ms))).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(FetchError::Timeout { timeout_ms }),
            },
        };

        match &result {
            Ok(text) => get_logger().debug(
                LogComponent::Infrastructure("HTTP"),
                &format!("GET response: {} bytes", text.len()),
            ),
            Err(error) => get_logger().warn(
                LogComponent::Infrastructure("HTTP"),
                &format!("GET {} failed: {}", url, error),
            ),
        }
        result
    }

    async fn send_get(&self, url: &str) -> Result<String, FetchError> {
        let mut request = Request::get(url);
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("{:?}", e)))?;

        if !HttpUtils::is_success_status(response.status()) {
            return Err(FetchError::HttpStatus {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read response: {:?}", e)))
    }
}

impl Default for GlooHttpClient {
    fn default() -> Self {
        Self::new(crate::application::config::DEFAULT_PROXY_URL.to_string())
    }
}

/// Helpers for building request URLs
pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Appends query parameters in the given order.
    pub fn build_url_with_params(base_url: &str, params: &[(&str, String)]) -> String {
        if params.is_empty() {
            return base_url.to_string();
        }

        let query_string: String = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, Self::url_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", base_url, query_string)
    }

    /// Encodes the characters that break a path segment or query value
    pub fn url_encode(input: &str) -> String {
        input
            .replace('%', "%25")
            .replace(' ', "%20")
            .replace('&', "%26")
            .replace('=', "%3D")
            .replace('?', "%3F")
            .replace('#', "%23")
            .replace('/', "%2F")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_keeps_order() {
        let params = [("format", "json".to_string()), ("per_page", "100".to_string())];
        let url = HttpUtils::build_url_with_params("https://api.example.com/data", &params);
        assert_eq!(url, "https://api.example.com/data?format=json&per_page=100");
    }

    #[test]
    fn test_url_encoding() {
        assert_eq!(HttpUtils::url_encode("hello world"), "hello%20world");
        assert_eq!(HttpUtils::url_encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(HttpUtils::url_encode("50%"), "50%25");
    }

    #[test]
    fn test_resolve_joins_single_slash() {
        let client = GlooHttpClient::new("http://127.0.0.1:5000/".to_string());
        assert_eq!(client.resolve("/api/data/gdp/USA"), "http://127.0.0.1:5000/api/data/gdp/USA");
        assert_eq!(client.resolve("https://other.org/x"), "https://other.org/x");
    }

    #[test]
    fn test_success_status_range() {
        assert!(HttpUtils::is_success_status(204));
        assert!(!HttpUtils::is_success_status(404));
    }
}
