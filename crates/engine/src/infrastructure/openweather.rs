//! OpenWeather current-conditions client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::infrastructure::ports::{WeatherError, WeatherPort, WeatherReport};

/// Client for OpenWeather's current weather endpoint
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
}

/// Default OpenWeather API base URL.
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Where OpenWeather serves its condition icons.
pub const OPENWEATHER_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

impl OpenWeatherClient {
    pub fn new(base_url: &str) -> Self {
        // Icons are decoration; give up quickly rather than pile up requests
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new(DEFAULT_OPENWEATHER_BASE_URL)
    }
}

#[async_trait]
impl WeatherPort for OpenWeatherClient {
    async fn current(&self, city: &str, api_key: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[("q", city), ("units", "metric"), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;
            return Err(WeatherError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let api_response: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        convert_response(city, api_response)
    }
}

fn convert_response(city: &str, response: OpenWeatherResponse) -> Result<WeatherReport, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::InvalidResponse(format!("No conditions for '{}'", city)))?;

    let name = response.name.filter(|n| !n.is_empty()).unwrap_or_else(|| city.to_string());

    Ok(WeatherReport {
        icon_url: format!("{}/{}.png", OPENWEATHER_ICON_BASE_URL, condition.icon),
        tooltip: format!(
            "{}: {}, feels like {}℃.",
            name, condition.description, response.main.feels_like
        ),
    })
}

// =============================================================================
// OpenWeather API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    #[serde(default)]
    name: Option<String>,
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    feels_like: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn converts_icon_and_tooltip() {
        let json = r#"{
            "name": "Reading",
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 13.1, "feels_like": 12.5, "humidity": 88}
        }"#;
        let response: OpenWeatherResponse = serde_json::from_str(json).unwrap();

        let report = convert_response("Reading", response).unwrap();
        assert_eq!(report.icon_url, "https://openweathermap.org/img/wn/10d.png");
        assert_eq!(report.tooltip, "Reading: light rain, feels like 12.5℃.");
    }

    #[test]
    fn whole_degrees_print_without_fraction() {
        let json = r#"{
            "weather": [{"description": "clear sky", "icon": "01n"}],
            "main": {"feels_like": 20.0}
        }"#;
        let response: OpenWeatherResponse = serde_json::from_str(json).unwrap();

        let report = convert_response("Sydney", response).unwrap();
        assert_eq!(report.tooltip, "Sydney: clear sky, feels like 20℃.");
    }

    #[test]
    fn empty_conditions_are_invalid() {
        let json = r#"{"name": "Munich", "weather": [], "main": {"feels_like": 3.2}}"#;
        let response: OpenWeatherResponse = serde_json::from_str(json).unwrap();

        let err = convert_response("Munich", response).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenWeatherClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn requests_metric_conditions_for_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Reading"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Reading",
                "weather": [{"description": "overcast clouds", "icon": "04d"}],
                "main": {"feels_like": 14.2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri());
        let report = client.current("Reading", "secret").await.unwrap();

        assert_eq!(report.icon_url, "https://openweathermap.org/img/wn/04d.png");
        assert_eq!(report.tooltip, "Reading: overcast clouds, feels like 14.2℃.");
    }

    #[tokio::test]
    async fn rejected_key_is_a_failed_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri());
        let err = client.current("Reading", "wrong").await.unwrap_err();

        match err {
            WeatherError::RequestFailed(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cod": 200})))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri());
        let err = client.current("Munich", "secret").await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }
}
