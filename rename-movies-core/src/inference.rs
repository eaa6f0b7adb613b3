use crate::error::{Error, Result};
use crate::response::ResponseNode;
use serde_json::{json, Value};
use std::time::Duration;

/// Default Responses API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Everything needed for one vision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    /// `data:image/jpeg;base64,...`
    pub image_data_url: String,
    pub max_output_tokens: u32,
}

impl ResponseRequest {
    /// Request body in the Responses API `input` format.
    pub fn payload(&self) -> Value {
        json!({
            "model": self.model,
            "input": [
                {
                    "role": "system",
                    "content": [{"type": "input_text", "text": self.system}]
                },
                {
                    "role": "user",
                    "content": [
                        {"type": "input_text", "text": self.user},
                        {"type": "input_image", "image_url": self.image_data_url}
                    ]
                }
            ],
            "max_output_tokens": self.max_output_tokens
        })
    }
}

/// A vision-capable model endpoint.
pub trait InferenceClient {
    fn respond(&self, request: &ResponseRequest) -> Result<Box<dyn ResponseNode>>;
}

/// Blocking client for the OpenAI Responses API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client with the credential read from `var`.
    pub fn from_env(var: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let api_key = read_api_key(var)?;
        Self::new(api_key, base_url, timeout)
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

/// Read a non-empty credential from the environment.
pub fn read_api_key(var: &str) -> Result<String> {
    std::env::var(var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::MissingApiKey(var.to_string()))
}

impl InferenceClient for OpenAiClient {
    fn respond(&self, request: &ResponseRequest) -> Result<Box<dyn ResponseNode>> {
        tracing::debug!(
            model = %request.model,
            endpoint = %self.endpoint(),
            "requesting file name"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request.payload())
            .send()
            .map_err(|e| Error::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Api(format!("{status}: {}", api_error_message(&body))));
        }

        let body: Value = response.json().map_err(|e| Error::Api(e.to_string()))?;
        Ok(Box::new(body))
    }
}

/// Pull `error.message` out of an error body, or fall back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn request() -> ResponseRequest {
        ResponseRequest {
            model: "gpt-4o".to_string(),
            system: "sys".to_string(),
            user: "usr".to_string(),
            image_data_url: "data:image/jpeg;base64,AAAA".to_string(),
            max_output_tokens: 100,
        }
    }

    #[test]
    fn test_payload_shape() {
        let payload = request().payload();

        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["max_output_tokens"], 100);
        assert_eq!(payload["input"][0]["role"], "system");
        assert_eq!(payload["input"][0]["content"][0]["type"], "input_text");
        assert_eq!(payload["input"][0]["content"][0]["text"], "sys");
        assert_eq!(payload["input"][1]["role"], "user");
        assert_eq!(payload["input"][1]["content"][0]["text"], "usr");
        assert_eq!(payload["input"][1]["content"][1]["type"], "input_image");
        assert_eq!(
            payload["input"][1]["content"][1]["image_url"],
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client =
            OpenAiClient::new("key", "http://localhost:9/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/v1/responses");
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid"}}"#;
        assert_eq!(api_error_message(body), "Incorrect API key provided");
        assert_eq!(api_error_message("  gateway timeout \n"), "gateway timeout");
    }

    #[test]
    #[serial]
    fn test_read_api_key_missing_or_blank() {
        let var = "RENAME_MOVIES_TEST_API_KEY";

        std::env::remove_var(var);
        let err = read_api_key(var).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey(ref name) if name == var));

        std::env::set_var(var, "   ");
        assert!(matches!(read_api_key(var), Err(Error::MissingApiKey(_))));

        std::env::set_var(var, "sk-test");
        assert_eq!(read_api_key(var).unwrap(), "sk-test");
        std::env::remove_var(var);
    }

    #[test]
    fn test_unreachable_endpoint_is_api_error() {
        // Port 9 (discard) is closed on test machines
        let client =
            OpenAiClient::new("key", "http://127.0.0.1:9/v1", Duration::from_secs(2)).unwrap();
        let Err(err) = client.respond(&request()) else {
            panic!("expected an error from a closed port");
        };
        assert!(matches!(err, Error::Api(_)));
    }

    /// Serve one canned HTTP response on a local port and return its base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use std::io::{BufRead, BufReader, Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        format!("http://{addr}/v1")
    }

    #[test]
    fn test_non_success_status_is_api_error_with_message() {
        let base_url = serve_once(
            "HTTP/1.1 401 Unauthorized",
            r#"{"error": {"message": "Incorrect API key provided"}}"#,
        );
        let client = OpenAiClient::new("bad-key", &base_url, Duration::from_secs(5)).unwrap();

        let Err(err) = client.respond(&request()) else {
            panic!("expected an error for a 401 response");
        };

        match err {
            Error::Api(message) => {
                assert!(message.contains("401"), "{message}");
                assert!(message.contains("Incorrect API key provided"), "{message}");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_success_status_returns_body() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"output": [{"content": [{"type": "output_text", "text": "Lake.mp4"}]}]}"#,
        );
        let client = OpenAiClient::new("key", &base_url, Duration::from_secs(5)).unwrap();

        let Ok(body) = client.respond(&request()) else {
            panic!("expected a response body");
        };
        assert_eq!(crate::response::extract_output_text(body.as_ref()), "Lake.mp4");
    }
}
