//! Email relay client.
//!
//! The contact form delivers messages through an EmailJS-compatible REST
//! endpoint: a single POST carrying the service/template credentials and the
//! template parameters. [`RelayTransport`] is the seam between the form
//! state machine and the network, mirroring how `imaging::ImageBackend`
//! keeps encoders out of the pipeline tests; `contact` drives a mock
//! transport in unit tests and [`HttpRelay`] everywhere else.

use crate::config::RelayConfig;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Template parameters the relay interpolates into the configured email
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
    pub reply_to: String,
}

/// JSON body of a relay submission.
///
/// Field names follow the EmailJS REST contract; `user_id` carries what the
/// config calls the public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

/// Transport that carries a relay request to the outside world.
pub trait RelayTransport {
    fn send(&self, request: &RelayRequest) -> Result<(), RelayError>;
}

/// Blocking HTTP transport against the configured endpoint.
pub struct HttpRelay {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpRelay {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }
}

impl RelayTransport for HttpRelay {
    fn send(&self, request: &RelayRequest) -> Result<(), RelayError> {
        let response = self.client.post(&self.endpoint).json(request).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        Err(RelayError::Rejected {
            status: status.as_u16(),
            body: snippet(&body),
        })
    }
}

/// First line of a response body, truncated. Relay error pages can be
/// whole HTML documents; the status message is all we want to surface.
fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let line = body.lines().next().unwrap_or("").trim();
    let mut out: String = line.chars().take(MAX).collect();
    if line.chars().count() > MAX {
        out.push('…');
    }
    out
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration as StdDuration;

    /// Recording transport with scripted responses.
    ///
    /// `send` records the request, then pops the next response off the END
    /// of the scripted vec. An exhausted script is an error so tests that
    /// trigger more sends than they planned for fail loudly.
    #[derive(Default)]
    pub struct MockRelay {
        responses: Mutex<Vec<Result<(), RelayError>>>,
        requests: Mutex<Vec<RelayRequest>>,
    }

    impl MockRelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_responses(responses: Vec<Result<(), RelayError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn get_requests(&self) -> Vec<RelayRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl RelayTransport for MockRelay {
        fn send(&self, request: &RelayRequest) -> Result<(), RelayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .expect("MockRelay: no scripted response")
        }
    }

    fn sample_request() -> RelayRequest {
        RelayRequest {
            service_id: "service_abc123".to_string(),
            template_id: "template_abc123".to_string(),
            user_id: "key_abc123".to_string(),
            template_params: TemplateParams {
                from_name: "Avery Park".to_string(),
                from_email: "avery@example.com".to_string(),
                message: "Hello from the test suite.".to_string(),
                to_email: "inbox@example.com".to_string(),
                reply_to: "avery@example.com".to_string(),
            },
        }
    }

    /// Serve exactly one HTTP request with a fixed response, returning the
    /// endpoint URL and a handle yielding the raw request text.
    fn one_shot_server(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(StdDuration::from_secs(5)))
                .unwrap();

            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = match stream.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(_) => break,
                };
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(str::to_string))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: text/plain\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (url, handle)
    }

    fn relay_for(endpoint: String) -> HttpRelay {
        let config = RelayConfig {
            endpoint,
            timeout_secs: 5,
            ..RelayConfig::default()
        };
        HttpRelay::new(&config).unwrap()
    }

    #[test]
    fn request_serializes_to_relay_contract() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["service_id"], "service_abc123");
        assert_eq!(json["user_id"], "key_abc123");
        assert_eq!(json["template_params"]["from_name"], "Avery Park");
        assert_eq!(json["template_params"]["reply_to"], "avery@example.com");
        // Exactly the fields the relay expects, nothing extra
        assert_eq!(json.as_object().unwrap().len(), 4);
        assert_eq!(json["template_params"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn http_relay_posts_json_and_accepts_2xx() {
        let (url, handle) = one_shot_server("200 OK", "OK");
        let relay = relay_for(url);

        relay.send(&sample_request()).unwrap();

        let raw = handle.join().unwrap();
        assert!(raw.starts_with("POST / HTTP/1.1"));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(raw.contains(r#""service_id":"service_abc123""#));
        assert!(raw.contains(r#""from_email":"avery@example.com""#));
    }

    #[test]
    fn http_relay_maps_non_2xx_to_rejected() {
        let (url, handle) = one_shot_server(
            "422 Unprocessable Entity",
            "The template ID not found.",
        );
        let relay = relay_for(url);

        let err = relay.send(&sample_request()).unwrap_err();
        handle.join().unwrap();

        match err {
            RelayError::Rejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "The template ID not found.");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn snippet_keeps_first_line_only() {
        assert_eq!(snippet("line one\nline two"), "line one");
        assert_eq!(snippet("  padded  "), "padded");
        let long = "x".repeat(300);
        assert_eq!(snippet(&long).chars().count(), 201); // 200 + ellipsis
    }

    #[test]
    fn mock_relay_records_and_scripts() {
        let mock = MockRelay::with_responses(vec![
            Err(RelayError::Rejected {
                status: 500,
                body: "boom".to_string(),
            }),
            Ok(()),
        ]);

        // Scripted responses pop from the end: Ok first, then the error
        assert!(mock.send(&sample_request()).is_ok());
        assert!(mock.send(&sample_request()).is_err());
        assert_eq!(mock.get_requests().len(), 2);
        assert_eq!(mock.get_requests()[0].service_id, "service_abc123");
    }
}
