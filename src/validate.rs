//! Schema validation adapter.
//!
//! Validation itself happens outside the crate: a [`SchemaValidator`] takes a
//! JSON document and a JSON schema and reports every violation it finds. Two
//! transports ship with the crate, an external program ([`CommandValidator`])
//! and an HTTP endpoint ([`HttpValidator`]). Both speak the same protocol:
//!
//! ```text
//! request:  {"document": <json>, "schema": <json>}
//! response: {"valid": bool, "violations": [{"path": "...", "message": "..."}]}
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidateError;

/// Result type for validation operations.
pub type ValidateResult<T> = std::result::Result<T, ValidateError>;

/// Default timeout for schema downloads and HTTP validators.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One schema violation, located by JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    /// Turn a failed validation into [`ValidateError::SchemaValidation`]
    /// carrying every violation.
    pub fn into_result(self) -> ValidateResult<()> {
        if self.valid && self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::SchemaValidation {
                violations: self.violations,
            })
        }
    }
}

/// Checks a JSON document against a JSON schema.
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, document: &Value, schema: &Value) -> ValidateResult<ValidationResult>;
}

#[derive(Serialize)]
struct ValidationRequest<'a> {
    document: &'a Value,
    schema: &'a Value,
}

fn request_body(document: &Value, schema: &Value) -> ValidateResult<String> {
    serde_json::to_string(&ValidationRequest { document, schema }).map_err(|e| {
        ValidateError::Validator {
            message: format!("cannot encode validation request: {e}"),
        }
    })
}

fn parse_response(body: &str) -> ValidateResult<ValidationResult> {
    serde_json::from_str(body).map_err(|e| ValidateError::Validator {
        message: format!("unreadable validator response: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Schema sources
// ---------------------------------------------------------------------------

/// Where the JSON schema comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSource {
    Url(String),
    File(PathBuf),
    Inline(Value),
}

impl SchemaSource {
    /// Pick a source from a CLI or config string: `http(s)://` is a URL,
    /// anything else a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SchemaSource::Url(location.to_string())
        } else {
            SchemaSource::File(PathBuf::from(location))
        }
    }

    fn location(&self) -> String {
        match self {
            SchemaSource::Url(url) => url.clone(),
            SchemaSource::File(path) => path.display().to_string(),
            SchemaSource::Inline(_) => "<inline>".to_string(),
        }
    }

    /// Load the schema document.
    pub fn fetch(&self, timeout: Duration) -> ValidateResult<Value> {
        let fetch_error = |message: String| ValidateError::SchemaFetch {
            location: self.location(),
            message,
        };
        let schema: Value = match self {
            SchemaSource::Inline(schema) => return Ok(schema.clone()),
            SchemaSource::File(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|e| fetch_error(e.to_string()))?;
                serde_json::from_str(&text).map_err(|e| fetch_error(e.to_string()))?
            }
            SchemaSource::Url(url) => {
                let agent = ureq::AgentBuilder::new().timeout(timeout).build();
                match agent.get(url).call() {
                    Ok(response) => response
                        .into_json()
                        .map_err(|e| fetch_error(e.to_string()))?,
                    Err(ureq::Error::Status(code, _)) => {
                        return Err(fetch_error(format!("HTTP {code}")));
                    }
                    Err(ureq::Error::Transport(t)) => return Err(fetch_error(t.to_string())),
                }
            }
        };
        tracing::debug!(location = %self.location(), "schema loaded");
        Ok(schema)
    }
}

// ---------------------------------------------------------------------------
// External program
// ---------------------------------------------------------------------------

/// Runs an external validator program per document.
///
/// The request goes to the program's stdin, the response is read from its
/// stdout. A non-zero exit status without a readable response is a validator
/// failure, not a violation.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    program: String,
    args: Vec<String>,
}

impl CommandValidator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Build from a whitespace-separated command line.
    pub fn from_command_line(line: &str) -> ValidateResult<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next().ok_or_else(|| ValidateError::Validator {
            message: "empty validator command".into(),
        })?;
        Ok(parts.fold(Self::new(program), |v, arg| v.arg(arg)))
    }
}

impl SchemaValidator for CommandValidator {
    fn validate(&self, document: &Value, schema: &Value) -> ValidateResult<ValidationResult> {
        let body = request_body(document, schema)?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ValidateError::Validator {
                message: format!("failed to spawn {}: {e}", self.program),
            })?;

        // Feed stdin from a separate thread so a chatty child cannot block us.
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || stdin.write_all(body.as_bytes()))
        });
        let output = child.wait_with_output().map_err(|e| ValidateError::Validator {
            message: format!("failed to wait on {}: {e}", self.program),
        })?;
        if let Some(writer) = writer {
            // A validator may legitimately stop reading early.
            let _ = writer.join();
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_response(&stdout) {
            Ok(result) => {
                tracing::debug!(
                    program = %self.program,
                    valid = result.valid,
                    violations = result.violations.len(),
                    "validator answered"
                );
                Ok(result)
            }
            Err(_) if !output.status.success() => Err(ValidateError::Validator {
                message: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP endpoint
// ---------------------------------------------------------------------------

/// Posts validation requests to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpValidator {
    endpoint: String,
    timeout: Duration,
}

impl HttpValidator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SchemaValidator for HttpValidator {
    fn validate(&self, document: &Value, schema: &Value) -> ValidateResult<ValidationResult> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        match agent
            .post(&self.endpoint)
            .send_json(ValidationRequest { document, schema })
        {
            Ok(resp) => resp.into_json().map_err(|e| ValidateError::Validator {
                message: format!("unreadable response from {}: {e}", self.endpoint),
            }),
            // Some validators answer violations with 4xx and a result body.
            Err(ureq::Error::Status(code, resp)) => {
                resp.into_json().map_err(|_| ValidateError::Validator {
                    message: format!("{} answered HTTP {code}", self.endpoint),
                })
            }
            Err(ureq::Error::Transport(t)) => Err(ValidateError::Validator {
                message: format!("cannot reach {}: {t}", self.endpoint),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_result_keeps_every_violation() {
        let result = ValidationResult {
            valid: false,
            violations: vec![
                Violation::new("$.submodels[0].id", "required"),
                Violation::new("$.submodels[0].idShort", "pattern"),
            ],
        };
        match result.into_result() {
            Err(ValidateError::SchemaValidation { violations }) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[1].path, "$.submodels[0].idShort");
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
        assert!(ValidationResult::valid().into_result().is_ok());
    }

    #[test]
    fn response_without_violations_defaults_to_empty() {
        let result = parse_response(r#"{"valid": true}"#).unwrap();
        assert_eq!(result, ValidationResult::valid());
        assert!(matches!(
            parse_response("not json"),
            Err(ValidateError::Validator { .. })
        ));
    }

    #[test]
    fn schema_source_parse_distinguishes_urls() {
        assert_eq!(
            SchemaSource::parse("https://example.org/aas.json"),
            SchemaSource::Url("https://example.org/aas.json".into())
        );
        assert_eq!(
            SchemaSource::parse("schemas/aas.json"),
            SchemaSource::File(PathBuf::from("schemas/aas.json"))
        );
    }

    #[test]
    fn schema_fetch_from_file_and_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"type": "object"}"#).unwrap();
        let timeout = Duration::from_secs(1);

        let schema = SchemaSource::File(path).fetch(timeout).unwrap();
        assert_eq!(schema, json!({"type": "object"}));
        let inline = SchemaSource::Inline(json!(true)).fetch(timeout).unwrap();
        assert_eq!(inline, json!(true));
    }

    #[test]
    fn missing_schema_file_is_a_fetch_error() {
        let err = SchemaSource::File(PathBuf::from("/nonexistent/schema.json"))
            .fetch(Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ValidateError::SchemaFetch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn command_validator_reads_the_response() {
        let validator = CommandValidator::new("sh").arg("-c").arg(
            r#"cat >/dev/null; echo '{"valid":false,"violations":[{"path":"$.x","message":"bad"}]}'"#,
        );
        let result = validator.validate(&json!({}), &json!({})).unwrap();
        assert!(!result.valid);
        assert_eq!(result.violations, vec![Violation::new("$.x", "bad")]);
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_without_response_is_a_validator_error() {
        let validator = CommandValidator::from_command_line("grep -q modelType").unwrap();
        // The request carries no modelType, so grep exits 1 and prints nothing.
        let err = validator
            .validate(&json!({"a": 1}), &json!({}))
            .unwrap_err();
        assert!(matches!(err, ValidateError::Validator { .. }));
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(CommandValidator::from_command_line("   ").is_err());
    }

    #[test]
    fn unreachable_http_validator_is_a_validator_error() {
        let validator = HttpValidator::new("http://127.0.0.1:9/validate")
            .with_timeout(Duration::from_millis(200));
        let err = validator.validate(&json!({}), &json!({})).unwrap_err();
        assert!(matches!(err, ValidateError::Validator { .. }));
    }

    /// Answer one HTTP request with `status` and `body`; yields the request body.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, std::thread::JoinHandle<String>) {
        use std::io::{BufRead, BufReader, Read};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/validate", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    length = value.trim().parse().unwrap();
                }
            }
            let mut request = vec![0; length];
            reader.read_exact(&mut request).unwrap();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            String::from_utf8(request).unwrap()
        });
        (url, handle)
    }

    #[test]
    fn http_validator_posts_the_request_and_reads_the_result() {
        let (url, server) = serve_once("200 OK", r#"{"valid": true}"#);
        let result = HttpValidator::new(url)
            .validate(&json!({"submodels": []}), &json!({"type": "object"}))
            .unwrap();
        assert_eq!(result, ValidationResult::valid());

        let request: Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(
            request,
            json!({"document": {"submodels": []}, "schema": {"type": "object"}})
        );
    }

    #[test]
    fn http_error_status_with_a_result_body_still_reports_violations() {
        let (url, server) = serve_once(
            "422 Unprocessable Entity",
            r#"{"valid": false, "violations": [{"path": "$.id", "message": "required"}]}"#,
        );
        let result = HttpValidator::new(url)
            .validate(&json!({}), &json!({}))
            .unwrap();
        server.join().unwrap();
        assert!(!result.valid);
        assert_eq!(result.violations, vec![Violation::new("$.id", "required")]);
    }
}
