use serde::Serialize;
use serde_json::Value;
use smith_core::api::{DispatchError, ProviderInitError};

const BODY_PREVIEW_LIMIT: usize = 512;

pub(crate) fn build_client() -> Result<reqwest::Client, ProviderInitError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ProviderInitError::Client(e.to_string()))
}

/// Read the API key from the environment variable named by the provider config.
pub(crate) fn read_secret(var: &str) -> Result<String, ProviderInitError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ProviderInitError::MissingSecret(var.to_string())),
    }
}

fn from_reqwest(err: reqwest::Error, url: &str) -> DispatchError {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else {
        "request"
    };
    DispatchError::Request {
        url: url.to_string(),
        message: format!("{kind}: {err}"),
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

/// POST `payload` as JSON and decode a JSON reply; non-2xx is a `Status` error.
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    req: reqwest::RequestBuilder,
    url: &str,
    payload: &T,
) -> Result<Value, DispatchError> {
    let resp = req
        .json(payload)
        .send()
        .await
        .map_err(|err| from_reqwest(err, url))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|err| from_reqwest(err, url))?;

    if !status.is_success() {
        return Err(DispatchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: preview_body(&body),
        });
    }

    serde_json::from_str::<Value>(&body).map_err(|err| DispatchError::Decode {
        url: url.to_string(),
        message: format!("{err} | body={}", preview_body(&body)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_read_secret_rejects_blank() {
        std::env::set_var("SMITH_HTTP_TEST_BLANK_KEY", "  ");
        assert!(matches!(
            read_secret("SMITH_HTTP_TEST_BLANK_KEY"),
            Err(ProviderInitError::MissingSecret(name)) if name == "SMITH_HTTP_TEST_BLANK_KEY"
        ));
        assert!(read_secret("SMITH_HTTP_TEST_UNSET_KEY").is_err());
    }
}
