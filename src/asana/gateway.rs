// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Single point of contact with the Asana REST API (authenticated GET, JSON envelope decoding)
// role: asana/gateway
// inputs: base URL, bearer token, relative request paths
// outputs: serde_json::Value bodies; typed payloads via fetch_data
// side_effects: Network calls to the configured base URL
// invariants:
// - Every request carries `Authorization: Bearer <token>` and a 10 second timeout
// - No retries; the first failure is returned to the caller
// - Errors carry the relative path (InvalidPath/Shape) or the absolute URL (Transport/Status/Decode)
// errors: ApiError
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::ext::serde_json::JsonFetch;
use crate::model::Envelope;

pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0/";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// --- Trait seam for the Asana API ---
// Shared by reference across the aggregation workers, hence Send + Sync.
pub trait Gateway: Send + Sync {
  /// GET `path` (relative to the base URL) and return the parsed JSON body.
  fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError>;
}

/// GET `path` and decode the `data` member of the response envelope as `T`.
pub fn fetch_data<T, G>(gateway: &G, path: &str) -> Result<T, ApiError>
where
  T: DeserializeOwned,
  G: Gateway + ?Sized,
{
  let body = gateway.get_json(path)?;
  let envelope: Envelope<T> = serde_json::from_value(body).map_err(|source| ApiError::Shape {
    path: path.to_string(),
    source,
  })?;

  Ok(envelope.data)
}

pub struct HttpGateway {
  base_url: Url,
  auth_header: String,
  agent: ureq::Agent,
}

impl HttpGateway {
  pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
    let mut base = Url::parse(base_url).map_err(|source| ApiError::InvalidPath {
      path: base_url.to_string(),
      source,
    })?;

    // Url::join drops the last segment unless the base ends in '/'.
    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }

    let agent = ureq::AgentBuilder::new()
      .timeout(REQUEST_TIMEOUT)
      .user_agent(concat!("standup-reporter/", env!("CARGO_PKG_VERSION")))
      .build();

    Ok(Self {
      base_url: base,
      auth_header: format!("Bearer {}", token),
      agent,
    })
  }

  fn resolve(&self, path: &str) -> Result<Url, ApiError> {
    self.base_url.join(path).map_err(|source| ApiError::InvalidPath {
      path: path.to_string(),
      source,
    })
  }
}

impl Gateway for HttpGateway {
  fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError> {
    let url = self.resolve(path)?;
    tracing::debug!(%url, "GET");

    let response = match self
      .agent
      .get(url.as_str())
      .set("Accept", "application/json")
      .set("Authorization", &self.auth_header)
      .call()
    {
      Ok(r) => r,
      Err(ureq::Error::Status(status, r)) => {
        let message = r
          .into_string()
          .ok()
          .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
          .and_then(|v| v.fetch("errors.0.message").to::<String>());

        return Err(ApiError::Status {
          url: url.to_string(),
          status,
          message,
        });
      }
      Err(ureq::Error::Transport(t)) => {
        return Err(ApiError::Transport {
          url: url.to_string(),
          source: Box::new(t),
        })
      }
    };

    let body = response.into_string().map_err(|e| ApiError::Transport {
      url: url.to_string(),
      source: Box::new(e),
    })?;

    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
      url: url.to_string(),
      source,
    })
  }
}
