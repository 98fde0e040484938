// Async HTTP client for the `products` REST resource.
//
// Base path: /api/
// Auth: optional `Authorization: Bearer` header (see `TransportConfig`)

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{Envelope, ProductBody, ProductResponse, RecordId};

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the products API.
///
/// Every call is a single request; there is no retry and no caching. The
/// caller owns local state and decides what to do with the result.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProductClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an endpoint and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers and TLS).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Append `/api/` to the endpoint unless the path already ends in `/api`.
    ///
    /// `http://localhost:3000`     -> `http://localhost:3000/api/`
    /// `https://shop.example/api/` -> `https://shop.example/api/`
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    /// The normalized base URL, always ending in `/api/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// `products/{id}` with the id percent-encoded as a single segment.
    fn product_url(&self, id: &RecordId) -> Result<Url, Error> {
        let mut url = self.url("products")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(&id.to_string());
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Success bodies are ignored (delete responses are unspecified).
    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let status_text = || {
            status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_owned(), str::to_owned)
        };

        let server_message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
            }) => Some(message),
            _ => None,
        };

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized {
                message: server_message.unwrap_or_else(|| "the API token was rejected".into()),
            };
        }

        let message = match server_message {
            Some(message) => message,
            None if raw.trim().is_empty() => status_text(),
            None => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /api/products`: the full collection, in server order.
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, Error> {
        let envelope: Envelope<Vec<ProductResponse>> = self.get(self.url("products")?).await?;
        Ok(envelope.data)
    }

    /// `POST /api/products`: returns the created item with its assigned id.
    pub async fn create_product(&self, body: &ProductBody) -> Result<ProductResponse, Error> {
        let envelope: Envelope<ProductResponse> = self.post(self.url("products")?, body).await?;
        Ok(envelope.data)
    }

    /// `PUT /api/products/{id}`: returns the server's canonical representation.
    pub async fn update_product(
        &self,
        id: &RecordId,
        body: &ProductBody,
    ) -> Result<ProductResponse, Error> {
        let envelope: Envelope<ProductResponse> = self.put(self.product_url(id)?, body).await?;
        Ok(envelope.data)
    }

    /// `DELETE /api/products/{id}`.
    pub async fn delete_product(&self, id: &RecordId) -> Result<(), Error> {
        self.delete(self.product_url(id)?).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::ProductClient;
    use crate::types::RecordId;

    fn client(raw: &str) -> ProductClient {
        ProductClient::from_reqwest(raw, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn base_url_gains_api_suffix() {
        assert_eq!(
            client("http://localhost:3000").base_url().as_str(),
            "http://localhost:3000/api/"
        );
        assert_eq!(
            client("http://localhost:3000/admin/").base_url().as_str(),
            "http://localhost:3000/admin/api/"
        );
    }

    #[test]
    fn existing_api_suffix_is_kept() {
        assert_eq!(
            client("https://shop.example/api").base_url().as_str(),
            "https://shop.example/api/"
        );
        assert_eq!(
            client("https://shop.example/api/").base_url().as_str(),
            "https://shop.example/api/"
        );
    }

    #[test]
    fn string_ids_are_escaped_as_one_segment() {
        let c = client("http://localhost:3000");
        let url = c.product_url(&RecordId::Text("a/b c".into())).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/products/a%2Fb%20c");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(ProductClient::from_reqwest("not a url", reqwest::Client::new()).is_err());
    }
}
