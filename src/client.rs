//! HTTP client for the merchant REST API.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Every method performs exactly one request and either returns its value or
//! a single [`MerchantError`](crate::error::MerchantError) whose message
//! follows the fallback rules in [`message`].

mod message;

#[cfg(any(feature = "async", feature = "blocking"))]
use crate::download::DownloadKind;
#[cfg(any(feature = "async", feature = "blocking"))]
use crate::error::{MerchantError, Result};
#[cfg(any(feature = "async", feature = "blocking"))]
use crate::models::{MerchantId, MerchantQuery};

/// Default base URL of the merchant API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable that overrides the base URL.
pub const API_URL_ENV: &str = "MERCHANT_API_URL";

/// Collection endpoint path.
#[cfg(any(feature = "async", feature = "blocking"))]
const MERCHANTS_PATH: &str = "/merchants/";

/// Statistics endpoint path.
#[cfg(any(feature = "async", feature = "blocking"))]
const STATISTICS_PATH: &str = "/merchants/statistics/";

/// Fixed messages used when a failed call carries nothing better.
#[cfg(any(feature = "async", feature = "blocking"))]
mod fallback {
    /// Listing or searching merchants.
    pub(super) const LIST: &str = "Failed to fetch merchants";
    /// Fetching one merchant.
    pub(super) const GET: &str = "Failed to fetch merchant";
    /// Creating a merchant.
    pub(super) const CREATE: &str = "Failed to create merchant";
    /// Full or partial update.
    pub(super) const UPDATE: &str = "Failed to update merchant";
    /// Deleting a merchant.
    pub(super) const DELETE: &str = "Failed to delete merchant";
    /// Fetching statistics.
    pub(super) const STATISTICS: &str = "Failed to fetch statistics";
    /// CSV export.
    pub(super) const EXPORT: &str = "Failed to export data";
    /// Report generation.
    pub(super) const REPORT: &str = "Failed to generate report";
}

/// Item endpoint path for one merchant.
#[cfg(any(feature = "async", feature = "blocking"))]
fn merchant_path(id: MerchantId) -> String {
    format!("/merchants/{id}/")
}

/// Endpoint path and fallback message of a download.
#[cfg(any(feature = "async", feature = "blocking"))]
const fn download_route(kind: DownloadKind) -> (&'static str, &'static str) {
    match kind {
        DownloadKind::CsvExport => ("/merchants/export_csv/", fallback::EXPORT),
        DownloadKind::Report => ("/merchants/generate_report/", fallback::REPORT),
    }
}

/// Reads the base URL override from the environment, ignoring blank values.
#[cfg(any(feature = "async", feature = "blocking"))]
fn env_base_url() -> Option<String> {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Validates a base URL and strips trailing slashes so endpoint paths can be
/// appended verbatim.
#[cfg(any(feature = "async", feature = "blocking"))]
fn normalize_base_url(raw: Option<String>) -> Result<String> {
    let candidate = raw.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    let trimmed = candidate.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|err| MerchantError::Config(format!("invalid base URL {trimmed:?}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(MerchantError::Config(format!(
            "base URL must be an http(s) URL, got {trimmed:?}"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Appends the query's filters to `url`.
#[cfg(any(feature = "async", feature = "blocking"))]
fn with_query(url: &str, query: &MerchantQuery) -> Result<String> {
    let pairs = query.pairs();
    if pairs.is_empty() {
        return Ok(url.to_owned());
    }
    let mut parsed =
        url::Url::parse(url).map_err(|err| MerchantError::Config(format!("invalid URL: {err}")))?;
    {
        let mut serializer = parsed.query_pairs_mut();
        for (key, value) in &pairs {
            _ = serializer.append_pair(key, value);
        }
    }
    Ok(parsed.into())
}

/// Wraps a request that produced no response.
#[cfg(any(feature = "async", feature = "blocking"))]
fn transport_error(fallback: &str, source: reqwest::Error) -> MerchantError {
    tracing::debug!(error = %source, "request failed without a response");
    MerchantError::Transport {
        message: fallback.to_owned(),
        source: Box::new(source),
    }
}

/// Decodes a success body.
#[cfg(any(feature = "async", feature = "blocking"))]
fn decode_body<T: serde::de::DeserializeOwned>(body: &str, fallback: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| {
        tracing::debug!(error = %source, "undecodable success body");
        MerchantError::Decode {
            message: fallback.to_owned(),
            source,
        }
    })
}

/// Generates a merchant client (async or blocking) with builder, methods, and
/// tests.
#[cfg(any(feature = "async", feature = "blocking"))]
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        request_type: $req_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug, Default)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
        }

        impl $builder {
            /// Sets the API base URL, e.g. `http://localhost:8000/api`.
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Takes the base URL from the `MERCHANT_API_URL` environment
            /// variable when it is set and non-blank.
            #[inline]
            #[must_use]
            pub fn base_url_from_env(mut self) -> Self {
                if let Some(url) = env_base_url() {
                    self.base_url = Some(url);
                }
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`MerchantError::Config`] if the base URL is not an
            /// absolute http(s) URL or the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let base_url = normalize_base_url(self.base_url)?;
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder()
                    .build()
                    .map_err(|err| MerchantError::Config(err.to_string()))?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug, Clone)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// API base URL without a trailing slash.
            base_url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder { base_url: None }
            }

            /// Returns the base URL requests are sent to.
            #[inline]
            #[must_use]
            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            /// Lists every merchant via `GET /merchants/`.
            ///
            /// A paginated `results` envelope is unwrapped; a bare array is
            /// returned as-is. Order is the server's.
            ///
            /// # Errors
            ///
            /// Fails with the body's `message` field or
            /// `"Failed to fetch merchants"`.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn list_merchants(&self) -> Result<Vec<Merchant>> {
                tracing::debug!("listing merchants");
                let url = self.url(MERCHANTS_PATH);
                let page: MerchantPage = self.get_json(&url, fallback::LIST) $( .$await_ext )? ?;
                Ok(page.into_merchants())
            }

            /// Lists merchants matching server-side filters.
            ///
            /// # Errors
            ///
            /// Same as [`Self::list_merchants`].
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn search_merchants(
                &self,
                query: &MerchantQuery,
            ) -> Result<Vec<Merchant>> {
                tracing::debug!(?query, "searching merchants");
                let url = with_query(&self.url(MERCHANTS_PATH), query)?;
                let page: MerchantPage = self.get_json(&url, fallback::LIST) $( .$await_ext )? ?;
                Ok(page.into_merchants())
            }

            /// Fetches one merchant via `GET /merchants/{id}/`.
            ///
            /// # Errors
            ///
            /// Fails with the body's `message` field or
            /// `"Failed to fetch merchant"`.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn get_merchant(&self, id: MerchantId) -> Result<Merchant> {
                let url = self.url(&merchant_path(id));
                self.get_json(&url, fallback::GET) $( .$await_ext )?
            }

            /// Creates a merchant via `POST /merchants/`.
            ///
            /// # Errors
            ///
            /// Fails with the body's `error` field, else the serialized error
            /// body, else `"Failed to create merchant"`.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn create_merchant(
                &self,
                data: &MerchantFormData,
            ) -> Result<Merchant> {
                tracing::debug!(name = %data.name, "creating merchant");
                let builder = self.http.post(self.url(MERCHANTS_PATH));
                Self::send_json(builder, data, fallback::CREATE) $( .$await_ext )?
            }

            /// Replaces a merchant's editable fields via `PUT /merchants/{id}/`.
            ///
            /// # Errors
            ///
            /// Fails with the body's `error` field, else the serialized error
            /// body, else `"Failed to update merchant"`.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn update_merchant(
                &self,
                id: MerchantId,
                data: &MerchantFormData,
            ) -> Result<Merchant> {
                let builder = self.http.put(self.url(&merchant_path(id)));
                Self::send_json(builder, data, fallback::UPDATE) $( .$await_ext )?
            }

            /// Changes selected fields via `PATCH /merchants/{id}/`.
            ///
            /// # Errors
            ///
            /// Same as [`Self::update_merchant`].
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn patch_merchant(
                &self,
                id: MerchantId,
                patch: &MerchantPatch,
            ) -> Result<Merchant> {
                let builder = self.http.patch(self.url(&merchant_path(id)));
                Self::send_json(builder, patch, fallback::UPDATE) $( .$await_ext )?
            }

            /// Deletes a merchant via `DELETE /merchants/{id}/`.
            ///
            /// # Errors
            ///
            /// Fails with the body's `message` field or
            /// `"Failed to delete merchant"`.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_merchant(&self, id: MerchantId) -> Result<()> {
                let builder = self.http.delete(self.url(&merchant_path(id)));
                let _response = Self::execute(
                    builder,
                    MessageSource::MessageField,
                    fallback::DELETE,
                ) $( .$await_ext )? ?;
                tracing::debug!("merchant deleted");
                Ok(())
            }

            /// Fetches aggregate counts via `GET /merchants/statistics/`.
            ///
            /// # Errors
            ///
            /// Fails with the body's `message` field or
            /// `"Failed to fetch statistics"`.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn statistics(&self) -> Result<MerchantStatistics> {
                let url = self.url(STATISTICS_PATH);
                self.get_json(&url, fallback::STATISTICS) $( .$await_ext )?
            }

            /// Downloads the CSV export via `GET /merchants/export_csv/`.
            ///
            /// # Errors
            ///
            /// Fails with `"Failed to export data"`; the error body is not
            /// read.
            #[inline]
            pub $($async_kw)? fn export_csv(&self) -> Result<Download> {
                self.download(DownloadKind::CsvExport) $( .$await_ext )?
            }

            /// Downloads the JSON report via `GET /merchants/generate_report/`.
            ///
            /// # Errors
            ///
            /// Fails with `"Failed to generate report"`; the error body is
            /// not read.
            #[inline]
            pub $($async_kw)? fn generate_report(&self) -> Result<Download> {
                self.download(DownloadKind::Report) $( .$await_ext )?
            }

            /// Joins an endpoint path onto the base URL.
            fn url(&self, path: &str) -> String {
                format!("{}{path}", self.base_url)
            }

            /// Sends a GET request and deserializes the JSON response.
            #[tracing::instrument(skip_all, fields(url = %url))]
            $($async_kw)? fn get_json<T: serde::de::DeserializeOwned>(
                &self,
                url: &str,
                fallback: &str,
            ) -> Result<T> {
                tracing::trace!("sending GET request");
                let builder = self.http.get(url);
                let response = Self::execute(builder, MessageSource::MessageField, fallback)
                    $( .$await_ext )? ?;
                Self::read_json(response, fallback) $( .$await_ext )?
            }

            /// Sends a JSON body and deserializes the JSON response.
            $($async_kw)? fn send_json<
                Req: serde::Serialize $(+ $send_bound)?,
                Resp: serde::de::DeserializeOwned,
            >(
                builder: $req_type,
                body: &Req,
                fallback: &str,
            ) -> Result<Resp> {
                let request = builder
                    .header(CONTENT_TYPE, "application/json")
                    .json(body);
                let response = Self::execute(request, MessageSource::ErrorFieldOrBody, fallback)
                    $( .$await_ext )? ?;
                Self::read_json(response, fallback) $( .$await_ext )?
            }

            /// Sends a request, turning transport failures and non-success
            /// statuses into errors.
            $($async_kw)? fn execute(
                builder: $req_type,
                source: MessageSource,
                fallback: &str,
            ) -> Result<$resp_type> {
                let response = builder
                    .send()
                    $( .$await_ext )?
                    .map_err(|err| transport_error(fallback, err))?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    return Ok(response);
                }
                let body = response.text() $( .$await_ext )? .unwrap_or_default();
                let message = source.resolve(&body, fallback);
                tracing::debug!(status = status.as_u16(), message = %message, "API error");
                Err(MerchantError::Api {
                    status: status.as_u16(),
                    message,
                })
            }

            /// Reads and decodes a success body.
            $($async_kw)? fn read_json<T: serde::de::DeserializeOwned>(
                response: $resp_type,
                fallback: &str,
            ) -> Result<T> {
                let body = response
                    .text()
                    $( .$await_ext )?
                    .map_err(|err| transport_error(fallback, err))?;
                tracing::trace!(body_len = body.len(), "parsing response body");
                decode_body(&body, fallback)
            }

            /// Fetches a binary document and names it.
            #[tracing::instrument(skip_all, fields(kind = ?kind))]
            $($async_kw)? fn download(&self, kind: DownloadKind) -> Result<Download> {
                let (path, fallback) = download_route(kind);
                let builder = self.http.get(self.url(path));
                let response = Self::execute(builder, MessageSource::FallbackOnly, fallback)
                    $( .$await_ext )? ?;
                let disposition = response
                    .headers()
                    .get(CONTENT_DISPOSITION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                let bytes = response
                    .bytes()
                    $( .$await_ext )?
                    .map_err(|err| transport_error(fallback, err))?;
                tracing::debug!(bytes = bytes.len(), "download received");
                Ok(Download::new(
                    kind,
                    disposition.as_deref(),
                    Utc::now().date_naive(),
                    bytes.to_vec(),
                ))
            }
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use crate::client::DEFAULT_BASE_URL;

            #[test]
            fn builder_defaults_to_local_api() {
                let client = $client::builder().build().unwrap();
                assert_eq!(client.base_url(), DEFAULT_BASE_URL);
            }

            #[test]
            fn builder_custom_base_url_drops_trailing_slash() {
                let client = $client::builder()
                    .base_url("http://localhost:8080/api/")
                    .build()
                    .unwrap();
                assert_eq!(client.base_url(), "http://localhost:8080/api");
            }

            #[test]
            fn builder_rejects_relative_url() {
                let result = $client::builder().base_url("merchants").build();
                assert!(matches!(result, Err(MerchantError::Config(_))));
            }

            #[test]
            fn builder_rejects_non_http_scheme() {
                let result = $client::builder().base_url("ftp://example.com").build();
                assert!(matches!(result, Err(MerchantError::Config(_))));
            }

            #[test]
            fn item_urls_are_joined() {
                let client = $client::builder()
                    .base_url("http://api.test")
                    .build()
                    .unwrap();
                assert_eq!(
                    client.url(&merchant_path(MerchantId::new(5))),
                    "http://api.test/merchants/5/"
                );
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the merchant API.

    use chrono::Utc;
    use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

    use super::message::MessageSource;
    use super::{
        MERCHANTS_PATH, STATISTICS_PATH, decode_body, download_route, env_base_url, fallback,
        merchant_path, normalize_base_url, transport_error, with_query,
    };
    use crate::download::{Download, DownloadKind};
    use crate::error::{MerchantError, Result};
    use crate::models::{
        Merchant, MerchantFormData, MerchantId, MerchantPage, MerchantPatch, MerchantQuery,
        MerchantStatistics,
    };

    define_client! {
        client_name: MerchantClient,
        builder_name: MerchantClientBuilder,
        http_type: reqwest::Client,
        request_type: reqwest::RequestBuilder,
        response_type: reqwest::Response,
        client_doc: "Async client for the merchant API.\n\nUse [`MerchantClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`MerchantClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Sync,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the merchant API.

    use chrono::Utc;
    use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

    use super::message::MessageSource;
    use super::{
        MERCHANTS_PATH, STATISTICS_PATH, decode_body, download_route, env_base_url, fallback,
        merchant_path, normalize_base_url, transport_error, with_query,
    };
    use crate::download::{Download, DownloadKind};
    use crate::error::{MerchantError, Result};
    use crate::models::{
        Merchant, MerchantFormData, MerchantId, MerchantPage, MerchantPatch, MerchantQuery,
        MerchantStatistics,
    };

    define_client! {
        client_name: MerchantBlockingClient,
        builder_name: MerchantBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        request_type: reqwest::blocking::RequestBuilder,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the merchant API.\n\nUse [`MerchantBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`MerchantBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{MerchantClient, MerchantClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{MerchantBlockingClient, MerchantBlockingClientBuilder};
