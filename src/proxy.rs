//! Pass-through relay for documents hosted on the registry (or anywhere
//! else: no allow-list is applied to the requested URL).
//!
//! A download runs in two stages. [`StreamProxy::fetch`] opens the upstream
//! response and hands back its status, headers and a body stream without
//! reading the body. [`relay`] turns that into an outgoing response whose
//! headers are fixed before the first body chunk is written.

use std::io;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::Response,
};
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use reqwest::Client;

use crate::error::AppError;

const DOWNLOAD_FAILED: &str = "Failed to download the file";

/// Connection-level headers describe the upstream hop only; the server sets
/// its own framing for the outgoing response.
const HOP_BY_HOP: [HeaderName; 6] = [
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
];

pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// An upstream response whose body has not been consumed yet.
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ByteStream,
}

impl UpstreamResponse {
    /// Wraps a fixed byte source; used where no network is involved.
    pub fn from_stream<S>(status: StatusCode, headers: HeaderMap, body: S) -> UpstreamResponse
    where
        S: futures::Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        UpstreamResponse {
            status,
            headers,
            body: body.boxed(),
        }
    }
}

pub struct StreamProxy {
    client: Client,
}

impl StreamProxy {
    pub fn new(client: Client) -> StreamProxy {
        StreamProxy { client }
    }

    /// Fetches `url` and relays it.
    pub async fn download(&self, url: &str) -> Result<Response, AppError> {
        let upstream = self.fetch(url).await?;
        Ok(relay(upstream))
    }

    /// Opens the upstream response. Fails before any byte is relayed when
    /// the URL is blank, the connection cannot be made, or upstream answers
    /// with a non-success status.
    pub async fn fetch(&self, url: &str) -> Result<UpstreamResponse, AppError> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("URL is required".to_string()));
        }
        log::info!("proxying download: {url}");

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::upstream(DOWNLOAD_FAILED, e))?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                DOWNLOAD_FAILED,
                anyhow::anyhow!("upstream returned {status} for {url}"),
            ));
        }

        let headers = res.headers().clone();
        let source = url.to_string();
        let body = res
            .bytes_stream()
            .map_err(move |e| {
                log::error!("download of {source} aborted mid-stream: {e}");
                io::Error::other(e)
            })
            .boxed();

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

/// Builds the outgoing response: upstream status and end-to-end headers
/// first, then the body piped through chunk by chunk.
///
/// Dropping the returned response (e.g. the client went away) drops the
/// upstream stream and with it the upstream connection.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let UpstreamResponse {
        status,
        headers,
        body,
    } = upstream;

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = status;
    let out = response.headers_mut();
    for (name, value) in headers.iter() {
        if HOP_BY_HOP.contains(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    response
}
