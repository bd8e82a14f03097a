// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Reqwest-based HTTP client implementation for awis.
//!
//! ## Example
//!
//! ```no_run
//! use awis_core::Context;
//! use awis_http_send_reqwest::ReqwestHttpSend;
//! use reqwest::Client;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(Client::new()));
//! ```

use async_trait::async_trait;
use awis_core::{Error, HttpSend, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// The client's own defaults (timeouts, redirects, TLS) apply untouched.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(anyhow::Error::new(e))
        })?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::unexpected("failed to send request").with_source(anyhow::Error::new(e))
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::unexpected("failed to read response body")
                    .with_source(anyhow::Error::new(e))
            })?;
        debug!("received {} with {} bytes", parts.status, bs.len());

        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awis_core::{Context, ErrorKind};
    use http::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_context() -> anyhow::Result<Context> {
        let client = Client::builder().no_proxy().build()?;
        Ok(Context::new().with_http_send(ReqwestHttpSend::new(client)))
    }

    /// Serve a single canned response and return the raw request head.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind must succeed");
        let addr = listener.local_addr().expect("addr must be valid");

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept must succeed");
            let mut buf = vec![0; 4096];
            let mut head = Vec::new();
            while !head.ends_with(b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.expect("read must succeed");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write must succeed");
            stream.shutdown().await.expect("shutdown must succeed");
            String::from_utf8_lossy(&head).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn test_error_status_body_is_returned() -> anyhow::Result<()> {
        let (base, server) = serve_once(
            "HTTP/1.1 403 Forbidden\r\ncontent-length: 15\r\nconnection: close\r\n\r\n<Error></Error>",
        )
        .await;

        let ctx = local_context()?;
        let req = http::Request::get(format!("{base}/api?Action=urlInfo&Url=example.com"))
            .header("x-amz-date", "20220301T081234Z")
            .body(Bytes::new())?;
        let resp = ctx.http_send_as_string(req).await?;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.body(), "<Error></Error>");

        let head = server.await?;
        assert!(head.starts_with("GET /api?Action=urlInfo&Url=example.com HTTP/1.1\r\n"));
        assert!(head.contains("x-amz-date: 20220301T081234Z"));
        Ok(())
    }

    #[tokio::test]
    async fn test_connection_refused() -> anyhow::Result<()> {
        // Bind then drop to get a port nobody listens on.
        let addr = TcpListener::bind("127.0.0.1:0").await?.local_addr()?;

        let ctx = local_context()?;
        let req = http::Request::get(format!("http://{addr}/api")).body(Bytes::new())?;
        let err = ctx.http_send(req).await.expect_err("nothing listens there");

        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.message(), "failed to send request");
        Ok(())
    }
}
