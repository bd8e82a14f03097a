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

//! Query the Alexa Web Information Service `urlInfo` action.
//!
//! One request per call: build it, sign it with SigV4, send it, and hand
//! back the body text whatever the status code is.
//!
//! ```no_run
//! use awis::{run, Config};
//! use awis_core::Context;
//! use awis_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() {
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! match run(ctx, &Config::default(), ["awis", "ak", "sk", "example.com"]).await {
//!     Ok(body) => println!("{body}"),
//!     Err(err) => println!("{err:?}"),
//! }
//! # }
//! ```

mod cli;
pub use cli::Args;
mod config;
pub use config::*;
mod request;
pub use request::build_request;

use awis_aws_v4::{RequestSigner, StaticCredentialProvider};
use awis_core::{Context, Result, Signer, SigningCredential};
use bytes::Bytes;
use log::{debug, warn};
use std::ffi::OsString;
use std::io::Write;

/// Send a signed url info request for `url` and return the body.
///
/// Non-2xx responses are not errors, their body is returned like any other.
/// Errors come from building, signing or sending the request.
pub async fn url_info<K: SigningCredential>(
    signer: &Signer<K>,
    config: &Config,
    url: &str,
) -> Result<String> {
    let mut parts = build_request(config, url)?;
    signer.sign(&mut parts).await?;

    let req = http::Request::from_parts(parts, Bytes::new());
    let resp = signer.context().http_send_as_string(req).await?;

    let status = resp.status();
    if status.is_success() {
        debug!("url info request succeeded with {status}");
    } else {
        warn!("url info request returned {status}");
    }

    Ok(resp.into_body())
}

/// Parse the command line and run one url info request.
///
/// `args` includes the program name. Argument errors are returned, never
/// printed or turned into an exit.
pub async fn run<I, T>(ctx: Context, config: &Config, args: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::parse_args(args)?;

    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new(&args.access_key, &args.secret_key),
        RequestSigner::new(&config.service, &config.region),
    );

    Ok(url_info(&signer, config, &args.url).await?)
}

/// Write the outcome of [`run`] to `w`.
///
/// The body on success, the error with its cause chain otherwise. Both end
/// with a newline.
pub fn report(w: &mut impl Write, outcome: &anyhow::Result<String>) -> std::io::Result<()> {
    match outcome {
        Ok(body) => writeln!(w, "{body}"),
        Err(err) => writeln!(w, "{err:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awis_core::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_body() -> anyhow::Result<()> {
        let mut out = Vec::new();
        report(&mut out, &Ok("<Rank>42</Rank>".to_string()))?;

        assert_eq!(String::from_utf8(out)?, "<Rank>42</Rank>\n");
        Ok(())
    }

    #[test]
    fn test_report_error() -> anyhow::Result<()> {
        let err = anyhow::Error::from(Error::unexpected("failed to send request"))
            .context("url info request failed");
        let mut out = Vec::new();
        report(&mut out, &Err(err))?;

        let out = String::from_utf8(out)?;
        assert!(out.starts_with("url info request failed"), "{out}");
        assert!(out.contains("unexpected error: failed to send request"), "{out}");
        assert!(!out.contains("<Rank>"));
        Ok(())
    }
}
