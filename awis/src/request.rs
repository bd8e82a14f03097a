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

use crate::Config;
use awis_core::Result;
use http::request::Parts;
use http::Uri;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes `http::Uri` refuses anywhere in a uri.
///
/// Everything else in the url, reserved characters included, is kept as is.
static URI_REJECTED_SET: AsciiSet = CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>');

/// Build the unsigned url info request.
///
/// `url` is appended to the query as-is, so reserved characters in it end up
/// as extra query syntax. Only when the result is not a valid uri are the
/// rejected bytes of `url` percent encoded, and the request is sent anyway.
pub fn build_request(config: &Config, url: &str) -> Result<Parts> {
    let raw = format!(
        "{}?Action={}&ResponseGroup={}&Url={}",
        config.endpoint, config.action, config.response_group, url
    );
    let uri = match Uri::try_from(raw.as_str()) {
        Ok(uri) => uri,
        Err(err) => {
            debug!("url is not valid in a uri ({err}), escaping rejected bytes");
            Uri::try_from(format!(
                "{}?Action={}&ResponseGroup={}&Url={}",
                config.endpoint,
                config.action,
                config.response_group,
                utf8_percent_encode(url, &URI_REJECTED_SET)
            ))?
        }
    };
    debug!("built request uri: {uri}");

    let (parts, _) = http::Request::get(uri).body(())?.into_parts();
    Ok(parts)
}
