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

use clap::Parser;
use std::ffi::OsString;

/// Positional arguments: `awis <access_key> <secret_key> <url>`.
///
/// There are no flags. Values starting with `-` are taken literally and
/// anything after the third value is ignored.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "awis", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Access key id.
    #[arg(allow_hyphen_values = true)]
    pub access_key: String,
    /// Secret access key.
    #[arg(allow_hyphen_values = true)]
    pub secret_key: String,
    /// Url to look up, sent without encoding.
    #[arg(allow_hyphen_values = true)]
    pub url: String,
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    rest: Vec<OsString>,
}

impl Args {
    /// Parse args, the first item is the program name.
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Self::try_parse_from(args)?;
        if !args.rest.is_empty() {
            log::debug!("ignoring {} extra arguments", args.rest.len());
        }
        Ok(args)
    }
}
