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

use awis::Config;
use awis_core::Context;
use awis_http_send_reqwest::ReqwestHttpSend;

// Both outcomes go to stdout and the process exits with 0 either way.
#[tokio::main]
async fn main() {
    env_logger::init();

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let outcome = awis::run(ctx, &Config::default(), std::env::args_os()).await;
    if let Err(err) = awis::report(&mut std::io::stdout().lock(), &outcome) {
        log::error!("failed to write output: {err}");
    }
}
