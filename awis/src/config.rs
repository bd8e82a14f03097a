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

/// Endpoint of the AWIS api.
pub const DEFAULT_ENDPOINT: &str = "https://awis.us-west-1.amazonaws.com/api";
/// Service name used in the credential scope.
pub const DEFAULT_SERVICE: &str = "awis";
/// Region used in the credential scope.
pub const DEFAULT_REGION: &str = "us-west-1";
/// AWIS action to invoke.
pub const DEFAULT_ACTION: &str = "urlInfo";
/// Response group requested from the action.
pub const DEFAULT_RESPONSE_GROUP: &str = "Rank";

/// Config for the url info request.
///
/// [`Config::default`] targets the public AWIS endpoint. Nothing is read from
/// the environment or from files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Endpoint the request is sent to, without query.
    pub endpoint: String,
    /// Service name used for signing.
    pub service: String,
    /// Region used for signing.
    pub region: String,
    /// Value of the `Action` query parameter.
    pub action: String,
    /// Value of the `ResponseGroup` query parameter.
    pub response_group: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            region: DEFAULT_REGION.to_string(),
            action: DEFAULT_ACTION.to_string(),
            response_group: DEFAULT_RESPONSE_GROUP.to_string(),
        }
    }
}

impl Config {
    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the signing service and region.
    pub fn with_scope(mut self, service: &str, region: &str) -> Self {
        self.service = service.to_string();
        self.region = region.to_string();
        self
    }

    /// Set the response group.
    pub fn with_response_group(mut self, group: &str) -> Self {
        self.response_group = group.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_awis() {
        let cfg = Config::default();

        assert_eq!(cfg.endpoint, "https://awis.us-west-1.amazonaws.com/api");
        assert_eq!(cfg.service, "awis");
        assert_eq!(cfg.region, "us-west-1");
        assert_eq!(cfg.action, "urlInfo");
        assert_eq!(cfg.response_group, "Rank");
    }

    #[test]
    fn test_builders() {
        let cfg = Config::default()
            .with_endpoint("http://127.0.0.1:9000/api")
            .with_scope("awis", "us-east-1")
            .with_response_group("RankByCountry");

        assert_eq!(cfg.endpoint, "http://127.0.0.1:9000/api");
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.response_group, "RankByCountry");
        assert_eq!(cfg.action, DEFAULT_ACTION);
    }
}
