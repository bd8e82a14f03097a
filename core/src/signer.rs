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

use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use log::warn;
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Sign the request in place.
    ///
    /// The cached credential is reused while it's valid, otherwise it's
    /// loaded again. An invalid credential is still handed to the builder,
    /// the remote service decides whether to accept it.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        let cred = if cred.is_valid() {
            cred
        } else {
            let cred = self.loader.provide_credential(&self.ctx).await?;
            if !cred.is_valid() {
                warn!("loaded credential is empty or invalid, signing anyway");
            }
            *self.credential.lock().expect("lock poisoned") = cred.clone();
            cred
        };

        self.builder
            .sign_request(&self.ctx, req, cred.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::request::Parts;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct CountingLoader {
        value: String,
        count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProvideCredential for CountingLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential(self.value.clone())))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    #[async_trait]
    impl SignRequest for HeaderSigner {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut Parts,
            credential: Option<&Self::Credential>,
        ) -> Result<()> {
            let value = credential.map(|c| c.0.as_str()).unwrap_or("none");
            req.headers.insert("x-test-credential", value.parse()?);
            Ok(())
        }
    }

    fn parts() -> Parts {
        http::Request::get("https://example.com/")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_valid_credential_is_cached() -> anyhow::Result<()> {
        let count = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            value: "key".to_string(),
            count: count.clone(),
        };
        let signer = Signer::new(Context::new(), loader, HeaderSigner);

        let mut req = parts();
        signer.sign(&mut req).await?;
        let mut req = parts();
        signer.sign(&mut req).await?;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(req.headers["x-test-credential"], "key");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_credential_is_reloaded_and_still_signed() -> anyhow::Result<()> {
        let count = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            value: String::new(),
            count: count.clone(),
        };
        let signer = Signer::new(Context::new(), loader, HeaderSigner);

        let mut req = parts();
        signer.sign(&mut req).await?;
        let mut req = parts();
        signer.sign(&mut req).await?;

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(req.headers["x-test-credential"], "");
        Ok(())
    }
}
