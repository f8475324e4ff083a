//! Console state shared by the shell and every screen.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::session::{FileBackend, SessionBackend, SessionContext};

/// Configuration, session and API client, created once per process.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    session: SessionContext,
    api: ApiClient,
}

impl Console {
    /// Build a console whose session lives in `config.session_file`.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Network` if the HTTP client fails to build.
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let backend = FileBackend::new(config.session_file.clone());
        Self::with_backend(config, backend)
    }

    /// Build a console over a custom session backend.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Network` if the HTTP client fails to build.
    pub fn with_backend(
        config: ConsoleConfig,
        backend: impl SessionBackend + 'static,
    ) -> Result<Self, ConsoleError> {
        Self::with_session(config, SessionContext::new(backend))
    }

    /// Build a console over an existing session context.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Network` if the HTTP client fails to build.
    pub fn with_session(config: ConsoleConfig, session: SessionContext) -> Result<Self, ConsoleError> {
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            inner: Arc::new(ConsoleInner {
                config,
                session,
                api,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("config", &self.inner.config)
            .field("api", &self.inner.api)
            .finish_non_exhaustive()
    }
}
