//! The mock server facade used by tests.

use std::net::SocketAddr;
use std::ops::Index;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::{validate_config, MockConfig};
use crate::expectations::{AssertionResult, ErrorSlot};
use crate::handler::RouteHandler;
use crate::http::{AppState, MockHttpServer, RouteTable};
use crate::lifecycle::Shutdown;
use crate::mock::types::{MockError, MockResult};
use crate::net::{bind_in_range, thread_rng_port};

/// A running mock HTTP server and the expectations registered with it.
///
/// ```no_run
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// use mock_requests::{MockRequests, RouteHandler};
///
/// let requests = MockRequests::start(vec![
///     RouteHandler::fixed("/custom/endpoint", "sample response"),
/// ])
/// .await?;
///
/// // ... point the client under test at requests.url() ...
///
/// requests.assert_called_exactly_once_each()?;
/// requests.shutdown().await;
/// # Ok(())
/// # }
/// ```
///
/// Dropping the value stops the server as well; [`MockRequests::shutdown`]
/// additionally waits for the listener to close.
pub struct MockRequests {
    url: Url,
    addr: SocketAddr,
    routes: Arc<RouteTable>,
    errors: Arc<ErrorSlot>,
    shutdown: Shutdown,
    server: Option<JoinHandle<()>>,
}

impl MockRequests {
    /// Start a server with the default configuration on a random port.
    pub async fn start(handlers: Vec<RouteHandler>) -> MockResult<Self> {
        Self::start_with_config(MockConfig::default(), handlers).await
    }

    /// Start a server with a custom configuration on a random port.
    pub async fn start_with_config(config: MockConfig, handlers: Vec<RouteHandler>) -> MockResult<Self> {
        Self::start_with_random(config, thread_rng_port, handlers).await
    }

    /// Start a server drawing candidate ports from `random`.
    ///
    /// `random(min, max)` must return a port in `[min, max)`; ports that are
    /// already in use are skipped by drawing again.
    pub async fn start_with_random<R>(
        config: MockConfig,
        mut random: R,
        handlers: Vec<RouteHandler>,
    ) -> MockResult<Self>
    where
        R: FnMut(u16, u16) -> u16 + Send,
    {
        validate_config(&config).map_err(MockError::Config)?;
        let routes = Arc::new(RouteTable::new(handlers)?);
        let errors = Arc::new(ErrorSlot::new());

        let bound = bind_in_range(&config, &mut random).await?;
        let addr = bound.listener.local_addr()?;
        let url = Url::parse(&format!("http://{}:{}/", config.host, bound.port))?;

        let state = AppState {
            routes: routes.clone(),
            errors: errors.clone(),
            body_limit: config.body_limit_bytes,
        };
        let server = MockHttpServer::new(&config, state);
        let (shutdown, shutdown_rx) = Shutdown::channel();

        let handle = tokio::spawn(async move {
            if let Err(e) = server.run(bound.listener, shutdown_rx).await {
                tracing::error!(error = %e, "Mock HTTP server failed");
            }
        });

        tracing::info!(
            url = %url,
            routes = routes.routes().len(),
            "Mock requests ready"
        );

        Ok(Self {
            url,
            addr,
            routes,
            errors,
            shutdown,
            server: Some(handle),
        })
    }

    /// Base URL requests should be sent to, e.g. `http://localhost:8123/`.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Base URL as a parsed [`Url`].
    pub fn base_url(&self) -> &Url {
        &self.url
    }

    /// Absolute URL for `path` relative to the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        self.url.join(path.trim_start_matches('/'))
    }

    /// Port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Socket address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Registered handlers, in registration order.
    pub fn handlers(&self) -> &[RouteHandler] {
        self.routes.routes()
    }

    /// Handler registered at `index`, if any.
    pub fn handler(&self, index: usize) -> Option<&RouteHandler> {
        self.routes.routes().get(index)
    }

    /// Return the deferred handler error, if any, and clear it.
    pub fn assert_no_deferred_error(&self) -> AssertionResult {
        match self.errors.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Check that every route received exactly the calls it was configured
    /// for. A deferred handler error is reported before any count mismatch.
    pub fn assert_called_exactly_once_each(&self) -> AssertionResult {
        self.assert_no_deferred_error()?;

        for route in self.routes.routes() {
            route.check_calls()?;
        }
        Ok(())
    }

    /// Stop the server and wait for the listener to close.
    pub async fn shutdown(mut self) {
        self.shutdown.trigger();
        if let Some(handle) = self.server.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Mock HTTP server task did not finish cleanly");
            }
        }
    }
}

impl Index<usize> for MockRequests {
    type Output = RouteHandler;

    fn index(&self, index: usize) -> &Self::Output {
        &self.routes.routes()[index]
    }
}

impl Drop for MockRequests {
    fn drop(&mut self) {
        self.shutdown.trigger();
        if let Some(handle) = self.server.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for MockRequests {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRequests")
            .field("url", &self.url.as_str())
            .field("routes", &self.routes.routes())
            .finish()
    }
}
