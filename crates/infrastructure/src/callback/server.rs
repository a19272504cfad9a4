//! Callback listener built on axum.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use tamis_application::CallbackHandler;
use tamis_domain::{CallbackQuery, ClientSettings};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::page;

/// Errors from the callback listener.
#[derive(Debug, Error)]
pub enum CallbackServerError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("callback server error: {0}")]
    Serve(std::io::Error),

    /// No provider redirect arrived in time.
    #[error("no OAuth callback received within {} seconds", .0.as_secs())]
    TimedOut(Duration),

    /// The server stopped without receiving a redirect.
    #[error("callback server stopped before receiving a redirect")]
    Closed,
}

/// Configuration of the callback listener.
#[derive(Debug, Clone)]
pub struct CallbackServer {
    addr: String,
    path: String,
    timeout: Duration,
}

impl CallbackServer {
    /// Creates a listener for `addr` serving `path`.
    #[must_use]
    pub fn new(addr: impl Into<String>, path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            path: path.into(),
            timeout,
        }
    }

    /// Creates a listener from the configured address, path and timeout.
    #[must_use]
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(
            settings.callback_addr.clone(),
            settings.normalized_callback_path(),
            settings.callback_timeout(),
        )
    }

    /// Binds the listen address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is taken or invalid.
    pub async fn bind(self) -> Result<BoundCallbackServer, CallbackServerError> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| CallbackServerError::Bind {
                addr: self.addr.clone(),
                source,
            })?;
        Ok(BoundCallbackServer {
            listener,
            path: self.path,
            timeout: self.timeout,
        })
    }
}

/// A bound listener, ready to serve.
#[derive(Debug)]
pub struct BoundCallbackServer {
    listener: TcpListener,
    path: String,
    timeout: Duration,
}

#[derive(Clone)]
struct ListenerState {
    handler: Arc<dyn CallbackHandler>,
    received: Arc<watch::Sender<Option<CallbackQuery>>>,
}

impl BoundCallbackServer {
    /// The address actually bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be read.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves redirects until one carries a `code` or an `error`.
    ///
    /// Every request is handed to `handler`; its status message is sent
    /// back as the page body. Returns the query that ended the wait.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing arrives before the timeout or the server
    /// fails.
    pub async fn serve(
        self,
        handler: Arc<dyn CallbackHandler>,
    ) -> Result<CallbackQuery, CallbackServerError> {
        let (tx, rx) = watch::channel(None);
        let state = ListenerState {
            handler,
            received: Arc::new(tx),
        };
        let app = Router::new()
            .route(&self.path, get(receive))
            .with_state(state);

        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(%addr, path = %self.path, "waiting for OAuth callback");
        }

        let mut shutdown = rx.clone();
        let server = axum::serve(self.listener, app).with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(Option::is_some).await;
        });

        match tokio::time::timeout(self.timeout, server).await {
            Err(_) => Err(CallbackServerError::TimedOut(self.timeout)),
            Ok(Err(e)) => Err(CallbackServerError::Serve(e)),
            Ok(Ok(())) => rx.borrow().clone().ok_or(CallbackServerError::Closed),
        }
    }
}

async fn receive(
    State(state): State<ListenerState>,
    Query(query): Query<CallbackQuery>,
) -> Html<String> {
    let finished = query.is_provider_response();
    let message = state.handler.on_callback(query.clone()).await;
    if finished {
        state.received.send_replace(Some(query));
    }
    Html(page::render(&message))
}
