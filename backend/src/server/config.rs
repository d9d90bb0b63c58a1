//! HTTP server configuration object.

use user_directory::domain::ViewMode;

/// Listener and page selection for [`super::create_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) mode: ViewMode,
}

impl ServerConfig {
    /// Serve `mode` on `bind_addr` (anything `ToSocketAddrs` accepts, e.g.
    /// `localhost:8080`).
    #[must_use]
    pub fn new(bind_addr: impl Into<String>, mode: ViewMode) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            mode,
        }
    }
}
