//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`. Everything in it is
//! read-only after startup, so requests share it without locking.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::DirectoryStore;
use crate::inbound::http::templates::{PageChrome, PageTemplates};

/// Dependency bundle for the directory page handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Store the pages read from.
    pub directory: Arc<dyn DirectoryStore>,
    /// Templates compiled at startup.
    pub templates: Arc<PageTemplates>,
    /// Source of the timestamp printed on each page.
    pub clock: Arc<dyn Clock>,
    /// Show the decorative emoji heading.
    pub use_emoji: bool,
}

impl HttpState {
    /// Bundle the handler dependencies.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use user_directory::domain::ports::InMemoryDirectoryStore;
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::inbound::http::templates::PageTemplates;
    ///
    /// let templates = PageTemplates::compile().expect("templates compile");
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryDirectoryStore::new()),
    ///     Arc::new(templates),
    ///     Arc::new(DefaultClock),
    ///     false,
    /// );
    /// assert!(!state.use_emoji);
    /// ```
    pub fn new(
        directory: Arc<dyn DirectoryStore>,
        templates: Arc<PageTemplates>,
        clock: Arc<dyn Clock>,
        use_emoji: bool,
    ) -> Self {
        Self {
            directory,
            templates,
            clock,
            use_emoji,
        }
    }

    /// Page decorations for a response rendered now.
    pub fn chrome(&self) -> PageChrome {
        PageChrome {
            use_emoji: self.use_emoji,
            now: self.clock.utc(),
        }
    }
}
