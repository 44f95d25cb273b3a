use crate::url::CATCH_ALL_KEY;

/// Configuration of a [Router](crate::Router).
///
/// ```rust
/// # use segment_router::{Config, Router};
/// let router = Router::<()>::with_config(Config::new().catch_all_key("rest").root_catch_all(false));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) catch_all_key: &'static str,
    pub(crate) root_catch_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            catch_all_key: CATCH_ALL_KEY,
            root_catch_all: true,
        }
    }

    /// Key a trailing `*` segment binds the remainder of a matched url to.
    ///
    /// Default to `"blat"`.
    pub const fn catch_all_key(mut self, key: &'static str) -> Self {
        self.catch_all_key = key;
        self
    }

    /// Let a `*` route mounted at the top level also match the bare root path `/` when no route is
    /// mounted at `/` itself.
    ///
    /// Default to `true`.
    pub const fn root_catch_all(mut self, value: bool) -> Self {
        self.root_catch_all = value;
        self
    }
}
