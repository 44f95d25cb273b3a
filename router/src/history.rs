//! Keep a navigation history in sync with application state.
//!
//! A page is described by a url template. Its state is split into the `url` part, which is
//! serialized into the address through [UrlStructure::render_for_state], and `extras` which only
//! travel with history entries.
//!
//! ```rust
//! # use segment_router::history::{History, MemoryHistory, StateChange, StateSync};
//! # fn main() -> Result<(), segment_router::ParseError> {
//! let history = MemoryHistory::new("https://example.com/search/rust?page=2");
//! let mut sync = StateSync::attach("/search/{query}", history, |state| {
//!     println!("render page for {:?}", state.url);
//! })?;
//!
//! assert_eq!(sync.state().url.get("query"), Some("rust"));
//! assert_eq!(sync.state().url.get("page"), Some("2"));
//!
//! sync.modify_state(StateChange::new().set_url("page", "3"))?;
//! assert_eq!(sync.history().location(), "/search/rust?page=3");
//! # Ok(())
//! # }
//! ```

use alloc::string::String;

use tracing::debug;

use super::{params::Params, url::UrlStructure, ParseError, Vec};

/// State of a page.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageState {
    /// State mirrored into the page url.
    pub url: Params,
    /// State carried by history entries only.
    pub extras: Params,
}

/// Abstraction over a navigation history such as the one of a web browser.
pub trait History {
    /// Current location. May be a full url including scheme and host.
    fn location(&self) -> String;

    /// State attached to the current entry.
    ///
    /// Must return `None` for entries that were not created by [History::push_state] or
    /// [History::replace_state], e.g. on a cold start or after navigation from outside.
    fn state(&self) -> Option<PageState>;

    /// Add a new entry after the current one.
    fn push_state(&mut self, state: PageState, url: String);

    /// Overwrite the current entry.
    fn replace_state(&mut self, state: PageState, url: String);
}

#[derive(Clone, Debug)]
struct Entry {
    url: String,
    state: Option<PageState>,
}

/// In memory [History] with back and forward navigation.
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    entries: Vec<Entry>,
    cursor: usize,
}

impl MemoryHistory {
    /// Construct a history with a single stateless entry.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry {
                url: url.into(),
                state: None,
            }],
            cursor: 0,
        }
    }

    /// Navigate to a url without state, as following a plain link would. Forward entries are dropped.
    pub fn navigate(&mut self, url: impl Into<String>) {
        self.push(Entry {
            url: url.into(),
            state: None,
        });
    }

    /// Move to the previous entry. Returns `false` when already at the first one.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move to the next entry. Returns `false` when already at the last one.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, entry: Entry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.cursor].url.clone()
    }

    fn state(&self) -> Option<PageState> {
        self.entries[self.cursor].state.clone()
    }

    fn push_state(&mut self, state: PageState, url: String) {
        self.push(Entry {
            url,
            state: Some(state),
        });
    }

    fn replace_state(&mut self, state: PageState, url: String) {
        self.entries[self.cursor] = Entry {
            url,
            state: Some(state),
        };
    }
}

/// A batch of edits applied by [StateSync::modify_state].
///
/// `None` values remove a key, `Some` values insert or overwrite it.
#[derive(Clone, Debug, Default)]
pub struct StateChange {
    url: Vec<(String, Option<String>)>,
    extras: Vec<(String, Option<String>)>,
    replace: bool,
}

impl StateChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.url.push((key.into(), value));
        self
    }

    pub fn set_url(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url(key, Some(value.into()))
    }

    pub fn remove_url(self, key: impl Into<String>) -> Self {
        self.url(key, None)
    }

    pub fn extra(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.extras.push((key.into(), value));
        self
    }

    pub fn set_extra(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra(key, Some(value.into()))
    }

    pub fn remove_extra(self, key: impl Into<String>) -> Self {
        self.extra(key, None)
    }

    /// Replace the current history entry instead of pushing a new one.
    pub fn replace(mut self, value: bool) -> Self {
        self.replace = value;
        self
    }
}

fn apply(params: &mut Params, edits: Vec<(String, Option<String>)>) {
    for (key, value) in edits {
        match value {
            Some(value) => {
                params.insert(key, value);
            }
            None => {
                params.remove(key);
            }
        }
    }
}

/// Synchronizes a [History] with the state of a page described by a url template.
pub struct StateSync<H, F> {
    template: UrlStructure,
    history: H,
    on_change: F,
    state: PageState,
}

impl<H, F> StateSync<H, F>
where
    H: History,
    F: FnMut(&PageState),
{
    /// Attach to a history with the url template of the page.
    ///
    /// State is synced right away and `on_change` is invoked with it.
    pub fn attach(template: &str, history: H, on_change: F) -> Result<Self, ParseError> {
        let mut this = Self {
            template: UrlStructure::parse(template)?,
            history,
            on_change,
            state: PageState::default(),
        };
        this.sync()?;
        Ok(this)
    }

    /// Resync after the history moved to another entry, e.g. on a browser `popstate` event.
    pub fn pop_state(&mut self) -> Result<(), ParseError> {
        self.sync()
    }

    /// Apply a change to the page state and record it in the history.
    pub fn modify_state(&mut self, change: StateChange) -> Result<(), ParseError> {
        let StateChange { url, extras, replace } = change;

        apply(&mut self.state.url, url);
        apply(&mut self.state.extras, extras);

        let url = self.template.render_for_state(&self.state.url);
        debug!(url = %url, replace, "record history entry");

        if replace {
            self.history.replace_state(self.state.clone(), url);
        } else {
            self.history.push_state(self.state.clone(), url);
        }

        self.sync()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn template(&self) -> &UrlStructure {
        &self.template
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    fn sync(&mut self) -> Result<(), ParseError> {
        self.state = match self.history.state() {
            Some(state) => state,
            None => PageState {
                url: self.template.extract_parameters(&self.history.location())?,
                extras: Params::new(),
            },
        };
        (self.on_change)(&self.state);
        Ok(())
    }
}
