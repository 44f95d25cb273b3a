use core::{fmt, str::FromStr};

use alloc::{collections::BTreeMap, string::String};

use tracing::{debug, trace, warn};

use super::{
    config::Config,
    error::{MatchError, MountError, UnsupportedMethod},
    params::Params,
    tree::{Leaf, Node},
    url::UrlStructure,
};

/// Http methods a route can be mounted on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Normalized lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Get, Self::Post, Self::Put, Self::Delete]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedMethod(String::from(s)))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked by [Router::route] with the extracted parameters and optional caller data.
pub trait Handler<D> {
    fn call(&self, params: &Params, data: Option<D>);
}

impl<F, D> Handler<D> for F
where
    F: Fn(&Params, Option<D>),
{
    fn call(&self, params: &Params, data: Option<D>) {
        (self)(params, data)
    }
}

/// Description of a route passed to [Router::mount].
pub struct Mount<T> {
    method: String,
    url: String,
    value: T,
    name: Option<String>,
}

macro_rules! method {
    ($method_fn: ident, $method: ident) => {
        pub fn $method_fn<T>(url: impl Into<String>, value: T) -> Mount<T> {
            Mount::new(Method::$method.as_str(), url, value)
        }
    };
}

method!(get, Get);
method!(post, Post);
method!(put, Put);
method!(delete, Delete);

impl<T> Mount<T> {
    /// Method is matched case-insensitively and validated when mounted.
    pub fn new(method: impl Into<String>, url: impl Into<String>, value: T) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            value,
            name: None,
        }
    }

    /// Register the route under a name for reverse lookup with [Router::named_route].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A route registered with a name.
#[derive(Clone, Debug)]
pub struct NamedRoute {
    method: Method,
    url: String,
    template: UrlStructure,
}

impl NamedRoute {
    pub fn method(&self) -> Method {
        self.method
    }

    /// The url template as given at mount time.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn template(&self) -> &UrlStructure {
        &self.template
    }

    /// See [UrlStructure::render_for_state].
    pub fn render(&self, state: &Params) -> String {
        self.template.render_for_state(state)
    }
}

/// A url router holding one route trie per http method.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct Router<T> {
    config: Config,
    trees: BTreeMap<Method, Node<T>>,
    names: BTreeMap<String, NamedRoute>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Construct a new router.
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    /// Construct a new router with given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            trees: BTreeMap::new(),
            names: BTreeMap::new(),
        }
    }

    /// Mount a route.
    ///
    /// Returns the router for chaining. A failed mount leaves the router untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use segment_router::{get, post, Router};
    /// # fn main() -> Result<(), segment_router::MountError> {
    /// let mut router = Router::new();
    /// router
    ///     .mount(get("/", "home"))?
    ///     .mount(get("/users/{id}", "user").name("user"))?
    ///     .mount(post("/users", "create user"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn mount(&mut self, mount: Mount<T>) -> Result<&mut Self, MountError> {
        let url = mount.url.clone();
        match self.try_mount(mount) {
            Ok(()) => Ok(self),
            Err(e) => {
                warn!(url = %url, error = %e, "route mount rejected");
                Err(e)
            }
        }
    }

    fn try_mount(&mut self, mount: Mount<T>) -> Result<(), MountError> {
        let Mount { method, url, value, name } = mount;

        let method = method.parse::<Method>()?;
        let template = UrlStructure::parse(&url)?;

        if let Some(name) = name.as_deref() {
            if let Some(existing) = self.names.get(name) {
                return Err(MountError::DuplicateName {
                    name: String::from(name),
                    with: existing.url.clone(),
                });
            }
        }

        let named = name.map(|name| {
            let route = NamedRoute {
                method,
                url: url.clone(),
                template: template.clone(),
            };
            (name, route)
        });

        match self.trees.get_mut(&method) {
            Some(tree) => tree.insert(template, value)?,
            None => {
                let mut tree = Node::new();
                tree.insert(template, value)?;
                self.trees.insert(method, tree);
            }
        }

        debug!(method = method.as_str(), url = %url, name = ?named.as_ref().map(|(n, _)| n), "route mounted");

        if let Some((name, route)) = named {
            self.names.insert(name, route);
        }

        Ok(())
    }

    /// Tries to find the route matching given method and url.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use segment_router::{get, Router};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.mount(get("/about/{value}", "about"))?;
    ///
    /// let leaf = router.match_route("GET", "/about/us?lang=en")?.unwrap();
    /// assert_eq!(*leaf.value(), "about");
    ///
    /// assert!(router.match_route("POST", "/about/us")?.is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn match_route(&self, method: &str, url: &str) -> Result<Option<&Leaf<T>>, MatchError> {
        let method = method.parse::<Method>()?;
        let concrete = UrlStructure::parse(url)?;
        let leaf = self.at(method, &concrete);
        trace!(method = method.as_str(), url, matched = leaf.is_some(), "match route");
        Ok(leaf)
    }

    /// Tries to find the route matching an already parsed url.
    pub fn at(&self, method: Method, url: &UrlStructure) -> Option<&Leaf<T>> {
        self.trees.get(&method)?.at_with(url, self.config.root_catch_all)
    }

    /// Match a url, call the matched route's handler and return the extracted parameters.
    ///
    /// Returns `Ok(None)` without calling any handler when nothing matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use segment_router::{get, Params, Router};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.mount(get("/{a}/{b}", |params: &Params, _: Option<()>| {
    ///     assert_eq!(params.get("a"), Some("123"));
    /// }))?;
    ///
    /// let params = router.route("GET", "/123/true?c=890", None::<()>)?.unwrap();
    /// assert_eq!(params.get("b"), Some("true"));
    /// assert_eq!(params.get("c"), Some("890"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn route<D>(&self, method: &str, url: &str, data: Option<D>) -> Result<Option<Params>, MatchError>
    where
        T: Handler<D>,
    {
        let method = method.parse::<Method>()?;
        let concrete = UrlStructure::parse(url)?;

        let Some(leaf) = self.at(method, &concrete) else {
            trace!(method = method.as_str(), url, "no route");
            return Ok(None);
        };

        let params = leaf.template().extract_from(&concrete, self.config.catch_all_key);
        trace!(method = method.as_str(), url, route = %leaf.template(), "dispatch route");
        leaf.value().call(&params, data);

        Ok(Some(params))
    }

    /// Look up a route registered with [Mount::name].
    pub fn named_route(&self, name: &str) -> Option<&NamedRoute> {
        self.names.get(name)
    }

    /// Render the url of a named route for given state.
    pub fn url_for(&self, name: &str, state: &Params) -> Option<String> {
        self.named_route(name).map(|route| route.render(state))
    }

    /// Methods that have at least one route mounted.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.trees.iter().filter(|(_, tree)| !tree.is_empty()).map(|(method, _)| *method)
    }
}
