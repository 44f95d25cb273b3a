use core::{error, fmt};

use alloc::string::String;

/// Represents errors that can occur when parsing a url or template.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A querystring value contained an undecodable percent escape.
    MalformedQueryValue {
        /// The key the malformed value was registered under.
        key: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedQueryValue { key } => {
                write!(f, "querystring value of key {key:?} is not a valid percent-encoded string")
            }
        }
    }
}

impl error::Error for ParseError {}

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// Attempted to insert a route that resolves to the same trie position as an existing one.
    Conflict {
        /// The route being inserted.
        route: String,
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
    /// Wildcard segments are only allowed at the end of a route.
    InvalidWildcard {
        /// The offending route.
        route: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { route, with } => {
                write!(f, "route {route} conflicts with previously mounted route: {with}")
            }
            Self::InvalidWildcard { route } => {
                write!(f, "route {route} cannot have path segments after the wildcard (*)")
            }
        }
    }
}

impl error::Error for InsertError {}

/// Http method outside of the supported set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnsupportedMethod(pub String);

impl fmt::Display for UnsupportedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported method: {}", self.0)
    }
}

impl error::Error for UnsupportedMethod {}

/// Error type of [Router::mount](crate::Router::mount).
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MountError {
    /// Route template failed to parse.
    Parse(ParseError),
    /// Route template could not be inserted into the trie.
    Insert(InsertError),
    /// Route name is already taken by another mounted route.
    DuplicateName {
        /// The duplicate name.
        name: String,
        /// Url of the route already registered under the name.
        with: String,
    },
    /// Route method is not supported.
    Method(UnsupportedMethod),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => fmt::Display::fmt(e, f),
            Self::Insert(e) => fmt::Display::fmt(e, f),
            Self::DuplicateName { name, with } => {
                write!(f, "route name {name} is already mounted for {with}")
            }
            Self::Method(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for MountError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Insert(e) => Some(e),
            Self::Method(e) => Some(e),
            Self::DuplicateName { .. } => None,
        }
    }
}

impl From<ParseError> for MountError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<InsertError> for MountError {
    fn from(e: InsertError) -> Self {
        Self::Insert(e)
    }
}

impl From<UnsupportedMethod> for MountError {
    fn from(e: UnsupportedMethod) -> Self {
        Self::Method(e)
    }
}

/// Error type of [Router::match_route](crate::Router::match_route) and [Router::route](crate::Router::route).
///
/// A url that does not match any route is not an error.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Requested url failed to parse.
    Parse(ParseError),
    /// Requested method is not supported.
    Method(UnsupportedMethod),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => fmt::Display::fmt(e, f),
            Self::Method(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for MatchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Method(e) => Some(e),
        }
    }
}

impl From<ParseError> for MatchError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<UnsupportedMethod> for MatchError {
    fn from(e: UnsupportedMethod) -> Self {
        Self::Method(e)
    }
}
