use core::{fmt, str::FromStr};

use alloc::{borrow::Cow, string::String};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{params::Params, ParseError, Vec};

/// Key a trailing wildcard segment binds its captured remainder to.
pub const CATCH_ALL_KEY: &str = "blat";

pub(crate) const WILDCARD: &str = "*";

// characters left untouched when encoding a querystring value. mirrors the set browsers keep
// verbatim for uri components.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Classification of a single path segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Segment<'a> {
    /// Literal text matching only itself.
    Static(&'a str),
    /// A named capture written as `{name}`.
    Dynamic(&'a str),
    /// A trailing `*` capturing every remaining segment.
    Wildcard,
}

impl<'a> Segment<'a> {
    pub fn classify(segment: &'a str) -> Self {
        if segment == WILDCARD {
            Self::Wildcard
        } else if let Some(key) = UrlStructure::segment_key(segment) {
            Self::Dynamic(key)
        } else {
            Self::Static(segment)
        }
    }
}

/// Structural form of a url or a route template.
///
/// A url is reduced to its path segments and its querystring. Empty path segments are discarded so
/// leading, trailing and duplicate slashes carry no meaning:
///
/// ```rust
/// # use segment_router::UrlStructure;
/// # fn main() -> Result<(), segment_router::ParseError> {
/// let url = UrlStructure::parse("https://example.com:8080//about/team/?tab=people")?;
/// assert_eq!(url.segments(), ["about", "team"]);
/// assert_eq!(url.querystring().get("tab"), Some("people"));
/// assert_eq!(url.to_string(), "/about/team?tab=people");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UrlStructure {
    segments: Vec<String>,
    querystring: Params,
}

impl UrlStructure {
    /// Parse a url or template.
    ///
    /// A leading `scheme://host[:port]` prefix is stripped. Leading, trailing and repeated slashes are
    /// otherwise insignificant. Querystring values are percent-decoded while keys are kept verbatim.
    /// A pair without `=` yields an empty value.
    ///
    /// # Errors
    ///
    /// [ParseError::MalformedQueryValue] when a querystring value holds an invalid percent escape or
    /// does not decode to utf-8.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let url = strip_origin(input);
        let url = url.split_once('#').map_or(url, |(url, _)| url);

        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        let segments = path.split('/').filter(|s| !s.is_empty()).map(String::from).collect();

        let mut querystring = Params::new();
        for pair in query.into_iter().flat_map(|q| q.split('&')).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            querystring.insert(key, decode_component(key, value)?);
        }

        Ok(Self { segments, querystring })
    }

    /// Returns `true` when segment is written as `{name}`.
    pub fn is_segment_key(segment: &str) -> bool {
        segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
    }

    /// Returns the name between the braces of a `{name}` segment.
    pub fn segment_key(segment: &str) -> Option<&str> {
        if Self::is_segment_key(segment) {
            Some(&segment[1..segment.len() - 1])
        } else {
            None
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn querystring(&self) -> &Params {
        &self.querystring
    }

    /// Path part in canonical form. Always starts with `/` and never ends with one unless it's the
    /// root path.
    pub fn path(&self) -> String {
        let mut path = String::from("/");
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                path.push('/');
            }
            path.push_str(segment);
        }
        path
    }

    /// Render template into a concrete url with values from given state.
    ///
    /// Dynamic segments take the state value under their name and are left out entirely when the
    /// state lacks one. Wildcard segments never render. State entries not consumed by the path are
    /// appended as a percent-encoded querystring.
    ///
    /// ```rust
    /// # use segment_router::{Params, UrlStructure};
    /// # fn main() -> Result<(), segment_router::ParseError> {
    /// let template = UrlStructure::parse("/about/{key}/test")?;
    /// let state = Params::from_iter([("key", "value"), ("q", "a b")]);
    /// assert_eq!(template.render_for_state(&state), "/about/value/test?q=a%20b");
    /// # Ok(())
    /// # }
    /// ```
    pub fn render_for_state(&self, state: &Params) -> String {
        let mut keys = Vec::new();
        let mut url = String::from("/");
        let mut empty = true;

        for segment in self.segments.iter() {
            let value = match Segment::classify(segment) {
                Segment::Static(value) => Some(value),
                Segment::Dynamic(key) => {
                    keys.push(key);
                    state.get(key).filter(|v| !v.is_empty())
                }
                Segment::Wildcard => None,
            };

            if let Some(value) = value {
                if !empty {
                    url.push('/');
                }
                url.push_str(value);
                empty = false;
            }
        }

        let mut separator = '?';
        for (key, value) in state.iter().filter(|(key, _)| !keys.contains(key)) {
            url.push(separator);
            url.push_str(key);
            url.push('=');
            url.extend(utf8_percent_encode(value, COMPONENT));
            separator = '&';
        }

        url
    }

    /// Extract parameters of a concrete url by its positional correspondence to this template.
    ///
    /// A trailing wildcard binds [CATCH_ALL_KEY]. See [UrlStructure::extract_parameters_with].
    pub fn extract_parameters(&self, url: &str) -> Result<Params, ParseError> {
        self.extract_parameters_with(url, CATCH_ALL_KEY)
    }

    /// Extract parameters of a concrete url, binding the wildcard remainder to `catch_all_key`.
    ///
    /// Querystring entries of the url are added for keys not already bound by the path. Every value
    /// stays a string.
    ///
    /// ```rust
    /// # use segment_router::UrlStructure;
    /// # fn main() -> Result<(), segment_router::ParseError> {
    /// let template = UrlStructure::parse("/about/{key}/*")?;
    /// let params = template.extract_parameters("/about/value1/value2/value3?key=ignored&n=1")?;
    /// assert_eq!(params.get("key"), Some("value1"));
    /// assert_eq!(params.get("blat"), Some("value2/value3"));
    /// assert_eq!(params.get("n"), Some("1"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_parameters_with(&self, url: &str, catch_all_key: &str) -> Result<Params, ParseError> {
        UrlStructure::parse(url).map(|url| self.extract_from(&url, catch_all_key))
    }

    pub(crate) fn extract_from(&self, url: &UrlStructure, catch_all_key: &str) -> Params {
        let mut params = Params::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            match Segment::classify(segment) {
                Segment::Dynamic(key) => {
                    if let Some(value) = url.segments.get(idx) {
                        params.insert(key, value.as_str());
                    }
                }
                Segment::Wildcard => {
                    let rest = url.segments.get(idx..).unwrap_or_default();
                    params.insert(catch_all_key, rest.join("/"));
                }
                Segment::Static(_) => {}
            }
        }

        for (key, value) in url.querystring.iter() {
            params.insert_absent(key, value);
        }

        params
    }
}

impl FromStr for UrlStructure {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;

        let mut separator = '?';
        for (key, value) in self.querystring.iter() {
            write!(f, "{separator}{key}={}", utf8_percent_encode(value, COMPONENT))?;
            separator = '&';
        }

        Ok(())
    }
}

// strip a leading `scheme://host[:port]`. what is left begins at the first `/`, `?` or `#` after the
// host. input starting with `//` has no scheme and is kept as a path.
fn strip_origin(input: &str) -> &str {
    let rest = match input.find("//") {
        Some(idx) if is_scheme(&input[..idx]) => &input[idx + 2..],
        _ => return input,
    };

    match rest.find(|c| matches!(c, '/' | '?' | '#')) {
        Some(idx) => &rest[idx..],
        None => "",
    }
}

fn is_scheme(prefix: &str) -> bool {
    let Some(scheme) = prefix.strip_suffix(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn decode_component(key: &str, value: &str) -> Result<String, ParseError> {
    let malformed = || ParseError::MalformedQueryValue { key: String::from(key) };

    // percent_decode passes through invalid escapes. reject them up front.
    let bytes = value.as_bytes();
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'%') {
        let at = i + offset;
        match bytes.get(at + 1..at + 3) {
            Some(&[h, l]) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit() => i = at + 3,
            _ => return Err(malformed()),
        }
    }

    percent_decode_str(value)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| malformed())
}
