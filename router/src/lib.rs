//! A segment trie url router with template rendering for keeping navigation history in sync with
//! application state.
//!
//!```rust
//!use segment_router::{get, Router};
//!
//!fn main() -> Result<(), Box<dyn core::error::Error>> {
//!    let mut router = Router::new();
//!    router.mount(get("/home", "Welcome!"))?;
//!    router.mount(get("/users/{id}", "A User"))?;
//!
//!    let matched = router.match_route("GET", "/users/978")?.unwrap();
//!    assert_eq!(*matched.value(), "A User");
//!
//!    let params = matched.template().extract_parameters("/users/978")?;
//!    assert_eq!(params.get("id"), Some("978"));
//!
//!    Ok(())
//!}
//!```
//!
//!# Templates
//!
//!A template is split into segments on `/`. Empty segments are dropped so leading, trailing and
//!repeated slashes have no meaning and `/about/`, `/about` and `about` are the same template.
//!
//!- A segment written as `{name}` is dynamic. It matches any single segment and binds it to `name`.
//!- A lone `*` is a wildcard. It matches every remaining segment at once and binds them joined by `/`
//!  to `blat`. It is only allowed as the final segment.
//!- Any other segment is static and only matches itself.
//!
//!```rust
//!# use segment_router::{get, InsertError, MountError, Router};
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.mount(get("/files/{owner}/*", ()))?;
//!
//!let matched = router.match_route("GET", "/files/alice/docs/2024/report.pdf")?.unwrap();
//!let params = matched.template().extract_parameters("/files/alice/docs/2024/report.pdf")?;
//!assert_eq!(params.get("owner"), Some("alice"));
//!assert_eq!(params.get("blat"), Some("docs/2024/report.pdf"));
//!
//!assert!(matches!(
//!    router.mount(get("/files/*/latest", ())),
//!    Err(MountError::Insert(InsertError::InvalidWildcard { .. }))
//!));
//!# Ok(())
//!# }
//!```
//!
//!# Parameters
//!
//!Querystring entries of a matched url are merged into the extracted parameters. Path bindings
//!always win over a querystring key of the same name and no value is ever converted from a string.
//!
//!```rust
//!# use segment_router::{get, Params, Router};
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.mount(get("/about/{value}", |_: &Params, _: Option<()>| {}))?;
//!
//!let params = router.route("GET", "/about/ABC?value=XYZ&page=2", None::<()>)?.unwrap();
//!assert_eq!(params.get("value"), Some("ABC"));
//!assert_eq!(params.get("page"), Some("2"));
//!# Ok(())
//!# }
//!```
//!
//!# Precedence
//!
//!At every segment a static route is preferred over a dynamic one which is preferred over a
//!wildcard, regardless of mount order:
//!
//!```rust
//!# use segment_router::{get, Router};
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.mount(get("*", "anything"))?;
//!router.mount(get("/about/{value}", "dynamic"))?;
//!router.mount(get("/about/test", "static"))?;
//!
//!let value = |url| router.match_route("GET", url).map(|m| m.map(|m| *m.value()));
//!assert_eq!(value("/about/test")?, Some("static"));
//!assert_eq!(value("/about/other")?, Some("dynamic"));
//!assert_eq!(value("/about/other/deeper")?, Some("anything"));
//!assert_eq!(value("/")?, Some("anything"));
//!# Ok(())
//!# }
//!```
//!
//!# Conflict Rules
//!
//!The name of a dynamic segment is not part of the trie. Two templates that only differ by the names
//!of their dynamic segments end at the same position and conflict:
//!
//!```rust
//!# use segment_router::{get, InsertError, MountError, Router};
//!let mut router = Router::new();
//!router.mount(get("/about/{a}", ())).unwrap();
//!
//!assert_eq!(
//!    router.mount(get("/about/{b}", ())).err(),
//!    Some(MountError::Insert(InsertError::Conflict {
//!        route: "/about/{b}".into(),
//!        with: "/about/{a}".into(),
//!    }))
//!);
//!```

#![forbid(unsafe_code)]
#![no_std]

#[macro_use]
extern crate alloc;

mod config;
mod error;
mod router;
mod tree;
mod url;

pub mod history;
pub mod params;

pub use config::Config;
pub use error::{InsertError, MatchError, MountError, ParseError, UnsupportedMethod};
pub use params::Params;
pub use router::{delete, get, post, put, Handler, Method, Mount, NamedRoute, Router};
pub use tree::{Leaf, Node};
pub use url::{Segment, UrlStructure, CATCH_ALL_KEY};

use alloc::vec::Vec;
use xitca_unsafe_collection::small_str::SmallBoxedStr as SmallStr;
