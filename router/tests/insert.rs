use segment_router::{get, post, InsertError, MountError, Node, Router, UrlStructure};

struct InsertTest(Vec<(&'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut tree = Node::new();
        for (route, expected) in self.0 {
            let template = UrlStructure::parse(route).unwrap();
            let got = tree.insert(template, route.to_owned());
            assert_eq!(got, expected, "{route}");
        }
    }
}

fn conflict(route: &'static str, with: &'static str) -> InsertError {
    InsertError::Conflict {
        route: route.into(),
        with: with.into(),
    }
}

fn invalid_wildcard(route: &'static str) -> InsertError {
    InsertError::InvalidWildcard { route: route.into() }
}

#[test]
fn duplicate_static() {
    InsertTest(vec![
        ("/about", Ok(())),
        ("/about", Err(conflict("/about", "/about"))),
        ("/about/", Err(conflict("/about", "/about"))),
        ("about", Err(conflict("/about", "/about"))),
        ("/about/us", Ok(())),
    ])
    .run()
}

#[test]
fn root() {
    InsertTest(vec![
        ("/", Ok(())),
        ("", Err(conflict("/", "/"))),
        ("//", Err(conflict("/", "/"))),
        ("/about", Ok(())),
    ])
    .run()
}

#[test]
fn duplicate_dynamic() {
    InsertTest(vec![
        ("/about/{value}", Ok(())),
        ("/about/{otherValue}", Err(conflict("/about/{otherValue}", "/about/{value}"))),
        ("/about/{value}/test", Ok(())),
        ("/about/{otherValue}/test", Err(conflict("/about/{otherValue}/test", "/about/{value}/test"))),
        ("/about/{otherValue}/other", Ok(())),
    ])
    .run()
}

#[test]
fn static_and_dynamic_coexist() {
    InsertTest(vec![
        ("/about/test", Ok(())),
        ("/about/{value}", Ok(())),
        ("/about/*", Ok(())),
        ("/{section}/test", Ok(())),
        ("/{section}/{value}", Ok(())),
        ("/{section}/*", Ok(())),
    ])
    .run()
}

#[test]
fn wildcard_position() {
    InsertTest(vec![
        ("/*/about", Err(invalid_wildcard("/*/about"))),
        ("*/{value}", Err(invalid_wildcard("/*/{value}"))),
        ("/about/*/*", Err(invalid_wildcard("/about/*/*"))),
        ("*", Ok(())),
        ("/*", Err(conflict("/*", "/*"))),
        ("/about/*", Ok(())),
        ("/about/*/", Err(conflict("/about/*", "/about/*"))),
    ])
    .run()
}

#[test]
fn star_inside_segment_is_static() {
    InsertTest(vec![("/a*", Ok(())), ("/**", Ok(())), ("/a*/b", Ok(()))]).run()
}

#[test]
fn querystring_is_not_part_of_route() {
    InsertTest(vec![("/search?q=1", Ok(())), ("/search?q=2", Err(conflict("/search", "/search")))]).run()
}

#[test]
fn failed_insert_does_not_affect_match() {
    let mut tree = Node::new();
    assert!(tree.insert(UrlStructure::parse("/a/*/b").unwrap(), 1).is_err());

    let url = UrlStructure::parse("/a/anything").unwrap();
    assert!(tree.at(&url).is_none());
    assert!(tree.is_empty());
}

#[test]
fn mount_errors() {
    let mut router = Router::new();
    router.mount(get("/about", 1).name("about")).unwrap();

    assert_eq!(
        router.mount(get("/about", 2)).err(),
        Some(MountError::Insert(conflict("/about", "/about")))
    );

    assert_eq!(
        router.mount(post("/contact", 3).name("about")).err(),
        Some(MountError::DuplicateName {
            name: "about".into(),
            with: "/about".into(),
        })
    );

    // same url on another method does not conflict.
    router.mount(post("/about", 4)).unwrap();
}

#[test]
fn unsupported_method() {
    use segment_router::{Mount, UnsupportedMethod};

    let mut router = Router::new();
    assert_eq!(
        router.mount(Mount::new("PATCH", "/about", ())).err(),
        Some(MountError::Method(UnsupportedMethod("PATCH".into())))
    );
    assert!(router.methods().next().is_none());

    router.mount(Mount::new("dElEtE", "/about", ())).unwrap();
}

#[test]
fn malformed_template() {
    use segment_router::ParseError;

    let mut router = Router::new();
    assert_eq!(
        router.mount(get("/about?x=%zz", ())).err(),
        Some(MountError::Parse(ParseError::MalformedQueryValue { key: "x".into() }))
    );
}
