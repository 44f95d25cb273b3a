use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use segment_router::{get, Params, Router, UrlStructure};

// (segment-router template, matchit route, request path)
const ROUTES: &[(&str, &str, &str)] = &[
    ("/", "/", "/"),
    ("/about", "/about", "/about"),
    ("/about/team", "/about/team", "/about/team"),
    ("/users/{id}", "/users/{id}", "/users/42"),
    ("/users/{id}/posts", "/users/{id}/posts", "/users/42/posts"),
    ("/users/{id}/posts/{post}", "/users/{id}/posts/{post}", "/users/42/posts/7"),
    ("/repos/{owner}/{repo}/issues", "/repos/{owner}/{repo}/issues", "/repos/rust-lang/rust/issues"),
    ("/search", "/search", "/search"),
    ("/static/*", "/static/{*rest}", "/static/css/site/main.css"),
];

fn compare_routers(c: &mut Criterion) {
    let mut router = Router::new();
    let mut matchit = matchit::Router::new();

    for (template, route, _) in ROUTES {
        router.mount(get(*template, true)).unwrap();
        matchit.insert(*route, true).unwrap();
    }

    let mut group = c.benchmark_group("compare/match");

    group.bench_function("segment-router", |b| {
        b.iter(|| {
            for (_, _, path) in ROUTES {
                let leaf = black_box(router.match_route("GET", black_box(path)).unwrap().unwrap());
                assert!(*leaf.value());
            }
        });
    });

    group.bench_function("matchit", |b| {
        b.iter(|| {
            for (_, _, path) in ROUTES {
                let matched = black_box(matchit.at(black_box(path)).unwrap());
                assert!(*matched.value);
            }
        });
    });

    group.finish();
}

fn route_with_params(c: &mut Criterion) {
    let mut router = Router::new();
    for (template, _, _) in ROUTES {
        router.mount(get(*template, |_: &Params, _: Option<()>| {})).unwrap();
    }

    c.bench_function("route/params", |b| {
        b.iter(|| {
            let url = black_box("https://example.com/repos/rust-lang/rust/issues?state=open&q=label%3Abug");
            black_box(router.route("GET", url, None::<()>).unwrap().unwrap());
        });
    });
}

fn render(c: &mut Criterion) {
    let template = UrlStructure::parse("/repos/{owner}/{repo}/issues").unwrap();
    let state = template.extract_parameters("/repos/rust-lang/rust/issues?state=open&q=label%3Abug").unwrap();

    c.bench_function("render_for_state", |b| {
        b.iter(|| black_box(template.render_for_state(black_box(&state))));
    });
}

criterion_group!(benches, compare_routers, route_with_params, render);
criterion_main!(benches);
