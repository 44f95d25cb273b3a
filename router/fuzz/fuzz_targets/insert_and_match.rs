#![no_main]
use libfuzzer_sys::fuzz_target;

use segment_router::{get, Params, Router, UrlStructure};

fuzz_target!(|data: (Vec<(String, i32)>, String, Vec<(String, String)>)| {
    let mut router = Router::new();

    for (route, item) in data.0 {
        let _ = router.mount(get(&route, item));
    }

    let Ok(Some(leaf)) = router.match_route("GET", &data.1) else {
        return;
    };

    let state = Params::from_iter(data.2);
    let url = leaf.template().render_for_state(&state);
    let _ = UrlStructure::parse(&url).map(|url| url.to_string());
});
