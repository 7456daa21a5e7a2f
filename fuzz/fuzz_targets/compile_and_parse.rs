#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (String, Vec<(String, String)>, String)| {
    let (format, values, path) = data;

    let route = match route_template::Route::new(format) {
        Ok(route) => route,
        Err(_) => return,
    };
    assert!(route.pattern().starts_with('^'));

    // arbitrary paths must agree between matching and parsing
    assert_eq!(route.is_match(&path), route.parse(&path).is_some());

    if let Some(params) = route.parse(&path) {
        let compiled = if params.is_empty() {
            route.compile()
        } else {
            route.compile_with(&params)
        };
        // repeated names may have captured different values
        if compiled.is_ok() && route.param_names().len() == params.len() {
            assert_eq!(compiled.unwrap(), path);
        }
    }

    if let Ok(compiled) = route.compile_with(&values) {
        if !values.iter().any(|(_, value)| value.contains('/')) {
            assert!(route.is_match(&compiled));
        }
    }
});
