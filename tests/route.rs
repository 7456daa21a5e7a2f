use route_template::{CompileError, Route};

use std::collections::{BTreeMap, HashMap};

macro_rules! match_tests {
    ($($name:ident {
        route = $route:literal,
        $( $path:literal =>
            $( $(@$none:tt)? None )?
            $( $(@$some:tt)? { $( $key:literal => $val:literal ),* $(,)? } )?
        ),* $(,)?
    }),* $(,)?) => { $(
        #[test]
        fn $name() {
            let _ = env_logger::builder().is_test(true).try_init();
            let route = Route::new($route).unwrap();

            $(match route.parse($path) {
                None => {
                    assert!(!route.is_match($path), "'{}' matched but did not parse", $path);
                    $($( @$some )?
                        panic!("Expected '{}' to match '{}'", $path, $route)
                    )?
                }
                Some(params) => {
                    assert!(route.is_match($path), "'{}' parsed but did not match", $path);
                    $($( @$some )?
                        let expected_params: Vec<(&str, &str)> = vec![$(($key, $val)),*];
                        let got_params = params.iter().collect::<Vec<_>>();

                        assert_eq!(
                            got_params, expected_params,
                            "Wrong params for path '{}'",
                            $path
                        );
                    )?

                    $($( @$none )?
                        panic!(
                            "Unexpected match for path '{}', got: {:?}",
                            $path,
                            params
                        );
                    )?
                }
            })*
        }
   )* };
}

macro_rules! compile_tests {
    ($($name:ident {
        route = $route:literal,
        $( [$( $key:literal => $val:literal ),* $(,)?] => $res:expr ),* $(,)?
    }),* $(,)?) => { $(
        #[test]
        fn $name() {
            let route = Route::new($route).unwrap();

            $(
                let params: Vec<(&str, &str)> = vec![$(($key, $val)),*];
                let got = route.compile_with(&params);
                assert_eq!(got, $res, "unexpected result for params {:?}", params);
            )*
        }
   )* };
}

fn missing(name: &str, route: &str) -> CompileError {
    CompileError::MissingParam {
        name: name.into(),
        route: route.into(),
    }
}

fn missing_all(route: &str) -> CompileError {
    CompileError::MissingParams {
        route: route.into(),
    }
}

fn unexpected(route: &str) -> CompileError {
    CompileError::UnexpectedParams {
        route: route.into(),
    }
}

fn ok(path: &str) -> Result<String, CompileError> {
    Ok(path.to_owned())
}

match_tests! {
    static_route {
        route = "/foo",
        "/foo" => {},
        "/bar" => None,
        "/foo/" => None,
        "/fo" => None,
        "/foo/bar" => None,
        "foo" => None,
        "" => None,
    },
    single_param {
        route = "/foo/{bar}",
        "/foo/abc" => { "bar" => "abc" },
        "/foo/abc/def" => None,
        "/foo/" => None,
        "/foo" => None,
        "/foo/abc/" => None,
        "/bar/abc" => None,
        "x/foo/abc" => None,
    },
    two_params {
        route = "/foo/{bar}/{baz}",
        "/foo/abc/def" => { "bar" => "abc", "baz" => "def" },
        "/foo/abc" => None,
        "/foo/abc/" => None,
        "/foo//def" => None,
        "/foo/abc/def/ghi" => None,
    },
    inline_params {
        route = "/users/{id}.{format}",
        "/users/1.json" => { "id" => "1", "format" => "json" },
        "/users/a.b.c" => { "id" => "a.b", "format" => "c" },
        "/users/1json" => None,
        "/users/.json" => None,
    },
    prefixed_param {
        route = "/user_{name}/about",
        "/user_bob/about" => { "name" => "bob" },
        "/user_/about" => None,
        "/user/about" => None,
    },
    escaped_literals {
        route = "/v1.0/{id}+(x)",
        "/v1.0/7+(x)" => { "id" => "7" },
        "/v1a0/7+(x)" => None,
        "/v1.0/7(x)" => None,
        "/v1.0/77x" => None,
    },
    malformed_braces {
        route = "/a/{}/{b",
        "/a/{}/{b" => {},
        "/a/x/{b" => None,
        "/a//{b" => None,
    },
    nested_braces {
        route = "/{{x}}",
        "/{abc}" => { "x" => "abc" },
        "/abc" => None,
        "/{a/b}" => None,
    },
    duplicate_names {
        route = "/{id}/{other}/{id}",
        "/1/2/3" => { "id" => "3", "other" => "2" },
        "/1/2" => None,
    },
    unicode {
        route = "/über/{name}",
        "/über/jürgen" => { "name" => "jürgen" },
        "/uber/jurgen" => None,
    },
    root {
        route = "/",
        "/" => {},
        "" => None,
        "//" => None,
    },
    whole_path_param {
        route = "{all}",
        "anything" => { "all" => "anything" },
        "with/slash" => None,
        "" => None,
    },
}

compile_tests! {
    compile_static {
        route = "/foo",
        [] => ok("/foo"),
        ["bar" => "abc"] => Err(unexpected("/foo")),
        ["bar" => ""] => Err(unexpected("/foo")),
    },
    compile_single_param {
        route = "/foo/{bar}",
        [] => Err(missing_all("/foo/{bar}")),
        ["bar" => "abc"] => ok("/foo/abc"),
        ["bar" => ""] => Err(missing("bar", "/foo/{bar}")),
        ["baz" => "abc"] => Err(missing("bar", "/foo/{bar}")),
        ["bar" => "abc", "extra" => "ignored"] => ok("/foo/abc"),
    },
    compile_two_params {
        route = "/foo/{bar}/{baz}",
        ["bar" => "abc"] => Err(missing("baz", "/foo/{bar}/{baz}")),
        ["baz" => "def"] => Err(missing("bar", "/foo/{bar}/{baz}")),
        ["bar" => "abc", "baz" => "def"] => ok("/foo/abc/def"),
        ["baz" => "def", "bar" => "abc"] => ok("/foo/abc/def"),
    },
    compile_literals_untouched {
        route = "/v1.0/{id}+(x)/{{y}}/{}",
        ["id" => "7", "y" => "z"] => ok("/v1.0/7+(x)/{z}/{}"),
    },
    compile_duplicate_names {
        route = "/{id}/{id}",
        ["id" => "1"] => ok("/1/1"),
        ["id" => "1", "id" => "2"] => ok("/2/2"),
    },
}

#[test]
fn static_compile_without_params() {
    let route = Route::new("/foo").unwrap();
    assert_eq!(route.compile(), ok("/foo"));
    assert_eq!(route.compile_with(&HashMap::<String, String>::new()), ok("/foo"));
}

#[test]
fn dynamic_compile_without_params() {
    let route = Route::new("/foo/{bar}").unwrap();
    assert_eq!(route.compile(), Err(missing_all("/foo/{bar}")));
    assert_eq!(
        route.compile_with(&BTreeMap::<&str, &str>::new()),
        Err(missing_all("/foo/{bar}"))
    );
}

#[test]
fn compile_from_maps() {
    let route = Route::new("/repos/{owner}/{repo}").unwrap();

    let mut hash = HashMap::new();
    hash.insert("owner".to_owned(), "rust-lang".to_owned());
    hash.insert("repo".to_owned(), "regex".to_owned());
    assert_eq!(route.compile_with(&hash), ok("/repos/rust-lang/regex"));

    let tree: BTreeMap<_, _> = hash.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(route.compile_with(&tree), ok("/repos/rust-lang/regex"));
}

#[test]
fn accessors() {
    let route = Route::new("/foo/{bar}/{baz}").unwrap();
    assert_eq!(route.format(), "/foo/{bar}/{baz}");
    assert_eq!(route.param_names().collect::<Vec<_>>(), vec!["bar", "baz"]);
    assert!(!route.is_static());
    assert_eq!(route.to_string(), "/foo/{bar}/{baz}");

    let route: Route = "/foo".parse().unwrap();
    assert!(route.is_static());
    assert_eq!(route.param_names().len(), 0);
    assert_eq!(route, Route::try_from("/foo").unwrap());
    assert_ne!(route, Route::try_from(String::from("/bar")).unwrap());
}

#[test]
fn static_parse_is_empty_not_none() {
    let route = Route::new("/foo").unwrap();
    let params = route.parse("/foo").unwrap();
    assert!(params.is_empty());
    assert_eq!(params.len(), 0);
    assert!(route.parse("/bar").is_none());
}

#[test]
fn owned_params() {
    let route = Route::new("/foo/{bar}/{baz}").unwrap();
    let params = route.parse("/foo/abc/def").unwrap();

    let mut expected = HashMap::new();
    expected.insert("bar".to_owned(), "abc".to_owned());
    expected.insert("baz".to_owned(), "def".to_owned());
    assert_eq!(params.to_owned_map(), expected);

    let pairs: Vec<_> = (&params).into_iter().collect();
    assert_eq!(pairs, vec![("bar", "abc"), ("baz", "def")]);
}

#[test]
fn error_messages() {
    assert_eq!(
        unexpected("/foo").to_string(),
        "route '/foo' does not accept parameters"
    );
    assert_eq!(
        missing_all("/foo/{bar}").to_string(),
        "route '/foo/{bar}' requires parameters"
    );
    assert_eq!(
        missing("baz", "/foo/{bar}/{baz}").to_string(),
        "missing value for parameter 'baz' of route '/foo/{bar}/{baz}'"
    );
}

#[test]
fn shared_across_threads() {
    let route = std::sync::Arc::new(Route::new("/users/{id}").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let route = route.clone();
            std::thread::spawn(move || {
                let path = route.compile_with(&[("id", i.to_string())]).unwrap();
                let id = route.parse(&path).unwrap().get("id").map(str::to_owned);
                (path, id)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (path, id) = handle.join().unwrap();
        assert_eq!(path, format!("/users/{}", i));
        assert_eq!(id, Some(i.to_string()));
    }
}
