//! A small application assembled from every Covenant crate: configuration,
//! contract routes, web forms and request logging.

use covenant::lens::FormFields;
use covenant::prelude::*;

/// Builds the application routes under the configured base path.
fn app(config: &CovenantConfig) -> impl HttpHandler {
    let name = FormField::required("name");
    let age = FormField::int().required("age");
    let signup = Body::web_form::<Request>(FormValidator::Feedback, [name.validator(), age.validator()]);
    let reader = signup.clone();

    let greeting = Path::of("name");
    let token = Header::required::<Request>("X-Token");

    let router = ContractRouter::from_config(&config.router)
        .unwrap()
        .with_route(
            (RouteSpec0::new("hello") / greeting)
                .header(token)
                .at(Method::GET)
                .bind(|name: String, _: &Request| Response::ok().with_body(format!("hello {name}"))),
        )
        .with_route(
            RouteSpec0::new("signup")
                .body(signup)
                .at(Method::POST)
                .bind(move |request: &Request| match reader.extract(request) {
                    Ok(form) if form.is_valid() => Response::ok().with_body("welcome"),
                    Ok(form) => Response::new(StatusCode::UNPROCESSABLE_ENTITY)
                        .with_body(form.errors().iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")),
                    Err(breach) => Response::new(StatusCode::BAD_REQUEST).with_body(breach.to_string()),
                }),
        );

    RequestLogging::new().then(router)
}

fn config() -> CovenantConfig {
    ConfigLoader::new()
        .with_string("[router]\nbase_path = \"/api\"", "toml")
        .unwrap()
        .load()
        .unwrap()
}

#[test]
fn test_routes_under_configured_base() {
    let app = app(&config());

    let ok = app.handle(&Request::get("/api/hello/bob").header("X-Token", "t"));
    assert_eq!(ok.body_string(), "hello bob");

    assert_eq!(app.handle(&Request::get("/hello/bob")).status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_missing_header_is_breach() {
    let response = app(&config()).handle(&Request::get("/api/hello/bob"));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_str(&response.body_string()).unwrap();
    assert_eq!(body["failures"][0]["name"], "X-Token");
    assert_eq!(body["failures"][0]["type"], "missing");
}

#[test]
fn test_feedback_form_reaches_handler() {
    let app = app(&config());
    let form = |body: &'static str| {
        Request::post("/api/signup")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(body)
    };

    assert_eq!(app.handle(&form("name=bob&age=42")).body_string(), "welcome");

    let rejected = app.handle(&form("age=old"));
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        rejected.body_string(),
        "Required form 'name' is missing; Required form 'age' is invalid"
    );
}

#[test]
fn test_form_requires_content_type() {
    let response = app(&config()).handle(&Request::post("/api/signup").with_body("name=bob&age=1"));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_raw_form_lens() {
    let fields: FormFields = Body::form::<Request>()
        .extract(
            &Request::post("/")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .with_body("a=1&a=2"),
        )
        .unwrap();
    assert_eq!(fields["a"], vec!["1", "2"]);
}
