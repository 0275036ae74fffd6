//! Web form body integration tests.
//!
//! Exercise the form lenses through whole requests: content-type checks,
//! strict rejection, and feedback collection.

use covenant_core::{ContentType, HttpMessage, Request, CONTENT_TYPE};
use covenant_lens::{Body, Failure, FormField, FormValidator, Header, WebForm, With};
use indexmap::IndexMap;

/// Creates a POST request carrying a URL-encoded body.
fn form_request(content_type: &str, body: &str) -> Request {
    Request::post("/")
        .header(CONTENT_TYPE, content_type)
        .with_body(body.to_string())
}

fn fields(pairs: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(name, values)| {
            (
                (*name).to_string(),
                values.iter().map(|v| (*v).to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_can_get_form_body() {
    let request = form_request(
        ContentType::APPLICATION_FORM_URLENCODED.value(),
        "hello=world&another=planet",
    );

    assert_eq!(
        Body::form::<Request>().extract(&request).unwrap(),
        fields(&[("hello", &["world"]), ("another", &["planet"])])
    );
}

#[test]
fn test_form_body_rejects_other_content_type() {
    let request = form_request("unknown", "hello=world&another=planet");

    let breach = Body::form::<Request>().extract(&request).unwrap_err();
    assert_eq!(breach.failures(), &[Failure::Invalid(Header::content_type_meta())]);
}

#[test]
fn test_web_form_rejects_other_content_type() {
    let request = form_request("unknown", "hello=world&another=123");
    let form = Body::web_form::<Request>(
        FormValidator::Strict,
        [
            FormField::required("hello").validator(),
            FormField::int().required("another").validator(),
        ],
    );

    let breach = form.extract(&request).unwrap_err();
    assert_eq!(breach.failures(), &[Failure::Invalid(Header::content_type_meta())]);
}

#[test]
fn test_web_form_extracts_valid_values() {
    let request = form_request(
        ContentType::APPLICATION_FORM_URLENCODED.value(),
        "hello=world&another=123",
    );
    let form = Body::web_form::<Request>(
        FormValidator::Strict,
        [
            FormField::required("hello").validator(),
            FormField::int().required("another").validator(),
        ],
    );

    assert_eq!(
        form.extract(&request).unwrap(),
        WebForm::new(
            fields(&[("hello", &["world"]), ("another", &["123"])]),
            Vec::new()
        )
    );
}

#[test]
fn test_feedback_web_form_collects_errors() {
    let request = form_request(ContentType::APPLICATION_FORM_URLENCODED.value(), "another=123");
    let hello = FormField::required("hello");
    let form = Body::web_form::<Request>(
        FormValidator::Feedback,
        [hello.validator(), FormField::int().required("another").validator()],
    );

    assert_eq!(
        form.extract(&request).unwrap(),
        WebForm::new(
            fields(&[("another", &["123"])]),
            vec![Failure::Missing(hello.meta().clone())]
        )
    );
}

#[test]
fn test_strict_web_form_rejects_invalid_values() {
    let request = form_request(
        ContentType::APPLICATION_FORM_URLENCODED.value(),
        "another=notANumber",
    );
    let hello = FormField::required("hello");
    let another = FormField::int().required("another");
    let form = Body::web_form::<Request>(
        FormValidator::Strict,
        [hello.validator(), another.validator()],
    );

    let breach = form.extract(&request).unwrap_err();
    assert_eq!(
        breach.into_failures(),
        vec![
            Failure::Missing(hello.meta().clone()),
            Failure::Invalid(another.meta().clone()),
        ]
    );
}

#[test]
fn test_web_form_writes_fields_and_content_type() {
    let name = FormField::required("name");
    let age = FormField::int().required("age");
    let form = WebForm::default().with([name.of("bob".into()), age.of(42)]);

    let lens = Body::web_form::<Request>(FormValidator::Strict, [name.validator(), age.validator()]);
    let request = lens.inject(form, Request::post("/"));

    assert_eq!(
        request.header_value(CONTENT_TYPE),
        Some(ContentType::APPLICATION_FORM_URLENCODED.value())
    );
    assert_eq!(request.body_string(), "name=bob&age=42");
    assert_eq!(age.extract(&lens.extract(&request).unwrap()).unwrap(), 42);
}
