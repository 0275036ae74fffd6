//! Property tests for the read/write behaviour of bidirectional lenses.
//!
//! For any value `v` and message `m`, writing `v` and reading it back yields
//! `v`, and writing twice keeps only the second write.

use covenant_core::{ContentType, Cookie, HttpMessage, Request, Response};
use covenant_lens::{Body, Cookies, FormField, Header, Path, Query, WebForm, With};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 &=+%/?#._~-]{1,24}"
}

fn header_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._~-]{0,23}[a-zA-Z0-9._~-]"
}

fn cookie_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._~-]{1,24}"
}

proptest! {
    #[test]
    fn test_query_get_after_set(first in text(), second in text()) {
        let lens = Query::required("q");
        let request = Request::get("/search?other=1").with([lens.of(first), lens.of(second.clone())]);
        prop_assert_eq!(lens.extract(&request).unwrap(), second);
        prop_assert_eq!(Query::required("other").extract(&request).unwrap(), "1");
    }

    #[test]
    fn test_query_int_get_after_set(value in any::<i32>()) {
        let lens = Query::spec().int().required("n");
        prop_assert_eq!(lens.extract(&Request::get("/").with([lens.of(value)])).unwrap(), value);
    }

    #[test]
    fn test_header_get_after_set(value in header_text()) {
        let lens = Header::required::<Response>("X-Value");
        let response = Response::ok().header("x-value", "old").with([lens.of(value.clone())]);
        prop_assert_eq!(lens.extract(&response).unwrap(), value);
    }

    #[test]
    fn test_cookie_get_after_set(value in cookie_text()) {
        let lens = Cookies::value().required("c");
        let request = Request::get("/").cookie(&Cookie::new("c", "old")).with([lens.of(value.clone())]);
        prop_assert_eq!(lens.extract(&request).unwrap(), value);
    }

    #[test]
    fn test_form_field_get_after_set(values in prop::collection::vec(text(), 1..4)) {
        let lens = FormField::multi().required("f");
        let form = WebForm::default().with([lens.of(values.clone())]);
        prop_assert_eq!(lens.extract(&form).unwrap(), values);
    }

    #[test]
    fn test_body_get_after_set(value in text()) {
        let lens = Body::string(ContentType::TEXT_PLAIN).to_lens::<Request>();
        let request = Request::post("/").with([lens.of(value.clone())]);
        prop_assert_eq!(lens.extract(&request).unwrap(), value);
    }

    #[test]
    fn test_path_extract_after_render(value in any::<i64>()) {
        let lens = Path::spec().long().of("id");
        prop_assert_eq!(lens.extract(&lens.render(value)).unwrap(), value);
    }
}
