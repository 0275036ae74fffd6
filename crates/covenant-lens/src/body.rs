//! Body lenses.
//!
//! A typed body lens reports an empty body as `Missing`. A present body must
//! come with the expected `Content-Type`; a missing or different media type is
//! reported as an `Invalid` failure of the `Content-Type` header. Form lenses
//! check the `Content-Type` even for an empty body. Writing a body always sets
//! the declared `Content-Type`.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use covenant_core::{ContentType, HttpMessage, CONTENT_TYPE};
use indexmap::IndexMap;

use crate::form::{FormValidator, WebForm};
use crate::{BiDiLens, BoxError, ContractBreach, Header, Location, Meta, Validator};

type Decode<T> = Arc<dyn Fn(String) -> Result<T, BoxError> + Send + Sync>;
type Encode<T> = Arc<dyn Fn(T) -> String + Send + Sync>;

/// Decoded `application/x-www-form-urlencoded` fields, in body order.
pub type FormFields = IndexMap<String, Vec<String>>;

const BODY: &str = "body";

fn body_meta() -> Meta {
    Meta::new(Location::Body, BODY, true)
}

fn check_content_type<M: HttpMessage>(
    expected: &ContentType,
    message: &M,
) -> Result<(), ContractBreach> {
    match message.header_value(CONTENT_TYPE) {
        Some(actual) if expected.matches(actual) => Ok(()),
        actual => {
            tracing::debug!(expected = %expected, actual = ?actual, "unexpected content type");
            Err(ContractBreach::invalid(Header::content_type_meta()))
        }
    }
}

fn decode_form<M: HttpMessage>(message: &M) -> Result<FormFields, ContractBreach> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(message.body()).map_err(|e| {
        tracing::debug!(error = %e, "undecodable form body");
        ContractBreach::invalid(body_meta())
    })?;

    let mut fields = FormFields::new();
    for (name, value) in pairs {
        fields.entry(name).or_default().push(value);
    }
    Ok(fields)
}

fn encode_form(fields: &FormFields) -> String {
    let pairs: Vec<(&str, &str)> = fields
        .iter()
        .flat_map(|(name, values)| values.iter().map(move |value| (name.as_str(), value.as_str())))
        .collect();
    serde_urlencoded::to_string(pairs.as_slice()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "form fields could not be encoded");
        String::new()
    })
}

fn write_form<M: HttpMessage>(fields: &FormFields, message: M) -> M {
    message
        .replace_header(CONTENT_TYPE, ContentType::APPLICATION_FORM_URLENCODED.value())
        .with_body(encode_form(fields))
}

/// Entry points for body lenses.
///
/// # Example
///
/// ```rust
/// use covenant_core::{ContentType, HttpMessage, Request};
/// use covenant_lens::{Body, With};
///
/// let body = Body::string(ContentType::TEXT_PLAIN).to_lens::<Request>();
/// let request = Request::post("/").with([body.of("hello".into())]);
///
/// assert_eq!(request.header_value("Content-Type"), Some("text/plain"));
/// assert_eq!(body.extract(&request).unwrap(), "hello");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Body;

impl Body {
    /// A text body of the given content type.
    #[must_use]
    pub fn string(content_type: ContentType) -> BodySpec<String> {
        BodySpec::new(
            content_type,
            |body: String| Ok::<_, Infallible>(body),
            |body: String| body,
        )
    }

    /// A URL-encoded form body as raw fields.
    ///
    /// An empty body is an empty form.
    #[must_use]
    pub fn form<M: HttpMessage + 'static>() -> BiDiLens<M, FormFields> {
        BiDiLens::new(
            body_meta(),
            |message: &M| {
                check_content_type(&ContentType::APPLICATION_FORM_URLENCODED, message)?;
                decode_form(message)
            },
            |fields: FormFields, message: M| write_form(&fields, message),
        )
    }

    /// A URL-encoded form body checked against declared fields.
    ///
    /// Under [`FormValidator::Strict`] any failing field rejects the body
    /// with every field failure. Under [`FormValidator::Feedback`] the form
    /// is returned with the failures recorded in [`WebForm::errors`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use covenant_core::{ContentType, HttpMessage, Request};
    /// use covenant_lens::{Body, FormField, FormValidator};
    ///
    /// let hello = FormField::required("hello");
    /// let form = Body::web_form::<Request>(FormValidator::Feedback, [hello.validator()]);
    ///
    /// let request = Request::post("/")
    ///     .header("Content-Type", ContentType::APPLICATION_FORM_URLENCODED.value())
    ///     .with_body("other=1");
    /// let form = form.extract(&request).unwrap();
    /// assert_eq!(form.errors(), &[hello.missing()]);
    /// ```
    #[must_use]
    pub fn web_form<M: HttpMessage + 'static>(
        policy: FormValidator,
        fields: impl IntoIterator<Item = Arc<dyn Validator<WebForm>>>,
    ) -> BiDiLens<M, WebForm> {
        let fields: Vec<Arc<dyn Validator<WebForm>>> = fields.into_iter().collect();
        BiDiLens::new(
            body_meta(),
            move |message: &M| {
                check_content_type(&ContentType::APPLICATION_FORM_URLENCODED, message)?;
                WebForm::new(decode_form(message)?, Vec::new()).validate(policy, &fields)
            },
            |form: WebForm, message: M| write_form(form.fields(), message),
        )
    }
}

/// A spec for bodies of type `T` with a fixed content type.
pub struct BodySpec<T> {
    content_type: ContentType,
    decode: Decode<T>,
    encode: Encode<T>,
}

impl<T: 'static> BodySpec<T> {
    /// Creates a spec from a text parser and a renderer.
    pub fn new<D, E, R>(content_type: ContentType, decode: D, encode: R) -> Self
    where
        D: Fn(String) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
        R: Fn(T) -> String + Send + Sync + 'static,
    {
        Self {
            content_type,
            decode: Arc::new(move |body: String| -> Result<T, BoxError> {
                decode(body).map_err(Into::into)
            }),
            encode: Arc::new(encode),
        }
    }

    /// Returns the declared content type.
    #[must_use]
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Converts the body with `f` when reading and `g` when writing.
    #[must_use]
    pub fn map<U, F, G>(&self, f: F, g: G) -> BodySpec<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        G: Fn(U) -> T + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok::<_, Infallible>(f(value)), g)
    }

    /// Like [`map`](Self::map) with a fallible reader.
    #[must_use]
    pub fn try_map<U, E, F, G>(&self, f: F, g: G) -> BodySpec<U>
    where
        U: 'static,
        E: Into<BoxError>,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
        G: Fn(U) -> T + Send + Sync + 'static,
    {
        let decode = Arc::clone(&self.decode);
        let encode = Arc::clone(&self.encode);
        BodySpec {
            content_type: self.content_type.clone(),
            decode: Arc::new(move |body: String| -> Result<U, BoxError> {
                f(decode(body)?).map_err(Into::into)
            }),
            encode: Arc::new(move |value: U| encode(g(value))),
        }
    }

    /// Binds the spec to a message type.
    ///
    /// An empty body is `Missing`. A present body is `Invalid` when its
    /// `Content-Type` differs, it is not UTF-8, or it does not convert.
    #[must_use]
    pub fn to_lens<M: HttpMessage + 'static>(&self) -> BiDiLens<M, T> {
        let meta = body_meta();
        let reader = meta.clone();
        let expected = self.content_type.clone();
        let decode = Arc::clone(&self.decode);
        let declared = self.content_type.clone();
        let encode = Arc::clone(&self.encode);

        BiDiLens::new(
            meta,
            move |message: &M| {
                if message.body().is_empty() {
                    return Err(ContractBreach::missing(reader.clone()));
                }
                check_content_type(&expected, message)?;
                let text = String::from_utf8(message.body().to_vec())
                    .map_err(|e| -> BoxError { Box::new(e) })
                    .and_then(|text| decode(text));
                text.map_err(|e| {
                    tracing::debug!(lens = %reader, error = %e, "body rejected");
                    ContractBreach::invalid(reader.clone())
                })
            },
            move |value: T, message: M| {
                message
                    .replace_header(CONTENT_TYPE, declared.value())
                    .with_body(encode(value))
            },
        )
    }
}

impl<T> Clone for BodySpec<T> {
    fn clone(&self) -> Self {
        Self {
            content_type: self.content_type.clone(),
            decode: Arc::clone(&self.decode),
            encode: Arc::clone(&self.encode),
        }
    }
}

impl<T> fmt::Debug for BodySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodySpec")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
