//! Web forms.
//!
//! A [`WebForm`] is a decoded `application/x-www-form-urlencoded` body plus
//! the failures found while validating it. Fields are declared with
//! [`FormField`] lenses and checked by [`Body::web_form`](crate::Body::web_form)
//! under a [`FormValidator`] policy.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{BiDiLens, BiDiLensSpec, BiDiMultiLensSpec, ContractBreach, Failure, Location, Validator};

/// How a web form reacts to fields that fail their lenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormValidator {
    /// Any failure rejects the whole form with a breach.
    #[default]
    Strict,
    /// Failures are recorded on the form; fields that failed are dropped.
    Feedback,
}

/// Decoded form fields and the failures recorded against them.
///
/// # Example
///
/// ```rust
/// use covenant_lens::{FormField, WebForm, With};
///
/// let name = FormField::required("name");
/// let form = WebForm::default().with([name.of("bob".into())]);
///
/// assert_eq!(name.extract(&form).unwrap(), "bob");
/// assert!(form.errors().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebForm {
    fields: IndexMap<String, Vec<String>>,
    errors: Vec<Failure>,
}

impl WebForm {
    /// Creates a form from fields and failures.
    #[must_use]
    pub fn new(fields: IndexMap<String, Vec<String>>, errors: Vec<Failure>) -> Self {
        Self { fields, errors }
    }

    /// Returns the fields in body order.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Vec<String>> {
        &self.fields
    }

    /// Returns the failures recorded under [`FormValidator::Feedback`].
    #[must_use]
    pub fn errors(&self) -> &[Failure] {
        &self.errors
    }

    /// Returns true if no failures were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns every value of a field.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces every value of a field; no values removes it.
    #[must_use]
    pub fn with_values(mut self, name: &str, values: Vec<String>) -> Self {
        if values.is_empty() {
            self.fields.shift_remove(name);
        } else {
            self.fields.insert(name.to_string(), values);
        }
        self
    }

    /// Checks the form against its declared fields.
    ///
    /// # Errors
    ///
    /// Under [`FormValidator::Strict`], returns every failure in field order.
    pub fn validate(
        self,
        policy: FormValidator,
        fields: &[Arc<dyn Validator<Self>>],
    ) -> Result<Self, ContractBreach> {
        let failures: Vec<Failure> = fields
            .iter()
            .filter_map(|field| field.validate(&self).err())
            .flat_map(ContractBreach::into_failures)
            .collect();

        match policy {
            _ if failures.is_empty() => Ok(self),
            FormValidator::Strict => Err(ContractBreach::new(failures)),
            FormValidator::Feedback => {
                tracing::debug!(failures = failures.len(), "web form accepted with feedback");
                let mut fields = self.fields;
                for failure in &failures {
                    fields.shift_remove(failure.meta().name());
                }
                Ok(Self::new(fields, failures))
            }
        }
    }
}

/// Lenses over the fields of a [`WebForm`].
#[derive(Debug, Clone, Copy)]
pub struct FormField;

impl FormField {
    /// Returns the string spec for form fields.
    #[must_use]
    pub fn spec() -> BiDiLensSpec<WebForm, String> {
        BiDiLensSpec::new(
            Location::Form,
            |name: &str, form: &WebForm| form.values(name).to_vec(),
            |name: &str, values: Vec<String>, form: WebForm| form.with_values(name, values),
        )
    }

    /// A required string field.
    #[must_use]
    pub fn required(name: &str) -> BiDiLens<WebForm, String> {
        Self::spec().required(name)
    }

    /// An optional string field.
    #[must_use]
    pub fn optional(name: &str) -> BiDiLens<WebForm, Option<String>> {
        Self::spec().optional(name)
    }

    /// A string field with a default.
    #[must_use]
    pub fn defaulted(name: &str, default: impl Into<String>) -> BiDiLens<WebForm, String> {
        Self::spec().defaulted(name, default.into())
    }

    /// Every value of a string field.
    #[must_use]
    pub fn multi() -> BiDiMultiLensSpec<WebForm, String> {
        Self::spec().multi()
    }

    /// The typed spec for integer fields, a shorthand for `spec().int()`.
    #[must_use]
    pub fn int() -> BiDiLensSpec<WebForm, i32> {
        Self::spec().int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> WebForm {
        let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
        for (name, value) in pairs {
            fields
                .entry((*name).to_string())
                .or_default()
                .push((*value).to_string());
        }
        WebForm::new(fields, Vec::new())
    }

    #[test]
    fn test_field_lenses() {
        let form = form(&[("a", "1"), ("a", "2"), ("b", "x")]);
        assert_eq!(FormField::required("a").extract(&form).unwrap(), "1");
        assert_eq!(FormField::multi().required("a").extract(&form).unwrap(), vec!["1", "2"]);
        assert_eq!(FormField::optional("c").extract(&form).unwrap(), None);
        assert!(FormField::int().required("b").extract(&form).is_err());
    }

    #[test]
    fn test_strict_collects_all_failures() {
        let hello = FormField::required("hello");
        let another = FormField::int().required("another");
        let result = form(&[("another", "notANumber")])
            .validate(FormValidator::Strict, &[hello.validator(), another.validator()]);

        assert_eq!(
            result.unwrap_err().into_failures(),
            vec![hello.missing(), another.invalid()]
        );
    }

    #[test]
    fn test_feedback_drops_failed_fields() {
        let hello = FormField::required("hello");
        let another = FormField::int().required("another");
        let checked = form(&[("another", "x"), ("other", "y")])
            .validate(FormValidator::Feedback, &[hello.validator(), another.validator()])
            .unwrap();

        assert_eq!(checked.errors(), &[hello.missing(), another.invalid()]);
        assert!(!checked.is_valid());
        assert_eq!(checked.fields().keys().collect::<Vec<_>>(), vec!["other"]);
    }

    #[test]
    fn test_with_values_empty_removes() {
        let form = form(&[("a", "1")]).with_values("a", Vec::new());
        assert!(form.fields().is_empty());
    }
}
