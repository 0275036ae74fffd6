//! Bound lenses.
//!
//! A [`Lens`] is a named, cardinality-aware extractor obtained from a spec
//! (see [`crate::spec`]). A [`BiDiLens`] can also write its value back into a
//! message, which is how typed requests are built:
//!
//! ```rust
//! use covenant_core::Request;
//! use covenant_lens::{Header, With};
//!
//! let page = Header::spec::<Request>().int().required("page");
//! let request = Request::get("/").with([page.of(3)]);
//!
//! assert_eq!(page.extract(&request).unwrap(), 3);
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{ContractBreach, Failure, Meta};

type Extract<M, T> = Arc<dyn Fn(&M) -> Result<T, ContractBreach> + Send + Sync>;
type Inject<M, T> = Arc<dyn Fn(T, M) -> M + Send + Sync>;

/// A deferred write of a value into a message, produced by [`BiDiLens::of`].
pub type Injection<M> = Box<dyn FnOnce(M) -> M + Send>;

/// Something that can check a message against a lens without producing the
/// value. Routes hold their declared lenses as validators.
pub trait Validator<M>: Send + Sync {
    /// Returns the metadata of the underlying lens.
    fn meta(&self) -> &Meta;

    /// Checks the message, returning the failures if the lens rejects it.
    fn validate(&self, target: &M) -> Result<(), ContractBreach>;
}

/// A read-only lens.
pub struct Lens<M, T> {
    meta: Meta,
    extract: Extract<M, T>,
}

impl<M, T> Lens<M, T> {
    /// Creates a lens from metadata and an extraction function.
    pub fn new<F>(meta: Meta, extract: F) -> Self
    where
        F: Fn(&M) -> Result<T, ContractBreach> + Send + Sync + 'static,
    {
        Self {
            meta,
            extract: Arc::new(extract),
        }
    }

    /// Returns the lens metadata.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Extracts the value from a message.
    ///
    /// # Errors
    ///
    /// Returns a breach holding `Missing` when a required value is absent and
    /// `Invalid` when a present value cannot be converted.
    pub fn extract(&self, target: &M) -> Result<T, ContractBreach> {
        (self.extract)(target)
    }

    /// Returns the failure reported when this lens finds no value.
    #[must_use]
    pub fn missing(&self) -> Failure {
        Failure::Missing(self.meta.clone())
    }

    /// Returns the failure reported when this lens cannot convert its value.
    #[must_use]
    pub fn invalid(&self) -> Failure {
        Failure::Invalid(self.meta.clone())
    }
}

impl<M: 'static, T: 'static> Lens<M, T> {
    /// Returns this lens as a shareable, type-erased validator.
    #[must_use]
    pub fn validator(&self) -> Arc<dyn Validator<M>> {
        Arc::new(self.clone())
    }
}

impl<M, T> Clone for Lens<M, T> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<M, T> fmt::Debug for Lens<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens").field("meta", &self.meta).finish_non_exhaustive()
    }
}

impl<M, T> fmt::Display for Lens<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.meta, f)
    }
}

impl<M, T> Validator<M> for Lens<M, T> {
    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn validate(&self, target: &M) -> Result<(), ContractBreach> {
        self.extract(target).map(|_| ())
    }
}

/// A lens that can both read and write its value.
///
/// Dereferences to the read-only [`Lens`].
pub struct BiDiLens<M, T> {
    lens: Lens<M, T>,
    inject: Inject<M, T>,
}

impl<M, T> BiDiLens<M, T> {
    /// Creates a lens from metadata, an extraction and an injection function.
    pub fn new<F, G>(meta: Meta, extract: F, inject: G) -> Self
    where
        F: Fn(&M) -> Result<T, ContractBreach> + Send + Sync + 'static,
        G: Fn(T, M) -> M + Send + Sync + 'static,
    {
        Self {
            lens: Lens::new(meta, extract),
            inject: Arc::new(inject),
        }
    }

    /// Writes a value into a message, replacing whatever the lens held.
    #[must_use]
    pub fn inject(&self, value: T, target: M) -> M {
        (self.inject)(value, target)
    }
}

impl<M: 'static, T: Send + 'static> BiDiLens<M, T> {
    /// Captures a value for a later write, see [`With::with`].
    #[must_use]
    pub fn of(&self, value: T) -> Injection<M> {
        let inject = Arc::clone(&self.inject);
        Box::new(move |target: M| inject(value, target))
    }
}

impl<M, T> Deref for BiDiLens<M, T> {
    type Target = Lens<M, T>;

    fn deref(&self) -> &Self::Target {
        &self.lens
    }
}

impl<M, T> Clone for BiDiLens<M, T> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
            inject: Arc::clone(&self.inject),
        }
    }
}

impl<M, T> fmt::Debug for BiDiLens<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiDiLens")
            .field("meta", self.lens.meta())
            .finish_non_exhaustive()
    }
}

impl<M, T> fmt::Display for BiDiLens<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lens, f)
    }
}

impl<M, T> Validator<M> for BiDiLens<M, T> {
    fn meta(&self) -> &Meta {
        self.lens.meta()
    }

    fn validate(&self, target: &M) -> Result<(), ContractBreach> {
        self.lens.validate(target)
    }
}

/// Applies injections to a message in order.
pub trait With: Sized {
    /// Returns the message with every injection applied, first to last.
    #[must_use]
    fn with<I>(self, injections: I) -> Self
    where
        I: IntoIterator<Item = Injection<Self>>,
    {
        injections
            .into_iter()
            .fold(self, |target, inject| inject(target))
    }
}

impl<M> With for M {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn first_char() -> BiDiLens<String, char> {
        let meta = Meta::new(Location::Body, "first", true);
        let missing = meta.clone();
        BiDiLens::new(
            meta,
            move |s: &String| {
                s.chars()
                    .next()
                    .ok_or_else(|| ContractBreach::missing(missing.clone()))
            },
            |c: char, s: String| format!("{c}{}", s.chars().skip(1).collect::<String>()),
        )
    }

    #[test]
    fn test_extract_and_inject() {
        let lens = first_char();
        assert_eq!(lens.extract(&"abc".to_string()).unwrap(), 'a');
        assert_eq!(lens.inject('z', "abc".to_string()), "zbc");
        assert_eq!(
            lens.extract(&String::new()).unwrap_err().failures(),
            &[lens.missing()]
        );
    }

    #[test]
    fn test_with_applies_in_order() {
        let lens = first_char();
        let value = "abc".to_string().with([lens.of('x'), lens.of('y')]);
        assert_eq!(value, "ybc");
    }

    #[test]
    fn test_validator_erases_value_type() {
        let lens = first_char();
        let validator = lens.validator();
        assert_eq!(validator.meta().name(), "first");
        assert!(validator.validate(&"a".to_string()).is_ok());
        assert!(validator.validate(&String::new()).is_err());
    }

    #[test]
    fn test_display_is_meta() {
        assert_eq!(first_char().to_string(), "Required body 'first'");
    }
}
