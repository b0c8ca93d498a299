//! Registry of validation functions keyed by runtime type.
//!
//! Discovery asks the registry whether a part's concrete type has a
//! validator; there is no open-ended capability probing.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use vigil_assert::Asserter;
use vigil_core::{ContextRef, Object, Part, Violation};

/// A type that can check its own configuration.
///
/// Composite owners may validate their direct sub-entities from here, or
/// leave them to be discovered and validated independently. Both happen if
/// both are set up; nothing deduplicates them.
pub trait Assertable: Any {
    /// # Errors
    ///
    /// Returns the first [`Violation`] raised through `asserter`.
    fn validate(&self, asserter: &Asserter<'_>, context: &ContextRef) -> Result<(), Violation>;
}

type ValidateFn = Box<dyn Fn(&dyn Any, &Asserter<'_>, &ContextRef) -> Result<(), Violation>>;

struct Registration {
    type_name: &'static str,
    validate: ValidateFn,
}

#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<TypeId, Registration>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `validate` for parts of type `T`, replacing any earlier
    /// registration for the same type.
    pub fn register<T, F>(&mut self, validate: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &Asserter<'_>, &ContextRef) -> Result<(), Violation> + 'static,
    {
        let erased: ValidateFn = Box::new(
            move |value: &dyn Any, asserter: &Asserter<'_>, context: &ContextRef| {
                value
                    .downcast_ref::<T>()
                    .map_or(Ok(()), |typed| validate(typed, asserter, context))
            },
        );
        let registration = Registration {
            type_name: std::any::type_name::<T>(),
            validate: erased,
        };
        if let Some(previous) = self.validators.insert(TypeId::of::<T>(), registration) {
            tracing::debug!(type_name = previous.type_name, "replaced validator");
        }
        self
    }

    /// Register a type through its [`Assertable`] implementation.
    pub fn register_assertable<T: Assertable>(&mut self) -> &mut Self {
        self.register::<T, _>(|value: &T, asserter: &Asserter<'_>, context: &ContextRef| {
            value.validate(asserter, context)
        })
    }

    #[must_use]
    pub fn handles(&self, part: &Part) -> bool {
        self.validators.contains_key(&part.type_id())
    }

    /// Whether any part of `object` has a registered validator.
    #[must_use]
    pub fn is_assertable(&self, object: &Object) -> bool {
        object.parts().iter().any(|part| self.handles(part))
    }

    /// Run the validator for `part`. `None` if its type is not registered.
    pub fn validate_part(
        &self,
        part: &Part,
        asserter: &Asserter<'_>,
        context: &ContextRef,
    ) -> Option<Result<(), Violation>> {
        let registration = self.validators.get(&part.type_id())?;
        Some((registration.validate)(part.value(), asserter, context))
    }

    /// Validate every registered part of `object`, in part order.
    ///
    /// # Errors
    ///
    /// Returns the first violation; later parts are not validated.
    pub fn validate_object(
        &self,
        object: &Object,
        asserter: &Asserter<'_>,
        context: &ContextRef,
    ) -> Result<usize, Violation> {
        let mut validated = 0;
        for part in object.parts() {
            if let Some(result) = self.validate_part(part, asserter, context) {
                result?;
                validated += 1;
            }
        }
        Ok(validated)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of registered types, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.validators.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        names
    }
}
