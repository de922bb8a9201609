//! Callable-value schema.
//!
//! The target document format has no vocabulary for callables, so this
//! builder emits only the non-standard `{"type": "function"}` tag and the
//! real contract is host-side: [`FunctionSchema::is_function`] checks that
//! a value is callable. Callability is a property of a Rust type, so the
//! check is discharged by the trait bound — a non-callable argument does
//! not fail at run time, it fails to compile.

use crate::builder::FunctionSchema;
use crate::node::TypeTag;
use crate::registry::ValidatorRegistry;

/// Marker for callable types, implemented for `Fn` signatures of up to
/// four arguments. `Args` is the argument tuple, which lets the blanket
/// impls per arity coexist.
pub trait Callable<Args> {}

impl<F, R> Callable<()> for F where F: Fn() -> R {}
impl<F, A, R> Callable<(A,)> for F where F: Fn(A) -> R {}
impl<F, A, B, R> Callable<(A, B)> for F where F: Fn(A, B) -> R {}
impl<F, A, B, C, R> Callable<(A, B, C)> for F where F: Fn(A, B, C) -> R {}
impl<F, A, B, C, D, R> Callable<(A, B, C, D)> for F where F: Fn(A, B, C, D) -> R {}

impl FunctionSchema {
    /// Creates a `type: function` builder over the shared registry.
    pub fn new() -> FunctionSchema {
        Self::of_type(TypeTag::Function, ValidatorRegistry::shared())
    }

    /// Host-side check that a value is callable.
    ///
    /// Accepts any `Fn` of up to four arguments; anything else is
    /// rejected by the compiler rather than at run time.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_schema_core::function;
    ///
    /// let schema = function();
    /// assert!(schema.is_function(&|a: i32, b: i32| a + b));
    /// ```
    pub fn is_function<Args, F>(&self, _value: &F) -> bool
    where
        F: Callable<Args> + ?Sized,
    {
        true
    }
}

impl Default for FunctionSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn double(x: i64) -> i64 {
        x * 2
    }

    #[test]
    fn test_function_schema_type_tag() {
        assert_eq!(
            serde_json::to_value(FunctionSchema::new()).unwrap(),
            json!({"type": "function"})
        );
    }

    #[test]
    fn test_is_function_accepts_closures_and_fn_items() {
        let schema = FunctionSchema::new();
        assert!(schema.is_function(&|| 1));
        assert!(schema.is_function(&|a: i32, b: String| format!("{a}{b}")));
        assert!(schema.is_function(&double));
        let pointer: fn(i64) -> i64 = double;
        assert!(schema.is_function(&pointer));
    }

    #[test]
    fn test_function_schema_optional() {
        let schema = FunctionSchema::new();
        assert!(schema.is_required());
        assert!(!schema.optional().is_required());
    }
}
