//! Numeric vocabulary, shared by `number` and `integer`.

use crate::builder::NumericSchema;
use crate::node::TypeTag;
use crate::registry::ValidatorRegistry;

impl NumericSchema {
    /// Creates a `type: number` builder over the shared registry.
    pub fn number() -> NumericSchema {
        Self::of_type(TypeTag::Number, ValidatorRegistry::shared())
    }

    /// Creates a `type: integer` builder over the shared registry.
    pub fn integer() -> NumericSchema {
        Self::of_type(TypeTag::Integer, ValidatorRegistry::shared())
    }

    /// Sets the lower bound. With `exclusive`, the `exclusiveMinimum`
    /// keyword is set instead of `minimum`.
    pub fn minimum(self, value: f64, exclusive: bool) -> Self {
        self.set(move |n| {
            if exclusive {
                n.exclusive_minimum = Some(value);
            } else {
                n.minimum = Some(value);
            }
        })
    }

    /// Sets the upper bound. With `exclusive`, the `exclusiveMaximum`
    /// keyword is set instead of `maximum`.
    pub fn maximum(self, value: f64, exclusive: bool) -> Self {
        self.set(move |n| {
            if exclusive {
                n.exclusive_maximum = Some(value);
            } else {
                n.maximum = Some(value);
            }
        })
    }

    /// Requires the value to be a multiple of `factor`.
    pub fn multiple_of(self, factor: f64) -> Self {
        self.set(move |n| n.multiple_of = Some(factor))
    }
}
