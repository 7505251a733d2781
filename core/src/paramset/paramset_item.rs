//! Parameter Set Item

use std::cell::Cell;

/// Stores the values of a named parameter.
#[derive(Clone, Debug)]
pub struct ParamSetItem<T> {
    /// The parameter values.
    pub values: Vec<T>,

    /// Set when the value is fetched so unused parameters can be reported.
    pub looked_up: Cell<bool>,
}

impl<T> ParamSetItem<T> {
    /// Create a new `ParamSetItem`.
    ///
    /// * `values` - The parameter values.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            looked_up: Cell::new(false),
        }
    }
}
