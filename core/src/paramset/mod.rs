//! Parameter Sets

use crate::pbrt::*;
use std::collections::HashMap;

mod paramset_item;

// Re-export
pub use paramset_item::*;

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Named sampler parameters, one map per value type.
#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    pub bools: ParamSetMap<bool>,
    pub ints: ParamSetMap<Int>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            let n = String::from(name);
            self.$paramset.insert(n, ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item. Lists and missing
/// names return `default`.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str, default: $t) -> $t {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => {
                    param.looked_up.set(true);
                    param.values[0]
                }
                _ => default,
            }
        }
    };
}

/// Collect the names of parameters that were never looked up.
macro_rules! unused_param_names {
    ($params: expr, $names: ident) => {
        $names.extend(
            $params
                .iter()
                .filter(|(_, param)| !param.looked_up.get())
                .map(|(name, _)| name.clone()),
        );
    };
}

impl ParamSet {
    /// Returns a new empty `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_find_one!(find_one_int, Int, ints);
    paramset_add!(add_int, Int, ints);

    paramset_find_one!(find_one_bool, bool, bools);
    paramset_add!(add_bool, bool, bools);

    /// Returns the sorted names of parameters that were never looked up.
    pub fn unused(&self) -> Vec<String> {
        let mut names = vec![];
        unused_param_names!(self.bools, names);
        unused_param_names!(self.ints, names);
        names.sort();
        names
    }

    /// Log a warning for each parameter that was never looked up.
    pub fn report_unused(&self) {
        for name in self.unused() {
            warn!("Parameter '{}' not used", name);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
