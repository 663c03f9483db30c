//! Variable-id to parameter-slot mapping
//!
//! Built once per generation request from the caller's ordered parameter
//! list. Position in the list is the slot in the generated `p[]` array.

use crate::{CodeGenError, Variable};
use log::warn;
use rustc_hash::FxHashMap;

/// What to do when the same variable appears twice in a parameter list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Reject the parameter list with `DuplicateParameter`
    #[default]
    Error,
    /// Keep the later position, leaving the earlier slot unreferenced
    LastWins,
}

/// Immutable mapping from variable id to parameter index
#[derive(Debug, Clone, Default)]
pub struct IdToIndexMap {
    indices: FxHashMap<u64, usize>,
    /// Length of the parameter list (the `p` array size), duplicates included
    size: usize,
}

impl IdToIndexMap {
    /// Build the map from an ordered parameter list
    ///
    /// # Errors
    /// `DuplicateParameter` if a variable is listed twice and `policy` is
    /// [`DuplicatePolicy::Error`].
    pub fn from_parameters(
        parameters: &[Variable],
        policy: DuplicatePolicy,
    ) -> Result<Self, CodeGenError> {
        let mut indices =
            FxHashMap::with_capacity_and_hasher(parameters.len(), Default::default());
        for (i, var) in parameters.iter().enumerate() {
            if let Some(first) = indices.insert(var.id(), i) {
                match policy {
                    DuplicatePolicy::Error => {
                        return Err(CodeGenError::DuplicateParameter {
                            name: var.name().to_owned(),
                            id: var.id(),
                            first,
                            second: i,
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        warn!(
                            "parameter '{}' listed at positions {first} and {i}; using p[{i}]",
                            var.name()
                        );
                    }
                }
            }
        }
        Ok(IdToIndexMap {
            indices,
            size: parameters.len(),
        })
    }

    /// Slot of the variable with the given id
    #[inline]
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Slot of a variable
    #[inline]
    pub fn get(&self, var: &Variable) -> Option<usize> {
        self.index_of(var.id())
    }

    /// Size of the parameter array
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct variables with a slot
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_index() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let z = Variable::new("z");
        let map = IdToIndexMap::from_parameters(
            &[z.clone(), x.clone(), y.clone()],
            DuplicatePolicy::Error,
        )
        .unwrap();
        assert_eq!(map.get(&z), Some(0));
        assert_eq!(map.get(&x), Some(1));
        assert_eq!(map.get(&y), Some(2));
        assert_eq!(map.size(), 3);
        assert_eq!(map.get(&Variable::new("x")), None);
    }

    #[test]
    fn test_duplicate_is_error_by_default() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let err = IdToIndexMap::from_parameters(
            &[x.clone(), y, x.clone()],
            DuplicatePolicy::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodeGenError::DuplicateParameter {
                name: "x".to_owned(),
                id: x.id(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_last_wins_keeps_array_size() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let map = IdToIndexMap::from_parameters(
            &[x.clone(), y.clone(), x.clone()],
            DuplicatePolicy::LastWins,
        )
        .unwrap();
        assert_eq!(map.get(&x), Some(2));
        assert_eq!(map.get(&y), Some(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map.size(), 3);
    }

    #[test]
    fn test_empty_parameter_list() {
        let map = IdToIndexMap::from_parameters(&[], DuplicatePolicy::Error).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.size(), 0);
    }
}
