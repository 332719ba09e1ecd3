//! Variable label management
//!
//! This module provides the [`VariableLabels`] type for naming input variables
//! with automatic conflict resolution and efficient lookup.

use std::collections::HashMap;
use std::sync::Arc;

use super::literal::Variable;

const PREFIX: char = 'x';

/// Ordered variable names with name -> index lookup
///
/// Missing names are generated as `x0`, `x1`, ... When a generated name
/// collides with a user-supplied one, the next free sequential name is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableLabels {
    /// Ordered labels by variable index
    labels: Vec<Arc<str>>,
    /// Fast lookup: label name -> variable index
    label_map: HashMap<Arc<str>, usize>,
}

impl VariableLabels {
    /// Generate default labels `x0..x{n-1}`
    pub fn new(n_variables: usize) -> Self {
        let mut labels = VariableLabels::default();
        labels.backfill_to(n_variables);
        labels
    }

    /// Create from user-supplied labels
    ///
    /// Duplicate names keep their first position for lookup.
    pub fn from_labels<S: AsRef<str>>(names: &[S]) -> Self {
        let labels: Vec<Arc<str>> = names.iter().map(|s| Arc::from(s.as_ref())).collect();
        let mut label_map = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            label_map.entry(Arc::clone(label)).or_insert(i);
        }
        VariableLabels { labels, label_map }
    }

    /// Number of labelled variables
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Get label at position
    pub fn get(&self, index: usize) -> Option<&Arc<str>> {
        self.labels.get(index)
    }

    /// Get labels slice
    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// Find variable index by label name
    pub fn find_position(&self, name: &str) -> Option<usize> {
        self.label_map.get(name).copied()
    }

    /// Named [`Variable`] values in index order
    pub fn variables(&self) -> Vec<Variable> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, name)| Variable::named(i, name))
            .collect()
    }

    /// Find the next free sequential label index starting from `start`
    fn next_available_index(&self, start: usize) -> usize {
        let mut n = start;
        while self
            .label_map
            .contains_key(format!("{}{}", PREFIX, n).as_str())
        {
            n += 1;
        }
        n
    }

    /// Append a generated label for the next position
    fn push_generated(&mut self) {
        let position = self.labels.len();
        let n = self.next_available_index(position);
        let label: Arc<str> = Arc::from(format!("{}{}", PREFIX, n).as_str());
        self.label_map.insert(Arc::clone(&label), position);
        self.labels.push(label);
    }

    /// Generate missing labels up to `target_size`
    pub fn backfill_to(&mut self, target_size: usize) {
        while self.labels.len() < target_size {
            self.push_generated();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let labels = VariableLabels::new(3);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(2).map(|s| s.as_ref()), Some("x2"));
        assert_eq!(labels.find_position("x1"), Some(1));
    }

    #[test]
    fn test_backfill_skips_taken_names() {
        let mut labels = VariableLabels::from_labels(&["x1"]);
        labels.backfill_to(3);
        let names: Vec<&str> = labels.as_slice().iter().map(|s| s.as_ref()).collect();
        assert_eq!(names, vec!["x1", "x2", "x3"]);
    }

    #[test]
    fn test_variables_carry_names() {
        let labels = VariableLabels::from_labels(&["rain", "wind"]);
        let vars = labels.variables();
        assert_eq!(vars[1].index(), 1);
        assert_eq!(vars[1].name(), Some("wind"));
    }
}
