//! Label name -> distinct values index for one request.

use std::collections::{BTreeMap, BTreeSet};

use crate::exposition::Sample;

/// Inverted index of every label value seen across a batch of samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    values: BTreeMap<String, BTreeSet<String>>,
}

impl LabelIndex {
    /// Aggregate labels from `samples`. Never fails.
    pub fn extract<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut values: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for sample in samples {
            for (name, value) in &sample.labels {
                values
                    .entry(name.clone())
                    .or_default()
                    .insert(value.clone());
            }
        }
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct label names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Distinct values seen for `name` (0 if absent).
    pub fn distinct_count(&self, name: &str) -> usize {
        self.values.get(name).map_or(0, BTreeSet::len)
    }

    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.values.get(name)
    }

    /// Iterate `(label name, distinct count)` in label-name order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.len()))
    }
}
