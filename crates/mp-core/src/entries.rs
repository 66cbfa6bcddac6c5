//! Label, tag and taint collection from form rows.
//!
//! The form always renders at least one row, so a list holding a single row
//! with an empty key stands for "no entries".

use std::collections::BTreeMap;

use ocm_api::Taint;

use crate::types::{LabelEntry, TaintEntry};

/// A form row addressed by its key.
pub trait KeyedEntry {
    fn key(&self) -> &str;
}

impl KeyedEntry for LabelEntry {
    fn key(&self) -> &str {
        &self.key
    }
}

impl KeyedEntry for TaintEntry {
    fn key(&self) -> &str {
        &self.key
    }
}

/// True when the rows carry no entries: none at all, or the lone blank row.
pub fn is_effectively_empty<E: KeyedEntry>(entries: &[E]) -> bool {
    match entries {
        [] => true,
        [only] => only.key().is_empty(),
        _ => false,
    }
}

/// Node labels and AWS tags split out of the label rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPartition {
    pub labels: BTreeMap<String, String>,
    /// `None` when no row is an AWS tag, so the field stays off the wire.
    pub tags: Option<BTreeMap<String, String>>,
}

/// Split label rows by `is_aws_tag`. Duplicate keys are rejected by the
/// validator before this runs; here the last row wins.
///
/// Only the lone blank row is dropped. A blank row among other rows is kept
/// under the `""` key, in `tags` when it is flagged.
pub fn partition_labels(entries: &[LabelEntry]) -> LabelPartition {
    if is_effectively_empty(entries) {
        return LabelPartition::default();
    }

    let mut partition = LabelPartition::default();
    for entry in entries {
        let target = if entry.is_aws_tag {
            partition.tags.get_or_insert_with(BTreeMap::new)
        } else {
            &mut partition.labels
        };
        target.insert(entry.key.clone(), entry.value.clone());
    }
    partition
}

pub fn collect_taints(entries: &[TaintEntry]) -> Vec<Taint> {
    if is_effectively_empty(entries) {
        return Vec::new();
    }

    entries
        .iter()
        .map(|t| Taint {
            key: t.key.clone(),
            value: t.value.clone(),
            effect: t.effect,
        })
        .collect()
}
