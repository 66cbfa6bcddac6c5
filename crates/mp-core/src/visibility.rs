//! Which label rows the form shows, and how.
//!
//! The raw inputs are three feature flags, the cluster topology and whether
//! the pool is new. They are folded into a few named booleans once, and every
//! row decision branches on those.

use serde::{Deserialize, Serialize};

use crate::types::LabelEntry;

/// Upper bound on AWS tags per node pool.
pub const MAX_AWS_TAGS: usize = 25;

/// Feature flags governing AWS tag support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagCapabilities {
    /// AWS tags on new node pools.
    pub tags_enabled: bool,
    /// Existing tags are shown when editing a pool.
    pub view_in_edit: bool,
    /// Existing tags may be changed when editing a pool.
    pub edit_in_edit: bool,
}

/// Layout of one label row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub hidden: bool,
    pub read_only: bool,
    pub show_checkbox: bool,
    pub checkbox_disabled: bool,
    pub removable: bool,
}

/// Derived flags for one evaluation of the labels section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelSectionView {
    pub is_new_pool: bool,
    pub show_tags: bool,
    pub can_view: bool,
    pub can_edit: bool,
    #[serde(skip)]
    caps: TagCapabilities,
    #[serde(skip)]
    is_hosted: bool,
}

impl LabelSectionView {
    pub fn new(caps: TagCapabilities, is_hosted: bool, is_new_pool: bool) -> Self {
        let show_tags = caps.tags_enabled && is_hosted;
        Self {
            is_new_pool,
            show_tags,
            can_view: show_tags && !is_new_pool && caps.view_in_edit,
            can_edit: show_tags && !is_new_pool && caps.edit_in_edit,
            caps,
            is_hosted,
        }
    }

    /// Layout for `entry` given every row in the section.
    pub fn row(&self, entry: &LabelEntry, all: &[LabelEntry]) -> RowView {
        let is_tag = entry.is_aws_tag;

        let hidden = is_tag && (!self.show_tags || (!self.can_view && !self.is_new_pool));
        let read_only = is_tag && self.can_view && !self.can_edit;
        let show_checkbox =
            self.show_tags && (self.is_new_pool || self.can_edit || (is_tag && !self.can_edit));
        let too_many_tags = !is_tag && !can_add_tag(all);

        RowView {
            hidden,
            read_only,
            show_checkbox,
            checkbox_disabled: read_only || too_many_tags,
            removable: !is_tag || self.is_new_pool || self.can_edit,
        }
    }

    pub fn rows(&self, entries: &[LabelEntry]) -> Vec<RowView> {
        entries.iter().map(|e| self.row(e, entries)).collect()
    }

    pub fn add_button_label(&self) -> &'static str {
        if self.show_tags && (self.is_new_pool || self.caps.edit_in_edit) {
            "Add label or AWS Tag"
        } else {
            "Add label"
        }
    }

    pub fn tab_title(&self) -> &'static str {
        let tags_in_title = self.caps.tags_enabled
            && self.is_hosted
            && (self.is_new_pool || self.caps.view_in_edit);
        if tags_in_title {
            "Labels, AWS Tags, and Taints"
        } else {
            "Labels and Taints"
        }
    }
}

pub fn aws_tag_count(entries: &[LabelEntry]) -> usize {
    entries.iter().filter(|e| e.is_aws_tag).count()
}

/// Whether another row may be flagged as an AWS tag.
pub fn can_add_tag(entries: &[LabelEntry]) -> bool {
    aws_tag_count(entries) < MAX_AWS_TAGS
}
