use mp_core::{
    BuildContext, FormValues, LabelEntry, LabelSectionView, RowView, TagCapabilities, Topology,
};
use ocm_api::{MachinePool, NodePool};
use serde::{Deserialize, Serialize};

// ── Requests ───────────────────────────────────────────────────────

/// Form submission plus the cluster facts the payload depends on.
#[derive(Debug, Deserialize)]
pub struct PoolFormRequest {
    pub topology: Topology,
    #[serde(default)]
    pub multi_zone: bool,
    /// Classic AWS back end, where root disk size is settable.
    #[serde(default)]
    pub classic_cloud: bool,
    #[serde(default)]
    pub secure_boot_applied: bool,
    pub values: FormValues,
}

impl PoolFormRequest {
    pub fn context(&self, is_editing: bool, caps: &TagCapabilities) -> BuildContext {
        BuildContext {
            is_editing,
            is_multi_zone: self.multi_zone,
            is_classic_cloud: self.classic_cloud,
            secure_boot_applied: self.secure_boot_applied,
            tag_editing_enabled: caps.tags_enabled && caps.edit_in_edit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub edit: bool,
}

/// A pool as stored by the cluster-management API, to be opened for editing.
#[derive(Debug, Deserialize)]
pub struct EditValuesRequest {
    pub topology: Topology,
    #[serde(default)]
    pub multi_zone: bool,
    pub pool: serde_json::Value,
}

impl EditValuesRequest {
    pub fn form_values(self) -> Result<FormValues, serde_json::Error> {
        let values = match self.topology {
            Topology::Classic => {
                let pool: MachinePool = serde_json::from_value(self.pool)?;
                FormValues::from_machine_pool(&pool, self.multi_zone)
            }
            Topology::Hosted => {
                let pool: NodePool = serde_json::from_value(self.pool)?;
                FormValues::from_node_pool(&pool, self.multi_zone)
            }
        };
        Ok(values)
    }
}

#[derive(Debug, Deserialize)]
pub struct LabelLayoutRequest {
    pub topology: Topology,
    #[serde(default)]
    pub is_new_pool: bool,
    #[serde(default)]
    pub labels: Vec<LabelEntry>,
}

// ── Responses ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LabelLayoutResponse {
    pub tab_title: &'static str,
    pub add_button_label: &'static str,
    pub can_add_tag: bool,
    pub aws_tag_count: usize,
    pub max_aws_tags: usize,
    pub section: LabelSectionView,
    pub rows: Vec<RowView>,
}

impl LabelLayoutResponse {
    pub fn new(view: LabelSectionView, labels: &[LabelEntry]) -> Self {
        Self {
            tab_title: view.tab_title(),
            add_button_label: view.add_button_label(),
            can_add_tag: mp_core::visibility::can_add_tag(labels),
            aws_tag_count: mp_core::visibility::aws_tag_count(labels),
            max_aws_tags: mp_core::MAX_AWS_TAGS,
            section: view,
            rows: view.rows(labels),
        }
    }
}
