use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ocm_api::{Ec2MetadataHttpTokens, MachinePool, NodePool, Taint, TaintEffect};

use crate::request::MULTI_ZONE_FACTOR;

/// Machine pool form state as submitted by the front end.
///
/// Built once per form session, either from an existing pool (edit) or from
/// defaults (create). Exactly one sizing mode is live: `autoscale_min` and
/// `autoscale_max` when `autoscaling` is set, `replicas` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormValues {
    pub name: String,
    pub autoscaling: bool,
    pub autoscale_min: u32,
    pub autoscale_max: u32,
    pub replicas: u32,
    #[serde(rename = "auto_repair", alias = "autoRepair")]
    pub auto_repair: bool,
    #[serde(alias = "labelEntries")]
    pub labels: Vec<LabelEntry>,
    #[serde(alias = "taintEntries")]
    pub taints: Vec<TaintEntry>,
    pub instance_type: String,
    pub private_subnet_id: Option<String>,
    pub security_group_ids: Vec<String>,
    #[serde(alias = "diskSizeGiB")]
    pub disk_size: u32,
    pub use_spot_instances: bool,
    #[serde(alias = "spotInstanceMode")]
    pub spot_instance_type: SpotInstanceMode,
    pub max_price: f64,
    #[serde(alias = "imdsMode")]
    pub imds: Ec2MetadataHttpTokens,
    #[serde(rename = "secure_boot", alias = "secureBoot")]
    pub secure_boot: Option<bool>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            autoscaling: false,
            autoscale_min: 0,
            autoscale_max: 0,
            replicas: 0,
            auto_repair: true,
            labels: vec![LabelEntry::default()],
            taints: vec![TaintEntry::default()],
            instance_type: String::new(),
            private_subnet_id: None,
            security_group_ids: Vec::new(),
            disk_size: 300,
            use_spot_instances: false,
            spot_instance_type: SpotInstanceMode::OnDemand,
            max_price: 0.01,
            imds: Ec2MetadataHttpTokens::Optional,
            secure_boot: None,
        }
    }
}

impl FormValues {
    /// Form state for editing an existing classic machine pool.
    pub fn from_machine_pool(pool: &MachinePool, is_multi_zone: bool) -> Self {
        let defaults = Self::default();
        let aws = pool.aws.clone().unwrap_or_default();
        let spot = aws.spot_market_options;

        let mut values = Self {
            name: pool.common.id.clone(),
            replicas: pool.common.replicas.unwrap_or_default(),
            labels: label_rows(&pool.common.labels, None),
            taints: taint_rows(&pool.common.taints),
            instance_type: pool.instance_type.clone().unwrap_or_default(),
            security_group_ids: aws.additional_security_group_ids.unwrap_or_default(),
            disk_size: pool
                .root_volume
                .and_then(|v| v.aws)
                .map_or(defaults.disk_size, |v| v.size),
            use_spot_instances: spot.is_some(),
            spot_instance_type: match spot.and_then(|s| s.max_price) {
                Some(_) => SpotInstanceMode::Maximum,
                None => SpotInstanceMode::OnDemand,
            },
            max_price: spot.and_then(|s| s.max_price).unwrap_or(defaults.max_price),
            secure_boot: pool.gcp.and_then(|g| g.secure_boot),
            ..defaults
        };
        if let Some(bounds) = pool.autoscaling {
            values.set_autoscaling(bounds.min_replicas, bounds.max_replicas, is_multi_zone);
        }
        values
    }

    /// Form state for editing an existing hosted node pool. AWS tags come
    /// back as tag rows after the node labels.
    pub fn from_node_pool(pool: &NodePool, is_multi_zone: bool) -> Self {
        let defaults = Self::default();
        let aws = pool.aws_node_pool.clone().unwrap_or_default();

        let mut values = Self {
            name: pool.common.id.clone(),
            replicas: pool.common.replicas.unwrap_or_default(),
            auto_repair: pool.auto_repair,
            labels: label_rows(&pool.common.labels, aws.tags.as_ref()),
            taints: taint_rows(&pool.common.taints),
            instance_type: aws.instance_type.unwrap_or_default(),
            private_subnet_id: pool.subnet.clone(),
            security_group_ids: aws.additional_security_group_ids.unwrap_or_default(),
            disk_size: aws.root_volume.map_or(defaults.disk_size, |v| v.size),
            imds: aws.ec2_metadata_http_tokens.unwrap_or_default(),
            ..defaults
        };
        if let Some(bounds) = pool.autoscaling {
            values.set_autoscaling(bounds.min_replica, bounds.max_replica, is_multi_zone);
        }
        values
    }

    /// Stored bounds span every zone; the form edits them per zone.
    fn set_autoscaling(&mut self, min: u32, max: u32, is_multi_zone: bool) {
        let factor = if is_multi_zone { MULTI_ZONE_FACTOR } else { 1 };
        self.autoscaling = true;
        self.autoscale_min = min / factor;
        self.autoscale_max = max / factor;
    }
}

fn label_rows(
    labels: &BTreeMap<String, String>,
    tags: Option<&BTreeMap<String, String>>,
) -> Vec<LabelEntry> {
    let mut rows: Vec<LabelEntry> = labels
        .iter()
        .map(|(k, v)| LabelEntry::label(k.as_str(), v.as_str()))
        .collect();
    rows.extend(
        tags.into_iter()
            .flatten()
            .map(|(k, v)| LabelEntry::aws_tag(k.as_str(), v.as_str())),
    );
    if rows.is_empty() {
        rows.push(LabelEntry::default());
    }
    rows
}

fn taint_rows(taints: &[Taint]) -> Vec<TaintEntry> {
    if taints.is_empty() {
        return vec![TaintEntry::default()];
    }
    taints
        .iter()
        .map(|t| TaintEntry {
            key: t.key.clone(),
            value: t.value.clone(),
            effect: t.effect,
        })
        .collect()
}

/// One row of the labels section. Rows flagged `is_aws_tag` are routed to the
/// provider's tagging mechanism instead of the node label map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, rename = "isAwsTag", alias = "isSpecialTag")]
    pub is_aws_tag: bool,
}

impl LabelEntry {
    pub fn label(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_aws_tag: false,
        }
    }

    pub fn aws_tag(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_aws_tag: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaintEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub effect: TaintEffect,
}

/// Spot pricing choice: capped at `max_price`, or whatever the on-demand price is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotInstanceMode {
    #[serde(rename = "maximum")]
    Maximum,
    #[default]
    #[serde(rename = "any-price", alias = "onDemand")]
    OnDemand,
}

/// Flags supplied by the hosting view, outside of form state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildContext {
    pub is_editing: bool,
    pub is_multi_zone: bool,
    /// Disk size is only settable on the classic AWS back end.
    pub is_classic_cloud: bool,
    pub secure_boot_applied: bool,
    /// AWS tags may be changed on an existing node pool.
    pub tag_editing_enabled: bool,
}

impl BuildContext {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit() -> Self {
        Self {
            is_editing: true,
            ..Self::default()
        }
    }

    pub fn is_creating(&self) -> bool {
        !self.is_editing
    }
}
