//! Form values to cluster-management request payloads.
//!
//! Both builders are total: input is assumed to have passed
//! [`FieldValidator`](crate::validate::FieldValidator). Fields that depend on
//! mode or topology are added through ordered [`InclusionRule`] tables.

use serde::Serialize;

use ocm_api::{
    AwsNodePool, AwsVolume, GcpMachinePool, MachinePool, MachinePoolAutoscaling, NodePool,
    NodePoolAutoscaling, PoolCommon, RootVolume, SpotMarketOptions,
};

use crate::Topology;
use crate::entries::{LabelPartition, collect_taints, partition_labels};
use crate::types::{BuildContext, FormValues, SpotInstanceMode};

/// Autoscaling bounds are per zone; a multi-zone pool spans three.
pub const MULTI_ZONE_FACTOR: u32 = 3;

/// Pool sizing after topology scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    Fixed(u32),
    Autoscaling { min: u32, max: u32 },
}

/// The zone multiplier applies to autoscaling bounds only, never to a
/// fixed replica count.
pub fn sizing(values: &FormValues, is_multi_zone: bool) -> Sizing {
    if !values.autoscaling {
        return Sizing::Fixed(values.replicas);
    }

    let factor = if is_multi_zone { MULTI_ZONE_FACTOR } else { 1 };
    Sizing::Autoscaling {
        min: values.autoscale_min.saturating_mul(factor),
        max: values.autoscale_max.saturating_mul(factor),
    }
}

/// Everything a rule may read while building one payload.
#[derive(Debug, Clone)]
pub struct BuildInput<'a> {
    pub values: &'a FormValues,
    pub ctx: &'a BuildContext,
    pub partition: LabelPartition,
}

impl<'a> BuildInput<'a> {
    pub fn new(values: &'a FormValues, ctx: &'a BuildContext) -> Self {
        Self {
            values,
            ctx,
            partition: partition_labels(&values.labels),
        }
    }

    fn common(&self) -> PoolCommon {
        PoolCommon {
            id: self.values.name.clone(),
            labels: self.partition.labels.clone(),
            taints: collect_taints(&self.values.taints),
            replicas: match sizing(self.values, self.ctx.is_multi_zone) {
                Sizing::Fixed(n) => Some(n),
                Sizing::Autoscaling { .. } => None,
            },
        }
    }
}

/// A conditional field on a payload of type `T`.
pub struct InclusionRule<T> {
    pub name: &'static str,
    pub applies: fn(&BuildInput<'_>) -> bool,
    pub apply: fn(&mut T, &BuildInput<'_>),
}

impl<T> InclusionRule<T> {
    /// Apply the rule if its condition holds. Returns whether it did.
    pub fn run(&self, target: &mut T, input: &BuildInput<'_>) -> bool {
        let applies = (self.applies)(input);
        if applies {
            (self.apply)(target, input);
        }
        applies
    }
}

fn run_rules<T>(rules: &[InclusionRule<T>], target: &mut T, input: &BuildInput<'_>) {
    for rule in rules {
        if rule.run(target, input) {
            tracing::trace!(rule = rule.name, "included");
        }
    }
}

// ── Classic machine pools ────────────────────────────────────────────

pub const CLASSIC_RULES: &[InclusionRule<MachinePool>] = &[
    InclusionRule {
        name: "autoscaling",
        applies: |input| input.values.autoscaling,
        apply: |pool, input| {
            if let Sizing::Autoscaling { min, max } = sizing(input.values, input.ctx.is_multi_zone)
            {
                pool.autoscaling = Some(MachinePoolAutoscaling {
                    min_replicas: min,
                    max_replicas: max,
                });
            }
        },
    },
    InclusionRule {
        name: "instance_type",
        applies: |input| input.ctx.is_creating(),
        apply: |pool, input| pool.instance_type = Some(input.values.instance_type.clone()),
    },
    InclusionRule {
        name: "spot_market_options",
        applies: |input| input.ctx.is_creating() && input.values.use_spot_instances,
        apply: |pool, input| {
            let max_price = match input.values.spot_instance_type {
                SpotInstanceMode::Maximum => Some(input.values.max_price),
                SpotInstanceMode::OnDemand => None,
            };
            pool.aws.get_or_insert_with(Default::default).spot_market_options =
                Some(SpotMarketOptions { max_price });
        },
    },
    InclusionRule {
        name: "additional_security_group_ids",
        applies: |input| input.ctx.is_creating() && !input.values.security_group_ids.is_empty(),
        apply: |pool, input| {
            pool.aws
                .get_or_insert_with(Default::default)
                .additional_security_group_ids = Some(input.values.security_group_ids.clone());
        },
    },
    InclusionRule {
        name: "root_volume",
        applies: |input| input.ctx.is_creating() && input.ctx.is_classic_cloud,
        apply: |pool, input| {
            pool.root_volume = Some(RootVolume {
                aws: Some(AwsVolume {
                    size: input.values.disk_size,
                }),
            });
        },
    },
    InclusionRule {
        name: "secure_boot",
        applies: |input| {
            input.ctx.is_creating()
                && !input.ctx.secure_boot_applied
                && input.values.secure_boot.is_some()
        },
        apply: |pool, input| {
            pool.gcp = Some(GcpMachinePool {
                secure_boot: input.values.secure_boot,
            });
        },
    },
];

/// Build the classic machine pool payload.
pub fn build_classic_request(values: &FormValues, ctx: &BuildContext) -> MachinePool {
    let input = BuildInput::new(values, ctx);
    let mut pool = MachinePool {
        common: input.common(),
        ..Default::default()
    };
    run_rules(CLASSIC_RULES, &mut pool, &input);
    pool
}

// ── Hosted node pools ────────────────────────────────────────────────

fn tags_allowed(input: &BuildInput<'_>) -> bool {
    input.ctx.tag_editing_enabled || input.ctx.is_creating()
}

pub const HOSTED_RULES: &[InclusionRule<NodePool>] = &[
    InclusionRule {
        name: "autoscaling",
        applies: |input| input.values.autoscaling,
        apply: |pool, input| {
            if let Sizing::Autoscaling { min, max } = sizing(input.values, input.ctx.is_multi_zone)
            {
                pool.autoscaling = Some(NodePoolAutoscaling {
                    min_replica: min,
                    max_replica: max,
                });
            }
        },
    },
    InclusionRule {
        name: "subnet",
        applies: |input| input.ctx.is_creating(),
        apply: |pool, input| pool.subnet = input.values.private_subnet_id.clone(),
    },
    InclusionRule {
        name: "aws_node_pool",
        applies: |input| input.ctx.is_creating(),
        apply: |pool, input| {
            pool.aws_node_pool = Some(AwsNodePool {
                instance_type: Some(input.values.instance_type.clone()),
                ec2_metadata_http_tokens: Some(input.values.imds),
                additional_security_group_ids: Some(input.values.security_group_ids.clone()),
                root_volume: Some(AwsVolume {
                    size: input.values.disk_size,
                }),
                tags: None,
            });
        },
    },
    InclusionRule {
        name: "tags",
        applies: |input| {
            tags_allowed(input)
                && input
                    .partition
                    .tags
                    .as_ref()
                    .is_some_and(|tags| !tags.is_empty())
        },
        apply: |pool, input| {
            pool.aws_node_pool.get_or_insert_with(Default::default).tags =
                input.partition.tags.clone();
        },
    },
];

/// Build the hosted node pool payload.
pub fn build_hosted_request(values: &FormValues, ctx: &BuildContext) -> NodePool {
    let input = BuildInput::new(values, ctx);
    let mut pool = NodePool {
        common: input.common(),
        auto_repair: values.auto_repair,
        ..Default::default()
    };
    run_rules(HOSTED_RULES, &mut pool, &input);

    if !tags_allowed(&input) && input.partition.tags.is_some() {
        tracing::warn!(
            pool_id = %values.name,
            "AWS tags left out of node pool update: tag editing is disabled"
        );
    }
    pool
}

/// A built request, in the shape of the cluster's topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    Classic(MachinePool),
    Hosted(NodePool),
}

impl RequestPayload {
    pub fn build(topology: Topology, values: &FormValues, ctx: &BuildContext) -> Self {
        match topology {
            Topology::Classic => Self::Classic(build_classic_request(values, ctx)),
            Topology::Hosted => Self::Hosted(build_hosted_request(values, ctx)),
        }
    }

    pub fn topology(&self) -> Topology {
        match self {
            Self::Classic(_) => Topology::Classic,
            Self::Hosted(_) => Topology::Hosted,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Classic(pool) => &pool.common.id,
            Self::Hosted(pool) => &pool.common.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LabelEntry;
    use ocm_api::Ec2MetadataHttpTokens;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn default_values() -> FormValues {
        FormValues {
            name: "my-mp".into(),
            autoscaling: false,
            auto_repair: true,
            autoscale_min: 2,
            autoscale_max: 4,
            replicas: 0,
            labels: vec![],
            taints: vec![],
            use_spot_instances: true,
            spot_instance_type: SpotInstanceMode::Maximum,
            max_price: 0.04,
            disk_size: 333,
            instance_type: "some-instance-type".into(),
            private_subnet_id: Some("subnet-id".into()),
            security_group_ids: vec!["sg-1".into()],
            imds: Ec2MetadataHttpTokens::Optional,
            secure_boot: None,
        }
    }

    fn values_with_labels_and_tags() -> FormValues {
        FormValues {
            labels: vec![
                LabelEntry::label("label-key", "label-value"),
                LabelEntry::aws_tag("aws-tag-key", "aws-tag-value"),
                LabelEntry::label("environment", "production"),
            ],
            ..default_values()
        }
    }

    fn classic_create() -> BuildContext {
        BuildContext {
            is_classic_cloud: true,
            ..BuildContext::create()
        }
    }

    fn classic_edit() -> BuildContext {
        BuildContext {
            is_classic_cloud: true,
            ..BuildContext::edit()
        }
    }

    #[test]
    fn replicas_are_never_multiplied() {
        let values = FormValues {
            replicas: 5,
            ..default_values()
        };
        let ctx = BuildContext {
            is_multi_zone: true,
            ..BuildContext::create()
        };

        let classic = build_classic_request(&values, &ctx);
        assert_eq!(classic.common.replicas, Some(5));
        assert_eq!(classic.autoscaling, None);

        let hosted = build_hosted_request(&values, &ctx);
        assert_eq!(hosted.common.replicas, Some(5));
        assert_eq!(hosted.autoscaling, None);
    }

    #[test]
    fn multi_zone_triples_autoscaling_bounds() {
        let values = FormValues {
            autoscaling: true,
            ..default_values()
        };
        let ctx = BuildContext {
            is_multi_zone: true,
            ..BuildContext::create()
        };

        let classic = build_classic_request(&values, &ctx);
        assert_eq!(classic.common.replicas, None);
        assert_eq!(
            classic.autoscaling,
            Some(MachinePoolAutoscaling {
                min_replicas: 6,
                max_replicas: 12,
            })
        );

        let hosted = build_hosted_request(&values, &ctx);
        assert_eq!(
            hosted.autoscaling,
            Some(NodePoolAutoscaling {
                min_replica: 6,
                max_replica: 12,
            })
        );
    }

    #[test]
    fn single_zone_keeps_autoscaling_bounds() {
        let values = FormValues {
            autoscaling: true,
            ..default_values()
        };
        assert_eq!(
            sizing(&values, false),
            Sizing::Autoscaling { min: 2, max: 4 }
        );

        let json = serde_json::to_value(build_hosted_request(&values, &BuildContext::edit()))
            .unwrap();
        assert_eq!(json["autoscaling"], json!({ "min_replica": 2, "max_replica": 4 }));
        assert!(json.get("replicas").is_none());
    }

    #[test]
    fn builders_are_deterministic() {
        let values = values_with_labels_and_tags();
        let ctx = classic_create();
        assert_eq!(
            build_classic_request(&values, &ctx),
            build_classic_request(&values, &ctx)
        );
        assert_eq!(
            serde_json::to_string(&build_hosted_request(&values, &ctx)).unwrap(),
            serde_json::to_string(&build_hosted_request(&values, &ctx)).unwrap()
        );
    }

    #[test]
    fn each_classic_rule_applies_alone() {
        let values = default_values();
        let ctx = classic_create();
        let input = BuildInput::new(&values, &ctx);

        let rule = |name: &str| {
            CLASSIC_RULES
                .iter()
                .find(|r| r.name == name)
                .unwrap_or_else(|| panic!("no rule {name}"))
        };

        let mut pool = MachinePool::default();
        assert!(rule("spot_market_options").run(&mut pool, &input));
        assert_eq!(
            pool,
            MachinePool {
                aws: Some(ocm_api::AwsMachinePool {
                    spot_market_options: Some(SpotMarketOptions {
                        max_price: Some(0.04)
                    }),
                    additional_security_group_ids: None,
                }),
                ..Default::default()
            }
        );

        let mut pool = MachinePool::default();
        assert!(!rule("secure_boot").run(&mut pool, &input));
        assert_eq!(pool, MachinePool::default());

        let mut pool = MachinePool::default();
        assert!(!rule("autoscaling").run(&mut pool, &input));
        assert!(rule("root_volume").run(&mut pool, &input));
        assert_eq!(pool.root_volume.unwrap().aws.unwrap().size, 333);
    }

    mod classic {
        use super::*;

        #[test]
        fn create_adds_basic_fields() {
            let pool = build_classic_request(&default_values(), &classic_create());
            let json = serde_json::to_value(&pool).unwrap();

            assert_eq!(json["id"], "my-mp");
            assert_eq!(json["labels"], json!({}));
            assert_eq!(json["taints"], json!([]));
            assert_eq!(json["replicas"], 0);
            assert_eq!(json["instance_type"], "some-instance-type");
            assert_eq!(json["aws"]["spot_market_options"], json!({ "max_price": 0.04 }));
            assert_eq!(json["aws"]["additional_security_group_ids"], json!(["sg-1"]));
            assert_eq!(json["root_volume"]["aws"]["size"], 333);
        }

        #[test]
        fn create_without_classic_cloud_skips_disk_size() {
            let pool = build_classic_request(&default_values(), &BuildContext::create());
            assert_eq!(pool.root_volume, None);
        }

        #[test]
        fn spot_without_price_cap_is_empty_options() {
            let values = FormValues {
                spot_instance_type: SpotInstanceMode::OnDemand,
                ..default_values()
            };
            let json =
                serde_json::to_value(build_classic_request(&values, &classic_create())).unwrap();
            assert_eq!(json["aws"]["spot_market_options"], json!({}));
        }

        #[test]
        fn spot_disabled_leaves_no_spot_options() {
            let values = FormValues {
                use_spot_instances: false,
                ..default_values()
            };
            let pool = build_classic_request(&values, &classic_create());
            let aws = pool.aws.unwrap();
            assert_eq!(aws.spot_market_options, None);
            assert_eq!(aws.additional_security_group_ids, Some(vec!["sg-1".into()]));
        }

        #[test]
        fn no_aws_block_without_spot_or_security_groups() {
            let values = FormValues {
                use_spot_instances: false,
                security_group_ids: vec![],
                ..default_values()
            };
            let pool = build_classic_request(&values, &classic_create());
            assert_eq!(pool.aws, None);
        }

        #[test]
        fn secure_boot_sent_unless_already_applied() {
            let values = FormValues {
                secure_boot: Some(true),
                ..default_values()
            };

            let pool = build_classic_request(&values, &classic_create());
            assert_eq!(pool.gcp, Some(GcpMachinePool { secure_boot: Some(true) }));

            let ctx = BuildContext {
                secure_boot_applied: true,
                ..classic_create()
            };
            assert_eq!(build_classic_request(&values, &ctx).gcp, None);
        }

        #[test]
        fn edit_omits_creation_only_fields() {
            let values = FormValues {
                secure_boot: Some(true),
                ..default_values()
            };
            let pool = build_classic_request(&values, &classic_edit());

            assert_eq!(pool.common.id, "my-mp");
            assert!(pool.common.labels.is_empty());
            assert!(pool.common.taints.is_empty());
            assert_eq!(pool.instance_type, None);
            assert_eq!(pool.root_volume, None);
            assert_eq!(pool.aws, None);
            assert_eq!(pool.gcp, None);
        }

        #[test]
        fn no_hosted_fields() {
            let json =
                serde_json::to_value(build_classic_request(&default_values(), &classic_create()))
                    .unwrap();
            assert!(json.get("subnet").is_none());
            assert!(json.get("aws_node_pool").is_none());
            assert!(json.get("auto_repair").is_none());
        }
    }

    mod hosted {
        use super::*;

        #[test]
        fn create_adds_node_pool_fields() {
            let pool = build_hosted_request(&default_values(), &BuildContext::create());

            assert_eq!(pool.common.id, "my-mp");
            assert!(pool.common.labels.is_empty());
            assert!(pool.common.taints.is_empty());
            assert_eq!(pool.subnet.as_deref(), Some("subnet-id"));
            assert!(pool.auto_repair);

            let aws = pool.aws_node_pool.unwrap();
            assert_eq!(aws.instance_type.as_deref(), Some("some-instance-type"));
            assert_eq!(aws.additional_security_group_ids, Some(vec!["sg-1".into()]));
            assert_eq!(aws.ec2_metadata_http_tokens, Some(Ec2MetadataHttpTokens::Optional));
            assert_eq!(aws.root_volume, Some(AwsVolume { size: 333 }));
            assert_eq!(aws.tags, None);
        }

        #[test]
        fn no_classic_fields() {
            let json =
                serde_json::to_value(build_hosted_request(&default_values(), &classic_create()))
                    .unwrap();
            assert!(json.get("root_volume").is_none());
            assert!(json.get("aws").is_none());
            assert!(json.get("instance_type").is_none());
        }

        #[test]
        fn edit_omits_creation_only_fields() {
            let values = FormValues {
                auto_repair: false,
                ..default_values()
            };
            let pool = build_hosted_request(&values, &BuildContext::edit());

            assert_eq!(pool.common.id, "my-mp");
            assert_eq!(pool.subnet, None);
            assert_eq!(pool.aws_node_pool, None);
            assert!(!pool.auto_repair);
        }

        #[test]
        fn labels_and_tags_are_separated() {
            let pool = build_hosted_request(&values_with_labels_and_tags(), &BuildContext::create());

            assert_eq!(
                pool.common.labels,
                BTreeMap::from([
                    ("label-key".to_string(), "label-value".to_string()),
                    ("environment".to_string(), "production".to_string()),
                ])
            );
            let aws = pool.aws_node_pool.unwrap();
            assert_eq!(
                aws.tags,
                Some(BTreeMap::from([(
                    "aws-tag-key".to_string(),
                    "aws-tag-value".to_string()
                )]))
            );
            assert_eq!(aws.additional_security_group_ids, Some(vec!["sg-1".into()]));
        }

        #[test]
        fn labels_without_tags_leave_tags_absent() {
            let values = FormValues {
                labels: vec![
                    LabelEntry::label("label-key", "label-value"),
                    LabelEntry::label("environment", "production"),
                ],
                ..default_values()
            };
            let json =
                serde_json::to_value(build_hosted_request(&values, &BuildContext::create()))
                    .unwrap();
            assert!(json["aws_node_pool"].get("tags").is_none());
        }

        #[test]
        fn blank_label_row_yields_nothing() {
            let values = FormValues {
                labels: vec![LabelEntry::default()],
                ..default_values()
            };
            let pool = build_hosted_request(&values, &BuildContext::create());
            assert!(pool.common.labels.is_empty());
            assert_eq!(pool.aws_node_pool.unwrap().tags, None);
        }

        #[test]
        fn edit_with_tag_editing_creates_node_pool_block() {
            let values = FormValues {
                labels: vec![LabelEntry::aws_tag("new-tag", "new-value")],
                ..default_values()
            };
            let ctx = BuildContext {
                tag_editing_enabled: true,
                ..BuildContext::edit()
            };

            let json = serde_json::to_value(build_hosted_request(&values, &ctx)).unwrap();
            assert_eq!(
                json["aws_node_pool"],
                json!({ "tags": { "new-tag": "new-value" } })
            );
        }

        #[test]
        fn edit_without_tag_editing_drops_tags() {
            let values = FormValues {
                labels: vec![
                    LabelEntry::label("team", "infra"),
                    LabelEntry::aws_tag("new-tag", "new-value"),
                ],
                ..default_values()
            };
            let pool = build_hosted_request(&values, &BuildContext::edit());
            assert_eq!(pool.aws_node_pool, None);
            assert_eq!(pool.common.labels["team"], "infra");
        }
    }

    mod edit_values {
        use super::*;
        use ocm_api::TaintEffect;

        use crate::types::TaintEntry;

        fn multi_zone_create() -> BuildContext {
            BuildContext {
                is_multi_zone: true,
                ..classic_create()
            }
        }

        fn gpu_taint() -> TaintEntry {
            TaintEntry {
                key: "dedicated".into(),
                value: "gpu".into(),
                effect: TaintEffect::NoExecute,
            }
        }

        #[test]
        fn stored_machine_pool_rebuilds_unchanged() {
            let values = FormValues {
                autoscaling: true,
                labels: vec![LabelEntry::label("team", "infra")],
                taints: vec![gpu_taint()],
                ..default_values()
            };
            let stored = build_classic_request(&values, &multi_zone_create());

            let form = FormValues::from_machine_pool(&stored, true);
            assert!(form.autoscaling);
            assert_eq!((form.autoscale_min, form.autoscale_max), (2, 4));
            assert_eq!(form.labels, vec![LabelEntry::label("team", "infra")]);
            assert_eq!(form.taints, vec![gpu_taint()]);
            assert_eq!(form.spot_instance_type, SpotInstanceMode::Maximum);
            assert_eq!(form.max_price, 0.04);
            assert_eq!(form.disk_size, 333);

            assert_eq!(build_classic_request(&form, &multi_zone_create()), stored);
        }

        #[test]
        fn stored_node_pool_rebuilds_unchanged() {
            let values = FormValues {
                autoscaling: true,
                taints: vec![gpu_taint()],
                imds: Ec2MetadataHttpTokens::Required,
                ..values_with_labels_and_tags()
            };
            let stored = build_hosted_request(&values, &multi_zone_create());

            let form = FormValues::from_node_pool(&stored, true);
            assert_eq!((form.autoscale_min, form.autoscale_max), (2, 4));
            assert_eq!(
                form.labels,
                vec![
                    LabelEntry::label("environment", "production"),
                    LabelEntry::label("label-key", "label-value"),
                    LabelEntry::aws_tag("aws-tag-key", "aws-tag-value"),
                ]
            );
            assert_eq!(form.private_subnet_id.as_deref(), Some("subnet-id"));
            assert_eq!(form.imds, Ec2MetadataHttpTokens::Required);

            assert_eq!(build_hosted_request(&form, &multi_zone_create()), stored);
        }

        #[test]
        fn single_zone_bounds_are_not_divided() {
            let pool = NodePool {
                autoscaling: Some(NodePoolAutoscaling {
                    min_replica: 3,
                    max_replica: 5,
                }),
                ..Default::default()
            };
            let form = FormValues::from_node_pool(&pool, false);
            assert_eq!((form.autoscale_min, form.autoscale_max), (3, 5));
        }

        #[test]
        fn fixed_size_pool_keeps_replicas() {
            let pool = MachinePool {
                common: PoolCommon {
                    id: "workers".into(),
                    replicas: Some(6),
                    ..Default::default()
                },
                ..Default::default()
            };
            let form = FormValues::from_machine_pool(&pool, true);
            assert!(!form.autoscaling);
            assert_eq!(form.replicas, 6);
            assert!(!form.use_spot_instances);
            assert_eq!(form.disk_size, 300);
        }

        #[test]
        fn empty_collections_become_blank_rows() {
            let pool = NodePool {
                common: PoolCommon {
                    id: "np-1".into(),
                    ..Default::default()
                },
                ..Default::default()
            };
            let form = FormValues::from_node_pool(&pool, false);
            assert_eq!(form.labels, vec![LabelEntry::default()]);
            assert_eq!(form.taints, vec![TaintEntry::default()]);

            let rebuilt = build_hosted_request(&form, &BuildContext::edit());
            assert!(rebuilt.common.labels.is_empty());
            assert!(rebuilt.common.taints.is_empty());
        }

        #[test]
        fn stored_tags_survive_an_edit() {
            let pool = NodePool {
                common: PoolCommon {
                    id: "np-1".into(),
                    ..Default::default()
                },
                aws_node_pool: Some(ocm_api::AwsNodePool {
                    tags: Some(BTreeMap::from([("team".to_string(), "infra".to_string())])),
                    ..Default::default()
                }),
                ..Default::default()
            };
            let form = FormValues::from_node_pool(&pool, false);
            assert_eq!(form.labels, vec![LabelEntry::aws_tag("team", "infra")]);

            let ctx = BuildContext {
                tag_editing_enabled: true,
                ..BuildContext::edit()
            };
            let rebuilt = build_hosted_request(&form, &ctx);
            assert_eq!(rebuilt.aws_node_pool.unwrap().tags, pool.aws_node_pool.unwrap().tags);
        }
    }

    #[test]
    fn payload_follows_topology() {
        let values = default_values();
        let ctx = classic_create();

        let classic = RequestPayload::build(Topology::Classic, &values, &ctx);
        assert_eq!(classic.topology(), Topology::Classic);
        assert_eq!(classic.id(), "my-mp");

        let hosted = RequestPayload::build(Topology::Hosted, &values, &ctx);
        assert!(matches!(hosted, RequestPayload::Hosted(ref p) if p.subnet.is_some()));
    }
}
