//! src/search/matcher.rs
//! ============================================================================
//! # Searchable views of fleet records
//!
//! Each record type exposes a lowercase index that is built once, when the
//! loader hands the record to the model, and dropped with the record on the
//! next refresh. Matching never lowercases at query time.
//!
//! Structured tokens are evaluated per entity type. A token whose key the
//! entity does not recognize makes the whole query fall back to free text.

use crate::model::resources::{
    Cluster, Instance, NetworkAttachment, NodeGroup, ScalingGroup, Tags,
};
use crate::search::query::Query;
use smallvec::SmallVec;

pub trait Searchable {
    type Index: std::fmt::Debug + Send + Sync;

    fn build_index(&self) -> Self::Index;

    /// True if any searchable field contains `needle`.
    fn matches_text(index: &Self::Index, needle: &str) -> bool;

    /// Evaluates one `key:value` token; `None` when `key` is not recognized.
    fn matches_token(index: &Self::Index, key: &str, value: &str) -> Option<bool> {
        let _ = (index, key, value);
        None
    }
}

/// Evaluates a parsed query against one indexed record.
#[must_use]
pub fn matches<T: Searchable>(index: &T::Index, query: &Query) -> bool {
    if query.is_empty() {
        return true;
    }

    if let Some(tokens) = query.tokens() {
        let mut all = true;
        let mut structured = true;
        for token in tokens {
            match T::matches_token(index, &token.key, &token.value) {
                Some(hit) => all &= hit,
                None => {
                    structured = false;
                    break;
                }
            }
        }
        if structured {
            return all;
        }
    }

    T::matches_text(index, query.text())
}

/* ============================ Instances ============================ */

#[derive(Debug, Clone)]
pub struct InstanceIndex {
    name: String,
    id: String,
    private_ip: String,
    public_ip: String,
    instance_type: String,
    state: String,
    tags: Vec<(String, String)>,
}

impl InstanceIndex {
    fn tag_matches(&self, value: &str) -> bool {
        match value.find(['=', ':']) {
            Some(at) => {
                let (key, rest) = (&value[..at], &value[at + 1..]);
                self.tags.iter().any(|(k, v)| k == key && v.contains(rest))
            }
            None => self.tags.iter().any(|(k, _)| k.contains(value)),
        }
    }
}

fn lower_tags(tags: &Tags) -> Vec<(String, String)> {
    tags.iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
        .collect()
}

impl Searchable for Instance {
    type Index = InstanceIndex;

    fn build_index(&self) -> InstanceIndex {
        InstanceIndex {
            name: self.name.to_lowercase(),
            id: self.id.to_lowercase(),
            private_ip: self.private_ip.as_deref().unwrap_or_default().to_lowercase(),
            public_ip: self.public_ip.as_deref().unwrap_or_default().to_lowercase(),
            instance_type: self.instance_type.to_lowercase(),
            state: self.state.as_str().to_lowercase(),
            tags: lower_tags(&self.tags),
        }
    }

    fn matches_text(index: &InstanceIndex, needle: &str) -> bool {
        [
            &index.name,
            &index.id,
            &index.private_ip,
            &index.public_ip,
            &index.instance_type,
            &index.state,
        ]
        .iter()
        .any(|field| field.contains(needle))
            || index.tags.iter().any(|(k, v)| {
                format!("{k}:{v}").contains(needle) || format!("{k}={v}").contains(needle)
            })
    }

    fn matches_token(index: &InstanceIndex, key: &str, value: &str) -> Option<bool> {
        let hit = match key {
            "name" => index.name.contains(value),
            "id" | "instance" => index.id.contains(value),
            "privateip" | "private" => index.private_ip.contains(value),
            "publicip" | "public" | "ip" | "pip" => {
                index.public_ip.contains(value) || index.private_ip.contains(value)
            }
            "type" => index.instance_type.contains(value),
            "state" => index.state.contains(value),
            "tag" => index.tag_matches(value),
            _ => return None,
        };
        Some(hit)
    }
}

/* ============================ Clusters ============================= */

#[derive(Debug, Clone)]
pub struct ClusterIndex {
    fields: [String; 4],
}

impl Searchable for Cluster {
    type Index = ClusterIndex;

    fn build_index(&self) -> ClusterIndex {
        ClusterIndex {
            fields: [
                self.name.to_lowercase(),
                self.status.to_lowercase(),
                self.version.to_lowercase(),
                self.arn.to_lowercase(),
            ],
        }
    }

    fn matches_text(index: &ClusterIndex, needle: &str) -> bool {
        index.fields.iter().any(|f| f.contains(needle))
    }
}

/* ========================== Scaling groups ========================= */

#[derive(Debug, Clone)]
pub struct ScalingGroupIndex {
    fields: SmallVec<[String; 6]>,
    sizes: [String; 4],
}

fn size_strings(desired: u32, min: u32, max: u32, current: u32) -> [String; 4] {
    [
        desired.to_string(),
        min.to_string(),
        max.to_string(),
        current.to_string(),
    ]
}

impl Searchable for ScalingGroup {
    type Index = ScalingGroupIndex;

    fn build_index(&self) -> ScalingGroupIndex {
        let mut fields: SmallVec<[String; 6]> = SmallVec::new();
        fields.push(self.name.to_lowercase());
        fields.push(self.status().as_str().to_lowercase());
        fields.push(self.health_check_type.to_lowercase());
        if let Some(lt) = &self.launch_template {
            fields.push(lt.name.to_lowercase());
        }
        fields.extend(self.availability_zones.iter().map(|z| z.to_lowercase()));

        let c = self.capacity;
        ScalingGroupIndex {
            fields,
            sizes: size_strings(c.desired, c.min, c.max, c.current),
        }
    }

    fn matches_text(index: &ScalingGroupIndex, needle: &str) -> bool {
        index.fields.iter().any(|f| f.contains(needle))
            || index.sizes.iter().any(|s| s.contains(needle))
    }
}

/* =========================== Node groups =========================== */

#[derive(Debug, Clone)]
pub struct NodeGroupIndex {
    cluster: String,
    name: String,
    status: String,
    version: String,
    instance_types: String,
    lt_name: String,
    lt_id: String,
    lt_version: String,
    sizes: [String; 4],
}

impl Searchable for NodeGroup {
    type Index = NodeGroupIndex;

    fn build_index(&self) -> NodeGroupIndex {
        let lt = self.launch_template.clone().unwrap_or_default();
        let c = self.capacity;
        NodeGroupIndex {
            cluster: self.cluster.to_lowercase(),
            name: self.name.to_lowercase(),
            status: self.status.to_lowercase(),
            version: self.version.to_lowercase(),
            instance_types: self.instance_types.join(",").to_lowercase(),
            lt_name: lt.name.to_lowercase(),
            lt_id: lt.id.to_lowercase(),
            lt_version: lt.version.to_lowercase(),
            sizes: size_strings(c.desired, c.min, c.max, c.current),
        }
    }

    fn matches_text(index: &NodeGroupIndex, needle: &str) -> bool {
        [
            &index.cluster,
            &index.name,
            &index.status,
            &index.version,
            &index.instance_types,
            &index.lt_name,
            &index.lt_version,
            &index.lt_id,
        ]
        .iter()
        .any(|field| field.contains(needle))
            || index.sizes.iter().any(|s| s.contains(needle))
    }

    fn matches_token(index: &NodeGroupIndex, key: &str, value: &str) -> Option<bool> {
        let field = match key {
            "cluster" => &index.cluster,
            "name" => &index.name,
            "status" => &index.status,
            "version" => &index.version,
            "type" | "instancetype" => &index.instance_types,
            "ltname" | "launchtemplatename" => &index.lt_name,
            "ltid" | "launchtemplateid" => &index.lt_id,
            "ltversion" | "launchtemplateversion" => &index.lt_version,
            _ => return None,
        };
        Some(field.contains(value))
    }
}

/* ======================== Network attachments ====================== */

#[derive(Debug, Clone)]
pub struct NetworkIndex {
    fields: Vec<String>,
}

impl Searchable for NetworkAttachment {
    type Index = NetworkIndex;

    fn build_index(&self) -> NetworkIndex {
        let mut fields = vec![
            self.instance_name.to_lowercase(),
            self.instance_id.to_lowercase(),
            self.dns_name.to_lowercase(),
        ];
        for iface in &self.interfaces {
            fields.push(iface.name.to_lowercase());
            fields.push(iface.subnet_id.to_lowercase());
            fields.push(iface.cidr.to_lowercase());
            fields.push(iface.security_group.to_lowercase());
        }
        NetworkIndex { fields }
    }

    fn matches_text(index: &NetworkIndex, needle: &str) -> bool {
        index.fields.iter().any(|f| f.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resources::{Capacity, InstanceState, LaunchTemplateRef};

    fn instance(name: &str, state: &str, tags: &[(&str, &str)]) -> Instance {
        Instance {
            id: format!("i-{name}"),
            name: name.to_string(),
            state: InstanceState::parse(state),
            private_ip: Some("10.0.1.10".into()),
            public_ip: Some("54.1.2.3".into()),
            private_dns: None,
            public_dns: None,
            instance_type: "t3.micro".into(),
            availability_zone: "us-east-1a".into(),
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            launch_time: None,
            instance_profile: None,
            security_groups: SmallVec::new(),
        }
    }

    fn hit(inst: &Instance, raw: &str) -> bool {
        matches::<Instance>(&inst.build_index(), &Query::parse(raw))
    }

    #[test]
    fn test_instance_structured_tokens() {
        let web = instance("web-server", "running", &[("Environment", "production")]);

        assert!(hit(&web, "name:web"));
        assert!(hit(&web, "state:running"));
        assert!(hit(&web, "type:t3"));
        assert!(hit(&web, "id:i-web"));
        assert!(hit(&web, "private:10.0.1"));
        assert!(hit(&web, "name:web state:running"));
        assert!(!hit(&web, "name:web state:stopped"));
    }

    #[test]
    fn test_public_ip_key_also_matches_private_address() {
        let web = instance("web", "running", &[]);
        assert!(hit(&web, "ip:54.1"));
        assert!(hit(&web, "pip:10.0.1"));
        assert!(!hit(&web, "privateip:54.1"));
    }

    #[test]
    fn test_tag_tokens() {
        let web = instance("web", "running", &[("Environment", "production")]);

        assert!(hit(&web, "tag:Environment=production"));
        assert!(hit(&web, "tag:environment:prod"));
        assert!(hit(&web, "tag:env"));
        assert!(!hit(&web, "tag:Environment=staging"));
        assert!(!hit(&web, "tag:Missing"));
    }

    #[test]
    fn test_unknown_key_falls_back_to_free_text() {
        let web = instance("web", "running", &[]);
        assert!(!hit(&web, "unknown"));
        assert!(!hit(&web, "color:blue"));
        // Free text matches the whole query string, not its parts.
        assert!(!hit(&web, "web running"));
        assert!(hit(&web, "web"));
    }

    #[test]
    fn test_free_text_matches_tags_in_both_forms() {
        let web = instance("api", "running", &[("Team", "Core")]);
        assert!(hit(&web, "team=core"));
        assert!(hit(&web, "TEAM"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let web = instance("web", "stopped", &[]);
        assert!(hit(&web, "   "));
    }

    #[test]
    fn test_node_group_tokens_and_sizes() {
        let ng = NodeGroup {
            cluster: "prod-cluster".into(),
            name: "workers".into(),
            status: "ACTIVE".into(),
            version: "1.29".into(),
            instance_types: SmallVec::from_vec(vec!["m5.large".to_string()]),
            capacity: Capacity {
                desired: 12,
                min: 3,
                max: 40,
                current: 12,
            },
            launch_template: Some(LaunchTemplateRef {
                id: "lt-0abc".into(),
                name: "workers-lt".into(),
                version: "7".into(),
            }),
            created_at: None,
            tags: Tags::new(),
        };
        let index = ng.build_index();
        let check = |raw: &str| matches::<NodeGroup>(&index, &Query::parse(raw));

        assert!(check("cluster:prod status:active"));
        assert!(check("instancetype:m5"));
        assert!(check("ltid:lt-0abc ltversion:7"));
        assert!(check("launchtemplatename:workers-lt"));
        assert!(!check("cluster:staging"));
        assert!(check("40"));
        assert!(!check("99"));
    }

    #[test]
    fn test_scaling_group_free_text_only() {
        let asg = ScalingGroup {
            name: "web-asg".into(),
            capacity: Capacity {
                desired: 4,
                min: 1,
                max: 8,
                current: 2,
            },
            health_check_type: "ELB".into(),
            availability_zones: vec!["us-east-1a".into()],
            launch_template: None,
            launch_configuration: None,
            load_balancers: vec![],
            target_groups: vec![],
            tags: Tags::new(),
            created_at: None,
        };
        let index = asg.build_index();
        assert!(matches::<ScalingGroup>(&index, &Query::parse("scaling up")));
        assert!(matches::<ScalingGroup>(&index, &Query::parse("8")));
        // `name:` is not a recognized scaling group key.
        assert!(!matches::<ScalingGroup>(&index, &Query::parse("name:web")));
    }
}
