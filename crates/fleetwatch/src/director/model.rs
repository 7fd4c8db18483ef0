//! Model — wire shapes reported by the deployment directory.

use serde::Deserialize;

/// One deployment as reported by `GET /deployments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    pub name: String,
    #[serde(default)]
    pub releases: Vec<ReleaseRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRef {
    pub name: String,
}

/// One running instance as reported by the deployment's vm-state listing.
///
/// Ephemeral: fetched fresh on every session start, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceRecord {
    pub job_name: String,
    /// Zero-based replica ordinal within the component.
    pub index: u32,
    /// Ordered network addresses; the first one is used.
    #[serde(default)]
    pub ips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_deployment_listing() {
        let body = r#"[{"name":"some-deployment","releases":[{"name":"cf-release"}]}]"#;
        let deployments: Vec<Deployment> = serde_json::from_str(body).unwrap();

        assert_eq!(deployments.len(), 1);
        assert_eq!(deployments[0].name, "some-deployment");
        assert_eq!(deployments[0].releases[0].name, "cf-release");
    }

    #[test]
    fn deserializes_instance_inventory() {
        let body = r#"[
            {"ips":["1.2.3.4"],"job_name":"api_z1","index":0},
            {"ips":["1.2.3.5","1.2.3.6"],"job_name":"runner_z1","index":1}
        ]"#;
        let instances: Vec<InstanceRecord> = serde_json::from_str(body).unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].job_name, "api_z1");
        assert_eq!(instances[0].index, 0);
        assert_eq!(instances[1].ips, vec!["1.2.3.5", "1.2.3.6"]);
    }

    #[test]
    fn instance_without_ips_field_defaults_to_empty() {
        let body = r#"{"job_name":"api_z1","index":0}"#;
        let instance: InstanceRecord = serde_json::from_str(body).unwrap();
        assert!(instance.ips.is_empty());
    }

    #[test]
    fn instance_ignores_extra_wire_fields() {
        let body = r#"{"job_name":"api_z1","index":0,"ips":["1.2.3.4"],"agent_id":"abc","cid":"vm-1"}"#;
        let instance: InstanceRecord = serde_json::from_str(body).unwrap();
        assert_eq!(instance.job_name, "api_z1");
    }
}
