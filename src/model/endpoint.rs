//! Endpoint model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a service is exposed across the cluster set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    ClusterSetIp,
    Headless,
}

/// A named port with its protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub port: u16,
    pub target_port: String,
    pub protocol: String,
}

/// A single network endpoint registered for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub ip: String,
    pub endpoint_port: Port,
    pub service_port: Port,
    pub cluster_id: String,
    pub cluster_set_id: String,
    pub service_type: ServiceType,
    /// Milliseconds since the Unix epoch at which the service was exported
    pub service_export_creation_timestamp: i64,
    pub ready: bool,
    pub hostname: Option<String>,
    pub nodename: Option<String>,
    /// Registry attributes that don't map to a typed field
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Endpoint {
    /// Create a ready endpoint with default ports and no attributes.
    pub fn new(id: impl Into<String>, ip: impl Into<String>, port: u16) -> Self {
        let endpoint_port = Port {
            port,
            ..Default::default()
        };

        Self {
            id: id.into(),
            ip: ip.into(),
            service_port: endpoint_port.clone(),
            endpoint_port,
            cluster_id: String::new(),
            cluster_set_id: String::new(),
            service_type: ServiceType::default(),
            service_export_creation_timestamp: 0,
            ready: true,
            hostname: None,
            nodename: None,
            attributes: HashMap::new(),
        }
    }

    /// Builder: set the owning cluster and cluster set.
    #[must_use]
    pub fn in_cluster(mut self, cluster_id: impl Into<String>, cluster_set_id: impl Into<String>) -> Self {
        self.cluster_id = cluster_id.into();
        self.cluster_set_id = cluster_set_id.into();
        self
    }

    /// `ip:port` address for this endpoint.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.endpoint_port.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_endpoint_defaults() {
        let endpoint = Endpoint::new("ep-1", "10.1.2.3", 8080).in_cluster("cluster-a", "clusterset-1");

        assert_eq!(endpoint.address(), "10.1.2.3:8080");
        assert_eq!(endpoint.service_port.port, 8080);
        assert_eq!(endpoint.cluster_id, "cluster-a");
        assert!(endpoint.ready);
    }

    #[test]
    fn test_attributes_default_when_absent() {
        let mut value = serde_json::to_value(Endpoint::new("ep-1", "10.1.2.3", 80)).unwrap();
        value.as_object_mut().unwrap().remove("attributes");

        let endpoint: Endpoint = serde_json::from_value(value).unwrap();

        assert!(endpoint.attributes.is_empty());
    }
}
