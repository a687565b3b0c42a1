use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    #[default]
    Online,
    Offline,
    Maintenance,
}

/// A VSS processing node. At most one server carries `is_system_default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub name: String,
    pub ip_address_with_port: String,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub status: ServerStatus,
    #[serde(default)]
    pub is_system_default: bool,
}

impl Server {
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol.scheme(), self.ip_address_with_port)
    }
}
