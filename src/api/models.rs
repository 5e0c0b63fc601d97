use serde::{Deserialize, Serialize};

/// One file entry from the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub created_time: String,
}

/// Result of a single-page listing.
#[derive(Debug, Default)]
pub struct FileListing {
    pub files: Vec<DriveFile>,
    /// True when the service reported another page; we never fetch it.
    pub truncated: bool,
}

/// Grant target for a permission: a whole domain or a single user, mutually
/// exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionTarget {
    Domain(String),
    User(String),
}

impl PermissionTarget {
    /// Builds a target from the CLI's `--domain`/`--user` options. Exactly
    /// one must be set; this is checked before any remote call.
    pub fn from_options(domain: Option<String>, user: Option<String>) -> anyhow::Result<Self> {
        match (domain, user) {
            (Some(domain), None) => Ok(PermissionTarget::Domain(domain)),
            (None, Some(user)) => Ok(PermissionTarget::User(user)),
            (Some(_), Some(_)) => anyhow::bail!("Use either --domain or --user, not both"),
            (None, None) => anyhow::bail!("One of --domain or --user is required"),
        }
    }
}

/// Wire body for a permission-create request.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PermissionRequest {
    Domain {
        role: String,
        domain: String,
    },
    User {
        role: String,
        #[serde(rename = "emailAddress")]
        email_address: String,
    },
}

impl PermissionRequest {
    pub fn new(role: &str, target: &PermissionTarget) -> Self {
        match target {
            PermissionTarget::Domain(domain) => PermissionRequest::Domain {
                role: role.to_string(),
                domain: domain.clone(),
            },
            PermissionTarget::User(user) => PermissionRequest::User {
                role: role.to_string(),
                email_address: user.clone(),
            },
        }
    }
}
