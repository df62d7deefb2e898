// ── Device provisioning ──
//
// Creates PRTG devices for inventory entries that are not monitored yet.
// PRTG's creation endpoints return no object id, so both the group and the
// device are created fire-and-confirm: issue the call, then query for the
// object. A created-but-not-yet-visible object is a distinct outcome.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use prtg_api::{NewDevice, PrtgClient};

use crate::error::CoreError;
use crate::model::{Group, ObjectId};
use crate::resolver::Resolver;

/// Group that receives exported devices.
pub const IMPORT_GROUP_NAME: &str = "NetBox Import";

/// Root local probe. Parent of the import group, and the fallback target
/// when that group cannot be found or created.
pub const ROOT_GROUP_ID: ObjectId = 1;

/// How the import group was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupResolution {
    /// Already present.
    Existing(Group),
    /// Created now and confirmed by a follow-up query.
    Created(Group),
    /// Creation call accepted but the group is not visible yet.
    CreatedUnconfirmed,
}

impl GroupResolution {
    pub fn group(&self) -> Option<&Group> {
        match self {
            Self::Existing(g) | Self::Created(g) => Some(g),
            Self::CreatedUnconfirmed => None,
        }
    }
}

/// Successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// Device created and found again by name.
    Created {
        device_id: ObjectId,
        device_url: String,
        message: String,
    },
    /// PRTG accepted the call but the device is not visible yet. PRTG
    /// indexes new objects asynchronously, so this is still a success.
    CreatedUnconfirmed { message: String },
}

impl ExportOutcome {
    pub fn device_id(&self) -> Option<ObjectId> {
        match self {
            Self::Created { device_id, .. } => Some(*device_id),
            Self::CreatedUnconfirmed { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Created { message, .. } | Self::CreatedUnconfirmed { message } => message,
        }
    }
}

#[derive(Clone)]
pub struct Provisioner {
    client: Arc<PrtgClient>,
    resolver: Resolver,
}

impl Provisioner {
    pub fn new(client: Arc<PrtgClient>, resolver: Resolver) -> Self {
        Self { client, resolver }
    }

    /// Create `name` in PRTG with sensor auto-discovery, unless a device by
    /// that name already exists.
    pub async fn export_device(&self, name: &str, host: &str) -> Result<ExportOutcome, CoreError> {
        if let Some(existing) = self.resolver.find_device_by_name(name).await {
            let device_id = existing.device.id;
            return Err(CoreError::AlreadyExists {
                name: name.to_owned(),
                device_id,
                device_url: self.client.device_url(device_id),
            });
        }

        let group_id = self.target_group_id().await;

        let response = self
            .client
            .add_device(&NewDevice {
                name,
                host,
                group_id,
                auto_discover: true,
            })
            .await
            .map_err(|e| {
                if e.is_bad_request() {
                    CoreError::BadRequest {
                        name: name.to_owned(),
                    }
                } else {
                    CoreError::Transport(e)
                }
            })?;
        debug!(name, status = response.status, "device creation accepted");

        self.resolver.invalidate(name);
        match self.resolver.find_device_by_name(name).await {
            Some(created) => {
                let device_id = created.device.id;
                info!(name, host, device_id, group_id, "created PRTG device");
                Ok(ExportOutcome::Created {
                    device_id,
                    device_url: self.client.device_url(device_id),
                    message: format!("Device '{name}' created in PRTG"),
                })
            }
            None => {
                info!(name, host, group_id, "PRTG device created but not visible yet");
                Ok(ExportOutcome::CreatedUnconfirmed {
                    message: format!(
                        "Device '{name}' created in PRTG (may take a moment to appear)"
                    ),
                })
            }
        }
    }

    /// Find the group named exactly `name` (case-insensitive).
    pub async fn find_group(&self, name: &str) -> Result<Option<Group>, prtg_api::Error> {
        let wanted = name.to_lowercase();
        let groups = self.client.find_groups(name).await?;
        Ok(groups
            .into_iter()
            .find(|g| g.name.to_lowercase() == wanted)
            .map(Group::from))
    }

    /// Look up the import group, creating it under the root probe if absent.
    pub async fn ensure_group(&self) -> Result<GroupResolution, prtg_api::Error> {
        if let Some(group) = self.find_group(IMPORT_GROUP_NAME).await? {
            return Ok(GroupResolution::Existing(group));
        }

        self.client.add_group(IMPORT_GROUP_NAME, ROOT_GROUP_ID).await?;
        match self.find_group(IMPORT_GROUP_NAME).await? {
            Some(group) => {
                info!(group = %group.name, group_id = group.id, "created PRTG group");
                Ok(GroupResolution::Created(group))
            }
            None => Ok(GroupResolution::CreatedUnconfirmed),
        }
    }

    /// The import group's id, or [`ROOT_GROUP_ID`] when it is unavailable.
    async fn target_group_id(&self) -> ObjectId {
        match self.ensure_group().await {
            Ok(resolution) => {
                if let Some(group) = resolution.group() {
                    return group.id;
                }
                warn!(
                    group = IMPORT_GROUP_NAME,
                    "import group created but could not be found, using root probe"
                );
            }
            Err(e) => warn!(
                group = IMPORT_GROUP_NAME,
                error = %e,
                "could not find/create import group, using root probe"
            ),
        }
        ROOT_GROUP_ID
    }
}
