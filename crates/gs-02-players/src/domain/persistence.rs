//! # Player Persistence
//!
//! Record naming and the permission load chain.
//!
//! ## Load Chain
//!
//! A player's permission record is looked up under four names; the first
//! one found wins:
//!
//! | # | Name | Migrated |
//! |---|------|----------|
//! | 1 | `<guid><ext>` | no |
//! | 2 | `<guid><ext><legacy>` | yes |
//! | 3 | `<steam64><ext>` | yes |
//! | 4 | `<steam64><ext><legacy>` | yes |
//!
//! A migrated record is rewritten under name 1 by the next save and only
//! then deleted, see [`retire_legacy`].

use serde::{Deserialize, Serialize};
use shared_types::PlayerIdentity;

use crate::config::SessionConfig;
use crate::ports::PlayerStore;

/// Characters that cannot appear in a record file name.
pub const STRIPPED_CHARS: [char; 4] = ['\\', '/', '=', '+'];

/// Remove every character of `id` that is unsafe in a file name.
pub fn sanitize_id(id: &str) -> String {
    id.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

/// File name of the primary permission record for `id`.
pub fn permission_record_name(id: &str, config: &SessionConfig) -> String {
    format!("{}{}", sanitize_id(id), config.permission_extension)
}

/// Role membership saved alongside the permission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerRecord {
    pub guid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Which lookup satisfied a permission load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSource {
    Guid,
    GuidLegacy,
    Steam,
    SteamLegacy,
}

impl PermissionSource {
    /// Whether a record found under this source is deleted after loading.
    pub fn migrates(self) -> bool {
        !matches!(self, PermissionSource::Guid)
    }

    pub fn label(self) -> &'static str {
        match self {
            PermissionSource::Guid => "guid",
            PermissionSource::GuidLegacy => "guid_legacy",
            PermissionSource::Steam => "steam",
            PermissionSource::SteamLegacy => "steam_legacy",
        }
    }
}

/// The four candidate record names for `identity`, in lookup order.
///
/// Names that repeat an earlier candidate are dropped.
pub fn permission_sources(
    identity: &PlayerIdentity,
    config: &SessionConfig,
) -> Vec<(PermissionSource, String)> {
    let guid = permission_record_name(&identity.guid, config);
    let steam = permission_record_name(&identity.steam64_id, config);
    let candidates = [
        (PermissionSource::Guid, guid.clone()),
        (
            PermissionSource::GuidLegacy,
            format!("{}{}", guid, config.legacy_suffix),
        ),
        (PermissionSource::Steam, steam.clone()),
        (
            PermissionSource::SteamLegacy,
            format!("{}{}", steam, config.legacy_suffix),
        ),
    ];

    let mut sources: Vec<(PermissionSource, String)> = Vec::with_capacity(candidates.len());
    for (source, name) in candidates {
        if !sources.iter().any(|(_, seen)| *seen == name) {
            sources.push((source, name));
        }
    }
    sources
}

/// Permission entries read by [`load_permissions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPermissions {
    pub source: PermissionSource,
    /// Record name the entries were read from.
    pub name: String,
    pub entries: Vec<String>,
}

/// Walk the load chain for `identity`.
///
/// Missing or unreadable records are skipped. Nothing is deleted here; a
/// record found under a migrating source stays until [`retire_legacy`]
/// runs. Returns `None` if no source holds a record.
pub fn load_permissions(
    store: &dyn PlayerStore,
    identity: &PlayerIdentity,
    config: &SessionConfig,
) -> Option<LoadedPermissions> {
    for (source, name) in permission_sources(identity, config) {
        let entries = match store.read_permissions(&name) {
            Ok(Some(entries)) => entries,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(guid = %identity.guid, record = %name, error = %e, "Skipping unreadable permission record");
                gs_diagnostics::STORE_ERRORS
                    .with_label_values(&["read_permissions"])
                    .inc();
                continue;
            }
        };

        gs_diagnostics::PERMISSION_LOADS
            .with_label_values(&[source.label()])
            .inc();
        return Some(LoadedPermissions {
            source,
            name,
            entries,
        });
    }

    tracing::debug!(guid = %identity.guid, "No permission record found");
    gs_diagnostics::PERMISSION_LOADS
        .with_label_values(&["none"])
        .inc();
    None
}

/// Delete the legacy record `loaded` came from.
///
/// Call only once the entries are safely written under the primary name.
/// Does nothing for a non-migrating source. A failed delete is logged and
/// leaves the legacy record in place; the primary record shadows it.
pub fn retire_legacy(
    store: &dyn PlayerStore,
    identity: &PlayerIdentity,
    loaded: &LoadedPermissions,
) {
    if !loaded.source.migrates() {
        return;
    }
    match store.delete_permissions(&loaded.name) {
        Ok(_) => {
            tracing::info!(guid = %identity.guid, record = %loaded.name, source = loaded.source.label(), "Migrated legacy permission record")
        }
        Err(e) => {
            tracing::warn!(guid = %identity.guid, record = %loaded.name, error = %e, "Failed to delete legacy permission record");
            gs_diagnostics::STORE_ERRORS
                .with_label_values(&["delete_permissions"])
                .inc();
        }
    }
}
