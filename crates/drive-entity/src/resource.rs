//! Resource kind and share role enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of resources a share, star, or recent entry can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A file.
    File,
    /// A folder.
    Folder,
}

impl ResourceType {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = drive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            _ => Err(drive_core::AppError::validation(format!(
                "Invalid resource type: '{s}'. Expected one of: file, folder"
            ))),
        }
    }
}

/// Role granted by an explicit share.
///
/// Ordered by privilege: Editor > Viewer. The server re-checks the resolved
/// role on every mutation reachable from a shared context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShareRole {
    /// Read and download only.
    Viewer,
    /// Edit, rename, move, delete, and re-share.
    Editor,
}

impl ShareRole {
    /// Check whether this role permits mutations.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Editor)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for ShareRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShareRole {
    type Err = drive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            _ => Err(drive_core::AppError::validation(format!(
                "Invalid share role: '{s}'. Expected one of: viewer, editor"
            ))),
        }
    }
}
