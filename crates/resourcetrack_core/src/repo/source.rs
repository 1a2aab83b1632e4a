//! Dataset shape, loading errors and the JSON-backed data source.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::budget::ExpenseItem;
use crate::model::member::{Assignment, TeamMember};
use crate::model::project::{Milestone, Project};
use crate::model::report::WeeklyUpdate;
use crate::model::risk::{ResourceWarning, Risk};
use crate::model::ModelValidationError;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised while loading or indexing a dataset.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: std::io::Error },
    Decode(serde_json::Error),
    Validation(ModelValidationError),
    DuplicateId { entity: &'static str, id: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read dataset `{}`: {source}", path.display())
            }
            Self::Decode(err) => write!(f, "invalid dataset json: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId { entity, id } => write!(f, "duplicate {entity} id `{id}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// The eight entity collections a dashboard is built from.
///
/// Collections keep their supplied order; that order is the insertion order
/// every child lookup preserves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub team_members: Vec<TeamMember>,
    pub assignments: Vec<Assignment>,
    pub projects: Vec<Project>,
    pub milestones: Vec<Milestone>,
    pub expenses: Vec<ExpenseItem>,
    pub risks: Vec<Risk>,
    pub resource_warnings: Vec<ResourceWarning>,
    pub weekly_updates: Vec<WeeklyUpdate>,
}

impl Dataset {
    /// Total entity count across all collections.
    pub fn len(&self) -> usize {
        self.team_members.len()
            + self.assignments.len()
            + self.projects.len()
            + self.milestones.len()
            + self.expenses.len()
            + self.risks.len()
            + self.resource_warnings.len()
            + self.weekly_updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Supplies the initial dataset to a store.
///
/// Implementations may read static data, files or a remote backend; store
/// consumers never see which one is in use.
pub trait DataSource {
    /// Short backend name used in log events.
    fn name(&self) -> &str;

    fn load(&self) -> RepoResult<Dataset>;
}

enum JsonOrigin {
    Inline(String),
    File(PathBuf),
}

/// Data source reading a JSON snapshot in the dashboard wire shape.
pub struct JsonDataSource {
    origin: JsonOrigin,
}

impl JsonDataSource {
    /// Reads the snapshot from an in-memory JSON document.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            origin: JsonOrigin::Inline(json.into()),
        }
    }

    /// Reads the snapshot from a file on every `load` call.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            origin: JsonOrigin::File(path.as_ref().to_path_buf()),
        }
    }
}

impl DataSource for JsonDataSource {
    fn name(&self) -> &str {
        match self.origin {
            JsonOrigin::Inline(_) => "json_inline",
            JsonOrigin::File(_) => "json_file",
        }
    }

    fn load(&self) -> RepoResult<Dataset> {
        match &self.origin {
            JsonOrigin::Inline(json) => Ok(serde_json::from_str(json)?),
            JsonOrigin::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| RepoError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(serde_json::from_str(&content)?)
            }
        }
    }
}
