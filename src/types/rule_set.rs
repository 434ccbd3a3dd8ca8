//! Per-distributor include/exclude rules.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Handle of a rule set inside a [`Hierarchy`](crate::Hierarchy).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistributorId(pub(crate) usize);

impl DistributorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for DistributorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// The include/exclude region lists of one distributor.
///
/// `parent` is a non-owning link to another rule set of the same
/// hierarchy; several children may point at one parent. It is resolved
/// once, when the hierarchy is built, and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionRuleSet {
    pub(crate) distributor_name: String,
    pub(crate) include_regions: Vec<String>,
    pub(crate) exclude_regions: Vec<String>,
    pub(crate) parent: Option<DistributorId>,
}

impl PermissionRuleSet {
    pub fn distributor_name(&self) -> &str {
        &self.distributor_name
    }

    pub fn include_regions(&self) -> &[String] {
        &self.include_regions
    }

    pub fn exclude_regions(&self) -> &[String] {
        &self.exclude_regions
    }

    pub fn parent(&self) -> Option<DistributorId> {
        self.parent
    }
}

/// An already-parsed request to register a distributor, with its parent
/// given by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DistributorRequest {
    pub name: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl DistributorRequest {
    pub fn new<I, E, S, T>(name: impl Into<String>, include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = T>,
        T: Into<String>,
    {
        DistributorRequest {
            name: name.into(),
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
            parent: None,
        }
    }

    /// Delegate under `parent`.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
