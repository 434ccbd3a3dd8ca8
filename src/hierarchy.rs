//! The delegation hierarchy: an arena of rule sets linked child → parent.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::TerritoryError;
use crate::types::{DistributorId, DistributorRequest, PermissionRuleSet};

/// All registered distributors, in registration order.
///
/// Rule sets refer to their parent by [`DistributorId`], so one parent can
/// be shared by any number of children.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    rule_sets: Vec<PermissionRuleSet>,
    index: HashMap<String, DistributorId>,
}

impl Hierarchy {
    pub fn builder() -> HierarchyBuilder {
        HierarchyBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }

    pub fn get(&self, id: DistributorId) -> Result<&PermissionRuleSet, TerritoryError> {
        self.rule_sets
            .get(id.0)
            .ok_or_else(|| TerritoryError::UnknownDistributor(id.to_string()))
    }

    pub fn id_of(&self, name: &str) -> Option<DistributorId> {
        self.index.get(name).copied()
    }

    /// Rule sets with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (DistributorId, &PermissionRuleSet)> {
        self.rule_sets
            .iter()
            .enumerate()
            .map(|(i, rs)| (DistributorId(i), rs))
    }

    /// The chain from `id` up to its root, starting with `id` itself.
    ///
    /// Fails with [`TerritoryError::CyclicHierarchy`] if the walk revisits a
    /// rule set.
    pub fn ancestors(&self, id: DistributorId) -> Result<Vec<DistributorId>, TerritoryError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);

        while let Some(next) = current {
            let rule_set = self.get(next)?;
            chain.push(next);
            if !seen.insert(next) {
                let names = chain
                    .iter()
                    .map(|link| self.rule_sets[link.0].distributor_name.clone())
                    .collect();
                let distributor = self.rule_sets[id.0].distributor_name.clone();
                warn!(
                    event = "Hierarchy",
                    phase = "Cycle",
                    distributor = distributor.as_str()
                );
                return Err(TerritoryError::CyclicHierarchy {
                    distributor,
                    chain: names,
                });
            }
            current = rule_set.parent;
        }

        Ok(chain)
    }

    /// Check every distributor's chain, returning the first cycle found.
    pub fn validate(&self) -> Result<(), TerritoryError> {
        for (id, _) in self.iter() {
            self.ancestors(id)?;
        }
        Ok(())
    }
}

/// Collects distributor requests and resolves parent names into links.
///
/// Parents may be added after their children; names are resolved in
/// [`HierarchyBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    requests: Vec<DistributorRequest>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, request: DistributorRequest) -> Self {
        self.requests.push(request);
        self
    }

    pub fn extend(mut self, requests: impl IntoIterator<Item = DistributorRequest>) -> Self {
        self.requests.extend(requests);
        self
    }

    /// Resolve parents and freeze the hierarchy.
    ///
    /// Cycles are accepted here and reported when a chain is walked.
    pub fn build(self) -> Result<Hierarchy, TerritoryError> {
        let mut index = HashMap::with_capacity(self.requests.len());
        for (i, request) in self.requests.iter().enumerate() {
            if index
                .insert(request.name.clone(), DistributorId(i))
                .is_some()
            {
                return Err(TerritoryError::DuplicateDistributor(request.name.clone()));
            }
        }

        let rule_sets = self
            .requests
            .into_iter()
            .map(|request| -> Result<PermissionRuleSet, TerritoryError> {
                let parent = match &request.parent {
                    Some(parent) => Some(index.get(parent).copied().ok_or_else(|| {
                        TerritoryError::UnknownParent {
                            distributor: request.name.clone(),
                            parent: parent.clone(),
                        }
                    })?),
                    None => None,
                };
                debug!(
                    event = "Hierarchy",
                    phase = "Register",
                    distributor = request.name.as_str(),
                    parent = ?request.parent
                );
                Ok(PermissionRuleSet {
                    distributor_name: request.name,
                    include_regions: request.include,
                    exclude_regions: request.exclude,
                    parent,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Hierarchy { rule_sets, index })
    }
}
