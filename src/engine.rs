use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::TerritoryError;
use crate::hierarchy::Hierarchy;
use crate::matcher::{MatchMode, find_match};
use crate::types::{
    City, CityAttribute, Decision, DecisionReason, DistributorId, Evaluation, PermissionRuleSet,
};

/// The main evaluator handle. Cloneable and thread-safe.
///
/// Evaluation is a pure function of the hierarchy and the city: the same
/// pair always yields the same [`Decision`].
#[derive(Debug, Clone)]
pub struct PermissionEngine {
    hierarchy: Arc<Hierarchy>,
}

impl PermissionEngine {
    pub fn new(hierarchy: Hierarchy) -> Self {
        PermissionEngine {
            hierarchy: Arc::new(hierarchy),
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn evaluate(&self, id: DistributorId, city: &City) -> Result<Decision, TerritoryError> {
        Ok(self.explain(id, city)?.decision)
    }

    pub fn evaluate_named(&self, distributor: &str, city: &City) -> Result<Decision, TerritoryError> {
        let id = self
            .hierarchy
            .id_of(distributor)
            .ok_or_else(|| TerritoryError::UnknownDistributor(distributor.to_string()))?;
        self.evaluate(id, city)
    }

    /// Evaluate and report why.
    ///
    /// The ancestor chain is resolved root first. The first level whose own
    /// rules deny the city decides the outcome; a level that grants only
    /// clears the way for the level below it.
    pub fn explain(&self, id: DistributorId, city: &City) -> Result<Evaluation, TerritoryError> {
        let chain = self.hierarchy.ancestors(id)?;
        let distributor = self.hierarchy.get(id)?.distributor_name();

        debug!(
            event = "Evaluate",
            phase = "Chain",
            distributor = distributor,
            depth = chain.len(),
            city = city.code.as_str()
        );

        let mut last = None;
        for level in chain.iter().rev() {
            let rule_set = self.hierarchy.get(*level)?;
            let local = evaluate_level(rule_set, city);

            if local.decision.is_denied() {
                if *level == id {
                    return Ok(local);
                }
                debug!(
                    event = "Evaluate",
                    phase = "AncestorDenied",
                    ancestor = rule_set.distributor_name(),
                    city = city.code.as_str()
                );
                return Ok(Evaluation::denied(DecisionReason::AncestorDenied {
                    ancestor: rule_set.distributor_name().to_string(),
                    cause: Box::new(local.reason),
                }));
            }
            last = Some(local);
        }

        // `ancestors` always yields at least `id` itself.
        last.ok_or_else(|| {
            warn!(event = "Evaluate", phase = "EmptyChain", distributor = %id);
            TerritoryError::UnknownDistributor(id.to_string())
        })
    }
}

/// Evaluate one rule set on its own, ignoring its parent.
///
/// Exclusions are checked before inclusions; with neither matching the
/// city is denied.
pub fn evaluate_level(rule_set: &PermissionRuleSet, city: &City) -> Evaluation {
    if let Some(reason) = first_hit(rule_set.exclude_regions(), city, MatchMode::Exclusion) {
        debug!(
            event = "Evaluate",
            phase = "Excluded",
            distributor = rule_set.distributor_name(),
            city = %city
        );
        return Evaluation::denied(reason);
    }

    match first_hit(rule_set.include_regions(), city, MatchMode::Inclusion) {
        Some(reason) => Evaluation::granted(reason),
        None => Evaluation::denied(DecisionReason::NoIncludeMatch),
    }
}

fn first_hit(rules: &[String], city: &City, mode: MatchMode) -> Option<DecisionReason> {
    CityAttribute::ALL.into_iter().find_map(|attribute| {
        let token = city.attribute(attribute);
        find_match(rules, token, mode).map(|rule| {
            let token = token.to_string();
            let rule = rule.to_string();
            match mode {
                MatchMode::Exclusion => DecisionReason::Excluded {
                    attribute,
                    token,
                    rule,
                },
                MatchMode::Inclusion => DecisionReason::Included {
                    attribute,
                    token,
                    rule,
                },
            }
        })
    })
}

#[cfg(test)]
mod tests;
