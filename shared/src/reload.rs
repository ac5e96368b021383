use serde::{Deserialize, Serialize};

use crate::resource::EntityId;

/// A successful write against one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Created,
    Updated(EntityId),
    Deleted(EntityId),
    StatusChanged(EntityId),
    /// Bulk status change issued by the operator, e.g. mark-expired
    Bulk,
}

/// What a view does with its data after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reload {
    /// Refetch every collection the view loads
    Full,
    None,
}

/// Decides how a view refreshes after one of its mutations succeeds.
pub trait ReloadPolicy {
    fn after(&self, collection: &str, mutation: &Mutation) -> Reload;
}

/// Refetch everything after any mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullReload;

impl ReloadPolicy for FullReload {
    fn after(&self, _collection: &str, _mutation: &Mutation) -> Reload {
        Reload::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reload_after_every_mutation() {
        let policy = FullReload;
        for mutation in [
            Mutation::Created,
            Mutation::Updated(1),
            Mutation::Deleted(2),
            Mutation::StatusChanged(3),
            Mutation::Bulk,
        ] {
            assert_eq!(policy.after("donors", &mutation), Reload::Full);
        }
    }
}
