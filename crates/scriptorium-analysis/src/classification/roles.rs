//! Closed role taxonomy over instruction class ids.

use std::fmt;

use scriptorium_core::errors::ClassificationError;
use scriptorium_core::types::collections::FxHashMap;
use scriptorium_core::types::ClassId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    CoreControl,
    EnergyOperator,
    FlowOperator,
    FrequentOperator,
    Auxiliary,
    Unknown,
}

impl Role {
    pub const ASSIGNABLE: [Role; 5] = [
        Role::CoreControl,
        Role::EnergyOperator,
        Role::FlowOperator,
        Role::FrequentOperator,
        Role::Auxiliary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CoreControl => "CORE_CONTROL",
            Self::EnergyOperator => "ENERGY_OPERATOR",
            Self::FlowOperator => "FLOW_OPERATOR",
            Self::FrequentOperator => "FREQUENT_OPERATOR",
            Self::Auxiliary => "AUXILIARY",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CORE_CONTROL: &[ClassId] = &[10, 11, 12, 17];
const ENERGY_OPERATOR: &[ClassId] = &[
    8, 31, 32, 33, 34, 35, 36, 37, 39, 41, 42, 43, 44, 45, 46, 47, 48, 49,
];
const FLOW_OPERATOR: &[ClassId] = &[7, 30, 38, 40];
const FREQUENT_OPERATOR: &[ClassId] = &[9, 13, 14, 23];
const AUXILIARY: &[ClassId] = &[
    1, 2, 3, 4, 5, 6, 15, 16, 18, 19, 20, 21, 22, 24, 25, 26, 27, 28, 29,
];

/// Five disjoint id-sets, one per assignable role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMap {
    roles: FxHashMap<ClassId, Role>,
}

impl RoleMap {
    /// Build from explicit id-sets. Fails if any id appears under two roles.
    pub fn new(
        sets: impl IntoIterator<Item = (Role, Vec<ClassId>)>,
    ) -> Result<Self, ClassificationError> {
        let mut roles: FxHashMap<ClassId, Role> = FxHashMap::default();
        for (role, ids) in sets {
            for id in ids {
                if let Some(existing) = roles.insert(id, role) {
                    if existing != role {
                        return Err(ClassificationError::OverlappingRoles {
                            class_id: id,
                            first: existing.name(),
                            second: role.name(),
                        });
                    }
                }
            }
        }
        Ok(Self { roles })
    }

    /// Total: ids outside every set are `Role::Unknown`.
    pub fn get_role(&self, class_id: ClassId) -> Role {
        self.roles.get(&class_id).copied().unwrap_or(Role::Unknown)
    }

    /// Class ids assigned to `role`, sorted.
    pub fn members(&self, role: Role) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self
            .roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for RoleMap {
    fn default() -> Self {
        let mut roles = FxHashMap::default();
        for (role, ids) in [
            (Role::CoreControl, CORE_CONTROL),
            (Role::EnergyOperator, ENERGY_OPERATOR),
            (Role::FlowOperator, FLOW_OPERATOR),
            (Role::FrequentOperator, FREQUENT_OPERATOR),
            (Role::Auxiliary, AUXILIARY),
        ] {
            for id in ids {
                roles.insert(*id, role);
            }
        }
        Self { roles }
    }
}
