// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Business roles and role sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownRole;

// =============================================================================
// Role
// =============================================================================

/// The closed set of business roles.
///
/// Role names are matched exactly as they appear in the credential's `role`
/// claim. There is no alias table and no case folding: any other value is
/// treated as "no role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Owner. Sees everything, including user management.
    Pimpinan,
    /// Operations manager. Inventory and outlets.
    Manajer,
    /// Marketing. Products and outlets.
    Pemasaran,
    /// Treasurer. Products and financial reports.
    Bendahara,
}

impl Role {
    /// Every role, in menu order.
    pub const ALL: [Role; 4] = [
        Role::Pimpinan,
        Role::Manajer,
        Role::Pemasaran,
        Role::Bendahara,
    ];

    /// Returns the claim value for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pimpinan => "Pimpinan",
            Role::Manajer => "Manajer",
            Role::Pemasaran => "Pemasaran",
            Role::Bendahara => "Bendahara",
        }
    }

    /// Parses a claim value. Returns `None` for anything outside the role set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pimpinan" => Some(Role::Pimpinan),
            "Manajer" => Some(Role::Manajer),
            "Pemasaran" => Some(Role::Pemasaran),
            "Bendahara" => Some(Role::Bendahara),
            _ => None,
        }
    }

    /// Returns the dashboard this role lands on.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Pimpinan => "/dashboard/pimpinan",
            Role::Manajer => "/dashboard/manajer",
            Role::Pemasaran => "/dashboard/pemasaran",
            Role::Bendahara => "/dashboard/bendahara",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Pimpinan => 1,
            Role::Manajer => 1 << 1,
            Role::Pemasaran => 1 << 2,
            Role::Bendahara => 1 << 3,
        }
    }
}

/// Maps each role to its dashboard path.
///
/// Total over the role set; the four targets are distinct.
pub fn dashboard_path_for(role: Role) -> &'static str {
    role.dashboard_path()
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// =============================================================================
// RoleSet
// =============================================================================

/// A set of roles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set.
    pub const EMPTY: RoleSet = RoleSet(0);

    /// Every role.
    pub const ALL: RoleSet = RoleSet::of(&Role::ALL);

    /// Builds a set from a slice of roles.
    pub const fn of(roles: &[Role]) -> RoleSet {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    /// Returns `true` if the set contains the role.
    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Adds a role.
    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    /// Returns `true` if the set has no roles.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the number of roles in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the members in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<Role>::deserialize(deserializer)?;
        Ok(roles.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_role_parse_is_exact() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("pimpinan"), None);
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse(" Manajer"), None);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Bendahara".parse::<Role>().unwrap(), Role::Bendahara);
        let err = "Kasir".parse::<Role>().unwrap_err();
        assert_eq!(err.0, "Kasir");
    }

    #[test]
    fn test_dashboard_paths_are_distinct() {
        let paths: HashSet<&str> = Role::ALL.iter().map(|r| dashboard_path_for(*r)).collect();
        assert_eq!(paths.len(), 4);
        assert_eq!(dashboard_path_for(Role::Pemasaran), "/dashboard/pemasaran");
    }

    #[test]
    fn test_role_set() {
        let set = RoleSet::of(&[Role::Pimpinan, Role::Bendahara]);
        assert!(set.contains(Role::Pimpinan));
        assert!(set.contains(Role::Bendahara));
        assert!(!set.contains(Role::Manajer));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Role::Pimpinan, Role::Bendahara]);

        assert!(RoleSet::EMPTY.is_empty());
        assert_eq!(RoleSet::ALL.len(), 4);
    }

    #[test]
    fn test_role_set_serde() {
        let set = RoleSet::of(&[Role::Manajer, Role::Pimpinan]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["Pimpinan","Manajer"]"#);

        let back: RoleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
