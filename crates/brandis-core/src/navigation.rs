// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation visibility.
//!
//! The menu is fixed at compile time. For a given role it is filtered to the
//! entries that role may use; the Dashboard entry has no fixed target and
//! resolves to the role's own dashboard.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::role::{Role, RoleSet};

// =============================================================================
// NavigationEntry
// =============================================================================

/// Where an entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget {
    /// A fixed path.
    Path(&'static str),
    /// The viewer's own dashboard.
    Dashboard,
}

/// A static menu entry.
#[derive(Debug, Clone, Copy)]
pub struct NavigationEntry {
    /// Link target.
    pub target: EntryTarget,
    /// Display label.
    pub label: &'static str,
    /// Icon identifier for the rendering layer.
    pub icon: &'static str,
    /// Roles that see this entry.
    pub permitted: RoleSet,
    /// Sub-entries, shown under an expandable parent.
    pub children: &'static [NavigationEntry],
}

impl NavigationEntry {
    const fn leaf(path: &'static str, label: &'static str, icon: &'static str, permitted: RoleSet) -> Self {
        Self {
            target: EntryTarget::Path(path),
            label,
            icon,
            permitted,
            children: &[],
        }
    }

    /// Returns the entry's path as seen by `role`.
    pub fn path_for(&self, role: Role) -> &'static str {
        match self.target {
            EntryTarget::Path(path) => path,
            EntryTarget::Dashboard => role.dashboard_path(),
        }
    }

    fn resolve(&self, role: Role) -> ResolvedEntry {
        ResolvedEntry {
            path: self.path_for(role),
            label: self.label,
            icon: self.icon,
            children: self
                .children
                .iter()
                .filter(|c| c.permitted.contains(role))
                .map(|c| c.resolve(role))
                .collect(),
        }
    }
}

const INVENTORY_ROLES: RoleSet = RoleSet::of(&[Role::Pimpinan, Role::Manajer]);

const INVENTORY_CHILDREN: &[NavigationEntry] = &[
    NavigationEntry::leaf("/inventory/stockManagement", "Stock Management", "boxes", INVENTORY_ROLES),
    NavigationEntry::leaf("/inventory/batchManagement", "Batch Management", "layers", INVENTORY_ROLES),
];

/// The dashboard menu, in display order.
pub const MENU: &[NavigationEntry] = &[
    NavigationEntry {
        target: EntryTarget::Dashboard,
        label: "Dashboard",
        icon: "layout-dashboard",
        permitted: RoleSet::ALL,
        children: &[],
    },
    NavigationEntry::leaf(
        "/userManagement",
        "User Management",
        "users",
        RoleSet::of(&[Role::Pimpinan]),
    ),
    NavigationEntry::leaf("/products", "Products", "package", RoleSet::ALL),
    NavigationEntry::leaf(
        "/outlets",
        "Outlets",
        "store",
        RoleSet::of(&[Role::Pimpinan, Role::Manajer, Role::Pemasaran]),
    ),
    NavigationEntry {
        target: EntryTarget::Path("/inventory"),
        label: "Inventory",
        icon: "warehouse",
        permitted: INVENTORY_ROLES,
        children: INVENTORY_CHILDREN,
    },
    NavigationEntry::leaf(
        "/financialReports",
        "Financial Reports",
        "file-text",
        RoleSet::of(&[Role::Pimpinan, Role::Bendahara]),
    ),
];

// =============================================================================
// ResolvedEntry
// =============================================================================

/// A menu entry as rendered for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    /// Link target.
    pub path: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Icon identifier.
    pub icon: &'static str,
    /// Visible sub-entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedEntry>,
}

// =============================================================================
// VisibleEntries
// =============================================================================

/// Lazy iterator over the entries one role can see.
///
/// Clones are independent cursors over the static menu, so a saved copy
/// replays the sequence from the point it was taken.
#[derive(Debug, Clone)]
pub struct VisibleEntries {
    role: Role,
    entries: std::slice::Iter<'static, NavigationEntry>,
}

impl Iterator for VisibleEntries {
    type Item = ResolvedEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let role = self.role;
        self.entries
            .by_ref()
            .find(|e| e.permitted.contains(role))
            .map(|e| e.resolve(role))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}

impl FusedIterator for VisibleEntries {}

/// Returns the menu entries visible to `role`, in display order.
pub fn visible_entries(role: Role) -> VisibleEntries {
    VisibleEntries {
        role,
        entries: MENU.iter(),
    }
}

// =============================================================================
// Tests
// =============================================================================
