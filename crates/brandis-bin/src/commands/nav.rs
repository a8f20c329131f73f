// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `nav` command.

use std::fmt::Write as _;

use brandis_config::BrandisConfig;
use brandis_core::{visible_entries, ResolvedEntry, Role};
use serde::Serialize;

use crate::cli::NavArgs;
use crate::commands::{emit, open_store};
use crate::error::{BinError, BinResult};

#[derive(Debug, Serialize)]
struct Menu {
    role: Option<Role>,
    entries: Vec<ResolvedEntry>,
}

/// Renders menu entries as an indented list.
pub fn render_menu(entries: &[ResolvedEntry]) -> String {
    fn walk(out: &mut String, entries: &[ResolvedEntry], depth: usize) {
        for entry in entries {
            let indent = "  ".repeat(depth);
            let _ = writeln!(
                out,
                "{indent}{:<width$} {}",
                entry.label,
                entry.path,
                width = 20usize.saturating_sub(indent.len())
            );
            walk(out, &entry.children, depth + 1);
        }
    }

    let mut out = String::new();
    walk(&mut out, entries, 0);
    out.trim_end().to_string()
}

/// Executes the `nav` command.
pub fn nav(config: &BrandisConfig, args: NavArgs) -> BinResult<()> {
    let role = match args.role {
        Some(name) => Some(
            name.parse::<Role>()
                .map_err(|e| BinError::argument(e.to_string()))?,
        ),
        None => open_store(config).current_role(),
    };

    let menu = Menu {
        role,
        entries: role
            .map(|r| visible_entries(r).collect())
            .unwrap_or_default(),
    };

    emit(args.format, &menu, |menu| match menu.role {
        Some(_) => render_menu(&menu.entries),
        None => "No role: nothing to show".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_menu_indents_children() {
        let entries: Vec<_> = visible_entries(Role::Manajer).collect();
        let text = render_menu(&entries);

        assert!(text.starts_with("Dashboard"));
        assert!(text.contains("/dashboard/manajer"));
        assert!(text.contains("\n  Stock Management"));
        assert!(!text.contains("User Management"));
    }

    #[test]
    fn test_render_bendahara() {
        let entries: Vec<_> = visible_entries(Role::Bendahara).collect();
        let text = render_menu(&entries);
        assert!(text.contains("/financialReports"));
        assert!(!text.contains("/outlets"));
        assert!(!text.contains("/inventory"));
    }
}
