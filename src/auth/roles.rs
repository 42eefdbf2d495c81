//! Role → landing route table.
//!
//! A user can hold several roles. The landing dashboard is the route of the
//! most important one, where importance is the table's priority number
//! (lower wins).

use serde::{Deserialize, Serialize};

/// Route used for empty role sets and for roles missing from the table.
pub const DEFAULT_ROUTE: &str = "/dashboard";

/// Priority given to roles missing from the table.
pub const UNKNOWN_PRIORITY: u32 = 999;

/// One row of the role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: String,
    pub route: String,
    pub priority: u32,
}

impl RoleEntry {
    pub fn new(role: impl Into<String>, route: impl Into<String>, priority: u32) -> Self {
        Self {
            role: role.into(),
            route: route.into(),
            priority,
        }
    }
}

/// Immutable, ordered role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTable {
    entries: Vec<RoleEntry>,
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::new(vec![
            RoleEntry::new("admin", "/admin/dashboard", 1),
            RoleEntry::new("gerencia", "/gerencia/dashboard", 2),
            RoleEntry::new("supervisor", "/supervisor/dashboard", 3),
            RoleEntry::new("tesoreria", "/tesoreria/dashboard", 4),
            RoleEntry::new("auditoria", "/auditoria/dashboard", 5),
            RoleEntry::new("extracciones", "/extracciones/dashboard", 6),
            RoleEntry::new("cajero", "/caja/dashboard", 7),
            RoleEntry::new("tecnico", "/tecnico/dashboard", 8),
        ])
    }
}

impl RoleTable {
    pub fn new(entries: Vec<RoleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    fn entry(&self, role: &str) -> Option<&RoleEntry> {
        self.entries.iter().find(|e| e.role == role)
    }

    pub fn priority(&self, role: &str) -> u32 {
        self.entry(role).map_or(UNKNOWN_PRIORITY, |e| e.priority)
    }

    pub fn route(&self, role: &str) -> Option<&str> {
        self.entry(role).map(|e| e.route.as_str())
    }

    /// Landing route for a user holding `roles`.
    ///
    /// Picks the role with the lowest priority number; among equal
    /// priorities the earlier role wins (same result as a stable sort).
    pub fn default_dashboard<S: AsRef<str>>(&self, roles: Option<&[S]>) -> &str {
        let top = roles
            .unwrap_or_default()
            .iter()
            .map(|role| role.as_ref())
            .min_by_key(|role| self.priority(role));

        top.and_then(|role| self.route(role))
            .unwrap_or(DEFAULT_ROUTE)
    }
}
