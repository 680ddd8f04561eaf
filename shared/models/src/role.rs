//! Semantic column roles and the per-sheet mapping from role to header column.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// What a column means, independent of what the sheet calls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Ordinal,
    Date,
    Party,
    Reference,
    Description,
    Packing,
    Quantity,
    Rate,
    Amount,
}

impl FieldRole {
    pub const COUNT: usize = 9;

    /// All roles in positional-fallback order.
    pub const ALL: [FieldRole; Self::COUNT] = [
        Self::Ordinal,
        Self::Date,
        Self::Party,
        Self::Reference,
        Self::Description,
        Self::Packing,
        Self::Quantity,
        Self::Rate,
        Self::Amount,
    ];

    /// Column index this role falls back to when no header label matches.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinal => "ordinal",
            Self::Date => "date",
            Self::Party => "party",
            Self::Reference => "reference",
            Self::Description => "description",
            Self::Packing => "packing",
            Self::Quantity => "quantity",
            Self::Rate => "rate",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a role ended up bound to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingSource {
    /// A header label matched one of the role's patterns.
    Pattern,
    /// No label matched; the role took its fixed column position.
    Positional,
}

/// The header column chosen for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    /// Literal header label (or a synthetic one when the header cell was blank).
    pub label: String,
    /// Column index to read, `None` when the positional fallback lies past the header width.
    pub column: Option<usize>,
    pub source: BindingSource,
}

/// Exactly one binding per role, resolved once per sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRoleMap {
    bindings: [ColumnBinding; FieldRole::COUNT],
}

impl FieldRoleMap {
    /// Builds the map by asking `resolve` for each role in turn.
    pub fn from_fn(mut resolve: impl FnMut(FieldRole) -> ColumnBinding) -> Self {
        Self {
            bindings: std::array::from_fn(|i| resolve(FieldRole::ALL[i])),
        }
    }

    pub fn get(&self, role: FieldRole) -> &ColumnBinding {
        &self.bindings[role.position()]
    }

    pub fn label(&self, role: FieldRole) -> &str {
        &self.get(role).label
    }

    pub fn column(&self, role: FieldRole) -> Option<usize> {
        self.get(role).column
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldRole, &ColumnBinding)> {
        FieldRole::ALL.into_iter().zip(self.bindings.iter())
    }

    /// Role to label, for display.
    pub fn labels(&self) -> BTreeMap<FieldRole, String> {
        self.iter()
            .map(|(role, binding)| (role, binding.label.clone()))
            .collect()
    }

    /// Number of roles that had to fall back to their fixed position.
    pub fn positional_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.source == BindingSource::Positional)
            .count()
    }
}
