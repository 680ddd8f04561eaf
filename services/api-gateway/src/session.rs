//! In-memory workspace holding the most recent packing and leftover results.
//!
//! Each slot is replaced wholesale by the next upload; nothing is merged and
//! nothing is persisted.

use chrono::{DateTime, Utc};
use packtally_models::FlattenedSheet;
use packtally_utils::LeftoverReport;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub type SharedWorkspace = Arc<RwLock<Workspace>>;

/// A flattened packing sheet and where it came from.
#[derive(Debug, Clone)]
pub struct StoredSheet {
    pub upload_id: Uuid,
    pub source: String,
    pub sheet: Arc<FlattenedSheet>,
    pub stored_at: DateTime<Utc>,
}

impl StoredSheet {
    pub fn new(source: impl Into<String>, sheet: FlattenedSheet) -> Self {
        Self {
            upload_id: Uuid::new_v4(),
            source: source.into(),
            sheet: Arc::new(sheet),
            stored_at: Utc::now(),
        }
    }
}

/// A leftover report and the two sources it was computed from.
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub upload_id: Uuid,
    pub purchase_source: String,
    pub usage_source: String,
    pub report: Arc<LeftoverReport>,
    pub stored_at: DateTime<Utc>,
}

impl StoredReport {
    pub fn new(
        purchase_source: impl Into<String>,
        usage_source: impl Into<String>,
        report: LeftoverReport,
    ) -> Self {
        Self {
            upload_id: Uuid::new_v4(),
            purchase_source: purchase_source.into(),
            usage_source: usage_source.into(),
            report: Arc::new(report),
            stored_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Workspace {
    packing: Option<StoredSheet>,
    leftovers: Option<StoredReport>,
}

impl Workspace {
    pub fn shared() -> SharedWorkspace {
        Arc::new(RwLock::new(Self::default()))
    }

    pub fn packing(&self) -> Option<&StoredSheet> {
        self.packing.as_ref()
    }

    pub fn leftovers(&self) -> Option<&StoredReport> {
        self.leftovers.as_ref()
    }

    /// Stores a new packing result, returning the one it replaced.
    pub fn replace_packing(&mut self, stored: StoredSheet) -> Option<StoredSheet> {
        self.packing.replace(stored)
    }

    /// Stores a new leftover report, returning the one it replaced.
    pub fn replace_leftovers(&mut self, stored: StoredReport) -> Option<StoredReport> {
        self.leftovers.replace(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packtally_utils::SheetFlattener;
    use packtally_models::CellGrid;

    fn sheet(rows: Vec<Vec<&str>>) -> FlattenedSheet {
        SheetFlattener::default().flatten(&CellGrid::from_text_rows(rows))
    }

    #[test]
    fn test_replace_not_merge() {
        let mut workspace = Workspace::default();
        assert!(workspace.packing().is_none());

        let first = StoredSheet::new(
            "a.csv",
            sheet(vec![vec!["S.No", "Description", "Qty"], vec!["1", "Wheat", "5"]]),
        );
        assert!(workspace.replace_packing(first).is_none());

        let second = StoredSheet::new(
            "b.csv",
            sheet(vec![vec!["S.No", "Description", "Qty"], vec!["1", "Rice", "7"]]),
        );
        let previous = workspace.replace_packing(second).unwrap();

        assert_eq!(previous.source, "a.csv");
        let current = workspace.packing().unwrap();
        assert_eq!(current.source, "b.csv");
        assert_eq!(current.sheet.records.len(), 1);
        assert_eq!(current.sheet.records[0].description, "Rice");
    }
}
