// 📇 Branch Directory - ordered registry the searches run against
//
// Thin owner of the loaded dataset. Order is load order and never changes
// after construction; `find` leans on that for its first-match tie-break.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::branch::Branch;
use crate::dataset;
use crate::matcher::find_branch;

#[derive(Debug, Clone)]
pub struct BranchDirectory {
    branches: Vec<Branch>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl BranchDirectory {
    pub fn from_branches(branches: Vec<Branch>, source: &str) -> Self {
        BranchDirectory {
            branches,
            source: source.to_string(),
            loaded_at: Utc::now(),
        }
    }

    /// Directory backed by the built-in dataset.
    pub fn with_defaults() -> Self {
        BranchDirectory::from_branches(dataset::default_branches(), "built-in")
    }

    /// Load a directory from a `.json` or `.csv` dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let branches = dataset::load_dataset(path)?;
        Ok(BranchDirectory::from_branches(
            branches,
            &path.display().to_string(),
        ))
    }

    /// Run one search against the directory.
    ///
    /// Same contract as [`find_branch`]: either input may be blank, both
    /// blank never matches, first record in load order wins.
    pub fn find(&self, name_input: &str, id_input: &str) -> Option<&Branch> {
        find_branch(&self.branches, name_input, id_input)
    }

    /// Exact id lookup (case-insensitive), for callers that already hold a
    /// full branch id and don't want substring semantics.
    pub fn get(&self, id: &str) -> Option<&Branch> {
        let wanted = id.trim().to_uppercase();
        if wanted.is_empty() {
            return None;
        }
        self.branches
            .iter()
            .find(|branch| branch.id.to_uppercase() == wanted)
    }

    pub fn all(&self) -> &[Branch] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Branch count per area, most branches first (ties alphabetical).
    /// Records without an area fall under "Unassigned".
    pub fn area_summary(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for branch in &self.branches {
            let area = branch.area.as_deref().unwrap_or("Unassigned");
            match counts.iter_mut().find(|(name, _)| name == area) {
                Some((_, count)) => *count += 1,
                None => counts.push((area.to_string(), 1)),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_directory() -> BranchDirectory {
        let branches = vec![
            Branch::new("BR001", "Makati Ave", "Main Store"),
            Branch::new("BR002", "BGC High Street", "Annex"),
            Branch {
                area: Some("Visayas".to_string()),
                ..Branch::new("BR009", "Cebu IT Park", "Ayala Central Bloc")
            },
        ];
        BranchDirectory::from_branches(branches, "test")
    }

    #[test]
    fn test_find_delegates_to_matcher() {
        let directory = sample_directory();

        assert_eq!(directory.find("makati", "").unwrap().id, "BR001");
        assert_eq!(directory.find("", "br002").unwrap().id, "BR002");
        assert!(directory.find("", "").is_none());
        assert!(directory.find("davao", "").is_none());
    }

    #[test]
    fn test_get_is_exact_not_substring() {
        let directory = sample_directory();

        assert_eq!(directory.get("br001").unwrap().name, "Makati Ave");
        assert_eq!(directory.get("  BR002  ").unwrap().store_name, "Annex");

        // Fragments that satisfy `find` must not satisfy `get`
        assert!(directory.get("BR").is_none());
        assert!(directory.get("001").is_none());
        assert!(directory.get("").is_none());
    }

    #[test]
    fn test_with_defaults_loads_builtin_dataset() {
        let directory = BranchDirectory::with_defaults();

        assert_eq!(directory.source(), "built-in");
        assert!(!directory.is_empty());
        assert_eq!(directory.len(), directory.all().len());
        assert!(directory.get("BR001").is_some());
    }

    #[test]
    fn test_area_summary_counts_and_orders() {
        let branches = vec![
            Branch {
                area: Some("Metro Manila".to_string()),
                ..Branch::new("BR001", "Makati Ave", "Main Store")
            },
            Branch {
                area: Some("Metro Manila".to_string()),
                ..Branch::new("BR002", "BGC High Street", "Annex")
            },
            Branch {
                area: Some("Visayas".to_string()),
                ..Branch::new("BR009", "Cebu IT Park", "Ayala Central Bloc")
            },
            Branch::new("BR100", "Pop-up", "Pilot Cart"),
        ];
        let directory = BranchDirectory::from_branches(branches, "test");

        let summary = directory.area_summary();
        assert_eq!(summary[0], ("Metro Manila".to_string(), 2));
        // Tied at one branch each: alphabetical
        assert_eq!(summary[1], ("Unassigned".to_string(), 1));
        assert_eq!(summary[2], ("Visayas".to_string(), 1));
    }
}
