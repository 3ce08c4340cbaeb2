// ✅ Directory Quality Checks - sanity scan over a loaded dataset
//
// The matcher trusts whatever the loaders hand it, so this is where a bad
// spreadsheet export gets caught: blank identity fields, duplicate ids,
// records nobody can reach once found. One pass, one report.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;

// ============================================================================
// ISSUES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Record is unusable or breaks a directory invariant
    Warning,  // Record is questionable, lookups may misbehave
    Info,     // Record works but is missing useful detail
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryIssue {
    pub severity: Severity,
    pub branch_id: String,
    pub field: String,
    pub issue: String,
    pub recommendation: String,
}

impl DirectoryIssue {
    fn new(
        severity: Severity,
        branch_id: &str,
        field: &str,
        issue: &str,
        recommendation: &str,
    ) -> Self {
        DirectoryIssue {
            severity,
            branch_id: branch_id.to_string(),
            field: field.to_string(),
            issue: issue.to_string(),
            recommendation: recommendation.to_string(),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryReport {
    pub total_branches: usize,
    pub clean_count: usize,
    pub issues: Vec<DirectoryIssue>,
}

impl DirectoryReport {
    pub fn summary(&self) -> String {
        format!(
            "{} branches: {} clean, {} issues ({} critical)",
            self.total_branches,
            self.clean_count,
            self.issues.len(),
            self.issues
                .iter()
                .filter(|i| i.severity == Severity::Critical)
                .count()
        )
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == Severity::Critical)
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Scan a dataset and report everything worth fixing.
pub fn check_directory(branches: &[Branch]) -> DirectoryReport {
    let mut issues = Vec::new();
    let mut dirty = vec![false; branches.len()];

    let mut seen_ids: Vec<String> = Vec::new();

    for (index, branch) in branches.iter().enumerate() {
        let before = issues.len();

        // Records with a blank id are labelled by position in the report
        let label = if branch.id.trim().is_empty() {
            format!("#{}", index + 1)
        } else {
            branch.id.trim().to_string()
        };

        // Rule 1: identity fields must not be blank
        if branch.id.trim().is_empty() {
            issues.push(DirectoryIssue::new(
                Severity::Critical,
                &label,
                "id",
                "Branch id is blank",
                "Assign a unique branch id (e.g. BR011)",
            ));
        }
        if branch.name.trim().is_empty() {
            issues.push(DirectoryIssue::new(
                Severity::Critical,
                &label,
                "name",
                "Branch name is blank",
                "Fill in the branch name column",
            ));
        }
        if branch.store_name.trim().is_empty() {
            issues.push(DirectoryIssue::new(
                Severity::Critical,
                &label,
                "store_name",
                "Store name is blank",
                "Fill in the store name column",
            ));
        }

        // Rule 2: ids must be unique, compared the way the id predicate
        // compares them
        let id_upper = branch.id.trim().to_uppercase();
        if !id_upper.is_empty() {
            if seen_ids.contains(&id_upper) {
                issues.push(DirectoryIssue::new(
                    Severity::Warning,
                    &label,
                    "id",
                    "Duplicate branch id; earlier record shadows this one",
                    "Give every branch its own id",
                ));
            } else {
                seen_ids.push(id_upper);
            }
        }

        // Rule 3: a found branch should be reachable somehow
        if !branch.has_contact() {
            issues.push(DirectoryIssue::new(
                Severity::Info,
                &label,
                "contact",
                "No phone, email, or AnyDesk id on file",
                "Add at least one contact channel",
            ));
        }

        // Rule 4: security section oddities
        if let Some(security) = &branch.security {
            if security.admin_password.is_some() && security.ip_address.is_none() {
                issues.push(DirectoryIssue::new(
                    Severity::Info,
                    &label,
                    "security",
                    "Admin password recorded but no recorder IP address",
                    "Add the DVR/NVR IP address",
                ));
            }
            if security.number_of_cameras == Some(0) {
                issues.push(DirectoryIssue::new(
                    Severity::Info,
                    &label,
                    "security",
                    "Camera count is zero",
                    "Remove the CCTV section or correct the count",
                ));
            }
        }

        dirty[index] = issues.len() > before;
    }

    let clean_count = dirty.iter().filter(|flagged| !**flagged).count();

    DirectoryReport {
        total_branches: branches.len(),
        clean_count,
        issues,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::SecurityInfo;
    use crate::dataset::default_branches;

    fn reachable_branch(id: &str) -> Branch {
        Branch {
            phone: Some("(02) 8812 4455".to_string()),
            ..Branch::new(id, "Makati Ave", "Main Store")
        }
    }

    #[test]
    fn test_builtin_dataset_has_no_critical_issues() {
        let report = check_directory(&default_branches());

        println!("Built-in: {}", report.summary());

        assert!(!report.has_critical_issues());
        assert!(!report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_blank_identity_fields_are_critical() {
        let branches = vec![Branch::new("BR001", "  ", "Main Store")];
        let report = check_directory(&branches);

        assert!(report.has_critical_issues());
        assert!(report.issues.iter().any(|i| i.field == "name"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_blank_id_labelled_by_position() {
        let branches = vec![
            reachable_branch("BR001"),
            Branch {
                phone: Some("(02) 8000 0000".to_string()),
                ..Branch::new("", "Cubao", "Araneta City Gateway")
            },
        ];
        let report = check_directory(&branches);

        let issue = report
            .issues
            .iter()
            .find(|i| i.field == "id")
            .expect("blank id must be reported");
        assert_eq!(issue.severity, Severity::Critical);
        assert_eq!(issue.branch_id, "#2");
    }

    #[test]
    fn test_duplicate_ids_flag_the_shadowed_record() {
        let branches = vec![reachable_branch("BR001"), reachable_branch("br001")];
        let report = check_directory(&branches);

        let duplicates: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();
        assert_eq!(duplicates.len(), 1, "only the later record is flagged");
        assert_eq!(duplicates[0].branch_id, "br001");
    }

    #[test]
    fn test_unreachable_branch_is_info() {
        let branches = vec![Branch::new("BR001", "Makati Ave", "Main Store")];
        let report = check_directory(&branches);

        assert!(!report.has_critical_issues());
        assert!(report
            .issues
            .iter()
            .any(|i| i.field == "contact" && i.severity == Severity::Info));
    }

    #[test]
    fn test_security_section_oddities() {
        let branches = vec![Branch {
            security: Some(SecurityInfo {
                admin_password: Some("admin12345".to_string()),
                number_of_cameras: Some(0),
                ..SecurityInfo::default()
            }),
            ..reachable_branch("BR007")
        }];
        let report = check_directory(&branches);

        let security_issues: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.field == "security")
            .collect();
        assert_eq!(security_issues.len(), 2);
        assert!(security_issues
            .iter()
            .all(|i| i.severity == Severity::Info));
    }

    #[test]
    fn test_report_counts() {
        let branches = vec![
            reachable_branch("BR001"),
            Branch::new("BR002", "BGC High Street", "Annex"), // no contact
        ];
        let report = check_directory(&branches);

        assert_eq!(report.total_branches, 2);
        assert_eq!(report.clean_count, 1);
        assert_eq!(report.issues.len(), 1);
        assert!(report.summary().contains("2 branches"));
    }
}
