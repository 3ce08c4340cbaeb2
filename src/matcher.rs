// 🔎 Record matcher - the core lookup predicate
//
// Pure function over the loaded dataset: normalize the two free-text inputs
// once, scan in dataset order, first hit wins. No ranking, no multi-result
// set, no error path - "not matched" is a valid outcome, not a failure.

use crate::branch::Branch;

/// Normalized pair of search inputs.
///
/// The name fragment is trimmed and lower-cased, the id fragment trimmed and
/// upper-cased, so a scan never re-normalizes the query per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    name: String,
    id: String,
}

impl SearchQuery {
    pub fn new(name_input: &str, id_input: &str) -> Self {
        SearchQuery {
            name: name_input.trim().to_lowercase(),
            id: id_input.trim().to_uppercase(),
        }
    }

    /// Both fragments blank: callers get "no match" without a scan.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.id.is_empty()
    }

    pub fn name_fragment(&self) -> &str {
        &self.name
    }

    pub fn id_fragment(&self) -> &str {
        &self.id
    }

    /// A record matches when ANY non-empty fragment hits its fields: the name
    /// fragment against display name / store name / keywords, the id fragment
    /// against the branch code. The two arms are independent.
    pub fn matches(&self, branch: &Branch) -> bool {
        (!self.name.is_empty() && branch.name_contains(&self.name))
            || (!self.id.is_empty() && branch.id_contains(&self.id))
    }
}

/// Find the single branch for a pair of free-text inputs.
///
/// Scans `branches` in dataset order and returns the FIRST match - dataset
/// order is the tie-break, not relevance. Returns `None` when nothing
/// matches, including the valid case where both inputs are blank.
pub fn find_branch<'a>(
    branches: &'a [Branch],
    name_input: &str,
    id_input: &str,
) -> Option<&'a Branch> {
    let query = SearchQuery::new(name_input, id_input);
    if query.is_empty() {
        return None;
    }

    branches.iter().find(|branch| query.matches(branch))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-record dataset shared by most cases below.
    fn sample_dataset() -> Vec<Branch> {
        let mut makati = Branch::new("BR001", "Makati Ave", "Main Store");
        makati.add_keyword("Makati");

        let mut bgc = Branch::new("BR002", "BGC High Street", "Annex");
        bgc.add_keyword("BGC");

        vec![makati, bgc]
    }

    #[test]
    fn test_query_normalization() {
        let query = SearchQuery::new("  Makati Ave  ", "  br001 ");

        assert_eq!(query.name_fragment(), "makati ave");
        assert_eq!(query.id_fragment(), "BR001");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_empty_queries_never_match() {
        let branches = sample_dataset();

        assert!(find_branch(&branches, "", "").is_none());
        assert!(find_branch(&branches, "   ", "").is_none());
        assert!(find_branch(&branches, "", "   ").is_none());
        assert!(find_branch(&branches, "  ", "  ").is_none());

        // Regardless of dataset contents, including an empty dataset
        assert!(find_branch(&[], "", "").is_none());
    }

    #[test]
    fn test_exact_name_is_reflexive() {
        let branches = sample_dataset();

        for branch in &branches {
            let found = find_branch(&branches, &branch.name, "")
                .expect("exact name should always find a record");
            // First match in scan order also satisfies the predicate,
            // so at minimum the found record contains the queried name
            assert!(found.name_contains(&branch.name.to_lowercase()));
        }

        let found = find_branch(&branches, "BGC High Street", "").unwrap();
        assert_eq!(found.id, "BR002");
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let branches = sample_dataset();

        let lower = find_branch(&branches, "makati ave", "").unwrap();
        let upper = find_branch(&branches, "MAKATI AVE", "").unwrap();
        let mixed = find_branch(&branches, "Makati Ave", "").unwrap();

        assert_eq!(lower.id, "BR001");
        assert_eq!(upper.id, lower.id);
        assert_eq!(mixed.id, lower.id);
    }

    #[test]
    fn test_substring_of_name_suffices() {
        let branches = sample_dataset();

        let found = find_branch(&branches, "high str", "").unwrap();
        assert_eq!(found.id, "BR002");

        let found = find_branch(&branches, "kati", "").unwrap();
        assert_eq!(found.id, "BR001");
    }

    #[test]
    fn test_store_name_is_a_candidate_field() {
        let branches = sample_dataset();

        let found = find_branch(&branches, "annex", "").unwrap();
        assert_eq!(found.id, "BR002");

        let found = find_branch(&branches, "main store", "").unwrap();
        assert_eq!(found.id, "BR001");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let mut dona_soledad = Branch::new("BR003", "Doña Soledad", "SM Bicutan Satellite");
        dona_soledad.add_keyword("Bicutan");
        let branches = vec![Branch::new("BR001", "Makati Ave", "Main Store"), dona_soledad];

        let found = find_branch(&branches, "bicutan", "").unwrap();
        assert_eq!(found.id, "BR003");

        let found = find_branch(&branches, "BICUTAN", "").unwrap();
        assert_eq!(found.id, "BR003");
    }

    #[test]
    fn test_id_match_is_independent_of_name() {
        let branches = sample_dataset();

        for branch in &branches {
            let found = find_branch(&branches, "", &branch.id).unwrap();
            assert_eq!(found.id, branch.id);
        }

        // Case-insensitive and substring on the identifier as well
        assert_eq!(find_branch(&branches, "", "br002").unwrap().id, "BR002");
        assert_eq!(find_branch(&branches, "", "002").unwrap().id, "BR002");
        // A bare prefix hits the first record carrying it
        assert_eq!(find_branch(&branches, "", "BR").unwrap().id, "BR001");
    }

    #[test]
    fn test_either_arm_can_match() {
        let branches = sample_dataset();

        // Name misses, id hits
        let found = find_branch(&branches, "zzz-nonexistent-zzz", "BR002").unwrap();
        assert_eq!(found.id, "BR002");

        // Name hits, id misses
        let found = find_branch(&branches, "annex", "XX999").unwrap();
        assert_eq!(found.id, "BR002");
    }

    #[test]
    fn test_first_match_in_dataset_order_wins() {
        let branches = vec![
            Branch::new("BR010", "Grand Store North", "North Wing"),
            Branch::new("BR011", "Grand Store South", "South Wing"),
        ];

        let found = find_branch(&branches, "store", "").unwrap();
        assert_eq!(
            found.id, "BR010",
            "tie-break must be dataset order, not relevance"
        );

        // Same for the id arm
        let found = find_branch(&branches, "", "BR01").unwrap();
        assert_eq!(found.id, "BR010");
    }

    #[test]
    fn test_no_match_for_absent_strings() {
        let branches = sample_dataset();

        assert!(find_branch(&branches, "zzz-nonexistent-zzz", "").is_none());
        assert!(find_branch(&branches, "", "ZZZ999").is_none());
        assert!(find_branch(&branches, "cebu", "").is_none());
    }

    #[test]
    fn test_lookups_end_to_end() {
        let branches = sample_dataset();

        assert_eq!(find_branch(&branches, "makati", "").unwrap().id, "BR001");
        assert_eq!(find_branch(&branches, "", "br002").unwrap().id, "BR002");
        assert!(find_branch(&branches, "cebu", "").is_none());
    }
}
