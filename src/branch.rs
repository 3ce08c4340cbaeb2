// 🏬 Branch Record - the one entity in the directory
//
// A branch is an immutable value read from the static dataset: contact
// details, the internet line, and the CCTV setup for one physical store
// location. Records are loaded once and never mutated at runtime.
//
// Matching runs only against `name`, `store_name` and `keywords` (plus the
// independent id predicate); everything else is display-only.

use serde::{Deserialize, Serialize};

// ============================================================================
// NETWORK SECTION
// ============================================================================

/// Internet line details for a branch. Display-only: never matched against.
///
/// The whole section is optional on a record; within the section every field
/// is optional too, since installs are documented to varying degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_installed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

impl NetworkInfo {
    /// True when no field carries a value (section treated as absent).
    pub fn is_empty(&self) -> bool {
        self.isp.is_none()
            && self.date_installed.is_none()
            && self.connection_type.is_none()
            && self.account_number.is_none()
            && self.service_id.is_none()
            && self.bandwidth.is_none()
            && self.plan.is_none()
    }
}

// ============================================================================
// SECURITY SECTION
// ============================================================================

/// CCTV / security details for a branch. Display-only: never matched against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    /// Recorder model, e.g. "Hikvision DS-7208HQHI" or "Dahua NVR2104"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dvr_nvr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_cameras: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// Recorder admin password. Rendered masked by default in every front end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

impl SecurityInfo {
    /// True when no field carries a value (section treated as absent).
    pub fn is_empty(&self) -> bool {
        self.dvr_nvr.is_none()
            && self.serial_number.is_none()
            && self.number_of_cameras.is_none()
            && self.recording_days.is_none()
            && self.ip_address.is_none()
            && self.admin_password.is_none()
    }
}

// ============================================================================
// BRANCH RECORD
// ============================================================================

/// One entry in the static branch directory.
///
/// `id`, `name` and `store_name` are always present; everything else is
/// optional. Serialized as camelCase JSON, the shape the dataset file uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Branch identifier / code, e.g. "BR001". Unique within the dataset
    /// (assumed by callers, checked by the quality scan, never generated).
    pub id: String,

    /// Branch display name, e.g. "Makati Ave"
    pub name: String,

    /// Store name at that site, e.g. "Main Store", "Annex"
    pub store_name: String,

    /// Additional search aliases, e.g. district names ("Bicutan")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_desk_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityInfo>,
}

impl Branch {
    /// Create a branch with the required fields; everything else absent.
    pub fn new(id: &str, name: &str, store_name: &str) -> Self {
        Branch {
            id: id.to_string(),
            name: name.to_string(),
            store_name: store_name.to_string(),
            ..Branch::default()
        }
    }

    /// Add a search alias, skipping duplicates.
    pub fn add_keyword(&mut self, keyword: &str) {
        if !self.keywords.iter().any(|k| k == keyword) {
            self.keywords.push(keyword.to_string());
        }
    }

    /// Case-insensitive containment over display name, store name and the
    /// keyword aliases.
    ///
    /// `fragment` must already be trimmed and lower-cased - `SearchQuery`
    /// normalizes the raw input once per lookup. An empty fragment matches
    /// everything; the query layer guards against that.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(fragment)
            || self.store_name.to_lowercase().contains(fragment)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(fragment))
    }

    /// Containment over the branch code. `fragment` must already be trimmed
    /// and upper-cased.
    pub fn id_contains(&self, fragment: &str) -> bool {
        self.id.to_uppercase().contains(fragment)
    }

    /// Network section present with at least one value.
    pub fn has_network(&self) -> bool {
        self.network.as_ref().is_some_and(|n| !n.is_empty())
    }

    /// Security section present with at least one value.
    pub fn has_security(&self) -> bool {
        self.security.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Any contact detail on file (phone, address, AnyDesk or email).
    pub fn has_contact(&self) -> bool {
        self.phone.is_some()
            || self.address.is_some()
            || self.any_desk_id.is_some()
            || self.email.is_some()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_branch() -> Branch {
        let mut branch = Branch::new("BR001", "Makati Ave", "Main Store");
        branch.add_keyword("Makati");
        branch.add_keyword("Ayala");
        branch
    }

    #[test]
    fn test_branch_creation() {
        let branch = Branch::new("BR001", "Makati Ave", "Main Store");

        assert_eq!(branch.id, "BR001");
        assert_eq!(branch.name, "Makati Ave");
        assert_eq!(branch.store_name, "Main Store");
        assert!(branch.keywords.is_empty());
        assert!(branch.area.is_none());
        assert!(branch.network.is_none());
        assert!(branch.security.is_none());
    }

    #[test]
    fn test_add_keyword_skips_duplicates() {
        let mut branch = Branch::new("BR001", "Makati Ave", "Main Store");

        branch.add_keyword("Makati");
        branch.add_keyword("Ayala");
        branch.add_keyword("Makati"); // Duplicate - should not add

        assert_eq!(branch.keywords.len(), 2);
        assert!(branch.keywords.contains(&"Makati".to_string()));
        assert!(branch.keywords.contains(&"Ayala".to_string()));
    }

    #[test]
    fn test_name_contains_checks_all_candidate_fields() {
        let branch = sample_branch();

        // Display name
        assert!(branch.name_contains("makati ave"));
        assert!(branch.name_contains("kati"));

        // Store name
        assert!(branch.name_contains("main store"));
        assert!(branch.name_contains("main"));

        // Keywords
        assert!(branch.name_contains("ayala"));

        // Absent everywhere
        assert!(!branch.name_contains("cebu"));
    }

    #[test]
    fn test_name_contains_is_case_insensitive_on_record_side() {
        let mut branch = Branch::new("BR009", "CEBU IT PARK", "Ayala Central Bloc");
        branch.add_keyword("IT Park");

        // Fragment arrives lower-cased; record fields may be any case
        assert!(branch.name_contains("cebu"));
        assert!(branch.name_contains("it park"));
        assert!(branch.name_contains("central bloc"));
    }

    #[test]
    fn test_id_contains_substring() {
        let branch = sample_branch();

        assert!(branch.id_contains("BR001"));
        assert!(branch.id_contains("001"));
        assert!(branch.id_contains("BR"));
        assert!(!branch.id_contains("BR002"));
    }

    #[test]
    fn test_section_emptiness() {
        let mut branch = sample_branch();
        assert!(!branch.has_network());
        assert!(!branch.has_security());
        assert!(!branch.has_contact());

        branch.network = Some(NetworkInfo::default());
        branch.security = Some(SecurityInfo::default());
        // Present but all-empty sections still count as absent
        assert!(!branch.has_network());
        assert!(!branch.has_security());

        branch.network = Some(NetworkInfo {
            isp: Some("PLDT Enterprise".to_string()),
            ..NetworkInfo::default()
        });
        branch.security = Some(SecurityInfo {
            number_of_cameras: Some(8),
            ..SecurityInfo::default()
        });
        branch.phone = Some("(02) 8812 4455".to_string());
        assert!(branch.has_network());
        assert!(branch.has_security());
        assert!(branch.has_contact());
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let branch = Branch {
            any_desk_id: Some("452 118 903".to_string()),
            security: Some(SecurityInfo {
                dvr_nvr: Some("Hikvision DS-7208HQHI".to_string()),
                number_of_cameras: Some(8),
                admin_password: Some("hik@2021".to_string()),
                ..SecurityInfo::default()
            }),
            ..sample_branch()
        };

        let json = serde_json::to_string(&branch).unwrap();
        assert!(json.contains("\"storeName\""), "got: {}", json);
        assert!(json.contains("\"anyDeskId\""), "got: {}", json);
        assert!(json.contains("\"dvrNvr\""), "got: {}", json);
        assert!(json.contains("\"numberOfCameras\""), "got: {}", json);
        // Absent optionals are skipped entirely
        assert!(!json.contains("\"network\""), "got: {}", json);

        let back: Branch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, branch);
    }
}
