// 🗂️ Dataset loaders - JSON primary, CSV spreadsheet export, built-in defaults
//
// The directory lifecycle is "loaded once, read many": everything in this
// module runs before the first query, and the matcher never touches a file.
// The loaders are the external collaborator the matcher has no opinion on -
// they just have to produce an ordered `Vec<Branch>`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::branch::{Branch, NetworkInfo, SecurityInfo};

// ============================================================================
// JSON FORMAT
// ============================================================================

/// Parse a camelCase JSON array of branch records (the primary format).
pub fn parse_json(raw: &str) -> Result<Vec<Branch>> {
    serde_json::from_str(raw).context("Failed to parse branch dataset JSON")
}

pub fn load_json(path: &Path) -> Result<Vec<Branch>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read branch dataset {}", path.display()))?;
    parse_json(&raw)
}

// ============================================================================
// CSV FORMAT
// ============================================================================

/// Flat spreadsheet row, one per branch.
///
/// Empty cells mean "absent"; `Keywords` is a `;`-separated list. The
/// network/security sections materialize on the record only when at least
/// one of their cells is non-empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BranchRow {
    #[serde(rename = "Branch_ID")]
    pub id: String,

    #[serde(rename = "Branch_Name")]
    pub name: String,

    #[serde(rename = "Store_Name")]
    pub store_name: String,

    #[serde(rename = "Keywords", default)]
    pub keywords: String,

    #[serde(rename = "Area", default)]
    pub area: String,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "Address", default)]
    pub address: String,

    #[serde(rename = "AnyDesk_ID", default)]
    pub any_desk_id: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "ISP", default)]
    pub isp: String,

    #[serde(rename = "Date_Installed", default)]
    pub date_installed: String,

    #[serde(rename = "Connection_Type", default)]
    pub connection_type: String,

    #[serde(rename = "Account_Number", default)]
    pub account_number: String,

    #[serde(rename = "Service_ID", default)]
    pub service_id: String,

    #[serde(rename = "Bandwidth", default)]
    pub bandwidth: String,

    #[serde(rename = "Plan", default)]
    pub plan: String,

    #[serde(rename = "DVR_NVR", default)]
    pub dvr_nvr: String,

    #[serde(rename = "Serial_Number", default)]
    pub serial_number: String,

    #[serde(rename = "Cameras", default)]
    pub number_of_cameras: String,

    #[serde(rename = "Recording_Days", default)]
    pub recording_days: String,

    #[serde(rename = "IP_Address", default)]
    pub ip_address: String,

    #[serde(rename = "Admin_Password", default)]
    pub admin_password: String,
}

/// Empty or whitespace-only cell → absent field.
fn cell(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl BranchRow {
    /// Convert the flat row into a branch record.
    ///
    /// Unparseable camera/recording-day counts become absent rather than
    /// failing the load; a spreadsheet "n/a" is not worth rejecting a row
    /// the matcher only needs the name fields of.
    pub fn into_branch(self) -> Branch {
        let keywords: Vec<String> = self
            .keywords
            .split(';')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect();

        let network = NetworkInfo {
            isp: cell(self.isp),
            date_installed: cell(self.date_installed),
            connection_type: cell(self.connection_type),
            account_number: cell(self.account_number),
            service_id: cell(self.service_id),
            bandwidth: cell(self.bandwidth),
            plan: cell(self.plan),
        };

        let security = SecurityInfo {
            dvr_nvr: cell(self.dvr_nvr),
            serial_number: cell(self.serial_number),
            number_of_cameras: self.number_of_cameras.trim().parse().ok(),
            recording_days: self.recording_days.trim().parse().ok(),
            ip_address: cell(self.ip_address),
            admin_password: cell(self.admin_password),
        };

        Branch {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            store_name: self.store_name.trim().to_string(),
            keywords,
            area: cell(self.area),
            phone: cell(self.phone),
            address: cell(self.address),
            any_desk_id: cell(self.any_desk_id),
            email: cell(self.email),
            network: if network.is_empty() { None } else { Some(network) },
            security: if security.is_empty() { None } else { Some(security) },
        }
    }
}

/// Read branch records from CSV data (spreadsheet export).
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<Branch>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut branches = Vec::new();
    for result in rdr.deserialize() {
        let row: BranchRow = result.context("Failed to deserialize branch row")?;
        branches.push(row.into_branch());
    }

    Ok(branches)
}

pub fn load_csv(path: &Path) -> Result<Vec<Branch>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open branch dataset {}", path.display()))?;
    read_csv(file)
}

/// Load a dataset file, dispatching on its extension (`.json` / `.csv`).
pub fn load_dataset(path: &Path) -> Result<Vec<Branch>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => bail!(
            "Unsupported dataset format: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

// ============================================================================
// BUILT-IN DIRECTORY
// ============================================================================

/// Shorthand for present optional cells in the built-in records.
fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn kw(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

/// The directory compiled into the binary, used whenever no dataset file is
/// supplied. Scan order is the order below - the matcher's tie-break.
pub fn default_branches() -> Vec<Branch> {
    vec![
        // BR001 - flagship
        Branch {
            id: "BR001".to_string(),
            name: "Makati Ave".to_string(),
            store_name: "Main Store".to_string(),
            keywords: kw(&["Makati", "Ayala"]),
            area: s("Metro Manila"),
            phone: s("(02) 8812 4455"),
            address: s("G/F Cityland 8, 98 Makati Ave, Makati City"),
            any_desk_id: s("452 118 903"),
            email: s("makati@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("PLDT Enterprise"),
                date_installed: s("2021-03-15"),
                connection_type: s("Fiber"),
                account_number: s("0412345678"),
                service_id: s("MKT-FTTH-0017"),
                bandwidth: s("200 Mbps"),
                plan: s("Business Fiber 200"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Hikvision DS-7208HQHI-K1"),
                serial_number: s("DS7208-2103-44871"),
                number_of_cameras: Some(8),
                recording_days: Some(30),
                ip_address: s("192.168.1.108"),
                admin_password: s("hik@2021mkt"),
            }),
        },
        // BR002
        Branch {
            id: "BR002".to_string(),
            name: "BGC High Street".to_string(),
            store_name: "Annex".to_string(),
            keywords: kw(&["BGC", "Taguig", "Fort Bonifacio"]),
            area: s("Metro Manila"),
            phone: s("(02) 8556 7120"),
            address: s("B8 Bonifacio High Street, 9th Ave, Taguig City"),
            any_desk_id: s("518 224 667"),
            email: s("bgc@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("Globe Business"),
                date_installed: s("2022-01-20"),
                connection_type: s("Fiber"),
                account_number: s("710033245"),
                service_id: s("BGC-GFB-1120"),
                bandwidth: s("300 Mbps"),
                plan: s("GFiber Biz 300"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Dahua XVR5108HS-I3"),
                serial_number: s("DH5108-2201-09233"),
                number_of_cameras: Some(12),
                recording_days: Some(30),
                ip_address: s("192.168.8.200"),
                admin_password: s("Dahua#88bgc"),
            }),
        },
        // BR003 - the display name is the street, "Bicutan" lives in keywords
        Branch {
            id: "BR003".to_string(),
            name: "Doña Soledad".to_string(),
            store_name: "SM Bicutan Satellite".to_string(),
            keywords: kw(&["Bicutan", "Parañaque"]),
            area: s("Metro Manila"),
            phone: s("(02) 8776 0934"),
            address: s("Doña Soledad Ave cor. East Service Rd, Parañaque City"),
            any_desk_id: s("603 871 442"),
            email: s("bicutan@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("Converge ICT"),
                date_installed: s("2021-11-08"),
                connection_type: s("Fiber"),
                account_number: s("20113344556"),
                service_id: s("PRQ-FLX-0452"),
                bandwidth: s("100 Mbps"),
                plan: s("FlexiBiz 100"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Hikvision DS-7104NI-Q1"),
                serial_number: s("DS7104-2111-30419"),
                number_of_cameras: Some(4),
                recording_days: Some(15),
                ip_address: s("192.168.0.64"),
                admin_password: s("bicutanCam4"),
            }),
        },
        // BR004
        Branch {
            id: "BR004".to_string(),
            name: "Alabang".to_string(),
            store_name: "Festival Mall Level 1".to_string(),
            keywords: kw(&["Alabang", "Muntinlupa", "Festival"]),
            area: s("Metro Manila"),
            phone: s("(02) 8842 5518"),
            address: s("Level 1 Festival Supermall, Filinvest City, Muntinlupa"),
            any_desk_id: s("377 602 915"),
            email: s("alabang@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("PLDT Enterprise"),
                date_installed: s("2020-09-02"),
                connection_type: s("Fiber"),
                account_number: s("0498812234"),
                service_id: s("ALB-FTTH-0290"),
                bandwidth: s("100 Mbps"),
                plan: s("Business Fiber 100"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Hikvision DS-7208HGHI-F1"),
                serial_number: s("DS7208-2009-18852"),
                number_of_cameras: Some(8),
                recording_days: Some(30),
                ip_address: s("192.168.1.64"),
                admin_password: s("alab2020CCTV"),
            }),
        },
        // BR005 - kiosk, no CCTV installed yet
        Branch {
            id: "BR005".to_string(),
            name: "Cubao".to_string(),
            store_name: "Araneta City Gateway".to_string(),
            keywords: kw(&["Cubao", "Araneta", "Quezon City"]),
            area: s("Metro Manila"),
            phone: s("+63 917 880 2216"),
            address: s("Gateway Mall 2, Araneta City, Cubao, Quezon City"),
            any_desk_id: s("294 518 730"),
            email: s("cubao@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("Sky Biz"),
                date_installed: s("2023-05-12"),
                connection_type: s("Fiber"),
                account_number: s("88812739"),
                service_id: None,
                bandwidth: s("75 Mbps"),
                plan: s("Biz Broadband 75"),
            }),
            security: None,
        },
        // BR006
        Branch {
            id: "BR006".to_string(),
            name: "Ortigas".to_string(),
            store_name: "Estancia Capitol Commons".to_string(),
            keywords: kw(&["Ortigas", "Pasig", "Capitol Commons"]),
            area: s("Metro Manila"),
            phone: s("(02) 8631 7789"),
            address: s("East Wing Estancia, Capitol Commons, Pasig City"),
            any_desk_id: s("836 441 209"),
            email: s("ortigas@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("Converge ICT"),
                date_installed: s("2022-06-30"),
                connection_type: s("Fiber"),
                account_number: s("20224466880"),
                service_id: s("PSG-FLX-1108"),
                bandwidth: s("200 Mbps"),
                plan: s("FlexiBiz 200"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Dahua NVR2104HS-P-4KS2"),
                serial_number: s("DH2104-2206-71035"),
                number_of_cameras: Some(6),
                recording_days: Some(30),
                ip_address: s("192.168.5.110"),
                admin_password: s("ortigasNvr6"),
            }),
        },
        // BR007 - provincial site, sparsely documented install
        Branch {
            id: "BR007".to_string(),
            name: "Session Road".to_string(),
            store_name: "Baguio Main".to_string(),
            keywords: kw(&["Baguio", "Session"]),
            area: s("North Luzon"),
            phone: s("(074) 442 3310"),
            address: s("168 Session Rd, Baguio City"),
            any_desk_id: s("745 990 128"),
            email: s("baguio@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("PLDT"),
                date_installed: s("2019-07-22"),
                connection_type: s("DSL"),
                account_number: None,
                service_id: None,
                bandwidth: s("20 Mbps"),
                plan: None,
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("CP Plus CP-UVR-0401E1"),
                serial_number: None,
                number_of_cameras: Some(4),
                recording_days: Some(7),
                ip_address: None,
                admin_password: s("admin12345"),
            }),
        },
        // BR008 - line still being provisioned
        Branch {
            id: "BR008".to_string(),
            name: "Dasmariñas".to_string(),
            store_name: "Robinsons Dasmariñas".to_string(),
            keywords: kw(&["Dasma", "Cavite"]),
            area: s("South Luzon"),
            phone: s("(046) 416 0277"),
            address: s("Robinsons Place Dasmariñas, Governor's Drive, Cavite"),
            any_desk_id: s("562 037 814"),
            email: s("dasma@lunamart.ph"),
            network: None,
            security: Some(SecurityInfo {
                dvr_nvr: s("Hikvision DS-7108HGHI-F1"),
                serial_number: s("DS7108-2304-55290"),
                number_of_cameras: Some(8),
                recording_days: Some(15),
                ip_address: s("192.168.100.50"),
                admin_password: s("dasmaHik8"),
            }),
        },
        // BR009
        Branch {
            id: "BR009".to_string(),
            name: "Cebu IT Park".to_string(),
            store_name: "Ayala Central Bloc".to_string(),
            keywords: kw(&["Cebu", "IT Park", "Lahug"]),
            area: s("Visayas"),
            phone: s("(032) 260 1145"),
            address: s("Central Bloc, Cebu IT Park, Lahug, Cebu City"),
            any_desk_id: s("918 273 645"),
            email: s("cebu@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("RISE"),
                date_installed: s("2022-10-05"),
                connection_type: s("Fiber"),
                account_number: s("RS-22-4471"),
                service_id: s("CEB-DIA-0088"),
                bandwidth: s("150 Mbps"),
                plan: s("Dedicated Internet 150"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Hikvision DS-7616NI-K2"),
                serial_number: s("DS7616-2210-90511"),
                number_of_cameras: Some(16),
                recording_days: Some(45),
                ip_address: s("10.10.2.18"),
                admin_password: s("cebuNvr16!"),
            }),
        },
        // BR010
        Branch {
            id: "BR010".to_string(),
            name: "Davao Lanang".to_string(),
            store_name: "SM Lanang Premier".to_string(),
            keywords: kw(&["Davao", "Lanang"]),
            area: s("Mindanao"),
            phone: s("(082) 285 0663"),
            address: s("SM Lanang Premier, JP Laurel Ave, Davao City"),
            any_desk_id: s("401 856 372"),
            email: s("davao@lunamart.ph"),
            network: Some(NetworkInfo {
                isp: s("Globe Business"),
                date_installed: s("2021-08-17"),
                connection_type: s("Fixed Wireless"),
                account_number: s("730192847"),
                service_id: s("DVO-GW-0315"),
                bandwidth: s("50 Mbps"),
                plan: s("Biz Wireless 50"),
            }),
            security: Some(SecurityInfo {
                dvr_nvr: s("Dahua XVR4108HS-I"),
                serial_number: s("DH4108-2108-33976"),
                number_of_cameras: Some(8),
                recording_days: Some(30),
                ip_address: s("192.168.62.12"),
                admin_password: s("davaoXvr#21"),
            }),
        },
    ]
}

// ============================================================================
// TESTS
// ============================================================================
