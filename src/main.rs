// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::process;

// Use library instead of local modules
use branch_finder::{check_directory, Branch, BranchDirectory, Severity};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("lookup") => run_lookup(&args[2..])?,
        Some("list") => run_list()?,
        Some("check") => run_check()?,
        Some("help") | Some("--help") | Some("-h") => print_usage(),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(2);
        }
        // UI mode (default)
        None => run_ui_mode()?,
    }

    Ok(())
}

fn print_usage() {
    println!("Find Store Branch - search the branch directory");
    println!();
    println!("Usage:");
    println!("  branch-finder                                     interactive UI");
    println!("  branch-finder lookup <name> [id] [--show-passwords]");
    println!("  branch-finder list                                every branch, one line each");
    println!("  branch-finder check                               dataset sanity report");
    println!();
    println!("Set BRANCH_DATA to a .json or .csv file to search your own dataset.");
}

/// BRANCH_DATA may point at a dataset file; otherwise the built-in
/// directory is used.
fn open_directory() -> Result<BranchDirectory> {
    match env::var_os("BRANCH_DATA") {
        Some(path) => {
            let directory = BranchDirectory::load(&PathBuf::from(path))?;
            println!(
                "✓ Loaded {} branches from {}",
                directory.len(),
                directory.source()
            );
            Ok(directory)
        }
        None => {
            let directory = BranchDirectory::with_defaults();
            println!("✓ Loaded {} built-in branches", directory.len());
            Ok(directory)
        }
    }
}

fn run_lookup(args: &[String]) -> Result<()> {
    let mut show_passwords = false;
    let mut terms: Vec<&str> = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--show-passwords" => show_passwords = true,
            term => terms.push(term),
        }
    }

    let name = terms.first().copied().unwrap_or("");
    let id = terms.get(1).copied().unwrap_or("");

    if name.trim().is_empty() && id.trim().is_empty() {
        eprintln!("Usage: branch-finder lookup <name> [id] [--show-passwords]");
        process::exit(2);
    }

    let directory = open_directory()?;

    match directory.find(name, id) {
        Some(branch) => print_branch(branch, show_passwords),
        None => println!(
            "No matching branch for name=\"{}\" id=\"{}\"",
            name.trim(),
            id.trim()
        ),
    }

    Ok(())
}

fn print_field(label: &str, value: &Option<String>) {
    if let Some(value) = value {
        println!("  {:<16} {}", format!("{}:", label), value);
    }
}

fn print_branch(branch: &Branch, show_passwords: bool) {
    println!();
    println!("BRANCH");
    println!("  {:<16} {}", "Branch ID:", branch.id);
    println!("  {:<16} {}", "Branch:", branch.name);
    println!("  {:<16} {}", "Store:", branch.store_name);
    print_field("Area", &branch.area);
    print_field("Address", &branch.address);
    print_field("Phone", &branch.phone);
    print_field("Email", &branch.email);
    print_field("AnyDesk ID", &branch.any_desk_id);
    if !branch.keywords.is_empty() {
        println!("  {:<16} {}", "Keywords:", branch.keywords.join(", "));
    }

    if let Some(network) = &branch.network {
        println!();
        println!("NETWORK");
        print_field("ISP", &network.isp);
        print_field("Plan", &network.plan);
        print_field("Bandwidth", &network.bandwidth);
        print_field("Connection", &network.connection_type);
        print_field("Account #", &network.account_number);
        print_field("Service ID", &network.service_id);
        print_field("Installed", &network.date_installed);
    }

    if let Some(security) = &branch.security {
        println!();
        println!("CCTV SECURITY");
        print_field("DVR/NVR", &security.dvr_nvr);
        print_field("Serial #", &security.serial_number);
        if let Some(cameras) = security.number_of_cameras {
            println!("  {:<16} {}", "Cameras:", cameras);
        }
        if let Some(days) = security.recording_days {
            println!("  {:<16} {} days", "Recording:", days);
        }
        print_field("IP Address", &security.ip_address);
        if let Some(password) = &security.admin_password {
            if show_passwords {
                println!("  {:<16} {}", "Admin Password:", password);
            } else {
                println!(
                    "  {:<16} ••••••••  (--show-passwords reveals)",
                    "Admin Password:"
                );
            }
        }
    }
    println!();
}

fn run_list() -> Result<()> {
    let directory = open_directory()?;

    println!();
    println!(
        "{:<8} {:<20} {:<26} {:<14} {}",
        "ID", "Branch", "Store", "Area", "Phone"
    );
    println!("{}", "─".repeat(86));
    for branch in directory.all() {
        println!(
            "{:<8} {:<20} {:<26} {:<14} {}",
            branch.id,
            branch.name,
            branch.store_name,
            branch.area.as_deref().unwrap_or("-"),
            branch.phone.as_deref().unwrap_or("-")
        );
    }
    println!();
    println!(
        "✓ {} branches (loaded {})",
        directory.len(),
        directory.loaded_at().format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRIT",
        Severity::Warning => "WARN",
        Severity::Info => "INFO",
    }
}

fn run_check() -> Result<()> {
    let directory = open_directory()?;
    let report = check_directory(directory.all());

    if report.is_clean() {
        println!("✓ {}", report.summary());
        return Ok(());
    }

    println!();
    for issue in &report.issues {
        println!(
            "[{}] {} / {}: {}",
            severity_tag(&issue.severity),
            issue.branch_id,
            issue.field,
            issue.issue
        );
        println!("       ↳ {}", issue.recommendation);
    }
    println!();
    println!("{}", report.summary());

    if report.has_critical_issues() {
        process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🔎 Loading branch directory...\n");

    let directory = open_directory()?;

    println!("Starting UI... (Press 'q' to quit)\n");

    // Create and run app
    let mut app = ui::App::new(directory);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or try: branch-finder lookup <name> [id]");
    process::exit(1);
}
