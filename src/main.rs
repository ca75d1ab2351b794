use std::path::PathBuf;

use touchbase::db::SqliteKv;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut db_path: Option<PathBuf> = None;
    let mut import_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                db_path = args.next().map(PathBuf::from);
                if db_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--import" => {
                import_path = args.next().map(PathBuf::from);
                if import_path.is_none() {
                    eprintln!("Error: --import requires a JSON file path");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("touchbase - reminders to keep in touch");
                println!();
                println!("Usage: touchbase [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Database file path (default: .data/touchbase.db)");
                println!("  --import <JSON_PATH>   Import a storage dump exported from the mobile app");
                println!("  -h, --help             Show this help");
                println!();
                println!("Set RUST_LOG (e.g. RUST_LOG=debug) to see storage activity.");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let db_path = db_path.unwrap_or_else(|| PathBuf::from(".data").join("touchbase.db"));

    if let Some(json_path) = import_path {
        println!("Importing from {}...", json_path.display());
        let kv = match SqliteKv::open(&db_path) {
            Ok(kv) => kv,
            Err(e) => {
                eprintln!("Error opening database: {}", e);
                std::process::exit(1);
            }
        };
        match touchbase::migrate::import_json(&json_path, &kv) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Contacts: {}", stats.contacts);
                println!("  Groups: {}", stats.groups);
                if stats.reassigned_ids > 0 {
                    println!("  Ids replaced: {}", stats.reassigned_ids);
                }
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    touchbase::cli::run(&db_path);
}
