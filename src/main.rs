use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use newsstand::app::App;
use newsstand::config::Config;
use newsstand::page::Page;
use newsstand::storage::Database;
use newsstand::ui;

/// Get the config directory path (~/.config/newsstand/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("newsstand");
    Ok(config_dir)
}

/// Atomically copy a file using write-to-temp-then-rename pattern.
/// This ensures the destination is never left in a partial state.
fn atomic_copy(src: &Path, dst: &Path) -> Result<()> {
    // Randomized temp filename so a concurrent writer cannot collide with
    // (or pre-create) the temp path.
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let content = std::fs::read(src).with_context(|| {
        format!(
            "Failed to read source file '{}': check file permissions",
            src.display()
        )
    })?;

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true) // Fails atomically if file exists
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions or disk space",
                temp_path.display()
            )
        })?;

    temp_file.write_all(&content).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write to temporary file '{}': disk may be full",
            temp_path.display()
        )
    })?;

    // Sync to disk to ensure data is persisted before rename
    temp_file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk: disk may be full",
            temp_path.display()
        )
    })?;

    drop(temp_file);

    // Atomic rename (POSIX guarantees atomicity on the same filesystem).
    // On Windows, rename fails if destination exists, so remove it first
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to remove existing '{}' before atomic replace",
                dst.display()
            )
        })?;
    }

    std::fs::rename(&temp_path, dst).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}': check permissions",
            temp_path.display(),
            dst.display()
        )
    })?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "newsstand",
    about = "Terminal viewer for generated news listings"
)]
struct Args {
    /// Import a page document (copies to config directory)
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// View a page document in place, without importing it
    #[arg(long, value_name = "FILE")]
    page: Option<PathBuf>,

    /// Reset the preferences database (delete and recreate)
    #[arg(long)]
    reset_prefs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access on Unix: the directory holds the preference store.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let imported_page_path = config_dir.join("page.json");
    let db_path = config_dir.join("prefs.db");

    // Handle --import flag
    if let Some(import_file) = &args.import {
        // Canonicalize to resolve symlinks before touching the file
        let canonical_import = import_file
            .canonicalize()
            .with_context(|| format!("Failed to resolve import file: {}", import_file.display()))?;

        let metadata = std::fs::metadata(&canonical_import)?;
        if !metadata.is_file() {
            anyhow::bail!("Import path must be a regular file");
        }

        // Validate before importing: a page that does not parse would brick
        // every later launch.
        Page::load(&canonical_import).with_context(|| {
            format!(
                "File does not appear to be a valid page document: {}",
                canonical_import.display()
            )
        })?;

        // Atomic backup of the existing page before overwriting
        if imported_page_path.exists() {
            let backup_name = format!("page.json.backup.{}", Utc::now().format("%Y%m%d_%H%M%S"));
            let backup_path = config_dir.join(&backup_name);

            atomic_copy(&imported_page_path, &backup_path).with_context(|| {
                format!(
                    "Failed to create backup at '{}'. Original file is unchanged.",
                    backup_path.display()
                )
            })?;

            if !backup_path.exists() {
                anyhow::bail!(
                    "Backup verification failed: '{}' was not created. Aborting import to protect existing data.",
                    backup_path.display()
                );
            }
            println!("Backed up existing page to: {}", backup_path.display());
        }

        atomic_copy(&canonical_import, &imported_page_path).with_context(|| {
            format!(
                "Failed to import page document '{}'. If a backup was created, your previous page is preserved there.",
                canonical_import.display()
            )
        })?;
        println!("Imported page to: {}", imported_page_path.display());
    }

    // Handle --reset-prefs flag
    if args.reset_prefs && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete preferences database")?;
        println!("Preferences reset.");
    }

    // Load config (optional file)
    let config = Config::load(&config_dir.join("config.toml"))
        .context("Failed to load config.toml")?;

    // Resolve the page document: --page beats config override beats the
    // imported copy.
    let page_path = args
        .page
        .clone()
        .or_else(|| config.page_path.clone())
        .unwrap_or(imported_page_path);

    if !page_path.exists() {
        eprintln!("Error: No page document found at {}", page_path.display());
        eprintln!();
        eprintln!("To get started, import a generated page:");
        eprintln!("  newsstand --import /path/to/page.json");
        eprintln!();
        eprintln!("Or view one in place:");
        eprintln!("  newsstand --page /path/to/page.json");
        std::process::exit(1);
    }

    let page = Page::load(&page_path)
        .with_context(|| format!("Failed to load page document: {}", page_path.display()))?;

    // Open the preference store
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = Database::open(db_path_str).await?;

    // Build the app, then restore the persisted filter selection. The order
    // is load-bearing: the index and controls must exist before restore.
    let mut app = App::new(db, page, &config);
    app.restore_filters().await?;

    ui::run(&mut app).await
}
