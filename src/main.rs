//! LABX Compatibility Lab
//!
//! Interactive terminal front-end:
//! - Validated name entry
//! - Simulated biometric scan with live progress (Ctrl-C cancels)
//! - Deterministic compatibility results and persistent history

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use labx_scanner::oracle::CompatibilityResult;
use labx_scanner::scan::ScanEvent;
use labx_scanner::validation::validate_pair;
use labx_scanner::{CompatibilityLab, LabConfig, ScanOutcome, Scanner};

// ──────────────────────────────────────────────────────────────────────────────
// RENDERING
// ──────────────────────────────────────────────────────────────────────────────

fn bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn print_result(result: &CompatibilityResult) {
    println!("\n{}", "═".repeat(60));
    println!("💞 {} & {}", result.subject_a, result.subject_b);
    println!("🗓️  {}", result.formatted_date());
    println!("{}", "─".repeat(60));
    println!("Overall Match: {}%", result.overall_score);
    if let Some(headline) = result.insights.first() {
        println!("{}", headline);
    }
    println!(
        "🩸 Blood types: {} ({}) · {} ({})",
        result.subject_a, result.blood_type_a, result.subject_b, result.blood_type_b
    );
    println!("{}", "─".repeat(60));
    for (name, value) in result.metrics() {
        println!("   {:<20} {} {:>3}%", name, bar(f64::from(value), 25), value);
    }
    println!("{}", "─".repeat(60));
    for insight in result.insights.iter().skip(1) {
        println!("   • {}", insight);
    }
    println!("{}\n", "═".repeat(60));
}

/// Print scan events until the scan finishes or is cancelled.
async fn render_scan(mut events: broadcast::Receiver<ScanEvent>) {
    while let Ok(event) = events.recv().await {
        match event {
            ScanEvent::Started { subject_a, subject_b, .. } => {
                println!("\n🔬 Scanning {} & {}...", subject_a, subject_b);
            }
            ScanEvent::Status { message, .. } => {
                println!("\n   {}", message);
            }
            ScanEvent::Progress { progress, .. } => {
                print!("\r   [{}] {:>3}%", bar(progress, 30), progress.floor() as u32);
                let _ = io::stdout().flush();
            }
            ScanEvent::Completed { .. } => {
                println!("\n\n✅ Scan complete! Generating results...");
                break;
            }
            ScanEvent::Cancelled { .. } => {
                println!("\n\n🛑 Scan cancelled. Validate names to restart.\n");
                break;
            }
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Read a line on a blocking thread. `None` means Ctrl-C was pressed first.
/// Once a scan has listened for Ctrl-C, SIGINT no longer exits by itself.
async fn read_or_interrupt(label: &'static str) -> Result<Option<String>> {
    let read = tokio::task::spawn_blocking(move || prompt(label));
    tokio::select! {
        input = read => Ok(Some(input??)),
        _ = tokio::signal::ctrl_c() => Ok(None),
    }
}

fn farewell() {
    println!("\n👋 Thanks for using LAB X.\n");
}

async fn run_scan(scanner: &Scanner) -> Result<()> {
    let first = prompt("👤 First name: ")?;
    let second = prompt("👤 Second name: ")?;

    let (first, second) = match validate_pair(&first, &second) {
        Ok(names) => names,
        Err(e) => {
            println!("\n⚠️  {}\n", e);
            return Ok(());
        }
    };

    let renderer = tokio::spawn(render_scan(scanner.subscribe()));
    let Some(handle) = scanner.start(&first, &second).await else {
        renderer.abort();
        println!("\n⚠️  A scan is already in progress.\n");
        return Ok(());
    };

    let wait = handle.wait();
    tokio::pin!(wait);

    let outcome = tokio::select! {
        outcome = &mut wait => outcome,
        _ = tokio::signal::ctrl_c() => {
            scanner.cancel().await;
            wait.await
        }
    };
    let _ = renderer.await;

    if let ScanOutcome::Completed(result) = outcome {
        print_result(&result);
    }
    Ok(())
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labx_scanner=info")),
        )
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    println!("\n{}", "═".repeat(60));
    println!("🧪 LABX Compatibility Lab v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "═".repeat(60));

    let config = LabConfig::from_env();
    info!("Using storage file {:?}", config.storage_path);

    let lab = Arc::new(CompatibilityLab::from_config(&config));
    let scanner = Scanner::from_config(lab.clone(), &config);

    let saved = lab.history().await.len();
    println!("💾 Storage: {} ({} saved scans)", config.storage_path.display(), saved);
    println!("\n💡 Commands: 'scan' | 'history' | 'show <n>' | 'share' | 'copy' | 'clear' | 'help' | 'quit'\n");

    loop {
        let Some(input) = read_or_interrupt("🧪 LABX> ").await? else {
            // The stdin reader thread is still parked in read_line
            farewell();
            std::process::exit(0);
        };
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();

        match command.as_str() {
            "quit" | "exit" | "q" => {
                farewell();
                break;
            }
            "help" => {
                println!("\n   scan       enter two names and run a scan (Ctrl-C cancels)");
                println!("   history    list saved scans, most recent first");
                println!("   show <n>   redisplay saved scan n");
                println!("   share      share line for the most recent scan");
                println!("   copy       full summary for the most recent scan");
                println!("   clear      clear saved scans and cached results");
                println!("   quit       exit (Ctrl-C at the prompt also exits)\n");
            }
            "scan" => run_scan(&scanner).await?,
            "history" => {
                let history = lab.history().await;
                if history.is_empty() {
                    println!("\n📜 No previous scans found. Complete your first scan to see history.\n");
                    continue;
                }
                println!("\n📜 Scan History:");
                for (i, entry) in history.iter().enumerate() {
                    println!(
                        "   {:>2}. {} & {} · {}% · {}",
                        i + 1,
                        entry.subject_a,
                        entry.subject_b,
                        entry.overall_score,
                        entry.timestamp.format("%b %-d %H:%M")
                    );
                }
                println!();
            }
            "show" => {
                let index = parts.next().and_then(|n| n.parse::<usize>().ok()).unwrap_or(1);
                match lab.entry(index.saturating_sub(1)).await {
                    Some(entry) => print_result(&entry.result),
                    None => println!("\n⚠️  No saved scan #{}\n", index),
                }
            }
            "share" | "copy" => match lab.entry(0).await {
                Some(entry) if command == "share" => println!("\n{}\n", entry.result.share_text()),
                Some(entry) => println!("\n{}\n", entry.result.summary_text()),
                None => println!("\n⚠️  No results yet. Run a scan first.\n"),
            },
            "clear" => {
                let answer = prompt("❓ Clear all saved scan results? This cannot be undone. [y/N] ")?;
                if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
                    lab.clear_history().await.context("Failed to clear history")?;
                    println!("\n🗑️  History and cached results cleared.\n");
                }
            }
            other => println!("\n❓ Unknown command '{}'. Type 'help'.\n", other),
        }
    }

    Ok(())
}
