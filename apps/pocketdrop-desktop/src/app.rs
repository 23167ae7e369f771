//! Startup wiring and the operator command loop.
//!
//! Discovery and ranking run once at startup; the ranked list feeds a
//! [`Cycler`] that the operator steers from stdin while the upload server
//! runs in the background. The cycler sits behind one coarse mutex since the
//! command loop and any status display only ever take it for a single
//! read-or-advance step.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

use pocketdrop_netscan::{collect_candidates, local_hostname};
use pocketdrop_preferences::PreferenceStore;
use pocketdrop_selection::{Cycler, rank};
use pocketdrop_upload_server::{ServerConfig, UploadServer};

/// Default HTTP port, kept from earlier PocketDrop builds so bookmarked
/// URLs and saved QR codes stay valid.
pub const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, resolved from the environment in `main`.
pub struct Config {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub preferences_path: PathBuf,
}

/// Runs discovery, the upload server and the operator loop until quit.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = PreferenceStore::new(&config.preferences_path);

    let candidates = collect_candidates().await;
    let (ranked, preferred) = rank(candidates, &store);
    let cycler = Arc::new(Mutex::new(Cycler::new(ranked)));

    let server = UploadServer::new(ServerConfig {
        port: config.port,
        upload_dir: config.upload_dir.clone(),
    });
    let mut server_task = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.run().await })
    };

    // Give the listener a moment to bind so the banner shows the real port.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // A server that already died (port taken, unwritable upload dir) must
    // stop startup here, not leave the operator advertising a dead URL.
    if server_task.is_finished() {
        return Err(match server_task.await? {
            Ok(()) => anyhow::anyhow!("upload server exited before startup finished"),
            Err(e) => e.into(),
        });
    }

    let port = match server.port().await {
        0 => config.port,
        bound => bound,
    };

    {
        let cycler = cycler.lock().await;
        print_banner(&cycler, preferred.as_deref(), port, &config);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
            result = &mut server_task => {
                return Err(match result? {
                    Ok(()) => anyhow::anyhow!("upload server stopped unexpectedly"),
                    Err(e) => e.into(),
                });
            }
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(cmd) => {
                        if !handle_command(cmd.trim(), &cycler, &store, port).await {
                            break;
                        }
                    }
                }
            }
        }
    }

    server.shutdown();
    if let Err(e) = server_task.await? {
        tracing::error!("upload server exited with error: {e}");
    }
    Ok(())
}

/// Handles one operator command; returns `false` to quit.
async fn handle_command(
    cmd: &str,
    cycler: &Arc<Mutex<Cycler>>,
    store: &PreferenceStore,
    port: u16,
) -> bool {
    match cmd {
        "n" | "next" => {
            let mut cycler = cycler.lock().await;
            cycler.next();
            print_current(&cycler, port);
        }
        "p" | "prev" | "previous" => {
            let mut cycler = cycler.lock().await;
            cycler.previous();
            print_current(&cycler, port);
        }
        "s" | "set" => {
            let cycler = cycler.lock().await;
            if cycler.mark_current_preferred(store) {
                println!("saved {} as the preferred address", cycler.current());
            } else {
                println!("could not save the preference (see log)");
            }
        }
        "l" | "list" => {
            let cycler = cycler.lock().await;
            let preferred = store.load();
            for (i, ip) in cycler.candidates().iter().enumerate() {
                let cursor = if i == cycler.cursor() { ">" } else { " " };
                let star = if preferred.as_deref() == Some(ip) { " *" } else { "" };
                println!("{cursor} {}. {ip}{star}", i + 1);
            }
        }
        "q" | "quit" | "exit" => return false,
        "" => {}
        _ => {
            println!("commands: n(ext), p(rev), s(et preferred), l(ist), q(uit)");
        }
    }
    true
}

fn print_banner(cycler: &Cycler, preferred: Option<&str>, port: u16, config: &Config) {
    println!("PocketDrop on {}", local_hostname());
    println!(
        "detected {} candidate address(es), uploads go to {}",
        cycler.len(),
        config.upload_dir.display()
    );
    for (i, ip) in cycler.candidates().iter().enumerate() {
        let star = if preferred == Some(ip) { " *" } else { "" };
        println!("  {}. {ip}{star}", i + 1);
    }
    print_current(cycler, port);
    println!("scan or open the URL on your phone; if it cannot connect, type 'n' for the next address");
    println!("commands: n(ext), p(rev), s(et preferred), l(ist), q(uit)");
}

fn print_current(cycler: &Cycler, port: u16) {
    println!(
        "advertising {}/{}: http://{}:{port}",
        cycler.cursor() + 1,
        cycler.len(),
        cycler.current()
    );
}
