use search_core::config::{init_tracing, SearchConfig};
use search_core::persistence::load_pool;
use search_core::{BilingualIndex, CandidatePool, Commit, FieldRecord, Record, SearchSession};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};

fn get_log_path() -> PathBuf {
    let mut path = PathBuf::from("target");
    path.push("search_simulator.log");
    path
}

fn main() -> io::Result<()> {
    let mut config = SearchConfig::load_default().unwrap_or_else(|e| {
        eprintln!("[WARN] ignoring config: {e}");
        SearchConfig::default()
    });
    if config.logging.file.is_none() {
        // stdout carries the protocol, so logs go to a file.
        let _ = std::fs::remove_file(get_log_path());
        config.logging.file = Some(get_log_path());
    }
    init_tracing(&config.logging);
    info!("search simulator starting");

    let pool_path = std::env::args_os().nth(1).map(PathBuf::from).or(config.pool.clone());
    let records = match pool_path.as_deref().map(load_pool) {
        Some(Ok(records)) => records,
        Some(Err(e)) => {
            error!(error = %e, "could not load pool");
            Vec::new()
        }
        None => {
            warn!("no pool given, starting empty");
            Vec::new()
        }
    };
    let index = BilingualIndex::build(&records, &config.bilingual.pairs);
    let pool = CandidatePool::new(records, &config.search.fields);
    let display = config.search.display_field.as_str();
    let mut session = SearchSession::new(&pool, display).with_grace(config.search.blur_grace());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        debug!(input = %input, "<-");
        let (command, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));

        // A blur whose grace period ran out while we waited for input.
        if let Some(commit) = session.poll(Instant::now()) {
            send_commit(&commit, &mut stdout)?;
        }

        match command {
            "FOCUS" => {
                session.on_focus();
                send_candidates(&session, display, &mut stdout)?;
            }
            "TYPE" => {
                session.on_type(rest);
                send_candidates(&session, display, &mut stdout)?;
            }
            "SELECT" => {
                let chosen = rest
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| session.filtered_indices().get(i).copied());
                match chosen.and_then(|record| session.on_select(record)) {
                    Some(commit) => send_commit(&commit, &mut stdout)?,
                    None => warn!(arg = rest, "SELECT out of range"),
                }
            }
            // The commit for a blur arrives on a later line once the grace
            // period has passed, so a SELECT sent right after still wins.
            "BLUR" => session.on_blur(Instant::now()),
            "TICK" => {}
            "LOOKUP" => {
                let reply = match index.lookup(rest) {
                    Some(other) => format!("COUNTERPART {other}"),
                    None => "NO_COUNTERPART".to_string(),
                };
                send(&mut stdout, &reply)?;
                stdout.flush()?;
            }
            "EXIT" => {
                info!("received EXIT");
                break;
            }
            _ => warn!(command, "unknown command"),
        }
    }
    if let Some(commit) = session.resolve_blur() {
        send_commit(&commit, &mut stdout)?;
    }
    info!("shutting down");
    Ok(())
}

fn send(stdout: &mut io::Stdout, cmd: &str) -> io::Result<()> {
    debug!(cmd, "->");
    writeln!(stdout, "{cmd}")
}

fn send_commit(commit: &Commit, stdout: &mut io::Stdout) -> io::Result<()> {
    send(stdout, &format!("COMMIT {:?} {}", commit.kind, commit.value))?;
    stdout.flush()
}

fn send_candidates(
    session: &SearchSession<'_, FieldRecord>,
    display: &str,
    stdout: &mut io::Stdout,
) -> io::Result<()> {
    if session.filtered_indices().is_empty() {
        send(stdout, "HIDE_CANDIDATES")?;
    } else {
        for (i, record) in session.filtered().enumerate() {
            let label = record.field(display).unwrap_or_default();
            send(stdout, &format!("ADD_CANDIDATE {i} '{label}'"))?;
        }
        send(stdout, "SHOW_CANDIDATES")?;
    }
    stdout.flush()
}
