use clap::Parser;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor::MoveTo, execute};
use search_core::config::{init_tracing, SearchConfig};
use search_core::persistence::load_pool;
use search_core::{highlight, BilingualIndex, CandidatePool, FieldRecord, Record, SearchSession};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Interactive autocomplete over a customer/item pool.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Pool file (.json array of records, or a snapshot).
    #[arg(long)]
    pool: Option<PathBuf>,
    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Show at most this many candidates.
    #[arg(long, default_value_t = 8)]
    limit: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SearchConfig::load_from_path(path)?,
        None => SearchConfig::load_default()?,
    };
    init_tracing(&config.logging);

    let pool_path = args
        .pool
        .or_else(|| config.pool.clone())
        .ok_or("no pool file given (use --pool or set `pool` in the config)")?;
    let records = load_pool(&pool_path)?;
    let index = BilingualIndex::build(&records, &config.bilingual.pairs);
    let pool = CandidatePool::new(records, &config.search.fields);
    let display = config.search.display_field.as_str();
    let mut session = SearchSession::new(&pool, display).with_grace(config.search.blur_grace());
    let mut committed: Option<String> = None;

    session.on_focus();
    loop {
        print_ui(&session, &index, pool.search_fields(), display, committed.as_deref(), args.limit)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(['\n', '\r']);

        match cmd {
            "exit" => break,
            "" => {
                // Enter on an empty line leaves the field.
                session.on_blur(std::time::Instant::now());
                if let Some(commit) = session.resolve_blur() {
                    committed = Some(format!("{} ({:?})", commit.value, commit.kind));
                }
                session.on_focus();
            }
            s if s.starts_with(":lookup ") => {
                let key = &s[":lookup ".len()..];
                committed = Some(match index.lookup(key) {
                    Some(other) => format!("{key} <-> {other}"),
                    None => format!("no counterpart for '{key}'"),
                });
            }
            s if s.starts_with(':') && s.len() > 1 => {
                if let Ok(n) = s[1..].parse::<usize>() {
                    let chosen = n
                        .checked_sub(1)
                        .and_then(|i| session.filtered_indices().get(i).copied());
                    if let Some(commit) = chosen.and_then(|record| session.on_select(record)) {
                        committed = Some(format!("{} ({:?})", commit.value, commit.kind));
                        session.on_focus();
                    }
                }
            }
            s => session.on_type(s),
        }
    }
    Ok(())
}

fn label(record: &FieldRecord, display: &str, fields: &[String]) -> String {
    record
        .field(display)
        .or_else(|| fields.iter().find_map(|f| record.field(f)))
        .unwrap_or_default()
        .to_string()
}

fn print_ui(
    session: &SearchSession<'_, FieldRecord>,
    index: &BilingualIndex,
    fields: &[String],
    display: &str,
    committed: Option<&str>,
    limit: usize,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "{}", "Tamil / Tanglish Autocomplete".bold())?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Type a query and press [Enter]. Select with ':1', ':2'.")?;
    writeln!(out, "Empty line leaves the field, ':lookup X' shows the counterpart, 'exit' quits.\n")?;

    if let Some(value) = committed {
        writeln!(out, "Committed: {}", value.green())?;
    }
    writeln!(out, "\nQuery: [{}]", session.query())?;

    let total = session.filtered_indices().len();
    if total == 0 {
        writeln!(out, "\nNo matches.")?;
    } else {
        writeln!(out, "\nMatches ({total}):")?;
        for (i, record) in session.filtered().take(limit).enumerate() {
            let text = label(record, display, fields);
            write!(out, "  :{}: ", i + 1)?;
            match highlight(session.query(), &text) {
                Some(range) => write!(
                    out,
                    "{}{}{}",
                    &text[..range.start],
                    text[range.clone()].to_string().yellow().bold(),
                    &text[range.end..]
                )?,
                None => write!(out, "{text}")?,
            }
            if let Some(other) = index.lookup(&text) {
                write!(out, "  {}", other.to_string().dark_grey())?;
            }
            writeln!(out)?;
        }
    }
    write!(out, "\n> ")?;
    out.flush()
}
