use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rollcall_core::{
    AttendanceRecord, EditError, Status, SummaryError, Target, day_log, distinct_subjects,
    monthly_summary, overall_summary, remove_at, remove_subject, replace_at, subject_summary,
};
use rollcall_store::CsvStore;

mod menu;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "rollcall", version, about = "Personal attendance tracker")]
struct Cli {
    /// Attendance file (default: ~/.rollcall/attendance.csv)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record one class
    Add {
        /// Subject name
        subject: String,

        /// Present or Absent (P/A also works)
        #[arg(value_parser = parse_status)]
        status: Status,

        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Per-subject attendance summary
    Summary {
        #[arg(long, default_value = "75", value_parser = parse_target)]
        target: Target,
    },

    /// Per-subject summary restricted to one month
    Month {
        /// Month prefix, YYYY-MM
        month: String,

        #[arg(long, default_value = "75", value_parser = parse_target)]
        target: Target,
    },

    /// Single summary across every subject
    Overall {
        #[arg(long, default_value = "75", value_parser = parse_target)]
        target: Target,
    },

    /// Everything recorded on one date
    Day {
        /// Date, YYYY-MM-DD
        date: String,
    },

    /// List all entries with their entry numbers
    List,

    /// Distinct subjects in the store
    Subjects,

    /// Delete one entry by its number from `rollcall list`
    Delete { entry: usize },

    /// Rewrite one entry; omitted fields keep their current value
    Modify {
        entry: usize,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
    },

    /// Delete every entry for one subject
    DeleteSubject {
        subject: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Delete all attendance data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Interactive menu (the console front-end)
    Menu {
        #[arg(long, default_value = "75", value_parser = parse_target)]
        target: Target,
    },
}

fn parse_status(s: &str) -> Result<Status, rollcall_core::RecordError> {
    s.parse()
}

fn parse_target(s: &str) -> Result<Target, rollcall_core::TargetError> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = match cli.file {
        Some(p) => p,
        None => state::data_path()?,
    };
    let store = CsvStore::new(path);

    match cli.command {
        Command::Add {
            subject,
            status,
            date,
        } => {
            let record = AttendanceRecord::new(date.unwrap_or_default(), subject, status)?;
            append(&store, &record)?;
            println!(
                "Recorded {} | {} | {}",
                record.date, record.subject, record.status
            );
        }

        Command::Summary { target } => match subject_summary(&load(&store)?, target) {
            Ok(rows) => render::print_subject_summary(&rows, target),
            Err(e) => println!("{e}"),
        },

        Command::Month { month, target } => {
            match monthly_summary(&load(&store)?, &month, target) {
                Ok(rows) => render::print_monthly_summary(&rows, &month),
                Err(e) => println!("{e}"),
            }
        }

        Command::Overall { target } => match overall_summary(&load(&store)?, target) {
            Ok(stats) => render::print_overall(&stats, target),
            Err(e) => println!("{e}"),
        },

        Command::Day { date } => match day_log(&load(&store)?, &date) {
            Ok(entries) => render::print_day(&date, &entries),
            Err(e) => println!("{e}"),
        },

        Command::List => {
            let records = load(&store)?;
            if records.is_empty() {
                println!("{}", SummaryError::EmptyStore);
            } else {
                render::print_list(&records);
            }
        }

        Command::Subjects => {
            let records = load(&store)?;
            if records.is_empty() {
                println!("{}", SummaryError::EmptyStore);
            }
            for subject in distinct_subjects(&records) {
                println!("{subject}");
            }
        }

        Command::Delete { entry } => {
            let mut records = load(&store)?;
            let index = to_index(entry, records.len())?;
            let removed = remove_at(&mut records, index)?;
            save(&store, &records)?;
            println!(
                "Deleted {} | {} | {}",
                removed.date, removed.subject, removed.status
            );
        }

        Command::Modify {
            entry,
            date,
            subject,
            status,
        } => {
            let mut records = load(&store)?;
            let index = to_index(entry, records.len())?;
            let current = records[index].clone();
            let record = AttendanceRecord::new(
                date.unwrap_or(current.date),
                subject.unwrap_or(current.subject),
                status.unwrap_or(current.status),
            )?;
            replace_at(&mut records, index, record)?;
            save(&store, &records)?;
            println!("Entry {entry} updated.");
        }

        Command::DeleteSubject { subject, yes } => {
            let mut records = load(&store)?;
            let count = records.iter().filter(|r| r.subject == subject).count();
            if count == 0 {
                bail!("no records for subject '{subject}'");
            }
            if !yes && !menu::confirm(&format!("Delete all {count} records for '{subject}'?"))? {
                println!("Aborted.");
                return Ok(());
            }
            remove_subject(&mut records, &subject);
            save(&store, &records)?;
            println!("Deleted {count} records for '{subject}'.");
        }

        Command::Reset { yes } => {
            if !yes && !menu::confirm("This will delete ALL attendance data. Continue?")? {
                println!("Aborted.");
                return Ok(());
            }
            save(&store, &[])?;
            println!("All data reset.");
        }

        Command::Menu { target } => menu::run(&store, target)?,
    }

    Ok(())
}

// Entry numbers are 1-based in everything the user sees.
fn to_index(entry: usize, len: usize) -> Result<usize> {
    let index = entry.checked_sub(1).context("entry numbers start at 1")?;
    if index >= len {
        bail!(EditError::OutOfRange { index, len });
    }
    Ok(index)
}

pub(crate) fn load(store: &CsvStore) -> Result<Vec<AttendanceRecord>> {
    store
        .load()
        .with_context(|| format!("reading {}", store.path().display()))
}

pub(crate) fn save(store: &CsvStore, records: &[AttendanceRecord]) -> Result<()> {
    store
        .save_all(records)
        .with_context(|| format!("writing {}", store.path().display()))
}

pub(crate) fn append(store: &CsvStore, record: &AttendanceRecord) -> Result<()> {
    store
        .append(record)
        .with_context(|| format!("writing {}", store.path().display()))
}
