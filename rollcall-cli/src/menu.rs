//! Interactive console menu: the numbered-loop front-end over the same
//! core calls the subcommands use.

use std::io::{self, Write};

use anyhow::{Result, bail};
use rollcall_core::{
    AttendanceRecord, Status, SummaryError, Target, day_log, distinct_subjects, monthly_summary,
    overall_summary, remove_at, remove_subject, replace_at, subject_summary,
};
use rollcall_store::CsvStore;

use crate::render;
use crate::{append, load, save};

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush().ok();
    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        bail!("end of input");
    }
    Ok(s.trim().to_string())
}

fn prompt_default(label: &str, current: &str) -> Result<String> {
    let s = prompt(&format!("{label} [{current}]"))?;
    Ok(if s.is_empty() { current.to_string() } else { s })
}

pub(crate) fn confirm(question: &str) -> Result<bool> {
    Ok(prompt(&format!("{question} (y/n)"))?.eq_ignore_ascii_case("y"))
}

pub fn run(store: &CsvStore, target: Target) -> Result<()> {
    loop {
        println!();
        println!("=== ROLLCALL ===");
        println!("1. Mark attendance");
        println!("2. Subject summary");
        println!("3. Monthly summary");
        println!("4. Overall summary");
        println!("5. Records for a date");
        println!("6. List entries");
        println!("7. Modify an entry");
        println!("8. Delete an entry");
        println!("9. Delete a subject");
        println!("10. Reset all data");
        println!("0. Quit");

        let outcome = match prompt("Choice")?.as_str() {
            "1" => mark(store),
            "2" => summary(store, target),
            "3" => monthly(store, target),
            "4" => overall(store, target),
            "5" => day(store),
            "6" => list(store),
            "7" => modify(store),
            "8" => delete(store),
            "9" => delete_subject(store),
            "10" => reset(store),
            "0" => return Ok(()),
            _ => {
                println!("Unknown option.");
                Ok(())
            }
        };

        // One failed action does not end the session.
        if let Err(e) = outcome {
            println!("Error: {e:#}");
        }
    }
}

fn mark(store: &CsvStore) -> Result<()> {
    let date = prompt("Date (YYYY-MM-DD, blank for today)")?;
    let subject = prompt("Subject")?;
    let status = loop {
        match prompt("Present or Absent (P/A)")?.parse::<Status>() {
            Ok(s) => break s,
            Err(e) => println!("{e}"),
        }
    };

    match AttendanceRecord::new(date, subject, status) {
        Ok(record) => {
            append(store, &record)?;
            println!("Attendance recorded.");
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn summary(store: &CsvStore, target: Target) -> Result<()> {
    match subject_summary(&load(store)?, target) {
        Ok(rows) => render::print_subject_summary(&rows, target),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn monthly(store: &CsvStore, target: Target) -> Result<()> {
    let records = load(store)?;
    if records.is_empty() {
        println!("{}", SummaryError::EmptyStore);
        return Ok(());
    }
    let month = prompt("Month (YYYY-MM)")?;
    match monthly_summary(&records, &month, target) {
        Ok(rows) => render::print_monthly_summary(&rows, &month),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn overall(store: &CsvStore, target: Target) -> Result<()> {
    match overall_summary(&load(store)?, target) {
        Ok(stats) => render::print_overall(&stats, target),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn day(store: &CsvStore) -> Result<()> {
    let records = load(store)?;
    if records.is_empty() {
        println!("{}", SummaryError::EmptyStore);
        return Ok(());
    }
    let date = prompt("Date (YYYY-MM-DD)")?;
    match day_log(&records, &date) {
        Ok(entries) => render::print_day(&date, &entries),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn list(store: &CsvStore) -> Result<()> {
    let records = load(store)?;
    if records.is_empty() {
        println!("{}", SummaryError::EmptyStore);
    } else {
        render::print_list(&records);
    }
    Ok(())
}

/// Show the numbered listing and turn a 1-based answer into a 0-based
/// index. `None` when the store is empty or the answer is bad.
fn pick_entry(records: &[AttendanceRecord], verb: &str) -> Result<Option<usize>> {
    if records.is_empty() {
        println!("{}", SummaryError::EmptyStore);
        return Ok(None);
    }
    render::print_list(records);
    let answer = prompt(&format!("Entry number to {verb}"))?;
    match answer.parse::<usize>() {
        Ok(n) if (1..=records.len()).contains(&n) => Ok(Some(n - 1)),
        _ => {
            println!("No entry '{answer}'.");
            Ok(None)
        }
    }
}

fn delete(store: &CsvStore) -> Result<()> {
    let mut records = load(store)?;
    let Some(index) = pick_entry(&records, "delete")? else {
        return Ok(());
    };
    let removed = remove_at(&mut records, index)?;
    save(store, &records)?;
    println!(
        "Deleted {} | {} | {}",
        removed.date, removed.subject, removed.status
    );
    Ok(())
}

fn modify(store: &CsvStore) -> Result<()> {
    let mut records = load(store)?;
    let Some(index) = pick_entry(&records, "modify")? else {
        return Ok(());
    };
    let current = records[index].clone();

    let date = prompt_default("New date", &current.date)?;
    let subject = prompt_default("New subject", &current.subject)?;
    let status = loop {
        match prompt_default("New status", current.status.as_str())?.parse::<Status>() {
            Ok(s) => break s,
            Err(e) => println!("{e}"),
        }
    };

    match AttendanceRecord::new(date, subject, status) {
        Ok(record) => {
            replace_at(&mut records, index, record)?;
            save(store, &records)?;
            println!("Entry modified.");
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn delete_subject(store: &CsvStore) -> Result<()> {
    let mut records = load(store)?;
    if records.is_empty() {
        println!("{}", SummaryError::EmptyStore);
        return Ok(());
    }
    for subject in distinct_subjects(&records) {
        println!("- {subject}");
    }
    let subject = prompt("Subject to delete")?;
    let count = records.iter().filter(|r| r.subject == subject).count();
    if count == 0 {
        println!("No records for '{subject}'.");
        return Ok(());
    }
    if !confirm(&format!("Delete all {count} records for '{subject}'?"))? {
        println!("Aborted.");
        return Ok(());
    }
    remove_subject(&mut records, &subject);
    save(store, &records)?;
    println!("Deleted {count} records for '{subject}'.");
    Ok(())
}

fn reset(store: &CsvStore) -> Result<()> {
    if !confirm("This will delete ALL attendance data. Continue?")? {
        println!("Aborted.");
        return Ok(());
    }
    save(store, &[])?;
    println!("All data reset.");
    Ok(())
}
