//! Shared text rendering for the subcommand and menu front-ends.

use rollcall_core::{AttendanceRecord, Status, SubjectStats, Target};

pub fn print_subject_summary(rows: &[SubjectStats], target: Target) {
    for s in rows {
        println!("\n{}", s.subject);
        println!("  Total: {}, Present: {}", s.total, s.present);
        println!("  Attendance: {:.2}%", s.percentage);
        println!("  Classes needed for {}: {}", target, s.needed);
    }
}

// The monthly view deliberately omits the classes-needed line.
pub fn print_monthly_summary(rows: &[SubjectStats], month: &str) {
    for s in rows {
        println!("\n{} ({month})", s.subject);
        println!("  Total: {}, Present: {}", s.total, s.present);
        println!("  Attendance: {:.2}%", s.percentage);
    }
}

pub fn print_overall(stats: &SubjectStats, target: Target) {
    println!("=== OVERALL ATTENDANCE ===");
    println!("Total classes: {}", stats.total);
    println!("Present: {}", stats.present);
    println!("Attendance: {:.2}%", stats.percentage);
    println!("Classes needed for {}: {}", target, stats.needed);
}

pub fn print_day(date: &str, entries: &[(&str, Status)]) {
    println!("Records for {date}:");
    for (subject, status) in entries {
        println!("  {subject}: {status}");
    }
}

/// Numbered listing; entry numbers here are what `delete` and `modify`
/// take.
pub fn print_list(records: &[AttendanceRecord]) {
    for (i, r) in records.iter().enumerate() {
        println!("{}. {} | {} | {}", i + 1, r.date, r.subject, r.status);
    }
}
