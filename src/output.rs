//! User-facing console lines for the CLI. Colors only when stdout is a TTY.

use owo_colors::OwoColorize;

use crate::job::{CleanupStatus, MoveStatus};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

#[derive(Clone, Copy)]
enum Tag {
    Info,
    Warn,
    Error,
    Ok,
}

fn emit(tag: Tag, msg: &str) {
    let plain = match tag {
        Tag::Info => "info:",
        Tag::Warn => "warn:",
        Tag::Error => "error:",
        Tag::Ok => "ok:",
    };
    let to_stderr = matches!(tag, Tag::Warn | Tag::Error);
    let line = if is_tty() {
        let colored = match tag {
            Tag::Info => plain.cyan().bold().to_string(),
            Tag::Warn => plain.yellow().bold().to_string(),
            Tag::Error => plain.red().bold().to_string(),
            Tag::Ok => plain.green().bold().to_string(),
        };
        format!("{colored} {msg}")
    } else {
        format!("{plain} {msg}")
    };
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tag::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tag::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tag::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tag::Ok, msg);
}

/// One summary line per finished job.
pub fn print_move_status(job: &str, status: MoveStatus) {
    match status {
        MoveStatus::Success => print_success(&format!("move for {job}: success")),
        MoveStatus::Failure => print_error(&format!("move for {job}: failure")),
        MoveStatus::None => print_warn(&format!("move for {job}: not run")),
    }
}

pub fn print_cleanup_status(job: &str, status: CleanupStatus) {
    match status {
        CleanupStatus::Success => print_success(&format!("cleanup for {job}: success")),
        CleanupStatus::Failure => print_error(&format!("cleanup for {job}: failure")),
        CleanupStatus::None => print_warn(&format!("cleanup for {job}: not run")),
    }
}
