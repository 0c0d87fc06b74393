//! Startup entry point.
//!
//! # Responsibility
//! - Open and initialize the store at the configured path.
//! - Offer a line-based login probe: each stdin line `username password`
//!   is authenticated and the resolved role context is printed.
//!
//! # Invariants
//! - A store failure at startup is fatal (exit status 1, no retry).

use school_erp_core::{open_db, AppConfig, Session, SessionContext};
use std::io::BufRead;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = AppConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = school_erp_core::init_logging(&config.log_level, &log_dir.to_string_lossy())
        {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("event=startup module=cli status=error error={err}");
            eprintln!(
                "cannot open store at {}: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    println!(
        "school_erp {} store={}",
        school_erp_core::core_version(),
        config.db_path.display()
    );
    println!("login: enter `username password` per line");

    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let Some((username, password)) = parse_login_line(&line) else {
            println!("enter username and password");
            continue;
        };

        let session = match Session::login(&conn, username, password) {
            Ok(session) => session,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match session.context() {
            Ok(SessionContext::Admin(_)) => println!("admin context: user {}", session.user().id),
            Ok(SessionContext::Teacher(ctx)) => {
                println!("teacher context: {}", ctx.teacher().name);
                if let Ok(subjects) = ctx.assigned_subjects() {
                    for subject in subjects {
                        println!("  {} {}", subject.code, subject.name);
                    }
                }
            }
            Ok(SessionContext::Student(ctx)) => {
                let student = ctx.student();
                println!("student context: {} (roll {})", student.name, student.roll_no);
            }
            Err(err) => println!("{err}"),
        }
        session.logout();
    }

    ExitCode::SUCCESS
}

/// Splits `username password` at the first whitespace run; the rest of the
/// line, inner spaces included, is the password.
fn parse_login_line(line: &str) -> Option<(&str, &str)> {
    let (username, password) = line.trim().split_once(char::is_whitespace)?;
    let password = password.trim_start();
    if password.is_empty() {
        return None;
    }
    Some((username, password))
}

#[cfg(test)]
mod tests {
    use super::parse_login_line;

    #[test]
    fn password_keeps_inner_spaces() {
        assert_eq!(
            parse_login_line("  t1   correct horse battery  "),
            Some(("t1", "correct horse battery"))
        );
    }

    #[test]
    fn missing_password_is_rejected() {
        assert_eq!(parse_login_line("t1"), None);
        assert_eq!(parse_login_line("t1   "), None);
        assert_eq!(parse_login_line(""), None);
    }
}
