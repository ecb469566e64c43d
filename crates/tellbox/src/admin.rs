// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tellbox admin` command implementation.
//!
//! Interactive admin console: a credential gate in front of a line-oriented
//! REPL over the feedback listing. A previously stored session skips the
//! login prompt; `logout` clears it, plain `quit` keeps it.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tellbox_client::auth::INVALID_CREDENTIALS;
use tellbox_client::listing::ROWS_PER_PAGE_OPTIONS;
use tellbox_client::{
    ApiClient, ClientSession, FeedbackListing, PendingFetch, StaticCredentialVerifier,
};
use tellbox_config::TellboxConfig;
use tellbox_core::{FeedbackRecord, SortDirection, TellboxError};

/// Characters of feedback text shown in the table before the ellipsis.
const FEEDBACK_PREVIEW_CHARS: usize = 40;

const HELP: &str = "\
Commands:
  next            go to the next page
  prev            go to the previous page
  page N          jump to page N (1-based)
  rows N          set rows per page (5, 10, 25, 50)
  sort asc|desc   order by submission time
  refresh         re-fetch the current page
  logout          clear the stored session and exit
  help            show this help
  quit            exit, staying logged in";

/// Runs the `tellbox admin` command.
pub async fn run_admin(config: &TellboxConfig) -> Result<(), TellboxError> {
    let mut session = ClientSession::load(config.client.session_path.as_str());
    let verifier = StaticCredentialVerifier::new(
        config.admin.username.as_str(),
        config.admin.password.as_str(),
    );

    let mut rl = DefaultEditor::new()
        .map_err(|e| TellboxError::Internal(format!("failed to start line editor: {e}")))?;

    if session.is_admin() {
        if let Some(admin) = session.admin() {
            println!(
                "{}",
                format!("Resumed admin session for {}", admin.username).dimmed()
            );
        }
    } else if !login(&mut rl, &mut session, &verifier).await? {
        return Ok(());
    }

    println!("{}", "Tellbox admin console".bold().green());
    println!("{}", "Type 'help' for commands.".dimmed());

    let client = ApiClient::new(config.client.base_url.as_str())?;
    let mut listing = FeedbackListing::new();
    let pending = listing.refresh();
    resolve(&mut listing, &client, pending).await;

    repl(&mut rl, &mut session, &client, &mut listing).await
}

/// Prompts for credentials until they verify or the operator cancels.
///
/// Returns false when the prompt was cancelled with Ctrl-C or Ctrl-D.
async fn login(
    rl: &mut DefaultEditor,
    session: &mut ClientSession,
    verifier: &StaticCredentialVerifier,
) -> Result<bool, TellboxError> {
    println!("{}", "Admin login".bold());

    loop {
        let username = match rl.readline("Username: ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Login cancelled.".dimmed());
                return Ok(false);
            }
            Err(e) => {
                return Err(TellboxError::Internal(format!(
                    "failed to read username: {e}"
                )));
            }
        };

        eprint!("Password: ");
        let password = rpassword::read_password()
            .map_err(|e| TellboxError::Internal(format!("failed to read password: {e}")))?;

        match session.login(verifier, &username, &password).await {
            Ok(()) => {
                println!("{}", "Login successful.".green());
                return Ok(true);
            }
            Err(e) if e.is_validation() => {
                eprintln!("{}", INVALID_CREDENTIALS.red());
            }
            Err(e) => return Err(e),
        }
    }
}

/// The command loop. Every state change fetches exactly once and redraws.
async fn repl(
    rl: &mut DefaultEditor,
    session: &mut ClientSession,
    client: &ApiClient,
    listing: &mut FeedbackListing,
) -> Result<(), TellboxError> {
    let prompt = format!("{}> ", "tellbox".green());

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match parse_command(line) {
                    Some(AdminCommand::Next) => {
                        if listing.page() + 1 >= listing.page_count() {
                            println!("Already on the last page.");
                        } else {
                            let pending = listing.set_page(listing.page() + 1);
                            resolve(listing, client, pending).await;
                        }
                    }
                    Some(AdminCommand::Prev) => {
                        if listing.page() == 0 {
                            println!("Already on the first page.");
                        } else {
                            let pending = listing.set_page(listing.page() - 1);
                            resolve(listing, client, pending).await;
                        }
                    }
                    Some(AdminCommand::Page(n)) => {
                        if n < 1 {
                            eprintln!("page must be at least 1");
                        } else {
                            // Commands are 1-based; the controller is 0-based.
                            let pending = listing.set_page(n - 1);
                            resolve(listing, client, pending).await;
                        }
                    }
                    Some(AdminCommand::Rows(n)) => {
                        if ROWS_PER_PAGE_OPTIONS.contains(&n) {
                            let pending = listing.set_rows_per_page(n);
                            resolve(listing, client, pending).await;
                        } else {
                            eprintln!("rows must be one of 5, 10, 25, 50");
                        }
                    }
                    Some(AdminCommand::Sort(direction)) => {
                        let pending = listing.set_sort(direction);
                        resolve(listing, client, pending).await;
                    }
                    Some(AdminCommand::Refresh) => {
                        let pending = listing.refresh();
                        resolve(listing, client, pending).await;
                    }
                    Some(AdminCommand::Logout) => {
                        session.logout()?;
                        println!("{}", "Logged out.".dimmed());
                        break;
                    }
                    Some(AdminCommand::Help) => println!("{HELP}"),
                    Some(AdminCommand::Quit) => {
                        println!("{}", "Goodbye.".dimmed());
                        break;
                    }
                    None => {
                        eprintln!("unknown command: {line} (try 'help')");
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}

/// Completes a pending fetch and redraws the table.
async fn resolve(listing: &mut FeedbackListing, client: &ApiClient, pending: PendingFetch) {
    listing.fetch(client, pending).await;
    print_listing(listing);
}

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminCommand {
    Next,
    Prev,
    Page(i64),
    Rows(i64),
    Sort(SortDirection),
    Refresh,
    Logout,
    Help,
    Quit,
}

/// Parses one input line. Returns None for anything unrecognized.
fn parse_command(line: &str) -> Option<AdminCommand> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }

    match (head, arg) {
        ("next" | "n", None) => Some(AdminCommand::Next),
        ("prev" | "p", None) => Some(AdminCommand::Prev),
        ("page", Some(n)) => n.parse().ok().map(AdminCommand::Page),
        ("rows", Some(n)) => n.parse().ok().map(AdminCommand::Rows),
        ("sort", Some(direction)) if direction.eq_ignore_ascii_case("asc") => {
            Some(AdminCommand::Sort(SortDirection::Ascending))
        }
        ("sort", Some(direction)) if direction.eq_ignore_ascii_case("desc") => {
            Some(AdminCommand::Sort(SortDirection::Descending))
        }
        ("refresh" | "r", None) => Some(AdminCommand::Refresh),
        ("logout", None) => Some(AdminCommand::Logout),
        ("help" | "?", None) => Some(AdminCommand::Help),
        ("quit" | "exit" | "q", None) => Some(AdminCommand::Quit),
        _ => None,
    }
}

/// Draws the current listing state: warning, table, status line.
fn print_listing(listing: &FeedbackListing) {
    if let Some(error) = listing.error() {
        eprintln!("{}", error.red());
    }

    if listing.items().is_empty() {
        println!("No feedback submissions yet");
    } else {
        println!("{}", header_line().bold());
        for record in listing.items() {
            println!("{}", record_line(record));
        }
    }

    println!("{}", footer_line(listing).dimmed());
}

fn header_line() -> String {
    format!(
        "{:<5} {:<22} {:<18} {:<24} {:<16} {:<6} FEEDBACK",
        "ID", "SUBMITTED", "NAME", "EMAIL", "PHONE", "RATING"
    )
}

fn record_line(record: &FeedbackRecord) -> String {
    format!(
        "{:<5} {:<22} {:<18} {:<24} {:<16} {:<6} {}",
        record.id,
        humanize_timestamp(&record.created_at),
        truncate(&record.name, 18),
        truncate(&record.email, 24),
        truncate(&record.phone, 16),
        stars(record.rating),
        truncate(&record.feedback, FEEDBACK_PREVIEW_CHARS),
    )
}

/// Renders the pagination status line under the table.
fn footer_line(listing: &FeedbackListing) -> String {
    format!(
        "Page {} of {} | {} rows per page | sort {} | Total: {}",
        listing.page() + 1,
        listing.page_count().max(1),
        listing.rows_per_page(),
        listing.sort(),
        listing.total()
    )
}

/// Formats a stored timestamp like "Aug 23, 2026, 02:30 PM".
///
/// Falls back to the raw string when it does not parse.
fn humanize_timestamp(created_at: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(created_at) {
        Ok(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// Renders a 1-5 rating as filled and empty stars.
fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Truncates to at most `max` characters, ellipsis included.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellbox_client::ListingPage;

    fn record(id: i64, name: &str) -> FeedbackRecord {
        FeedbackRecord {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+1 555 010 0100".to_string(),
            rating: 4,
            feedback: "Great service, friendly staff, would absolutely come back".to_string(),
            created_at: "2026-08-23T14:30:00.000Z".to_string(),
        }
    }

    fn listing_with(total: i64, records: Vec<FeedbackRecord>) -> FeedbackListing {
        let mut listing = FeedbackListing::new();
        let pending = listing.refresh();
        let applied = listing.apply(
            &pending,
            Ok(ListingPage {
                data: records,
                total,
                page: 0,
                limit: 10,
                sort: SortDirection::Descending,
            }),
        );
        assert!(applied);
        listing
    }

    #[test]
    fn parse_command_recognizes_every_command() {
        assert_eq!(parse_command("next"), Some(AdminCommand::Next));
        assert_eq!(parse_command("n"), Some(AdminCommand::Next));
        assert_eq!(parse_command("prev"), Some(AdminCommand::Prev));
        assert_eq!(parse_command("page 3"), Some(AdminCommand::Page(3)));
        assert_eq!(parse_command("rows 25"), Some(AdminCommand::Rows(25)));
        assert_eq!(
            parse_command("sort asc"),
            Some(AdminCommand::Sort(SortDirection::Ascending))
        );
        assert_eq!(
            parse_command("sort DESC"),
            Some(AdminCommand::Sort(SortDirection::Descending))
        );
        assert_eq!(parse_command("refresh"), Some(AdminCommand::Refresh));
        assert_eq!(parse_command("logout"), Some(AdminCommand::Logout));
        assert_eq!(parse_command("help"), Some(AdminCommand::Help));
        assert_eq!(parse_command("?"), Some(AdminCommand::Help));
        assert_eq!(parse_command("quit"), Some(AdminCommand::Quit));
        assert_eq!(parse_command("exit"), Some(AdminCommand::Quit));
    }

    #[test]
    fn parse_command_rejects_malformed_input() {
        assert_eq!(parse_command("bogus"), None);
        assert_eq!(parse_command("page"), None);
        assert_eq!(parse_command("page x"), None);
        assert_eq!(parse_command("rows ten"), None);
        assert_eq!(parse_command("sort sideways"), None);
        assert_eq!(parse_command("next please"), None);
        assert_eq!(parse_command("page 1 2"), None);
    }

    #[test]
    fn stars_clamp_out_of_range_ratings() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(-2), "☆☆☆☆☆");
    }

    #[test]
    fn truncate_is_char_boundary_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("a little bit too long", 10), "a littl...");
        // Multibyte input must not split a character.
        assert_eq!(truncate("日本語のフィードバックです", 5), "日本...");
    }

    #[test]
    fn humanize_timestamp_formats_stored_instants() {
        assert_eq!(
            humanize_timestamp("2026-08-23T14:30:00.000Z"),
            "Aug 23, 2026, 02:30 PM"
        );
        assert_eq!(
            humanize_timestamp("2026-01-05T09:04:00.000Z"),
            "Jan 5, 2026, 09:04 AM"
        );
        // Unparseable input falls through untouched.
        assert_eq!(humanize_timestamp("not-a-date"), "not-a-date");
    }

    #[test]
    fn footer_reports_one_based_pages() {
        let listing = listing_with(42, vec![record(1, "Ann")]);
        assert_eq!(
            footer_line(&listing),
            "Page 1 of 5 | 10 rows per page | sort desc | Total: 42"
        );
    }

    #[test]
    fn footer_on_a_fresh_listing_shows_a_single_page() {
        let listing = FeedbackListing::new();
        assert_eq!(
            footer_line(&listing),
            "Page 1 of 1 | 10 rows per page | sort desc | Total: 0"
        );
    }

    #[test]
    fn record_line_shows_stars_date_and_truncated_feedback() {
        let line = record_line(&record(7, "Ann"));
        assert!(line.starts_with("7"));
        assert!(line.contains("Aug 23, 2026, 02:30 PM"));
        assert!(line.contains("Ann"));
        assert!(line.contains("★★★★☆"));
        assert!(line.ends_with("..."));
        assert!(!line.contains("absolutely come back"));
    }
}
