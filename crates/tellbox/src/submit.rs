// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tellbox submit` command implementation.
//!
//! Drives the feedback form controller from command-line flags. The flags
//! default to empty so the controller's own validation reports missing
//! fields the same way the form does; validation failures never touch the
//! network.

use clap::Args;
use colored::Colorize;
use tellbox_client::{ApiClient, FeedbackForm, FieldErrors, Notice};
use tellbox_config::TellboxConfig;
use tellbox_core::TellboxError;

/// Flags for `tellbox submit`.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Your name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Contact email address.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Contact phone number.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Rating from 1 (poor) to 5 (excellent).
    #[arg(long, default_value_t = 0)]
    pub rating: i64,

    /// The feedback text, at least 10 characters.
    #[arg(long, default_value = "")]
    pub feedback: String,
}

/// Runs the `tellbox submit` command.
pub async fn run_submit(config: &TellboxConfig, args: &SubmitArgs) -> Result<(), TellboxError> {
    let client = ApiClient::new(config.client.base_url.as_str())?;

    let mut form = FeedbackForm::new();
    form.set_name(args.name.as_str());
    form.set_email(args.email.as_str());
    form.set_phone(args.phone.as_str());
    form.set_rating(args.rating);
    form.set_feedback(args.feedback.as_str());

    if form.submit(&client).await {
        if let Some(Notice::Success(message)) = form.notice() {
            println!("{}", message.green());
        }
        if let Some(record) = form.created() {
            println!(
                "  #{} {} <{}> rated {}/5",
                record.id, record.name, record.email, record.rating
            );
            println!("  recorded at {}", record.created_at);
        }
        return Ok(());
    }

    match form.notice() {
        Some(Notice::Failure(message)) => {
            // The request was sent but the API rejected it or was unreachable.
            eprintln!("{}", message.red());
            Err(TellboxError::Http {
                message: "submission was not delivered".to_string(),
                source: None,
            })
        }
        _ => {
            // Local validation failed; nothing was sent.
            for line in field_error_lines(form.errors()) {
                eprintln!("  {}", line.red());
            }
            Err(TellboxError::validation("feedback was not submitted"))
        }
    }
}

/// Flattens field errors into printable lines, in form field order.
fn field_error_lines(errors: &FieldErrors) -> Vec<String> {
    [
        errors.name.as_deref(),
        errors.email.as_deref(),
        errors.phone.as_deref(),
        errors.rating.as_deref(),
        errors.feedback.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect()
}
