//! User commands: add, reset, status, list, rm.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Password};
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{output, Context};
use crate::core::constants::{
    CLEARTEXT_PASSWORD, HASH_MASK_KEEP, NT_PASSWORD, SECRET_MASK_KEEP,
};
use crate::core::domain::{Attribute, Credentials, Record};
use crate::core::mask::mask_secret;
use crate::error::{Result, StoreError, ValidationError};

/// Create a user.
pub fn add(ctx: &Context, user: &str, prompt: bool, hash: Option<&str>) -> Result<()> {
    let username = ctx.username(user)?;
    info!("Adding user: {}", username);

    let secret = if prompt {
        Some(read_secret(&username)?)
    } else {
        None
    };

    let creds = ctx
        .store
        .add(&username, secret.as_deref().map(String::as_str), hash)?;

    output::success(&format!("added {}", output::key(&username)));
    show_issued(&creds, secret.is_none());
    Ok(())
}

/// Issue a new password for an existing user.
pub fn reset(ctx: &Context, user: &str, prompt: bool) -> Result<()> {
    let username = ctx.username(user)?;
    info!("Resetting password: {}", username);

    let secret = if prompt {
        Some(read_secret(&username)?)
    } else {
        None
    };

    let creds = ctx
        .store
        .update_secret(&username, secret.as_deref().map(String::as_str))?;

    output::success(&format!("password updated for {}", output::key(&username)));
    show_issued(&creds, secret.is_none());
    Ok(())
}

/// Show one user's entry with credential values masked.
pub fn status(ctx: &Context, user: &str, json: bool) -> Result<()> {
    let username = ctx.username(user)?;
    let record = ctx
        .store
        .get(&username)?
        .ok_or_else(|| StoreError::NotFound(username.clone()))?;

    let shown = masked(&record, ctx.reveal_secrets());
    if json {
        output::data(&serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    output::header(&output::key(shown.username()));
    output::rule();
    for attribute in shown.attributes() {
        output::kv(attribute.name(), attribute.value());
    }
    if shown.secret().is_none() {
        output::warn("no password attribute");
    }
    Ok(())
}

/// List all users.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let records = ctx.store.list()?;

    if json {
        let users: Vec<_> = records.iter().map(Record::username).collect();
        let result = serde_json::json!({
            "users": users,
            "count": records.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if records.is_empty() {
        output::dimmed("no users stored");
    } else {
        output::blank();
        output::header(&format!("{} users", output::count(records.len())));
        output::rule();
        for record in &records {
            let kind = record.secret().map_or("no password", |s| s.name());
            output::kv(&output::key(record.username()), kind);
        }
    }

    Ok(())
}

/// Delete a user.
pub fn rm(ctx: &Context, user: &str, yes: bool) -> Result<()> {
    let username = ctx.username(user)?;

    if !yes && io::stdin().is_terminal() && !confirm_delete(&username)? {
        output::dimmed("cancelled");
        return Ok(());
    }

    info!("Deleting user: {}", username);
    if !ctx.store.delete(&username)? {
        return Err(StoreError::NotFound(username).into());
    }

    output::success(&format!("removed {}", output::key(&username)));
    Ok(())
}

/// Read a secret from a pipe, or prompt for it twice on a terminal.
fn read_secret(username: &str) -> Result<Zeroizing<String>> {
    let value = if !io::stdin().is_terminal() {
        let mut input = Zeroizing::new(String::new());
        io::stdin().read_line(&mut input)?;
        Zeroizing::new(input.trim_end_matches(['\r', '\n']).to_string())
    } else {
        Zeroizing::new(
            Password::new()
                .with_prompt(format!("Password for {}", output::key(username)))
                .with_confirmation("Repeat password", "passwords do not match")
                .interact()?,
        )
    };

    if value.is_empty() {
        return Err(ValidationError::EmptySecret.into());
    }
    Ok(value)
}

fn confirm_delete(username: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Delete {}?", username))
        .default(false)
        .interact()
        .map_err(Into::into)
}

/// Print what was issued. Generated passwords are shown once.
fn show_issued(creds: &Credentials, generated: bool) {
    match creds.secret() {
        Some(secret) if generated => {
            output::kv("password", secret);
            output::hint("this password is not stored and will not be shown again");
        }
        Some(_) => {}
        None => output::dimmed("hash imported, no password known"),
    }
}

/// Copy of `record` with credential attributes masked.
fn masked(record: &Record, reveal: bool) -> Record {
    let mut shown = Record::new(record.username(), record.source_range());
    for attribute in record.attributes() {
        let value = match attribute.name() {
            NT_PASSWORD => mask_secret(attribute.value(), HASH_MASK_KEEP, reveal),
            CLEARTEXT_PASSWORD => mask_secret(attribute.value(), SECRET_MASK_KEEP, reveal),
            _ => attribute.value().to_string(),
        };
        shown.push(Attribute::new(attribute.name(), value));
    }
    shown
}
