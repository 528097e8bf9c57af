//! Unit tests for account domain validation.

use crate::account::domain::{AccountDomainError, EmailAddress, User};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[case("dev@example.com")]
#[case("  padded@example.com  ")]
#[case("first.last@sub.example.org")]
fn email_accepts_plausible_addresses(#[case] raw: &str) -> eyre::Result<()> {
    let email = EmailAddress::new(raw)?;
    ensure!(email.as_str() == raw.trim());
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("missing-at-sign")]
#[case("@example.com")]
#[case("local@")]
#[case("two@at@signs")]
#[case("spaced local@example.com")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    let result = EmailAddress::new(raw);
    assert_eq!(result, Err(AccountDomainError::InvalidEmail(raw.to_owned())));
}

#[rstest]
fn user_requires_non_empty_username() {
    let result = User::new("   ");
    assert_eq!(result, Err(AccountDomainError::EmptyUsername));
}

#[rstest]
fn user_builder_sets_contact_fields() -> eyre::Result<()> {
    let email = EmailAddress::new("ada@example.com")?;
    let user = User::new("ada")?
        .with_email(email.clone())
        .with_display_name("Ada", "Lovelace");

    ensure!(user.username() == "ada");
    ensure!(user.first_name() == "Ada");
    ensure!(user.last_name() == "Lovelace");
    if user.email() != Some(&email) {
        bail!("expected stored email, got {:?}", user.email());
    }
    Ok(())
}

#[rstest]
fn user_without_email_resolves_none() -> eyre::Result<()> {
    let user = User::new("ghost")?;
    ensure!(user.email().is_none());
    Ok(())
}
