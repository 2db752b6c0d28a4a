//! Token generation command

use std::io::Write;

use anyhow::Context;
use clap::Args;

use crate::token::TokenStore;

/// Generate an OAuth token for your GitHub account
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Reminder note attached to the token on github.com
    pub note: String,
}

impl AuthArgs {
    /// Prompt for credentials, exchange them for a token, store it
    pub async fn execute(&self, store: &TokenStore) -> anyhow::Result<()> {
        let username = prompt_username()?;
        let password = rpassword::prompt_password("Password: ").context("failed to read password")?;

        let token = gitissue_github::issue_token(&username, &password, &self.note).await?;
        store.store(&token)?;

        println!("Token generated and stored in {}", store.path().display());
        Ok(())
    }
}

fn prompt_username() -> anyhow::Result<String> {
    print!("Username: ");
    std::io::stdout().flush()?;

    let mut username = String::new();
    std::io::stdin()
        .read_line(&mut username)
        .context("failed to read username")?;

    let username = username.trim().to_string();
    if username.is_empty() {
        anyhow::bail!("username must not be empty");
    }
    Ok(username)
}
