//! Issue search command

use clap::Args;
use gitissue_github::GitHubClient;

use crate::token::TokenStore;

/// Search a repository's issues
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Repository (owner/repo format)
    #[arg(short, long)]
    pub repo: String,

    /// Search filter (e.g. "open", "closed")
    #[arg(short, long)]
    pub filter: Option<String>,
}

impl SearchArgs {
    pub async fn execute(&self, store: &TokenStore, verbose: bool) -> anyhow::Result<()> {
        let token = store.load()?;
        let client = GitHubClient::new(&self.repo, token)?;

        if verbose {
            println!("Searching issues in {}/{}...", client.owner(), client.repo());
        }

        let results = client.search_issues(self.filter.as_deref()).await?;

        for issue in &results.items {
            let login = issue.user.as_ref().map_or("-", |u| u.login.as_str());
            println!("# {} {} {}", issue.number, login, issue.title);
        }
        println!(
            "{} issues: items returned {}",
            results.total_count,
            results.items.len()
        );

        Ok(())
    }
}
