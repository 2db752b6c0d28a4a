//! Create, edit and get commands

use clap::{Args, ValueEnum};
use gitissue_github::{GitHubClient, Issue, IssueDraft, IssuePatch, IssueState};

use crate::token::TokenStore;

/// Create an issue
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository (owner/repo format)
    #[arg(short, long)]
    pub repo: String,

    /// Title of the issue
    #[arg(short, long)]
    pub title: String,

    /// Body of the issue
    #[arg(short, long, default_value = "")]
    pub body: String,

    /// Label to attach
    #[arg(short, long)]
    pub label: Option<String>,
}

/// Edit an issue's state or label
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Repository (owner/repo format)
    #[arg(short, long)]
    pub repo: String,

    /// Issue number
    #[arg(short = 'i', long)]
    pub number: u64,

    /// New state ("closed" to close the issue)
    #[arg(short, long)]
    pub state: Option<StateArg>,

    /// New label
    #[arg(short, long)]
    pub label: Option<String>,
}

/// Show a single issue
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repository (owner/repo format)
    #[arg(short, long)]
    pub repo: String,

    /// Issue number
    #[arg(short = 'i', long)]
    pub number: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateArg {
    Open,
    Closed,
}

impl From<StateArg> for IssueState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Open => IssueState::Open,
            StateArg::Closed => IssueState::Closed,
        }
    }
}

fn client_for(repo: &str, store: &TokenStore) -> anyhow::Result<GitHubClient> {
    let token = store.load()?;
    Ok(GitHubClient::new(repo, token)?)
}

impl CreateArgs {
    pub async fn execute(&self, store: &TokenStore) -> anyhow::Result<()> {
        let client = client_for(&self.repo, store)?;

        let draft = IssueDraft {
            title: self.title.clone(),
            body: self.body.clone(),
            label: self.label.clone(),
        };
        let location = client.create_issue(&draft).await?;

        println!("New issue created at {location}");
        Ok(())
    }
}

impl EditArgs {
    pub async fn execute(&self, store: &TokenStore) -> anyhow::Result<()> {
        if self.state.is_none() && self.label.is_none() {
            anyhow::bail!("nothing to edit: pass --state and/or --label");
        }

        let client = client_for(&self.repo, store)?;

        let patch = IssuePatch {
            number: self.number,
            state: self.state.map(IssueState::from),
            label: self.label.clone(),
        };
        client.edit_issue(&patch).await?;

        println!("Issue #{} edited successfully", self.number);
        Ok(())
    }
}

impl GetArgs {
    pub async fn execute(&self, store: &TokenStore, verbose: bool) -> anyhow::Result<()> {
        let client = client_for(&self.repo, store)?;

        if verbose {
            println!(
                "Fetching issue #{} from {}/{}...",
                self.number,
                client.owner(),
                client.repo()
            );
        }

        let issue = client.get_issue(self.number).await?;
        print_issue(&issue);
        Ok(())
    }
}

fn print_issue(issue: &Issue) {
    println!("#{}: {}", issue.number, issue.title);
    println!("URL: {}", issue.html_url);
    println!("State: {}", issue.state);
    if let Some(user) = &issue.user {
        println!("Author: {} ({})", user.login, user.html_url);
    }
    if let Some(assignee) = &issue.assignee {
        println!("Assignee: {}", assignee.login);
    }
    if let Some(label) = &issue.label {
        println!("Label: {label}");
    }
    println!("Created: {}", issue.created_at.format("%Y-%m-%d %H:%M UTC"));

    if let Some(body) = issue.body.as_deref().filter(|b| !b.is_empty()) {
        println!();
        for line in body.lines() {
            println!("  {line}");
        }
    }
}
