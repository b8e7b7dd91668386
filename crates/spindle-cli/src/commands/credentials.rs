use anyhow::Result;
use spindle_catalog::config::mask;

use super::Context;

#[derive(Debug, clap::Subcommand)]
pub enum CredentialsCommand {
    /// Show which Discogs credentials are in effect
    Status,
    /// Save a personal access token (takes precedence over a key/secret pair)
    SetToken {
        #[arg(value_name = "TOKEN")]
        new_token: String,
    },
    /// Save a consumer key/secret pair
    SetConsumer {
        key: String,
        secret: String,
    },
    /// Remove saved credentials
    Clear {
        /// What to remove
        #[arg(value_enum, default_value_t = ClearTarget::All)]
        target: ClearTarget,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClearTarget {
    /// The personal access token
    Token,
    /// The consumer key/secret pair
    Consumer,
    /// Everything
    All,
}

pub fn run_credentials(ctx: &Context, command: CredentialsCommand) -> Result<()> {
    let store = ctx.credentials();

    match command {
        CredentialsCommand::Status => {
            let stored = store.load()?;
            let shown = |v: &Option<String>| v.as_deref().map(mask).unwrap_or_else(|| "<not set>".into());

            println!("Saved credentials");
            println!("=================\n");
            println!("  token:           {}", shown(&stored.token));
            println!("  consumer key:    {}", shown(&stored.consumer_key));
            println!("  consumer secret: {}", shown(&stored.consumer_secret));

            match ctx.config.credentials(&stored) {
                Some(creds) => println!("\nIn effect: {}", creds.mode()),
                None => {
                    println!("\nIn effect: none - Discogs search is unavailable");
                    println!("Run `spindle credentials set-token <TOKEN>` to configure it.");
                }
            }
        }
        CredentialsCommand::SetToken { new_token } => {
            store.set_token(&new_token)?;
            println!("✓ Saved Discogs token");
        }
        CredentialsCommand::SetConsumer { key, secret } => {
            if key.trim().is_empty() || secret.trim().is_empty() {
                anyhow::bail!("Both a consumer key and a consumer secret are required");
            }
            store.set_consumer_credentials(&key, &secret)?;
            println!("✓ Saved Discogs consumer key/secret");
        }
        CredentialsCommand::Clear { target } => {
            match target {
                ClearTarget::Token => store.clear_token()?,
                ClearTarget::Consumer => store.clear_consumer_credentials()?,
                ClearTarget::All => store.clear_all()?,
            }
            println!("✓ Cleared saved credentials");
        }
    }

    Ok(())
}
