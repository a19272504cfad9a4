//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tamis")]
#[command(version)]
#[command(about = "Sign in to a Tamis server and link a Google account")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the authentication API (overrides settings and TAMIS_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Session file to use instead of the per-user default
    #[arg(long, global = true, env = "TAMIS_SESSION_FILE", value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Settings file to use instead of the per-user default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create an account
    Register {
        /// Account email
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        username: String,
        /// Account password
        #[arg(long, env = "TAMIS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "TAMIS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Link a Google account to the signed-in user
    LinkGoogle {
        /// Wait on the local callback listener and finish the link
        #[arg(long)]
        wait: bool,
    },

    /// Finish a Google link from the redirect URL or its query string
    Callback {
        /// e.g. "http://127.0.0.1:3001/oauth/callback?code=...&state=..."
        #[arg(value_name = "URL_OR_QUERY")]
        redirect: String,
    },

    /// Exchange the stored token for a fresh one
    Refresh,

    /// Forget the stored token
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Check that the server is up
    Health,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub const fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_login_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tamis",
            "login",
            "--email",
            "a@b.c",
            "--password",
            "pw",
            "--api-url",
            "http://api:9000",
            "-vv",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Login {
                email: "a@b.c".to_string(),
                password: "pw".to_string()
            }
        );
        assert_eq!(cli.api_url.as_deref(), Some("http://api:9000"));
        assert_eq!(cli.default_log_level(), "debug");
    }

    #[test]
    fn parses_link_google_wait() {
        let cli = Cli::try_parse_from(["tamis", "link-google", "--wait"]).unwrap();
        assert_eq!(cli.command, Command::LinkGoogle { wait: true });
        assert_eq!(cli.default_log_level(), "warn");
    }

    #[test]
    fn callback_takes_the_redirect() {
        let cli = Cli::try_parse_from(["tamis", "callback", "?code=abc"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Callback {
                redirect: "?code=abc".to_string()
            }
        );
    }

    #[test]
    fn register_requires_username() {
        assert!(
            Cli::try_parse_from(["tamis", "register", "--email", "a@b.c", "--password", "pw"])
                .is_err()
        );
    }
}
