//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sharif_net::Overrides;

#[derive(Parser, Debug)]
#[command(name = "sharif-net", version, about = "Sharif captive portal login and session monitor")]
pub struct Cli {
    /// Config file (defaults to ~/.sharif-net.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Address the portal by IP instead of its domain (accepts invalid certificates)
    #[arg(long, global = true)]
    pub use_ip: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in to the portal, optionally staying alive to re-login on connectivity loss
    Login(LoginArgs),

    /// Print the current session status
    Status,

    /// Close the current portal session
    Logout,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(short, long, env = "SHARIF_NET_USERNAME")]
    pub username: Option<String>,

    #[arg(short, long, env = "SHARIF_NET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Keep monitoring the connection and log in again when it drops
    #[arg(short, long)]
    pub alive: bool,
}

impl Cli {
    /// Explicit values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            use_ip: self.use_ip,
            ..Overrides::default()
        };
        if let Command::Login(args) = &self.command {
            overrides.username = args.username.clone();
            overrides.password = args.password.clone();
            overrides.alive = args.alive;
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn login_flags_become_overrides() {
        let cli = Cli::parse_from([
            "sharif-net", "--use-ip", "login", "-u", "alice", "-p", "secret", "-a",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.username.as_deref(), Some("alice"));
        assert_eq!(overrides.password.as_deref(), Some("secret"));
        assert!(overrides.alive);
        assert!(overrides.use_ip);
    }

    #[test]
    fn status_carries_no_credentials() {
        let cli = Cli::parse_from(["sharif-net", "status", "--config", "/tmp/x.toml"]);
        assert!(matches!(cli.command, Command::Status));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
        assert!(cli.overrides().username.is_none());
    }
}
