use anyhow::Result;
use clap::{Command, CommandFactory, FromArgMatches, Parser};

use crate::scope::ScopeConfig;

/// Environment variable the host sets to `1` when the menu bar is dark.
pub const DARK_MODE_ENV: &str = "BitBarDarkMode";

const DEFAULT_FILTERS: &str = "draft:false";

#[derive(Parser, Debug)]
#[command(
    name = "prbar",
    version,
    about = "Show pull requests awaiting your review, and the ones you opened, in a status-bar menu"
)]
struct CliArgs {
    /// Personal access token with the `repo` scope
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Your GitHub login
    #[arg(long, env = "GITHUB_LOGIN", value_name = "LOGIN")]
    pub login: Option<String>,

    /// Grey out PRs carrying this label (e.g. 'in progress')
    #[arg(long, env = "WIP_LABEL", value_name = "LABEL")]
    pub wip_label: Option<String>,

    /// Extra search terms appended to both queries (e.g. 'org:acme -label:dropped draft:false')
    #[arg(
        long,
        env = "FILTERS",
        default_value = DEFAULT_FILTERS,
        allow_hyphen_values = true,
        value_name = "SEARCH-TERMS"
    )]
    pub filters: String,

    /// Only show PRs in these organisations (can specify multiple or comma-separated)
    #[arg(
        long = "target-org",
        env = "TARGET_ORGS",
        value_delimiter = ',',
        value_name = "ORG"
    )]
    pub target_orgs: Vec<String>,

    /// Only show PRs in these repositories (can specify multiple or comma-separated)
    #[arg(
        long = "target-repo",
        env = "TARGET_REPOS",
        value_delimiter = ',',
        value_name = "OWNER/REPO"
    )]
    pub target_repos: Vec<String>,

    /// Only show PRs authored by these users (can specify multiple or comma-separated)
    #[arg(
        long = "target-user",
        env = "TARGET_USERS",
        value_delimiter = ',',
        value_name = "USERNAME"
    )]
    pub target_users: Vec<String>,
}

/// Access token and login, both known to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub access_token: &'a str,
    pub login: &'a str,
}

/// Everything a run needs, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub access_token: Option<String>,
    pub login: Option<String>,
    pub scope: ScopeConfig,
    pub dark_mode: bool,
}

impl Config {
    /// Returns the credentials, or `None` when either is missing.
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        match (self.access_token.as_deref(), self.login.as_deref()) {
            (Some(access_token), Some(login)) => Some(Credentials {
                access_token,
                login,
            }),
            _ => None,
        }
    }
}

/// Interprets the host's dark-mode variable. Only `1` enables it.
pub fn dark_mode_from_env(value: Option<&str>) -> bool {
    value == Some("1")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn collect_targets<C: FromIterator<String>>(values: Vec<String>) -> C {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn build_config(cli: CliArgs, dark_mode: bool) -> Config {
    Config {
        access_token: non_blank(cli.access_token),
        login: non_blank(cli.login),
        scope: ScopeConfig {
            target_orgs: collect_targets(cli.target_orgs),
            target_repos: collect_targets(cli.target_repos),
            target_users: collect_targets(cli.target_users),
            wip_label: cli.wip_label.unwrap_or_default(),
            extra_search_filters: cli.filters,
        },
        dark_mode,
    }
}

/// Builds the argument parser. With `read_env` unset, options fall back
/// only to their defaults, never to the process environment.
fn command(read_env: bool) -> Command {
    let command = CliArgs::command();
    if read_env {
        command
    } else {
        command.mut_args(|arg| arg.env(None::<&'static str>))
    }
}

fn parse_with<I, T>(args: I, read_env: bool, dark_mode: bool) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command(read_env).try_get_matches_from(args)?;
    let cli = CliArgs::from_arg_matches(&matches)?;
    Ok(build_config(cli, dark_mode))
}

/// Parses command-line flags alone into a `Config`, ignoring environment
/// fallbacks and taking the dark-mode flag as given.
pub fn parse_flags<I, T>(args: I, dark_mode: bool) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    parse_with(args, false, dark_mode)
}

/// Parses arguments into a `Config`, falling back to the plugin's
/// environment variables and reading dark mode from the host.
pub fn parse_args<I, T>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let dark_mode = dark_mode_from_env(std::env::var(DARK_MODE_ENV).ok().as_deref());
    parse_with(args, true, dark_mode)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["prbar", "--access-token", "t0k3n", "--login", "octocat"];
        argv.extend_from_slice(args);
        parse_flags(argv, false).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.access_token.as_deref(), Some("t0k3n"));
        assert_eq!(config.login.as_deref(), Some("octocat"));
        assert_eq!(config.scope.extra_search_filters, "draft:false");
        assert_eq!(config.scope.wip_label, "");
        assert!(config.scope.is_unrestricted());
        assert!(!config.dark_mode);
    }

    #[test]
    fn test_target_lists_split_and_trimmed() {
        let config = parse(&[
            "--target-org",
            "acme, other,,",
            "--target-org",
            "third",
            "--target-repo",
            "acme/widgets",
            "--target-user",
            "alice,bob",
        ]);
        assert_eq!(
            config.scope.target_orgs,
            HashSet::from(["acme".to_string(), "other".to_string(), "third".to_string()])
        );
        assert_eq!(
            config.scope.target_repos,
            HashSet::from(["acme/widgets".to_string()])
        );
        assert_eq!(
            config.scope.target_users,
            HashSet::from(["alice".to_string(), "bob".to_string()])
        );
    }

    #[test]
    fn test_filters_may_start_with_hyphen() {
        let config = parse(&["--filters", "-label:dropped draft:false"]);
        assert_eq!(
            config.scope.extra_search_filters,
            "-label:dropped draft:false"
        );
    }

    #[test]
    fn test_wip_label() {
        let config = parse(&["--wip-label", "in progress"]);
        assert_eq!(config.scope.wip_label, "in progress");
    }

    #[test]
    fn test_blank_credentials_are_missing() {
        let config =
            parse_flags(["prbar", "--access-token", "  ", "--login", "octocat"], false)
                .unwrap();
        assert_eq!(config.access_token, None);
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_credentials_present() {
        let config = parse(&[]);
        assert_eq!(
            config.credentials(),
            Some(Credentials {
                access_token: "t0k3n",
                login: "octocat"
            })
        );
    }

    #[test]
    fn test_missing_login_means_no_credentials() {
        let config = Config {
            access_token: Some("t0k3n".to_string()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_dark_mode_only_for_one() {
        assert!(dark_mode_from_env(Some("1")));
        assert!(!dark_mode_from_env(Some("0")));
        assert!(!dark_mode_from_env(Some("true")));
        assert!(!dark_mode_from_env(None));
    }

    #[test]
    fn test_dark_mode_passed_through() {
        let config =
            parse_flags(["prbar", "--access-token", "t", "--login", "l"], true)
                .unwrap();
        assert!(config.dark_mode);
    }

    #[test]
    fn test_env_fallbacks_only_when_reading_env() {
        let env_of = |read_env: bool, id: &str| {
            command(read_env)
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env().map(|e| e.to_os_string()))
        };
        assert_eq!(
            env_of(true, "target_orgs"),
            Some(std::ffi::OsString::from("TARGET_ORGS"))
        );
        assert_eq!(
            env_of(true, "access_token"),
            Some(std::ffi::OsString::from("ACCESS_TOKEN"))
        );
        assert_eq!(env_of(false, "target_orgs"), None);
        assert_eq!(env_of(false, "wip_label"), None);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(parse_flags(["prbar", "--bogus"], false).is_err());
    }
}
