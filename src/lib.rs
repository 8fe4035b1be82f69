//! Prbar: pull request menu for status-bar hosts.
//!
//! Searches GitHub for open pull requests awaiting the user's review and
//! those the user authored, narrows them to the configured organisations,
//! repositories and authors, and renders them in the host's line-oriented
//! menu format.

pub mod cli;
pub mod display;
pub mod error;
pub mod github;
pub mod graphql;
pub mod menu;
pub mod query;
pub mod scope;
pub mod search;
pub mod types;

pub use cli::{Config, Credentials, parse_args, parse_flags};
pub use display::{Palette, missing_credentials_menu, render_menu, search_error_menu};
pub use error::{ErrorKind, SearchError, SearchResult};
pub use github::GitHub;
pub use menu::{Attribute, Color, MenuLine, write_menu};
pub use query::run;
pub use scope::{ScopeConfig, apply_scope};
pub use search::build_search_query;
pub use types::{Forge, PullRequest, SearchIntent, SearchPage};
