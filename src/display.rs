use chrono::{DateTime, Utc};

use crate::{
    error::SearchError,
    menu::{Color, MenuLine},
    scope::ScopeConfig,
    types::PullRequest,
};

const REVIEW_REQUESTED_GLYPH: &str = "👀";
const AUTHORED_GLYPH: &str = "✍️";
const WARNING_GLYPH: &str = "⚠";

const HEADER_FONT: &str = "Menlo-Bold";
const HEADER_SIZE: u32 = 13;
const TITLE_SIZE: u32 = 12;
const SUBTITLE_SIZE: u32 = 10;

const WARNING_TITLE: &str = "Github review requests";
const MISSING_CREDENTIALS_MESSAGE: &str = "ACCESS_TOKEN and GITHUB_LOGIN cannot be empty";

/// The host reads `|` as the start of the attribute list.
const LINE_DELIMITER: char = '|';
const LINE_DELIMITER_REPLACEMENT: &str = "-";

/// Text colors for menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: Color,
    pub subtitle: Color,
    /// Used for both lines of a work-in-progress entry.
    pub inactive: Color,
}

impl Palette {
    pub fn for_mode(dark_mode: bool) -> Self {
        Self {
            title: if dark_mode {
                Color::Rgb(0xff, 0xff, 0xff)
            } else {
                Color::Rgb(0x00, 0x00, 0x00)
            },
            subtitle: Color::Rgb(0x58, 0x60, 0x69),
            inactive: Color::Rgb(0xb4, 0xb4, 0xb4),
        }
    }
}

/// Replaces characters in free text that would corrupt a menu line.
pub fn escape_text(text: &str) -> String {
    text.replace(LINE_DELIMITER, LINE_DELIMITER_REPLACEMENT)
}

/// Formats a timestamp as e.g. `March 05, 2024`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %d, %Y").to_string()
}

fn render_entry(pr: &PullRequest, scope: &ScopeConfig, palette: &Palette) -> [MenuLine; 3] {
    let (title_color, subtitle_color) = if scope.is_wip(pr) {
        (palette.inactive, palette.inactive)
    } else {
        (palette.title, palette.subtitle)
    };

    let title = MenuLine::new(format!("{} - {}", pr.repository, escape_text(&pr.title)))
        .size(TITLE_SIZE)
        .color(title_color)
        .href(pr.url.clone());
    let subtitle = MenuLine::new(format!(
        "#{} opened on {} by @{}",
        pr.number,
        format_date(pr.created_at),
        pr.author_login
    ))
    .size(SUBTITLE_SIZE)
    .color(subtitle_color);

    [title, subtitle, MenuLine::separator()]
}

fn render_section(
    lines: &mut Vec<MenuLine>,
    glyph: &str,
    label: &str,
    prs: &[PullRequest],
    scope: &ScopeConfig,
    palette: &Palette,
) {
    if prs.is_empty() {
        return;
    }

    lines.push(
        MenuLine::new(format!("{glyph} {label} ({})", prs.len()))
            .color(palette.title)
            .font(HEADER_FONT)
            .size(HEADER_SIZE),
    );
    lines.push(MenuLine::separator());

    for pr in prs {
        lines.extend(render_entry(pr, scope, palette));
    }
}

/// Renders both result sets into a single menu.
///
/// The first two lines are always the `PR: <total>` summary and a
/// separator. Each non-empty set follows as a header and its entries, in
/// input order.
pub fn render_menu(
    review_requested: &[PullRequest],
    authored: &[PullRequest],
    scope: &ScopeConfig,
    dark_mode: bool,
) -> Vec<MenuLine> {
    let palette = Palette::for_mode(dark_mode);
    let total_count = review_requested.len() + authored.len();

    let mut lines = Vec::with_capacity(2 + 2 * 2 + 3 * total_count);
    lines.push(MenuLine::new(format!("PR: {total_count}")));
    lines.push(MenuLine::separator());

    render_section(
        &mut lines,
        REVIEW_REQUESTED_GLYPH,
        "Review Requested",
        review_requested,
        scope,
        &palette,
    );
    render_section(
        &mut lines,
        AUTHORED_GLYPH,
        "Created by Me",
        authored,
        scope,
        &palette,
    );

    lines
}

fn warning_menu(detail: String) -> Vec<MenuLine> {
    vec![
        MenuLine::new(format!("{WARNING_GLYPH} {WARNING_TITLE}")).color(Color::Red),
        MenuLine::separator(),
        MenuLine::new(detail),
    ]
}

/// The menu shown when the token or login is not configured.
pub fn missing_credentials_menu() -> Vec<MenuLine> {
    warning_menu(MISSING_CREDENTIALS_MESSAGE.to_string())
}

/// The menu shown when a search fails, naming the failure kind.
pub fn search_error_menu(err: &SearchError) -> Vec<MenuLine> {
    let message = err.message().split_whitespace().collect::<Vec<_>>().join(" ");
    warning_menu(format!("{}: {}", err.kind(), escape_text(&message)))
}
