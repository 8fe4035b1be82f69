//! Line-oriented menu protocol understood by the status-bar host.
//!
//! Each line is plain text, optionally followed by ` | ` and space-joined
//! `key=value` attributes. A line of `---` separates sections.

use std::io::Write;

use anyhow::Result;
use url::Url;

/// The section separator line.
pub const SEPARATOR: &str = "---";

/// Separates a line's text from its attributes.
const ATTRIBUTE_DELIMITER: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Rgb(u8, u8, u8),
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// A display attribute recognised by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Color(Color),
    Font(String),
    Size(u32),
    Href(Url),
}

impl Attribute {
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Color(_) => "color",
            Attribute::Font(_) => "font",
            Attribute::Size(_) => "size",
            Attribute::Href(_) => "href",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Color(color) => write!(f, "color={color}"),
            Attribute::Font(font) => write!(f, "font={font}"),
            Attribute::Size(size) => write!(f, "size={size}"),
            Attribute::Href(url) => write!(f, "href={url}"),
        }
    }
}

/// One line of menu output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub text: String,
    attributes: Vec<Attribute>,
}

impl MenuLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    pub fn separator() -> Self {
        Self::new(SEPARATOR)
    }

    /// Adds an attribute. An attribute of the same kind already on the line
    /// is replaced in place.
    pub fn with(mut self, attribute: Attribute) -> Self {
        match self
            .attributes
            .iter_mut()
            .find(|existing| existing.key() == attribute.key())
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.with(Attribute::Color(color))
    }

    pub fn font(self, font: impl Into<String>) -> Self {
        self.with(Attribute::Font(font.into()))
    }

    pub fn size(self, size: u32) -> Self {
        self.with(Attribute::Size(size))
    }

    pub fn href(self, url: Url) -> Self {
        self.with(Attribute::Href(url))
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key() == key)
    }

    pub fn is_separator(&self) -> bool {
        self.text == SEPARATOR && self.attributes.is_empty()
    }
}

impl std::fmt::Display for MenuLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)?;
        if self.attributes.is_empty() {
            return Ok(());
        }

        f.write_str(ATTRIBUTE_DELIMITER)?;
        for (i, attribute) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

/// Writes the menu, one line per entry.
pub fn write_menu<W: Write>(lines: &[MenuLine], writer: &mut W) -> Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
