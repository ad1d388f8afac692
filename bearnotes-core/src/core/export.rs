//! Export formats and rendering of a note for export.

use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BearnotesError;

/// A file format a note can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Html,
    Md,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Md => "md",
        }
    }

    /// File name proposed by the save dialog, e.g. `export.html`.
    pub fn default_file_name(self) -> String {
        format!("export.{}", self.extension())
    }

    /// Label of the dialog filter for this format, e.g. `HTML Files`.
    pub fn filter_name(self) -> String {
        format!("{} Files", self.extension().to_uppercase())
    }

    /// Produces the file body for `content`.
    ///
    /// Markdown is written as-is. HTML is rendered into a standalone document
    /// titled `title`. PDF content is supplied already printable by the shell
    /// and passes through unchanged.
    pub fn render(self, content: &str, title: &str) -> String {
        match self {
            Self::Md | Self::Pdf => content.to_string(),
            Self::Html => render_html_document(content, title),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = BearnotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "md" | "markdown" => Ok(Self::Md),
            _ => Err(BearnotesError::InvalidFormat(s.to_string())),
        }
    }
}

/// Renders markdown to an HTML fragment.
pub fn markdown_to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options);
    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn render_html_document(content: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_text(title),
        markdown_to_html(content)
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
