//! Syntax highlighting adapter using syntect.
//!
//! Produces classed HTML for fenced code blocks whose language tag resolves
//! to a known syntax, with a graceful fallback to escaped plain text when
//! the language is unknown or highlighting fails. Class names follow
//! syntect's scope naming so any syntect-derived stylesheet applies.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

use super::html::escape_html;

/// Errors that can occur during syntax highlighting.
#[derive(Debug, Error)]
pub enum HighlightError {
    /// No syntax definition matches the language tag.
    #[error("no syntax found for language: {language}")]
    NoSyntaxFound {
        /// The language tag that could not be matched.
        language: String,
    },
    /// Syntect internal error during highlighting.
    #[error("highlighting failed: {message}")]
    HighlightFailed {
        /// Description of the failure.
        message: String,
    },
}

/// Code highlighter holding syntect's default syntax definitions.
///
/// Loading the definitions is comparatively expensive, so one highlighter
/// should be reused across renders.
#[derive(Debug)]
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter {
    /// Creates a new highlighter with the default syntax set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Resolves a fence language tag to a syntax definition.
    ///
    /// Plain text is not considered a highlightable language.
    #[must_use]
    pub fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let token = canonical_language_token(language);
        self.syntax_set
            .find_syntax_by_token(&token)
            .filter(|syntax| syntax.name != "Plain Text")
    }

    /// Renders a code block, falling back to escaped plain text.
    ///
    /// Highlighted blocks carry a `language-<tag>` class on the `code`
    /// element; fallback blocks carry no class.
    #[must_use]
    pub fn highlight_or_plain(&self, code: &str, language: Option<&str>) -> String {
        let Some(tag) = language else {
            return plain_code_block(code);
        };

        match self.highlight_code_block(code, tag) {
            Ok(highlighted) => format!(
                "<pre><code class=\"language-{}\">{highlighted}</code></pre>\n",
                escape_html(tag)
            ),
            Err(error) => {
                tracing::debug!(%error, language = tag, "rendering code block as plain text");
                plain_code_block(code)
            }
        }
    }

    /// Highlights code into classed `<span>` markup.
    ///
    /// Source text is escaped by syntect, so the returned markup contains no
    /// HTML other than the generated spans.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::NoSyntaxFound`] if the language tag cannot
    /// be matched to a syntax definition, or
    /// [`HighlightError::HighlightFailed`] if syntect encounters an internal
    /// error.
    pub fn highlight_code_block(
        &self,
        code: &str,
        language: &str,
    ) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::NoSyntaxFound {
                language: language.to_owned(),
            })?;

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|error| HighlightError::HighlightFailed {
                    message: error.to_string(),
                })?;
        }

        Ok(generator.finalize())
    }
}

fn plain_code_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>\n", escape_html(code))
}

/// Maps common fence aliases onto tokens known to the default syntax set.
fn canonical_language_token(language: &str) -> String {
    let lowered = language.trim().to_ascii_lowercase();
    let canonical = match lowered.as_str() {
        "jsx" | "mjs" | "cjs" | "node" | "ts" | "tsx" | "typescript" => "js",
        "shell" | "console" | "shellscript" | "zsh" => "sh",
        "py3" | "python3" => "py",
        "c++" => "cpp",
        "golang" => "go",
        "yml" => "yaml",
        _ => return lowered,
    };
    canonical.to_owned()
}
