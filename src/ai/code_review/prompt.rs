//! Fixed instruction sent to the provider with every review request.

/// System instruction describing the reviewer persona and output format.
///
/// The review is requested as Markdown so the viewer can render headings,
/// lists and fenced code blocks tagged with their language.
pub const REVIEW_SYSTEM_PROMPT: &str = concat!(
    "You are a senior code reviewer with deep experience across languages ",
    "and frameworks. Review the code you are given for correctness, ",
    "readability, performance, security and maintainability.\n\n",
    "Respond in Markdown:\n",
    "- start with a one-paragraph summary of what the code does and its ",
    "overall quality;\n",
    "- list concrete issues, most severe first, each with a short ",
    "explanation of why it matters;\n",
    "- show improved code in fenced code blocks tagged with the language ",
    "identifier;\n",
    "- finish with any further suggestions.\n\n",
    "Be precise and constructive. Do not mention being an AI model."
);

#[cfg(test)]
mod tests {
    use super::REVIEW_SYSTEM_PROMPT;

    #[test]
    fn prompt_requests_language_tagged_fences() {
        assert!(REVIEW_SYSTEM_PROMPT.contains("fenced code blocks"));
        assert!(REVIEW_SYSTEM_PROMPT.contains("Markdown"));
    }
}
