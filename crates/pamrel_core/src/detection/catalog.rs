//! Closed, versioned catalog of highlightable languages.
//!
//! The catalog is compiled in. Bump [`CATALOG_VERSION`] whenever an entry is
//! added, removed or renamed so stored `language` values can be audited
//! against the set that produced them.

use serde::Serialize;

/// Version of the embedded language set.
pub const CATALOG_VERSION: u32 = 1;

/// Sentinel language meaning "no syntax highlighting".
pub const PLAIN_TEXT: &str = "PlainText";

/// Language forced onto pretty-printed JSON pastes.
pub const JSON_LANGUAGE: &str = "json";

/// One selectable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub label: &'static str,
    pub alias: &'static str,
}

const fn lang(label: &'static str, alias: &'static str) -> Language {
    Language { label, alias }
}

/// Supported languages sorted by label, including the plain-text sentinel.
pub const LANGUAGES: &[Language] = &[
    lang("C", "c"),
    lang("C#", "csharp"),
    lang("C++", "cpp"),
    lang("CSS", "css"),
    lang("Dart", "dart"),
    lang("Elixir", "elixir"),
    lang("Go", "go"),
    lang("HTML", "html"),
    lang("Java", "java"),
    lang("JavaScript", "javascript"),
    lang("JSON", JSON_LANGUAGE),
    lang("Kotlin", "kotlin"),
    lang("LaTeX", "latex"),
    lang("Lua", "lua"),
    lang("Markdown", "markdown"),
    lang("Perl", "perl"),
    lang("Plain Text", PLAIN_TEXT),
    lang("PowerShell", "powershell"),
    lang("Python", "python"),
    lang("Ruby", "ruby"),
    lang("Rust", "rust"),
    lang("Shell", "shell"),
    lang("SQL", "sql"),
    lang("Swift", "swift"),
    lang("TOML", "toml"),
    lang("TypeScript", "typescript"),
    lang("XML", "xml"),
    lang("YAML", "yaml"),
    lang("Zig", "zig"),
];

/// Look up a catalog entry by its exact alias.
pub fn lookup(alias: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.alias == alias)
}

/// Exact-alias membership check used at request boundaries.
pub fn is_supported(alias: &str) -> bool {
    lookup(alias).is_some()
}

/// `false` only for the plain-text sentinel.
pub fn syntax_enabled(language: &str) -> bool {
    language != PLAIN_TEXT
}

/// Convert detector names and common aliases to catalog aliases.
///
/// # Returns
/// Lowercased canonical name (or empty string for empty/whitespace input).
/// The result is not guaranteed to be in the catalog.
pub fn canonicalize(language: &str) -> String {
    let lowered = language.trim().to_ascii_lowercase();
    let canonical = match lowered.as_str() {
        "cs" | "c#" => "csharp",
        "c++" | "cxx" => "cpp",
        "bash" | "sh" | "zsh" | "ksh" => "shell",
        "pwsh" | "ps1" => "powershell",
        "yml" => "yaml",
        "jsonl" => "json",
        "js" | "node" => "javascript",
        "ts" => "typescript",
        "md" => "markdown",
        "py" | "py3" | "python3" => "python",
        "rs" => "rust",
        "rb" => "ruby",
        "kt" => "kotlin",
        "pl" => "perl",
        "ex" | "exs" => "elixir",
        "tex" => "latex",
        "scss" | "sass" => "css",
        "text" | "txt" | "plain" | "plaintext" | "plain text" => "plaintext",
        other => other,
    };
    canonical.to_string()
}

/// Map a detector result onto a representable catalog alias.
///
/// # Returns
/// `None` when the name has no catalog entry or denotes plain text.
pub fn alias_for_detected(name: &str) -> Option<&'static str> {
    let canonical = canonicalize(name);
    if canonical.is_empty() || canonical == "plaintext" {
        return None;
    }
    lookup(&canonical).map(|language| language.alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_by_label_and_aliases_are_unique() {
        let labels: Vec<_> = LANGUAGES
            .iter()
            .map(|l| l.label.to_ascii_lowercase())
            .collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);

        let mut aliases: Vec<_> = LANGUAGES.iter().map(|l| l.alias).collect();
        aliases.sort_unstable();
        aliases.dedup();
        assert_eq!(aliases.len(), LANGUAGES.len());
    }

    #[test]
    fn sentinel_and_json_tag_are_members() {
        assert!(is_supported(PLAIN_TEXT));
        assert!(is_supported(JSON_LANGUAGE));
        assert!(!syntax_enabled(PLAIN_TEXT));
        assert!(syntax_enabled(JSON_LANGUAGE));
    }

    #[test]
    fn membership_is_exact() {
        assert!(is_supported("python"));
        assert!(!is_supported("Python"));
        assert!(!is_supported("py"));
        assert!(!is_supported("brainfuck"));
    }

    #[test]
    fn detected_names_map_to_aliases() {
        let cases = [
            ("csharp", Some("csharp")),
            ("C#", Some("csharp")),
            ("bash", Some("shell")),
            ("yml", Some("yaml")),
            ("js", Some("javascript")),
            ("Rust", Some("rust")),
            ("scss", Some("css")),
            ("text", None),
            ("PlainText", None),
            ("", None),
            ("cobol", None),
        ];
        for (input, expected) in cases {
            assert_eq!(alias_for_detected(input), expected, "input: {input}");
        }
    }
}
