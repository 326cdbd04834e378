//! Keyword and shape heuristics for language detection.

const SAMPLE_MAX_BYTES: usize = 64 * 1024;
const SAMPLE_MAX_LINES: usize = 512;

/// Keyword sets scored against the lowercased sample; the highest hit count
/// at or above the threshold wins.
const SCORED: &[(&str, &[&str], usize)] = &[
    (
        "rust",
        &[
            "fn ", "impl", "crate::", "let ", "mut ", "pub ", "struct ", "enum ", "match ",
            "trait ", "println!",
        ],
        2,
    ),
    (
        "python",
        &[
            "def ", "import ", "class ", "self", "async def", "elif ", "print(", "__init__",
        ],
        2,
    ),
    (
        "javascript",
        &[
            "function", "const ", "let ", "=>", "console.", "document.", "export ", "require(",
        ],
        2,
    ),
    (
        "typescript",
        &[
            "interface ", " type ", ": string", ": number", "implements ", "readonly ",
        ],
        2,
    ),
    (
        "go",
        &["package ", "func ", "fmt.", "defer ", "chan ", ":= ", "select {"],
        2,
    ),
    (
        "java",
        &[
            "public class", "import java.", "system.out", " extends ", " void main",
        ],
        2,
    ),
    (
        "sql",
        &[
            "select ", "insert into", "update ", "delete from", " from ", " where ", " join ",
            "create table",
        ],
        2,
    ),
    ("kotlin", &["fun ", "val ", "println(", "data class"], 2),
    ("lua", &["local ", "function ", "end\n", "then\n", "elseif "], 3),
    ("elixir", &["defmodule ", "do\n", "io.puts", "def ", "|>"], 2),
];

/// Best-effort language guess.
///
/// # Returns
/// A detector name (not necessarily a catalog alias) when a strong pattern
/// is found, otherwise `None`.
pub(crate) fn detect(content: &str) -> Option<&'static str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sample = utf8_prefix(trimmed, SAMPLE_MAX_BYTES);
    let lower = sample.to_ascii_lowercase();

    if let Some(interpreter) = shebang_interpreter(sample) {
        let by_shebang = match interpreter {
            "python" | "python2" | "python3" | "pypy" | "pypy3" => Some("python"),
            "node" | "nodejs" | "deno" | "bun" => Some("javascript"),
            "perl" => Some("perl"),
            "ruby" => Some("ruby"),
            "sh" | "bash" | "zsh" | "ksh" | "dash" | "ash" => Some("shell"),
            _ => None,
        };
        if by_shebang.is_some() {
            return by_shebang;
        }
    }

    if looks_like_json(sample, trimmed.len()) {
        return Some("json");
    }
    if lower.contains("<!doctype html") || lower.contains("<html") {
        return Some("html");
    }
    if lower.starts_with("<?xml") || (sample.starts_with('<') && lower.contains("</")) {
        return Some("xml");
    }
    if lower.contains("\\documentclass") || lower.contains("\\begin{") {
        return Some("latex");
    }
    if lower.contains("use strict;") && lower.contains("my $") {
        return Some("perl");
    }
    if lower.contains("write-host") || lower.contains("$psversiontable") {
        return Some("powershell");
    }
    if looks_like_toml(sample) {
        return Some("toml");
    }
    if looks_like_yaml(sample) {
        return Some("yaml");
    }
    if looks_like_markdown(sample) {
        return Some("markdown");
    }
    if lower.contains("using system") && lower.contains("namespace ") {
        return Some("csharp");
    }
    if lower.contains("#include") {
        return if lower.contains("std::") || lower.contains("cout") {
            Some("cpp")
        } else {
            Some("c")
        };
    }
    if lower.contains("@import(\"std\")") {
        return Some("zig");
    }
    if lower.contains("import 'package:") {
        return Some("dart");
    }
    if lower.contains("import foundation") || lower.contains("guard let") {
        return Some("swift");
    }
    if looks_like_css(&lower) {
        return Some("css");
    }

    let mut best: Option<(&'static str, usize)> = None;
    for (name, keywords, threshold) in SCORED {
        let hits = keywords.iter().filter(|kw| lower.contains(**kw)).count();
        if hits < *threshold {
            continue;
        }
        if best.map_or(true, |(_, best_hits)| hits > best_hits) {
            best = Some((*name, hits));
        }
    }
    best.map(|(name, _)| name)
}

fn shebang_interpreter(sample: &str) -> Option<&str> {
    let first = sample.lines().next()?.strip_prefix("#!")?;
    let mut parts = first.split_whitespace();
    let program = parts.next()?.rsplit('/').next()?;
    if program == "env" {
        parts.find(|arg| !arg.starts_with('-'))
    } else {
        Some(program)
    }
}

fn looks_like_json(sample: &str, full_len: usize) -> bool {
    if !(sample.starts_with('{') || sample.starts_with('[')) {
        return false;
    }
    let truncated = sample.len() < full_len;
    let closed = sample.ends_with('}') || sample.ends_with(']');
    sample.contains('"') && (sample.contains(':') || sample.starts_with('[')) && (closed || truncated)
}

fn looks_like_toml(sample: &str) -> bool {
    let mut has_header = false;
    let mut assignments = 0usize;
    for line in sample.lines().take(SAMPLE_MAX_LINES).map(str::trim) {
        if line.starts_with('[') && line.ends_with(']') && line.len() > 2 {
            has_header = true;
        } else if !line.starts_with('#') && line.contains(" = ") && !line.contains("==") {
            assignments += 1;
        }
    }
    has_header && assignments >= 1
}

fn looks_like_yaml(sample: &str) -> bool {
    if sample.contains('{') || sample.contains(';') {
        return false;
    }
    let pairs = sample
        .lines()
        .take(SAMPLE_MAX_LINES)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| line.starts_with("- ") || yaml_bare_key(line) || yaml_key_value(line))
        .count();
    pairs >= 2 || (sample.starts_with("---") && pairs >= 1)
}

fn yaml_bare_key(line: &str) -> bool {
    line.len() > 1
        && line.ends_with(':')
        && !line.contains(char::is_whitespace)
        && !line.contains('(')
}

fn yaml_key_value(line: &str) -> bool {
    let Some((key, value)) = line.split_once(": ") else {
        return false;
    };
    !key.is_empty()
        && !key.contains(char::is_whitespace)
        && (value.starts_with('"') || value.split_whitespace().count() <= 3)
}

fn looks_like_markdown(sample: &str) -> bool {
    if sample.contains("```") || sample.contains("](") {
        return true;
    }
    sample.lines().take(SAMPLE_MAX_LINES).any(|line| {
        let line = line.trim_start();
        let hashes = line.bytes().take_while(|b| *b == b'#').count();
        (1..=6).contains(&hashes) && line.as_bytes().get(hashes) == Some(&b' ')
    })
}

fn looks_like_css(lower: &str) -> bool {
    const PROPERTIES: &[&str] = &[
        "color:", "background", "margin", "padding", "font-", "display:", "position:",
    ];
    lower.contains('{')
        && lower.contains('}')
        && lower.contains(':')
        && lower.contains(';')
        && PROPERTIES.iter().any(|prop| lower.contains(prop))
}

fn utf8_prefix(content: &str, max_bytes: usize) -> &str {
    if content.len() <= max_bytes {
        return content;
    }
    let mut end = max_bytes;
    while end > 0 && !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}
