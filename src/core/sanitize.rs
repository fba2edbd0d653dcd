// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Glyphs used to decorate names in the duty tables.
const DECORATIONS: &[char] = &['*', '•', '·', '●', '▪', '■', '-', '–', '—', '►', '\u{f0b7}'];

/// Trim decorative markers (asterisks, bullets, dashes) from both ends.
pub fn strip_markers(s: &str) -> String {
    let t = s.trim_matches(|c: char| c.is_whitespace() || DECORATIONS.contains(&c));
    normalize_ws(t)
}

/// Drop the trailing readiness asterisk(s) from a physician's name.
pub fn strip_readiness(s: &str) -> String {
    s.trim().trim_end_matches(|c: char| c == '*' || c.is_whitespace()).to_string()
}

/// Non-empty trimmed lines of a multi-line cell.
pub fn cell_lines(cell: &str) -> impl Iterator<Item = &str> {
    cell.lines().map(str::trim).filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_come_off_both_ends() {
        assert_eq!(strip_markers("  • ΛΑΪΚΟ*  "), "ΛΑΪΚΟ");
        assert_eq!(strip_markers("**ΚΑΤ**"), "ΚΑΤ");
        assert_eq!(strip_markers("ΚΩΝ/ΠΟΥΛΕΙΟ"), "ΚΩΝ/ΠΟΥΛΕΙΟ");
        assert_eq!(strip_markers("***"), "");
    }

    #[test]
    fn readiness_marker_only_trailing() {
        assert_eq!(strip_readiness("Τσιάπρας*"), "Τσιάπρας");
        assert_eq!(strip_readiness("Τσιάπρας **"), "Τσιάπρας");
        assert_eq!(strip_readiness("Καρυοφύλλης"), "Καρυοφύλλης");
    }

    #[test]
    fn entities_decode_ampersand_last() {
        assert_eq!(normalize_entities("A&amp;nbsp;B&nbsp;C"), "A&nbsp;B C");
    }
}
