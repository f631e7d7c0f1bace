//! MarkdownV2 building blocks for page texts.
//!
//! Every helper escapes its input, so callers compose pages from raw strings
//! and already-formatted fragments without double escaping.

use campuscore::core::config::layout::SEPARATOR_WIDTH;

/// Escapes special characters for Telegram MarkdownV2.
///
/// Characters that must be escaped:
/// `_`, `*`, `[`, `]`, `(`, `)`, `~`, `` ` ``, `>`, `#`, `+`, `-`, `=`, `|`, `{`, `}`, `.`, `!`
/// plus the backslash itself.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}'
            | '.' | '!' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Page banner: `-------Title-----------`.
pub fn header(title: &str) -> String {
    escape(&format!("{}{}{}", "-".repeat(7), title.trim(), "-".repeat(11)))
}

/// Section title: bold `Title:`.
pub fn section(title: &str) -> String {
    format!("*{}:*", escape(title))
}

/// Underscore separator line.
pub fn separator() -> String {
    escape(&"_".repeat(SEPARATOR_WIDTH))
}

pub fn bold(text: &str) -> String {
    format!("*{}*", escape(text))
}

pub fn italic(text: &str) -> String {
    format!("_{}_", escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("08:30 | Физика (ЛК)."), "08:30 \\| Физика \\(ЛК\\)\\.");
        assert_eq!(escape("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape("обычный текст"), "обычный текст");
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(header(" Главная "), "\\-\\-\\-\\-\\-\\-\\-Главная\\-\\-\\-\\-\\-\\-\\-\\-\\-\\-\\-");
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(separator(), "\\_".repeat(22));
    }

    #[test]
    fn test_section_bold_italic() {
        assert_eq!(section("Расписание"), "*Расписание:*");
        assert_eq!(bold("Корпус №1"), "*Корпус №1*");
        assert_eq!(italic("(сегодня, пн)"), "_\\(сегодня, пн\\)_");
    }
}
