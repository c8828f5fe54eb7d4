use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative diamonds placed either side of the dashboard title.
pub const ACCENTS: &str = "◆ ◇ ◆";

/// Deming quote shown under the dashboard view.
pub const QUOTE: &str =
    "\"Sem dados você é apenas mais uma pessoa com uma opinião.\" — W. Edwards Deming";

/// Dashboard header rendering four lines:
///
/// 1. Application title with diamond decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Fiscal-year and data-source information in `[ a | b ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    ///
    /// The returned lines are:
    ///
    /// 1. `"◆ ◇ ◆ GASTOS DO MUNICÍPIO DE CAPELINHA/MG ◆ ◇ ◆"`
    /// 2. `"============================================================"` (60 `=` chars)
    /// 3. `"[ exercício 2022 | dados abertos ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(ACCENTS, self.theme.header_accent),
                Span::styled(" GASTOS DO MUNICÍPIO DE CAPELINHA/MG ", self.theme.header),
                Span::styled(ACCENTS, self.theme.header_accent),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Fiscal-year / data-source info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled("exercício 2022", self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled("dados abertos", self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let header = Header::new(&theme);
        assert_eq!(header.to_lines().len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let header = Header::new(&theme);
        let lines = header.to_lines();

        let title_text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(
            title_text.contains("GASTOS DO MUNICÍPIO DE CAPELINHA/MG"),
            "title line must contain the dashboard name, got: {title_text}"
        );
        assert!(
            title_text.contains(ACCENTS),
            "title line must contain the accents, got: {title_text}"
        );
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let header = Header::new(&theme);
        let lines = header.to_lines();

        let sep_text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(sep_text.chars().count(), 60, "separator must be 60 chars wide");
        assert!(
            sep_text.chars().all(|c| c == '='),
            "separator must consist of '=' characters, got: {sep_text}"
        );
    }

    #[test]
    fn test_header_info_line_format() {
        let theme = Theme::dark();
        let header = Header::new(&theme);
        let lines = header.to_lines();

        let info_text: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(info_text.contains("exercício 2022"), "got: {info_text}");
        assert!(
            info_text.contains("[ ") && info_text.contains(" | ") && info_text.contains(" ]"),
            "format must be '[ a | b ]', got: {info_text}"
        );
        // Info line: "[ " + year + " | " + source + " ]" = 5 spans.
        assert_eq!(lines[2].spans.len(), 5);
    }

    #[test]
    fn test_header_empty_fourth_line() {
        let theme = Theme::dark();
        let header = Header::new(&theme);
        let lines = header.to_lines();

        let empty_text: String = lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(empty_text.is_empty(), "fourth line must be empty, got: {empty_text:?}");
    }
}
