//! Text shown in the document pane and its heading outline

use unicode_width::UnicodeWidthStr;

/// A markdown-style heading and the row it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub line: usize,
    pub level: usize,
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub lines: Vec<String>,
    pub headings: Vec<Heading>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(|l| l.replace('\t', "    ")).collect();
        let headings = lines
            .iter()
            .enumerate()
            .filter_map(|(line, text)| parse_heading(text).map(|(level, title)| Heading {
                line,
                level,
                title,
            }))
            .collect();
        Self { lines, headings }
    }

    /// Built-in text used when no file is given
    pub fn sample() -> Self {
        let mut text = String::new();
        for (i, section) in SAMPLE_SECTIONS.iter().enumerate() {
            text.push_str(&format!("# {}. {}\n\n", i + 1, section));
            for p in 0..12 {
                text.push_str(&format!(
                    "{} paragraph {}: the viewport glides here over the configured duration.\n",
                    section,
                    p + 1
                ));
            }
            text.push('\n');
        }
        Self::from_text(&text)
    }

    /// Content height in rows
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Widest line in columns
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.width()).max().unwrap_or(0)
    }
}

const SAMPLE_SECTIONS: [&str; 8] = [
    "Introduction",
    "Delay",
    "Duration",
    "Easing",
    "Frames",
    "Clamping",
    "Restarting",
    "Failures",
];

fn parse_heading(line: &str) -> Option<(usize, String)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.starts_with(' ') {
        return None;
    }
    let title = rest.trim();
    if title.is_empty() {
        None
    } else {
        Some((level, title.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_are_collected() {
        let doc = Document::from_text("# Title\ntext\n\n## Part two\n#nospace\nmore");
        assert_eq!(
            doc.headings,
            vec![
                Heading {
                    line: 0,
                    level: 1,
                    title: "Title".to_string()
                },
                Heading {
                    line: 3,
                    level: 2,
                    title: "Part two".to_string()
                },
            ]
        );
        assert_eq!(doc.height(), 6);
        assert_eq!(doc.width(), 11);
    }

    #[test]
    fn test_sample_has_sections() {
        let doc = Document::sample();
        assert_eq!(doc.headings.len(), 8);
        assert!(doc.height() > 100);
    }
}
