//! Inline `**bold**` runs and the greedy word wrap that places them.

use crate::font::SpanFont;
use crate::units::Pt;

/// A maximal stretch of text in one style
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Run<'a> {
    pub text: &'a str,
    pub bold: bool,
}

impl Run<'_> {
    pub fn font(&self, size: Pt) -> SpanFont {
        if self.bold {
            SpanFont::bold(size)
        } else {
            SpanFont::regular(size)
        }
    }
}

/// Split `text` on `**`. Odd segments are bold and empty segments are
/// skipped, so an unmatched trailing `**` simply leaves the rest bold.
pub fn split_runs(text: &str) -> Vec<Run<'_>> {
    text.split("**")
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(i, segment)| Run {
            text: segment,
            bold: i % 2 == 1,
        })
        .collect()
}

/// A word placed on a line, at an absolute x position
#[derive(Clone, PartialEq, Debug)]
pub struct PlacedWord {
    /// The word, including the space that separated it from its predecessor
    /// unless it starts a line
    pub text: String,
    pub x: Pt,
    pub bold: bool,
}

/// One visual line of inline text
#[derive(Clone, PartialEq, Debug)]
pub struct WrappedLine {
    pub words: Vec<PlacedWord>,
    /// The size the words were measured at
    pub size: Pt,
}

impl WrappedLine {
    /// The line's text with styling dropped
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }

    pub fn font_for(&self, word: &PlacedWord) -> SpanFont {
        if word.bold {
            SpanFont::bold(self.size)
        } else {
            SpanFont::regular(self.size)
        }
    }
}

/// Pack the words of `runs` first-fit between `base_x` and `right_edge`.
///
/// Within a run, words after the first carry a leading space. A word that
/// would cross `right_edge` moves to a new line, unless the current line is
/// still empty, and loses its leading space there. Always returns at least one
/// line.
pub fn wrap_runs<F>(
    runs: &[Run<'_>],
    size: Pt,
    base_x: Pt,
    right_edge: Pt,
    measure: F,
) -> Vec<WrappedLine>
where
    F: Fn(&str, SpanFont) -> Pt,
{
    let mut lines = Vec::new();
    let mut words: Vec<PlacedWord> = Vec::new();
    let mut x = base_x;

    for run in runs {
        let font = run.font(size);
        for (i, word) in run.text.split(' ').enumerate() {
            let mut text = if i > 0 {
                format!(" {word}")
            } else {
                word.to_string()
            };
            if text.is_empty() {
                continue;
            }

            let mut width = measure(&text, font);
            if x + width > right_edge && !words.is_empty() {
                lines.push(WrappedLine {
                    words: std::mem::take(&mut words),
                    size,
                });
                x = base_x;
                if let Some(stripped) = text.strip_prefix(' ') {
                    text = stripped.to_string();
                    width = measure(&text, font);
                }
                if text.is_empty() {
                    continue;
                }
            }

            words.push(PlacedWord {
                text,
                x,
                bold: run.bold,
            });
            x += width;
        }
    }

    // a separator that overflowed leaves nothing behind on its new line
    if !words.is_empty() || lines.is_empty() {
        lines.push(WrappedLine { words, size });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 1pt per character regardless of style
    fn chars(s: &str, _font: SpanFont) -> Pt {
        Pt(s.chars().count() as f32)
    }

    #[test]
    fn runs_round_trip() {
        for text in [
            "Revenue grew **40%** year over year",
            "**all bold**",
            "trailing **open",
            "no markers",
            "****",
            "",
        ] {
            let joined: String = split_runs(text).iter().map(|r| r.text).collect();
            assert_eq!(joined, text.replace("**", ""), "for {text:?}");
        }
    }

    #[test]
    fn odd_segments_are_bold() {
        assert_eq!(
            split_runs("a **b** c"),
            vec![
                Run { text: "a ", bold: false },
                Run { text: "b", bold: true },
                Run { text: " c", bold: false },
            ]
        );
        assert_eq!(
            split_runs("**lead** rest"),
            vec![
                Run { text: "lead", bold: true },
                Run { text: " rest", bold: false },
            ]
        );
    }

    #[test]
    fn keeps_the_space_between_runs() {
        let runs = split_runs("Budget: **$5M** total");
        let lines = wrap_runs(&runs, Pt(10.0), Pt(0.0), Pt(100.0), chars);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Budget: $5M total");
        let bold: Vec<_> = lines[0]
            .words
            .iter()
            .filter(|w| w.bold)
            .map(|w| (w.text.as_str(), w.x))
            .collect();
        assert_eq!(bold, vec![("$5M", Pt(8.0))]);
    }

    #[test]
    fn wraps_and_strips_the_leading_space() {
        let runs = split_runs("aaaa bbbb **cccc** dddd");
        let lines = wrap_runs(&runs, Pt(10.0), Pt(5.0), Pt(14.0), chars);
        let texts: Vec<_> = lines.iter().map(WrappedLine::text).collect();
        assert_eq!(texts, vec!["aaaa bbbb", "cccc dddd"]);
        assert_eq!(lines[1].words[0].x, Pt(5.0));
        assert!(lines[1].words[0].bold);
    }

    #[test]
    fn an_overlong_word_stays_on_an_empty_line() {
        let runs = split_runs("abcdefghijkl xy");
        let lines = wrap_runs(&runs, Pt(10.0), Pt(0.0), Pt(5.0), chars);
        let texts: Vec<_> = lines.iter().map(WrappedLine::text).collect();
        assert_eq!(texts, vec!["abcdefghijkl", "xy"]);
    }

    #[test]
    fn empty_input_is_one_empty_line() {
        let lines = wrap_runs(&[], Pt(10.0), Pt(0.0), Pt(5.0), chars);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].words.is_empty());
    }
}
