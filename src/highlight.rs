// Phrase highlighting for the comparison panes
use regex::Regex;

use crate::debug_error;
use crate::types::{Change, Side};

/// A run of text, highlighted when it matched a change phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub change_id: Option<&'a str>,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self { text, change_id: None }
    }

    pub fn is_highlighted(&self) -> bool {
        self.change_id.is_some()
    }
}

// Phrases of one side plus the alternation regex built from them
struct SidePattern {
    phrases: Vec<(String, String)>, // (phrase, change id)
    regex: Option<Regex>,
}

impl SidePattern {
    fn new(changes: &[Change], side: Side) -> Self {
        let phrases: Vec<(String, String)> = changes
            .iter()
            .filter(|c| !c.phrase(side).is_empty())
            .map(|c| (c.phrase(side).to_string(), c.id.clone()))
            .collect();

        let regex = if phrases.is_empty() {
            None
        } else {
            let alternation = phrases
                .iter()
                .map(|(phrase, _)| regex::escape(phrase))
                .collect::<Vec<_>>()
                .join("|");
            match Regex::new(&alternation) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    debug_error!("Highlight pattern rejected, showing plain text: {}", e);
                    None
                }
            }
        };

        Self { phrases, regex }
    }

    fn change_for(&self, matched: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|(phrase, _)| phrase == matched)
            .map(|(_, id)| id.as_str())
    }
}

/// Splits pane text into plain and highlighted segments.
///
/// Matching is leftmost-first over the phrases in change order, not
/// longest-phrase-first, so overlapping phrases highlight whichever
/// alternative the regex tries first.
pub struct Highlighter {
    original: SidePattern,
    inclusive: SidePattern,
}

impl Highlighter {
    pub fn new(changes: &[Change]) -> Self {
        Self {
            original: SidePattern::new(changes, Side::Original),
            inclusive: SidePattern::new(changes, Side::Inclusive),
        }
    }

    pub fn segments<'a>(&'a self, text: &'a str, side: Side) -> Vec<Segment<'a>> {
        let pattern = match side {
            Side::Original => &self.original,
            Side::Inclusive => &self.inclusive,
        };

        let Some(regex) = &pattern.regex else {
            return if text.is_empty() { Vec::new() } else { vec![Segment::plain(text)] };
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in regex.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::plain(&text[last..m.start()]));
            }
            segments.push(Segment {
                text: m.as_str(),
                change_id: pattern.change_for(m.as_str()),
            });
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::plain(&text[last..]));
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::assign_ids;
    use crate::types::Suggestion;

    fn changes(pairs: &[(&str, &str)]) -> Vec<Change> {
        assign_ids(pairs.iter().map(|(o, i)| Suggestion::new(*o, *i)).collect())
    }

    #[test]
    fn no_changes_yield_one_plain_segment() {
        let highlighter = Highlighter::new(&[]);
        let segments = highlighter.segments("Texto sin cambios", Side::Original);
        assert_eq!(segments, vec![Segment::plain("Texto sin cambios")]);
    }

    #[test]
    fn each_side_matches_its_own_phrases() {
        let changes = changes(&[("El ingeniero", "La persona ingeniera")]);
        let highlighter = Highlighter::new(&changes);

        let left = highlighter.segments("El ingeniero debe revisar.", Side::Original);
        assert_eq!(
            left,
            vec![
                Segment { text: "El ingeniero", change_id: Some("change-0") },
                Segment::plain(" debe revisar."),
            ]
        );

        let right = highlighter.segments("La persona ingeniera debe revisar.", Side::Inclusive);
        assert_eq!(right[0].change_id, Some("change-0"));
        assert_eq!(right[0].text, "La persona ingeniera");
    }

    #[test]
    fn every_occurrence_is_highlighted() {
        let changes = changes(&[("los alumnos", "el alumnado")]);
        let highlighter = Highlighter::new(&changes);
        let segments = highlighter.segments("los alumnos y los alumnos", Side::Original);
        let highlighted = segments.iter().filter(|s| s.is_highlighted()).count();
        assert_eq!(highlighted, 2);
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let changes = changes(&[("(sic.)", "[nota]")]);
        let highlighter = Highlighter::new(&changes);
        let segments = highlighter.segments("texto (sic.) y sicX", Side::Original);
        assert_eq!(segments.iter().filter(|s| s.is_highlighted()).count(), 1);
        assert_eq!(segments[1].text, "(sic.)");
    }

    #[test]
    fn alternation_is_leftmost_first_not_longest() {
        // "el" comes first in the alternation, so "el equipo" is never matched whole
        let changes = changes(&[("el", "la"), ("el equipo", "el personal")]);
        let highlighter = Highlighter::new(&changes);
        let segments = highlighter.segments("el equipo", Side::Original);
        assert_eq!(segments[0], Segment { text: "el", change_id: Some("change-0") });
        assert!(!segments.iter().any(|s| s.text == "el equipo"));
    }

    #[test]
    fn shared_phrase_maps_to_first_change() {
        let changes = changes(&[("los niños", "la infancia"), ("las niñas", "la infancia")]);
        let highlighter = Highlighter::new(&changes);
        let segments = highlighter.segments("la infancia", Side::Inclusive);
        assert_eq!(segments, vec![Segment { text: "la infancia", change_id: Some("change-0") }]);
    }

    #[test]
    fn concatenated_segments_rebuild_the_text() {
        let changes = changes(&[("los usuarios", "las personas usuarias"), ("todos", "todas las personas")]);
        let text = "Bienvenidos todos los usuarios, todos.";
        let highlighter = Highlighter::new(&changes);
        let rebuilt: String = highlighter
            .segments(text, Side::Original)
            .iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(rebuilt, text);
    }
}
