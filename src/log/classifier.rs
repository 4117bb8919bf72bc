//! Robot log line classification

use std::fmt;

/// What a single log line means to the transfer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    PickUp,
    Aspirate,
    Dispense,
    DropTip,
    Ignore,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::PickUp => "pick-up",
            LineKind::Aspirate => "aspirate",
            LineKind::Dispense => "dispense",
            LineKind::DropTip => "drop-tip",
            LineKind::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Canonical phrase for each kind, in matching order
pub const CANONICAL_PHRASES: [(LineKind, &str); 4] = [
    (LineKind::Aspirate, "Aspirating"),
    (LineKind::Dispense, "Dispensing"),
    (LineKind::PickUp, "Picking up"),
    (LineKind::DropTip, "Dropping"),
];

/// Classify a raw log line by canonical phrase containment
///
/// The first phrase found in the trimmed line decides the kind. Lines without
/// any canonical phrase are [`LineKind::Ignore`].
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();
    CANONICAL_PHRASES
        .iter()
        .find(|(_, phrase)| line.contains(phrase))
        .map(|(kind, _)| *kind)
        .unwrap_or(LineKind::Ignore)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_each_phrase() {
        assert_eq!(
            classify_line("Picking up tip well A1 in \"1\""),
            LineKind::PickUp
        );
        assert_eq!(
            classify_line("Aspirating 50.0 uL from well A1 in \"3\" at 1.0 speed"),
            LineKind::Aspirate
        );
        assert_eq!(
            classify_line("Dispensing 50.0 uL into well A2 in \"5\""),
            LineKind::Dispense
        );
        assert_eq!(
            classify_line("Dropping tip well A1 in \"12\""),
            LineKind::DropTip
        );
    }

    #[test]
    fn test_unrelated_lines_are_ignored() {
        for line in [
            "",
            "   ",
            "# transfer buffer to plate",
            "Mixing 3 times with a volume of 20.0 ul",
            "Blowing out at well A1 in \"5\"",
            "aspirating 50.0 uL from well A1 in \"3\"",
        ] {
            assert_eq!(classify_line(line), LineKind::Ignore, "line: {:?}", line);
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            classify_line("\t\tDropping tip well H12 in \"12\"\n"),
            LineKind::DropTip
        );
    }
}
