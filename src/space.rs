//! Numbering of Mission Control spaces across displays.
//!
//! The window server reports spaces per display; users think of them as one
//! global, 1-based sequence. This module computes that mapping from a typed
//! snapshot, excluding fullscreen-app spaces, which Mission Control does not
//! number.

use thiserror::Error;

/// Identifier the window server uses for the primary display in the managed
/// display list.
pub const MAIN_DISPLAY: &str = "Main";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SpaceId(u64);

impl SpaceId {
    pub fn new(id: u64) -> SpaceId {
        SpaceId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<SpaceId> for u64 {
    fn from(val: SpaceId) -> Self {
        val.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: SpaceId,
    /// Spaces backed by a tile layout manager host a single fullscreen app
    /// and are excluded from numbering.
    pub is_fullscreen: bool,
}

/// One display's entry in the window server's managed display list, in the
/// order the server reports its spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpaces {
    pub display_uuid: String,
    pub current_space: SpaceId,
    pub spaces: Vec<Space>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no display matched the active menu bar display")]
    NoActiveDisplay,
    #[error("active space {} is excluded from numbering", .0.get())]
    Unnumbered(SpaceId),
}

/// Computes the 1-based ordinal of the active space among all non-fullscreen
/// spaces, concatenated in display order.
///
/// A display is active if its identifier is [`MAIN_DISPLAY`] or matches
/// `active_display`; when both match different displays, the later one in
/// enumeration order wins. An active space that is itself fullscreen has no
/// ordinal and resolves to [`ResolveError::Unnumbered`].
pub fn active_space_number(
    displays: &[DisplaySpaces],
    active_display: &str,
) -> Result<usize, ResolveError> {
    let mut active_space = None;
    let mut numbered = Vec::new();

    for display in displays {
        if display.display_uuid == MAIN_DISPLAY || display.display_uuid == active_display {
            active_space = Some(display.current_space);
        }
        numbered.extend(display.spaces.iter().filter(|s| !s.is_fullscreen).map(|s| s.id));
    }

    let active_space = active_space.ok_or(ResolveError::NoActiveDisplay)?;
    numbered
        .iter()
        .position(|&id| id == active_space)
        .map(|idx| idx + 1)
        .ok_or(ResolveError::Unnumbered(active_space))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn space(id: u64) -> Space {
        Space { id: SpaceId::new(id), is_fullscreen: false }
    }

    fn fullscreen(id: u64) -> Space {
        Space { id: SpaceId::new(id), is_fullscreen: true }
    }

    fn display(uuid: &str, current: u64, spaces: Vec<Space>) -> DisplaySpaces {
        DisplaySpaces {
            display_uuid: uuid.to_string(),
            current_space: SpaceId::new(current),
            spaces,
        }
    }

    #[test]
    fn numbers_active_space_on_single_display() {
        let displays = vec![display("Main", 12, vec![space(11), space(12), space(13)])];

        assert_eq!(active_space_number(&displays, "Main"), Ok(2));
    }

    #[test]
    fn counts_spaces_across_displays_in_display_order() {
        let displays = vec![
            display("Main", 101, vec![space(101), space(102)]),
            display("B1F3", 202, vec![space(201), space(202)]),
        ];

        assert_eq!(active_space_number(&displays, "Main"), Ok(1));
        assert_eq!(active_space_number(&displays, "B1F3"), Ok(4));
    }

    #[test]
    fn fullscreen_spaces_do_not_shift_numbering() {
        let with_fullscreen = vec![
            display("Main", 103, vec![space(101), fullscreen(102), space(103)]),
            display("B1F3", 201, vec![fullscreen(200), space(201)]),
        ];
        let without = vec![
            display("Main", 103, vec![space(101), space(103)]),
            display("B1F3", 201, vec![space(201)]),
        ];

        assert_eq!(active_space_number(&with_fullscreen, "Main"), Ok(2));
        assert_eq!(
            active_space_number(&with_fullscreen, "Main"),
            active_space_number(&without, "Main"),
        );
    }

    #[test]
    fn active_fullscreen_space_has_no_number() {
        // Display 1 is current on its fullscreen space 102; the flat list is
        // [101, 201, 202] and 102 is not in it.
        let displays = vec![
            display("Main", 102, vec![space(101), fullscreen(102)]),
            display("B1F3", 201, vec![space(201), space(202)]),
        ];

        assert_eq!(
            active_space_number(&displays, "Main"),
            Err(ResolveError::Unnumbered(SpaceId::new(102))),
        );
    }

    #[test]
    fn no_matching_display_reports_no_active_display() {
        let displays = vec![display("B1F3", 11, vec![space(11)])];

        assert_eq!(
            active_space_number(&displays, "C2E4"),
            Err(ResolveError::NoActiveDisplay),
        );
    }

    #[test]
    fn later_matching_display_wins_tie_break() {
        // Both the sentinel and the queried identifier match, on different
        // displays; the assignment is unconditional per match, so the later
        // display's current space is the one numbered.
        let displays = vec![
            display("Main", 11, vec![space(11), space(12)]),
            display("B1F3", 22, vec![space(21), space(22)]),
        ];

        assert_eq!(active_space_number(&displays, "B1F3"), Ok(4));
    }

    #[test]
    fn skipped_display_does_not_disturb_other_displays() {
        // A display record dropped by the parser (missing "Spaces") is simply
        // absent from the snapshot; the remaining displays still number.
        let displays = vec![display("B1F3", 22, vec![space(21), space(22)])];

        assert_eq!(active_space_number(&displays, "B1F3"), Ok(2));
    }

    #[test]
    fn resolution_is_idempotent_on_unchanged_snapshot() {
        let displays = vec![
            display("Main", 12, vec![space(11), space(12)]),
            display("B1F3", 21, vec![space(21), fullscreen(23)]),
        ];

        let first = active_space_number(&displays, "Main");
        let second = active_space_number(&displays, "Main");
        assert_eq!(first, second);
        assert_eq!(first, Ok(2));
    }

    #[test]
    fn result_is_within_flat_list_bounds() {
        let displays = vec![
            display("Main", 13, vec![space(11), space(12), space(13), fullscreen(14)]),
            display("B1F3", 21, vec![space(21)]),
        ];
        let total_numbered = 4;

        let number = active_space_number(&displays, "Main").unwrap();
        assert!(number >= 1 && number <= total_numbered);
    }

    #[test]
    fn display_with_no_spaces_contributes_nothing() {
        let displays = vec![
            display("Main", 11, vec![]),
            display("B1F3", 21, vec![space(21), space(11)]),
        ];

        // The active display's current space is found among another
        // display's spaces.
        assert_eq!(active_space_number(&displays, "Main"), Ok(2));
    }
}
