//! Validation of operator input, one parser per shell state.
//!
//! Every parser is pure: it takes the raw line and returns what the shell
//! should do with it. Positions shown to the operator are 1-based; parsed
//! indices are 0-based.

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Process a still image.
    Image,
    /// Process a video.
    Video,
    /// Leave the shell.
    Exit,
}

/// Parse a main menu answer: `1`, `2` or `exit`.
pub fn parse_menu(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Image),
        "2" => Some(MenuChoice::Video),
        other if other.eq_ignore_ascii_case("exit") => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Answer to a file selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the listed files.
    Pick(usize),
    /// Leave the shell.
    Exit,
}

/// Why a selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Not a whole number.
    NotANumber,
    /// A number outside `1..=len`.
    OutOfRange,
}

/// Parse a file selection among `len` listed entries.
pub fn parse_selection(input: &str, len: usize) -> Result<Selection, SelectionError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("exit") {
        return Ok(Selection::Exit);
    }
    let position = parse_position(input).ok_or(SelectionError::NotANumber)?;
    to_index(position, len)
        .map(Selection::Pick)
        .ok_or(SelectionError::OutOfRange)
}

/// Parse a drill-down pick among `len` detections. Anything that is not a
/// listed position (including `skip`) means no pick.
pub fn parse_pick(input: &str, len: usize) -> Option<usize> {
    parse_position(input.trim()).and_then(|position| to_index(position, len))
}

/// Answer to the video result inspection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectCommand {
    /// Show the result at this zero-based index.
    Pick(usize),
    /// Stop inspecting.
    Done,
    /// Unrecognized answer; ask again.
    Invalid,
}

/// Parse an inspection answer: a listed position or `done`.
pub fn parse_inspect(input: &str, len: usize) -> InspectCommand {
    let input = input.trim();
    if input.eq_ignore_ascii_case("done") {
        return InspectCommand::Done;
    }
    parse_pick(input, len).map_or(InspectCommand::Invalid, InspectCommand::Pick)
}

/// Digits only; signs and spaces are rejected.
fn parse_position(input: &str) -> Option<usize> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

fn to_index(position: usize, len: usize) -> Option<usize> {
    (1..=len).contains(&position).then(|| position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu() {
        assert_eq!(parse_menu("1"), Some(MenuChoice::Image));
        assert_eq!(parse_menu(" 2 \n"), Some(MenuChoice::Video));
        assert_eq!(parse_menu("EXIT"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu("3"), None);
        assert_eq!(parse_menu(""), None);
    }

    #[test]
    fn test_parse_selection_valid() {
        assert_eq!(parse_selection("1", 3), Ok(Selection::Pick(0)));
        assert_eq!(parse_selection("3\n", 3), Ok(Selection::Pick(2)));
        assert_eq!(parse_selection("Exit", 3), Ok(Selection::Exit));
    }

    #[test]
    fn test_parse_selection_rejects_bad_input() {
        assert_eq!(parse_selection("abc", 3), Err(SelectionError::NotANumber));
        assert_eq!(parse_selection("-1", 3), Err(SelectionError::NotANumber));
        assert_eq!(parse_selection("0", 3), Err(SelectionError::OutOfRange));
        assert_eq!(parse_selection("4", 3), Err(SelectionError::OutOfRange));
        assert_eq!(
            parse_selection("99999999999999999999999", 3),
            Err(SelectionError::NotANumber)
        );
    }

    #[test]
    fn test_parse_pick() {
        assert_eq!(parse_pick("2", 2), Some(1));
        assert_eq!(parse_pick("skip", 2), None);
        assert_eq!(parse_pick("3", 2), None);
        assert_eq!(parse_pick("+1", 2), None);
    }

    #[test]
    fn test_parse_inspect() {
        assert_eq!(parse_inspect("done", 4), InspectCommand::Done);
        assert_eq!(parse_inspect("DONE\n", 4), InspectCommand::Done);
        assert_eq!(parse_inspect("4", 4), InspectCommand::Pick(3));
        assert_eq!(parse_inspect("5", 4), InspectCommand::Invalid);
        assert_eq!(parse_inspect("next", 4), InspectCommand::Invalid);
    }
}
