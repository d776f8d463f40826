use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: isize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Esc: clear the query, or leave when there is nothing to clear.
    Dismiss,
    Choose,
    MoveSelection(isize),
    SwitchLibrary,
    Rescan,
    InputKey(KeyEvent),
}

pub fn map_key_to_command(key: KeyEvent) -> Command {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('r') if ctrl => Command::Rescan,
        KeyCode::Esc => Command::Dismiss,
        KeyCode::Enter => Command::Choose,
        KeyCode::Up => Command::MoveSelection(-1),
        KeyCode::Down => Command::MoveSelection(1),
        KeyCode::PageUp => Command::MoveSelection(-PAGE),
        KeyCode::PageDown => Command::MoveSelection(PAGE),
        KeyCode::F(2) => Command::SwitchLibrary,
        _ => Command::InputKey(key),
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, map_key_to_command};
    use crate::terminal::{KeyCode, KeyEvent};

    #[test]
    fn navigation_keys_map_to_commands() {
        assert_eq!(map_key_to_command(KeyEvent::ctrl('c')), Command::Quit);
        assert_eq!(map_key_to_command(KeyEvent::ctrl('r')), Command::Rescan);
        assert_eq!(
            map_key_to_command(KeyEvent::plain(KeyCode::PageDown)),
            Command::MoveSelection(10)
        );
        assert_eq!(
            map_key_to_command(KeyEvent::plain(KeyCode::F(2))),
            Command::SwitchLibrary
        );
    }

    #[test]
    fn editing_keys_pass_through() {
        let tab = KeyEvent::plain(KeyCode::Tab);
        assert_eq!(map_key_to_command(tab), Command::InputKey(tab));
        let select_all = KeyEvent::ctrl('a');
        assert_eq!(map_key_to_command(select_all), Command::InputKey(select_all));
    }
}
