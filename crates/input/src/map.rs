//! Key mapping from terminal events to key codes and system commands.
//!
//! Gameplay keys go through [`KeyBindings`](crate::KeyBindings) as physical
//! key names (`"KeyW"`, `"ArrowLeft"`, `"Space"`). A handful of system keys
//! are recognized independently of the bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Commands handled by the runner rather than the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKey {
    Pause,
    Reset,
    /// Bound to L; does nothing yet
    Reserved,
    TurnViewLeft,
    TurnViewRight,
}

/// What a key event means for the keyboard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyTransition {
    Down(String),
    Up(String),
}

/// Physical key name for a terminal key code
pub fn key_code_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{c}"),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => return None,
    };
    Some(name)
}

/// Map a key event to a press or release of a named key.
///
/// Terminal auto-repeat arrives as `Repeat` and counts as another press.
pub fn key_transition(key: KeyEvent) -> Option<KeyTransition> {
    let name = key_code_name(key.code)?;
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(KeyTransition::Down(name)),
        KeyEventKind::Release => Some(KeyTransition::Up(name)),
    }
}

/// System command for a key press, if any
pub fn system_key(key: KeyEvent) -> Option<SystemKey> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(SystemKey::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(SystemKey::Reset),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(SystemKey::Reserved),
        KeyCode::Left => Some(SystemKey::TurnViewLeft),
        KeyCode::Right => Some(SystemKey::TurnViewRight),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_letters_use_key_names() {
        assert_eq!(key_code_name(KeyCode::Char('w')).as_deref(), Some("KeyW"));
        assert_eq!(key_code_name(KeyCode::Char('W')).as_deref(), Some("KeyW"));
        assert_eq!(key_code_name(KeyCode::Char('7')).as_deref(), Some("Digit7"));
        assert_eq!(key_code_name(KeyCode::Char(' ')).as_deref(), Some("Space"));
        assert_eq!(key_code_name(KeyCode::Left).as_deref(), Some("ArrowLeft"));
        assert_eq!(key_code_name(KeyCode::F(1)), None);
    }

    #[test]
    fn test_press_and_release_transitions() {
        assert_eq!(
            key_transition(KeyEvent::from(KeyCode::Char('a'))),
            Some(KeyTransition::Down("KeyA".to_string()))
        );
        assert_eq!(
            key_transition(release(KeyCode::Char('a'))),
            Some(KeyTransition::Up("KeyA".to_string()))
        );
    }

    #[test]
    fn test_system_keys() {
        assert_eq!(system_key(KeyEvent::from(KeyCode::Char('p'))), Some(SystemKey::Pause));
        assert_eq!(system_key(KeyEvent::from(KeyCode::Char('R'))), Some(SystemKey::Reset));
        assert_eq!(system_key(KeyEvent::from(KeyCode::Char('l'))), Some(SystemKey::Reserved));
        assert_eq!(system_key(KeyEvent::from(KeyCode::Left)), Some(SystemKey::TurnViewLeft));
        assert_eq!(system_key(KeyEvent::from(KeyCode::Char('w'))), None);
        assert_eq!(system_key(release(KeyCode::Char('p'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}
