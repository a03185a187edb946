use crate::application::App;
use crate::infrastructure::SystemClipboard;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('v') => {
                    Self::paste_from_clipboard(app);
                    return;
                }
                KeyCode::Char('y') => {
                    Self::copy_result_to_clipboard(app);
                    return;
                }
                KeyCode::Char('u') => {
                    app.clear_input();
                    return;
                }
                _ => {}
            }
        }

        match key {
            KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => app.insert_newline(),
            KeyCode::Enter => app.submit(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Delete => app.delete_forward(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::F(1) => app.toggle_instructions(),
            _ => {}
        }
    }

    /// Bracketed paste from the terminal.
    pub fn handle_paste(app: &mut App, text: &str) {
        app.insert_str(text);
    }

    fn paste_from_clipboard(app: &mut App) {
        match SystemClipboard::get_text() {
            Ok(text) => app.insert_str(&text),
            Err(error) => {
                app.status_message = Some(format!("Paste failed: {}", error));
            }
        }
    }

    fn copy_result_to_clipboard(app: &mut App) {
        let output = app.workflow().output_text.clone();
        if output.is_empty() {
            app.status_message = Some("No result to copy".to_string());
            return;
        }
        app.status_message = Some(match SystemClipboard::set_text(&output) {
            Ok(()) => "Result copied to clipboard".to_string(),
            Err(error) => format!("Copy failed: {}", error),
        });
    }
}
