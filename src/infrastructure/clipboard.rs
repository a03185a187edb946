use arboard::Clipboard;

pub struct SystemClipboard;

impl SystemClipboard {
    pub fn get_text() -> Result<String, String> {
        match Clipboard::new() {
            Ok(mut clipboard) => clipboard.get_text().map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn set_text(text: &str) -> Result<(), String> {
        match Clipboard::new() {
            Ok(mut clipboard) => clipboard.set_text(text.to_string()).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
