use crate::settings::validate_hotkey;

/// Shortcut in the shape the player's key-binding registry expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl std::fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

pub fn parse_hotkey(input: &str) -> Result<KeyBinding, String> {
    let canonical = validate_hotkey(input)?;
    let parts: Vec<&str> = canonical.split('+').collect();
    let (key, modifiers) = parts
        .split_last()
        .ok_or_else(|| "invalid hotkey".to_string())?;

    Ok(KeyBinding {
        key: key.to_string(),
        ctrl: modifiers.contains(&"Ctrl"),
        shift: modifiers.contains(&"Shift"),
        alt: modifiers.contains(&"Alt"),
    })
}
