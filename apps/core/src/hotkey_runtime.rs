use thiserror::Error;
use tracing::info;

use crate::hotkey::{parse_hotkey, KeyBinding};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyRuntimeError {
    #[error("invalid hotkey: {0}")]
    InvalidHotkey(String),
    #[error("no key code for '{0}'")]
    UnknownKey(String),
    #[error("shortcut registration failed: {0}")]
    RegistrationFailed(String),
}

/// Host shortcut, with the key already resolved through the key-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key_code: u32,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRegistration {
    pub label: String,
    pub shortcut: Shortcut,
}

pub trait KeyCodeTable {
    fn code_for(&self, key_name: &str) -> Option<u32>;
}

/// DOM `keyCode` values, which is what the player's keyboard table exposes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardKeyCodes;

impl KeyCodeTable for StandardKeyCodes {
    fn code_for(&self, key_name: &str) -> Option<u32> {
        let upper = key_name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "BACKSPACE" => return Some(8),
            "TAB" => return Some(9),
            "ENTER" => return Some(13),
            "ESCAPE" | "ESC" => return Some(27),
            "SPACE" => return Some(32),
            "ARROWLEFT" | "LEFT" => return Some(37),
            "ARROWUP" | "UP" => return Some(38),
            "ARROWRIGHT" | "RIGHT" => return Some(39),
            "ARROWDOWN" | "DOWN" => return Some(40),
            _ => {}
        }

        if let Some(number) = upper.strip_prefix('F') {
            if let Ok(parsed) = number.parse::<u32>() {
                return (1..=24).contains(&parsed).then_some(111 + parsed);
            }
        }

        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Some(c as u32),
            _ => None,
        }
    }
}

/// The player's global key-binding registry. The host invokes the palette
/// toggle whenever a registered shortcut fires.
pub trait ShortcutRegistry {
    fn register_shortcut(&mut self, shortcut: Shortcut) -> Result<(), HotkeyRuntimeError>;
    fn unregister_all(&mut self) -> Result<(), HotkeyRuntimeError>;
}

#[derive(Default)]
pub struct MockShortcutRegistry {
    registrations: Vec<Shortcut>,
}

impl MockShortcutRegistry {
    pub fn registrations(&self) -> &[Shortcut] {
        &self.registrations
    }
}

impl ShortcutRegistry for MockShortcutRegistry {
    fn register_shortcut(&mut self, shortcut: Shortcut) -> Result<(), HotkeyRuntimeError> {
        if self.registrations.contains(&shortcut) {
            return Err(HotkeyRuntimeError::RegistrationFailed(
                "shortcut already registered".to_string(),
            ));
        }
        self.registrations.push(shortcut);
        Ok(())
    }

    fn unregister_all(&mut self) -> Result<(), HotkeyRuntimeError> {
        self.registrations.clear();
        Ok(())
    }
}

pub fn resolve_shortcut(
    binding: &KeyBinding,
    table: &dyn KeyCodeTable,
) -> Result<Shortcut, HotkeyRuntimeError> {
    let key_code = table
        .code_for(&binding.key)
        .ok_or_else(|| HotkeyRuntimeError::UnknownKey(binding.key.clone()))?;

    Ok(Shortcut {
        key_code,
        ctrl: binding.ctrl,
        shift: binding.shift,
        alt: binding.alt,
    })
}

/// Registers the single palette toggle shortcut.
pub fn register_toggle(
    registry: &mut dyn ShortcutRegistry,
    table: &dyn KeyCodeTable,
    hotkey: &str,
) -> Result<ShortcutRegistration, HotkeyRuntimeError> {
    let binding = parse_hotkey(hotkey).map_err(HotkeyRuntimeError::InvalidHotkey)?;
    let shortcut = resolve_shortcut(&binding, table)?;
    registry.register_shortcut(shortcut)?;

    let label = binding.to_string();
    info!(hotkey = %label, key_code = shortcut.key_code, "toggle shortcut registered");
    Ok(ShortcutRegistration { label, shortcut })
}
