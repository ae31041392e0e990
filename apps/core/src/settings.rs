use std::collections::BTreeSet;

pub fn validate_hotkey(input: &str) -> Result<String, String> {
    let raw_parts: Vec<&str> = input
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    if raw_parts.len() < 2 {
        return Err("Hotkey must include at least one modifier and one key.".to_string());
    }

    let key_raw = raw_parts[raw_parts.len() - 1];
    let key = normalize_key(key_raw)?;

    let mut modifiers: BTreeSet<&'static str> = BTreeSet::new();
    for part in &raw_parts[..raw_parts.len() - 1] {
        let modifier = normalize_modifier(part)?;
        modifiers.insert(modifier);
    }

    let canonical = canonical_hotkey(&modifiers, &key);
    if is_reserved_hotkey(&canonical) {
        return Err("This hotkey is already used by the player. Choose a different one.".to_string());
    }

    Ok(canonical)
}

pub fn validate_max_results(value: u16) -> Result<(), String> {
    if (1..=50).contains(&value) {
        Ok(())
    } else {
        Err("Max results must be between 1 and 50.".to_string())
    }
}

pub fn validate_recent_limit(value: u16) -> Result<(), String> {
    if (1..=100).contains(&value) {
        Ok(())
    } else {
        Err("Recent search limit must be between 1 and 100.".to_string())
    }
}

// The player's shortcut registry only knows ctrl; cmd is folded into it.
fn normalize_modifier(input: &str) -> Result<&'static str, String> {
    match input.to_ascii_lowercase().as_str() {
        "ctrl" | "control" | "cmd" | "command" => Ok("Ctrl"),
        "alt" | "option" => Ok("Alt"),
        "shift" => Ok("Shift"),
        "win" | "windows" | "meta" | "super" => {
            Err("Win/Meta combinations are not supported.".to_string())
        }
        _ => Err(format!("Unsupported modifier '{input}'. Use Ctrl, Alt, or Shift.")),
    }
}

fn normalize_key(input: &str) -> Result<String, String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err("Hotkey key is required.".to_string());
    }

    let upper = raw.to_ascii_uppercase();
    if upper == "SPACE" {
        return Ok("Space".to_string());
    }

    if let Some(number) = upper.strip_prefix('F') {
        if let Ok(parsed) = number.parse::<u8>() {
            if (1..=24).contains(&parsed) {
                return Ok(format!("F{parsed}"));
            }
            return Err("Function key must be between F1 and F24.".to_string());
        }
    }

    if upper.len() == 1 {
        let c = upper.chars().next().unwrap_or_default();
        if c.is_ascii_alphanumeric() {
            return Ok(upper);
        }
    }

    Err("Key must be A-Z, 0-9, Space, or F1-F24.".to_string())
}

fn canonical_hotkey(modifiers: &BTreeSet<&'static str>, key: &str) -> String {
    let mut ordered = Vec::new();
    if modifiers.contains("Ctrl") {
        ordered.push("Ctrl");
    }
    if modifiers.contains("Alt") {
        ordered.push("Alt");
    }
    if modifiers.contains("Shift") {
        ordered.push("Shift");
    }
    ordered.push(key);
    ordered.join("+")
}

fn is_reserved_hotkey(canonical: &str) -> bool {
    matches!(
        canonical,
        "Ctrl+Q" | "Ctrl+W" | "Ctrl+R" | "Ctrl+L" | "Ctrl+Shift+I" | "Alt+F4" | "Ctrl+Space"
    )
}
