// Key-symbol translation
// Maps toolkit key symbols (as reported by a key-grab dialog) to injector key names

/// Translate a key symbol such as `Control_L` or `Return` to the injector vocabulary
///
/// Unmapped symbols are lower-cased and passed through.
pub fn translate_keysym(sym: &str) -> String {
    let mapped = match sym {
        "Win_L" | "Super_L" => "winleft",
        "Win_R" | "Super_R" => "winright",
        "Control_L" | "Control_R" => "ctrl",
        "Shift_L" | "Shift_R" => "shift",
        "Alt_L" | "Alt_R" => "alt",
        "Return" | "KP_Enter" => "enter",
        "space" | "Space" => "space",
        "Tab" => "tab",
        "BackSpace" => "backspace",
        "Delete" => "delete",
        "Escape" => "esc",
        "Up" => "up",
        "Down" => "down",
        "Left" => "left",
        "Right" => "right",
        "Caps_Lock" => "capslock",
        "Page_Up" | "Prior" => "pageup",
        "Page_Down" | "Next" => "pagedown",
        "Home" => "home",
        "End" => "end",
        "Insert" => "insert",
        "Num_Lock" => "numlock",
        "Print" => "printscreen",
        "Pause" => "pause",
        _ => return sym.to_lowercase(),
    };
    mapped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert_eq!(translate_keysym("Control_L"), "ctrl");
        assert_eq!(translate_keysym("Control_R"), "ctrl");
        assert_eq!(translate_keysym("Shift_R"), "shift");
        assert_eq!(translate_keysym("Alt_L"), "alt");
        assert_eq!(translate_keysym("Win_L"), "winleft");
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(translate_keysym("Return"), "enter");
        assert_eq!(translate_keysym("Escape"), "esc");
        assert_eq!(translate_keysym("Page_Down"), "pagedown");
        assert_eq!(translate_keysym("Print"), "printscreen");
    }

    #[test]
    fn test_unmapped_symbols_are_lowercased() {
        assert_eq!(translate_keysym("F5"), "f5");
        assert_eq!(translate_keysym("A"), "a");
        assert_eq!(translate_keysym("7"), "7");
        assert_eq!(translate_keysym("ctrl"), "ctrl");
    }
}
