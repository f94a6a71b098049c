use tilesweep_core::input::Keys;

/// Keypad button for a physical key, by `KeyboardEvent.code` so layouts don't matter.
pub(in crate::app) fn keys_for(code: &str) -> Option<Keys> {
    Some(match code {
        "ArrowUp" => Keys::UP,
        "ArrowDown" => Keys::DOWN,
        "ArrowLeft" => Keys::LEFT,
        "ArrowRight" => Keys::RIGHT,
        "KeyZ" | "KeyJ" => Keys::A,
        "KeyX" | "KeyK" => Keys::B,
        "Enter" => Keys::START,
        "Backspace" => Keys::SELECT,
        "KeyA" => Keys::L,
        "KeyS" => Keys::R,
        _ => return None,
    })
}
