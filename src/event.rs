/// Symbolic key identifier delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

/// Pointer coordinates are in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed([f64; 2]),
    PointerMoved([f64; 2]),
    KeyPressed(Key),
}
