//! Frame state for a one-line spinner; drawing is left to the caller.

const FRAMES_DOTS: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
const FRAMES_ASCII: &[char] = &['-', '\\', '|', '/'];

#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [char],
    current: usize,
    message: String,
}

impl Spinner {
    pub fn new(supports_unicode: bool, message: impl Into<String>) -> Self {
        Self {
            frames: if supports_unicode {
                FRAMES_DOTS
            } else {
                FRAMES_ASCII
            },
            current: 0,
            message: message.into(),
        }
    }

    pub fn frame(&self) -> char {
        self.frames[self.current % self.frames.len()]
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.frames.len();
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.frame(), self.message)
    }
}
