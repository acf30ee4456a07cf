use web_sys::window;

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|list| list.matches())
        .unwrap_or(false)
}

/// Visitor preferences that switch decorative motion off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPrefs {
    pub reduced_motion: bool,
    pub fine_pointer: bool,
}

impl MotionPrefs {
    pub fn detect() -> Self {
        MotionPrefs {
            reduced_motion: media_matches("(prefers-reduced-motion: reduce)"),
            fine_pointer: media_matches("(pointer:fine)"),
        }
    }

    /// Magnetic buttons, tilt and the cursor glow need a mouse and a visitor
    /// who hasn't asked for less motion.
    pub fn pointer_effects(&self) -> bool {
        !self.reduced_motion && self.fine_pointer
    }
}
