// ABOUTME: Lightbox selection state for the gallery.
// ABOUTME: Tracks which artwork is open and steps through neighbours without wrapping.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Close,
    /// Now showing the item at this index
    Moved(usize),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    current: usize,
    len: usize,
}

impl Lightbox {
    /// Open on the item at `index`, if it exists
    pub fn open(index: usize, len: usize) -> Option<Self> {
        (index < len).then_some(Self {
            current: index,
            len,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.len
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Step forward; returns false at the last item
    pub fn go_next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Step back; returns false at the first item
    pub fn go_prev(&mut self) -> bool {
        if self.has_prev() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn handle_key(&mut self, key: LightboxKey) -> LightboxAction {
        let moved = match key {
            LightboxKey::Escape => return LightboxAction::Close,
            LightboxKey::ArrowRight => self.go_next(),
            LightboxKey::ArrowLeft => self.go_prev(),
        };
        if moved {
            LightboxAction::Moved(self.current)
        } else {
            LightboxAction::Ignored
        }
    }
}
