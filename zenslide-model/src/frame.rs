/// Visual properties the engine animates on a slide surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub opacity: f32,
    pub scale: f32,
    /// Horizontal offset in pixels, used while dragging.
    pub offset_x: f32,
}

impl SlideFrame {
    pub const VISIBLE: SlideFrame = SlideFrame {
        opacity: 1.0,
        scale: 1.0,
        offset_x: 0.0,
    };

    pub const HIDDEN: SlideFrame = SlideFrame {
        opacity: 0.0,
        scale: 1.0,
        offset_x: 0.0,
    };

    pub fn with_offset(self, offset_x: f32) -> Self {
        Self { offset_x, ..self }
    }

    /// Linear blend between two frames; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: SlideFrame, t: f32) -> SlideFrame {
        let t = t.clamp(0.0, 1.0);
        SlideFrame {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            scale: self.scale + (to.scale - self.scale) * t,
            offset_x: self.offset_x + (to.offset_x - self.offset_x) * t,
        }
    }
}

impl Default for SlideFrame {
    fn default() -> Self {
        SlideFrame::HIDDEN
    }
}
