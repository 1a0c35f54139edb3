use std::fmt;

/// The closed set of classes the door/window model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionClass {
    Door,
    Window,
}

impl DetectionClass {
    /// Map a model class id to a class. Ids outside `{0, 1}` are not part of the model.
    pub fn from_id(id: usize) -> Option<Self> {
        match id {
            0 => Some(Self::Door),
            1 => Some(Self::Window),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "door" => Some(Self::Door),
            "window" => Some(Self::Window),
            _ => None,
        }
    }

    pub fn id(self) -> usize {
        match self {
            Self::Door => 0,
            Self::Window => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Window => "window",
        }
    }

    /// RGB colour used when drawing boxes of this class on saved images
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Door => [0, 0, 255],
            Self::Window => [0, 255, 0],
        }
    }

    /// RGB colour of this class on the interactive canvas
    pub fn canvas_color(self) -> [u8; 3] {
        match self {
            Self::Door => [0x42, 0x85, 0xF4],
            Self::Window => [0xEA, 0x43, 0x35],
        }
    }
}

impl fmt::Display for DetectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected instance in original-image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub confidence: f32,
    pub class: DetectionClass,
}

impl DetectionBox {
    /// Build a box, rejecting degenerate bounds (`x1 >= x2` or `y1 >= y2`).
    pub fn new(
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        confidence: f32,
        class: DetectionClass,
    ) -> Option<Self> {
        if x1 >= x2 || y1 >= y2 {
            return None;
        }

        Some(Self {
            x1,
            y1,
            x2,
            y2,
            confidence: confidence.clamp(0.0, 1.0),
            class,
        })
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Label drawn next to the box, e.g. `door 0.87`
    pub fn label(&self) -> String {
        format!("{} {:.2}", self.class, self.confidence)
    }

    /// Line written to the coordinate listing (without trailing newline)
    pub fn coordinate_line(&self) -> String {
        format!(
            "x1:{} y1:{} x2:{} y2:{} {}",
            self.x1, self.y1, self.x2, self.y2, self.class
        )
    }

    /// Intersection over union of two boxes
    pub fn iou(&self, other: &DetectionBox) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);

        if ix1 >= ix2 || iy1 >= iy2 {
            return 0.0;
        }

        let intersection = (ix2 - ix1) as i64 * (iy2 - iy1) as i64;
        let union = self.area() + other.area() - intersection;
        if union <= 0 {
            return 0.0;
        }

        intersection as f32 / union as f32
    }
}

/// A box mapped into canvas coordinates. Truncation may collapse it, so no ordering invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}
