use super::NodeKind;
use image::Rgba;

/// Outline drawn for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Oval,
    Diamond,
    Rectangle,
    Parallelogram,
}

/// Fixed drawing style for one node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub shape: Shape,
    pub fill: Rgba<u8>,
    pub border: Rgba<u8>,
    /// Border width in world units; scaled by the render resolution.
    pub border_width: f64,
    /// Half extents of the shape in world units.
    pub half_width: f64,
    pub half_height: f64,
}

const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

impl NodeStyle {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Start => Self {
                shape: Shape::Oval,
                fill: rgb(0x90EE90),
                border: rgb(0x228B22),
                border_width: 0.04,
                half_width: 1.0,
                half_height: 0.4,
            },
            NodeKind::End => Self {
                shape: Shape::Oval,
                fill: rgb(0xFFB6C1),
                border: rgb(0xDC143C),
                border_width: 0.04,
                half_width: 1.0,
                half_height: 0.4,
            },
            NodeKind::Decision => Self {
                shape: Shape::Diamond,
                fill: rgb(0x87CEEB),
                border: rgb(0x4169E1),
                border_width: 0.04,
                half_width: 1.0,
                half_height: 0.4,
            },
            NodeKind::Process => Self {
                shape: Shape::Rectangle,
                fill: rgb(0xF0F8FF),
                border: rgb(0x4682B4),
                border_width: 0.03,
                half_width: 1.0,
                half_height: 0.3,
            },
            NodeKind::Input => Self {
                shape: Shape::Parallelogram,
                fill: rgb(0xE6E6FA),
                border: rgb(0x9370DB),
                border_width: 0.03,
                half_width: 1.0,
                half_height: 0.3,
            },
            NodeKind::Output => Self {
                shape: Shape::Parallelogram,
                fill: rgb(0xFFFACD),
                border: rgb(0xDAA520),
                border_width: 0.03,
                half_width: 1.0,
                half_height: 0.3,
            },
        }
    }

    /// The same shape grown by `by` world units on every side.
    pub fn inflated(&self, by: f64) -> Self {
        Self {
            half_width: (self.half_width + by).max(0.0),
            half_height: (self.half_height + by).max(0.0),
            ..*self
        }
    }

    /// Polygon outline in world units around `(x, y)`; `None` for ovals.
    pub fn outline(&self, x: f64, y: f64) -> Option<Vec<(f64, f64)>> {
        let (w, h) = (self.half_width, self.half_height);
        match self.shape {
            Shape::Oval => None,
            Shape::Diamond => Some(vec![(x, y + h), (x + w, y), (x, y - h), (x - w, y)]),
            Shape::Rectangle => Some(vec![
                (x - w, y - h),
                (x - w, y + h),
                (x + w, y + h),
                (x + w, y - h),
            ]),
            Shape::Parallelogram => {
                let slant = 0.7 * w;
                Some(vec![
                    (x - w, y - h),
                    (x - w + slant, y + h),
                    (x + w, y + h),
                    (x + w - slant, y - h),
                ])
            }
        }
    }
}
