//! Rendering collaborator
//!
//! Shapes describe themselves to a [`Canvas`] as a series of [`Primitive`]s
//! together with their [`AttributeSet`]. Shapes keep no rendering state and
//! the canvas owns every device resource.

use crate::shapes::AttributeSet;
use crate::types::{PolyPoint, Transform, Vector2, Vector3};

/// One drawable piece of geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<'a> {
    Point {
        position: Vector3,
    },
    Line {
        start: Vector3,
        end: Vector3,
    },
    /// Vertices with bulged segments
    Polyline {
        vertices: &'a [PolyPoint],
        closed: bool,
        filled: bool,
    },
    /// Straight-segment path
    Path {
        points: &'a [Vector3],
        closed: bool,
        filled: bool,
    },
    Circle {
        center: Vector3,
        radius: f64,
    },
    /// Angles in radians, swept counter-clockwise
    Arc {
        center: Vector3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Ellipse {
        center: Vector3,
        major_axis: Vector3,
        ratio: f64,
        start_param: f64,
        end_param: f64,
    },
    Spline {
        degree: i32,
        control_points: &'a [Vector3],
        fit_points: &'a [Vector3],
        knots: &'a [f64],
        weights: &'a [f64],
        closed: bool,
    },
    Text {
        position: Vector3,
        /// Baseline direction; its length carries no meaning
        direction: Vector2,
        height: f64,
        text: &'a str,
        style: &'a str,
        upside_down: bool,
    },
    Image {
        insertion_point: Vector3,
        u_vector: Vector3,
        v_vector: Vector3,
        width: u32,
        height: u32,
        file_name: &'a str,
    },
    /// Semi-infinite (`bidirectional == false`) or infinite line
    Ray {
        origin: Vector3,
        direction: Vector3,
        bidirectional: bool,
    },
    BlockReference {
        name: &'a str,
        transform: Transform,
    },
}

/// Render target for shapes
pub trait Canvas {
    /// Render one primitive with the attributes of the shape emitting it
    fn render(&mut self, primitive: Primitive<'_>, attributes: &AttributeSet);

    /// A block definition starts; primitives up to [`Canvas::end_block`]
    /// belong to it
    fn begin_block(&mut self, _name: &str, _base_point: Vector3) {}

    fn end_block(&mut self) {}
}

/// Canvas that keeps a count of everything it was asked to render
#[derive(Debug, Default, Clone)]
pub struct CountingCanvas {
    pub primitives: usize,
    pub blocks: usize,
    pub invisible: usize,
}

impl Canvas for CountingCanvas {
    fn render(&mut self, _primitive: Primitive<'_>, attributes: &AttributeSet) {
        self.primitives += 1;
        if !attributes.visible {
            self.invisible += 1;
        }
    }

    fn begin_block(&mut self, _name: &str, _base_point: Vector3) {
        self.blocks += 1;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Canvas recording a debug line per primitive
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn render(&mut self, primitive: Primitive<'_>, _attributes: &AttributeSet) {
            self.calls.push(format!("{:?}", primitive));
        }

        fn begin_block(&mut self, name: &str, _base_point: Vector3) {
            self.calls.push(format!("begin {}", name));
        }

        fn end_block(&mut self) {
            self.calls.push("end".to_string());
        }
    }
}
