//! Test drawing builders.
//!
//! `sample_shape()` builds a populated instance of any registered shape
//! kind, and `create_all_shapes_drawing()` lays one of each out on a grid
//! together with line types, layers and a block definition.

#![allow(dead_code)]

use cadshape::shapes::registry::registered;
use cadshape::shapes::*;
use cadshape::tables::{Layer, LayerFlags, LineType};
use cadshape::types::{Color, Cookie, Handle, PolyPoint, Vector2, Vector3};
use cadshape::Drawing;
use std::f64::consts::PI;
use std::time::Duration;

/// A populated shape of `kind` near `origin`, or `None` for kinds that are
/// not shapes in a drawing's list (sentinel, layer, drawing).
pub fn sample_shape(kind: ShapeKind, origin: Vector3) -> Option<ShapeType> {
    let at = |x: f64, y: f64| origin + Vector3::new(x, y, 0.0);
    let dimension = |dimension_type: DimensionType| {
        let mut dim = Dimension::new(dimension_type);
        dim.first_point = at(0.0, 0.0);
        dim.second_point = at(10.0, 0.0);
        dim.third_point = at(5.0, 5.0);
        dim.arc_point = at(5.0, 3.0);
        dim.definition_point = at(10.0, 2.0);
        dim.text_mid_point = at(5.0, 2.0);
        dim.direction = Vector2::from_angle(0.2);
        dim.measurement = 10.0;
        ShapeType::Dimension(dim)
    };

    let shape = match kind {
        ShapeKind::None | ShapeKind::Layer | ShapeKind::Drawing => return None,
        ShapeKind::Face3D => {
            let mut face = Face3D::new([at(0.0, 0.0), at(4.0, 0.0), at(4.0, 3.0), at(0.0, 3.0)]);
            face.invisible_edges = InvisibleEdgeFlags::SECOND;
            ShapeType::Face3D(face)
        }
        ShapeKind::Arc => {
            let mut arc = Arc::from_angles(at(0.0, 0.0), 5.0, 0.25, PI);
            arc.thickness = 0.5;
            ShapeType::Arc(arc)
        }
        ShapeKind::Block => {
            let mut block = Block::new("SAMPLE", origin).with_description("nested sample");
            block.add_shape(ShapeType::Line(Line::from_points(at(0.0, 0.0), at(2.0, 2.0))));
            block.add_shape(ShapeType::Circle(Circle::from_center_radius(at(1.0, 1.0), 1.0)));
            ShapeType::Block(block)
        }
        ShapeKind::Circle => ShapeType::Circle(Circle::from_center_radius(at(0.0, 0.0), 5.0)),
        ShapeKind::Dimension => dimension(DimensionType::Generic),
        ShapeKind::DimAligned => dimension(DimensionType::Aligned),
        ShapeKind::DimLinear => dimension(DimensionType::Linear),
        ShapeKind::DimRadial => dimension(DimensionType::Radial),
        ShapeKind::DimDiametric => dimension(DimensionType::Diametric),
        ShapeKind::DimAngular => dimension(DimensionType::Angular),
        ShapeKind::DimAngular3P => dimension(DimensionType::Angular3Point),
        ShapeKind::DimOrdinate => dimension(DimensionType::Ordinate),
        ShapeKind::Ellipse => {
            let mut ellipse = Ellipse::from_axes(at(0.0, 0.0), Vector3::new(8.0, 2.0, 0.0), 0.5);
            ellipse.start_param = 0.3;
            ellipse.end_param = 4.0;
            ShapeType::Ellipse(ellipse)
        }
        ShapeKind::Hatch => {
            let mut hatch = Hatch::new();
            hatch.pattern_name = "ANSI31".to_string();
            hatch.pattern_direction = Vector2::from_angle(PI / 4.0);
            hatch.pattern_scale = 2.0;
            hatch.boundaries.push(HatchBoundary::new(vec![
                PolyPoint::from_point(at(0.0, 0.0), 0.0),
                PolyPoint::from_point(at(6.0, 0.0), 0.4),
                PolyPoint::from_point(at(6.0, 4.0), 0.0),
                PolyPoint::from_point(at(0.0, 4.0), 0.0),
            ]));
            ShapeType::Hatch(hatch)
        }
        ShapeKind::Image => {
            let mut image = Image::new("site_photo.png", 640, 480);
            image.insertion_point = at(0.0, 0.0);
            image.u_vector = Vector3::new(0.01, 0.0, 0.0);
            image.v_vector = Vector3::new(0.0, 0.01, 0.0);
            image.display_flags |= ImageDisplayFlags::USE_CLIPPING_BOUNDARY;
            ShapeType::Image(image)
        }
        ShapeKind::Insert => {
            let mut insert = Insert::new("SAMPLE", at(0.0, 0.0));
            insert.scale = Vector3::new(2.0, 1.5, 1.0);
            insert.rotation = 0.6;
            ShapeType::Insert(insert)
        }
        ShapeKind::Leader => {
            let mut leader = Leader::new();
            leader.vertices = vec![at(0.0, 0.0), at(3.0, 3.0), at(6.0, 3.0)];
            ShapeType::Leader(leader)
        }
        ShapeKind::Line => ShapeType::Line(Line::from_points(at(0.0, 0.0), at(10.0, 5.0))),
        ShapeKind::LwPolyline => {
            let mut poly = LwPolyline::from_vertices(
                vec![
                    PolyPoint::from_point(at(0.0, 0.0), 0.0),
                    PolyPoint::from_point(at(5.0, 0.0), -0.5),
                    PolyPoint::from_point(at(5.0, 5.0), 0.0),
                ],
                true,
            );
            poly.constant_width = 0.25;
            ShapeType::LwPolyline(poly)
        }
        ShapeKind::MText => {
            let mut mtext = MText::new();
            mtext.insertion_point = at(0.0, 5.0);
            mtext.direction = Vector2::from_angle(0.3);
            mtext.height = 1.5;
            mtext.reference_width = 20.0;
            mtext.attachment = AttachmentPoint::MiddleCenter;
            mtext.text = "first line\\Psecond line".to_string();
            ShapeType::MText(mtext)
        }
        ShapeKind::Dot => ShapeType::Dot(Dot::new(at(1.0, 2.0))),
        ShapeKind::Polyline => ShapeType::Polyline(Polyline::from_vertices(
            vec![
                PolyPoint::from_point(at(0.0, 0.0), 0.3),
                PolyPoint::from_point(at(4.0, 1.0), 0.0),
                PolyPoint::from_point(at(8.0, 0.0), 0.0),
            ],
            false,
        )),
        ShapeKind::Ray => ShapeType::Ray(Ray::new(at(0.0, 0.0), Vector3::new(1.0, 1.0, 0.0))),
        ShapeKind::Solid => {
            let mut solid = Solid::new([at(0.0, 0.0), at(4.0, 0.0), at(0.0, 4.0), at(4.0, 4.0)]);
            solid.thickness = 1.0;
            ShapeType::Solid(solid)
        }
        ShapeKind::Spline => {
            let mut spline = Spline::new();
            spline.control_points = vec![at(0.0, 0.0), at(2.0, 4.0), at(6.0, 4.0), at(8.0, 0.0)];
            spline.knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
            spline.weights = vec![1.0, 0.5, 0.5, 1.0];
            spline.flags = SplineFlags::RATIONAL | SplineFlags::PLANAR;
            ShapeType::Spline(spline)
        }
        ShapeKind::Text => {
            let mut text = Text::with_value("Room 101", at(0.0, 0.0), 2.5);
            text.direction = Vector2::from_angle(0.4);
            text.oblique = 0.1;
            text.width_factor = 0.8;
            ShapeType::Text(text)
        }
        ShapeKind::Trace => ShapeType::Trace(Trace::new([
            at(0.0, 0.0),
            at(5.0, 0.0),
            at(0.0, 1.0),
            at(5.0, 1.0),
        ])),
        ShapeKind::Underlay => {
            let mut underlay = Underlay::new("plan.pdf");
            underlay.insertion_point = at(0.0, 0.0);
            underlay.rotation = -0.4;
            underlay.clip_boundary = vec![Vector2::new(0.0, 0.0), Vector2::new(10.0, 7.0)];
            underlay.flags |= UnderlayFlags::CLIPPING;
            ShapeType::Underlay(underlay)
        }
        ShapeKind::Vertex => {
            let mut vertex = Vertex::new(PolyPoint::from_point(at(3.0, 4.0), 0.25));
            vertex.start_width = 0.1;
            vertex.end_width = 0.2;
            vertex.flags = VertexFlags::CURVE_FIT_TANGENT;
            ShapeType::Vertex(vertex)
        }
        ShapeKind::Viewport => {
            let mut viewport = Viewport::new(at(10.0, 10.0), 40.0, 30.0);
            viewport.view_center = Vector2::new(100.0, 50.0);
            viewport.view_height = 300.0;
            ShapeType::Viewport(viewport)
        }
        ShapeKind::XLine => {
            ShapeType::XLine(XLine::new(at(0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)))
        }
    };
    Some(shape)
}

/// One sample shape per registered entity name, in registry order
pub fn all_shapes() -> Vec<ShapeType> {
    registered()
        .filter_map(|(_, kind)| sample_shape(kind, Vector3::new(1.0, -2.0, 0.5)))
        .collect()
}

/// Create a drawing containing every registered shape kind laid out on a
/// grid with 25-unit spacing, plus line types, layers and attributes that
/// exercise every persisted field.
pub fn create_all_shapes_drawing() -> Drawing {
    let mut drawing = Drawing::new();

    let mut dashed = LineType::new("DASHED");
    dashed.description = "Dashed __ __ __".to_string();
    dashed.path = vec![0.5, -0.25];
    drawing.line_types.add(LineType::continuous()).unwrap();
    drawing.line_types.add(dashed).unwrap();

    drawing.layers.add(Layer::new("0")).unwrap();
    let mut walls = Layer::with_color_index("Walls", 1).unwrap();
    walls.line_type = "DASHED".to_string();
    walls.flags = LayerFlags::LOCKED;
    drawing.layers.add(walls).unwrap();

    let sp = 25.0;
    for (i, (_, kind)) in registered().enumerate() {
        let origin = Vector3::new((i % 6) as f64 * sp, (i / 6) as f64 * sp, 0.0);
        let Some(mut shape) = sample_shape(kind, origin) else {
            continue;
        };
        let common = shape.common_mut();
        common.color = Color::rgb((i * 8) as u8, 128, 255 - (i * 8) as u8);
        common.layer = if i % 2 == 0 { "0" } else { "Walls" }.to_string();
        common.line_type_name = if i % 3 == 0 { "DASHED" } else { "" }.to_string();
        common.line_weight = 1 + i as i32 % 4;
        common.line_type_index = i as i32 % 2;
        common.visible = i % 5 != 0;
        common.transparent = i % 7 == 0;
        common.layer_color_index = if i % 4 == 0 { 256 } else { i as i32 };
        common.cookie = Cookie {
            handle: Handle::new(0x100 + i as u64),
            buffer: vec![i as u8, 0xFF, 0x00],
            text: format!("cookie^{}\nline", i),
            duration: Duration::new(i as u64, 250_000_000),
        };
        drawing.add_shape(shape);
    }
    drawing
}
