//! Shared test utilities for cadshape integration tests.
//!
//! Test crates import this via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use cadshape::io::record::{load_drawing, load_shape, save_drawing, save_shape};
use cadshape::{Drawing, RecordFormat, ShapeType};

/// Both record encodings
pub const FORMATS: [RecordFormat; 2] = [RecordFormat::Binary, RecordFormat::Text];

/// Save a shape and read it back
pub fn roundtrip_shape(shape: &ShapeType, format: RecordFormat) -> ShapeType {
    let mut buffer = Vec::new();
    save_shape(&mut buffer, format, shape).expect("save shape");
    load_shape(buffer.as_slice(), format).expect("load shape")
}

/// Save a drawing and read it back
pub fn roundtrip_drawing(drawing: &Drawing, format: RecordFormat) -> Drawing {
    let mut buffer = Vec::new();
    save_drawing(&mut buffer, format, drawing).expect("save drawing");
    load_drawing(buffer.as_slice(), format).expect("load drawing")
}

/// Text record of a shape, one value per line
pub fn text_record(shape: &ShapeType) -> Vec<String> {
    let mut buffer = Vec::new();
    save_shape(&mut buffer, RecordFormat::Text, shape).expect("save shape");
    String::from_utf8(buffer)
        .expect("text record is UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}
