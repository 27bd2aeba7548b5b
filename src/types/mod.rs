//! Core value types shared by every shape

pub mod bounds;
pub mod color;
pub mod cookie;
pub mod handle;
pub mod poly_point;
pub mod transform;
pub mod vector;

pub use bounds::BoundingBox2D;
pub use color::{Color, ColorIndex, ColorTable, CR_DEFAULT};
pub use cookie::Cookie;
pub use handle::Handle;
pub use poly_point::PolyPoint;
pub use transform::{Matrix4, Transform};
pub use vector::{Vector2, Vector3};
