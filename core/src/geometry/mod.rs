//! Geometry

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3f {
                Vector3f { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_normal3 {
    ($name: ident, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Normal3f {
                Normal3f { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2f {
                Point2f { x, y }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point3 {
    ($name: ident, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Point3f {
                Point3f { x, y, z }
            }
        }
    };
}

mod common;
mod coordinate_system;
mod matrix4x4;
mod normal;
mod point2;
mod point3;
mod ray;
mod shape;
mod transform;
mod vector3;

// Re-export
pub use common::*;
pub use coordinate_system::*;
pub use matrix4x4::*;
pub use normal::*;
pub use point2::*;
pub use point3::*;
pub use ray::*;
pub use shape::*;
pub use transform::*;
pub use vector3::*;
