//! # pathspline
//!
//! SVG path-data parser and cubic-spline geometry model for 2D rendering
//! pipelines.
//!
//! The crate turns the terse `d` attribute grammar into a uniform, immutable
//! [path_spline::PathSpline] of move/line/cubic commands, then answers the
//! geometric queries downstream consumers need:
//!
//! - Tolerant parsing that returns partial geometry alongside the error
//! - Relative/absolute commands, implicit repetition, smooth-curve
//!   reflection, packed arc flags
//! - Quadratic curves and elliptical arcs lowered to cubic Beziers
//! - Arc length, point/tangent/normal at parameter, tight bounding boxes
//! - Hit-testing with non-zero and even-odd fill rules
//! - Direct spline construction for basic shapes (circle, ellipse)
//!
//! ## Pipeline
//!
//! 1. **Tokenizer/Parser** ([path_parser]) — scans the path data string
//! 2. **Builder** ([spline_builder]) — lowers commands to the canonical form
//! 3. **Spline** ([path_spline]) — immutable geometry with derived queries

// Foundation types & math
pub mod basics;
pub mod error;
pub mod math;

// Geometry
pub mod bezier_arc;
pub mod path_spline;
pub mod spline_builder;

// Parsing
pub mod number;
pub mod path_parser;
