//! A horizontally scrolling "tape" picker widget for iced.
//!
//! The tape is a ruler-like strip of tick marks; dragging or scrolling it
//! snaps to the nearest tick and reports the selected value through an
//! `on_select` message. Tick classification, offset ↔ index mapping, and the
//! selection state machine are pure modules testable without a GUI; the canvas
//! program layers drag, fling, snap, and flash animations on top.

pub mod canvas;
pub mod mapper;
pub mod picker;
pub mod renderer;
pub mod selection;
pub mod series;
pub mod ticks;

pub use mapper::OffsetMapper;
pub use picker::{Geometry, TapePicker, TapeStyle};
pub use selection::{ScrollSurface, SelectionController, TickRenderer};
pub use series::TickSeries;
pub use ticks::TickClass;
