//! # Compact Info Core Library
//!
//! A small status display (time, date, weather and battery) for fixed,
//! low-resolution surfaces: 144×168, or 200×228 on the large platform. It is
//! driven by minute ticks, battery events and key/value messages from a paired
//! companion.
//!
//! ## Design Philosophy
//!
//! ### Memory Discipline
//! - **Packed rasters**: icons stay in their packed form (1 bit per pixel
//!   monochrome, 1 byte per pixel palette-indexed) and are resized in place
//!   by nearest-neighbour sampling
//! - **One owner per buffer**: [`raster::Raster`] is not `Clone`; the render
//!   state holds at most one icon of each kind and releases it before
//!   installing a replacement
//! - **Fallible allocation**: raster buffers are reserved with
//!   `try_reserve_exact`, and a failed allocation degrades to the unscaled icon
//!
//! ### Run-Time Layout
//! Text is measured when it changes. Each two-fragment line (value plus
//! qualifier) is centered as a group, never overlaps and never spills out of
//! its line; see [`layout`].
//!
//! ### Data Flow
//! 1. **Event**: tick, battery or message reaches a handler in [`handlers`]
//! 2. **State**: the handler updates [`state::RenderState`], fetching icons
//!    through [`icons`] and [`scaler`]
//! 3. **Layout**: placements are recomputed from the new texts
//! 4. **Draw**: [`renderer::draw`] paints the state onto any embedded-graphics target
//!
//! The companion side ([`companion`]) fetches weather and pushes settings over
//! the same [`message::AppMessage`] dictionaries.

pub mod assets;
pub mod companion;
pub mod config;
pub mod display;
pub mod format;
pub mod handlers;
pub mod icons;
pub mod layout;
pub mod message;
pub mod raster;
pub mod renderer;
pub mod scaler;
pub mod screen;
pub mod settings;
pub mod state;
pub mod text;
