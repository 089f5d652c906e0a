pub mod band;
pub mod bitgrid;
pub mod io;

pub use self::band::{BandU8, ImageU8};
pub use self::bitgrid::BitGrid;
