pub mod line;
pub mod polygon;

pub use line::SupercoverLine;
pub use polygon::PolygonOutline;
