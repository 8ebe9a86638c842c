pub mod figure;
pub mod geom;
pub mod model;
pub mod params;
pub mod report;
