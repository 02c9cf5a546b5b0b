pub mod enumerate;
pub mod model;
