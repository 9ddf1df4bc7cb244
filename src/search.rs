pub mod picker;
pub mod see;
pub mod tt;
