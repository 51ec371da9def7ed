pub mod styles;
pub mod window;
