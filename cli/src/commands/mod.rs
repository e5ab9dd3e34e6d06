pub mod frame;
pub mod simulate;
