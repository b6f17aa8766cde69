pub mod canvas;
pub mod widgets;
