pub mod rect;
pub use rect::Rect;

pub trait Region {
    fn contains(&self, coord: &[f64; 3]) -> bool;
}
