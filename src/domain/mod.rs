pub mod allocator;
pub mod selection;

pub use allocator::{Distribution, QuestionAllocator, TotalBounds};
pub use selection::MaterialSelection;
