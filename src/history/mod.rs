mod store;
mod view;

pub use store::StrokeStore;
pub use view::ViewState;
