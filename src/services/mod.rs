pub mod explainer;
pub mod session;
pub mod stats_client;
pub mod stats_view;

pub use explainer::*;
pub use session::*;
pub use stats_client::*;
pub use stats_view::*;
