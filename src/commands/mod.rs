pub mod back;
pub mod download;
pub mod preview;
pub mod reset;
pub mod retry;
pub mod select;
pub mod status;
pub mod summary;

pub use back::*;
pub use download::*;
pub use preview::*;
pub use reset::*;
pub use retry::*;
pub use select::*;
pub use status::*;
pub use summary::*;
