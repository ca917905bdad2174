mod notification;
mod review;

pub use notification::*;
pub use review::*;
