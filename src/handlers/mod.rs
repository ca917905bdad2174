mod command;
mod reminder;
mod review;

pub use command::*;
pub use reminder::*;
pub use review::*;
