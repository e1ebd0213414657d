mod coordinator;
mod link;
mod liveness;
mod messages;
mod worker;

pub use coordinator::*;
pub use link::*;
pub use liveness::*;
pub use messages::*;
pub use worker::*;

#[cfg(test)]
mod test_doubles;
