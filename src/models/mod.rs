pub mod stock;
pub mod sector;
pub mod scenario;
pub mod response;

pub use stock::*;
pub use sector::*;
pub use scenario::*;
pub use response::*;
