pub mod market;
pub mod risk;
pub mod scanner;
pub mod signals;

pub use market::*;
pub use risk::*;
pub use scanner::*;
pub use signals::*;
