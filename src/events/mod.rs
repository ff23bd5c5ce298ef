pub mod pointer;

pub use pointer::shared_dispatcher;
