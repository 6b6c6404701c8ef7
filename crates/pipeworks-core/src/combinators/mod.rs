//! Built-in combinators.

pub mod attempt;
pub mod grouping;
pub mod init;
pub mod instrument;
pub mod sequence;
pub mod transform;

pub use attempt::Attempt;
pub use grouping::{Chunk, GroupBy};
pub use init::{Construct, FnConstructor, Init, ModelConstructor};
pub use instrument::Instrumented;
pub use sequence::{AssertQuantity, First, Head, Last, Tail};
pub use transform::{Filter, FilterList, FlatMap, Map, MapList, Reduce};
