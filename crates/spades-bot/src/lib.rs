pub mod bot;
pub mod policy;
pub mod table;

pub use bot::{BidEstimator, PlayPlanner};
pub use policy::{BidContext, HeuristicPolicy, PlayContext, Policy, PolicyError, Rejection};
pub use table::{NullObserver, SeatAgent, Table, TableError, TableObserver};
