pub mod answer;
pub mod cost;
pub mod narrative;
pub mod result;
pub mod session;
pub mod token_count;
pub mod transaction;
