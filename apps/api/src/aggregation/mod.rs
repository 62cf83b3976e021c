// Multi-source job aggregation: provider fan-in, matching, subscription fan-out.
// Provider calls live in crate::providers; nothing here talks HTTP to providers directly.

pub mod aggregator;
pub mod dedup;
pub mod fanout;
pub mod handlers;
pub mod matcher;

#[cfg(test)]
pub mod testing;
