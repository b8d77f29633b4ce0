// Zynk local social-state engine: the data-derivation layer behind the
// prototype's profile, feed, orbit, poll and theme UI. Rendering, routing
// and the real storage backend live outside; everything here is synchronous
// reads/mutations over a localStorage-shaped adapter.

pub mod config;
pub mod dtos;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;
pub mod storage;
