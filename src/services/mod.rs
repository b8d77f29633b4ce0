pub mod countdown;
pub mod feed_service;
pub mod poll_service;
pub mod social_service;
pub mod streak;
pub mod theme;
