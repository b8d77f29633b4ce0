pub mod like_repository;
pub mod post_repository;
pub mod profile_repository;
pub mod social_repository;
