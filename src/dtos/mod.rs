pub mod post_dtos;
pub mod profile_dtos;
