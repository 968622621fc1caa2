//! Repository implementations using SeaORM

pub mod role_repository;
pub mod statistics_announcement_repository;

pub use role_repository::SeaOrmRoleRepository;
pub use statistics_announcement_repository::SeaOrmStatisticsAnnouncementRepository;
