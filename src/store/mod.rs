pub mod files;
pub mod lock;
pub mod projects;
pub mod repo;
pub mod storage;
pub mod tasks;
