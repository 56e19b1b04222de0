pub mod dto;
pub mod ranking;
pub mod reconcile;
pub mod scoring;
pub mod sync_service;
