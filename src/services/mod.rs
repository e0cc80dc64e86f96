pub mod preview_service;
pub mod analysis_service;
