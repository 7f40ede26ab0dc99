pub mod auth_service;
pub mod catalog_service;
pub mod event_service;
pub mod feedback_service;
pub mod package_service;
pub mod supplier_service;
pub mod wishlist_service;
