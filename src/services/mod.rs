pub mod gallery_service;
pub mod identity_service;
pub mod selection;
