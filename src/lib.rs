// Library root so the integration suite can build the app in-process
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
