mod common;
mod feedback;
mod service;
