//! Backend for the Inmobiliaria Rosire website: property catalog queries,
//! listing publication, the AI chat relay and contact-form leads.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod leads;
pub mod models;
pub mod seed;
pub mod server;
pub mod store;
