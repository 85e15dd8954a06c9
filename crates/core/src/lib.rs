//! Core types and traits for gottem.
//!
//! This crate provides the collaborator abstractions the editor is built
//! against, without coupling it to a terminal backend, a provider client
//! or a storage format.

pub mod event;
pub mod service;
pub mod surface;

pub use event::{Event, EventHandler};
pub use service::{
    ConversationId, Message, PersistenceGateway, ProviderInfo, QueryService, Role,
};
pub use surface::ScreenSurface;
