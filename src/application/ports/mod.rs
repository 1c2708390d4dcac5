mod message_store;
mod responder;
mod store_error;

pub use message_store::MessageStore;
pub use responder::{Responder, ResponderError};
pub use store_error::StoreError;
