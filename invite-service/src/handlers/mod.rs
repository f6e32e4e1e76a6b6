pub mod accept_handlers;
pub mod invite_handlers;
