pub mod facts_handlers;
pub mod plan_handlers;
