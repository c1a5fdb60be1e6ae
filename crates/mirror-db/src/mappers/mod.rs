//! Model to entity mappers
//!
//! Conversions from database rows into domain objects (mirror-core).
//! Channel rows go through `TryFrom` because the stored role is free text.

mod channel;
mod link_rule;
mod mapping;
