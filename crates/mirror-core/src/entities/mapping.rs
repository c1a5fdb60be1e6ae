//! Mapping entity - directed link from one source channel to one destination

use crate::value_objects::ChatId;

/// Source → destination relationship, unique on the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mapping {
    pub id: i64,
    pub source: ChatId,
    pub destination: ChatId,
}

impl Mapping {
    #[must_use]
    pub fn new(source: ChatId, destination: ChatId) -> Self {
        Self {
            id: 0,
            source,
            destination,
        }
    }
}
