//! Mapping model -> entity mapper

use mirror_core::entities::Mapping;
use mirror_core::value_objects::ChatId;

use crate::models::MappingModel;

impl From<MappingModel> for Mapping {
    fn from(model: MappingModel) -> Self {
        Mapping {
            id: model.id,
            source: ChatId::new(model.source_tg_id),
            destination: ChatId::new(model.dest_tg_id),
        }
    }
}
