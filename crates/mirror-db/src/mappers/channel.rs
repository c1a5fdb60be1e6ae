//! Channel model -> entity mapper

use mirror_core::entities::{Channel, ChannelRole};
use mirror_core::error::DomainError;
use mirror_core::value_objects::ChatId;

use crate::models::ChannelModel;

impl TryFrom<ChannelModel> for Channel {
    type Error = DomainError;

    fn try_from(model: ChannelModel) -> Result<Self, Self::Error> {
        let role = ChannelRole::parse(&model.kind).ok_or(DomainError::UnknownRole(model.kind))?;
        Ok(Channel {
            id: model.id,
            chat_id: ChatId::new(model.tg_id),
            title: model.title.unwrap_or_default(),
            role,
        })
    }
}
