//! Link rule model -> entity mapper

use mirror_core::entities::LinkRule;

use crate::models::LinkRuleModel;

impl From<LinkRuleModel> for LinkRule {
    fn from(model: LinkRuleModel) -> Self {
        LinkRule {
            id: model.id,
            pattern: model.pattern,
            replacement: model.replacement,
            // An empty text replacement is the same as none
            text_replacement: model.text_replacement.filter(|t| !t.is_empty()),
        }
    }
}
