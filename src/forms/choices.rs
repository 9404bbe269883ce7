use async_trait::async_trait;

use super::field::Choice;

/// Source of the options offered by a select field
#[async_trait]
pub trait ChoiceProvider: Send + Sync {
    async fn choices(&self) -> anyhow::Result<Vec<Choice>>;
}

/// Fixed list of options
#[derive(Clone, Debug, Default)]
pub struct StaticChoices(pub Vec<Choice>);

#[async_trait]
impl ChoiceProvider for StaticChoices {
    async fn choices(&self) -> anyhow::Result<Vec<Choice>> {
        Ok(self.0.clone())
    }
}
