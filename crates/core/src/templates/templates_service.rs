use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::templates_model::{RenderedTemplate, Template, TemplateInput, TemplateType};
use super::templates_traits::{TemplateRepositoryTrait, TemplateServiceTrait};
use crate::errors::{Error, Result};
use crate::RecordId;

pub struct TemplateService {
    repository: Arc<dyn TemplateRepositoryTrait>,
}

impl TemplateService {
    pub fn new(repository: Arc<dyn TemplateRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TemplateServiceTrait for TemplateService {
    fn list_templates(
        &self,
        owner: RecordId,
        template_type: Option<TemplateType>,
    ) -> Result<Vec<Template>> {
        self.repository.list(owner, template_type)
    }

    fn get_template(&self, owner: RecordId, id: RecordId) -> Result<Template> {
        self.repository
            .find(owner, id)?
            .ok_or_else(|| Error::not_found("Template"))
    }

    async fn create_template(&self, owner: RecordId, input: TemplateInput) -> Result<Template> {
        self.repository.create(input.into_new(owner)?).await
    }

    async fn update_template(
        &self,
        owner: RecordId,
        id: RecordId,
        input: TemplateInput,
    ) -> Result<Template> {
        let mut template = self.get_template(owner, id)?;
        input.apply_to(&mut template)?;
        self.repository.update(template).await
    }

    async fn delete_template(&self, owner: RecordId, id: RecordId) -> Result<()> {
        if self.repository.delete(owner, id).await? == 0 {
            return Err(Error::not_found("Template"));
        }
        Ok(())
    }

    fn render_template(
        &self,
        owner: RecordId,
        id: RecordId,
        values: &HashMap<String, String>,
    ) -> Result<RenderedTemplate> {
        Ok(self.get_template(owner, id)?.render(values))
    }
}
