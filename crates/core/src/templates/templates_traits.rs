use async_trait::async_trait;
use std::collections::HashMap;

use super::templates_model::{NewTemplate, RenderedTemplate, Template, TemplateInput, TemplateType};
use crate::errors::Result;
use crate::RecordId;

#[async_trait]
pub trait TemplateRepositoryTrait: Send + Sync {
    fn list(&self, owner: RecordId, template_type: Option<TemplateType>) -> Result<Vec<Template>>;
    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<Template>>;
    async fn create(&self, new_template: NewTemplate) -> Result<Template>;
    async fn update(&self, template: Template) -> Result<Template>;
    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize>;
}

#[async_trait]
pub trait TemplateServiceTrait: Send + Sync {
    fn list_templates(&self, owner: RecordId, template_type: Option<TemplateType>)
        -> Result<Vec<Template>>;
    fn get_template(&self, owner: RecordId, id: RecordId) -> Result<Template>;
    async fn create_template(&self, owner: RecordId, input: TemplateInput) -> Result<Template>;
    async fn update_template(
        &self,
        owner: RecordId,
        id: RecordId,
        input: TemplateInput,
    ) -> Result<Template>;
    async fn delete_template(&self, owner: RecordId, id: RecordId) -> Result<()>;
    fn render_template(
        &self,
        owner: RecordId,
        id: RecordId,
        values: &HashMap<String, String>,
    ) -> Result<RenderedTemplate>;
}
