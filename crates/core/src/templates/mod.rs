//! Templates module - reusable email, SMS and social message bodies.

mod templates_model;
mod templates_service;
mod templates_traits;

pub use templates_model::{
    placeholders, NewTemplate, RenderedTemplate, Template, TemplateInput, TemplateType,
};
pub use templates_service::TemplateService;
pub use templates_traits::{TemplateRepositoryTrait, TemplateServiceTrait};
