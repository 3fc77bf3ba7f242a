use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::errors::ValidationError;
use crate::utils::{ids, non_blank};
use crate::{RecordId, Result};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Email,
    Sms,
    Social,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    pub subject: Option<String>,
    pub content: String,
    pub variables: Vec<String>,
    #[serde(with = "ids::as_string")]
    pub created_by: RecordId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub template_type: Option<TemplateType>,
    pub subject: Option<String>,
    pub content: Option<String>,
    pub variables: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub template_type: TemplateType,
    pub subject: Option<String>,
    pub content: String,
    pub variables: Vec<String>,
    pub created_by: RecordId,
}

/// Result of substituting values into a template.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTemplate {
    pub subject: Option<String>,
    pub content: String,
    /// Placeholders left untouched because no value was supplied.
    pub missing: Vec<String>,
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps[1].to_string();
            seen.insert(name.clone()).then_some(name)
        })
        .collect()
}

fn substitute(text: &str, values: &HashMap<String, String>, missing: &mut BTreeSet<String>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                missing.insert(caps[1].to_string());
                caps[0].to_string()
            }
        })
        .into_owned()
}

impl Template {
    pub fn render(&self, values: &HashMap<String, String>) -> RenderedTemplate {
        let mut missing = BTreeSet::new();
        let subject = self
            .subject
            .as_deref()
            .map(|subject| substitute(subject, values, &mut missing));
        let content = substitute(&self.content, values, &mut missing);
        RenderedTemplate {
            subject,
            content,
            missing: missing.into_iter().collect(),
        }
    }
}

impl TemplateInput {
    pub fn into_new(self, owner: RecordId) -> Result<NewTemplate> {
        let name = non_blank(self.name.as_deref())
            .ok_or_else(|| ValidationError::MissingField("name".to_string()))?
            .to_string();
        let template_type = self
            .template_type
            .ok_or_else(|| ValidationError::MissingField("type".to_string()))?;
        let content = self
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingField("content".to_string()))?;
        let variables = match self.variables {
            Some(variables) if !variables.is_empty() => variables,
            _ => {
                let mut found = placeholders(self.subject.as_deref().unwrap_or_default());
                for name in placeholders(&content) {
                    if !found.contains(&name) {
                        found.push(name);
                    }
                }
                found
            }
        };
        Ok(NewTemplate {
            name,
            template_type,
            subject: self.subject,
            content,
            variables,
            created_by: owner,
        })
    }

    pub fn apply_to(self, template: &mut Template) -> Result<()> {
        if self.name.is_some() {
            template.name = non_blank(self.name.as_deref())
                .ok_or_else(|| ValidationError::MissingField("name".to_string()))?
                .to_string();
        }
        if let Some(template_type) = self.template_type {
            template.template_type = template_type;
        }
        if self.subject.is_some() {
            template.subject = self.subject;
        }
        if let Some(content) = self.content {
            if content.trim().is_empty() {
                return Err(ValidationError::MissingField("content".to_string()).into());
            }
            template.content = content;
        }
        if let Some(variables) = self.variables {
            template.variables = variables;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(subject: Option<&str>, content: &str) -> Template {
        let ts = NaiveDateTime::parse_from_str("2024-02-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Template {
            id: 1,
            name: "Welcome".to_string(),
            template_type: TemplateType::Email,
            subject: subject.map(str::to_string),
            content: content.to_string(),
            variables: vec![],
            created_by: 1,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn render_substitutes_and_reports_missing() {
        let t = template(
            Some("Hi {{name}}"),
            "Dear {{ name }}, your code is {{code}}. See {{link}}.",
        );
        let values = HashMap::from([
            ("name".to_string(), "Ada".to_string()),
            ("code".to_string(), "X1".to_string()),
        ]);
        let rendered = t.render(&values);
        assert_eq!(rendered.subject.as_deref(), Some("Hi Ada"));
        assert_eq!(rendered.content, "Dear Ada, your code is X1. See {{link}}.");
        assert_eq!(rendered.missing, vec!["link".to_string()]);
    }

    #[test]
    fn variables_are_detected_when_not_supplied() {
        let input: TemplateInput = serde_json::from_str(
            r#"{"name":"Promo","type":"sms","content":"Hey {{first}}, {{offer}} ends {{first}}"}"#,
        )
        .unwrap();
        let new_template = input.into_new(3).unwrap();
        assert_eq!(new_template.variables, vec!["first", "offer"]);
        assert_eq!(new_template.template_type, TemplateType::Sms);
    }

    #[test]
    fn type_is_required() {
        let input: TemplateInput = serde_json::from_str(r#"{"name":"x","content":"y"}"#).unwrap();
        assert!(input.into_new(1).is_err());
    }
}
