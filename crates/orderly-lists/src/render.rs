use serde::Serialize;

use crate::error::ListError;
use crate::links::Toggle;

/// Presentation seam for a resolved next-state.
///
/// Each view turns a [`Toggle`] into its own output shape. None of them
/// emit markup; the host rendering layer owns that, and the specs carry
/// everything it needs.
pub trait ToggleView {
    type Output;

    fn present(&self, toggle: &Toggle, label: &str) -> Result<Self::Output, ListError>;
}

/// The bare target URL, for `href`-only use. Has no label of its own.
pub struct UrlView;

impl ToggleView for UrlView {
    type Output = String;

    fn present(&self, toggle: &Toggle, _label: &str) -> Result<String, ListError> {
        Ok(toggle.url.clone())
    }
}

/// Anchor-shaped output for a toggle link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSpec {
    pub href: String,
    pub title: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LinkView {
    pub rel: Option<String>,
    pub class: Option<String>,
}

impl ToggleView for LinkView {
    type Output = LinkSpec;

    fn present(&self, toggle: &Toggle, label: &str) -> Result<LinkSpec, ListError> {
        Ok(LinkSpec {
            href: toggle.url.clone(),
            title: toggle.title.clone(),
            label: non_empty_label(label)?,
            rel: self.rel.clone(),
            class: self.class.clone(),
        })
    }
}

/// Form-shaped output: the target decomposed into an action plus the hidden
/// input that carries the next state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSpec {
    pub action: String,
    pub method: String,
    pub param: String,
    pub value: String,
    pub title: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub method: String,
    pub class: Option<String>,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            method: "get".to_string(),
            class: None,
        }
    }
}

impl ToggleView for FormView {
    type Output = FormSpec;

    fn present(&self, toggle: &Toggle, label: &str) -> Result<FormSpec, ListError> {
        let action = toggle
            .url
            .split_once('?')
            .map(|(path, _)| path.to_string())
            .unwrap_or_else(|| toggle.url.clone());
        Ok(FormSpec {
            action,
            method: self.method.clone(),
            param: toggle.param.clone(),
            value: toggle.next.to_string(),
            title: toggle.title.clone(),
            label: non_empty_label(label)?,
            class: self.class.clone(),
        })
    }
}

fn non_empty_label(label: &str) -> Result<String, ListError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(ListError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}
