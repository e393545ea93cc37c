use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// region: --- Chat prompt configuration

/// Admin-editable chat assistant configuration.
///
/// `prompt` becomes the system prompt; the `include_*` flags pick which
/// catalog collections feed the context string.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct ChatPromptConfig {
    pub id: i64,
    pub name: String,
    pub prompt: String,
    pub is_active: bool,
    pub include_products: bool,
    pub include_news: bool,
    pub include_categories: bool,
    pub include_contacts: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatPromptConfig {
    /// True when at least one collection is selected for the context.
    pub fn includes_any(&self) -> bool {
        self.include_products || self.include_news || self.include_categories || self.include_contacts
    }
}

/// Data for creating a prompt configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatPromptForCreate {
    pub name: String,
    pub prompt: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub include_products: bool,
    #[serde(default)]
    pub include_news: bool,
    #[serde(default)]
    pub include_categories: bool,
    #[serde(default)]
    pub include_contacts: bool,
}

impl ChatPromptForCreate {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatPromptForUpdate {
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub is_active: Option<bool>,
    pub include_products: Option<bool>,
    pub include_news: Option<bool>,
    pub include_categories: Option<bool>,
    pub include_contacts: Option<bool>,
}

impl ChatPromptForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Apply this update on top of `current`.
    pub fn merge_into(self, mut current: ChatPromptConfig) -> ChatPromptConfig {
        if let Some(name) = self.name {
            current.name = name;
        }
        if let Some(prompt) = self.prompt {
            current.prompt = prompt;
        }
        if let Some(is_active) = self.is_active {
            current.is_active = is_active;
        }
        if let Some(v) = self.include_products {
            current.include_products = v;
        }
        if let Some(v) = self.include_news {
            current.include_news = v;
        }
        if let Some(v) = self.include_categories {
            current.include_categories = v;
        }
        if let Some(v) = self.include_contacts {
            current.include_contacts = v;
        }
        current
    }
}

// endregion: --- Chat prompt configuration

// region: --- Slider

/// One carousel slide. Public order is ascending `order` among active slides.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Slider {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: Option<String>,
    pub button_text: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliderForCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub link: Option<String>,
    pub button_text: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl SliderForCreate {
    pub fn new(title: impl Into<String>, image_url: impl Into<String>, order: i64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            image_url: image_url.into(),
            link: None,
            button_text: None,
            order,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

fn default_true() -> bool {
    true
}

/// Partial update; `link`/`button_text` can only be replaced, not cleared.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SliderForUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl SliderForUpdate {
    pub fn merge_into(self, mut current: Slider) -> Slider {
        if let Some(title) = self.title {
            current.title = title;
        }
        if let Some(description) = self.description {
            current.description = description;
        }
        if let Some(image_url) = self.image_url {
            current.image_url = image_url;
        }
        if self.link.is_some() {
            current.link = self.link;
        }
        if self.button_text.is_some() {
            current.button_text = self.button_text;
        }
        if let Some(order) = self.order {
            current.order = order;
        }
        if let Some(is_active) = self.is_active {
            current.is_active = is_active;
        }
        current
    }
}

// endregion: --- Slider

// region: --- Catalog

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub specifications: Option<String>,
    pub price: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub is_published: bool,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Company office/branch contact details.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub label: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

// endregion: --- Catalog
