//! # Catalog Repository
//!
//! Read access to the catalog collections (products, news, categories,
//! contacts) and assembly of the chat context string from them.
//!
//! Sections appear in a fixed order (products, news, categories, contacts),
//! separated by a blank line. A selected collection with no rows adds nothing.

use super::models::{Category, ChatPromptConfig, Contact, NewsArticle, Product};
use super::DbPool;
use sqlx::query_as;

/// Number of most recent news articles fed into the context.
pub const NEWS_CONTEXT_LIMIT: i64 = 10;

pub struct CatalogRepository;

impl CatalogRepository {
    pub async fn active_products(pool: &DbPool) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<_, Product>("SELECT * FROM products WHERE is_active = 1 ORDER BY name ASC, id ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn latest_news(pool: &DbPool, limit: i64) -> Result<Vec<NewsArticle>, sqlx::Error> {
        query_as::<_, NewsArticle>(
            "SELECT * FROM news WHERE is_published = 1 ORDER BY published_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn categories(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn contacts(pool: &DbPool) -> Result<Vec<Contact>, sqlx::Error> {
        query_as::<_, Contact>("SELECT * FROM contacts ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// Build the reference text for the collections `config` selects.
    pub async fn build_chat_context(pool: &DbPool, config: &ChatPromptConfig) -> Result<String, sqlx::Error> {
        let mut sections = Vec::new();

        if config.include_products {
            sections.push(format_products(&Self::active_products(pool).await?));
        }
        if config.include_news {
            sections.push(format_news(&Self::latest_news(pool, NEWS_CONTEXT_LIMIT).await?));
        }
        if config.include_categories {
            sections.push(format_categories(&Self::categories(pool).await?));
        }
        if config.include_contacts {
            sections.push(format_contacts(&Self::contacts(pool).await?));
        }

        Ok(sections.into_iter().flatten().collect::<Vec<_>>().join("\n\n"))
    }
}

fn section(title: &str, lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(format!("{}:\n{}", title, lines.join("\n")))
}

fn format_products(products: &[Product]) -> Option<String> {
    let lines = products
        .iter()
        .map(|p| {
            let mut line = match p.category.as_deref().filter(|c| !c.is_empty()) {
                Some(category) => format!("- {} ({}): {}", p.name, category, p.description),
                None => format!("- {}: {}", p.name, p.description),
            };
            if let Some(specs) = p.specifications.as_deref().filter(|s| !s.is_empty()) {
                line.push_str(&format!("; Thông số: {}", specs));
            }
            if let Some(price) = p.price.as_deref().filter(|s| !s.is_empty()) {
                line.push_str(&format!("; Giá: {}", price));
            }
            line
        })
        .collect();
    section("Sản phẩm", lines)
}

fn format_news(news: &[NewsArticle]) -> Option<String> {
    let lines = news.iter().map(|n| format!("- {}: {}", n.title, n.summary)).collect();
    section("Tin tức", lines)
}

fn format_categories(categories: &[Category]) -> Option<String> {
    let lines = categories
        .iter()
        .map(|c| format!("- {}: {}", c.name, c.description))
        .collect();
    section("Danh mục sản phẩm", lines)
}

fn format_contacts(contacts: &[Contact]) -> Option<String> {
    let lines = contacts
        .iter()
        .map(|c| {
            let mut parts = Vec::new();
            if let Some(address) = c.address.as_deref().filter(|s| !s.is_empty()) {
                parts.push(address.to_string());
            }
            if let Some(phone) = c.phone.as_deref().filter(|s| !s.is_empty()) {
                parts.push(format!("ĐT: {}", phone));
            }
            if let Some(email) = c.email.as_deref().filter(|s| !s.is_empty()) {
                parts.push(format!("Email: {}", email));
            }
            format!("- {}: {}", c.label, parts.join(", "))
        })
        .collect();
    section("Thông tin liên hệ", lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{create_memory_pool, ChatPromptRepository};
    use crate::model::store::models::ChatPromptForCreate;

    async fn seed(pool: &DbPool) {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, category, specifications, price, is_active, created_at) VALUES
                ('Thép hộp', 'Thép hộp mạ kẽm', 'Thép ống', '40x80x1.4mm', NULL, 1, '2025-01-01T00:00:00Z'),
                ('Thép cũ', 'Ngừng kinh doanh', NULL, NULL, NULL, 0, '2025-01-01T00:00:00Z');
            INSERT INTO categories (name, description, created_at) VALUES
                ('Thép ống', 'Ống tròn, hộp vuông, hộp chữ nhật', '2025-01-01T00:00:00Z');
            INSERT INTO contacts (label, address, phone, email, created_at) VALUES
                ('Trụ sở', 'KCN Phố Nối A, Hưng Yên', '0221 000 000', NULL, '2025-01-01T00:00:00Z');
            "#,
        )
        .execute(pool)
        .await
        .unwrap();
    }

    async fn config_with(pool: &DbPool, products: bool, news: bool, categories: bool, contacts: bool) -> ChatPromptConfig {
        let mut data = ChatPromptForCreate::new("cfg", "prompt");
        data.include_products = products;
        data.include_news = news;
        data.include_categories = categories;
        data.include_contacts = contacts;
        ChatPromptRepository::create(pool, data).await.unwrap()
    }

    #[tokio::test]
    async fn test_nothing_selected_gives_empty_context() {
        let pool = create_memory_pool().await.unwrap();
        seed(&pool).await;
        let config = config_with(&pool, false, false, false, false).await;

        assert_eq!(CatalogRepository::build_chat_context(&pool, &config).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_selected_sections_in_fixed_order() {
        let pool = create_memory_pool().await.unwrap();
        seed(&pool).await;
        let config = config_with(&pool, true, true, true, true).await;

        let context = CatalogRepository::build_chat_context(&pool, &config).await.unwrap();

        // News is empty, so it contributes no section
        assert_eq!(
            context,
            "Sản phẩm:\n- Thép hộp (Thép ống): Thép hộp mạ kẽm; Thông số: 40x80x1.4mm\n\n\
             Danh mục sản phẩm:\n- Thép ống: Ống tròn, hộp vuông, hộp chữ nhật\n\n\
             Thông tin liên hệ:\n- Trụ sở: KCN Phố Nối A, Hưng Yên, ĐT: 0221 000 000"
        );
    }

    #[tokio::test]
    async fn test_news_limited_to_latest() {
        let pool = create_memory_pool().await.unwrap();
        for day in 1..=12 {
            sqlx::query("INSERT INTO news (title, summary, is_published, published_at) VALUES (?, 'tóm tắt', 1, ?)")
                .bind(format!("Tin {}", day))
                .bind(format!("2025-03-{:02}T00:00:00Z", day))
                .execute(&pool)
                .await
                .unwrap();
        }

        let news = CatalogRepository::latest_news(&pool, NEWS_CONTEXT_LIMIT).await.unwrap();
        assert_eq!(news.len(), 10);
        assert_eq!(news[0].title, "Tin 12");
    }
}
