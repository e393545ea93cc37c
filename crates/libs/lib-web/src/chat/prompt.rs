//! # Prompt Assembly
//!
//! Turns the active prompt configuration into a system prompt plus a
//! reference context, then flattens everything into the single prompt string
//! sent to the model:
//!
//! ```text
//! System: {system_prompt}
//!
//! Reference info: {context}
//!
//! User: {message}
//! ```
//!
//! The `System` and `Reference info` blocks are left out when empty. Nothing
//! is escaped or truncated.

use lib_core::model::store::models::ChatPromptConfig;
use lib_core::model::store::CatalogRepository;
use lib_core::DbPool;

/// Persona used when no prompt configuration is active.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Bạn là trợ lý tư vấn bán hàng của một công ty chuyên sản xuất và \
phân phối các sản phẩm thép (thép ống, thép hộp, thép hình, tôn mạ kẽm). \
Hãy trả lời bằng tiếng Việt, ngắn gọn, lịch sự và chính xác. \
Khi khách hỏi về giá hoặc báo giá chi tiết, hãy mời khách để lại số điện thoại \
hoặc liên hệ phòng kinh doanh. Không bịa đặt thông tin mà bạn không chắc chắn.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub system_prompt: String,
    pub context: String,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            context: String::new(),
        }
    }
}

/// Resolve the system prompt and reference context for `config`.
///
/// `None` gives the default persona with an empty context.
pub async fn assemble_context(
    pool: &DbPool,
    config: Option<&ChatPromptConfig>,
) -> Result<ChatContext, sqlx::Error> {
    let Some(config) = config else {
        return Ok(ChatContext::default());
    };

    let context = if config.includes_any() {
        CatalogRepository::build_chat_context(pool, config).await?
    } else {
        String::new()
    };

    Ok(ChatContext {
        system_prompt: config.prompt.clone(),
        context,
    })
}

/// Flatten the prompt parts into the text sent to the model.
pub fn compose_prompt(system_prompt: Option<&str>, context: Option<&str>, message: &str) -> String {
    let mut blocks = Vec::with_capacity(3);

    if let Some(system_prompt) = system_prompt.filter(|s| !s.is_empty()) {
        blocks.push(format!("System: {}", system_prompt));
    }
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        blocks.push(format!("Reference info: {}", context));
    }
    blocks.push(format!("User: {}", message));

    blocks.join("\n\n")
}
