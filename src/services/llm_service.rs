//! LLM 服务 - 业务能力层
//!
//! 只负责"一次补全调用"能力：发送提示词，返回原始回复文本。
//! 超时与重试属于调用方，这里不做。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Mistral, Azure 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrl,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 补全服务接口
///
/// 外部黑盒：输入提示词，返回自由文本；失败时错误原样返回给调用方。
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_message: Option<&str>,
        user_message: &str,
        images: Option<&[String]>,
    ) -> AppResult<String>;
}

/// 基于 OpenAI 兼容接口的补全服务
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl LlmService {
    /// 使用配置中的密钥创建
    pub fn new(config: &Config) -> Self {
        Self::for_session(config, None)
    }

    /// 使用会话密钥创建（会话密钥优先于配置密钥）
    pub fn for_session(config: &Config, session_key: Option<&str>) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key_for(session_key))
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 构建用户消息（有图片时使用多部分内容）
    fn build_user_message(
        user_message: &str,
        images: Option<&[String]>,
    ) -> AppResult<ChatCompletionRequestMessage> {
        let args = match images {
            Some(img_urls) if !img_urls.is_empty() => {
                let mut content_parts: Vec<ChatCompletionRequestUserMessageContentPart> =
                    vec![ChatCompletionRequestUserMessageContentPart::Text(
                        ChatCompletionRequestMessageContentPartText {
                            text: user_message.to_string(),
                        },
                    )];

                for url in img_urls {
                    content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url: url.clone(),
                                detail: Some(ImageDetail::Auto),
                            },
                        },
                    ));
                }

                debug!("使用 Vision 消息，包含 {} 张图片", img_urls.len());

                ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
                    .build()
            }
            _ => ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build(),
        }
        .map_err(AppError::llm_request_build_failed)?;

        Ok(ChatCompletionRequestMessage::User(args))
    }
}

#[async_trait]
impl CompletionClient for LlmService {
    async fn complete(
        &self,
        system_message: Option<&str>,
        user_message: &str,
        images: Option<&[String]>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(AppError::llm_request_build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        messages.push(Self::build_user_message(user_message, images)?);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(AppError::llm_request_build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response.choices.first().ok_or_else(|| LlmError::EmptyResponse {
            model: self.model_name.clone(),
        })?;

        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}
