use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
///
/// 显式传递给补全服务，不使用全局可变状态；会话级密钥通过
/// [`Config::api_key_for`] 覆盖。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次补全的最大 token 数
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 批量求解时同时处理的题目数量
    pub max_concurrent_problems: usize,
    /// 批量求解日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.mistral.ai/v1".to_string(),
            llm_model_name: "mistral-medium-latest".to_string(),
            max_tokens: 2048,
            temperature: 0.2,
            top_p: 0.95,
            verbose_logging: false,
            max_concurrent_problems: 4,
            output_log_file: "solve_log.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失的键使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        debug!("已加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 加载配置：若配置文件存在则先读取文件，再用环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(p) if p.exists() => Self::from_toml_file(p)?,
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    /// 用环境变量覆盖当前配置
    fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            llm_api_key: env_string(&["MISTRAL_API_KEY", "LLM_API_KEY"]).unwrap_or(self.llm_api_key),
            llm_api_base_url: env_string(&["LLM_API_BASE_URL"]).unwrap_or(self.llm_api_base_url),
            llm_model_name: env_string(&["LLM_MODEL_NAME", "MISTRAL_MODEL"])
                .unwrap_or(self.llm_model_name),
            max_tokens: env_parse("MAX_TOKENS", "u32")?.unwrap_or(self.max_tokens),
            temperature: env_parse("TEMPERATURE", "f32")?.unwrap_or(self.temperature),
            top_p: env_parse("TOP_P", "f32")?.unwrap_or(self.top_p),
            verbose_logging: env_flag(&["DEBUG", "VERBOSE_LOGGING"]).unwrap_or(self.verbose_logging),
            max_concurrent_problems: env_parse("MAX_CONCURRENT_PROBLEMS", "usize")?
                .unwrap_or(self.max_concurrent_problems),
            output_log_file: env_string(&["OUTPUT_LOG_FILE"]).unwrap_or(self.output_log_file),
        })
    }

    /// 获取本次请求使用的 API 密钥
    ///
    /// 优先级：会话密钥 > 配置密钥
    pub fn api_key_for<'a>(&'a self, session_key: Option<&'a str>) -> &'a str {
        match session_key {
            Some(key) if !key.is_empty() => key,
            _ => &self.llm_api_key,
        }
    }

    /// 校验必需的配置是否存在
    pub fn validate(&self, session_key: Option<&str>) -> AppResult<()> {
        if self.api_key_for(session_key).is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }
        info!("配置校验通过 (模型: {})", self.llm_model_name);
        Ok(())
    }
}

fn env_string(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                ConfigError::EnvVarParseFailed {
                    var_name: name.to_string(),
                    value,
                    expected_type: expected_type.to_string(),
                }
                .into()
            }),
        _ => Ok(None),
    }
}

fn env_flag(names: &[&str]) -> Option<bool> {
    env_string(names).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_takes_priority() {
        let config = Config {
            llm_api_key: "env-key".to_string(),
            ..Default::default()
        };

        assert_eq!(config.api_key_for(Some("session-key")), "session-key");
        assert_eq!(config.api_key_for(Some("")), "env-key");
        assert_eq!(config.api_key_for(None), "env-key");
    }

    #[test]
    fn test_validate_requires_some_key() {
        let config = Config::default();
        assert!(matches!(
            config.validate(None),
            Err(AppError::Config(ConfigError::MissingApiKey))
        ));
        assert!(config.validate(Some("session-key")).is_ok());
    }

    #[test]
    fn test_toml_missing_keys_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            llm_model_name = "mistral-large-latest"
            max_tokens = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.llm_model_name, "mistral-large-latest");
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_concurrent_problems, 4);
    }

    #[test]
    fn test_load_without_file_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("definitely/not/here.toml")));
        assert!(config.is_ok());
    }
}
