//! Configuração do bot carregada a partir de `homework-bot.toml`.
//!
//! Todos os campos são opcionais; valores ausentes usam os defaults abaixo.
//! Tokens nunca ficam aqui, vêm das variáveis de ambiente (ver
//! [`Credentials`](crate::credentials::Credentials)).

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "homework-bot.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Endpoint de status das tarefas.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// URL base da Bot API do Telegram.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    /// Pausa fixa entre dois ciclos de polling, em segundos.
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,

    /// Limite de tempo de uma requisição HTTP, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Avança `from_date` até o `current_date` informado pela API.
    #[serde(default = "default_advance_from_date")]
    pub advance_from_date: bool,

    /// Não reenvia o alerta quando a falha repete a anterior.
    #[serde(default)]
    pub suppress_repeated_errors: bool,
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period_secs() -> u64 {
    600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_advance_from_date() -> bool {
    true
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period_secs: default_retry_period_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            advance_from_date: default_advance_from_date(),
            suppress_repeated_errors: false,
        }
    }
}

impl BotConfig {
    /// Carrega a configuração de `path`, ou de `homework-bot.toml` no
    /// diretório atual quando nenhum caminho é informado.
    ///
    /// Um caminho explícito precisa existir; o arquivo padrão pode faltar,
    /// e nesse caso os defaults são usados. Períodos iguais a zero são
    /// rejeitados.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str::<BotConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.retry_period_secs == 0 {
            bail!("retry_period_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
