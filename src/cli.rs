//! Interface de linha de comando baseada em clap.
//!
//! Sem subcomando o bot se comporta como `run`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Acompanha a revisão de tarefas do Practicum e avisa mudanças de status no Telegram.
#[derive(Debug, Parser)]
#[command(name = "homework-bot", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Caminho para um arquivo de configuração TOML (padrão: ./homework-bot.toml, se existir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita logs de debug, a menos que RUST_LOG diga o contrário.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Faz polling indefinidamente com pausa fixa entre os ciclos.
    Run {
        /// Timestamp Unix inicial do polling (padrão: agora).
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Executa um único ciclo, imprime o relatório e sai.
    Once {
        /// Timestamp Unix a consultar (padrão: agora).
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Verifica credenciais e configuração, depois sai.
    Check,
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Run { from_date: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::parse_from(["homework-bot"]);
        assert!(matches!(cli.resolved_command(), Command::Run { from_date: None }));
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_once_with_from_date() {
        let cli = Cli::parse_from(["homework-bot", "once", "--from-date", "0"]);
        match cli.resolved_command() {
            Command::Once { from_date } => assert_eq!(from_date, Some(0)),
            other => panic!("expected Once command, got {other:?}"),
        }
    }

    #[test]
    fn parses_global_flags() {
        let cli = Cli::parse_from([
            "homework-bot",
            "check",
            "--config",
            "/etc/homework-bot.toml",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.resolved_command(), Command::Check));
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/etc/homework-bot.toml"))
        );
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
