//! Saída colorida no terminal para os subcomandos `once` e `check`.
//!
//! Usa a crate `console` para estilização. O modo `run`, de longa duração,
//! reporta apenas via `tracing`.

use console::Style;

use crate::config::BotConfig;
use crate::credentials::Credentials;
use crate::error::MissingCredentials;
use crate::notify::Delivery;
use crate::poller::{CycleOutcome, CycleReport};

pub struct Console {
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }
}

impl Console {
    /// Imprime o resultado de `check` e retorna se tudo está utilizável.
    pub fn print_check(
        &self,
        config: &BotConfig,
        credentials: &Result<Credentials, MissingCredentials>,
    ) -> bool {
        println!("{}", self.dim.apply_to("─── Configuration ───"));
        println!("  endpoint           {}", config.endpoint);
        println!("  telegram api       {}", config.telegram_api_url);
        println!("  retry period       {}s", config.retry_period_secs);
        println!("  request timeout    {}s", config.request_timeout_secs);
        println!("  advance from_date  {}", config.advance_from_date);
        println!("  suppress repeats   {}", config.suppress_repeated_errors);
        println!();

        match credentials {
            Ok(creds) => {
                println!(
                    "  {} Credentials present (chat {})",
                    self.green.apply_to("✓"),
                    creds.chat_id
                );
                true
            }
            Err(e) => {
                println!("  {} {e}", self.red.apply_to("✗"));
                false
            }
        }
    }

    /// Imprime o relatório de um ciclo.
    pub fn print_report(&self, report: &CycleReport) {
        let stages: Vec<String> = report.stages.iter().map(ToString::to_string).collect();
        println!("{}", self.dim.apply_to("─── Poll Cycle ───"));
        println!("  from_date  {}", report.from_date);
        println!("  stages     {}", stages.join(" → "));
        println!("  duration   {}ms", report.duration_ms());

        match &report.outcome {
            CycleOutcome::Notified {
                message,
                delivery: Delivery::Delivered,
            } => println!("  {} Sent: {message}", self.green.apply_to("✓")),
            CycleOutcome::Notified {
                message,
                delivery: Delivery::Failed,
            } => println!("  {} Not delivered: {message}", self.red.apply_to("✗")),
            CycleOutcome::Unchanged => {
                println!("  {} Status unchanged", self.yellow.apply_to("="))
            }
            CycleOutcome::NoUpdates => {
                println!("  {} No new statuses", self.yellow.apply_to("·"))
            }
            CycleOutcome::Failed { error, alert } => {
                match report.last_stage() {
                    Some(stage) => println!("  {} {stage}: {error}", self.red.apply_to("✗")),
                    None => println!("  {} {error}", self.red.apply_to("✗")),
                }
                let alert = match alert {
                    Some(Delivery::Delivered) => "alert sent",
                    Some(Delivery::Failed) => "alert not delivered",
                    None => "alert suppressed",
                };
                println!("    {}", self.dim.apply_to(alert));
            }
        }
    }
}
