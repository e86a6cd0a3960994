// Registration audit entry point
use anyhow::Context;
use clap::Parser;
use engine::config::AuditSettings;
use shared::CnpjCheck;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Audit CPF/CNPJ, e-mail and phone fields of a customer registration export
#[derive(Parser, Debug)]
#[command(name = "engine", version, about)]
struct Cli {
    /// Registration export (Nome;Documento;Email;Telefone;Data Cadastro)
    csv: PathBuf,

    /// JSON file with audit settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verify CNPJ check digits instead of format only
    #[arg(long)]
    strict_cnpj: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{:#}", e);
        std::process::exit(exit_code(&e));
    }
}

impl Cli {
    /// Settings from `--config` (or defaults), with `--strict-cnpj` taking precedence.
    fn settings(&self) -> anyhow::Result<AuditSettings> {
        let mut settings = match &self.config {
            Some(path) => AuditSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => AuditSettings::default(),
        };
        if self.strict_cnpj {
            settings.cnpj_check = CnpjCheck::CheckDigits;
        }
        Ok(settings)
    }
}

// Engine errors keep their own code even under added context; anything else is 1
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<engine::EngineError>()
        .map(engine::EngineError::exit_code)
        .unwrap_or(1)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Starting registration audit...");

    let settings = cli.settings()?;
    let report = engine::audit_file(&cli.csv, settings)?;
    info!(total = report.total, invalid = report.invalid(), "Audit complete");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_strict_flag_overrides_config_file() {
        let config = write_config(r#"{ "cnpj_check": "format_only", "require_email": true }"#);
        let path = config.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["engine", "clientes.csv", "--config", path, "--strict-cnpj"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.cnpj_check, CnpjCheck::CheckDigits);
        assert!(settings.require_email);

        let cli = Cli::try_parse_from(["engine", "clientes.csv", "--config", path]).unwrap();
        assert_eq!(cli.settings().unwrap().cnpj_check, CnpjCheck::FormatOnly);
    }

    #[test]
    fn test_defaults_without_config() {
        let cli = Cli::try_parse_from(["engine", "clientes.csv"]).unwrap();
        assert_eq!(cli.settings().unwrap(), AuditSettings::default());
    }

    #[test]
    fn test_exit_code_survives_context() {
        let cli = Cli::try_parse_from(["engine", "clientes.csv", "--config", "/nonexistent/audit.json"]).unwrap();
        let err = cli.settings().unwrap_err();
        assert!(err.to_string().contains("Failed to load settings from /nonexistent/audit.json"));
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_exit_code_for_missing_export() {
        let err: anyhow::Error = engine::audit_file("/nonexistent/clientes.csv", AuditSettings::default())
            .unwrap_err()
            .into();
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_exit_code_for_foreign_error() {
        assert_eq!(exit_code(&anyhow::anyhow!("report could not be written")), 1);
    }
}
