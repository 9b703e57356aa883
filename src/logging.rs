use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};

/// Deployment environment, decides where logs go
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Colored output on stderr
    Dev,
    /// Rotated log files
    Prod,
}

/// Starts the global logger. Keep the returned handle alive for the lifetime of the process.
pub fn setup_logging(env: Environment, log_dir: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    // Use the log level from the environment or fall back to "info"
    let logger = Logger::try_with_env_or_str("info")?;

    let logger = match env {
        Environment::Dev => logger.format(colored_default_format),
        Environment::Prod => logger
            .log_to_file(FileSpec::default().directory(log_dir).basename("annabingo"))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            ),
    };

    logger.start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_environment_names() {
        assert_eq!(Environment::from_str("dev", true).unwrap(), Environment::Dev);
        assert_eq!(Environment::from_str("PROD", true).unwrap(), Environment::Prod);
        assert!(Environment::from_str("staging", true).is_err());
    }
}
