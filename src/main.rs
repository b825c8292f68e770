use static_website::config::WebsiteConfig;
use static_website::{logger, plan, Result, WebsiteError};
use std::process::ExitCode;

/// Config file used when no path is given (extension optional)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 for bad input (missing site root, degenerate values), 1 otherwise
const fn exit_status(err: &WebsiteError) -> u8 {
    if err.is_fatal_input() {
        2
    } else {
        1
    }
}

fn run(config_path: &str) -> Result<()> {
    let cfg = WebsiteConfig::load_from(config_path)?;
    logger::init(&cfg.logging)?;
    logger::log_config_loaded(config_path, &cfg);

    let website = plan::plan_website(&cfg)?;
    let rendered = website.render(cfg.output.format)?;
    plan::write_plan(&rendered, cfg.output.file.as_deref())?;
    logger::log_plan_written(cfg.output.file.as_deref());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_status() {
        let not_found = WebsiteError::NotFound {
            path: PathBuf::from("public"),
        };
        assert_eq!(exit_status(&not_found), 2);
        assert_eq!(exit_status(&WebsiteError::invalid("empty zone")), 2);

        let io = WebsiteError::io(
            "public/a.html",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(exit_status(&io), 1);
        assert_eq!(exit_status(&WebsiteError::Render("bad".into())), 1);
    }
}
