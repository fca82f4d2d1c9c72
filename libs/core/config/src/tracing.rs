use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install color-eyre with file:line locations and without the env section.
///
/// Call before any fallible operation in `main`. Safe to call more than once.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Directives used when `RUST_LOG` is unset.
fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "info,sea_orm=warn,sqlx=warn",
        Environment::Development => {
            "debug,tower_http=debug,sea_orm=info,sqlx=warn,hyper=info"
        }
    }
}

fn output_layer(environment: &Environment) -> BoxedLayer {
    match environment {
        Environment::Production => fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed(),
        Environment::Development => fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed(),
    }
}

/// Initialize the global subscriber.
///
/// Production writes flattened JSON lines, development pretty multi-line
/// output. `tracing_error::ErrorLayer` is always attached so eyre reports
/// carry span traces. `RUST_LOG` overrides the default filter. A second call
/// is a no-op.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let result = tracing_subscriber::registry()
        .with(output_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_with_rust_log_env() {
        temp_env::with_var("RUST_LOG", Some("warn,domain_events=trace"), || {
            init_tracing(&Environment::Production);
        });
    }

    #[test]
    fn test_default_directives_quiet_sql_in_production() {
        assert!(default_directives(&Environment::Production).starts_with("info"));
        assert!(default_directives(&Environment::Development).contains("tower_http=debug"));
    }

    #[test]
    fn test_install_color_eyre_is_idempotent() {
        install_color_eyre();
        install_color_eyre();
    }
}
