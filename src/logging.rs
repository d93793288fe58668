//! Tracing bootstrap for hosts that embed the store.
//!
//! The store itself only emits `tracing` events; nothing is printed until a
//! subscriber is installed. [`init_logging`] installs a formatting subscriber
//! once per process.

use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::EnvFilter;

static ACTIVE_DIRECTIVE: OnceCell<String> = OnceCell::new();

/// Installs a global fmt subscriber filtered by `RUST_LOG`, or by
/// `default_directive` when `RUST_LOG` is unset or unparsable.
///
/// Repeating the call with the same directive is a no-op. A different
/// directive, or a subscriber installed by someone else, is reported as an
/// error instead of panicking.
pub fn init_logging(default_directive: &str) -> Result<(), String> {
    let mut installed = false;
    let active = ACTIVE_DIRECTIVE.get_or_try_init(|| -> Result<String, String> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(default_directive)
                .map_err(|e| format!("invalid log directive `{default_directive}`: {e}"))?,
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| format!("failed to install tracing subscriber: {e}"))?;
        installed = true;
        Ok(default_directive.to_string())
    })?;

    // A concurrent caller may have won the race with another directive.
    if active != default_directive {
        return Err(format!(
            "logging already initialized with `{active}`; refusing to switch to `{default_directive}`"
        ));
    }

    if installed {
        info!(directive = default_directive, "logging initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn racing_inits_accept_only_the_installed_directive() {
        let directives = ["contactbook=debug", "warn", "contactbook=trace", "info"];
        let results: Vec<(&str, Result<(), String>)> = thread::scope(|s| {
            let handles: Vec<_> = directives
                .iter()
                .map(|&d| s.spawn(move || (d, init_logging(d))))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("init thread panicked"))
                .collect()
        });

        let winners: Vec<&str> = results
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(winners.len(), 1, "{results:?}");
        for (_, r) in results.iter().filter(|(_, r)| r.is_err()) {
            assert!(r.as_ref().unwrap_err().contains("refusing to switch"));
        }

        let winner = winners[0];
        assert!(init_logging(winner).is_ok());
        let loser = directives.iter().find(|&&d| d != winner).unwrap();
        assert!(init_logging(loser).is_err());
    }
}
