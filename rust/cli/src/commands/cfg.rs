//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with where it
//! came from:
//!
//! ```json
//! {
//!   "big_blind": {
//!     "value": 10,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "limit": {
            "value": config.limit,
            "source": sources.limit,
        },
        "max_hands": {
            "value": config.max_hands,
            "source": sources.max_hands,
        },
        "opponent": {
            "value": config.opponent,
            "source": sources.opponent,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
