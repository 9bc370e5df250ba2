//! Emit command implementation - writes one event through the configured sink

use anyhow::Result;
use rotalog::log;

use crate::cli::EmitArgs;

pub fn execute(args: EmitArgs) -> Result<()> {
    let path = super::resolve_config_path(args.config)?;
    let cfg = super::load_config(&path)?;

    rotalog::init(&cfg)?;

    let logger = log::level(args.min_level);
    let mut event = if args.fatal {
        // Exits with status 1 once the record is written
        logger.fatal()
    } else {
        logger.with_level(args.level)
    };
    for (key, value) in &args.fields {
        event = event.str(key, value);
    }
    event.msg(&args.message);

    tracing::debug!(level = %args.level, "event written");
    Ok(())
}
