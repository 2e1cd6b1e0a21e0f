use crate::engine::error::GatewayError;
use crate::model::narration::{Generated, NarrationReply, OptionBounds};

/// Parses a raw service reply into narration and options.
///
/// Models often write a sentence or two before the payload, so parsing
/// starts at the first `{` and runs to the end of the reply.
pub fn parse_reply(raw: &str, bounds: OptionBounds) -> Result<Generated, GatewayError> {
    let Some(start) = raw.find('{') else {
        return Err(GatewayError::NoJsonFound {
            raw: raw.to_string(),
        });
    };

    let reply: NarrationReply =
        serde_json::from_str(&raw[start..]).map_err(|source| GatewayError::MalformedJson {
            source,
            raw: raw.to_string(),
        })?;

    let count = reply.options.len();
    if !bounds.contains(count) {
        return Err(GatewayError::OptionCountOutOfRange {
            count,
            min: bounds.min,
            max: bounds.max,
        });
    }

    Ok(reply.into())
}
