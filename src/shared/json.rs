use serde::de::DeserializeOwned;
use tracing::warn;

/// 壊れたJSONをフォールバック値に落とす安全パーサ
///
/// Stored payloads may predate the current schema or be truncated by the
/// platform store; a parse failure is logged and the fallback returned
/// instead of surfacing an error to read-only paths.
pub fn parse_or_default<T: DeserializeOwned>(raw: Option<&str>, fallback: T) -> T {
    let Some(raw) = raw else {
        return fallback;
    };
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("Discarding unparseable stored payload: {}", err);
            fallback
        }
    }
}
