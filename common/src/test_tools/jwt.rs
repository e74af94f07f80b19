use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{json, Value};

const SIGNATURE_FOR_MOCK_TOKENS: &str = "c2lnbmF0dXJl";

/// Builds a token with the given claims. The signature is garbage: tokens are only
/// ever decoded, never verified.
pub fn build_unsigned_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "HS256", "typ": "JWT" }).to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

    format!("{header}.{payload}.{SIGNATURE_FOR_MOCK_TOKENS}")
}
