/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://arnipay.com.py/api/v1";

/// Sandbox API base URL.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.arnipay.com.py/api/v1";

/// Header carrying the merchant client identifier.
pub const CLIENT_ID_HEADER: &str = "X-Client-ID";

/// Header carrying the unix timestamp (seconds) the request was signed at.
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";

/// Header carrying the canonical-scheme signature.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Header carrying the simple-scheme signature (`sha256=<hex>`).
pub const WEBHOOK_SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Header set by reverse proxies when the request target was rewritten.
pub const ORIGINAL_URI_HEADER: &str = "X-Original-URI";

/// Prefix accepted (and produced) by the simple shared-secret scheme.
pub const SHA256_PREFIX: &str = "sha256=";

/// Method assumed for inbound webhooks when the transport does not report one.
pub const DEFAULT_WEBHOOK_METHOD: &str = "POST";

/// Event kind emitted when a payment link is paid.
pub const EVENT_PAYMENT_COMPLETED: &str = "payment.completed";

/// Event kind emitted when a refund is pending (e.g. out-of-stock detected).
pub const EVENT_PENDING_REFUND: &str = "pending_refund";

/// Event kind emitted when funds were returned automatically.
pub const EVENT_AUTO_REFUNDED: &str = "auto_refunded";
