// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Static catalogue of recognized configuration groups and fields.
//!
//! The catalogue is defined once at compile time and never mutated;
//! group and field order is significant and drives presentation order.

use serde_json::{Map, Value};

/// How a field is presented and interpreted by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    Number,
    Boolean,
    Select,
}

impl FieldKind {
    /// The wire spelling used in the serialized schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Select => "select",
        }
    }
}

/// A help link attached to a field (URL plus an i18n text key).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLink {
    pub url: &'static str,
    pub text: &'static str,
}

/// One recognized configuration field.
///
/// `required` defaults to true; only non-required fields may be
/// intentionally cleared by a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
    pub required: bool,
    pub options: Option<&'static [&'static str]>,
    pub link: Option<FieldLink>,
}

impl FieldSpec {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            default: None,
            required: true,
            options: None,
            link: None,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn with_options(
        mut self,
        options: &'static [&'static str],
    ) -> Self {
        self.options = Some(options);
        self
    }

    pub const fn with_link(
        mut self,
        url: &'static str,
        text: &'static str,
    ) -> Self {
        self.link = Some(FieldLink { url, text });
        self
    }
}

/// An ordered group of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

/// The ordered, immutable registry of groups.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    groups: &'static [GroupSpec],
}

impl Catalog {
    pub const fn new(groups: &'static [GroupSpec]) -> Self {
        Self { groups }
    }

    /// The built-in catalogue shipped with the engine.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// All groups, in definition order.
    pub fn groups(&self) -> &'static [GroupSpec] {
        self.groups
    }

    /// Looks up a group by its key.
    pub fn group(&self, group_key: &str) -> Option<&'static GroupSpec> {
        self.groups.iter().find(|g| g.key == group_key)
    }

    /// The ordered fields of a group, `None` for an unknown group key.
    pub fn fields_of(
        &self,
        group_key: &str,
    ) -> Option<&'static [FieldSpec]> {
        self.group(group_key).map(|g| g.fields)
    }

    /// Flat lookup of a field and its owning group. Field keys are
    /// unique across the whole catalogue, so the first hit is the only
    /// one.
    pub fn find(
        &self,
        key: &str,
    ) -> Option<(&'static GroupSpec, &'static FieldSpec)> {
        self.groups.iter().find_map(|g| {
            g.fields.iter().find(|f| f.key == key).map(|f| (g, f))
        })
    }

    /// Flat lookup of a field by key.
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.find(key).map(|(_, f)| f)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Serializes the catalogue as the nested schema document:
    /// `group -> { title, items: [{ key, label, type, default?,
    /// required?, options?, link?, link_text? }] }`, in catalogue
    /// order. `required` is emitted only when false.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for group in self.groups {
            let mut g = Map::new();
            g.insert("title".to_string(), Value::from(group.title));
            let items = group
                .fields
                .iter()
                .map(field_to_value)
                .collect::<Vec<Value>>();
            g.insert("items".to_string(), Value::Array(items));
            root.insert(group.key.to_string(), Value::Object(g));
        }
        Value::Object(root)
    }
}

fn field_to_value(field: &FieldSpec) -> Value {
    let mut item = Map::new();
    item.insert("key".to_string(), Value::from(field.key));
    item.insert("label".to_string(), Value::from(field.label));
    item.insert("type".to_string(), Value::from(field.kind.as_str()));
    if let Some(default) = field.default {
        item.insert("default".to_string(), Value::from(default));
    }
    if !field.required {
        item.insert("required".to_string(), Value::Bool(false));
    }
    if let Some(options) = field.options {
        let opts = options.iter().map(|o| Value::from(*o)).collect();
        item.insert("options".to_string(), Value::Array(opts));
    }
    if let Some(link) = field.link {
        item.insert("link".to_string(), Value::from(link.url));
        item.insert("link_text".to_string(), Value::from(link.text));
    }
    Value::Object(item)
}

use FieldKind::{Boolean, Number, Password, Select, Text};

static BUILTIN: Catalog = Catalog::new(&[
    GroupSpec {
        key: "auth",
        title: "Authentication",
        fields: &[
            FieldSpec::new("SECRET_KEY", "Secret key", Password)
                .with_default("envkeep-secret-key-change-me"),
            FieldSpec::new("ADMIN_USER", "Admin username", Text)
                .with_default("admin"),
            FieldSpec::new("ADMIN_PASSWORD", "Admin password", Password)
                .with_default("123456"),
        ],
    },
    GroupSpec {
        key: "server",
        title: "Server",
        fields: &[
            FieldSpec::new("PYTHON_API_HOST", "Listen address", Text)
                .with_default("0.0.0.0"),
            FieldSpec::new("PYTHON_API_PORT", "Port", Number)
                .with_default("5000"),
            FieldSpec::new("PYTHON_API_DEBUG", "Debug mode", Boolean)
                .with_default("False"),
        ],
    },
    GroupSpec {
        key: "worker",
        title: "Order worker",
        fields: &[
            FieldSpec::new(
                "ENABLE_PENDING_ORDER_WORKER",
                "Enable pending-order worker",
                Boolean,
            )
            .with_default("True"),
            FieldSpec::new(
                "PENDING_ORDER_STALE_SEC",
                "Order staleness timeout (s)",
                Number,
            )
            .with_default("90"),
        ],
    },
    GroupSpec {
        key: "notification",
        title: "Signal notifications",
        fields: &[
            FieldSpec::new("SIGNAL_WEBHOOK_URL", "Webhook URL", Text)
                .optional(),
            FieldSpec::new("SIGNAL_WEBHOOK_TOKEN", "Webhook token", Password)
                .optional(),
            FieldSpec::new(
                "SIGNAL_NOTIFY_TIMEOUT_SEC",
                "Notify timeout (s)",
                Number,
            )
            .with_default("6"),
            FieldSpec::new(
                "TELEGRAM_BOT_TOKEN",
                "Telegram bot token",
                Password,
            )
            .optional()
            .with_link("https://t.me/BotFather", "settings.link.createBot"),
        ],
    },
    GroupSpec {
        key: "smtp",
        title: "Email (SMTP)",
        fields: &[
            FieldSpec::new("SMTP_HOST", "SMTP server", Text).optional(),
            FieldSpec::new("SMTP_PORT", "SMTP port", Number)
                .with_default("587"),
            FieldSpec::new("SMTP_USER", "SMTP username", Text).optional(),
            FieldSpec::new("SMTP_PASSWORD", "SMTP password", Password)
                .optional(),
            FieldSpec::new("SMTP_FROM", "From address", Text).optional(),
            FieldSpec::new("SMTP_USE_TLS", "Use TLS", Boolean)
                .with_default("True"),
            FieldSpec::new("SMTP_USE_SSL", "Use SSL", Boolean)
                .with_default("False"),
        ],
    },
    GroupSpec {
        key: "twilio",
        title: "Twilio SMS",
        fields: &[
            FieldSpec::new("TWILIO_ACCOUNT_SID", "Account SID", Password)
                .optional()
                .with_link(
                    "https://console.twilio.com/",
                    "settings.link.getApi",
                ),
            FieldSpec::new("TWILIO_AUTH_TOKEN", "Auth token", Password)
                .optional(),
            FieldSpec::new("TWILIO_FROM_NUMBER", "From number", Text)
                .optional(),
        ],
    },
    GroupSpec {
        key: "strategy",
        title: "Strategy engine",
        fields: &[
            FieldSpec::new(
                "DISABLE_RESTORE_RUNNING_STRATEGIES",
                "Disable strategy auto-restore",
                Boolean,
            )
            .with_default("False"),
            FieldSpec::new(
                "STRATEGY_TICK_INTERVAL_SEC",
                "Strategy tick interval (s)",
                Number,
            )
            .with_default("10"),
            FieldSpec::new(
                "PRICE_CACHE_TTL_SEC",
                "Price cache TTL (s)",
                Number,
            )
            .with_default("10"),
        ],
    },
    GroupSpec {
        key: "proxy",
        title: "Proxy",
        fields: &[
            FieldSpec::new("PROXY_PORT", "Proxy port", Text).optional(),
            FieldSpec::new("PROXY_HOST", "Proxy host", Text)
                .with_default("127.0.0.1"),
            FieldSpec::new("PROXY_SCHEME", "Proxy scheme", Select)
                .with_options(&["socks5h", "socks5", "http", "https"])
                .with_default("socks5h"),
            FieldSpec::new("PROXY_URL", "Full proxy URL", Text).optional(),
        ],
    },
    GroupSpec {
        key: "app",
        title: "Application",
        fields: &[
            FieldSpec::new("CORS_ORIGINS", "CORS origins", Text)
                .with_default("*"),
            FieldSpec::new("RATE_LIMIT", "Rate limit (per minute)", Number)
                .with_default("100"),
            FieldSpec::new("ENABLE_CACHE", "Enable cache", Boolean)
                .with_default("False"),
            FieldSpec::new(
                "ENABLE_REQUEST_LOG",
                "Enable request log",
                Boolean,
            )
            .with_default("True"),
            FieldSpec::new(
                "ENABLE_AI_ANALYSIS",
                "Enable AI analysis",
                Boolean,
            )
            .with_default("True"),
        ],
    },
    GroupSpec {
        key: "ai",
        title: "AI / LLM",
        fields: &[
            FieldSpec::new(
                "OPENROUTER_API_KEY",
                "OpenRouter API key",
                Password,
            )
            .optional()
            .with_link("https://openrouter.ai/keys", "settings.link.getApiKey"),
            FieldSpec::new("OPENROUTER_API_URL", "OpenRouter API URL", Text)
                .with_default(
                    "https://openrouter.ai/api/v1/chat/completions",
                ),
            FieldSpec::new("OPENROUTER_MODEL", "Default model", Text)
                .with_default("openai/gpt-4o")
                .with_link(
                    "https://openrouter.ai/models",
                    "settings.link.viewModels",
                ),
            FieldSpec::new("OPENROUTER_TEMPERATURE", "Temperature", Number)
                .with_default("0.7"),
            FieldSpec::new("OPENROUTER_MAX_TOKENS", "Max tokens", Number)
                .with_default("4000"),
            FieldSpec::new(
                "OPENROUTER_TIMEOUT",
                "Request timeout (s)",
                Number,
            )
            .with_default("300"),
            FieldSpec::new(
                "OPENROUTER_CONNECT_TIMEOUT",
                "Connect timeout (s)",
                Number,
            )
            .with_default("30"),
            FieldSpec::new("AI_MODELS_JSON", "Model list (JSON)", Text)
                .with_default("{}")
                .optional(),
        ],
    },
    GroupSpec {
        key: "market",
        title: "Market presets",
        fields: &[
            FieldSpec::new("MARKET_TYPES_JSON", "Market types (JSON)", Text)
                .with_default("[]")
                .optional(),
            FieldSpec::new(
                "TRADING_SUPPORTED_SYMBOLS_JSON",
                "Supported symbols (JSON)",
                Text,
            )
            .with_default("[]")
            .optional(),
        ],
    },
    GroupSpec {
        key: "data_source",
        title: "Data sources",
        fields: &[
            FieldSpec::new(
                "DATA_SOURCE_TIMEOUT",
                "Data source timeout (s)",
                Number,
            )
            .with_default("30"),
            FieldSpec::new("DATA_SOURCE_RETRY", "Retry count", Number)
                .with_default("3"),
            FieldSpec::new(
                "DATA_SOURCE_RETRY_BACKOFF",
                "Retry backoff (s)",
                Number,
            )
            .with_default("0.5"),
            FieldSpec::new("FINNHUB_API_KEY", "Finnhub API key", Password)
                .optional()
                .with_link(
                    "https://finnhub.io/register",
                    "settings.link.freeRegister",
                ),
            FieldSpec::new("FINNHUB_TIMEOUT", "Finnhub timeout (s)", Number)
                .with_default("10"),
            FieldSpec::new(
                "FINNHUB_RATE_LIMIT",
                "Finnhub rate limit",
                Number,
            )
            .with_default("60"),
            FieldSpec::new(
                "CCXT_DEFAULT_EXCHANGE",
                "CCXT default exchange",
                Text,
            )
            .with_default("coinbase")
            .with_link(
                "https://github.com/ccxt/ccxt#supported-cryptocurrency-exchange-markets",
                "settings.link.supportedExchanges",
            ),
            FieldSpec::new("CCXT_TIMEOUT", "CCXT timeout (ms)", Number)
                .with_default("10000"),
            FieldSpec::new("CCXT_PROXY", "CCXT proxy", Text).optional(),
            FieldSpec::new("AKSHARE_TIMEOUT", "Akshare timeout (s)", Number)
                .with_default("30"),
            FieldSpec::new(
                "YFINANCE_TIMEOUT",
                "YFinance timeout (s)",
                Number,
            )
            .with_default("30"),
            FieldSpec::new("TIINGO_API_KEY", "Tiingo API key", Password)
                .optional()
                .with_link(
                    "https://www.tiingo.com/account/api/token",
                    "settings.link.getToken",
                ),
            FieldSpec::new("TIINGO_TIMEOUT", "Tiingo timeout (s)", Number)
                .with_default("10"),
        ],
    },
    GroupSpec {
        key: "search",
        title: "Web search",
        fields: &[
            FieldSpec::new("SEARCH_PROVIDER", "Search provider", Select)
                .with_options(&["google", "bing", "none"])
                .with_default("google"),
            FieldSpec::new("SEARCH_MAX_RESULTS", "Max results", Number)
                .with_default("10"),
            FieldSpec::new(
                "SEARCH_GOOGLE_API_KEY",
                "Google API key",
                Password,
            )
            .optional()
            .with_link(
                "https://developers.google.com/custom-search/v1/introduction",
                "settings.link.applyApi",
            ),
            FieldSpec::new("SEARCH_GOOGLE_CX", "Google CX", Text)
                .optional()
                .with_link(
                    "https://programmablesearchengine.google.com/controlpanel/all",
                    "settings.link.createSearchEngine",
                ),
            FieldSpec::new("SEARCH_BING_API_KEY", "Bing API key", Password)
                .optional()
                .with_link(
                    "https://www.microsoft.com/en-us/bing/apis/bing-web-search-api",
                    "settings.link.applyApi",
                ),
            FieldSpec::new("INTERNAL_API_KEY", "Internal API key", Password)
                .optional(),
        ],
    },
]);
