pub const SCHEMA: &str = r#"
-- Sites are tenants, keyed by their subdomain
CREATE TABLE IF NOT EXISTS sites (
    id TEXT PRIMARY KEY,
    subdomain TEXT NOT NULL UNIQUE,   -- immutable once created
    display_name TEXT NOT NULL,
    template_id TEXT,                 -- raw id; unknown values fall back at render time
    status TEXT NOT NULL DEFAULT 'setup_pending',
    owner_id TEXT NOT NULL,           -- opaque to core
    plan TEXT,
    niche TEXT,

    -- Content payloads (JSON), NULL when absent
    published_content TEXT,
    draft_content TEXT,

    -- Flat content fields from before payloads existed
    legacy_business_name TEXT,
    legacy_tagline TEXT,
    legacy_about TEXT,
    legacy_services TEXT,             -- JSON array
    legacy_color TEXT,
    legacy_logo_url TEXT,

    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Tokens are auth credentials for the admin API
CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    token_hash TEXT NOT NULL,          -- argon2id hash with embedded salt
    token_lookup TEXT NOT NULL,        -- first 8 chars of ID for fast lookup
    is_admin INTEGER NOT NULL DEFAULT 0,

    -- Lifecycle
    created_at TEXT DEFAULT (datetime('now')),
    expires_at TEXT,            -- NULL = never
    last_used_at TEXT
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_sites_owner ON sites(owner_id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_tokens_lookup ON tokens(token_lookup);
"#;
