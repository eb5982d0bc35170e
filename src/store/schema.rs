pub const SCHEMA: &str = r#"
-- Records that exist at most once, stored as JSON documents
CREATE TABLE IF NOT EXISTS singletons (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Named collections of managed endpoints
CREATE TABLE IF NOT EXISTS resource_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    labels TEXT NOT NULL DEFAULT '[]',                -- JSON array of {name, value}
    user_access_policies TEXT NOT NULL DEFAULT '{}',  -- JSON map user id -> policy
    team_access_policies TEXT NOT NULL DEFAULT '{}',  -- JSON map team id -> policy
    tag_ids TEXT NOT NULL DEFAULT '[]'                -- JSON array of tag ids
);

-- Prioritized permission bundles
CREATE TABLE IF NOT EXISTS roles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    priority INTEGER NOT NULL,
    authorizations INTEGER NOT NULL DEFAULT 0  -- bitmask
);

CREATE INDEX IF NOT EXISTS idx_roles_priority ON roles(priority);
"#;
