// SPDX-License-Identifier: Apache-2.0

/// Full schema, idempotent. Badges and social links are JSON text
/// columns; all timestamps are RFC3339 text assigned by the caller.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS hero_slides (
    id          INTEGER PRIMARY KEY,
    image       TEXT NOT NULL,
    title       TEXT NOT NULL,
    badges      TEXT NOT NULL DEFAULT '[]',
    order_index INTEGER NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    id             INTEGER PRIMARY KEY,
    title          TEXT NOT NULL,
    description    TEXT NOT NULL DEFAULT '',
    image          TEXT NOT NULL DEFAULT '',
    badges         TEXT NOT NULL DEFAULT '[]',
    category       TEXT NOT NULL DEFAULT '',
    published_date TEXT NOT NULL,
    is_featured    INTEGER NOT NULL DEFAULT 0,
    is_active      INTEGER NOT NULL DEFAULT 1,
    order_index    INTEGER,
    updated_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_articles_published ON articles(published_date DESC);

CREATE TABLE IF NOT EXISTS news_clippings (
    id          INTEGER PRIMARY KEY,
    image       TEXT NOT NULL,
    title       TEXT,
    order_index INTEGER NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS top10_items (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    order_index INTEGER NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS site_settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS page_views (
    id         INTEGER PRIMARY KEY,
    page_type  TEXT NOT NULL,
    page_id    TEXT,
    visitor_id TEXT NOT NULL,
    session_id TEXT NOT NULL,
    user_agent TEXT NOT NULL DEFAULT '',
    referrer   TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_page_views_created ON page_views(created_at);

CREATE TABLE IF NOT EXISTS active_visitors (
    visitor_id    TEXT PRIMARY KEY,
    page_type     TEXT NOT NULL,
    page_id       TEXT,
    user_agent    TEXT NOT NULL DEFAULT '',
    last_activity TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tag_stats (
    tag_name       TEXT PRIMARY KEY,
    view_count     INTEGER NOT NULL DEFAULT 0,
    last_viewed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS admin_sessions (
    token      TEXT PRIMARY KEY,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";
