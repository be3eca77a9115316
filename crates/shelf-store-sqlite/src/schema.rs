//! DDL for the `opuses` table.
//!
//! Applied on every open. `user_version` records the layout revision.

/// Safe to run against an existing database.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS opuses (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL CHECK (length(title) BETWEEN 1 AND 255),
    creator      TEXT,
    category     TEXT NOT NULL
                 CHECK (category IN ('book', 'program', 'movie', 'other')),
    sub_category TEXT,
    status       TEXT NOT NULL DEFAULT 'planned'
                 CHECK (status IN ('completed', 'in_progress', 'planned')),
    rating       INTEGER CHECK (rating BETWEEN 0 AND 255),
    review       TEXT,
    created_at   TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    updated_at   TEXT NOT NULL    -- RFC 3339 UTC; moves on every change
);

PRAGMA user_version = 1;
";
