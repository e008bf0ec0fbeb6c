//! SQL schema for the forum SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS` / `OR IGNORE`.
///
/// Nicknames and slugs are `COLLATE NOCASE` everywhere they appear, so
/// equality, uniqueness, ordering and cursor comparisons all agree.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    nickname  TEXT COLLATE NOCASE PRIMARY KEY,
    email     TEXT COLLATE NOCASE NOT NULL UNIQUE,
    fullname  TEXT NOT NULL,
    about     TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS forums (
    slug         TEXT COLLATE NOCASE PRIMARY KEY,
    title        TEXT NOT NULL,
    admin        TEXT COLLATE NOCASE NOT NULL
                 REFERENCES users(nickname) ON DELETE CASCADE,
    num_threads  INTEGER NOT NULL DEFAULT 0,
    num_posts    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS threads (
    thread_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    slug       TEXT COLLATE NOCASE UNIQUE,      -- NULL when the thread has none
    forum      TEXT COLLATE NOCASE NOT NULL
               REFERENCES forums(slug) ON DELETE CASCADE,
    author     TEXT COLLATE NOCASE NOT NULL
               REFERENCES users(nickname) ON DELETE CASCADE,
    title      TEXT NOT NULL,
    message    TEXT NOT NULL,
    created    TEXT NOT NULL,                   -- fixed-width RFC 3339 UTC
    votes      INTEGER NOT NULL DEFAULT 0
);

-- `path` is the ancestry vector as concatenated 8-byte big-endian ids, so
-- BLOB (memcmp) order is tree order. `root` duplicates path[0].
CREATE TABLE IF NOT EXISTS posts (
    post_id    INTEGER PRIMARY KEY,             -- allocated from `sequences`
    parent     INTEGER REFERENCES posts(post_id) ON DELETE CASCADE,
    thread_id  INTEGER NOT NULL
               REFERENCES threads(thread_id) ON DELETE CASCADE,
    forum      TEXT COLLATE NOCASE NOT NULL,
    author     TEXT COLLATE NOCASE NOT NULL
               REFERENCES users(nickname) ON DELETE CASCADE,
    message    TEXT NOT NULL,
    created    TEXT NOT NULL,
    is_edited  INTEGER NOT NULL DEFAULT 0,
    path       BLOB NOT NULL,
    root       INTEGER NOT NULL,
    CHECK (length(path) > 0 AND length(path) % 8 = 0)
);

CREATE TABLE IF NOT EXISTS votes (
    nickname   TEXT COLLATE NOCASE NOT NULL
               REFERENCES users(nickname) ON DELETE CASCADE,
    thread_id  INTEGER NOT NULL
               REFERENCES threads(thread_id) ON DELETE CASCADE,
    voice      INTEGER NOT NULL CHECK (voice IN (-1, 1)),
    PRIMARY KEY (nickname, thread_id)
) WITHOUT ROWID;

-- Who has created a thread or post in which forum.
CREATE TABLE IF NOT EXISTS forum_users (
    forum     TEXT COLLATE NOCASE NOT NULL
              REFERENCES forums(slug) ON DELETE CASCADE,
    nickname  TEXT COLLATE NOCASE NOT NULL
              REFERENCES users(nickname) ON DELETE CASCADE,
    PRIMARY KEY (forum, nickname)
) WITHOUT ROWID;

-- Single-row global counters.
CREATE TABLE IF NOT EXISTS status (
    id           INTEGER PRIMARY KEY CHECK (id = 1),
    num_users    INTEGER NOT NULL DEFAULT 0,
    num_forums   INTEGER NOT NULL DEFAULT 0,
    num_threads  INTEGER NOT NULL DEFAULT 0,
    num_posts    INTEGER NOT NULL DEFAULT 0
);
INSERT OR IGNORE INTO status (id) VALUES (1);

-- Monotonic id allocators. Never reset, so ids are never reused.
CREATE TABLE IF NOT EXISTS sequences (
    name   TEXT PRIMARY KEY,
    value  INTEGER NOT NULL
);
INSERT OR IGNORE INTO sequences (name, value) VALUES ('post', 0);

CREATE INDEX IF NOT EXISTS threads_forum_created_idx ON threads(forum, created, thread_id);
CREATE INDEX IF NOT EXISTS posts_thread_id_idx       ON posts(thread_id, post_id);
CREATE INDEX IF NOT EXISTS posts_thread_path_idx     ON posts(thread_id, path);
CREATE INDEX IF NOT EXISTS posts_root_path_idx       ON posts(root, path);
CREATE INDEX IF NOT EXISTS posts_thread_roots_idx    ON posts(thread_id, post_id)
    WHERE parent IS NULL;
CREATE INDEX IF NOT EXISTS forum_users_nickname_idx  ON forum_users(nickname);

PRAGMA user_version = 1;
";
