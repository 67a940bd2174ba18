use std::path::{Path, PathBuf};

pub const STORE_DIR: [&str; 2] = [".evelynpro", "store"];

#[must_use]
pub fn store_root(base: &Path) -> PathBuf {
    base.join(STORE_DIR[0]).join(STORE_DIR[1])
}

/// Maps a logical key to a safe file name.
#[must_use]
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => c,
            _ => '-',
        })
        .collect()
}
