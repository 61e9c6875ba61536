//! Saved query drafts.
//!
//! Building a query interactively takes a minute; losing it on exit is rude.
//! Drafts are plain JSON files under `~/.cache/sqlsketch/`, one per name, the
//! same wire format the form posts.
//!
//! To store something new, implement the Cacheable and CacheKey traits, then
//! use the read() and write() functions. Cacheable binds each stored type to
//! its key type, so reading a Draft with anything but a DraftName refuses to
//! compile.
use crate::engine::QueryDescription;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;

pub trait CacheKey {
    fn as_path(&self) -> String;
}

pub trait Cacheable {
    type CacheKey;

    fn cache_key(&self) -> Self::CacheKey;

    /// Everything of one type lands in the same folder, named after this, so
    /// we can answer "what drafts do we have" by listing it.
    fn type_id() -> &'static str;
}

pub fn read<D, K>(cache_key: &K) -> Result<D, crate::Error>
where
    D: Cacheable<CacheKey = K> + DeserializeOwned,
    K: CacheKey,
{
    let file_location = get_cache_path(D::type_id(), cache_key.as_path().as_str())?;

    let data = serde_json::from_reader(fs::File::open(file_location)?)?;

    Ok(data)
}

pub fn write<D, K>(data: &D) -> Result<(), crate::Error>
where
    D: Cacheable<CacheKey = K> + Serialize,
    K: CacheKey,
{
    let file_location = get_cache_path(D::type_id(), data.cache_key().as_path().as_str())?;

    log::debug!("writing {}", file_location.display());

    let data = serde_json::to_string(&data)?;

    fs::write(file_location, data)?;

    Ok(())
}

pub fn read_all<D>() -> Result<Vec<D>, crate::Error>
where
    D: Cacheable + DeserializeOwned,
{
    let folder = require_cache_folder(D::type_id())?;

    let mut found = Vec::new();

    for entry in fs::read_dir(folder)? {
        found.push(serde_json::from_reader(fs::File::open(entry?.path())?)?);
    }

    Ok(found)
}

fn get_cache_path(type_id: &'static str, cache_key: &str) -> Result<PathBuf, crate::Error> {
    let mut location = require_cache_folder(type_id)?;

    location.push(cache_key);

    Ok(location)
}

fn require_cache_folder(type_id: &'static str) -> Result<PathBuf, crate::Error> {
    let home = std::env::var("HOME")?;

    let mut path = PathBuf::from(home);
    path.push(".cache");
    path.push("sqlsketch");
    path.push("cache");
    path.push("v1");
    path.push(type_id);

    // we have to make sure it exists, right?
    fs::create_dir_all(&path)?;

    Ok(path)
}

/// A named query description, as saved from the form or the CLI.
#[derive(Serialize, Deserialize)]
pub struct Draft {
    pub name: DraftName,
    pub description: QueryDescription,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DraftName(String);

impl From<String> for DraftName {
    fn from(value: String) -> Self {
        DraftName(value)
    }
}

impl From<&str> for DraftName {
    fn from(value: &str) -> Self {
        DraftName(value.to_string())
    }
}

impl From<DraftName> for String {
    fn from(value: DraftName) -> Self {
        value.0
    }
}

impl Display for DraftName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Cacheable for Draft {
    type CacheKey = DraftName;

    fn cache_key(&self) -> Self::CacheKey {
        self.name.clone()
    }

    fn type_id() -> &'static str {
        "draft"
    }
}

impl CacheKey for DraftName {
    fn as_path(&self) -> String {
        format!("draft_{}.json", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_names_map_to_stable_file_names() {
        let name = DraftName::from("active-users");

        assert_eq!("draft_active-users.json", name.as_path());
    }
}
