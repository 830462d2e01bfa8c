// Docker id canonicalization, group precedence, identity map loading

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;

/// cAdvisor cgroup id shape: "/docker/<container id>".
fn docker_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/docker/([0-9a-f]{12,64})$").unwrap())
}

/// Optional name/service metadata for one container id. A missing map
/// entry behaves as both fields absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

pub type IdentityMap = HashMap<String, IdentityEntry>;

/// Loads the docker id -> {name, service} map. `None` means no map was
/// supplied (empty map); a named file that cannot be read or parsed is
/// fatal, since every group label downstream would be wrong.
pub fn load_identity_map(path: Option<&Path>) -> anyhow::Result<IdentityMap> {
    let Some(path) = path else {
        return Ok(IdentityMap::new());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading docker map {}", path.display()))?;
    let map = serde_json::from_str(&s)
        .with_context(|| format!("parsing docker map {}", path.display()))?;
    Ok(map)
}

/// Canonical 12-character docker id from a cgroup id. A cgroup id that
/// does not match the "/docker/<hex>" shape is used verbatim so every
/// entity still resolves. The 12-char truncation is a fixed contract:
/// map keys of any other length miss and fall through to the name/id
/// fallbacks.
pub fn canonical_id(cgroup_id: &str) -> String {
    match docker_id_re().captures(cgroup_id) {
        Some(caps) => caps[1][..12].to_string(),
        None => cgroup_id.to_string(),
    }
}

/// Group precedence: service, then name, then the canonical id itself.
/// Empty strings count as absent. Total: every entity gets a non-empty
/// group.
pub fn resolve_group(canonical: &str, entry: &IdentityEntry) -> String {
    if let Some(service) = non_empty(&entry.service) {
        return service.to_string();
    }
    if let Some(name) = non_empty(&entry.name) {
        return name.to_string();
    }
    canonical.to_string()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
