//! Context Collector
//!
//! Gathers the handful of host facts the prompt needs: distribution id and
//! version from os-release, kernel release, architecture, and the package
//! manager implied by the distribution.

use crate::error::NlshError;
use crate::types::SystemContext;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use sysinfo::System;
use tracing::debug;

const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];
const UNKNOWN: &str = "unknown";
const DEFAULT_PACKAGE_MANAGER: &str = "dnf";

/// Collect the context of the running host.
pub fn collect() -> Result<SystemContext, NlshError> {
    let os_release = read_os_release(&OS_RELEASE_PATHS)?;
    let vars = os_release
        .as_deref()
        .map(parse_os_release)
        .unwrap_or_default();

    let kernel = System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string());
    let context = from_os_release(&vars, kernel, std::env::consts::ARCH.to_string());
    debug!(context = %context, "Collected system context");
    Ok(context)
}

/// Build a context from parsed os-release variables plus kernel and arch.
pub fn from_os_release(
    vars: &HashMap<String, String>,
    kernel: String,
    arch: String,
) -> SystemContext {
    let os_name = vars
        .get("ID")
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string());
    let os_version = vars
        .get("VERSION_ID")
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string());
    let package_manager = detect_package_manager(
        &os_name,
        vars.get("ID_LIKE").map(String::as_str).unwrap_or(""),
    );

    SystemContext {
        os_name,
        os_version,
        kernel,
        arch,
        package_manager: package_manager.to_string(),
    }
}

/// Read the first os-release file that exists. A missing file is not an
/// error; any other read failure is.
fn read_os_release<P: AsRef<Path>>(paths: &[P]) -> Result<Option<String>, NlshError> {
    for path in paths {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => return Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(NlshError::ContextCollection(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }
    Ok(None)
}

/// Parse os-release `KEY=value` lines, stripping surrounding quotes.
pub fn parse_os_release(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            vars.insert(key.trim().to_string(), value.to_string());
        }
    }

    vars
}

/// Map a distribution id (falling back to ID_LIKE) to its package manager.
pub fn detect_package_manager(id: &str, id_like: &str) -> &'static str {
    if let Some(pm) = package_manager_for(&id.to_lowercase()) {
        return pm;
    }

    id_like
        .split_whitespace()
        .find_map(|like| package_manager_for(&like.to_lowercase()))
        .unwrap_or(DEFAULT_PACKAGE_MANAGER)
}

fn package_manager_for(id: &str) -> Option<&'static str> {
    match id {
        "debian" | "ubuntu" | "linuxmint" | "mint" | "pop" | "raspbian" | "elementary" => {
            Some("apt-get")
        }
        "fedora" | "rhel" | "centos" | "rocky" | "almalinux" | "alma" | "ol" | "amzn" => {
            Some("dnf")
        }
        "arch" | "archlinux" | "manjaro" | "endeavouros" | "garuda" => Some("pacman"),
        "alpine" => Some("apk"),
        id if id.starts_with("opensuse") || id == "sles" || id == "suse" => Some("zypper"),
        _ => None,
    }
}
