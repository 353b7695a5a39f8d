use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

const LOOPBACK: &str = "127.0.0.1";

/// Line appended to the hosts file for a site
pub fn hosts_line(hostname: &str) -> String {
    format!("{LOOPBACK} {hostname}")
}

pub fn is_registered(hosts_path: &Path, hostname: &str) -> Result<bool> {
    if !hosts_path.exists() {
        return Ok(false);
    }

    let content =
        fs::read_to_string(hosts_path).with_context(|| format!("lendo {:?}", hosts_path))?;

    Ok(content
        .lines()
        .any(|line| line_maps_hostname(line, hostname)))
}

/// Appends the loopback entry for `hostname`, skipping if one already exists
pub fn register(hosts_path: &Path, hostname: &str) -> Result<()> {
    if is_registered(hosts_path, hostname)? {
        debug!("Host {} já registrado em {:?}", hostname, hosts_path);
        return Ok(());
    }

    let mut content = if hosts_path.exists() {
        fs::read_to_string(hosts_path).with_context(|| format!("lendo {:?}", hosts_path))?
    } else {
        String::new()
    };

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }

    content.push_str(&hosts_line(hostname));
    content.push('\n');

    fs::write(hosts_path, content).with_context(|| format!("escrevendo {:?}", hosts_path))
}

/// Removes the loopback entry for `hostname`, preserving other names that
/// share the same line
pub fn unregister(hosts_path: &Path, hostname: &str) -> Result<()> {
    if !hosts_path.exists() {
        return Ok(());
    }

    let content =
        fs::read_to_string(hosts_path).with_context(|| format!("lendo {:?}", hosts_path))?;

    let mut lines = Vec::new();
    let mut changed = false;

    for line in content.lines() {
        if !line_maps_hostname(line, hostname) {
            lines.push(line.to_string());
            continue;
        }

        changed = true;

        let kept: Vec<&str> = entry_fields(line)
            .skip(1)
            .filter(|name| *name != hostname)
            .collect();

        if !kept.is_empty() {
            lines.push(format!("{LOOPBACK} {}", kept.join(" ")));
        }
    }

    if !changed {
        debug!("Host {} não estava registrado em {:?}", hostname, hosts_path);
        return Ok(());
    }

    let mut output = lines.join("\n");
    if !output.is_empty() {
        output.push('\n');
    }

    fs::write(hosts_path, output).with_context(|| format!("escrevendo {:?}", hosts_path))
}

fn line_maps_hostname(line: &str, hostname: &str) -> bool {
    let mut fields = entry_fields(line);

    match fields.next() {
        Some(LOOPBACK) => fields.any(|name| name == hostname),
        _ => false,
    }
}

/// Fields of a hosts entry, ignoring any trailing comment
fn entry_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split('#').next().unwrap_or("").split_whitespace()
}
