//! Lookup of the invoking user's identity.

use std::path::PathBuf;

use copyshell_core::Identity;

const UNKNOWN_USER: &str = "user";
const UNKNOWN_HOST: &str = "localhost";

/// Resolves username, host name and home directory for this process.
///
/// Every part falls back to a placeholder instead of failing; the prompt
/// is cosmetic and must not block startup.
pub fn current_identity() -> Identity {
    Identity::new(current_username(), current_hostname(), current_home())
}

fn current_username() -> String {
    // The password database is authoritative; the environment may be
    // cleared (cron, `env -i`) or stale (some sudo setups)
    passwd_username()
        .or_else(|| {
            ["USER", "LOGNAME", "USERNAME"]
                .iter()
                .find_map(|var| non_empty_env(var))
        })
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

fn passwd_username() -> Option<String> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let uid = real_uid(&status)?;
    let passwd = std::fs::read_to_string("/etc/passwd").ok()?;
    username_for_uid(&passwd, uid)
}

/// Real uid from the `Uid:` line of `/proc/<pid>/status`.
fn real_uid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|ids| ids.split_whitespace().next())
        .and_then(|uid| uid.parse().ok())
}

/// Login name of `uid` in `/etc/passwd` format (`name:pw:uid:...`).
fn username_for_uid(passwd: &str, uid: u32) -> Option<String> {
    passwd.lines().find_map(|line| {
        let mut fields = line.split(':');
        let name = fields.next()?;
        let entry_uid: u32 = fields.nth(1)?.parse().ok()?;
        (entry_uid == uid && !name.is_empty()).then(|| name.to_string())
    })
}

fn current_hostname() -> String {
    // Linux exposes the node name here without spawning anything
    if let Ok(name) = std::fs::read_to_string("/proc/sys/kernel/hostname") {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if let Some(name) = ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|var| non_empty_env(var))
    {
        return name;
    }

    std::process::Command::new("hostname")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

fn current_home() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
