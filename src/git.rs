//! Read-only git queries using the system git command

use std::path::Path;
use std::process::Command;

/// Fetch the URL of `remote` configured in the repository at `repo_path`.
///
/// Returns a plain message on failure; callers fold it into their own error.
pub fn remote_url(repo_path: &Path, remote: &str) -> Result<String, String> {
    let output = Command::new("git")
        .args(["remote", "get-url", remote])
        .current_dir(repo_path)
        .output()
        .map_err(|e| format!("failed to execute git: {}", e))?;

    if !output.status.success() {
        return Err(format!(
            "git remote get-url {} failed: {}",
            remote,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(format!("remote '{}' has no URL", remote));
    }

    Ok(url)
}
