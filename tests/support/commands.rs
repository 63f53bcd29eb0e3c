//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a radkeep command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - RADKEEP_FILE pointing at the test authorize file
    /// - HOME and XDG_CONFIG_HOME set to the temporary home directory
    /// - NO_COLOR so output can be matched verbatim
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("radkeep").expect("failed to find radkeep binary");
        cmd.env("RADKEEP_FILE", self.file());
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RADKEEP_CONFIG");
        cmd.env_remove("RADKEEP_LOG");
        cmd.env_remove("RADKEEP_DEBUG_LOG_SECRETS");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `radkeep add` command.
    pub fn add(&self, user: &str) -> Output {
        self.cmd()
            .args(["add", user])
            .output()
            .expect("failed to run radkeep add")
    }

    /// Shortcut for `radkeep add --hash` command.
    pub fn add_hash(&self, user: &str, hash: &str) -> Output {
        self.cmd()
            .args(["add", user, "--hash", hash])
            .output()
            .expect("failed to run radkeep add --hash")
    }

    /// Shortcut for `radkeep add --prompt` with the password on stdin.
    pub fn add_piped(&self, user: &str, password: &str) -> Output {
        self.cmd()
            .args(["add", user, "--prompt"])
            .write_stdin(format!("{}\n", password))
            .output()
            .expect("failed to run radkeep add --prompt")
    }

    /// Shortcut for `radkeep reset` command.
    pub fn reset(&self, user: &str) -> Output {
        self.cmd()
            .args(["reset", user])
            .output()
            .expect("failed to run radkeep reset")
    }

    /// Shortcut for `radkeep status` command.
    pub fn status(&self, user: &str) -> Output {
        self.cmd()
            .args(["status", user])
            .output()
            .expect("failed to run radkeep status")
    }

    /// Shortcut for `radkeep status --json` command.
    pub fn status_json(&self, user: &str) -> Output {
        self.cmd()
            .args(["status", user, "--json"])
            .output()
            .expect("failed to run radkeep status --json")
    }

    /// Shortcut for `radkeep list` command.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run radkeep list")
    }

    /// Shortcut for `radkeep list --json` command.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run radkeep list --json")
    }

    /// Shortcut for `radkeep rm --yes` command.
    pub fn rm(&self, user: &str) -> Output {
        self.cmd()
            .args(["rm", user, "--yes"])
            .output()
            .expect("failed to run radkeep rm")
    }

    /// Shortcut for `radkeep sanitize` command.
    pub fn sanitize(&self) -> Output {
        self.cmd()
            .arg("sanitize")
            .output()
            .expect("failed to run radkeep sanitize")
    }
}
