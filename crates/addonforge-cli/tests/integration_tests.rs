//! Integration tests for CLI commands

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to run addonforge from inside `dir`
fn addonforge(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_addonforge"))
        .current_dir(dir)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute addonforge")
}

/// Repository root with a `repo/` working directory and sibling packages
struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("repo")).unwrap();
        Self { root }
    }

    fn repo(&self) -> PathBuf {
        self.root.path().join("repo")
    }

    fn add_package(&self, id: &str, version: &str) -> PathBuf {
        let dir = self.root.path().join(id);
        fs::create_dir_all(dir.join("resources/lib")).unwrap();
        fs::write(
            dir.join("addon.xml"),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<addon id="{id}" name="Test" version="{version}" provider-name="tests">
    <requires>
        <import addon="xbmc.python" version="2.1.0"/>
    </requires>
    <extension point="xbmc.addon.metadata">
        <summary lang="en">Test add-on</summary>
    </extension>
</addon>
"#
            ),
        )
        .unwrap();
        fs::write(dir.join("default.py"), "import xbmc\n").unwrap();
        fs::write(dir.join("default.pyc"), [0u8, 1, 2, 3]).unwrap();
        fs::write(dir.join("resources/lib/api.py"), "API = 1\n").unwrap();
        fs::create_dir_all(dir.join(".git")).unwrap();
        fs::write(dir.join(".git/config"), "[core]\n").unwrap();
        fs::write(dir.join("changelog.txt"), format!("v{version}\n")).unwrap();
        fs::write(dir.join("icon.png"), b"\x89PNG\r\n").unwrap();
        dir
    }
}

mod build_command {
    use super::*;

    #[test]
    fn test_build_without_arguments() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");
        fs::create_dir_all(ws.root.path().join("unrelated.dir")).unwrap();

        let output = addonforge(&ws.repo(), &[]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success(), "build failed: {}", stdout);
        assert!(stdout.contains("plugin.video.foo"));
        assert!(stdout.contains("done"));

        let out = ws.repo().join("plugin.video.foo");
        assert!(out.join("plugin.video.foo-2.1.0.zip").is_file());
        assert!(out.join("changelog-2.1.0.txt").is_file());
        assert!(out.join("icon.png").is_file());
        assert!(!out.join("fanart.jpg").exists());

        let xml = fs::read_to_string(ws.repo().join("addons.xml")).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<addons>\n\t<addon"));
        assert!(xml.contains("id=\"plugin.video.foo\""));
        assert!(!xml.contains("unrelated.dir"));
        assert!(!ws.repo().join("unrelated.dir").exists());
    }

    #[test]
    fn test_archive_excludes_vcs_and_bytecode() {
        let ws = Workspace::new();
        ws.add_package("script.module.bar", "0.3.0");

        let output = addonforge(&ws.repo(), &["build"]);
        assert!(output.status.success());

        let archive = ws
            .repo()
            .join("script.module.bar/script.module.bar-0.3.0.zip");
        let mut entries = addonforge_core::list_archive(&archive).unwrap();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                "script.module.bar/addon.xml",
                "script.module.bar/changelog.txt",
                "script.module.bar/default.py",
                "script.module.bar/icon.png",
                "script.module.bar/resources/lib/api.py",
            ]
        );
    }

    #[test]
    fn test_checksum_matches_manifest_on_disk() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");
        ws.add_package("repository.example", "1.0.0");

        assert!(addonforge(&ws.repo(), &[]).status.success());

        let xml = fs::read(ws.repo().join("addons.xml")).unwrap();
        let md5 = fs::read_to_string(ws.repo().join("addons.xml.md5")).unwrap();
        assert_eq!(md5, addonforge_core::md5_hex(&xml));
    }

    #[test]
    fn test_second_run_skips_unchanged() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");

        assert!(addonforge(&ws.repo(), &[]).status.success());
        let output = addonforge(&ws.repo(), &[]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success());
        assert!(stdout.contains("skipped"));
        assert!(stdout.contains("0 created, 1 unchanged, 0 failed"));
    }

    #[test]
    fn test_force_rewrites() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");

        assert!(addonforge(&ws.repo(), &[]).status.success());
        let output = addonforge(&ws.repo(), &["build", "--force"]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success());
        assert!(stdout.contains("1 created, 0 unchanged"));
    }

    #[test]
    fn test_malformed_descriptor_fails() {
        let ws = Workspace::new();
        let dir = ws.add_package("plugin.video.foo", "2.1.0");
        fs::write(dir.join("addon.xml"), "<addon version=\"2.1.0\">").unwrap();

        let output = addonforge(&ws.repo(), &[]);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert_eq!(output.status.code(), Some(4));
        assert!(stderr.contains("plugin.video.foo"));
        assert!(!ws.repo().join("addons.xml").exists());
    }

    #[test]
    fn test_config_file_prefixes() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");
        ws.add_package("plugin.audio.bar", "1.0.0");
        fs::write(
            ws.repo().join("addonforge.yaml"),
            "prefixes:\n  - plugin.audio.\n",
        )
        .unwrap();

        assert!(addonforge(&ws.repo(), &[]).status.success());

        let xml = fs::read_to_string(ws.repo().join("addons.xml")).unwrap();
        assert!(xml.contains("plugin.audio.bar"));
        assert!(!xml.contains("plugin.video.foo"));
    }

    #[test]
    fn test_invalid_config_file() {
        let ws = Workspace::new();
        fs::write(ws.repo().join("addonforge.yaml"), "prefixes: []\n").unwrap();

        let output = addonforge(&ws.repo(), &[]);
        assert_eq!(output.status.code(), Some(3));
    }
}

mod list_command {
    use super::*;

    #[test]
    fn test_list_shows_versions_without_writing() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");
        ws.add_package("script.module.bar", "0.3.0");

        let output = addonforge(&ws.repo(), &["list"]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success());
        assert!(stdout.contains("plugin.video.foo"));
        assert!(stdout.contains("2.1.0"));
        assert!(stdout.contains("script.module.bar"));
        assert!(!ws.repo().join("addons.xml").exists());
    }

    #[test]
    fn test_list_empty() {
        let ws = Workspace::new();
        let output = addonforge(&ws.repo(), &["list"]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success());
        assert!(stdout.contains("No packages found"));
    }
}

mod verify_command {
    use super::*;

    #[test]
    fn test_verify_after_build() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");
        assert!(addonforge(&ws.repo(), &[]).status.success());

        let output = addonforge(&ws.repo(), &["verify"]);
        assert!(output.status.success());
    }

    #[test]
    fn test_verify_detects_edit() {
        let ws = Workspace::new();
        ws.add_package("plugin.video.foo", "2.1.0");
        assert!(addonforge(&ws.repo(), &[]).status.success());

        let manifest = ws.repo().join("addons.xml");
        let mut xml = fs::read_to_string(&manifest).unwrap();
        xml.push_str("<!-- edited -->\n");
        fs::write(&manifest, xml).unwrap();

        let output = addonforge(&ws.repo(), &["verify"]);
        assert_eq!(output.status.code(), Some(6));
    }

    #[test]
    fn test_verify_without_build() {
        let ws = Workspace::new();
        let output = addonforge(&ws.repo(), &["verify"]);
        assert_eq!(output.status.code(), Some(6));
    }
}
