//! Integration tests for the tbx CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CORPUS: &str = "\\_sh v3.0  400  Text\n\
\n\
\\ref kuf-01.001\n\
\\ELANBegin 00:00:01.000\n\
\\ELANEnd 00:00:02.500\n\
\\tx nikaya bam\n\
\\mb ni- kaya bam\n\
\\ge 1SG- house eat\n\
\\ps pfx- n vt\n\
\\lxid 0001- 0012 0007\n\
\\ft I eat at home\n\
\n\
\\ref kuf-01.002\n\
\\tx kaya\n\
\\mb kaya\n\
\\ge house\n\
\\ps n\n\
\\lxid 0012\n";

const TABLE: &str = "lxid,old_ps,new_ps\n12,n,nloc\n7,vt,vtr\n";

/// Corpus and table directories laid out the way `tbx replace` expects
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("corpus")).unwrap();
        fs::create_dir(dir.path().join("tables")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn replace(&self) -> Command {
        let mut cmd = Command::cargo_bin("tbx").unwrap();
        cmd.arg("replace")
            .arg("--corpus-dir")
            .arg(self.path("corpus"))
            .arg("--tables-dir")
            .arg(self.path("tables"))
            .arg("--output-dir")
            .arg(self.path("out"))
            .arg("--quiet");
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_replace_rewrites_paired_corpus() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);
    ws.write("tables/kuf-ps.csv", TABLE);

    ws.replace()
        .assert()
        .success()
        .stdout(predicate::str::contains("kuf-01.txt: 2 records, 3 replacements"))
        .stdout(predicate::str::contains("Files: 1 processed, 0 failed, 0 skipped"));

    let written = read(&ws.path("out/kuf-01.txt"));
    assert!(written.starts_with("\\_sh v3.0  400  Text\n"));
    assert!(written.contains("\\tx nikaya        bam  \n"));
    assert!(written.contains("\\mb ni-    kaya   bam  \n"));
    assert!(written.contains("\\ps pfx-   nloc   vtr  \n"));
    assert!(written.contains("\\ft I eat at home\n"));
    assert!(written.contains("\\ps nloc  \n"));

    let log = read(&ws.path("out/replace.log"));
    assert!(log.contains(
        "tbx_core::replace|INFO|changed form '0012' tier \\ps 'n' to 'nloc' in kuf-01.001"
    ));
}

#[test]
fn test_replace_skips_unpaired_corpus() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);
    ws.write("corpus/abc-01.txt", CORPUS);
    ws.write("tables/kuf-ps.csv", TABLE);

    ws.replace()
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 1 processed, 0 failed, 1 skipped"));

    assert!(ws.path("out/kuf-01.txt").exists());
    assert!(!ws.path("out/abc-01.txt").exists());
}

#[test]
fn test_replace_json_report() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);
    ws.write("tables/kuf-ps.csv", TABLE);

    let output = ws.replace().arg("-f").arg("json").output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["files"], 1);
    assert_eq!(report["summary"]["replacements"], 3);
    assert!(report["files"][0]["file"]
        .as_str()
        .unwrap()
        .ends_with("kuf-01.txt"));
    assert_eq!(report["files"][0]["records"], 2);
}

#[test]
fn test_replace_whole_transcription() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);
    ws.write("tables/kuf-tx.csv", "lxid,old_ps,new_ps\n7,bam,bamo\n");

    ws.replace().arg("-t").arg("tx").assert().success();

    let written = read(&ws.path("out/kuf-01.txt"));
    assert!(written.contains("\\tx nikaya        bamo \n"));
    assert!(written.contains("\\mb ni-    kaya   bam  \n"));
}

#[test]
fn test_replace_malformed_file_fails_batch() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);
    ws.write("corpus/kuf-02.txt", "stray text\n\\ref 1\n\\tx ka\n");
    ws.write("tables/kuf-ps.csv", TABLE);

    ws.replace()
        .assert()
        .failure()
        .stdout(predicate::str::contains("kuf-02.txt: Failed to process"))
        .stderr(predicate::str::contains("1 of 2 files could not be processed"));

    assert!(ws.path("out/kuf-01.txt").exists());
    assert!(!ws.path("out/kuf-02.txt").exists());
}

#[test]
fn test_replace_rejects_output_in_corpus_dir() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("replace")
        .arg("--corpus-dir")
        .arg(ws.path("corpus"))
        .arg("--tables-dir")
        .arg(ws.path("tables"))
        .arg("--output-dir")
        .arg(ws.path("corpus"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("output directory is the corpus directory"));
}

#[test]
fn test_replace_missing_corpus_dir() {
    let ws = Workspace::new();

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("replace")
        .arg("--corpus-dir")
        .arg(ws.path("missing"))
        .arg("--tables-dir")
        .arg(ws.path("tables"))
        .arg("--output-dir")
        .arg(ws.path("out"));

    cmd.assert().failure();
}

#[test]
fn test_replace_with_config_file() {
    let ws = Workspace::new();
    ws.write("corpus/kuf-01.txt", CORPUS);
    ws.write("tables/kuf-ps.csv", TABLE);
    let config = ws.write(
        "tbx.toml",
        &format!(
            "[paths]\ncorpus_dir = {:?}\ntables_dir = {:?}\noutput_dir = {:?}\n\n[corpus]\nalign = false\n",
            ws.path("corpus"),
            ws.path("tables"),
            ws.path("out"),
        ),
    );

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("replace").arg("-c").arg(&config).arg("-q");
    cmd.assert().success();

    let written = read(&ws.path("out/kuf-01.txt"));
    assert!(written.contains("\\ps pfx- nloc vtr\n"));
}

#[test]
fn test_check_reports_invalid_record() {
    let ws = Workspace::new();
    let file = ws.write(
        "kuf-03.txt",
        "\\ref 1\n\\tx nikaya\n\\mb ni- ka- ya\n\\ge 1SG- go\n\\ps pfx- pfx- v\n\\lxid 1- 2- 3\n",
    );

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("check").arg("-i").arg(&file).arg("-q");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("morpheme numbers don't match"))
        .stderr(predicate::str::contains("1 records failed validation"));
}

#[test]
fn test_check_valid_corpus() {
    let ws = Workspace::new();
    let file = ws.write("kuf-01.txt", CORPUS);

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("check").arg("-i").arg(&file).arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 records, 0 replacements, 0 issues"));
}

#[test]
fn test_markers_lists_first_seen_order() {
    let ws = Workspace::new();
    let file = ws.write("kuf-01.txt", CORPUS);

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("markers").arg("-i").arg(&file);

    cmd.assert().success().stdout(predicate::str::contains(
        "\\_sh \\ref \\ELANBegin \\ELANEnd \\tx \\mb \\ge \\ps \\lxid \\ft",
    ));
}

#[test]
fn test_terms_writes_csv() {
    let ws = Workspace::new();
    let dict = ws.write(
        "kuf.db",
        "\\lx kaya\n\\ps n\n\\ge house\n\n\\lx bam\n\\ps vt\n\\ge eat\n",
    );
    let output = ws.path("terms.csv");

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("terms")
        .arg("-i")
        .arg(&dict)
        .arg("--pos")
        .arg("n")
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    assert_eq!(read(&output), "word,pos,gloss\nkaya,n,house\n");
}

#[test]
fn test_dict_replace() {
    let ws = Workspace::new();
    let dict = ws.write(
        "kuf.db",
        "\\_sh v3.0  231  MDF 4.0\n\n\\lx kaya\n\\ps n\n\\ge house\n\n\\lx bam\n\\ps vt\n\\ge eat\n",
    );
    let table = ws.write("kuf-pos.csv", "lx,Old pos,New pos\nkaya,n,nloc\n");

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("dict-replace")
        .arg("-i")
        .arg(&dict)
        .arg("--table")
        .arg(&table)
        .arg("-o")
        .arg(ws.path("out"))
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 records, 1 replacements"));

    let written = read(&ws.path("out/kuf.db"));
    assert!(written.starts_with("\\_sh v3.0  231  MDF 4.0\n"));
    assert!(written.contains("\\lx kaya\n\\ps nloc\n\\ge house\n"));
    assert!(written.contains("\\lx bam\n\\ps vt\n\\ge eat\n"));
}

#[test]
fn test_generate_config_then_load() {
    let ws = Workspace::new();
    let config = ws.path("tbx.toml");

    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("generate-config").arg("-o").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    assert!(read(&config).contains("[replacement]"));

    let file = ws.write("kuf-01.txt", CORPUS);
    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("check")
        .arg("-i")
        .arg(&file)
        .arg("-c")
        .arg(&config)
        .arg("-q");
    cmd.assert().success();
}

#[test]
fn test_missing_input_file() {
    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("check").arg("-i").arg("nonexistent-file.txt");

    cmd.assert().failure().stderr(predicate::str::contains(
        "File not found: nonexistent-file.txt",
    ));
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("replace"))
        .stdout(predicate::str::contains("dict-replace"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_unknown_tier_rejected() {
    let mut cmd = Command::cargo_bin("tbx").unwrap();
    cmd.arg("replace").arg("-t").arg("bad tier");

    cmd.assert().failure();
}
