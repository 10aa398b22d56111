// ABOUTME: Integration tests for the openstates CLI commands
// ABOUTME: Drives the built binary against saved pages in temp directories

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn openstates_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_openstates"))
}

fn stdout_lines(output: &std::process::Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

const ROSTER: &str = r#"<html><body><table id="reports-table"><tbody>
<tr><td class="seatCell">SD 1</td><td class="nameCell"><a href="/l/1">Smith, Jane</a></td><td class="partyCell">D</td><td class="phoneCell"></td><td class="emailCell"></td></tr>
<tr><td class="seatCell">HD 2</td><td class="nameCell"><a href="/l/2">Jones, Bob</a></td><td class="partyCell">R</td><td class="phoneCell"></td><td class="emailCell"></td></tr>
</tbody></table></body></html>"#;

#[test]
fn test_openstates_help() {
    let output = openstates_binary().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["action", "votes", "bill", "people", "orgs", "scrape"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[test]
fn test_openstates_version() {
    let output = openstates_binary().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("openstates"));
}

#[test]
fn test_action_args_share_committee_context() {
    let output = openstates_binary()
        .args(["action", "JUD RPT 2DP", "DP: SMITH", "JUD, FIN"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let actions = stdout_lines(&output);
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[1]["description"], "JUD Do Pass: SMITH");
    assert_eq!(actions[1]["classification"][0], "committee-passage");
    assert_eq!(actions[2]["description"], "Referred to Judiciary and Finance");
}

#[test]
fn test_action_reads_stdin() {
    let mut child = openstates_binary()
        .arg("action")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"READ THE FIRST TIME\nFN1: ZERO(DNR)\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let actions = stdout_lines(&output);
    assert_eq!(actions[0]["classification"][1], "reading-1");
    assert_eq!(
        actions[1]["description"],
        "Fiscal Note 1: No fiscal impact (Natural Resources)"
    );
}

#[test]
fn test_votes_from_report_text() {
    let temp = TempDir::new().unwrap();
    let report = temp.path().join("report.txt");
    fs::write(
        &report,
        "The question being: \"Shall HB 1 pass?\"\nYEAS: 3 NAYS: 1\n\nYeas: A, B, C\n\nNays: D\n",
    )
    .unwrap();

    let output = openstates_binary()
        .arg("votes")
        .arg(&report)
        .args(["--url", "http://example/vote", "--bill", "HB 1"])
        .args(["--chamber", "lower", "--date", "2019-05-01"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let votes = stdout_lines(&output);
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0]["result"], "pass");
    assert_eq!(votes[0]["motion_text"], "Shall HB 1 pass?");
    assert_eq!(votes[0]["votes"].as_array().unwrap().len(), 4);
}

#[test]
fn test_votes_rejects_bad_chamber() {
    let output = openstates_binary()
        .args(["votes", "x.txt", "--url", "u", "--bill", "HB 1"])
        .args(["--chamber", "joint", "--date", "2019-05-01"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_people_by_chamber() {
    let temp = TempDir::new().unwrap();
    let page = temp.path().join("roster.html");
    fs::write(&page, ROSTER).unwrap();

    let output = openstates_binary()
        .arg("people")
        .arg(&page)
        .args(["--chamber", "upper"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let people = stdout_lines(&output);
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["_type"], "person");
    assert_eq!(people[0]["name"], "Smith, Jane");
    assert_eq!(people[0]["district"], "1");
}

#[test]
fn test_orgs() {
    let output = openstates_binary().args(["orgs", "ak"]).output().unwrap();
    assert!(output.status.success());

    let orgs = stdout_lines(&output);
    assert_eq!(orgs.len(), 3);
    assert_eq!(orgs[0]["classification"], "legislature");
    assert_eq!(orgs[1]["parent_id"], orgs[0]["id"]);
}

#[test]
fn test_orgs_unknown_jurisdiction() {
    let output = openstates_binary().args(["orgs", "zz"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Unknown jurisdiction: zz"));
}

#[test]
fn test_scrape_writes_jsonl() {
    let temp = TempDir::new().unwrap();
    let pages = temp.path().join("pages");
    fs::create_dir(&pages).unwrap();
    fs::write(
        pages.join("leg.mt.gov%2Flegislator-information%2F%3Fsession_select%3D111.html"),
        ROSTER,
    )
    .unwrap();
    let config = temp.path().join("scrape.json");
    fs::write(
        &config,
        r#"{"schemaVersion": "1.0", "jurisdiction": "mt", "snapshotDir": "pages", "outputDir": "out"}"#,
    )
    .unwrap();

    let output = openstates_binary()
        .arg("scrape")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Wrote 5 records"));

    let people = fs::read_to_string(temp.path().join("out/person.jsonl")).unwrap();
    assert_eq!(people.lines().count(), 2);
    let orgs = fs::read_to_string(temp.path().join("out/organization.jsonl")).unwrap();
    assert_eq!(orgs.lines().count(), 3);
}

#[test]
fn test_scrape_missing_snapshot_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("scrape.json");
    fs::write(
        &config,
        r#"{"schemaVersion": "1.0", "jurisdiction": "mt", "snapshotDir": "pages", "outputDir": "out"}"#,
    )
    .unwrap();

    let output = openstates_binary()
        .arg("scrape")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Fetch error"));
}
