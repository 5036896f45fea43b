//! Integration tests for shelltree


use harness::{TestDir, run_shelltree};

const SCENARIO: &str = "$ cd /\n$ ls\ndir a\n100 f1\n$ cd a\n$ ls\n200 f2\n";

const SAMPLE: &str = "\
$ cd /
$ ls
dir a
14848514 b.txt
8504156 c.dat
dir d
$ cd a
$ ls
dir e
29116 f
2557 g
62596 h.lst
$ cd e
$ ls
584 i
$ cd ..
$ cd ..
$ cd d
$ ls
4060174 j
8033020 d.log
5626152 d.ext
7214296 k
";

#[test]
fn test_default_constants_on_sample() {
    let dir = TestDir::new();
    dir.add_transcript("sample.txt", SAMPLE);

    let (stdout, _stderr, success) = run_shelltree(dir.path(), &["sample.txt"]);
    assert!(success, "shelltree should succeed");
    assert_eq!(
        stdout,
        "Reported size is: 48381165, smallest deletable size is 24933642\n"
    );
}

#[test]
fn test_default_input_path() {
    let dir = TestDir::new();
    dir.add_transcript("prod.txt", SAMPLE);

    let (stdout, _stderr, success) = run_shelltree(dir.path(), &[]);
    assert!(success);
    assert!(
        stdout.contains("Reported size is: 48381165"),
        "should read prod.txt by default: {}",
        stdout
    );
}

#[test]
fn test_custom_capacity() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SCENARIO);

    let (stdout, _stderr, success) =
        run_shelltree(dir.path(), &["log.txt", "--capacity", "400", "--required", "150"]);
    assert!(success);
    assert_eq!(
        stdout,
        "Reported size is: 300, smallest deletable size is 200\n"
    );
}

#[test]
fn test_no_directory_large_enough() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SCENARIO);

    let (stdout, _stderr, success) =
        run_shelltree(dir.path(), &["log.txt", "--capacity", "300", "--required", "1000"]);
    assert!(success, "an exhausted query is a result, not a failure");
    assert!(
        stdout.contains("no directory large enough to delete"),
        "should report exhausted query: {}",
        stdout
    );
    assert!(!stdout.contains("undefined"));
}

#[test]
fn test_tree_view() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SAMPLE);

    let (stdout, _stderr, success) = run_shelltree(dir.path(), &["log.txt", "--tree"]);
    assert!(success);
    assert!(stdout.starts_with("/ (48381165)\n"), "got: {}", stdout);
    assert!(stdout.contains("├── a (94853)"));
    assert!(stdout.contains("│   ├── e (584)"));
    assert!(stdout.contains("└── d (24933642)"));
    assert!(stdout.contains("3 directories, 10 files"));
    assert!(stdout.ends_with("smallest deletable size is 24933642\n"));
}

#[test]
fn test_tree_view_human_sizes() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SAMPLE);

    let (stdout, _stderr, success) = run_shelltree(dir.path(), &["log.txt", "-t", "-H"]);
    assert!(success);
    assert!(stdout.starts_with("/ (46.1M)\n"), "got: {}", stdout);
    assert!(stdout.contains("a (92.6K)"));
}

#[test]
fn test_json_output() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SAMPLE);

    let (stdout, _stderr, success) = run_shelltree(dir.path(), &["log.txt", "--json"]);
    assert!(success);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["root_size"], 48381165);
    assert_eq!(value["smallest_deletable"], 24933642);
    assert_eq!(value["directory_count"], 4);
    assert_eq!(
        value["directory_sizes"],
        serde_json::json!([584, 94853, 24933642, 48381165])
    );
    assert!(value.get("tree").is_none());
}

#[test]
fn test_json_output_with_tree() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SCENARIO);

    let (stdout, _stderr, success) = run_shelltree(dir.path(), &["log.txt", "--json", "--tree"]);
    assert!(success);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let nodes = value["tree"].as_array().expect("flat node list");
    assert_eq!(nodes[0]["name"], "/");
    assert_eq!(nodes[0]["size"], 300);
    assert_eq!(nodes[1]["name"], "a");
    assert_eq!(nodes[1]["parent"], 0);
    assert_eq!(nodes[2]["name"], "f2");
    assert_eq!(nodes[2]["parent"], nodes[1]["id"]);
    assert_eq!(nodes[2]["size"], 200);
}

#[test]
fn test_json_exhausted_is_null() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SCENARIO);

    let (stdout, _stderr, success) = run_shelltree(
        dir.path(),
        &["log.txt", "--json", "--capacity", "300", "--required", "1000"],
    );
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(value["smallest_deletable"].is_null());
    assert_eq!(value["needed"], 1000);
}

#[test]
fn test_logging_goes_to_stderr() {
    let dir = TestDir::new();
    dir.add_transcript("log.txt", SCENARIO);

    let (stdout, stderr, success) = run_shelltree(dir.path(), &["log.txt", "-v"]);
    assert!(success);
    assert!(stderr.contains("tree rebuilt"), "stderr: {}", stderr);
    assert_eq!(
        stdout,
        "Reported size is: 300, smallest deletable size is 200\n"
    );
}
